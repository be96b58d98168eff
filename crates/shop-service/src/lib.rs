//! Sweet Shop Service Library
//!
//! This library provides a small shop-inventory web service gated by a
//! stateless, token-based authentication and role-based authorization
//! subsystem.
//!
//! # Modules
//!
//! - `auth` - Credential codec, request interception, access decisions
//! - `config` - Service configuration
//! - `crypto` - Password hashing
//! - `errors` - Error types
//! - `handlers` - HTTP request handlers
//! - `models` - Data models
//! - `repositories` - Store traits and database access layer
//! - `routes` - Router assembly and application state
//! - `services` - Business logic layer

pub mod auth;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
