//! HTTP handlers.
//!
//! Handlers translate between the wire (JSON envelopes, status codes, query
//! strings) and the services. No business rules live here.

pub mod auth_handler;
pub mod inventory_handler;
pub mod sweet_handler;
