//! # Shop Test Utilities
//!
//! Shared test utilities for the Sweet Shop service.
//!
//! This crate provides:
//! - In-memory store implementations (no database needed)
//! - Fixed test fixtures (signing secret, admin key, config, state)
//! - A credential builder (TestTokenBuilder) for forging edge-case tokens
//! - A server harness (TestShopServer) for end-to-end tests over HTTP
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shop_test_utils::*;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), anyhow::Error> {
//!     let server = TestShopServer::spawn().await?;
//!     let client = reqwest::Client::new();
//!
//!     let response = client
//!         .get(format!("{}/health", server.url()))
//!         .send()
//!         .await?;
//!
//!     assert_eq!(response.status(), 200);
//!     Ok(())
//! }
//! ```

pub mod fixtures;
pub mod memory_stores;
pub mod server_harness;
pub mod token_builders;

// Re-export commonly used items
pub use fixtures::*;
pub use memory_stores::*;
pub use server_harness::*;
pub use token_builders::*;
