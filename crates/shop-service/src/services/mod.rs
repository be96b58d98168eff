//! Business logic.
//!
//! Services are free async functions over the store traits; handlers own
//! the HTTP shape, services own the rules.

pub mod auth_service;
pub mod inventory_service;
pub mod sweet_service;
