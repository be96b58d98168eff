//! The credential subsystem.
//!
//! Everything that proves who a caller is and decides what they may do:
//!
//! - `token` - the signed credential codec (issue / decode)
//! - `identity` - the request-scoped resolved identity and its extractor
//! - `interceptor` - per-request middleware that binds an identity
//! - `access` - the declarative policy table and its single decision point

pub mod access;
pub mod identity;
pub mod interceptor;
pub mod token;
