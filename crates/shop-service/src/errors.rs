use crate::models::ApiResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Fixed message for the unauthenticated (401) responder.
///
/// Expired, malformed, forged, and simply absent credentials all collapse to
/// this one message so callers cannot enumerate why a credential was
/// rejected.
pub const UNAUTHENTICATED_MESSAGE: &str = "Authentication required or token invalid";

/// Fixed message for the forbidden (403) responder. Never names the missing
/// authority.
pub const FORBIDDEN_MESSAGE: &str = "You do not have permission to access this resource";

#[derive(Debug, Error)]
pub enum ShopError {
    /// No valid identity could be established for a request that requires one.
    #[error("{UNAUTHENTICATED_MESSAGE}")]
    Unauthenticated,

    /// A valid identity lacks the authority the operation requires.
    #[error("{FORBIDDEN_MESSAGE}")]
    Forbidden,

    /// Login failed. Unknown username and wrong password collapse to the
    /// same variant so the login endpoint is not a username oracle.
    #[error("Invalid Credentials")]
    InvalidCredentials,

    #[error("Username already taken")]
    UserAlreadyExists,

    /// Carries the full caller-facing message, e.g. "Sweet not found with id: 7".
    #[error("{0}")]
    SweetNotFound(String),

    #[error("Sweet with this name already exists")]
    DuplicateSweet,

    #[error("Out of Stock")]
    OutOfStock,

    /// Caller supplied something unusable (bad restock amount, missing field).
    #[error("{0}")]
    InvalidRequest(String),

    /// Store fault. The detail is logged, never returned.
    #[error("Database error: {0}")]
    Database(String),

    /// Hashing or credential sealing fault. The detail is logged, never returned.
    #[error("Cryptographic error: {0}")]
    Crypto(String),
}

impl ShopError {
    fn status_code(&self) -> StatusCode {
        match self {
            ShopError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ShopError::Forbidden => StatusCode::FORBIDDEN,
            ShopError::InvalidCredentials => StatusCode::BAD_REQUEST,
            ShopError::UserAlreadyExists => StatusCode::CONFLICT,
            ShopError::SweetNotFound(_) => StatusCode::NOT_FOUND,
            ShopError::DuplicateSweet => StatusCode::BAD_REQUEST,
            ShopError::OutOfStock => StatusCode::BAD_REQUEST,
            ShopError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ShopError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ShopError::Crypto(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message placed in the response envelope.
    ///
    /// Internal faults are replaced with a generic message; everything else
    /// uses the Display form.
    fn public_message(&self) -> String {
        match self {
            ShopError::Database(_) | ShopError::Crypto(_) => {
                "An unexpected error occurred".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ShopError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Internal detail goes to the log, never the wire.
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(target: "shop.errors", error = %self, "internal error");
        }

        let body = ApiResponse::<()>::error(self.public_message());
        (status, Json(body)).into_response()
    }
}
