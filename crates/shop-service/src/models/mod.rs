use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role enum. The only two privilege levels the shop knows about.
///
/// Serialized as `"ADMIN"` / `"USER"` both on the wire (inside credentials)
/// and in the users table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    /// Convert to the canonical string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "USER" => Ok(Role::User),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User model (maps to users table).
///
/// The `password_hash` field holds a bcrypt digest, never a plaintext
/// password, and is redacted in Debug output.
#[derive(Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"[REDACTED]")
            .field("role", &self.role)
            .finish()
    }
}

/// Sweet model (maps to sweets table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Sweet {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: i32,
}

/// Fields for a sweet that does not exist yet (no id until persisted).
#[derive(Debug, Clone)]
pub struct NewSweet {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: i32,
}

/// Partial update for an existing sweet. Absent fields keep their stored
/// values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SweetUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i32>,
}

/// The uniform response envelope.
///
/// Every response the service produces, success or failure, has exactly this
/// shape: a success flag, a human-readable message, and an optional payload
/// (`null` when absent). Security failures are therefore indistinguishable
/// from business failures by shape alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying a payload.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self { success: true, message: message.into(), data: Some(data) }
    }

    /// Successful response with no payload (`data` serializes as `null`).
    pub fn ok_empty(message: impl Into<String>) -> Self {
        Self { success: true, message: message.into(), data: None }
    }

    /// Failed response. `data` is always `null`.
    pub fn error(message: impl Into<String>) -> Self {
        Self { success: false, message: message.into(), data: None }
    }
}

/// Payload returned by the login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
}
