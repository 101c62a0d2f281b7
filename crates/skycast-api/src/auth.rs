//! Authorization seam for mutating backend calls.
//!
//! Token issuance is out of scope for this crate; callers hand the
//! client anything that can produce an Authorization header value.

/// Supplies the Authorization header attached to mutating requests.
pub trait AuthProvider: Send + Sync {
    /// Full header value, e.g. `Bearer <token>`. None sends no header.
    fn authorization(&self) -> Option<String>;
}

/// Fixed bearer token, typically read from configuration.
#[derive(Debug, Clone)]
pub struct StaticToken {
    token: String,
}

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl AuthProvider for StaticToken {
    fn authorization(&self) -> Option<String> {
        Some(format!("Bearer {}", self.token))
    }
}

/// No authentication; mutating calls go out bare.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuth;

impl AuthProvider for NoAuth {
    fn authorization(&self) -> Option<String> {
        None
    }
}
