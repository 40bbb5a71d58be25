//! HTTP Basic authentication for the admin registry.

use std::{fmt, sync::Arc};

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::headers::{authorization::Basic, Authorization, HeaderMapExt};
use subtle::ConstantTimeEq;
use tracing::warn;

use crate::errors::ApiError;

/// Admin username/password, supplied by configuration at startup.
#[derive(Clone)]
pub struct AdminCredentials {
    username: String,
    password: String,
}

impl AdminCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }

    /// Constant-time check; both fields are always compared.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let user_ok = username.as_bytes().ct_eq(self.username.as_bytes());
        let pass_ok = password.as_bytes().ct_eq(self.password.as_bytes());
        (user_ok & pass_ok).into()
    }
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Name of the authenticated admin, available to handlers as an extension.
#[derive(Clone, Debug)]
pub struct AdminUser(pub String);

/// Middleware: require valid `Authorization: Basic` credentials.
pub async fn require_basic_auth(
    State(credentials): State<Arc<AdminCredentials>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(Authorization(basic)) = req.headers().typed_get::<Authorization<Basic>>() else {
        return Err(ApiError::unauthorized("Not authenticated"));
    };

    if !credentials.verify(basic.username(), basic.password()) {
        warn!(username = %basic.username(), path = %req.uri().path(), "rejected admin credentials");
        return Err(ApiError::unauthorized("Unauthorized"));
    }

    req.extensions_mut().insert(AdminUser(basic.username().to_string()));
    Ok(next.run(req).await)
}
