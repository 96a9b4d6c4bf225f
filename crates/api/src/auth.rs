//! Admin authentication: token issuing and the [`AdminUser`] extractor.
//!
//! The service has a single shared admin credential. Login returns an
//! opaque bearer token (the base64-encoded credential pair); the extractor
//! decodes it and equality-checks both halves against configuration.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use linkout_core::error::CoreError;

use crate::config::AdminConfig;
use crate::error::AppError;
use crate::state::AppState;

/// The bearer token handed out by login.
pub fn issue_token(admin: &AdminConfig) -> String {
    BASE64.encode(format!("{}:{}", admin.username, admin.password))
}

/// Check a bearer token against the configured credential.
pub fn verify_token(token: &str, admin: &AdminConfig) -> Result<(), CoreError> {
    let decoded = BASE64
        .decode(token)
        .map_err(|_| CoreError::Unauthorized("Malformed token".into()))?;
    let decoded = String::from_utf8(decoded)
        .map_err(|_| CoreError::Unauthorized("Malformed token".into()))?;
    let Some((username, password)) = decoded.split_once(':') else {
        return Err(CoreError::Unauthorized("Malformed token".into()));
    };
    if username != admin.username || password != admin.password {
        return Err(CoreError::Unauthorized("Invalid token".into()));
    }
    Ok(())
}

/// Authenticated admin extracted from a Bearer token in the
/// `Authorization` header.
///
/// Use this as an extractor parameter in any handler that requires the
/// admin credential:
///
/// ```ignore
/// async fn my_handler(_admin: AdminUser) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AdminUser;

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        verify_token(token, &state.config.admin)?;

        Ok(AdminUser)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> AdminConfig {
        AdminConfig {
            username: "admin".into(),
            password: "hunter2".into(),
        }
    }

    #[test]
    fn issued_token_verifies() {
        let cfg = admin();
        let token = issue_token(&cfg);
        assert!(verify_token(&token, &cfg).is_ok());
    }

    #[test]
    fn wrong_credential_is_rejected() {
        let cfg = admin();
        let forged = BASE64.encode("admin:wrong");
        assert!(verify_token(&forged, &cfg).is_err());
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        let cfg = admin();
        assert!(verify_token("not base64!!", &cfg).is_err());
        assert!(verify_token(&BASE64.encode("no-separator"), &cfg).is_err());
    }
}
