//! Admin capability check from the `Authorization: Bearer <token>` header.

use crate::auth::{Principal, ADMIN_CAPABILITY};
use crate::error::AppError;
use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

/// Extractor that only succeeds for callers holding the admin capability.
/// Place it before other extractors so rejection happens first.
#[derive(Clone, Debug)]
pub struct AdminGuard(pub Principal);

#[async_trait]
impl FromRequestParts<AppState> for AdminGuard {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(bearer_token)
            .ok_or_else(|| AppError::Unauthorized("Please authenticate".into()))?;
        let principal = state
            .authorizer
            .authenticate(token)
            .await
            .ok_or_else(|| AppError::Unauthorized("Please authenticate".into()))?;
        if !principal.can(ADMIN_CAPABILITY) {
            tracing::warn!("admin route denied: missing capability");
            return Err(AppError::Forbidden("Forbidden".into()));
        }
        Ok(AdminGuard(principal))
    }
}

fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}
