//! Admin authentication extractor.

use axum::{
  extract::FromRequestParts,
  http::{header::AUTHORIZATION, request::Parts},
};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::handlers::ApiError;
use crate::state::AppState;

/// Proof that the request carried the configured admin token.
/// Add this as a handler parameter to require admin access.
///
/// Rejects with 403 when no token is configured and 401 when the
/// `Authorization: Bearer` header is missing or wrong.
#[derive(Debug, Clone, Copy)]
pub struct AdminGuard;

impl FromRequestParts<AppState> for AdminGuard {
  type Rejection = ApiError;

  async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
    let expected = state.admin_token.as_deref().ok_or(ApiError::AdminDisabled)?;

    let provided = parts
      .headers
      .get(AUTHORIZATION)
      .and_then(|v| v.to_str().ok())
      .and_then(bearer_token)
      .ok_or(ApiError::Unauthorized)?;

    if !token_matches(provided, expected) {
      tracing::warn!("Rejected admin request to {}", parts.uri.path());
      return Err(ApiError::Unauthorized);
    }
    Ok(AdminGuard)
  }
}

/// Compare fixed-length digests in constant time so neither content nor length leaks
fn token_matches(provided: &str, expected: &str) -> bool {
  let provided = Sha256::digest(provided.as_bytes());
  let expected = Sha256::digest(expected.as_bytes());
  provided.as_slice().ct_eq(expected.as_slice()).into()
}

/// Token from an `Authorization: Bearer <token>` header value
fn bearer_token(header: &str) -> Option<&str> {
  let (scheme, token) = header.split_once(' ')?;
  if !scheme.eq_ignore_ascii_case("bearer") {
    return None;
  }
  let token = token.trim();
  (!token.is_empty()).then_some(token)
}
