//! Authenticated user extraction. Login itself happens upstream: the
//! authenticating proxy forwards the user name in the `x-user` header.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;

pub const USER_HEADER: &str = "x-user";

/// The logged-in user. Rejects the request with 401 when absent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser(pub String);

#[axum::async_trait]
impl<S: Send + Sync> FromRequestParts<S> for AuthenticatedUser {
  type Rejection = AppError;

  async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
    parts
      .headers
      .get(USER_HEADER)
      .and_then(|v| v.to_str().ok())
      .map(str::trim)
      .filter(|name| !name.is_empty())
      .map(|name| AuthenticatedUser(name.to_string()))
      .ok_or(AppError::Unauthorized)
  }
}
