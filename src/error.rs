//! Request-level errors and their HTTP mapping.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use thiserror::Error;
use tracing::error;

use crate::domain::{AssignmentId, AssignmentPictureId};
use crate::protocol::InvalidStoryOut;

/// Broken invariants when writing to the store. These are caller bugs, never user input errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
  #[error("story has no author")]
  MissingAuthor,
  #[error("unknown assignment {0}")]
  UnknownAssignment(AssignmentId),
  #[error("assignment picture {picture} does not belong to assignment {assignment}")]
  ForeignPicture { assignment: AssignmentId, picture: AssignmentPictureId },
}

#[derive(Error, Debug)]
pub enum AppError {
  #[error("Not found")]
  NotFound,

  #[error("Authentication required")]
  Unauthorized,

  #[error("Invalid story")]
  InvalidStory(Box<InvalidStoryOut>),

  #[error("Integrity error: {0}")]
  Integrity(#[from] StoreError),
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    match self {
      AppError::NotFound => (StatusCode::NOT_FOUND, self.to_string()).into_response(),
      AppError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()).into_response(),
      AppError::InvalidStory(out) => (StatusCode::UNPROCESSABLE_ENTITY, Json(*out)).into_response(),
      AppError::Integrity(e) => {
        error!(target: "captioner_backend", error = %e, "Store integrity violation");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
      }
    }
  }
}
