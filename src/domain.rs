//! Domain models: assignments, pictures, the per-assignment picture link and stories.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type AssignmentId = u64;
pub type PictureId = u64;
pub type AssignmentPictureId = u64;

fn default_min_length() -> usize { 50 }
fn default_max_length() -> usize { 500 }

/// A writing task. Stories written for it must fit within the length bounds.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Assignment {
  pub id: AssignmentId,
  pub name: String,
  #[serde(default)] pub help: String,
  #[serde(default = "default_min_length")] pub story_min_length: usize,
  #[serde(default = "default_max_length")] pub story_max_length: usize,
}

impl Assignment {
  /// Where stories for this assignment are submitted.
  pub fn submit_url(&self) -> String {
    format!("/api/v1/assignments/{}/story", self.id)
  }
}

/// An image that can be reused across assignments.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Picture {
  pub id: PictureId,
  /// Path relative to the media root, e.g. `assignment_images/cat.jpg`.
  pub image: String,
}

impl Picture {
  pub fn url(&self, media_url: &str) -> String {
    format!("{}{}", media_url, self.image.trim_start_matches('/'))
  }
}

/// Per-assignment metadata about a picture.
///
/// For one assignment the story may need the name of the animal shown; another
/// assignment can ask for something the animal eats instead.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AssignmentPicture {
  pub id: AssignmentPictureId,
  pub assignment: AssignmentId,
  pub picture: PictureId,
  /// Comma-delimited list of acceptable keywords.
  pub keywords: String,
}

impl AssignmentPicture {
  /// Each comma-separated keyword with surrounding whitespace removed.
  pub fn keywords(&self) -> impl Iterator<Item = &str> {
    self.keywords.split(',').map(str::trim)
  }
}

/// A submitted story. `assignment` duplicates the assignment of `assignment_picture`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Story {
  pub id: Uuid,
  pub assignment: AssignmentId,
  pub assignment_picture: AssignmentPictureId,
  pub content: String,
  pub author: String,
}

impl Story {
  pub fn url(&self) -> String {
    format!("/api/v1/stories/{}", self.id)
  }
}
