//! Public HTTP request/response structs (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{AssignmentId, AssignmentPictureId};
use crate::validation::FieldErrors;

/// Picture selection as sent by a client: a JSON number or a JSON string holding the id.
/// Anything else is kept so it can be reported as an invalid selection.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum PictureSelection {
  Id(AssignmentPictureId),
  Raw(String),
  Other(serde_json::Value),
}

impl PictureSelection {
  /// The selected id, if the raw value is a usable identifier at all.
  pub fn id(&self) -> Option<AssignmentPictureId> {
    match self {
      PictureSelection::Id(id) => Some(*id),
      PictureSelection::Raw(s) => s.trim().parse().ok(),
      PictureSelection::Other(_) => None,
    }
  }
}

/// Story text as sent by a client. A value of any other JSON type is kept
/// so it can be reported as missing content instead of failing the whole body.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum StoryContent {
  Text(String),
  Other(serde_json::Value),
}

impl StoryContent {
  pub fn text(&self) -> Option<&str> {
    match self {
      StoryContent::Text(s) => Some(s.as_str()),
      StoryContent::Other(_) => None,
    }
  }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct StoryIn {
  #[serde(default)]
  pub content: Option<StoryContent>,
  #[serde(default)]
  pub picture_selection: Option<PictureSelection>,
}

#[derive(Debug, Serialize)]
pub struct PictureChoiceOut {
  pub id: AssignmentPictureId,
  pub image_url: String,
}

/// What the submit page needs: assignment text, bounds and the selectable pictures.
#[derive(Debug, Serialize)]
pub struct AssignmentOut {
  pub id: AssignmentId,
  pub name: String,
  pub help: String,
  pub story_min_length: usize,
  pub story_max_length: usize,
  pub submit_url: String,
  pub choices: Vec<PictureChoiceOut>,
}

#[derive(Debug, Serialize)]
pub struct StoryOut {
  pub id: Uuid,
  pub url: String,
  pub assignment: AssignmentId,
  pub assignment_name: String,
  pub assignment_picture: AssignmentPictureId,
  pub image_url: String,
  pub content: String,
  pub author: String,
}

/// Rejected submission: errors per field plus the input so the client can redisplay it.
#[derive(Debug, Serialize)]
pub struct InvalidStoryOut {
  pub errors: FieldErrors,
  pub content: Option<StoryContent>,
  pub picture_selection: Option<PictureSelection>,
}

#[derive(Serialize)]
pub struct HealthOut {
  pub ok: bool,
}
