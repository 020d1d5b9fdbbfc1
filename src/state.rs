//! Application state: the administrator-managed catalog and the story store.
//!
//! The catalog (assignments, pictures, assignment pictures) is loaded once at startup,
//! from CATALOG_PATH when set and from the built-in seeds otherwise. Stories live in an
//! in-memory store behind a RwLock.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::config::{load_catalog, Catalog, ServerConfig};
use crate::domain::{Assignment, AssignmentId, AssignmentPicture, AssignmentPictureId, Picture, PictureId, Story};
use crate::error::StoreError;
use crate::form::{PictureChoice, StoryForm};
use crate::protocol::StoryOut;
use crate::seeds::seed_catalog;

/// A story about to be stored. Author and assignment come from the request, not the form.
#[derive(Clone, Debug)]
pub struct NewStory {
  pub assignment: AssignmentId,
  pub assignment_picture: AssignmentPictureId,
  pub content: String,
  pub author: String,
}

#[derive(Clone)]
pub struct AppState {
  pub assignments: Arc<HashMap<AssignmentId, Assignment>>,
  pub pictures: Arc<HashMap<PictureId, Picture>>,
  pub assignment_pictures: Arc<HashMap<AssignmentPictureId, AssignmentPicture>>,
  pub stories: Arc<RwLock<HashMap<Uuid, Story>>>,
  pub media_url: String,
}

impl AppState {
  /// Build state from config: load the TOML catalog or fall back to seeds.
  #[instrument(level = "info", skip_all)]
  pub fn new(cfg: &ServerConfig) -> Self {
    let catalog = match cfg.catalog_path.as_deref().and_then(load_catalog) {
      Some(c) => c,
      None => {
        if cfg.catalog_path.is_some() {
          warn!(target: "captioner_backend", "Catalog unavailable; using built-in seeds");
        } else {
          info!(target: "captioner_backend", "CATALOG_PATH not set; using built-in seeds");
        }
        seed_catalog()
      }
    };
    Self::from_catalog(catalog, &cfg.media_url)
  }

  /// Index a catalog, dropping links that point at unknown assignments or pictures.
  pub fn from_catalog(catalog: Catalog, media_url: &str) -> Self {
    let mut assignments = HashMap::new();
    for a in catalog.assignments {
      if a.story_min_length > a.story_max_length {
        warn!(target: "captioner_backend", id = a.id, min = a.story_min_length, max = a.story_max_length, "Assignment length bounds are inverted; every story will be rejected");
      }
      assignments.insert(a.id, a);
    }

    let pictures: HashMap<_, _> = catalog.pictures.into_iter().map(|p| (p.id, p)).collect();

    let mut assignment_pictures = HashMap::new();
    for ap in catalog.assignment_pictures {
      if !assignments.contains_key(&ap.assignment) || !pictures.contains_key(&ap.picture) {
        error!(target: "captioner_backend", id = ap.id, assignment = ap.assignment, picture = ap.picture, "Skipping assignment picture: unknown assignment or picture");
        continue;
      }
      assignment_pictures.insert(ap.id, ap);
    }

    for a in assignments.values() {
      let offered = assignment_pictures.values().filter(|ap| ap.assignment == a.id).count();
      info!(target: "captioner_backend", id = a.id, name = %a.name, pictures = offered, "Startup assignment inventory");
    }

    Self {
      assignments: Arc::new(assignments),
      pictures: Arc::new(pictures),
      assignment_pictures: Arc::new(assignment_pictures),
      stories: Arc::new(RwLock::new(HashMap::new())),
      media_url: media_url.to_string(),
    }
  }

  pub fn get_assignment(&self, id: AssignmentId) -> Option<&Assignment> {
    self.assignments.get(&id)
  }

  fn image_url(&self, ap: &AssignmentPicture) -> String {
    self
      .pictures
      .get(&ap.picture)
      .map(|p| p.url(&self.media_url))
      .unwrap_or_default()
  }

  /// Form for one assignment, offering exactly the pictures linked to it (ordered by id).
  #[instrument(level = "debug", skip(self))]
  pub fn story_form(&self, assignment_id: AssignmentId) -> Option<StoryForm> {
    let assignment = self.get_assignment(assignment_id)?.clone();
    let mut choices: Vec<PictureChoice> = self
      .assignment_pictures
      .values()
      .filter(|ap| ap.assignment == assignment_id)
      .map(|ap| PictureChoice { assignment_picture: ap.clone(), image_url: self.image_url(ap) })
      .collect();
    choices.sort_by_key(|c| c.assignment_picture.id);
    Some(StoryForm::new(assignment, choices))
  }

  /// Store a story after checking the associations a database would enforce.
  #[instrument(level = "debug", skip(self, new), fields(assignment = new.assignment, assignment_picture = new.assignment_picture))]
  pub async fn insert_story(&self, new: NewStory) -> Result<Story, StoreError> {
    if new.author.trim().is_empty() {
      return Err(StoreError::MissingAuthor);
    }
    if !self.assignments.contains_key(&new.assignment) {
      return Err(StoreError::UnknownAssignment(new.assignment));
    }
    match self.assignment_pictures.get(&new.assignment_picture) {
      Some(ap) if ap.assignment == new.assignment => {}
      _ => {
        return Err(StoreError::ForeignPicture { assignment: new.assignment, picture: new.assignment_picture });
      }
    }

    let story = Story {
      id: Uuid::new_v4(),
      assignment: new.assignment,
      assignment_picture: new.assignment_picture,
      content: new.content,
      author: new.author,
    };
    self.stories.write().await.insert(story.id, story.clone());
    Ok(story)
  }

  #[instrument(level = "debug", skip(self), fields(%id))]
  pub async fn get_story(&self, id: Uuid) -> Option<Story> {
    self.stories.read().await.get(&id).cloned()
  }

  /// Public view of a story with its assignment name and picture URL resolved.
  pub fn story_out(&self, story: &Story) -> StoryOut {
    StoryOut {
      id: story.id,
      url: story.url(),
      assignment: story.assignment,
      assignment_name: self.get_assignment(story.assignment).map(|a| a.name.clone()).unwrap_or_default(),
      assignment_picture: story.assignment_picture,
      image_url: self
        .assignment_pictures
        .get(&story.assignment_picture)
        .map(|ap| self.image_url(ap))
        .unwrap_or_default(),
      content: story.content.clone(),
      author: story.author.clone(),
    }
  }
}
