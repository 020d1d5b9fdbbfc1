//! Server settings from the environment, and the picture catalog from TOML.
//!
//! See `Catalog` for the expected TOML schema.

use std::net::SocketAddr;

use serde::Deserialize;
use tracing::{error, info};

use crate::domain::{Assignment, AssignmentPicture, Picture};

/// Environment-driven settings.
#[derive(Clone, Debug)]
pub struct ServerConfig {
  pub port: u16,
  pub catalog_path: Option<String>,
  pub static_dir: String,
  pub media_dir: String,
  pub media_url: String,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      port: 3000,
      catalog_path: None,
      static_dir: "./static".into(),
      media_dir: "./media".into(),
      media_url: "/media/".into(),
    }
  }
}

impl ServerConfig {
  /// PORT, CATALOG_PATH, STATIC_DIR, MEDIA_DIR and MEDIA_URL; unset or unparsable values keep defaults.
  pub fn from_env() -> Self {
    let defaults = Self::default();
    let var = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());

    let mut media_url = var("MEDIA_URL").unwrap_or(defaults.media_url);
    if !media_url.ends_with('/') {
      media_url.push('/');
    }

    Self {
      port: var("PORT").and_then(|p| p.parse::<u16>().ok()).unwrap_or(defaults.port),
      catalog_path: var("CATALOG_PATH"),
      static_dir: var("STATIC_DIR").unwrap_or(defaults.static_dir),
      media_dir: var("MEDIA_DIR").unwrap_or(defaults.media_dir),
      media_url,
    }
  }

  pub fn addr(&self) -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], self.port))
  }
}

/// Administrator-managed content:
///
/// ```toml
/// [[pictures]]
/// id = 1
/// image = "assignment_images/cat.jpg"
///
/// [[assignments]]
/// id = 1
/// name = "Animals"
/// help = "Write about the animal in the picture."
/// story_min_length = 50
/// story_max_length = 500
///
/// [[assignment_pictures]]
/// id = 1
/// assignment = 1
/// picture = 1
/// keywords = "cat, kitten"
/// ```
#[derive(Clone, Debug, Deserialize, Default)]
pub struct Catalog {
  #[serde(default)]
  pub assignments: Vec<Assignment>,
  #[serde(default)]
  pub pictures: Vec<Picture>,
  #[serde(default)]
  pub assignment_pictures: Vec<AssignmentPicture>,
}

/// Load the catalog from `path`. On any IO/parse error, logs and returns None.
pub fn load_catalog(path: &str) -> Option<Catalog> {
  match std::fs::read_to_string(path) {
    Ok(s) => match toml::from_str::<Catalog>(&s) {
      Ok(cfg) => {
        info!(target: "captioner_backend", %path, "Loaded catalog (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "captioner_backend", %path, error = %e, "Failed to parse TOML catalog");
        None
      }
    },
    Err(e) => {
      error!(target: "captioner_backend", %path, error = %e, "Failed to read TOML catalog file");
      None
    }
  }
}
