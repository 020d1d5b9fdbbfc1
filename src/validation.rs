//! Story content checks: length bounds first, then the keyword requirement of the
//! chosen picture. Pure functions over their inputs; no state is touched here.

use std::collections::BTreeMap;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::domain::{Assignment, AssignmentPicture};

pub const FIELD_CONTENT: &str = "content";
pub const FIELD_PICTURE: &str = "picture_selection";

/// Every way a submission can be rejected. `Display` is the message shown to the user.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StoryError {
  #[error("You must select a picture to write about.")]
  MissingOrInvalidPictureSelection,
  #[error("This field is required.")]
  ContentRequired,
  #[error("Your story must be at least {0} characters long.")]
  ContentTooShort(usize),
  #[error("Your story must not be longer than {0} characters.")]
  ContentTooLong(usize),
  #[error("You must use the name of the animal in your story.")]
  MissingKeyword,
}

impl StoryError {
  /// Form field the error is reported under.
  pub fn field(&self) -> &'static str {
    match self {
      StoryError::MissingOrInvalidPictureSelection => FIELD_PICTURE,
      _ => FIELD_CONTENT,
    }
  }
}

/// Field name -> ordered user-facing messages.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
  pub fn push(&mut self, err: StoryError) {
    self.0.entry(err.field().to_string()).or_default().push(err.to_string());
  }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  #[cfg(test)]
  pub fn get(&self, field: &str) -> Option<&[String]> {
    self.0.get(field).map(Vec::as_slice)
  }
}

/// Length bounds plus the OR'd keyword list for one assignment/picture pairing.
#[derive(Clone, Debug)]
pub struct StoryValidator<'a> {
  min_length: usize,
  max_length: usize,
  keywords: Vec<&'a str>,
}

impl<'a> StoryValidator<'a> {
  pub fn new(min_length: usize, max_length: usize, keywords: impl IntoIterator<Item = &'a str>) -> Self {
    Self {
      min_length,
      max_length,
      keywords: keywords.into_iter().map(str::trim).collect(),
    }
  }

  pub fn for_picture(assignment: &Assignment, picture: &'a AssignmentPicture) -> Self {
    Self::new(assignment.story_min_length, assignment.story_max_length, picture.keywords())
  }

  /// Returns the trimmed content when it passes, otherwise the first rule it breaks.
  pub fn validate(&self, content: &str) -> Result<String, StoryError> {
    let content = content.trim();
    let len = content.chars().count();

    if len < self.min_length {
      return Err(StoryError::ContentTooShort(self.min_length));
    }
    if len > self.max_length {
      return Err(StoryError::ContentTooLong(self.max_length));
    }
    if self.keywords.iter().any(|k| contains_word(content, k)) {
      return Ok(content.to_string());
    }
    Err(StoryError::MissingKeyword)
  }
}

/// Whole-word, case-sensitive search for the literal `word`.
fn contains_word(haystack: &str, word: &str) -> bool {
  let pattern = format!(r"\b{}\b", regex::escape(word));
  match Regex::new(&pattern) {
    Ok(re) => re.is_match(haystack),
    Err(e) => {
      warn!(target: "story", keyword = word, error = %e, "Keyword pattern rejected; treating as no match");
      false
    }
  }
}
