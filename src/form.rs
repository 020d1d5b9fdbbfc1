//! The story submission pipeline: raw input -> scoped picture lookup -> content checks.
//!
//! A `StoryForm` is built for one assignment with the pictures that assignment offers
//! already injected, so a selection from any other assignment is simply not found.

use crate::domain::{Assignment, AssignmentPicture, AssignmentPictureId};
use crate::protocol::{AssignmentOut, PictureChoiceOut, StoryIn};
use crate::validation::{FieldErrors, StoryError, StoryValidator};

/// One selectable picture; the image URL is its display label.
#[derive(Clone, Debug)]
pub struct PictureChoice {
  pub assignment_picture: AssignmentPicture,
  pub image_url: String,
}

/// Validated submission, ready to be stored once author and assignment are attached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CleanedStory {
  pub content: String,
  pub assignment_picture: AssignmentPictureId,
}

#[derive(Clone, Debug)]
pub struct StoryForm {
  assignment: Assignment,
  choices: Vec<PictureChoice>,
}

impl StoryForm {
  pub fn new(assignment: Assignment, choices: Vec<PictureChoice>) -> Self {
    Self { assignment, choices }
  }

  pub fn assignment(&self) -> &Assignment { &self.assignment }

  pub fn choices(&self) -> &[PictureChoice] { &self.choices }

  /// Display form of the page. Author and assignment are never offered as inputs.
  pub fn to_out(&self) -> AssignmentOut {
    AssignmentOut {
      id: self.assignment.id,
      name: self.assignment.name.clone(),
      help: self.assignment.help.clone(),
      story_min_length: self.assignment.story_min_length,
      story_max_length: self.assignment.story_max_length,
      submit_url: self.assignment.submit_url(),
      choices: self
        .choices()
        .iter()
        .map(|c| PictureChoiceOut { id: c.assignment_picture.id, image_url: c.image_url.clone() })
        .collect(),
    }
  }

  /// Checks the picture selection, then the content. Errors from both fields accumulate.
  /// Content rules need a picture, so they are skipped when the selection is unusable.
  pub fn validate(&self, input: &StoryIn) -> Result<CleanedStory, FieldErrors> {
    let mut errors = FieldErrors::default();

    let chosen = input
      .picture_selection
      .as_ref()
      .and_then(|sel| sel.id())
      .and_then(|id| self.choices.iter().find(|c| c.assignment_picture.id == id))
      .map(|c| &c.assignment_picture);
    if chosen.is_none() {
      errors.push(StoryError::MissingOrInvalidPictureSelection);
    }

    let content = match input.content.as_ref().and_then(|c| c.text()) {
      None | Some("") => {
        errors.push(StoryError::ContentRequired);
        None
      }
      Some(raw) => match chosen {
        Some(picture) => match StoryValidator::for_picture(&self.assignment, picture).validate(raw) {
          Ok(content) => Some(content),
          Err(e) => {
            errors.push(e);
            None
          }
        },
        None => None,
      },
    };

    match (chosen, content) {
      (Some(picture), Some(content)) if errors.is_empty() => {
        Ok(CleanedStory { content, assignment_picture: picture.id })
      }
      _ => Err(errors),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::protocol::{PictureSelection, StoryContent};
  use crate::validation::{FIELD_CONTENT, FIELD_PICTURE};

  const KEYWORD_MSG: &str = "You must use the name of the animal in your story.";
  const PICTURE_MSG: &str = "You must select a picture to write about.";

  fn assignment(id: u64) -> Assignment {
    Assignment { id, name: format!("Assignment {id}"), help: "Test help".into(), story_min_length: 1, story_max_length: 500 }
  }

  fn choice(id: u64, assignment: u64, keywords: &str) -> PictureChoice {
    PictureChoice {
      assignment_picture: AssignmentPicture { id, assignment, picture: id, keywords: keywords.into() },
      image_url: format!("/media/test_image_{id}.jpg"),
    }
  }

  fn form() -> StoryForm {
    StoryForm::new(assignment(1), vec![choice(1, 1, "test, testing"), choice(2, 1, "test, testing")])
  }

  fn input(content: Option<&str>, selection: Option<PictureSelection>) -> StoryIn {
    StoryIn { content: content.map(|c| StoryContent::Text(c.into())), picture_selection: selection }
  }

  #[test]
  fn missing_keyword_is_reported_on_content() {
    let errs = form()
      .validate(&input(Some("Not a very good story"), Some(PictureSelection::Id(1))))
      .unwrap_err();
    assert_eq!(errs.get(FIELD_CONTENT), Some(&[KEYWORD_MSG.to_string()][..]));
    assert!(errs.get(FIELD_PICTURE).is_none());
  }

  #[test]
  fn good_story_is_cleaned() {
    let ok = form()
      .validate(&input(Some("A good story about testing."), Some(PictureSelection::Id(2))))
      .expect("valid");
    assert_eq!(ok, CleanedStory { content: "A good story about testing.".into(), assignment_picture: 2 });
  }

  #[test]
  fn selection_from_another_assignment_is_rejected() {
    // Picture 3 belongs to assignment 2 and is not among this form's choices.
    let errs = form()
      .validate(&input(Some("A good story about testing."), Some(PictureSelection::Id(3))))
      .unwrap_err();
    assert_eq!(errs.get(FIELD_PICTURE), Some(&[PICTURE_MSG.to_string()][..]));
    assert!(errs.get(FIELD_CONTENT).is_none());
  }

  #[test]
  fn absent_or_garbled_selection_uses_the_same_message() {
    for sel in [None, Some(PictureSelection::Raw("".into())), Some(PictureSelection::Raw("first".into()))] {
      let errs = form().validate(&input(Some("Not a very good story"), sel)).unwrap_err();
      assert_eq!(errs.get(FIELD_PICTURE), Some(&[PICTURE_MSG.to_string()][..]));
      // content checks are skipped without a picture
      assert!(errs.get(FIELD_CONTENT).is_none());
    }
  }

  #[test]
  fn numeric_string_selection_is_accepted() {
    let ok = form()
      .validate(&input(Some("testing"), Some(PictureSelection::Raw("1".into()))))
      .expect("valid");
    assert_eq!(ok.assignment_picture, 1);
  }

  #[test]
  fn errors_accumulate_across_fields() {
    let errs = form().validate(&input(None, None)).unwrap_err();
    assert!(errs.get(FIELD_PICTURE).is_some());
    assert_eq!(errs.get(FIELD_CONTENT), Some(&["This field is required.".to_string()][..]));
  }

  #[test]
  fn non_text_content_is_reported_as_required() {
    let input = StoryIn {
      content: Some(StoryContent::Other(serde_json::json!(["testing"]))),
      picture_selection: Some(PictureSelection::Id(1)),
    };
    let errs = form().validate(&input).unwrap_err();
    assert_eq!(errs.get(FIELD_CONTENT), Some(&["This field is required.".to_string()][..]));
    assert!(errs.get(FIELD_PICTURE).is_none());
  }

  #[test]
  fn display_lists_only_scoped_choices() {
    let out = form().to_out();
    let urls: Vec<&str> = out.choices.iter().map(|c| c.image_url.as_str()).collect();
    assert_eq!(urls, vec!["/media/test_image_1.jpg", "/media/test_image_2.jpg"]);
    assert_eq!(out.submit_url, "/api/v1/assignments/1/story");
  }
}
