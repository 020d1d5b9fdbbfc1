//! HTTP endpoint handlers. These are thin wrappers around the form pipeline and the store.
//! Each handler is instrumented and logs parameters and basic result info.

use std::sync::Arc;

use axum::{
  extract::{Path, State},
  http::{header, StatusCode},
  response::IntoResponse,
  Json,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::AssignmentId;
use crate::error::AppError;
use crate::protocol::*;
use crate::routes::auth::AuthenticatedUser;
use crate::state::{AppState, NewStory};
use crate::util::trunc_for_log;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state, user), fields(user = %user.0))]
pub async fn http_get_assignment(
  State(state): State<Arc<AppState>>,
  Path(assignment_id): Path<AssignmentId>,
  user: AuthenticatedUser,
) -> Result<Json<AssignmentOut>, AppError> {
  let form = state.story_form(assignment_id).ok_or(AppError::NotFound)?;
  Ok(Json(form.to_out()))
}

#[instrument(level = "info", skip(state, user, body), fields(user = %user.0, content_len = body.content.as_ref().and_then(|c| c.text()).map_or(0, str::len)))]
pub async fn http_post_story(
  State(state): State<Arc<AppState>>,
  Path(assignment_id): Path<AssignmentId>,
  user: AuthenticatedUser,
  Json(body): Json<StoryIn>,
) -> Result<impl IntoResponse, AppError> {
  let form = state.story_form(assignment_id).ok_or(AppError::NotFound)?;

  let cleaned = match form.validate(&body) {
    Ok(c) => c,
    Err(errors) => {
      info!(target: "story", assignment = assignment_id, ?errors, "Story rejected");
      return Err(AppError::InvalidStory(Box::new(InvalidStoryOut {
        errors,
        content: body.content,
        picture_selection: body.picture_selection,
      })));
    }
  };

  let story = state
    .insert_story(NewStory {
      assignment: form.assignment().id,
      assignment_picture: cleaned.assignment_picture,
      content: cleaned.content,
      author: user.0,
    })
    .await?;
  info!(target: "story", id = %story.id, assignment = story.assignment, assignment_picture = story.assignment_picture, preview = %trunc_for_log(&story.content, 40), "Story stored");

  Ok((StatusCode::CREATED, [(header::LOCATION, story.url())], Json(state.story_out(&story))))
}

#[instrument(level = "info", skip(state, user), fields(user = %user.0))]
pub async fn http_get_story(
  State(state): State<Arc<AppState>>,
  Path(story_id): Path<String>,
  user: AuthenticatedUser,
) -> Result<Json<StoryOut>, AppError> {
  let id = Uuid::parse_str(&story_id).map_err(|_| AppError::NotFound)?;
  let story = state.get_story(id).await.ok_or(AppError::NotFound)?;
  Ok(Json(state.story_out(&story)))
}

#[cfg(test)]
mod tests {
  use super::*;
  use axum::response::Response;

  use crate::seeds::seed_catalog;
  use crate::validation::{FIELD_CONTENT, FIELD_PICTURE};

  fn state() -> Arc<AppState> {
    Arc::new(AppState::from_catalog(seed_catalog(), "/media/"))
  }

  fn user() -> AuthenticatedUser {
    AuthenticatedUser("test_user".into())
  }

  fn body(content: &str, selection: serde_json::Value) -> StoryIn {
    serde_json::from_value(serde_json::json!({ "content": content, "picture_selection": selection })).expect("body")
  }

  async fn post(st: &Arc<AppState>, assignment: u64, input: StoryIn) -> Response {
    match http_post_story(State(st.clone()), Path(assignment), user(), Json(input)).await {
      Ok(r) => r.into_response(),
      Err(e) => e.into_response(),
    }
  }

  const GOOD_OWL: &str = "At night the owl sat on a branch and watched the quiet garden below.";

  #[tokio::test]
  async fn valid_story_is_created_and_viewable() {
    let st = state();
    let resp = post(&st, 2, body(&format!("  {GOOD_OWL}  "), serde_json::json!(4))).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let location = resp.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()).expect("location").to_string();

    let stored: Vec<_> = st.stories.read().await.values().cloned().collect();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].content, GOOD_OWL);
    assert_eq!(stored[0].author, "test_user");
    assert_eq!(stored[0].assignment, 2);
    assert_eq!(location, stored[0].url());

    let Json(out) = http_get_story(State(st.clone()), Path(stored[0].id.to_string()), user()).await.expect("story");
    assert_eq!(out.content, GOOD_OWL);
    assert_eq!(out.image_url, "/media/assignment_images/owl.jpg");
  }

  #[tokio::test]
  async fn invalid_story_is_not_stored() {
    let st = state();
    let resp = post(&st, 2, body("The fox hid under a tree during the dark night.", serde_json::json!("1"))).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(st.stories.read().await.is_empty());
  }

  #[tokio::test]
  async fn rejection_carries_field_errors_and_input() {
    let st = state();
    let form = st.story_form(1).expect("form");
    let input = body("A tiny tale.", serde_json::json!(1));
    let errors = form.validate(&input).unwrap_err();
    assert_eq!(
      errors.get(FIELD_CONTENT),
      Some(&["Your story must be at least 50 characters long.".to_string()][..])
    );
    assert!(errors.get(FIELD_PICTURE).is_none());

    match http_post_story(State(st.clone()), Path(1), user(), Json(input)).await {
      Err(AppError::InvalidStory(out)) => {
        assert_eq!(out.content.as_ref().and_then(|c| c.text()), Some("A tiny tale."));
        assert_eq!(out.errors, errors);
      }
      _ => panic!("expected invalid story"),
    }
  }

  #[tokio::test]
  async fn non_string_content_gets_field_errors() {
    use axum::{body::Body, extract::FromRequest, http::Request};

    let req = Request::builder()
      .method("POST")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(r#"{"content": 42, "picture_selection": 4}"#))
      .expect("request");
    let json = Json::<StoryIn>::from_request(req, &()).await.expect("body accepted");

    let st = state();
    match http_post_story(State(st.clone()), Path(2), user(), json).await {
      Err(AppError::InvalidStory(out)) => {
        assert_eq!(out.errors.get(FIELD_CONTENT), Some(&["This field is required.".to_string()][..]));
        assert!(out.errors.get(FIELD_PICTURE).is_none());
        assert_eq!(out.content, Some(StoryContent::Other(serde_json::json!(42))));
      }
      _ => panic!("expected invalid story"),
    }
    assert!(st.stories.read().await.is_empty());
  }

  #[tokio::test]
  async fn unknown_assignment_is_not_found() {
    let st = state();
    let resp = post(&st, 99, body(GOOD_OWL, serde_json::json!(4))).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(matches!(
      http_get_assignment(State(st), Path(99), user()).await,
      Err(AppError::NotFound)
    ));
  }

  #[tokio::test]
  async fn assignment_page_lists_scoped_choices() {
    let Json(out) = http_get_assignment(State(state()), Path(2), user()).await.expect("assignment");
    assert_eq!(out.name, "Night animals");
    assert_eq!(out.choices.len(), 1);
    assert_eq!(out.choices[0].id, 4);
  }

  #[tokio::test]
  async fn malformed_or_unknown_story_id_is_not_found() {
    let st = state();
    assert!(matches!(
      http_get_story(State(st.clone()), Path("not-a-uuid".into()), user()).await,
      Err(AppError::NotFound)
    ));
    assert!(matches!(
      http_get_story(State(st), Path(Uuid::new_v4().to_string()), user()).await,
      Err(AppError::NotFound)
    ));
  }
}
