pub mod admin;
pub mod catalog;
pub mod error;
pub mod quiz;

use axum::{
  routing::{get, post},
  Router,
};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub use error::ApiError;

/// JSON API for learners and admins
pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/api/catalog", get(catalog::catalog))
    .route("/api/lists/{id}", get(catalog::list_detail))
    .route("/api/users/{user_id}/attempts", get(catalog::user_attempts))
    .route("/api/quizzes", post(quiz::start_quiz))
    .route("/api/quizzes/{session_id}", get(quiz::quiz_progress))
    .route("/api/quizzes/{session_id}/answer", post(quiz::submit_answer))
    .route("/api/quizzes/{session_id}/results", get(quiz::quiz_results))
    .route("/api/admin/lists", get(admin::list_lists).post(admin::create_list))
    .route("/api/admin/lists/{id}", axum::routing::delete(admin::delete_list))
    .route("/api/admin/lists/{id}/publish", post(admin::publish_list))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

#[cfg(test)]
mod tests {
  use super::*;
  use axum::http::StatusCode;
  use axum_test::TestServer;
  use serde_json::{json, Value};
  use std::path::PathBuf;

  use crate::config::Settings;
  use crate::db;
  use crate::quiz::DistractorFallback;
  use crate::testing::{sample_list, TestEnv};

  const TOKEN: &str = "s3cret";

  fn server(env: &TestEnv, admin_token: Option<&str>) -> TestServer {
    let settings = Settings {
      database_path: PathBuf::from("unused.db"),
      port: 0,
      admin_token: admin_token.map(|t| t.to_string()),
      distractor_fallback: DistractorFallback::Pad,
    };
    TestServer::new(router(AppState::new(env.pool.clone(), &settings))).unwrap()
  }

  fn create_list(env: &TestEnv, published: bool) -> i64 {
    let conn = env.conn();
    db::create_vocabulary_list(&conn, &sample_list("Attack on Titan", 1, 1, published)).unwrap()
  }

  #[tokio::test]
  async fn test_full_quiz_flow() {
    let env = TestEnv::new().unwrap();
    let list_id = create_list(&env, true);
    let server = server(&env, None);

    let started = server
      .post("/api/quizzes")
      .json(&json!({ "listId": list_id, "type": "reading-from-word", "count": 3, "userId": "user-1" }))
      .await;
    assert_eq!(started.status_code(), StatusCode::CREATED);
    let started: Value = started.json();
    assert_eq!(started["totalQuestions"], 3);
    assert_eq!(started["type"], "reading-from-word");
    assert!(started["question"].get("correctAnswerText").is_none());
    let session_id = started["sessionId"].as_str().unwrap().to_string();

    // Results are not available mid-quiz
    let early = server.get(&format!("/api/quizzes/{}/results", session_id)).await;
    assert_eq!(early.status_code(), StatusCode::CONFLICT);

    let mut correct = 0;
    let mut question = started["question"].clone();
    for i in 0..3 {
      assert_eq!(question["position"], i);
      assert_eq!(question["options"].as_array().unwrap().len(), 4);
      let pick = question["options"][0].as_str().unwrap().to_string();

      let feedback: Value = server
        .post(&format!("/api/quizzes/{}/answer", session_id))
        .json(&json!({ "answer": pick }))
        .await
        .json();
      assert_eq!(feedback["selectedAnswerText"], pick.as_str());
      if feedback["isCorrect"] == true {
        correct += 1;
      }
      assert_eq!(feedback["finished"], i == 2);
      question = feedback["nextQuestion"].clone();
    }
    assert!(question.is_null());

    let results = server.get(&format!("/api/quizzes/{}/results", session_id)).await;
    assert_eq!(results.status_code(), StatusCode::OK);
    let results: Value = results.json();
    assert_eq!(results["score"]["total"], 3);
    assert_eq!(results["score"]["correct"], correct);
    assert_eq!(results["answers"].as_array().unwrap().len(), 3);
    assert_eq!(
      results["incorrectAnswers"].as_array().unwrap().len(),
      3 - correct as usize
    );

    // The session is consumed by the results view
    let gone = server.get(&format!("/api/quizzes/{}", session_id)).await;
    assert_eq!(gone.status_code(), StatusCode::NOT_FOUND);

    let attempts: Value = server.get("/api/users/user-1/attempts").await.json();
    assert_eq!(attempts.as_array().unwrap().len(), 1);
    assert_eq!(attempts[0]["correctAnswers"], correct);
    assert_eq!(attempts[0]["totalQuestions"], 3);
    assert_eq!(attempts[0]["quizType"], "reading-from-word");
  }

  #[tokio::test]
  async fn test_answer_must_be_an_option() {
    let env = TestEnv::new().unwrap();
    let list_id = create_list(&env, true);
    let server = server(&env, None);

    let started: Value = server
      .post("/api/quizzes")
      .json(&json!({ "listId": list_id }))
      .await
      .json();
    // Omitted type and count fall back to the defaults, capped at the list size
    assert_eq!(started["type"], "meaning-from-word-reading");
    assert_eq!(started["totalQuestions"], 4);
    let session_id = started["sessionId"].as_str().unwrap();

    let response = server
      .post(&format!("/api/quizzes/{}/answer", session_id))
      .json(&json!({ "answer": "not offered" }))
      .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let progress: Value = server.get(&format!("/api/quizzes/{}", session_id)).await.json();
    assert_eq!(progress["answered"], 0);
    assert_eq!(progress["finished"], false);
  }

  #[tokio::test]
  async fn test_start_quiz_rejections() {
    let env = TestEnv::new().unwrap();
    let published = create_list(&env, true);
    let hidden = create_list(&env, false);
    let server = server(&env, None);

    let missing = server.post("/api/quizzes").json(&json!({ "listId": 999 })).await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);

    let unpublished = server.post("/api/quizzes").json(&json!({ "listId": hidden })).await;
    assert_eq!(unpublished.status_code(), StatusCode::NOT_FOUND);

    let zero = server
      .post("/api/quizzes")
      .json(&json!({ "listId": published, "count": 0 }))
      .await;
    assert_eq!(zero.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = zero.json();
    assert!(body["error"].is_string());

    let unknown = server.get("/api/quizzes/doesnotexist").await;
    assert_eq!(unknown.status_code(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn test_unknown_quiz_type_uses_default() {
    let env = TestEnv::new().unwrap();
    let list_id = create_list(&env, true);
    let server = server(&env, None);

    for mode in [json!(5), json!(null), json!("reading-from-meaning")] {
      let started = server
        .post("/api/quizzes")
        .json(&json!({ "listId": list_id, "type": mode }))
        .await;
      assert_eq!(started.status_code(), StatusCode::CREATED);
      let started: Value = started.json();
      assert_eq!(started["type"], "meaning-from-word-reading");
    }
  }

  #[tokio::test]
  async fn test_attempt_saved_when_list_deleted_mid_quiz() {
    let env = TestEnv::new().unwrap();
    let list_id = create_list(&env, true);
    let server = server(&env, Some(TOKEN));

    let started: Value = server
      .post("/api/quizzes")
      .json(&json!({ "listId": list_id, "count": 1, "userId": "user-1" }))
      .await
      .json();
    let session_id = started["sessionId"].as_str().unwrap().to_string();

    let deleted = server
      .delete(&format!("/api/admin/lists/{}", list_id))
      .authorization_bearer(TOKEN)
      .await;
    assert_eq!(deleted.status_code(), StatusCode::NO_CONTENT);

    let pick = started["question"]["options"][0].as_str().unwrap().to_string();
    let answered = server
      .post(&format!("/api/quizzes/{}/answer", session_id))
      .json(&json!({ "answer": pick }))
      .await;
    assert_eq!(answered.status_code(), StatusCode::OK);
    let answered: Value = answered.json();
    assert_eq!(answered["finished"], true);

    let attempts: Value = server.get("/api/users/user-1/attempts").await.json();
    assert_eq!(attempts.as_array().unwrap().len(), 1);
    assert!(attempts[0]["vocabularyListId"].is_null());
    assert_eq!(attempts[0]["totalQuestions"], 1);

    let results = server.get(&format!("/api/quizzes/{}/results", session_id)).await;
    assert_eq!(results.status_code(), StatusCode::OK);
  }

  #[tokio::test]
  async fn test_catalog_and_list_detail() {
    let env = TestEnv::new().unwrap();
    let list_id = create_list(&env, true);
    let hidden = create_list(&env, false);
    let server = server(&env, None);

    let catalog: Value = server.get("/api/catalog").await.json();
    assert_eq!(catalog[0]["name"], "Attack on Titan");
    let lists = catalog[0]["seasons"][0]["episodes"][0]["vocabularyLists"]
      .as_array()
      .unwrap();
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0]["id"], list_id);

    let detail: Value = server.get(&format!("/api/lists/{}", list_id)).await.json();
    assert_eq!(detail["wordCount"], 4);
    assert_eq!(detail["words"][0]["word"], "進撃");
    assert_eq!(detail["questionCountOptions"], json!([4]));
    assert_eq!(detail["defaultQuestionCount"], 4);

    let hidden = server.get(&format!("/api/lists/{}", hidden)).await;
    assert_eq!(hidden.status_code(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn test_admin_requires_token() {
    let env = TestEnv::new().unwrap();
    let server = server(&env, Some(TOKEN));

    let anonymous = server.get("/api/admin/lists").await;
    assert_eq!(anonymous.status_code(), StatusCode::UNAUTHORIZED);

    let wrong = server.get("/api/admin/lists").authorization_bearer("nope").await;
    assert_eq!(wrong.status_code(), StatusCode::UNAUTHORIZED);

    let ok = server.get("/api/admin/lists").authorization_bearer(TOKEN).await;
    assert_eq!(ok.status_code(), StatusCode::OK);
  }

  #[tokio::test]
  async fn test_admin_disabled_without_token() {
    let env = TestEnv::new().unwrap();
    let server = server(&env, None);

    let response = server.get("/api/admin/lists").authorization_bearer(TOKEN).await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
  }

  #[tokio::test]
  async fn test_admin_list_lifecycle() {
    let env = TestEnv::new().unwrap();
    let server = server(&env, Some(TOKEN));

    let created = server
      .post("/api/admin/lists")
      .authorization_bearer(TOKEN)
      .json(&json!({
        "animeName": "  Frieren ",
        "seasonNumber": 1,
        "episodeNumber": 2,
        "rows": [
          { "word": "魔法", "reading": "まほう", "meaning": "magic" },
          { "word": "旅", "reading": "たび", "meaning": "journey" }
        ]
      }))
      .await;
    assert_eq!(created.status_code(), StatusCode::CREATED);
    let created: Value = created.json();
    assert_eq!(created["wordCount"], 2);
    let id = created["id"].as_i64().unwrap();

    // Unpublished lists are invisible to learners
    let hidden = server.get(&format!("/api/lists/{}", id)).await;
    assert_eq!(hidden.status_code(), StatusCode::NOT_FOUND);

    let published: Value = server
      .post(&format!("/api/admin/lists/{}/publish", id))
      .authorization_bearer(TOKEN)
      .json(&json!({ "isPublished": true }))
      .await
      .json();
    assert_eq!(published["isPublished"], true);

    let detail: Value = server.get(&format!("/api/lists/{}", id)).await.json();
    assert_eq!(detail["wordCount"], 2);

    let lists: Value = server
      .get("/api/admin/lists")
      .authorization_bearer(TOKEN)
      .await
      .json();
    assert_eq!(lists[0]["animeName"], "Frieren");
    assert_eq!(lists[0]["csvFilename"], "manual-entry");

    let deleted = server
      .delete(&format!("/api/admin/lists/{}", id))
      .authorization_bearer(TOKEN)
      .await;
    assert_eq!(deleted.status_code(), StatusCode::NO_CONTENT);

    let again = server
      .delete(&format!("/api/admin/lists/{}", id))
      .authorization_bearer(TOKEN)
      .await;
    assert_eq!(again.status_code(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn test_admin_create_validates_rows() {
    let env = TestEnv::new().unwrap();
    let server = server(&env, Some(TOKEN));

    let response = server
      .post("/api/admin/lists")
      .authorization_bearer(TOKEN)
      .json(&json!({
        "animeName": "Frieren",
        "seasonNumber": 1,
        "episodeNumber": 1,
        "rows": [
          { "word": "魔法", "reading": "まほう", "meaning": "magic" },
          { "word": "旅", "reading": "  ", "meaning": "journey" }
        ]
      }))
      .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().starts_with("Row 2"));
  }
}
