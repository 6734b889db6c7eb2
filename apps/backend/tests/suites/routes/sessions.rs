use actix_web::http::StatusCode;
use actix_web::test;
use backend::routes::sessions::{HintResponse, SessionResponse};
use backend::Slot;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use serde_json::json;

use crate::common::test_state;
use crate::support::create_test_app;

fn post(uri: &str, user: &str) -> test::TestRequest {
    test::TestRequest::post().uri(uri).insert_header(("x-user", user))
}

#[actix_web::test]
async fn create_seats_the_caller_in_slot_a() {
    let (state, _) = test_state();
    let app = create_test_app(state).await;

    let resp = test::call_service(
        &app,
        post("/api/sessions", "alice").set_json(json!({})).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cookies: Vec<(String, String)> = resp
        .response()
        .cookies()
        .map(|c| (c.name().to_string(), c.value().to_string()))
        .collect();
    let body: SessionResponse = test::read_body_json(resp).await;

    assert_eq!(body.role, Slot::A);
    assert_eq!(body.state.display_word, "_ _ _ _ _");
    assert_eq!(body.state.remaining, 7);
    assert_eq!(body.state.phase, "awaiting_opponent");
    assert_eq!(body.state.player_a, "alice");
    assert!(body.state.player_b.is_none());
    assert!(!body.state.is_your_turn);
    assert!(body.state.word.is_none());

    assert!(cookies.contains(&("session_id".to_string(), body.session_id.to_string())));
    assert!(cookies.contains(&("role".to_string(), "A".to_string())));
}

#[actix_web::test]
async fn create_without_body_and_with_non_positive_sizes_uses_defaults() {
    let (state, _) = test_state();
    let app = create_test_app(state).await;

    let resp = test::call_service(&app, post("/api/sessions", "alice").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: SessionResponse = test::read_body_json(resp).await;
    assert_eq!(body.state.remaining, 7);

    let resp = test::call_service(
        &app,
        post("/api/sessions", "alice")
            .set_json(json!({ "word_length": 0, "max_incorrect": -3 }))
            .to_request(),
    )
    .await;
    let body: SessionResponse = test::read_body_json(resp).await;
    assert_eq!(body.state.remaining, 7);

    let resp = test::call_service(
        &app,
        post("/api/sessions", "alice")
            .set_json(json!({ "max_incorrect": 3 }))
            .to_request(),
    )
    .await;
    let body: SessionResponse = test::read_body_json(resp).await;
    assert_eq!(body.state.remaining, 3);
}

#[actix_web::test]
async fn create_requires_an_identity() {
    let (state, _) = test_state();
    let app = create_test_app(state).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post().uri("/api/sessions").to_request(),
    )
    .await;
    assert_problem_details_from_service_response(
        resp,
        "UNAUTHORIZED",
        StatusCode::UNAUTHORIZED,
        None,
    )
    .await;
}

#[actix_web::test]
async fn create_against_the_computer_starts_immediately() {
    let (state, _) = test_state();
    let app = create_test_app(state).await;

    let resp = test::call_service(&app, post("/api/sessions/ai", "alice").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: SessionResponse = test::read_body_json(resp).await;

    assert_eq!(body.role, Slot::A);
    assert_eq!(body.state.phase, "in_progress");
    assert_eq!(body.state.player_b.as_deref(), Some("Computer"));
    assert!(body.state.is_your_turn);
}

#[actix_web::test]
async fn join_seats_the_second_participant() {
    let (state, _) = test_state();
    let app = create_test_app(state).await;

    let created: SessionResponse = test::call_and_read_body_json(
        &app,
        post("/api/sessions", "alice").to_request(),
    )
    .await;

    let uri = format!("/api/sessions/{}/join", created.session_id);
    let resp = test::call_service(&app, post(&uri, "bob").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let joined: SessionResponse = test::read_body_json(resp).await;

    assert_eq!(joined.session_id, created.session_id);
    assert_eq!(joined.role, Slot::B);
    assert_eq!(joined.state.phase, "in_progress");
    assert_eq!(joined.state.player_b.as_deref(), Some("bob"));
    assert!(!joined.state.is_your_turn);
}

#[actix_web::test]
async fn join_conflicts_are_reported() {
    let (state, _) = test_state();
    let app = create_test_app(state).await;

    let created: SessionResponse = test::call_and_read_body_json(
        &app,
        post("/api/sessions", "alice").to_request(),
    )
    .await;
    let uri = format!("/api/sessions/{}/join", created.session_id);

    let resp = test::call_service(&app, post(&uri, "alice").to_request()).await;
    assert_problem_details_from_service_response(
        resp,
        "ALREADY_PARTICIPANT",
        StatusCode::CONFLICT,
        None,
    )
    .await;

    let resp = test::call_service(&app, post(&uri, "bob").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(&app, post(&uri, "carol").to_request()).await;
    assert_problem_details_from_service_response(
        resp,
        "SESSION_FULL",
        StatusCode::CONFLICT,
        None,
    )
    .await;
}

#[actix_web::test]
async fn unknown_and_malformed_session_ids() {
    let (state, _) = test_state();
    let app = create_test_app(state).await;

    let resp = test::call_service(&app, post("/api/sessions/zzzz/join", "bob").to_request()).await;
    assert_problem_details_from_service_response(
        resp,
        "SESSION_NOT_FOUND",
        StatusCode::NOT_FOUND,
        Some("zzzz"),
    )
    .await;

    let resp = test::call_service(&app, post("/api/sessions/AB12/join", "bob").to_request()).await;
    assert_problem_details_from_service_response(
        resp,
        "INVALID_SESSION_ID",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;
}

#[actix_web::test]
async fn state_is_visible_to_participants_only() {
    let (state, _) = test_state();
    let app = create_test_app(state).await;

    let created: SessionResponse = test::call_and_read_body_json(
        &app,
        post("/api/sessions/ai", "alice").to_request(),
    )
    .await;
    let uri = format!("/api/sessions/{}", created.session_id);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&uri)
            .insert_header(("x-user", "alice"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&uri)
            .insert_header(("x-user", "mallory"))
            .to_request(),
    )
    .await;
    assert_problem_details_from_service_response(
        resp,
        "NOT_A_PARTICIPANT",
        StatusCode::FORBIDDEN,
        None,
    )
    .await;
}

#[actix_web::test]
async fn hint_is_cached_and_private_to_participants() {
    let (state, _) = test_state();
    let app = create_test_app(state).await;

    let created: SessionResponse = test::call_and_read_body_json(
        &app,
        post("/api/sessions/ai", "alice").to_request(),
    )
    .await;
    let uri = format!("/api/sessions/{}/hint", created.session_id);

    let first: HintResponse =
        test::call_and_read_body_json(&app, post(&uri, "alice").to_request()).await;
    assert!(first.hint.starts_with("Try the letter '"));
    let letter = first.hint.chars().nth(16).expect("hint letter");
    assert!("aple".contains(letter), "hint {letter} not in the word");

    let second: HintResponse =
        test::call_and_read_body_json(&app, post(&uri, "alice").to_request()).await;
    assert_eq!(first.hint, second.hint);

    let resp = test::call_service(&app, post(&uri, "mallory").to_request()).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}
