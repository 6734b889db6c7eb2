use actix_web::http::StatusCode;
use actix_web::test;
use backend::adapters::{LedgerEntry, RankedLedger};

use crate::common::test_state;
use crate::support::create_test_app;

#[actix_web::test]
async fn empty_ledger_lists_nothing() {
    let (state, _) = test_state();
    let app = create_test_app(state).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/leaderboard").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let entries: Vec<LedgerEntry> = test::read_body_json(resp).await;
    assert!(entries.is_empty());
}

#[actix_web::test]
async fn ranks_by_wins_then_best_score() {
    let (state, ledger) = test_state();
    ledger.record_win("carol", 1).await.unwrap();
    ledger.record_win("alice", 5).await.unwrap();
    ledger.record_win("alice", 3).await.unwrap();
    ledger.record_win("bob", 0).await.unwrap();
    let app = create_test_app(state).await;

    let entries: Vec<LedgerEntry> = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/leaderboard").to_request(),
    )
    .await;
    let names: Vec<&str> = entries.iter().map(|e| e.username.as_str()).collect();
    assert_eq!(names, ["alice", "bob", "carol"]);
    assert_eq!(entries[0].wins, 2);
    assert_eq!(entries[0].best_score, 3);
}

#[actix_web::test]
async fn limit_is_honored_and_clamped() {
    let (state, ledger) = test_state();
    for name in ["a", "b", "c"] {
        ledger.record_win(name, 0).await.unwrap();
    }
    let app = create_test_app(state).await;

    let entries: Vec<LedgerEntry> = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/leaderboard?limit=2").to_request(),
    )
    .await;
    assert_eq!(entries.len(), 2);

    let entries: Vec<LedgerEntry> = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/leaderboard?limit=0").to_request(),
    )
    .await;
    assert_eq!(entries.len(), 1);
}
