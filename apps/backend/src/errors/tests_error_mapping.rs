// Unit tests for error mapping - pure domain errors to HTTP problem details
use actix_web::body::to_bytes;
use actix_web::ResponseError;

use crate::domain::SessionId;
use crate::error::ProblemDetails;
use crate::errors::GameError;
use crate::{AppError, ErrorCode};

fn status_of(err: GameError) -> u16 {
    AppError::from(err).status().as_u16()
}

#[test]
fn maps_not_found_to_404() {
    let app: AppError = GameError::NotFound(SessionId::parse("abcd").unwrap()).into();
    assert_eq!(app.code(), ErrorCode::SessionNotFound);
    assert_eq!(app.status().as_u16(), 404);
}

#[test]
fn maps_identity_failures() {
    assert_eq!(status_of(GameError::Unauthorized), 401);
    assert_eq!(status_of(GameError::Forbidden), 403);

    let app: AppError = GameError::Forbidden.into();
    assert_eq!(app.code().as_str(), "NOT_A_PARTICIPANT");
}

#[test]
fn maps_rule_conflicts_to_409() {
    for err in [
        GameError::AlreadyFull,
        GameError::AlreadyParticipant,
        GameError::AlreadyFinished,
        GameError::AlreadyGuessed('e'),
        GameError::OutOfTurn,
        GameError::AwaitingOpponent,
        GameError::NoLettersLeft,
    ] {
        let expected = err.code();
        let app: AppError = err.into();
        assert_eq!(app.status().as_u16(), 409);
        assert_eq!(app.code(), expected);
    }
}

#[test]
fn maps_malformed_input_to_400() {
    assert_eq!(status_of(GameError::InvalidLetter("ab".into())), 400);
    assert_eq!(status_of(GameError::InvalidSessionId("ABCD".into())), 400);
}

#[test]
fn maps_exhausted_ids_to_503() {
    let app: AppError = GameError::IdSpaceExhausted.into();
    assert_eq!(app.status().as_u16(), 503);
    assert_eq!(app.code(), ErrorCode::IdSpaceExhausted);
}

#[actix_web::test]
async fn renders_problem_details() {
    let app: AppError = GameError::AlreadyGuessed('e').into();
    let response = app.error_response();

    assert_eq!(response.status().as_u16(), 409);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/problem+json"
    );

    let body = to_bytes(response.into_body()).await.unwrap();
    let problem: ProblemDetails = serde_json::from_slice(&body).unwrap();
    assert_eq!(problem.code, "ALREADY_GUESSED");
    assert_eq!(problem.title, "Already Guessed");
    assert_eq!(problem.status, 409);
    assert_eq!(problem.detail, "Letter 'e' has already been guessed.");
}
