use actix_web::http::StatusCode;
use actix_web::{test, web, App, HttpResponse};
use backend::{AppError, ErrorCode, GameError, SessionId};
use backend_test_support::problem_details::assert_problem_details_from_service_response;

async fn conflict() -> Result<HttpResponse, AppError> {
    Err(GameError::AlreadyGuessed('e').into())
}

async fn not_found() -> Result<HttpResponse, AppError> {
    let id = SessionId::parse("abcd").map_err(AppError::from)?;
    Err(GameError::NotFound(id).into())
}

async fn bad_request() -> Result<HttpResponse, AppError> {
    Err(AppError::bad_request(ErrorCode::BadRequest, "Missing session id"))
}

async fn exhausted() -> Result<HttpResponse, AppError> {
    Err(GameError::IdSpaceExhausted.into())
}

async fn internal() -> Result<HttpResponse, AppError> {
    Err(AppError::internal("Leaderboard unavailable"))
}

#[actix_web::test]
async fn every_error_renders_problem_details() {
    let app = test::init_service(
        App::new()
            .route("/conflict", web::get().to(conflict))
            .route("/not-found", web::get().to(not_found))
            .route("/bad-request", web::get().to(bad_request))
            .route("/exhausted", web::get().to(exhausted))
            .route("/internal", web::get().to(internal)),
    )
    .await;

    let cases = [
        ("/conflict", "ALREADY_GUESSED", StatusCode::CONFLICT, "Letter 'e' has already been guessed."),
        ("/not-found", "SESSION_NOT_FOUND", StatusCode::NOT_FOUND, "abcd"),
        ("/bad-request", "BAD_REQUEST", StatusCode::BAD_REQUEST, "Missing session id"),
        ("/exhausted", "ID_SPACE_EXHAUSTED", StatusCode::SERVICE_UNAVAILABLE, "session id"),
        ("/internal", "INTERNAL", StatusCode::INTERNAL_SERVER_ERROR, "Leaderboard unavailable"),
    ];

    for (uri, code, status, detail) in cases {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_problem_details_from_service_response(resp, code, status, Some(detail)).await;
    }
}
