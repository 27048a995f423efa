use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use super::analysis::SessionError;
use super::repository::{SessionId, SessionStore, SessionStoreError};
use super::service::{AnalysisService, AnalysisServiceError};
use crate::workflows::gateway::CompletionGateway;
use crate::workflows::intake::InputError;

#[derive(Debug, Deserialize)]
pub struct OpenSessionRequest {
    pub csv: String,
}

#[derive(Debug, Deserialize)]
pub struct ScoresQuery {
    pub person: String,
}

#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    pub person: String,
    #[serde(default)]
    pub evaluation_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub question: String,
}

/// Router builder exposing session upload, scoring, report and chat endpoints.
pub fn analysis_router<G, S>(service: Arc<AnalysisService<G, S>>) -> Router
where
    G: CompletionGateway + ?Sized + 'static,
    S: SessionStore + 'static,
{
    Router::new()
        .route("/api/v1/sessions", post(open_handler::<G, S>))
        .route("/api/v1/sessions/:session_id", get(session_handler::<G, S>))
        .route(
            "/api/v1/sessions/:session_id/scores",
            get(scores_handler::<G, S>),
        )
        .route(
            "/api/v1/sessions/:session_id/report",
            post(report_handler::<G, S>),
        )
        .route(
            "/api/v1/sessions/:session_id/chat",
            post(chat_handler::<G, S>),
        )
        .with_state(service)
}

pub(crate) async fn open_handler<G, S>(
    State(service): State<Arc<AnalysisService<G, S>>>,
    axum::Json(request): axum::Json<OpenSessionRequest>,
) -> Response
where
    G: CompletionGateway + ?Sized + 'static,
    S: SessionStore + 'static,
{
    match service.open(request.csv.as_bytes()) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record.view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn session_handler<G, S>(
    State(service): State<Arc<AnalysisService<G, S>>>,
    Path(session_id): Path<String>,
) -> Response
where
    G: CompletionGateway + ?Sized + 'static,
    S: SessionStore + 'static,
{
    match service.get(&SessionId(session_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn scores_handler<G, S>(
    State(service): State<Arc<AnalysisService<G, S>>>,
    Path(session_id): Path<String>,
    Query(query): Query<ScoresQuery>,
) -> Response
where
    G: CompletionGateway + ?Sized + 'static,
    S: SessionStore + 'static,
{
    match service.scores(&SessionId(session_id), &query.person) {
        Ok(scores) => {
            let payload = json!({
                "scores": scores.view(),
                "chart": scores.disc.chart(),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn report_handler<G, S>(
    State(service): State<Arc<AnalysisService<G, S>>>,
    Path(session_id): Path<String>,
    axum::Json(request): axum::Json<ReportRequest>,
) -> Response
where
    G: CompletionGateway + ?Sized + 'static,
    S: SessionStore + 'static,
{
    let evaluation_date = request
        .evaluation_date
        .unwrap_or_else(|| Local::now().date_naive());

    match service
        .generate_report(&SessionId(session_id), &request.person, evaluation_date)
        .await
    {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome.view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn chat_handler<G, S>(
    State(service): State<Arc<AnalysisService<G, S>>>,
    Path(session_id): Path<String>,
    axum::Json(request): axum::Json<ChatRequest>,
) -> Response
where
    G: CompletionGateway + ?Sized + 'static,
    S: SessionStore + 'static,
{
    match service
        .ask(&SessionId(session_id), &request.question)
        .await
    {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome.view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) fn error_response(err: AnalysisServiceError) -> Response {
    let status = match &err {
        AnalysisServiceError::Store(SessionStoreError::NotFound)
        | AnalysisServiceError::Input(InputError::PersonNotFound(_)) => StatusCode::NOT_FOUND,
        AnalysisServiceError::Input(_) => StatusCode::BAD_REQUEST,
        AnalysisServiceError::Configuration(_) => StatusCode::SERVICE_UNAVAILABLE,
        AnalysisServiceError::Gateway(_) => StatusCode::BAD_GATEWAY,
        AnalysisServiceError::ReportParse(parse) => {
            let payload = json!({
                "error": err.to_string(),
                "raw_response": parse.raw,
            });
            return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
        }
        AnalysisServiceError::Session(SessionError::NoActiveReport) => StatusCode::CONFLICT,
        AnalysisServiceError::Session(SessionError::EmptyQuestion) => StatusCode::BAD_REQUEST,
        AnalysisServiceError::Store(SessionStoreError::Conflict) => StatusCode::CONFLICT,
        AnalysisServiceError::Store(SessionStoreError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({
        "error": err.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
