use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;
use tracing::warn;

use super::domain::LeadSubmission;
use super::export::ExportFormat;
use super::filter::LeadFilter;
use super::service::{LeadService, LeadServiceError};

/// Router builder exposing search, breakdown, export, and ad-hoc scoring endpoints.
pub fn lead_router(service: Arc<LeadService>) -> Router {
    Router::new()
        .route("/api/v1/leads/search", post(search_handler))
        .route("/api/v1/leads/options", get(options_handler))
        .route("/api/v1/leads/score", post(score_handler))
        .route("/api/v1/leads/export/:format", post(export_handler))
        .route("/api/v1/leads/:company", get(breakdown_handler))
        .with_state(service)
}

pub(crate) async fn search_handler(
    State(service): State<Arc<LeadService>>,
    axum::Json(filter): axum::Json<LeadFilter>,
) -> Response {
    match service.search(&filter) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn options_handler(State(service): State<Arc<LeadService>>) -> Response {
    (StatusCode::OK, axum::Json(service.options())).into_response()
}

pub(crate) async fn breakdown_handler(
    State(service): State<Arc<LeadService>>,
    Path(company): Path<String>,
) -> Response {
    match service.breakdown(&company) {
        Some(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        None => {
            let payload = json!({
                "error": "lead not found",
                "company": company,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn export_handler(
    State(service): State<Arc<LeadService>>,
    Path(format): Path<String>,
    axum::Json(filter): axum::Json<LeadFilter>,
) -> Response {
    let format = match format.parse::<ExportFormat>() {
        Ok(format) => format,
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };

    match service.export(&filter, format) {
        Ok(payload) => {
            let disposition = format!("attachment; filename=\"{}\"", payload.file_name);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, payload.format.content_type().to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                payload.body,
            )
                .into_response()
        }
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn score_handler(
    State(service): State<Arc<LeadService>>,
    axum::Json(submissions): axum::Json<Vec<LeadSubmission>>,
) -> Response {
    match service.score(submissions) {
        Ok(scored) => (StatusCode::OK, axum::Json(scored)).into_response(),
        Err(error) => service_error_response(error),
    }
}

fn service_error_response(error: LeadServiceError) -> Response {
    match error {
        LeadServiceError::Filter(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        LeadServiceError::Validation { index, source } => {
            let payload = json!({
                "error": source.to_string(),
                "index": index,
                "field": source.field().label(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        other => {
            warn!(error = %other, "lead request failed");
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
