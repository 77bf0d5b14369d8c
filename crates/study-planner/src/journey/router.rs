use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;
use tracing::warn;

use super::domain::{JourneyProfileDraft, JourneyProfileId};
use super::repository::{JourneyProfileRepository, RepositoryError};
use super::service::{JourneyProfileService, JourneyServiceError};

/// Router exposing CRUD endpoints for journey profiles.
pub fn journey_profile_router<R>(service: Arc<JourneyProfileService<R>>) -> Router
where
    R: JourneyProfileRepository + 'static,
{
    Router::new()
        .route(
            "/api/journey-profiles",
            get(list_handler::<R>).post(create_handler::<R>),
        )
        .route(
            "/api/journey-profiles/",
            get(list_handler::<R>).post(create_handler::<R>),
        )
        .route(
            "/api/journey-profiles/:id",
            get(fetch_handler::<R>)
                .put(update_handler::<R>)
                .delete(delete_handler::<R>),
        )
        .route(
            "/api/journey-profiles/:id/",
            get(fetch_handler::<R>)
                .put(update_handler::<R>)
                .delete(delete_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<JourneyProfileService<R>>>,
    axum::Json(draft): axum::Json<JourneyProfileDraft>,
) -> Response
where
    R: JourneyProfileRepository + 'static,
{
    match service.create(draft) {
        Ok(profile) => (StatusCode::CREATED, axum::Json(profile)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<JourneyProfileService<R>>>,
) -> Response
where
    R: JourneyProfileRepository + 'static,
{
    match service.list() {
        Ok(profiles) => (StatusCode::OK, axum::Json(profiles)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn fetch_handler<R>(
    State(service): State<Arc<JourneyProfileService<R>>>,
    Path(id): Path<u64>,
) -> Response
where
    R: JourneyProfileRepository + 'static,
{
    match service.get(JourneyProfileId(id)) {
        Ok(profile) => (StatusCode::OK, axum::Json(profile)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<JourneyProfileService<R>>>,
    Path(id): Path<u64>,
    axum::Json(draft): axum::Json<JourneyProfileDraft>,
) -> Response
where
    R: JourneyProfileRepository + 'static,
{
    match service.update(JourneyProfileId(id), draft) {
        Ok(profile) => (StatusCode::OK, axum::Json(profile)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<JourneyProfileService<R>>>,
    Path(id): Path<u64>,
) -> Response
where
    R: JourneyProfileRepository + 'static,
{
    match service.delete(JourneyProfileId(id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: JourneyServiceError) -> Response {
    let status = match &err {
        JourneyServiceError::MissingFields(_) => StatusCode::UNPROCESSABLE_ENTITY,
        JourneyServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        JourneyServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        JourneyServiceError::Repository(RepositoryError::Unavailable(reason)) => {
            warn!(%reason, "journey profile repository unavailable");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let mut payload = json!({ "error": err.to_string() });
    if let JourneyServiceError::MissingFields(fields) = &err {
        payload["missing_fields"] = json!(fields);
    }
    (status, axum::Json(payload)).into_response()
}
