use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::{json, Value};
use study_planner::journey::{
    journey_profile_router, JourneyProfile, JourneyProfileDraft, JourneyProfileId,
    JourneyProfileRepository, JourneyProfileService, JourneyServiceError, RepositoryError,
};
use tower::ServiceExt;

#[derive(Default)]
struct MemoryRepository {
    records: Mutex<BTreeMap<JourneyProfileId, JourneyProfile>>,
}

impl JourneyProfileRepository for MemoryRepository {
    fn insert(&self, profile: JourneyProfile) -> Result<JourneyProfile, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&profile.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(profile.id, profile.clone());
        Ok(profile)
    }

    fn update(&self, profile: JourneyProfile) -> Result<JourneyProfile, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        match guard.get_mut(&profile.id) {
            Some(existing) => {
                *existing = profile.clone();
                Ok(profile)
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: JourneyProfileId) -> Result<Option<JourneyProfile>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn list(&self) -> Result<Vec<JourneyProfile>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn delete(&self, id: JourneyProfileId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.remove(&id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }
}

struct UnavailableRepository;

impl JourneyProfileRepository for UnavailableRepository {
    fn insert(&self, _profile: JourneyProfile) -> Result<JourneyProfile, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _profile: JourneyProfile) -> Result<JourneyProfile, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: JourneyProfileId) -> Result<Option<JourneyProfile>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<JourneyProfile>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete(&self, _id: JourneyProfileId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

fn draft_json() -> Value {
    json!({
        "full_name": "Ana Lopez",
        "destination_country": "Germany",
        "intended_start_date": "2026-10-01"
    })
}

fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).expect("body serializes")))
        .expect("request builds")
}

fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("body is json")
}

fn memory_service() -> Arc<JourneyProfileService<MemoryRepository>> {
    Arc::new(JourneyProfileService::new(Arc::new(
        MemoryRepository::default(),
    )))
}

#[test]
fn service_rejects_blank_drafts() {
    let service = memory_service();
    let err = service
        .create(JourneyProfileDraft::default())
        .expect_err("blank draft rejected");

    match err {
        JourneyServiceError::MissingFields(fields) => assert_eq!(
            fields,
            vec!["full_name", "destination_country", "intended_start_date"]
        ),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn update_preserves_creation_time() {
    let service = memory_service();
    let created = service
        .create(serde_json::from_value(draft_json()).expect("draft parses"))
        .expect("profile created");

    let mut changed: JourneyProfileDraft =
        serde_json::from_value(draft_json()).expect("draft parses");
    changed.destination_country = "Austria".to_string();
    let updated = service.update(created.id, changed).expect("profile updated");

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.destination_country, "Austria");
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn crud_round_trip_over_http() {
    let router = journey_profile_router(memory_service());

    let response = router
        .clone()
        .oneshot(json_request(Method::POST, "/api/journey-profiles/", &draft_json()))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["id"].as_u64().expect("numeric id");
    assert_eq!(created["destination_country"], "Germany");

    let response = router
        .clone()
        .oneshot(empty_request(Method::GET, "/api/journey-profiles/"))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().map(Vec::len), Some(1));

    let mut changed = draft_json();
    changed["full_name"] = json!("Ana María López");
    let response = router
        .clone()
        .oneshot(json_request(
            Method::PUT,
            &format!("/api/journey-profiles/{id}/"),
            &changed,
        ))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["full_name"], "Ana María López");

    let response = router
        .clone()
        .oneshot(empty_request(
            Method::DELETE,
            &format!("/api/journey-profiles/{id}"),
        ))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = router
        .oneshot(empty_request(
            Method::GET,
            &format!("/api/journey-profiles/{id}/"),
        ))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn collection_answers_without_trailing_slash() {
    let router = journey_profile_router(memory_service());

    let response = router
        .clone()
        .oneshot(json_request(Method::POST, "/api/journey-profiles", &draft_json()))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = router
        .oneshot(empty_request(Method::GET, "/api/journey-profiles"))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn missing_fields_return_unprocessable() {
    let router = journey_profile_router(memory_service());

    let response = router
        .oneshot(json_request(
            Method::POST,
            "/api/journey-profiles/",
            &json!({ "full_name": "Ana Lopez" }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(
        body["missing_fields"],
        json!(["destination_country", "intended_start_date"])
    );
}

#[tokio::test]
async fn repository_outage_returns_internal_error() {
    let service = Arc::new(JourneyProfileService::new(Arc::new(UnavailableRepository)));
    let router = journey_profile_router(service);

    let response = router
        .oneshot(json_request(Method::POST, "/api/journey-profiles/", &draft_json()))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
