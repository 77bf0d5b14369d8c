use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use study_planner::auth::AuthState;
use study_planner::catalog::{EntityCatalog, EntityId};
use study_planner::config::PlannerConfig;
use study_planner::currency::CurrencyTable;
use study_planner::journey::{
    JourneyProfile, JourneyProfileId, JourneyProfileRepository, RepositoryError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) catalog: Arc<EntityCatalog>,
    pub(crate) currencies: Arc<CurrencyTable>,
    pub(crate) planner: PlannerConfig,
    pub(crate) auth: Arc<dyn AuthState>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryJourneyProfileRepository {
    records: Arc<Mutex<HashMap<JourneyProfileId, JourneyProfile>>>,
}

impl JourneyProfileRepository for InMemoryJourneyProfileRepository {
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
        if guard.contains_key(&profile.id) {
            guard.insert(profile.id, profile.clone());
            Ok(profile)
        } else {
            Err(RepositoryError::NotFound)
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

/// Catalog ids are lowercase slugs; accept `Berlin` or ` berlin `.
pub(crate) fn parse_entity_id(raw: &str) -> Result<EntityId, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("city id must not be empty".to_string());
    }
    Ok(EntityId::new(trimmed.to_ascii_lowercase()))
}
