use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::{JourneyProfile, JourneyProfileDraft, JourneyProfileId};
use super::repository::{JourneyProfileRepository, RepositoryError};

/// Service validating drafts before they reach the repository.
pub struct JourneyProfileService<R> {
    repository: Arc<R>,
    sequence: AtomicU64,
}

impl<R> JourneyProfileService<R>
where
    R: JourneyProfileRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            sequence: AtomicU64::new(1),
        }
    }

    fn next_id(&self) -> JourneyProfileId {
        JourneyProfileId(self.sequence.fetch_add(1, Ordering::Relaxed))
    }

    pub fn create(&self, draft: JourneyProfileDraft) -> Result<JourneyProfile, JourneyServiceError> {
        let (full_name, destination_country, intended_start_date) = validate(draft)?;
        let now = Utc::now();
        let profile = JourneyProfile {
            id: self.next_id(),
            full_name,
            destination_country,
            intended_start_date,
            created_at: now,
            updated_at: now,
        };

        let stored = self.repository.insert(profile)?;
        info!(profile_id = %stored.id, destination = %stored.destination_country, "journey profile created");
        Ok(stored)
    }

    pub fn get(&self, id: JourneyProfileId) -> Result<JourneyProfile, JourneyServiceError> {
        let profile = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(profile)
    }

    pub fn list(&self) -> Result<Vec<JourneyProfile>, JourneyServiceError> {
        let mut profiles = self.repository.list()?;
        profiles.sort_by_key(|profile| profile.id);
        Ok(profiles)
    }

    /// Replaces every editable field; `created_at` is preserved.
    pub fn update(
        &self,
        id: JourneyProfileId,
        draft: JourneyProfileDraft,
    ) -> Result<JourneyProfile, JourneyServiceError> {
        let (full_name, destination_country, intended_start_date) = validate(draft)?;
        let existing = self.get(id)?;
        let profile = JourneyProfile {
            full_name,
            destination_country,
            intended_start_date,
            updated_at: Utc::now(),
            ..existing
        };

        let stored = self.repository.update(profile)?;
        info!(profile_id = %stored.id, "journey profile updated");
        Ok(stored)
    }

    pub fn delete(&self, id: JourneyProfileId) -> Result<(), JourneyServiceError> {
        self.repository.delete(id)?;
        info!(profile_id = %id, "journey profile deleted");
        Ok(())
    }
}

fn validate(
    draft: JourneyProfileDraft,
) -> Result<(String, String, chrono::NaiveDate), JourneyServiceError> {
    let missing = draft.missing_fields();
    match draft.intended_start_date {
        Some(start) if missing.is_empty() => Ok((
            draft.full_name.trim().to_string(),
            draft.destination_country.trim().to_string(),
            start,
        )),
        _ => Err(JourneyServiceError::MissingFields(missing)),
    }
}

/// Error raised by the journey profile service.
#[derive(Debug, thiserror::Error)]
pub enum JourneyServiceError {
    #[error("please fill in all fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
