use super::domain::{JourneyProfile, JourneyProfileId};

/// Storage abstraction so the service can be exercised without a backend.
pub trait JourneyProfileRepository: Send + Sync {
    fn insert(&self, profile: JourneyProfile) -> Result<JourneyProfile, RepositoryError>;
    fn update(&self, profile: JourneyProfile) -> Result<JourneyProfile, RepositoryError>;
    fn fetch(&self, id: JourneyProfileId) -> Result<Option<JourneyProfile>, RepositoryError>;
    fn list(&self) -> Result<Vec<JourneyProfile>, RepositoryError>;
    fn delete(&self, id: JourneyProfileId) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
