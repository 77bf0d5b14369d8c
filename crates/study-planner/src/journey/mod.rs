//! Application journey: phase checklists and the journey-profile resource.

pub mod domain;
mod plan;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{JourneyProfile, JourneyProfileDraft, JourneyProfileId};
pub use plan::{
    JourneyPhase, JourneyPlan, JourneyPlanError, JourneyTask, PhaseProgressEntry, PhaseStatus,
};
pub use repository::{JourneyProfileRepository, RepositoryError};
pub use router::journey_profile_router;
pub use service::{JourneyProfileService, JourneyServiceError};
