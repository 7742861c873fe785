use super::report::{PlanId, TripPlan};

/// Storage abstraction so the service module can be exercised in isolation.
pub trait PlanRepository: Send + Sync {
    fn insert(&self, plan: TripPlan) -> Result<TripPlan, RepositoryError>;
    fn fetch(&self, id: &PlanId) -> Result<Option<TripPlan>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("plan already exists")]
    Conflict,
    #[error("plan not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
