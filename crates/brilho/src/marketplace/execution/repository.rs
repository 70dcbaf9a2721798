use super::domain::{AssignedJob, JobId};
use crate::marketplace::scheduling::repository::RepositoryError;

/// Storage abstraction for assigned jobs. `remove` backs the decline flow,
/// which takes an offer out of the employee's queue entirely.
pub trait JobRepository: Send + Sync {
    fn insert(&self, job: AssignedJob) -> Result<AssignedJob, RepositoryError>;
    fn update(&self, job: AssignedJob) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &JobId) -> Result<Option<AssignedJob>, RepositoryError>;
    fn remove(&self, id: &JobId) -> Result<(), RepositoryError>;
    fn list(&self) -> Result<Vec<AssignedJob>, RepositoryError>;

    /// Advance the elapsed counter of every running job in one atomic pass
    /// and return how many moved. No other write may interleave with the
    /// pass; a snapshot-then-write-back implementation would overwrite
    /// concurrent status changes with stale jobs.
    fn tick_running(&self) -> Result<usize, RepositoryError>;
}
