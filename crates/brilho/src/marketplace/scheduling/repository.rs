use super::domain::{Order, OrderId};

/// Storage abstraction so the scheduling service can be exercised in
/// isolation; the API service provides an in-memory implementation.
pub trait OrderRepository: Send + Sync {
    fn insert(&self, order: Order) -> Result<Order, RepositoryError>;
    fn update(&self, order: Order) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &OrderId) -> Result<Option<Order>, RepositoryError>;
    fn list(&self) -> Result<Vec<Order>, RepositoryError>;
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
