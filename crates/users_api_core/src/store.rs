use crate::error::StoreError;
use crate::user::{User, UserId, UserInput};

/// Outcome of a delete that reached the backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deleted {
    Removed,
    NotFound,
}

/// Storage adapter for user records.
///
/// Implementations perform at most one backing-store operation per call (a
/// paginated scan counts as one logical operation) and do no caching.
/// Concurrent updates to the same id are last-write-wins.
pub trait UserStore: Send + Sync {
    /// Assigns a fresh id, persists the record and returns it.
    fn create(&self, input: UserInput) -> Result<User, StoreError>;

    fn get_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError>;

    fn list_all(&self) -> Result<Vec<User>, StoreError>;

    /// Overwrites name and email of an existing record. Returns `None`
    /// without writing anything when no record has `id`.
    fn update(&self, id: &UserId, input: UserInput) -> Result<Option<User>, StoreError>;

    fn delete_by_id(&self, id: &UserId) -> Result<Deleted, StoreError>;
}
