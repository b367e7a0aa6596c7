use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::error::StoreError;
use crate::store::{Deleted, UserStore};
use crate::user::{User, UserId, UserInput};

/// Process-local user collection.
///
/// Ids come from a counter starting at 1 and are never reused. Each process
/// instance owns its own collection, so records are only visible to requests
/// served by the same instance.
#[derive(Debug)]
pub struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
    next_id: AtomicU64,
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<User>>, StoreError> {
        self.users.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl UserStore for InMemoryUserStore {
    fn create(&self, input: UserInput) -> Result<User, StoreError> {
        let mut users = self.lock()?;
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let user = input.into_user(UserId::new(id.to_string()));
        users.push(user.clone());
        Ok(user)
    }

    fn get_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        let users = self.lock()?;
        Ok(users.iter().find(|user| &user.id == id).cloned())
    }

    fn list_all(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.lock()?.clone())
    }

    fn update(&self, id: &UserId, input: UserInput) -> Result<Option<User>, StoreError> {
        let mut users = self.lock()?;
        let Some(user) = users.iter_mut().find(|user| &user.id == id) else {
            return Ok(None);
        };
        user.name = input.name;
        user.email = input.email;
        Ok(Some(user.clone()))
    }

    fn delete_by_id(&self, id: &UserId) -> Result<Deleted, StoreError> {
        let mut users = self.lock()?;
        match users.iter().position(|user| &user.id == id) {
            Some(index) => {
                users.remove(index);
                Ok(Deleted::Removed)
            }
            None => Ok(Deleted::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    fn input(name: &str) -> UserInput {
        UserInput::new(name, None)
    }

    #[test]
    fn assigns_incrementing_ids_in_insertion_order() {
        let store = InMemoryUserStore::new();
        store.create(input("a")).expect("create a");
        store.create(input("b")).expect("create b");

        let ids: Vec<String> = store
            .list_all()
            .expect("list")
            .into_iter()
            .map(|user| user.id.to_string())
            .collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn does_not_reuse_ids_after_delete() {
        let store = InMemoryUserStore::new();
        let first = store.create(input("a")).expect("create");
        assert_eq!(
            store.delete_by_id(&first.id).expect("delete"),
            Deleted::Removed
        );

        let second = store.create(input("b")).expect("create");
        assert_eq!(second.id.as_str(), "2");
    }

    #[test]
    fn update_of_missing_id_leaves_store_untouched() {
        let store = InMemoryUserStore::new();
        let existing = store.create(input("a")).expect("create");

        let outcome = store
            .update(&UserId::new("99"), input("z"))
            .expect("update should not fail");

        assert_eq!(outcome, None);
        assert_eq!(store.list_all().expect("list"), vec![existing]);
    }

    #[test]
    fn delete_twice_reports_not_found() {
        let store = InMemoryUserStore::new();
        let user = store.create(input("a")).expect("create");

        store.delete_by_id(&user.id).expect("first delete");
        let second = store.delete_by_id(&user.id).expect("second delete");

        assert_eq!(second, Deleted::NotFound);
        assert!(store.is_empty().expect("is_empty"));
    }

    #[test]
    fn concurrent_creates_produce_unique_ids() {
        let store = Arc::new(InMemoryUserStore::new());
        let workers: Vec<_> = (0..8)
            .map(|worker| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for index in 0..25 {
                        store
                            .create(input(&format!("user-{worker}-{index}")))
                            .expect("create");
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().expect("worker panicked");
        }

        let mut ids: Vec<String> = store
            .list_all()
            .expect("list")
            .into_iter()
            .map(|user| user.id.to_string())
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 200);
    }
}
