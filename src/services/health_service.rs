use crate::storage::{MessageStore, StorageError};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct HealthService {
    store: Arc<dyn MessageStore>,
}

impl HealthService {
    #[must_use]
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self { store }
    }

    /// Checks that the message store answers.
    ///
    /// # Errors
    /// Returns `StorageError` if the store is unreachable.
    pub async fn check_storage(&self) -> Result<(), StorageError> {
        self.store.ping().await
    }
}
