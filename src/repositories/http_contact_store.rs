use crate::client::ContactsClient;
use crate::domain::ContactId;
use crate::error::{StoreError, StoreResult};
use crate::models::Contact;
use crate::repositories::traits::ContactStore;
use async_trait::async_trait;
use std::sync::Arc;

/// Contact store backed by the REST contacts API.
///
/// Uses `tokio::task::spawn_blocking` to run the synchronous client on a
/// dedicated thread pool, so the event loop never blocks on I/O.
#[derive(Clone)]
pub struct HttpContactStore {
    client: Arc<ContactsClient>,
}

impl HttpContactStore {
    pub fn new(client: ContactsClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

#[async_trait]
impl ContactStore for HttpContactStore {
    async fn fetch(&self, id: &ContactId) -> StoreResult<Option<Contact>> {
        let client = self.client.clone();
        let id = id.clone();

        tokio::task::spawn_blocking(move || client.get_contact(&id))
            .await
            .map_err(|e| StoreError::Unavailable(format!("Task join error: {}", e)))?
    }

    async fn persist(&self, contact: &Contact) -> StoreResult<()> {
        let client = self.client.clone();
        let contact = contact.clone();

        tokio::task::spawn_blocking(move || client.save_contact(&contact))
            .await
            .map_err(|e| StoreError::PersistFailed(format!("Task join error: {}", e)))?
    }
}
