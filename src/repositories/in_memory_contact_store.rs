use crate::domain::ContactId;
use crate::error::{StoreError, StoreResult};
use crate::models::Contact;
use crate::repositories::traits::ContactStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Contact store kept in process memory.
///
/// New contacts (empty id) get the next numeric id, one past the largest
/// numeric id already stored. Clones share the same underlying map.
#[derive(Clone, Default)]
pub struct InMemoryContactStore {
    contacts: Arc<RwLock<HashMap<String, Contact>>>,
}

impl InMemoryContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `contacts`.
    pub fn with_contacts(contacts: impl IntoIterator<Item = Contact>) -> Self {
        let map = contacts
            .into_iter()
            .map(|contact| (contact.id.clone(), contact))
            .collect();
        Self {
            contacts: Arc::new(RwLock::new(map)),
        }
    }

    pub async fn len(&self) -> usize {
        self.contacts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Every stored contact, ordered by id.
    pub async fn all(&self) -> Vec<Contact> {
        let mut contacts: Vec<Contact> = self.contacts.read().await.values().cloned().collect();
        contacts.sort_by(|a, b| a.id.cmp(&b.id));
        contacts
    }

    fn next_id(contacts: &HashMap<String, Contact>) -> String {
        let max = contacts
            .keys()
            .filter_map(|id| id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        (max + 1).to_string()
    }
}

#[async_trait]
impl ContactStore for InMemoryContactStore {
    async fn fetch(&self, id: &ContactId) -> StoreResult<Option<Contact>> {
        let contacts = self.contacts.read().await;
        Ok(contacts.get(id.as_str()).cloned())
    }

    async fn persist(&self, contact: &Contact) -> StoreResult<()> {
        let mut contacts = self.contacts.write().await;

        let mut stored = contact.clone();
        if stored.is_new() {
            stored.id = Self::next_id(&contacts);
            tracing::debug!(id = %stored.id, "Assigned id to new contact");
        } else if !contacts.contains_key(&stored.id) {
            return Err(StoreError::PersistFailed(format!(
                "Contact {} not found",
                stored.id
            )));
        }

        contacts.insert(stored.id.clone(), stored);
        Ok(())
    }
}
