use async_trait::async_trait;
use contact_form::domain::ContactId;
use contact_form::error::{StoreError, StoreResult};
use contact_form::models::Contact;
use contact_form::repositories::ContactStore;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock contact store for testing.
///
/// Keeps contacts in memory, records every persisted contact, counts calls
/// per method, and can be told to fail loads or saves.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockContactStore {
    contacts: Arc<Mutex<HashMap<String, Contact>>>,
    persisted: Arc<Mutex<Vec<Contact>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    fail_fetch: Arc<Mutex<bool>>,
    fail_persist: Arc<Mutex<bool>>,
}

#[allow(dead_code)]
impl MockContactStore {
    /// Create a new empty MockContactStore.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a contact to the mock store.
    pub fn add_contact(&self, contact: Contact) {
        let mut contacts = self.contacts.lock().unwrap();
        contacts.insert(contact.id.clone(), contact);
    }

    /// Make every subsequent `fetch` fail.
    pub fn fail_fetches(&self) {
        *self.fail_fetch.lock().unwrap() = true;
    }

    /// Make every subsequent `persist` fail.
    pub fn fail_persists(&self) {
        *self.fail_persist.lock().unwrap() = true;
    }

    /// Contacts handed to `persist`, in call order (including failed calls).
    pub fn persisted(&self) -> Vec<Contact> {
        self.persisted.lock().unwrap().clone()
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

#[async_trait]
impl ContactStore for MockContactStore {
    async fn fetch(&self, id: &ContactId) -> StoreResult<Option<Contact>> {
        self.track_call("fetch");

        if *self.fail_fetch.lock().unwrap() {
            return Err(StoreError::Unavailable("mock store offline".to_string()));
        }

        let contacts = self.contacts.lock().unwrap();
        Ok(contacts.get(id.as_str()).cloned())
    }

    async fn persist(&self, contact: &Contact) -> StoreResult<()> {
        self.track_call("persist");
        self.persisted.lock().unwrap().push(contact.clone());

        if *self.fail_persist.lock().unwrap() {
            return Err(StoreError::PersistFailed("mock store refused".to_string()));
        }

        let mut contacts = self.contacts.lock().unwrap();
        contacts.insert(contact.id.clone(), contact.clone());
        Ok(())
    }
}
