use crate::domain::ContactId;
use crate::error::StoreResult;
use crate::models::Contact;
use async_trait::async_trait;

/// Where contacts are loaded from and saved to.
///
/// Both operations are one-shot: they resolve exactly once. Timeouts are the
/// implementation's concern.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Retrieve a contact. `Ok(None)` means no such contact.
    async fn fetch(&self, id: &ContactId) -> StoreResult<Option<Contact>>;

    /// Create or update a contact. A contact with an empty id is new.
    async fn persist(&self, contact: &Contact) -> StoreResult<()>;
}
