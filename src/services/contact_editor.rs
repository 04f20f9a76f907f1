//! Contact editor service.
//!
//! Owns one [`ContactForm`] for the lifetime of an edit page and drives its
//! load/save lifecycle against the contact store and the navigator.
//!
//! Every async operation here is a single request. Dropping the returned
//! future before it resolves abandons the request and nothing is applied to
//! the form afterwards.

use crate::config::Config;
use crate::domain::ContactId;
use crate::error::{ConfigResult, EditorError, EditorResult, FormError};
use crate::form::{AddressState, ContactForm, FieldEdit, FormSettings};
use crate::navigation::{Navigator, RouteParameterSource};
use crate::repositories::ContactStore;
use std::sync::Arc;
use tokio::time::Instant;

/// Whether the editor is creating a new contact or editing a stored one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditMode {
    Create,
    Edit(ContactId),
}

pub struct ContactEditor {
    form: ContactForm,
    store: Arc<dyn ContactStore>,
    navigator: Arc<dyn Navigator>,
    contact_list_path: String,
    mode: EditMode,
    initialized: bool,
    last_error: Option<String>,
}

impl ContactEditor {
    pub fn new(
        settings: &FormSettings,
        store: Arc<dyn ContactStore>,
        navigator: Arc<dyn Navigator>,
        contact_list_path: impl Into<String>,
    ) -> Self {
        Self {
            form: ContactForm::new(settings),
            store,
            navigator,
            contact_list_path: contact_list_path.into(),
            mode: EditMode::Create,
            initialized: false,
            last_error: None,
        }
    }

    /// Build an editor with settings and navigation target taken from `config`.
    pub fn from_config(
        config: &Config,
        store: Arc<dyn ContactStore>,
        navigator: Arc<dyn Navigator>,
    ) -> ConfigResult<Self> {
        let settings = FormSettings::from_config(config)?;
        Ok(Self::new(
            &settings,
            store,
            navigator,
            config.contact_list_path.clone(),
        ))
    }

    /// Start address tracking, then load the routed contact (if any).
    ///
    /// Tracking starts before the fetch is awaited, so it is on even if the
    /// returned future is dropped, and a loaded address settles like an edit.
    /// A missing record is not an error: the form stays in create mode. A
    /// store failure also leaves create-mode defaults, but is recorded and
    /// returned.
    pub async fn initialize<R>(&mut self, route: &R) -> EditorResult<EditMode>
    where
        R: RouteParameterSource + ?Sized,
    {
        if self.initialized {
            return Err(EditorError::AlreadyInitialized);
        }
        self.initialized = true;
        self.form.start_address_tracking();

        match ContactId::from_route(route.contact_id()) {
            None => tracing::info!("Editing new contact"),
            Some(id) => self.load(id).await?,
        }

        Ok(self.mode.clone())
    }

    async fn load(&mut self, id: ContactId) -> EditorResult<()> {
        tracing::debug!(%id, "Fetching contact");

        match self.store.fetch(&id).await {
            Ok(Some(contact)) => {
                tracing::info!(%id, phones = contact.phones.len(), "Contact loaded");
                self.form.apply_loaded(Some(contact), Instant::now());
                self.mode = EditMode::Edit(id);
                Ok(())
            }
            Ok(None) => {
                tracing::info!(%id, "Contact not found; editing new contact instead");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(%id, "Failed to load contact: {}", e);
                self.last_error = Some(e.to_string());
                Err(EditorError::StoreUnavailable(e))
            }
        }
    }

    /// Persist the complete form value and return to the contact list.
    ///
    /// Navigation happens only after the store acknowledges the save. There
    /// is no retry.
    pub async fn save(&mut self) -> EditorResult<()> {
        let contact = self.form.raw_value();
        if !self.form.is_valid() {
            tracing::debug!(
                invalid = self.form.validation_summary().len(),
                "Saving contact with validation errors"
            );
        }

        match self.store.persist(&contact).await {
            Ok(()) => {
                tracing::info!(id = %contact.id, "Contact saved");
                self.last_error = None;
                self.navigator.go_to(&self.contact_list_path);
                Ok(())
            }
            Err(e) => {
                tracing::error!(id = %contact.id, "Failed to save contact: {}", e);
                self.last_error = Some(e.to_string());
                Err(EditorError::PersistFailed(e))
            }
        }
    }

    /// Apply one user edit now.
    pub fn apply(&mut self, edit: FieldEdit) -> Result<(), FormError> {
        self.form.apply(edit, Instant::now())
    }

    /// Fire any timer that is already due.
    pub fn poll_timers(&mut self) -> Option<AddressState> {
        self.form.poll_timers(Instant::now())
    }

    /// Wait for the pending address settling window, then fire it.
    ///
    /// Returns immediately with `None` if nothing is pending.
    pub async fn settle(&mut self) -> Option<AddressState> {
        let deadline = self.form.next_deadline()?;
        tokio::time::sleep_until(deadline).await;
        self.form.poll_timers(Instant::now())
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ContactForm {
        &mut self.form
    }

    pub fn mode(&self) -> &EditMode {
        &self.mode
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Message of the most recent load or save failure, cleared by a successful save.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

impl std::fmt::Debug for ContactEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactEditor")
            .field("mode", &self.mode)
            .field("initialized", &self.initialized)
            .field("contact_list_path", &self.contact_list_path)
            .field("last_error", &self.last_error)
            .finish()
    }
}
