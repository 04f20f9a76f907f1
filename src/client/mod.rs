//! HTTP client for a REST contacts API.
//!
//! Synchronous (`ureq`); async callers go through
//! [`HttpContactStore`](crate::repositories::HttpContactStore), which runs each
//! call on tokio's blocking pool.
//!
//! Endpoints:
//! - `GET  {base}/contacts/{id}`: one contact, 404 when missing
//! - `POST {base}/contacts`: create (contact without id)
//! - `PUT  {base}/contacts/{id}`: update

use crate::config::Config;
use crate::domain::ContactId;
use crate::error::{StoreError, StoreResult};
use crate::models::Contact;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Clone)]
pub struct ContactsClient {
    /// Base URL of the contacts API
    base_url: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,
}

impl ContactsClient {
    /// Create a client from configuration.
    ///
    /// Returns `None` when no API URL is configured.
    pub fn from_config(config: &Config) -> Option<Self> {
        let base_url = config.contacts_api_url.clone()?;
        Some(Self::with_timeout(
            base_url,
            Duration::from_secs(config.request_timeout),
        ))
    }

    /// Create a client for `base_url` with the default 10s timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(10))
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            base_url: base_url.into(),
            agent: Arc::new(agent),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    fn contact_path(id: &str) -> String {
        format!("/contacts/{}", urlencoding::encode(id))
    }

    /// Get a single contact. A 404 is `Ok(None)`.
    pub fn get_contact(&self, id: &ContactId) -> StoreResult<Option<Contact>> {
        let start = Instant::now();
        let url = self.build_url(&Self::contact_path(id.as_str()));

        let result = self
            .agent
            .get(&url)
            .set("Accept", "application/json")
            .call();
        tracing::debug!("GET {} ({:?})", url, start.elapsed());

        match result {
            Ok(response) => {
                let body = response
                    .into_string()
                    .map_err(|e| StoreError::Unavailable(e.to_string()))?;
                if body.trim().is_empty() || body.trim() == "null" {
                    return Ok(None);
                }
                let contact: Contact = serde_json::from_str(&body)?;
                Ok(Some(contact))
            }
            Err(ureq::Error::Status(404, _)) => Ok(None),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Create or update a contact depending on whether it has an id.
    pub fn save_contact(&self, contact: &Contact) -> StoreResult<()> {
        let start = Instant::now();
        let body = serde_json::to_value(contact)?;

        let (method, url) = if contact.is_new() {
            ("POST", self.build_url("/contacts"))
        } else {
            ("PUT", self.build_url(&Self::contact_path(&contact.id)))
        };

        let result = self
            .agent
            .request(method, &url)
            .set("Content-Type", "application/json")
            .send_json(body);

        match result {
            Ok(response) => {
                tracing::debug!(
                    "{} {} - Success (status: {}, {:?})",
                    method,
                    url,
                    response.status(),
                    start.elapsed()
                );
                Ok(())
            }
            Err(e) => {
                let err = Self::map_error(e);
                tracing::error!("{} {} - Error: {:?}", method, url, err);
                Err(match err {
                    StoreError::Rejected { status, message } => {
                        StoreError::PersistFailed(format!("status {}: {}", status, message))
                    }
                    other => other,
                })
            }
        }
    }

    /// Map a ureq error to a StoreError.
    fn map_error(error: ureq::Error) -> StoreError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());
                StoreError::Rejected {
                    status: code,
                    message,
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::Io {
                    StoreError::Timeout
                } else {
                    StoreError::Unavailable(transport.to_string())
                }
            }
        }
    }
}

impl std::fmt::Debug for ContactsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactsClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}
