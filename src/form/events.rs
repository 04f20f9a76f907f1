//! Form events and listener registration.

use serde::Serialize;
use std::fmt;

/// Something observable happened inside the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum FormEvent {
    /// A phone entry was appended at `index`
    PhoneAdded { index: usize },

    /// The phone number at `index` became (or stopped being) mandatory
    PhoneRequirementChanged { index: usize, required: bool },

    /// Address fields stopped requiring values while the user types
    AddressRelaxed,

    /// Address fields require values again after the settling window
    AddressEnforced,

    /// A stored contact was assigned to the form
    ValuesLoaded { phone_count: usize },
}

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&FormEvent) + Send>;

/// Registered listeners, called synchronously in subscription order.
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&FormEvent) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: FormEvent) {
        tracing::trace!(?event, listeners = self.listeners.len(), "Form event");
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_emit_reaches_subscribers_until_unsubscribed() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();

        let sink = seen.clone();
        let id = bus.subscribe(move |event| sink.lock().unwrap().push(event.clone()));

        bus.emit(FormEvent::AddressRelaxed);
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.emit(FormEvent::AddressEnforced);

        assert_eq!(*seen.lock().unwrap(), vec![FormEvent::AddressRelaxed]);
        assert!(bus.is_empty());
    }

    #[test]
    fn test_event_serialization() {
        let json = serde_json::to_value(FormEvent::PhoneRequirementChanged {
            index: 1,
            required: true,
        })
        .unwrap();
        assert_eq!(json["event"], "phoneRequirementChanged");
        assert_eq!(json["index"], 1);
    }
}
