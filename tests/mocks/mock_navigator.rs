use contact_form::navigation::Navigator;
use std::sync::{Arc, Mutex};

/// Navigator that remembers every path it was sent to.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct RecordingNavigator {
    visits: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visits(&self) -> Vec<String> {
        self.visits.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.visits.lock().unwrap().len()
    }
}

impl Navigator for RecordingNavigator {
    fn go_to(&self, path: &str) {
        self.visits.lock().unwrap().push(path.to_string());
    }
}
