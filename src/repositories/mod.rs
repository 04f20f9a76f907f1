mod http_contact_store;
mod in_memory_contact_store;
mod traits;

pub use http_contact_store::HttpContactStore;
pub use in_memory_contact_store::InMemoryContactStore;
pub use traits::ContactStore;
