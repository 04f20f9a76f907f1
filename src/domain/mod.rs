//! Domain value objects.
//!
//! Type-safe wrappers that validate at construction time so that an invalid
//! identifier can never reach a collaborator.

pub mod contact_id;
pub mod errors;

pub use contact_id::ContactId;
pub use errors::ValidationError;
