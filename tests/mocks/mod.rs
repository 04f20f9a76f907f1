pub mod mock_contact_store;
pub mod mock_navigator;

#[allow(unused_imports)]
pub use mock_contact_store::MockContactStore;
#[allow(unused_imports)]
pub use mock_navigator::RecordingNavigator;
