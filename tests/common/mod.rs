// Common test utilities and fixtures

pub mod fixtures;
pub mod helpers;

// Re-export commonly used items
// Note: each integration test binary uses a different subset
#[allow(unused_imports)]
pub use fixtures::TestTree;
#[allow(unused_imports)]
pub use helpers::{create_test_services, create_test_store, index_tree, names_of};
