// Storage integration tests

mod test_persistence;
