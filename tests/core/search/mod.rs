// Search integration tests

mod test_search;
