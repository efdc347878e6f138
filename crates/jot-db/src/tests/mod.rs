//! Database integration tests.
//!
//! All tests here need a running PostgreSQL (see
//! [`crate::test_fixtures::DEFAULT_TEST_DATABASE_URL`]) and are `#[ignore]`d
//! so the default suite runs without infrastructure. Run them with
//! `cargo test -p jot-db -- --ignored`.
