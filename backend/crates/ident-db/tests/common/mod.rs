#![allow(dead_code)]

pub mod fixtures;
pub mod test_db;

pub use fixtures::{create_local_identity, create_oauth_identity};
pub use test_db::{STORE_TIMEOUT, count_identities, create_test_pool};
