pub mod connection;
pub mod error;
pub mod repositories;
pub mod schema;

pub use connection::sqlite_pool::connect;
pub use error::{DbError, Result};
pub use repositories::identity_repository::IdentityRepository;
pub use schema::{RETIRED_INDEXES, SCHEMA, SchemaObject, migrate};
