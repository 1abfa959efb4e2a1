pub mod error;
pub mod extractors;
pub mod local;
pub mod oauth;
pub mod ping;
pub mod protected;
