pub mod oauth;
pub mod status_response;
