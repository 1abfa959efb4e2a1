use serde::Deserialize;

/// Body of `POST /signup`
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}
