use serde::Serialize;

pub const LOGIN_SUCCESS_MESSAGE: &str = "Successfully LoggedIn";

/// Body of a successful `POST /login`
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    /// Same token as the `jwt` cookie, for clients that send `Authorization`
    pub token: String,
}
