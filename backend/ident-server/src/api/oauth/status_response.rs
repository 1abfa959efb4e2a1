use serde::Serialize;

/// Body of `GET /auth/status`
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub logged_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
