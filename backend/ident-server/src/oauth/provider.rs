use crate::oauth::Result as OAuthResult;

use async_trait::async_trait;

/// What the provider vouches for after a successful code exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderAssertion {
    /// Stable subject id at the provider
    pub subject: String,
    /// Verified email; None when withheld or unverified
    pub email: Option<String>,
    pub name: Option<String>,
}

/// An external identity provider reachable by the authorization-code flow
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Route segment, e.g. `google` in `/auth/google`
    fn name(&self) -> &str;

    /// Where to send the browser to start a login bound to `state`
    fn authorization_url(&self, state: &str) -> String;

    /// Trade an authorization code for the user's assertion.
    /// Implementations bound their own network time.
    async fn exchange(&self, code: &str) -> OAuthResult<ProviderAssertion>;
}
