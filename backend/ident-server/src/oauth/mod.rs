pub mod coordinator;
pub mod error;
pub mod google;
pub mod provider;

pub use coordinator::{BeginAuth, CallbackQuery, CompletedAuth, FailedAuth, OAuthCoordinator};
pub use error::{OAuthError, Result};
pub use google::GoogleProvider;
pub use provider::{IdentityProvider, ProviderAssertion};
