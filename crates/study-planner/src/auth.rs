//! Identity-provider port.
//!
//! Sign-in flows live with the external provider. This module only defines
//! the contract the app consumes and the injected view of who is signed in.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub uid: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Read access to the signed-in user, resolved once at the composition root.
pub trait AuthState: Send + Sync {
    fn current_user(&self) -> Option<UserIdentity>;

    fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }
}

/// Fixed auth state, for CLI runs and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticAuthState {
    user: Option<UserIdentity>,
}

impl StaticAuthState {
    pub fn signed_in(user: UserIdentity) -> Self {
        Self { user: Some(user) }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }
}

impl AuthState for StaticAuthState {
    fn current_user(&self) -> Option<UserIdentity> {
        self.user.clone()
    }
}

/// Operations delegated to the external identity provider.
pub trait IdentityProvider: Send + Sync {
    fn login(&self, email: &str, password: &str, remember_me: bool) -> Result<(), AuthError>;
    fn register(&self, name: &str, email: &str, password: &str) -> Result<(), AuthError>;
    fn reset_password(&self, email: &str) -> Result<(), AuthError>;
    fn logout(&self);
}

/// Provider failures, displayed as user-facing messages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("No account exists with this email")]
    UserNotFound,
    #[error("Incorrect password")]
    WrongPassword,
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("This account has been disabled")]
    UserDisabled,
    #[error("Too many attempts. Please try again later")]
    TooManyRequests,
    #[error("Incorrect email or password")]
    InvalidCredential,
    #[error("An account with this email already exists")]
    EmailAlreadyInUse,
    #[error("Password is too weak")]
    WeakPassword,
    #[error("Registration is temporarily unavailable")]
    OperationNotAllowed,
    #[error("Something went wrong: {0}")]
    Other(String),
}

impl AuthError {
    /// Maps a provider error code such as `auth/user-not-found`.
    pub fn from_code(code: &str) -> Self {
        match code.trim().trim_start_matches("auth/") {
            "user-not-found" => Self::UserNotFound,
            "wrong-password" => Self::WrongPassword,
            "invalid-email" => Self::InvalidEmail,
            "user-disabled" => Self::UserDisabled,
            "too-many-requests" => Self::TooManyRequests,
            "invalid-credential" => Self::InvalidCredential,
            "email-already-in-use" => Self::EmailAlreadyInUse,
            "weak-password" => Self::WeakPassword,
            "operation-not-allowed" => Self::OperationNotAllowed,
            other => Self::Other(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_provider_codes() {
        assert_eq!(AuthError::from_code("auth/user-not-found"), AuthError::UserNotFound);
        assert_eq!(
            AuthError::from_code("auth/too-many-requests"),
            AuthError::TooManyRequests
        );
        let disabled_signup = AuthError::from_code("auth/operation-not-allowed");
        assert_eq!(disabled_signup, AuthError::OperationNotAllowed);
        assert_eq!(
            disabled_signup.to_string(),
            "Registration is temporarily unavailable"
        );
        assert_eq!(
            AuthError::from_code("auth/network-request-failed"),
            AuthError::Other("network-request-failed".to_string())
        );
    }

    #[test]
    fn static_state_reports_user() {
        let state = StaticAuthState::signed_in(UserIdentity {
            uid: "u-1".to_string(),
            email: "ana@example.com".to_string(),
            display_name: None,
        });

        assert!(state.is_authenticated());
        assert!(!StaticAuthState::anonymous().is_authenticated());
    }
}
