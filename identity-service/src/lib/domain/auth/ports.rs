use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::LoginOutcome;
use crate::domain::auth::models::NewUser;
use crate::domain::auth::models::RefreshOutcome;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;
use crate::domain::auth::models::UserProfile;
use crate::domain::auth::models::Username;

/// Port for the authentication orchestration service.
#[async_trait]
pub trait AuthPort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Errors
    /// * `UsernameTaken` / `EmailTaken` - Field already registered, including
    ///   a creation race lost against a concurrent registration
    /// * `StoreUnavailable` - Credential store failed to respond
    async fn register(&self, command: RegisterCommand) -> Result<UserProfile, AuthError>;

    /// Authenticate a user and issue access and refresh tokens.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username, wrong password, or disabled
    ///   account; the cases are indistinguishable to the caller
    /// * `StoreUnavailable` - Credential store failed to respond
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, AuthError>;

    /// Exchange a refresh token for a new access token.
    ///
    /// Roles are re-resolved from current state; this is the one point where
    /// role staleness is corrected.
    ///
    /// # Errors
    /// * `InvalidRefresh` - Expired, tampered, malformed token, or the user
    ///   no longer exists; the cases are indistinguishable to the caller
    /// * `StoreUnavailable` - Credential store failed to respond
    async fn refresh(&self, refresh_token: &str) -> Result<RefreshOutcome, AuthError>;
}

/// Persistence contract for user credentials and role associations.
///
/// Every lookup returns the user together with its resolved roles in a
/// single fetch. Uniqueness of username and email is enforced by the store
/// itself (unique constraints); the orchestrator's existence checks are a
/// fast path only.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Retrieve a user with roles by identifier.
    ///
    /// # Errors
    /// * `StoreUnavailable` - Store operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AuthError>;

    /// Retrieve a user with roles by email address.
    ///
    /// # Errors
    /// * `StoreUnavailable` - Store operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;

    /// Retrieve a user with roles by username.
    ///
    /// # Errors
    /// * `StoreUnavailable` - Store operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, AuthError>;

    /// Persist a new user record.
    ///
    /// # Errors
    /// * `UsernameTaken` / `EmailTaken` - Unique constraint violated
    /// * `StoreUnavailable` - Store operation failed
    async fn create(&self, new_user: NewUser) -> Result<User, AuthError>;
}
