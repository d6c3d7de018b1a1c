use std::sync::Arc;

use async_trait::async_trait;
use auth::AccessClaims;
use auth::PasswordHasher;
use auth::RefreshClaims;
use auth::TokenService;
use chrono::Duration;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::LoginOutcome;
use crate::domain::auth::models::NewUser;
use crate::domain::auth::models::RefreshOutcome;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;
use crate::domain::auth::models::UserProfile;
use crate::domain::auth::ports::AuthPort;
use crate::domain::auth::ports::CredentialStore;
use crate::domain::auth::roles::resolve_roles;

/// Orchestrates registration, login, and refresh.
///
/// Each flow is request-scoped and stateless between requests; the only
/// process-wide state is the signing key inside `TokenService` and the TTLs,
/// all read-only after startup.
pub struct AuthService<CS>
where
    CS: CredentialStore,
{
    store: Arc<CS>,
    tokens: Arc<TokenService>,
    hasher: PasswordHasher,
    access_ttl: Duration,
    refresh_ttl: Duration,
    fallback_digest: String,
}

impl<CS> AuthService<CS>
where
    CS: CredentialStore,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// Hashes a throwaway secret once so that login against an unknown
    /// username can still run a full verification and cost the same as a
    /// wrong password.
    ///
    /// # Errors
    /// * `Internal` - Fallback digest could not be computed
    pub fn new(
        store: Arc<CS>,
        tokens: Arc<TokenService>,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Result<Self, AuthError> {
        let hasher = PasswordHasher::new();
        let fallback_digest = hasher
            .hash("fallback-credential-padding")
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(Self {
            store,
            tokens,
            hasher,
            access_ttl,
            refresh_ttl,
            fallback_digest,
        })
    }

    /// Run the CPU-bound hash on the blocking pool so one slow hash cannot
    /// stall unrelated requests on the async runtime.
    async fn hash_password(&self, password: String) -> Result<String, AuthError> {
        let hasher = self.hasher;
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    async fn verify_password(&self, password: String, digest: String) -> Result<bool, AuthError> {
        let hasher = self.hasher;
        tokio::task::spawn_blocking(move || hasher.verify(&password, &digest))
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    fn issue_access_token(&self, user: &User, roles: Vec<String>) -> Result<String, AuthError> {
        let claims = AccessClaims::new(
            user.id.0,
            user.email.as_str().to_string(),
            roles,
            self.access_ttl,
        );
        self.tokens
            .sign(&claims)
            .map_err(|e| AuthError::Internal(e.to_string()))
    }
}

#[async_trait]
impl<CS> AuthPort for AuthService<CS>
where
    CS: CredentialStore,
{
    async fn register(&self, command: RegisterCommand) -> Result<UserProfile, AuthError> {
        // Fast-path duplicate checks. The store's unique constraints remain
        // the actual race guard; losing the race surfaces the same error.
        if self
            .store
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(AuthError::EmailTaken(command.email.as_str().to_string()));
        }

        if self
            .store
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            return Err(AuthError::UsernameTaken(command.username.to_string()));
        }

        let password_hash = self.hash_password(command.password).await?;

        let user = self
            .store
            .create(NewUser {
                username: command.username,
                email: command.email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, "User registered");

        Ok(UserProfile::from(&user))
    }

    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, AuthError> {
        let user = self.store.find_by_username(&command.username).await?;

        let Some(user) = user else {
            // Burn a comparable verification so an unknown username costs
            // the same as a wrong password, then fail identically.
            let _ = self
                .verify_password(command.password, self.fallback_digest.clone())
                .await;
            return Err(AuthError::InvalidCredentials);
        };

        let matches = self
            .verify_password(command.password, user.password_hash.clone())
            .await?;

        if !matches || !user.active {
            return Err(AuthError::InvalidCredentials);
        }

        let roles = resolve_roles(&user);
        let access_token = self.issue_access_token(&user, roles)?;

        let refresh_claims = RefreshClaims::new(user.id.0, self.refresh_ttl);
        let refresh_token = self
            .tokens
            .sign(&refresh_claims)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(LoginOutcome {
            user: UserProfile::from(&user),
            access_token,
            refresh_token,
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<RefreshOutcome, AuthError> {
        // Expired, tampered, and malformed all collapse to the same kind.
        let claims: RefreshClaims = self
            .tokens
            .verify(refresh_token)
            .map_err(|_| AuthError::InvalidRefresh)?;

        // A deleted or disabled user is indistinguishable from a bad token.
        let user = self
            .store
            .find_by_id(&UserId(claims.sub))
            .await?
            .filter(|user| user.active)
            .ok_or(AuthError::InvalidRefresh)?;

        // Roles are re-resolved from current state; this is where role
        // staleness gets corrected.
        let roles = resolve_roles(&user);
        let access_token = self.issue_access_token(&user, roles)?;

        Ok(RefreshOutcome { access_token })
    }
}
