use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::NewUser;
use crate::domain::auth::models::Role;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;
use crate::domain::auth::models::Username;
use crate::domain::auth::ports::CredentialStore;

/// Postgres-backed credential store.
///
/// Lookups resolve the user's roles in the same round trip via a LEFT JOIN
/// through `user_roles`; one user row per role association, collapsed here.
pub struct PostgresCredentialStore {
    pool: PgPool,
}

const FIND_BY_ID: &str = r#"
SELECT u.id, u.username, u.email, u.password_hash, u.active, u.created_at,
       r.name AS role_name, r.description AS role_description
FROM users u
LEFT JOIN user_roles ur ON ur.user_id = u.id
LEFT JOIN roles r ON r.id = ur.role_id
WHERE u.id = $1
"#;

const FIND_BY_EMAIL: &str = r#"
SELECT u.id, u.username, u.email, u.password_hash, u.active, u.created_at,
       r.name AS role_name, r.description AS role_description
FROM users u
LEFT JOIN user_roles ur ON ur.user_id = u.id
LEFT JOIN roles r ON r.id = ur.role_id
WHERE u.email = $1
"#;

const FIND_BY_USERNAME: &str = r#"
SELECT u.id, u.username, u.email, u.password_hash, u.active, u.created_at,
       r.name AS role_name, r.description AS role_description
FROM users u
LEFT JOIN user_roles ur ON ur.user_id = u.id
LEFT JOIN roles r ON r.id = ur.role_id
WHERE u.username = $1
"#;

const INSERT_USER: &str = r#"
INSERT INTO users (id, username, email, password_hash, active, created_at)
VALUES ($1, $2, $3, $4, $5, $6)
"#;

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Collapse the joined rows for a single user into a User-with-roles.
    fn collect_user(rows: Vec<PgRow>) -> Result<Option<User>, AuthError> {
        let Some(first) = rows.first() else {
            return Ok(None);
        };

        let id: Uuid = first.try_get("id").map_err(store_error)?;
        let username: String = first.try_get("username").map_err(store_error)?;
        let email: String = first.try_get("email").map_err(store_error)?;
        let password_hash: String = first.try_get("password_hash").map_err(store_error)?;
        let active: bool = first.try_get("active").map_err(store_error)?;
        let created_at: DateTime<Utc> = first.try_get("created_at").map_err(store_error)?;

        let mut roles = Vec::new();
        for row in &rows {
            let role_name: Option<String> = row.try_get("role_name").map_err(store_error)?;
            if let Some(name) = role_name {
                let description: Option<String> =
                    row.try_get("role_description").map_err(store_error)?;
                roles.push(Role {
                    name,
                    description: description.unwrap_or_default(),
                });
            }
        }

        Ok(Some(User {
            id: UserId(id),
            username: Username::new(username)?,
            email: EmailAddress::new(email)?,
            password_hash,
            active,
            created_at,
            roles,
        }))
    }
}

/// Any store-side failure other than a unique violation surfaces as
/// unavailable; it is never conflated with "not found".
fn store_error(e: sqlx::Error) -> AuthError {
    AuthError::StoreUnavailable(e.to_string())
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AuthError> {
        let rows = sqlx::query(FIND_BY_ID)
            .bind(id.0)
            .fetch_all(&self.pool)
            .await
            .map_err(store_error)?;

        Self::collect_user(rows)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let rows = sqlx::query(FIND_BY_EMAIL)
            .bind(email)
            .fetch_all(&self.pool)
            .await
            .map_err(store_error)?;

        Self::collect_user(rows)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, AuthError> {
        let rows = sqlx::query(FIND_BY_USERNAME)
            .bind(username.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(store_error)?;

        Self::collect_user(rows)
    }

    async fn create(&self, new_user: NewUser) -> Result<User, AuthError> {
        let id = UserId::new();
        let created_at = Utc::now();

        sqlx::query(INSERT_USER)
            .bind(id.0)
            .bind(new_user.username.as_str())
            .bind(new_user.email.as_str())
            .bind(&new_user.password_hash)
            .bind(true)
            .bind(created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_unique_violation() {
                        if db_err.constraint() == Some("users_username_key") {
                            return AuthError::UsernameTaken(
                                new_user.username.as_str().to_string(),
                            );
                        }
                        if db_err.constraint() == Some("users_email_key") {
                            return AuthError::EmailTaken(new_user.email.as_str().to_string());
                        }
                    }
                }
                store_error(e)
            })?;

        Ok(User {
            id,
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            active: true,
            created_at,
            roles: Vec::new(),
        })
    }
}
