use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::auth::errors::EmailError;
use crate::domain::auth::errors::UsernameError;
use crate::domain::auth::roles::resolve_roles;

/// User identity record with its resolved role associations.
///
/// Lookups always return the roles alongside the user (a single fetch, not a
/// later join) because every downstream use needs them for the role claim.
/// The password hash is read only for verification and is stripped from
/// every value returned to a caller.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub roles: Vec<Role>,
}

/// Named capability group. Created administratively, outside this
/// subsystem's write path; only the name matters here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub name: String,
    pub description: String,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Ensures username is 3-32 characters and contains only alphanumeric, underscore, and hyphen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 32;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 3 characters
    /// * `TooLong` - Username longer than 32 characters
    /// * `InvalidCharacters` - Contains non-alphanumeric characters (except _ and -)
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let username = Self::with_valid_length(username)?;
        let username = Self::with_valid_chars(username)?;
        Ok(Self(username))
    }

    fn with_valid_length(username: String) -> Result<String, UsernameError> {
        // Counted in characters, matching the error messages; byte length
        // would misreport multibyte usernames.
        let length = username.chars().count();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(username)
        }
    }

    fn with_valid_chars(username: String) -> Result<String, UsernameError> {
        if username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            Ok(username)
        } else {
            Err(UsernameError::InvalidCharacters)
        }
    }

    /// Get username as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Record handed to the credential store on registration.
///
/// Carries the already-hashed secret; the plaintext never reaches the store.
#[derive(Debug)]
pub struct NewUser {
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
}

/// Command to register a new user with validated fields.
#[derive(Debug)]
pub struct RegisterCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub password: String,
}

impl RegisterCommand {
    pub fn new(username: Username, email: EmailAddress, password: String) -> Self {
        Self {
            username,
            email,
            password,
        }
    }
}

/// Command to authenticate with username and password.
#[derive(Debug)]
pub struct LoginCommand {
    pub username: Username,
    pub password: String,
}

impl LoginCommand {
    pub fn new(username: Username, password: String) -> Self {
        Self { username, password }
    }
}

/// Public projection of a user: what register and login return.
///
/// Built from a `User` by dropping the password hash and flattening roles to
/// names. There is no way to smuggle the hash through this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub roles: Vec<String>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            roles: resolve_roles(user),
        }
    }
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: UserProfile,
    pub access_token: String,
    pub refresh_token: String,
}

/// Result of a successful refresh. Only a new access token; the refresh
/// token is not rotated and stays valid until its own expiry.
#[derive(Debug, Clone)]
pub struct RefreshOutcome {
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rejects_short_and_long() {
        assert!(matches!(
            Username::new("ab".to_string()),
            Err(UsernameError::TooShort { .. })
        ));
        assert!(matches!(
            Username::new("a".repeat(33)),
            Err(UsernameError::TooLong { .. })
        ));
    }

    #[test]
    fn test_username_length_counts_characters_not_bytes() {
        // 20 characters but 40 bytes; must be accepted.
        assert!(Username::new("á".repeat(20)).is_ok());
        assert!(Username::new("á".repeat(32)).is_ok());

        let result = Username::new("á".repeat(33));
        assert!(
            matches!(result, Err(UsernameError::TooLong { actual: 33, .. })),
            "expected TooLong with character count, got {:?}",
            result
        );
    }

    #[test]
    fn test_username_rejects_invalid_chars() {
        assert!(matches!(
            Username::new("ana maria".to_string()),
            Err(UsernameError::InvalidCharacters)
        ));
        assert!(Username::new("ana_maria-1".to_string()).is_ok());
    }

    #[test]
    fn test_email_validation() {
        assert!(EmailAddress::new("ana@x.com".to_string()).is_ok());
        assert!(EmailAddress::new("not-an-email".to_string()).is_err());
    }

    #[test]
    fn test_user_profile_strips_password_hash() {
        let user = User {
            id: UserId::new(),
            username: Username::new("ana".to_string()).unwrap(),
            email: EmailAddress::new("ana@x.com".to_string()).unwrap(),
            password_hash: "$argon2id$secret".to_string(),
            active: true,
            created_at: Utc::now(),
            roles: vec![Role {
                name: "medico".to_string(),
                description: "Clinical staff".to_string(),
            }],
        };

        let profile = UserProfile::from(&user);
        assert_eq!(profile.username, "ana");
        assert_eq!(profile.email, "ana@x.com");
        assert_eq!(profile.roles, vec!["medico".to_string()]);
    }
}
