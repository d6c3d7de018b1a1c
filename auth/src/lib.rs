//! Authentication utilities library
//!
//! Provides the credential-handling infrastructure for the clinic back end:
//! - Password hashing (Argon2id)
//! - Bearer token signing and verification with typed claims
//!
//! The identity service defines its own domain ports and adapts these
//! implementations. Keeping this crate free of persistence and HTTP concerns
//! lets other services reuse it without dragging in the whole stack.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let digest = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &digest));
//! assert!(!hasher.verify("wrong_password", &digest));
//! ```
//!
//! ## Bearer Tokens
//! ```
//! use auth::{AccessClaims, TokenService};
//! use chrono::Duration;
//! use uuid::Uuid;
//!
//! let tokens = TokenService::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = AccessClaims::new(
//!     Uuid::new_v4(),
//!     "ana@clinica.com".to_string(),
//!     vec!["medico".to_string()],
//!     Duration::hours(1),
//! );
//! let token = tokens.sign(&claims).unwrap();
//! let decoded: AccessClaims = tokens.verify(&token).unwrap();
//! assert_eq!(decoded.roles, vec!["medico".to_string()]);
//! ```

pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use jwt::AccessClaims;
pub use jwt::RefreshClaims;
pub use jwt::TokenError;
pub use jwt::TokenService;
pub use password::PasswordError;
pub use password::PasswordHasher;
