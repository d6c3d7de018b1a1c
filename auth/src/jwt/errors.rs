use thiserror::Error;

/// Error type for token operations.
///
/// Verification failures deliberately collapse to a single `Rejected`
/// variant: callers must not be able to distinguish a bad signature from an
/// expired or malformed token.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Token rejected")]
    Rejected,
}
