use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde::Serialize;

use super::errors::TokenError;

/// Signs and verifies bearer tokens.
///
/// Generic over the claims type so access and refresh tokens can carry
/// different payloads. Uses HS256 (HMAC with SHA-256) with a process-wide
/// secret loaded once at startup; rotating the secret invalidates every
/// outstanding token.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenService {
    /// Create a new token service from the signing secret.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    /// - The secret must never appear in logs or in any claims payload
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Sign claims into a token string.
    ///
    /// The claims carry their own `iat`/`exp`; this only wraps them in the
    /// signed envelope.
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn sign<T: Serialize>(&self, claims: &T) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }

    /// Verify a token and return its claims.
    ///
    /// Rejects tampered signatures, expired tokens, and structurally
    /// malformed envelopes. The cause is intentionally not distinguishable
    /// from the returned error; exposing it would hand an attacker an
    /// oracle.
    ///
    /// # Errors
    /// * `Rejected` - Signature mismatch, expiry passed, or malformed token
    pub fn verify<T: for<'de> Deserialize<'de>>(&self, token: &str) -> Result<T, TokenError> {
        let validation = Validation::new(self.algorithm);

        let token_data =
            decode::<T>(token, &self.decoding_key, &validation).map_err(|_| TokenError::Rejected)?;

        Ok(token_data.claims)
    }

    /// Decode a token without verifying the signature.
    ///
    /// # Security Warning
    /// This does NOT validate the token. Only use it to inspect what a token
    /// *claims* to be, e.g. for logging a rejected token's subject. Never
    /// authorize an action based on its output.
    ///
    /// # Errors
    /// * `Rejected` - Token format is invalid
    pub fn decode_unverified<T: for<'de> Deserialize<'de>>(
        &self,
        token: &str,
    ) -> Result<T, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;

        let token_data =
            decode::<T>(token, &self.decoding_key, &validation).map_err(|_| TokenError::Rejected)?;

        Ok(token_data.claims)
    }
}
