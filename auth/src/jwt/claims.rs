use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Claims carried by an access token.
///
/// The role set is captured at issuance time. A token keeps the roles it was
/// minted with until it expires; role changes only take effect on refresh.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccessClaims {
    /// Subject: user identifier
    pub sub: Uuid,

    /// Email address of the subject
    pub email: String,

    /// Role names held by the subject at issuance
    pub roles: Vec<String>,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl AccessClaims {
    /// Build access claims expiring `ttl` from now.
    pub fn new(user_id: Uuid, email: String, roles: Vec<String>, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            email,
            roles,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }
}

/// Claims carried by a refresh token.
///
/// Deliberately minimal: the subject id and nothing else, so a leaked
/// refresh token reveals neither email nor roles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RefreshClaims {
    /// Subject: user identifier
    pub sub: Uuid,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl RefreshClaims {
    /// Build refresh claims expiring `ttl` from now.
    pub fn new(user_id: Uuid, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_claims_ttl() {
        let claims = AccessClaims::new(
            Uuid::new_v4(),
            "ana@clinica.com".to_string(),
            vec!["admin".to_string()],
            Duration::hours(1),
        );

        assert_eq!(claims.exp - claims.iat, 60 * 60);
    }

    #[test]
    fn test_refresh_claims_ttl() {
        let claims = RefreshClaims::new(Uuid::new_v4(), Duration::days(7));

        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
    }

    #[test]
    fn test_refresh_claims_expose_only_subject() {
        let user_id = Uuid::new_v4();
        let claims = RefreshClaims::new(user_id, Duration::days(7));

        let value = serde_json::to_value(&claims).expect("Failed to serialize claims");
        let object = value.as_object().expect("Claims should serialize to a map");

        let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["exp", "iat", "sub"]);
        assert_eq!(object["sub"], serde_json::json!(user_id));
    }
}
