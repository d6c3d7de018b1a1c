use crate::domain::auth::models::User;

/// Flatten a user's role associations into the set of role names.
///
/// Pure and infallible. The result is sorted so it is deterministic
/// regardless of the order the store returned the associations in, and
/// deduplicated to give set semantics.
pub fn resolve_roles(user: &User) -> Vec<String> {
    let mut names: Vec<String> = user.roles.iter().map(|role| role.name.clone()).collect();
    names.sort_unstable();
    names.dedup();
    names
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::auth::models::EmailAddress;
    use crate::domain::auth::models::Role;
    use crate::domain::auth::models::UserId;
    use crate::domain::auth::models::Username;

    fn user_with_roles(names: &[&str]) -> User {
        User {
            id: UserId::new(),
            username: Username::new("ana".to_string()).unwrap(),
            email: EmailAddress::new("ana@x.com".to_string()).unwrap(),
            password_hash: "$argon2id$test".to_string(),
            active: true,
            created_at: Utc::now(),
            roles: names
                .iter()
                .map(|name| Role {
                    name: name.to_string(),
                    description: String::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_resolve_roles_is_sorted() {
        let user = user_with_roles(&["recepcion", "admin", "medico"]);
        assert_eq!(resolve_roles(&user), vec!["admin", "medico", "recepcion"]);
    }

    #[test]
    fn test_resolve_roles_dedups() {
        let user = user_with_roles(&["admin", "admin"]);
        assert_eq!(resolve_roles(&user), vec!["admin"]);
    }

    #[test]
    fn test_resolve_roles_empty() {
        let user = user_with_roles(&[]);
        assert!(resolve_roles(&user).is_empty());
    }
}
