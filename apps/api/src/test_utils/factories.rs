//! Test data factories for creating valid test fixtures.
//!
//! Each factory function creates a complete, valid object with sensible defaults.
//! Use the closure parameter to override specific fields as needed.

use chrono::NaiveDateTime;
use codegate_types::{AccessClaims, RefreshClaims, Role, TokenClaims, test_keys};

use crate::{application::jwt::unix_now, domain::entities::identity::Identity};

/// Create a registered test identity with sensible defaults.
pub fn create_test_identity(overrides: impl FnOnce(&mut Identity)) -> Identity {
    let mut identity = Identity {
        id: 1,
        email: Some("user@example.com".to_string()),
        role: Role::User,
        created_at: Some(test_datetime()),
    };
    overrides(&mut identity);
    identity
}

/// Create a guest identity: no email, guest role.
pub fn create_test_guest(id: i64) -> Identity {
    create_test_identity(|i| {
        i.id = id;
        i.email = None;
        i.role = Role::Guest;
    })
}

/// Sign an access token with the test key pair and an explicit expiry.
pub fn sign_access(sub: i64, role: Role, exp: i64) -> String {
    let email = (role == Role::User).then(|| "user@example.com".to_string());
    test_keys::signer()
        .sign(&TokenClaims::Access(AccessClaims {
            sub,
            email,
            role,
            iat: unix_now().min(exp - 1),
            exp,
        }))
        .unwrap()
}

/// Sign a refresh token with the test key pair and an explicit expiry.
pub fn sign_refresh(sub: i64, exp: i64) -> String {
    test_keys::signer()
        .sign(&TokenClaims::Refresh(RefreshClaims { sub, exp }))
        .unwrap()
}

fn test_datetime() -> NaiveDateTime {
    NaiveDateTime::parse_from_str("2024-01-15 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_identity_with_defaults() {
        let identity = create_test_identity(|_| {});
        assert_eq!(identity.email.as_deref(), Some("user@example.com"));
        assert_eq!(identity.role, Role::User);
    }

    #[test]
    fn test_create_guest() {
        let guest = create_test_guest(9);
        assert_eq!(guest.id, 9);
        assert_eq!(guest.role, Role::Guest);
        assert_eq!(guest.email, None);
    }

    #[test]
    fn test_signed_tokens_verify() {
        let access = test_keys::verifier()
            .verify(&sign_access(3, Role::Guest, unix_now() + 60))
            .unwrap()
            .into_access()
            .unwrap();
        assert_eq!(access.sub, 3);
        assert_eq!(access.email, None);

        let refresh = test_keys::verifier()
            .verify(&sign_refresh(3, unix_now() + 60))
            .unwrap()
            .into_refresh()
            .unwrap();
        assert_eq!(refresh.sub, 3);
    }
}
