use std::collections::HashMap;

use subtle::ConstantTimeEq;

use crate::auth::authenticator::Authenticator;
use crate::auth::credentials::{BasicCredentials, Principal};

/// Authenticator that checks credentials against a fixed in-memory user table.
#[derive(Debug, Default, Clone)]
pub struct MemoryAuthenticator {
    users: HashMap<String, String>,
}

impl MemoryAuthenticator {
    /// Creates an authenticator that accepts nobody.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an authenticator from `(username, password)` pairs.
    pub fn with_users<I, U, P>(users: I) -> Self
    where
        I: IntoIterator<Item = (U, P)>,
        U: Into<String>,
        P: Into<String>,
    {
        Self {
            users: users
                .into_iter()
                .map(|(username, password)| (username.into(), password.into()))
                .collect(),
        }
    }
}

impl Authenticator for MemoryAuthenticator {
    fn authenticate(&self, credentials: &BasicCredentials) -> Option<Principal> {
        let password = self.users.get(&credentials.username)?;
        passwords_match(password, &credentials.password).then(|| Principal::from(credentials))
    }
}

/// Compares passwords in time independent of where they first differ.
fn passwords_match(expected: &str, given: &str) -> bool {
    expected.as_bytes().ct_eq(given.as_bytes()).into()
}
