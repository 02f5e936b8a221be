use std::fmt::Debug;
use std::sync::Arc;

use http::header::{AUTHORIZATION, COOKIE};
use tonic::metadata::MetadataMap;

use crate::auth::credentials::{BasicCredentials, Principal};

/// Trait for authenticating callers from various sources.
pub trait Authenticator: Debug {
    /// Verifies a username and password pair.
    ///
    /// # Arguments
    ///
    /// * `credentials` - The decoded credentials presented by the caller
    ///
    /// # Returns
    ///
    /// A `Principal` if authentication succeeds, `None` otherwise.
    fn authenticate(&self, credentials: &BasicCredentials) -> Option<Principal>;

    /// Authenticates from gRPC metadata.
    ///
    /// Extracts the credentials from either the Authorization header or
    /// from an `authorization` cookie and attempts to authenticate them.
    ///
    /// # Arguments
    ///
    /// * `metadata` - The gRPC metadata map containing authentication headers
    ///
    /// # Returns
    ///
    /// A `Principal` if authentication succeeds, `None` otherwise.
    fn authenticate_metadata(&self, metadata: &MetadataMap) -> Option<Principal> {
        let authorization: String = metadata
            .get(AUTHORIZATION.as_str())
            .and_then(|value| value.to_str().ok().map(ToString::to_string))
            .or_else(|| {
                metadata
                    .get_all(COOKIE.as_str())
                    .iter()
                    .find_map(|header_value| {
                        cookie::Cookie::split_parse(header_value.to_str().ok()?)
                            .filter_map(Result::ok)
                            .find(|cookie| cookie.name() == AUTHORIZATION.as_str())
                            .map(|cookie| cookie.value().to_string())
                    })
            })?;
        self.authenticate_authorization(&authorization)
    }

    /// Authenticates an authorization value.
    ///
    /// Parses the `Basic <base64(user:password)>` format and verifies the
    /// decoded credentials.
    ///
    /// # Returns
    ///
    /// A `Principal` if authentication succeeds, `None` otherwise.
    fn authenticate_authorization(&self, authorization: &str) -> Option<Principal> {
        let credentials = BasicCredentials::parse_authorization(authorization)?;
        self.authenticate(&credentials)
    }
}

/// Thread-safe shared reference to an authenticator.
pub type AuthenticatorArc = Arc<dyn Authenticator + Send + Sync>;
