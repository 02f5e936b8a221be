use tonic::Status;

use crate::auth::authenticator::AuthenticatorArc;
use crate::pipeline::CallStage;
use crate::pipeline::call::CallContext;

/// Rejects calls that do not carry valid credentials.
///
/// On success the authenticated principal is attached to the call and made
/// available to handlers through the request extensions.
#[derive(Debug, Clone)]
pub struct AuthStage {
    authenticator: AuthenticatorArc,
}

impl AuthStage {
    pub fn new(authenticator: AuthenticatorArc) -> Self {
        Self { authenticator }
    }
}

impl CallStage for AuthStage {
    fn before(&self, call: &mut CallContext) -> Result<(), Status> {
        let principal = self
            .authenticator
            .authenticate_metadata(call.metadata())
            .ok_or_else(|| Status::unauthenticated("missing or invalid credentials"))?;
        call.set_principal(principal);
        Ok(())
    }
}
