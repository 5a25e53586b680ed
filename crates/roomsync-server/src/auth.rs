use async_trait::async_trait;
use roomsync_protocol::{Credentials, Verb};

use crate::error::{ServerError, ServerResult};

/// Decision of the access gate for one request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny,
}

/// Authorization check evaluated before every operation.
///
/// `Ok(Access::Deny)` is a clean rejection (401). `Err(_)` means the gate
/// itself failed and is reported as a server fault (500).
#[async_trait]
pub trait AccessGate: Send + Sync {
    async fn evaluate(&self, credentials: &Credentials, verb: Verb) -> ServerResult<Access>;
}

/// Allows every request.
pub struct AllowAll;

#[async_trait]
impl AccessGate for AllowAll {
    async fn evaluate(&self, _credentials: &Credentials, _verb: Verb) -> ServerResult<Access> {
        Ok(Access::Allow)
    }
}

/// Allows reads from anyone and writes only with a matching bearer token.
pub struct BearerTokenGate {
    token: String,
}

impl BearerTokenGate {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }
}

#[async_trait]
impl AccessGate for BearerTokenGate {
    async fn evaluate(&self, credentials: &Credentials, verb: Verb) -> ServerResult<Access> {
        if self.token.is_empty() {
            return Err(ServerError::GateFault("bearer gate configured with an empty token".into()));
        }
        let access = match (verb, credentials) {
            (Verb::Read, _) => Access::Allow,
            (Verb::Write, Credentials::Bearer(token)) if *token == self.token => Access::Allow,
            (Verb::Write, _) => Access::Deny,
        };
        Ok(access)
    }
}

/// Parse the `Authorization` header and run the gate.
///
/// A header that cannot be parsed is a gate fault, not a denial.
pub async fn authorize(
    gate: &dyn AccessGate,
    authorization: Option<&[u8]>,
    verb: Verb,
) -> ServerResult<()> {
    let credentials = Credentials::from_header(authorization)?;
    match gate.evaluate(&credentials, verb).await? {
        Access::Allow => Ok(()),
        Access::Deny => {
            tracing::warn!(%verb, authenticated = credentials.is_authenticated(), "access denied");
            Err(ServerError::Unauthorized { verb: verb.to_string() })
        }
    }
}
