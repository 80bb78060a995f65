//! Credential validation.

use crate::action::ActionHost;
use crate::action::env::{BUDDY_API_ENDPOINT, BUDDY_TOKEN};
use crate::error::{ActionError, Result};

/// Credentials exported by the login step.
///
/// The token stays in the environment for `bdy` to read; only the endpoint is kept.
#[derive(Debug, Clone)]
pub struct Credentials {
    endpoint: String,
}

impl Credentials {
    /// API endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Check that `BUDDY_TOKEN` and `BUDDY_API_ENDPOINT` are set.
///
/// The token is registered as a secret before anything else is printed.
///
/// # Errors
///
/// * `MissingCredential` - naming the first missing variable, token first
pub fn check_buddy_credentials(host: &ActionHost) -> Result<Credentials> {
    let env = host.env();

    let token = env.get(BUDDY_TOKEN).ok_or_else(|| ActionError::MissingCredential {
        name: BUDDY_TOKEN.to_string(),
    })?;
    let endpoint = env
        .get(BUDDY_API_ENDPOINT)
        .ok_or_else(|| ActionError::MissingCredential {
            name: BUDDY_API_ENDPOINT.to_string(),
        })?;

    host.set_secret(token);
    host.info("Buddy credentials found");

    Ok(Credentials {
        endpoint: endpoint.to_string(),
    })
}
