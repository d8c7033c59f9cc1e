//! Authentication exchange — the boundary a real backend client would fill.
//!
//! The session store never talks to the network itself; it hands credentials
//! to an `AuthExchange` and gets back a token plus enough identity data to
//! construct a `UserProfile`. The shipped implementation is a mock with
//! simulated latency; swapping in a real HTTP client changes nothing on the
//! store side.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;

use crate::error::ExchangeError;
use crate::session::model::{AuthMode, Credentials};

/// What a successful exchange hands back.
#[derive(Debug, Clone)]
pub struct AuthGrant {
    /// Bearer token authorizing the session.
    pub token: String,
    pub user: UserSeed,
}

/// Identity data the exchange returns, enough to mint a `UserProfile`.
#[derive(Debug, Clone)]
pub struct UserSeed {
    /// Stable account identifier, generated server-side at creation.
    pub id: String,
    pub email: String,
    pub name: String,
}

/// The authentication service the session store talks to.
#[async_trait]
pub trait AuthExchange: Send + Sync {
    /// Exchange credentials for a grant. Inputs arrive already validated by
    /// the store.
    async fn authenticate(
        &self,
        credentials: &Credentials,
        mode: AuthMode,
    ) -> Result<AuthGrant, ExchangeError>;
}

/// Mock exchange standing in for the real backend.
///
/// There is no account database behind it: every call mints a fresh token
/// and user id in the same shapes the backend would return. Login has no
/// stored display name to look up, so it answers with a placeholder.
pub struct MockAuthExchange {
    latency: Duration,
    outage: Option<String>,
}

impl MockAuthExchange {
    pub fn new() -> Self {
        Self {
            latency: Duration::from_millis(50),
            outage: None,
        }
    }

    /// Override the simulated network latency.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Make every call fail with `ExchangeError::Unavailable`, for
    /// error-path tests.
    pub fn with_outage(mut self, message: impl Into<String>) -> Self {
        self.outage = Some(message.into());
        self
    }
}

impl Default for MockAuthExchange {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthExchange for MockAuthExchange {
    async fn authenticate(
        &self,
        credentials: &Credentials,
        mode: AuthMode,
    ) -> Result<AuthGrant, ExchangeError> {
        tokio::time::sleep(self.latency).await;

        if let Some(message) = &self.outage {
            return Err(ExchangeError::Unavailable(message.clone()));
        }

        let token = format!("mock-jwt-{}", Utc::now().timestamp_millis());
        let id = format!("user-{}", random_base36(9));
        let name = match mode {
            AuthMode::Login => "Existing User".to_string(),
            AuthMode::Signup => credentials.name.clone().unwrap_or_default(),
        };

        Ok(AuthGrant {
            token,
            user: UserSeed {
                id,
                email: credentials.email.clone(),
                name,
            },
        })
    }
}

fn random_base36(len: usize) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}
