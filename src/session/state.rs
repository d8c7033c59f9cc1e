//! Session state — the in-memory pairing of identity and credential.

use crate::session::model::{SessionRecord, UserProfile};

/// Observable session state.
///
/// `user` and `token` are only ever set or cleared together, through
/// [`establish`](Self::establish) and
/// [`clear_authentication`](Self::clear_authentication), so
/// `is_authenticated()` can never report a token without the identity it
/// authorizes. `is_loading` and `error` are transient and never persisted.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub user: Option<UserProfile>,
    pub token: Option<String>,
    /// True while the initial load or a mutating operation is in flight.
    pub is_loading: bool,
    /// User-facing message for the most recent failure.
    pub error: Option<String>,
}

impl Default for SessionState {
    /// The pre-load state: nothing known yet, restore still pending.
    fn default() -> Self {
        Self {
            user: None,
            token: None,
            is_loading: true,
            error: None,
        }
    }
}

impl SessionState {
    /// The settled signed-out state.
    pub fn signed_out() -> Self {
        Self {
            is_loading: false,
            ..Self::default()
        }
    }

    /// Derived: authenticated iff a token is held.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Install an authenticated session, user and token together.
    pub fn establish(&mut self, record: SessionRecord) {
        self.user = Some(record.user);
        self.token = Some(record.token);
        self.error = None;
    }

    /// Drop user and token together, returning to unauthenticated.
    pub fn clear_authentication(&mut self) {
        self.user = None;
        self.token = None;
    }

    /// Snapshot of the persistable record, if authenticated.
    pub fn record(&self) -> Option<SessionRecord> {
        match (&self.user, &self.token) {
            (Some(user), Some(token)) => Some(SessionRecord {
                user: user.clone(),
                token: token.clone(),
            }),
            _ => None,
        }
    }
}
