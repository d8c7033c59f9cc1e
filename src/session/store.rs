//! Session store — the single owner of the persisted session record.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::config::SessionConfig;
use crate::error::{SessionError, StorageError};
use crate::exchange::AuthExchange;
use crate::session::model::{
    storage_keys, AuthMode, Credentials, ProfileUpdate, SessionRecord, UserProfile,
};
use crate::session::state::SessionState;
use crate::storage::StorageBackend;

/// Single source of truth for "who is logged in".
///
/// All mutation is serialized through the `is_loading` gate: a mutating call
/// raises the flag under the same lock acquisition that checks it, so two
/// in-flight authentications can never race to write divergent tokens.
/// Every successful mutation persists before the in-memory swap, never
/// after, so a crash mid-persist cannot leave memory claiming a session
/// that storage does not hold.
pub struct SessionStore {
    storage: Arc<dyn StorageBackend>,
    exchange: Arc<dyn AuthExchange>,
    config: SessionConfig,
    state: RwLock<SessionState>,
}

impl SessionStore {
    /// Create a store in the pre-load state. Mutating calls are rejected as
    /// busy until [`load`](Self::load) settles the state.
    pub fn new(
        storage: Arc<dyn StorageBackend>,
        exchange: Arc<dyn AuthExchange>,
        config: SessionConfig,
    ) -> Self {
        Self {
            storage,
            exchange,
            config,
            state: RwLock::new(SessionState::default()),
        }
    }

    /// Cloned snapshot of the observable state.
    pub async fn state(&self) -> SessionState {
        self.state.read().await.clone()
    }

    /// Snapshot of the current user, if any.
    pub async fn current_user(&self) -> Option<UserProfile> {
        self.state.read().await.user.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.is_authenticated()
    }

    /// Restore the persisted session at startup.
    ///
    /// A missing record settles into the signed-out state. A record that
    /// exists but does not parse is reported as `StorageError::Malformed`
    /// and left untouched in storage so it can be inspected; auto-deleting
    /// it would destroy the only evidence of what went wrong.
    pub async fn load(&self) -> Result<(), SessionError> {
        match self.storage.get(storage_keys::SESSION).await {
            Ok(Some(blob)) => match serde_json::from_str::<SessionRecord>(&blob) {
                Ok(record) => {
                    info!(user_id = %record.user.id, "Session restored");
                    let mut state = self.state.write().await;
                    state.establish(record);
                    state.is_loading = false;
                    Ok(())
                }
                Err(e) => {
                    warn!("Persisted session is malformed, leaving it in place: {}", e);
                    let err = StorageError::Malformed {
                        key: storage_keys::SESSION.to_string(),
                        reason: e.to_string(),
                    };
                    self.settle_signed_out(Some("Failed to load authentication data"))
                        .await;
                    Err(err.into())
                }
            },
            Ok(None) => {
                self.settle_signed_out(None).await;
                Ok(())
            }
            Err(e) => {
                warn!("Failed to read persisted session: {}", e);
                self.settle_signed_out(Some("Failed to load authentication data"))
                    .await;
                Err(e.into())
            }
        }
    }

    /// Exchange credentials for a session.
    ///
    /// Validation runs first and fails fast, before any asynchronous work.
    /// On success a fresh `UserProfile` is minted from the grant with
    /// `is_profile_complete = false`, persisted, and only then swapped into
    /// observable state. On any failure the previous authentication state is
    /// untouched and the error message is mirrored into `state.error`.
    pub async fn authenticate(
        &self,
        credentials: &Credentials,
        mode: AuthMode,
    ) -> Result<UserProfile, SessionError> {
        self.begin_mutation().await?;

        if let Err(e) = credentials.validate(mode, &self.config) {
            return Err(self.fail(e.into()).await);
        }

        let grant = match self.exchange.authenticate(credentials, mode).await {
            Ok(grant) => grant,
            Err(e) => {
                warn!(%mode, "Authentication exchange failed: {}", e);
                return Err(self.fail(e.into()).await);
            }
        };

        let record = SessionRecord {
            user: UserProfile::from_seed(&grant.user),
            token: grant.token,
        };

        if let Err(e) = self.persist(&record).await {
            warn!("Failed to persist session: {}", e);
            return Err(self.fail(e.into()).await);
        }

        info!(user_id = %record.user.id, %mode, "Authenticated");
        let profile = record.user.clone();
        let mut state = self.state.write().await;
        state.establish(record);
        state.is_loading = false;
        Ok(profile)
    }

    /// Merge `update` field-by-field over the current profile and persist.
    ///
    /// Write-then-swap: the merged record goes to storage first and only
    /// then replaces in-memory state, so a failed persist leaves the
    /// observable profile exactly as it was.
    pub async fn update_profile(
        &self,
        update: ProfileUpdate,
    ) -> Result<UserProfile, SessionError> {
        let record = {
            let mut state = self.state.write().await;
            if state.is_loading {
                return Err(SessionError::OperationInProgress);
            }
            let Some(record) = state.record() else {
                return Err(SessionError::NotAuthenticated);
            };
            state.is_loading = true;
            state.error = None;
            record
        };

        let mut merged = record;
        merged.user.apply_update(update);

        if let Err(e) = self.persist(&merged).await {
            warn!("Failed to persist profile update: {}", e);
            return Err(self.fail(e.into()).await);
        }

        info!(
            user_id = %merged.user.id,
            profile_complete = merged.user.is_profile_complete,
            "Profile updated"
        );
        let profile = merged.user.clone();
        let mut state = self.state.write().await;
        state.establish(merged);
        state.is_loading = false;
        Ok(profile)
    }

    /// Clear the persisted record and reset to signed-out.
    ///
    /// The reset is unconditional: a failed storage remove is logged and the
    /// caller still observes a signed-out session. The host shell keeps
    /// logout unavailable while an operation is in flight.
    pub async fn logout(&self) {
        if let Err(e) = self.storage.remove(storage_keys::SESSION).await {
            warn!("Failed to clear persisted session: {}", e);
        }
        info!("Signed out");
        let mut state = self.state.write().await;
        *state = SessionState::signed_out();
    }

    /// Raise the busy flag, rejecting re-entry. Check and set happen under
    /// one write guard so no interleaving can slip between them.
    async fn begin_mutation(&self) -> Result<(), SessionError> {
        let mut state = self.state.write().await;
        if state.is_loading {
            return Err(SessionError::OperationInProgress);
        }
        state.is_loading = true;
        state.error = None;
        Ok(())
    }

    /// Record a failure: drop the busy flag and mirror the user-facing
    /// message. Authentication state is deliberately untouched.
    async fn fail(&self, err: SessionError) -> SessionError {
        let mut state = self.state.write().await;
        state.is_loading = false;
        state.error = Some(err.to_string());
        err
    }

    async fn settle_signed_out(&self, error: Option<&str>) {
        let mut state = self.state.write().await;
        *state = SessionState::signed_out();
        state.error = error.map(String::from);
    }

    /// Serialize and write the record. Storage only; the in-memory swap is
    /// the caller's last step.
    async fn persist(&self, record: &SessionRecord) -> Result<(), StorageError> {
        let blob = serde_json::to_string(record).map_err(|e| StorageError::Write {
            key: storage_keys::SESSION.to_string(),
            reason: format!("serialize: {e}"),
        })?;
        self.storage.set(storage_keys::SESSION, &blob).await
    }
}
