//! Session management — persisted authentication state and its single owner.
//!
//! The [`SessionStore`] owns the persisted session record: it restores it at
//! startup, exchanges credentials for it, merges profile updates into it,
//! and clears it on logout. Everything else in the crate only ever reads
//! snapshots.

pub mod model;
pub mod state;
pub mod store;

pub use model::{
    email_looks_valid, parse_skill_list, storage_keys, AuthMode, Credentials, ProfileUpdate,
    SessionRecord, UserProfile,
};
pub use state::SessionState;
pub use store::SessionStore;
