//! Session data models — the durable user profile and its persisted record.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use chrono::{DateTime, Duration, Utc};
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;
use crate::error::ValidationError;
use crate::exchange::UserSeed;

/// Storage keys used for session persistence.
pub mod storage_keys {
    /// Key for the persisted `SessionRecord` blob.
    pub const SESSION: &str = "skillora_session";
}

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email shape regex compiles"));

/// Basic `local@domain` shape check — deliberately loose, a real backend owns
/// actual address verification.
pub fn email_looks_valid(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

/// Which authentication flow is being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Exchange existing credentials for a session.
    Login,
    /// Create a new account.
    Signup,
}

impl std::fmt::Display for AuthMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Login => write!(f, "login"),
            Self::Signup => write!(f, "signup"),
        }
    }
}

/// Credentials collected by a login or signup screen.
///
/// The password stays wrapped in `SecretString` so it never lands in logs or
/// serialized output.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
    /// Display name — collected by the signup screen only.
    pub name: Option<String>,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
            name: None,
        }
    }

    /// Attach the display name collected by the signup screen.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Signup-screen confirmation check: both password entries must match.
    pub fn confirm(&self, confirmation: &SecretString) -> Result<(), ValidationError> {
        if self.password.expose_secret() != confirmation.expose_secret() {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(())
    }

    /// Validate for the given mode. Runs before any asynchronous work so bad
    /// input fails fast without touching state or storage.
    pub fn validate(&self, mode: AuthMode, config: &SessionConfig) -> Result<(), ValidationError> {
        let name_present = match mode {
            AuthMode::Login => true,
            AuthMode::Signup => self.name.as_deref().is_some_and(|n| !n.trim().is_empty()),
        };
        if self.email.trim().is_empty() || self.password.expose_secret().is_empty() || !name_present
        {
            return Err(ValidationError::MissingFields);
        }
        if !email_looks_valid(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        if mode == AuthMode::Signup
            && self.password.expose_secret().len() < config.min_password_len
        {
            return Err(ValidationError::PasswordTooShort {
                min: config.min_password_len,
            });
        }
        Ok(())
    }
}

/// The durable identity record for a Skillora user.
///
/// Created by the session store on first successful authentication with
/// `is_profile_complete = false`, mutated only through the store's update
/// operation, and cleared from persistence on logout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Opaque stable identifier, generated once at account creation.
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub skills_to_teach: BTreeSet<String>,
    pub skills_to_learn: BTreeSet<String>,
    /// Flips false→true exactly once, at successful wizard submission, and
    /// never reverts.
    pub is_profile_complete: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Build the fresh, incomplete profile minted at authentication.
    pub fn from_seed(seed: &UserSeed) -> Self {
        let now = Utc::now();
        Self {
            id: seed.id.clone(),
            email: seed.email.clone(),
            name: seed.name.clone(),
            bio: None,
            photo_url: None,
            skills_to_teach: BTreeSet::new(),
            skills_to_learn: BTreeSet::new(),
            is_profile_complete: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Field-level merge of `update` over this profile.
    ///
    /// `None` leaves a field unchanged; the nullable fields use a nested
    /// Option where `Some(None)` clears. `id` and `created_at` never change,
    /// and `is_profile_complete` only ever flips to true.
    pub fn apply_update(&mut self, update: ProfileUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(bio) = update.bio {
            self.bio = bio;
        }
        if let Some(photo_url) = update.photo_url {
            self.photo_url = photo_url;
        }
        if let Some(teach) = update.skills_to_teach {
            self.skills_to_teach = teach;
        }
        if let Some(learn) = update.skills_to_learn {
            self.skills_to_learn = learn;
        }
        if update.is_profile_complete == Some(true) {
            self.is_profile_complete = true;
        }
        self.touch();
    }

    /// Refresh `updated_at`, guaranteeing a strictly later stamp even when
    /// the wall clock has not advanced since the previous mutation.
    fn touch(&mut self) {
        let now = Utc::now();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::microseconds(1)
        };
    }
}

/// Partial profile update, merged field-by-field over the current record.
///
/// Plain `Option` fields mean "unchanged when None"; the nullable `bio` and
/// `photo_url` use a nested Option so `Some(None)` clears the stored value.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub bio: Option<Option<String>>,
    pub photo_url: Option<Option<String>>,
    pub skills_to_teach: Option<BTreeSet<String>>,
    pub skills_to_learn: Option<BTreeSet<String>>,
    pub is_profile_complete: Option<bool>,
}

/// The persisted pairing of identity and credential.
///
/// Both fields are required: only authenticated sessions are ever written,
/// which keeps the user/token invariant structural — a record can never hold
/// a token without the identity it authorizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub user: UserProfile,
    pub token: String,
}

/// Split a free-text, comma-separated skill list into a trimmed,
/// de-duplicated set. Empty segments are dropped.
pub fn parse_skill_list(input: &str) -> BTreeSet<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
