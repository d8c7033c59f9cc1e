//! Wizard state machine — the three fixed profile-completion steps.

use std::collections::BTreeSet;

use crate::error::WizardError;
use crate::session::model::UserProfile;

/// Minimum number of interests required to leave the interests step.
pub const MIN_INTERESTS: usize = 3;

/// The three steps, walked linearly: Identity → Interests → Bio.
///
/// Submission happens from `Bio`; there is no terminal step variant because
/// the wizard hands control back to the host once submission succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    Identity,
    Interests,
    Bio,
}

impl WizardStep {
    /// 1-based position for a step indicator.
    pub fn index(&self) -> u8 {
        match self {
            Self::Identity => 1,
            Self::Interests => 2,
            Self::Bio => 3,
        }
    }

    pub fn next(&self) -> Option<WizardStep> {
        match self {
            Self::Identity => Some(Self::Interests),
            Self::Interests => Some(Self::Bio),
            Self::Bio => None,
        }
    }

    pub fn prev(&self) -> Option<WizardStep> {
        match self {
            Self::Identity => None,
            Self::Interests => Some(Self::Identity),
            Self::Bio => Some(Self::Interests),
        }
    }
}

impl Default for WizardStep {
    fn default() -> Self {
        Self::Identity
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Identity => "identity",
            Self::Interests => "interests",
            Self::Bio => "bio",
        };
        write!(f, "{s}")
    }
}

/// Transient wizard state. Never persisted; only the submitted result is.
#[derive(Debug, Clone, Default)]
pub struct WizardState {
    pub step: WizardStep,
    pub name: String,
    pub username: String,
    pub bio: String,
    /// Resource locator from the media picker, if a photo was chosen.
    pub photo: Option<String>,
    pub selected_interests: BTreeSet<String>,
}

impl WizardState {
    /// Whether the identity step's fields are filled, after trimming.
    pub fn identity_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.username.trim().is_empty()
    }

    /// Whether enough interests are selected to leave the interests step.
    pub fn interests_complete(&self) -> bool {
        self.selected_interests.len() >= MIN_INTERESTS
    }

    /// Whether the current step's gate is satisfied. The inverse of a UI's
    /// "next disabled" predicate; `Bio` has no gate because the bio is
    /// optional.
    pub fn step_complete(&self) -> bool {
        match self.step {
            WizardStep::Identity => self.identity_complete(),
            WizardStep::Interests => self.interests_complete(),
            WizardStep::Bio => true,
        }
    }

    /// Move forward exactly one step.
    ///
    /// Blocked while the current step's gate fails; a blocked attempt leaves
    /// `step` unchanged. Forward from `Bio` is submission, not a step, so it
    /// is rejected here.
    pub fn advance(&mut self) -> Result<WizardStep, WizardError> {
        match self.step {
            WizardStep::Identity if !self.identity_complete() => {
                return Err(WizardError::IdentityIncomplete);
            }
            WizardStep::Interests if !self.interests_complete() => {
                return Err(WizardError::NotEnoughInterests { min: MIN_INTERESTS });
            }
            _ => {}
        }
        let next = self.step.next().ok_or(WizardError::AtLastStep)?;
        self.step = next;
        Ok(next)
    }

    /// Move back exactly one step. No gate on the way back.
    pub fn back(&mut self) -> Result<WizardStep, WizardError> {
        let prev = self.step.prev().ok_or(WizardError::AtFirstStep)?;
        self.step = prev;
        Ok(prev)
    }

    /// Toggle an interest in or out of the selection.
    pub fn toggle_interest(&mut self, id: &str) {
        if !self.selected_interests.remove(id) {
            self.selected_interests.insert(id.to_string());
        }
    }

    /// Pre-fill from an existing profile so the same flow doubles as profile
    /// editing. The username is derived from the email local part, since no
    /// separate username is stored.
    pub fn prefill(&mut self, profile: &UserProfile) {
        self.name = profile.name.clone();
        self.username = profile
            .email
            .split('@')
            .next()
            .unwrap_or_default()
            .to_string();
        self.bio = profile.bio.clone().unwrap_or_default();
        self.photo = profile.photo_url.clone();
        self.selected_interests = profile.skills_to_teach.clone();
    }
}
