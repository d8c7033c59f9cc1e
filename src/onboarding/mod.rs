//! Onboarding — the 3-step profile-completion wizard.
//!
//! A fixed sequence of identity, interests, and bio steps, validated at each
//! forward transition. Nothing is persisted until submission, which commits
//! through the session store and marks the profile complete.

pub mod model;
pub mod state;
pub mod wizard;

pub use model::{interest_by_id, Interest, INTERESTS};
pub use state::{WizardState, WizardStep, MIN_INTERESTS};
pub use wizard::{OnboardingWizard, PhotoPickOutcome};
