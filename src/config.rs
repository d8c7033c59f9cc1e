//! Configuration types.

/// Session store configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Minimum password length enforced for signup.
    pub min_password_len: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            min_password_len: 6,
        }
    }
}

/// Onboarding wizard configuration.
#[derive(Debug, Clone)]
pub struct WizardConfig {
    /// Domain appended to the chosen username to synthesize the contact
    /// identifier on submission (`{username}@{contact_domain}`).
    pub contact_domain: String,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            contact_domain: "skillora.app".to_string(),
        }
    }
}
