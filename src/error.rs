//! Error types for the Skillora session and onboarding core.

/// Top-level error type for the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Onboarding error: {0}")]
    Wizard(#[from] WizardError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Input-validation failures.
///
/// Recoverable, surfaced inline to the user, and guaranteed not to have
/// touched persisted state. Messages are user-facing.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("Passwords do not match")]
    PasswordMismatch,
}

/// Persistence-layer failures.
///
/// `Malformed` is raised by the session store when a stored blob exists but
/// cannot be parsed; the blob is left in place for diagnosis.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to read key {key}: {reason}")]
    Read { key: String, reason: String },

    #[error("Failed to write key {key}: {reason}")]
    Write { key: String, reason: String },

    #[error("Failed to remove key {key}: {reason}")]
    Remove { key: String, reason: String },

    #[error("Malformed record under key {key}: {reason}")]
    Malformed { key: String, reason: String },
}

/// Failures from the authentication exchange.
///
/// The real backend is mocked; either way failures are translated into this
/// taxonomy at the store boundary.
#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    #[error("Authentication was rejected: {0}")]
    Rejected(String),

    #[error("Authentication service unavailable: {0}")]
    Unavailable(String),
}

/// Session store errors.
///
/// Validation, storage, and exchange failures pass through transparently so
/// the messages reaching `SessionState::error` stay user-readable.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Another operation is already in progress")]
    OperationInProgress,

    #[error("User not authenticated")]
    NotAuthenticated,

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Exchange(#[from] ExchangeError),
}

/// Onboarding wizard errors — blocked step transitions and submit failures.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("Please fill in all required fields")]
    IdentityIncomplete,

    #[error("Select at least {min} interests to continue")]
    NotEnoughInterests { min: usize },

    #[error("Already at the first step")]
    AtFirstStep,

    #[error("Already at the final step")]
    AtLastStep,

    #[error("Submission is only available from the final step")]
    NotOnFinalStep,

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
