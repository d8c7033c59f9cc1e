//! Skillora core — session and onboarding state machines for the
//! skill-exchange app.

pub mod config;
pub mod error;
pub mod exchange;
pub mod media;
pub mod onboarding;
pub mod session;
pub mod storage;
