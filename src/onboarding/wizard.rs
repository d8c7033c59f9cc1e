//! OnboardingWizard — drives the 3-step flow against the session store.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::WizardConfig;
use crate::error::WizardError;
use crate::media::{MediaPicker, Permission, PickResult};
use crate::onboarding::state::{WizardState, WizardStep};
use crate::session::model::{AuthMode, Credentials, ProfileUpdate, UserProfile};
use crate::session::SessionStore;

/// Advisory outcome of a photo pick. Never a hard wizard failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoPickOutcome {
    /// A photo was chosen and stored in the wizard state.
    Selected { uri: String },
    /// The user backed out; `photo` is unchanged.
    Cancelled,
    /// Library permission was denied; `photo` is unchanged. The message is
    /// suitable for an inline advisory.
    PermissionDenied { message: String },
}

/// Collects the minimum profile data needed to mark a profile complete,
/// across exactly three steps, persisting nothing until submission.
///
/// The wizard reads a profile snapshot at mount and calls back into the
/// session store only at submission; navigation after completion is the
/// host's job.
pub struct OnboardingWizard {
    session: Arc<SessionStore>,
    picker: Arc<dyn MediaPicker>,
    config: WizardConfig,
    state: WizardState,
}

impl OnboardingWizard {
    /// Create a wizard over the given session store.
    ///
    /// If the store already holds a profile the wizard pre-fills from it, so
    /// the same flow doubles as profile editing.
    pub async fn mount(
        session: Arc<SessionStore>,
        picker: Arc<dyn MediaPicker>,
        config: WizardConfig,
    ) -> Self {
        let mut state = WizardState::default();
        if let Some(profile) = session.current_user().await {
            debug!(user_id = %profile.id, "Pre-filling wizard from existing profile");
            state.prefill(&profile);
        }
        Self {
            session,
            picker,
            config,
            state,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn step(&self) -> WizardStep {
        self.state.step
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.state.name = name.into();
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.state.username = username.into();
    }

    pub fn set_bio(&mut self, bio: impl Into<String>) {
        self.state.bio = bio.into();
    }

    pub fn set_photo(&mut self, photo: Option<String>) {
        self.state.photo = photo;
    }

    pub fn toggle_interest(&mut self, id: &str) {
        self.state.toggle_interest(id);
    }

    /// Move forward one step; blocked while the current step's gate fails.
    pub fn advance(&mut self) -> Result<WizardStep, WizardError> {
        let step = self.state.advance()?;
        debug!(step = %step, "Wizard advanced");
        Ok(step)
    }

    /// Move back one step; no gate on the way back.
    pub fn back(&mut self) -> Result<WizardStep, WizardError> {
        let step = self.state.back()?;
        debug!(step = %step, "Wizard moved back");
        Ok(step)
    }

    /// Run the device photo picker.
    ///
    /// Denied permission and cancellation are advisory outcomes; only a
    /// granted, non-cancelled pick touches `photo`.
    pub async fn pick_photo(&mut self) -> PhotoPickOutcome {
        match self.picker.request_permission().await {
            Permission::Denied => {
                info!("Photo library permission denied");
                return PhotoPickOutcome::PermissionDenied {
                    message: "Please allow access to your photos to upload a profile picture."
                        .to_string(),
                };
            }
            Permission::Granted => {}
        }

        match self.picker.pick_image().await {
            PickResult::Cancelled => PhotoPickOutcome::Cancelled,
            PickResult::Picked { uri } => {
                debug!(%uri, "Photo selected");
                self.state.photo = Some(uri.clone());
                PhotoPickOutcome::Selected { uri }
            }
        }
    }

    /// Terminal transition: commit the collected fields through the session
    /// store and return the completed profile.
    ///
    /// Only available from the final step. If no user is authenticated yet
    /// the wizard first signs up implicitly, with a contact identifier
    /// synthesized from the chosen username and a generated placeholder
    /// password. Any failure propagates here with nothing committed; the
    /// wizard stays on the final step so the user can retry.
    pub async fn submit(&mut self) -> Result<UserProfile, WizardError> {
        if self.state.step != WizardStep::Bio {
            return Err(WizardError::NotOnFinalStep);
        }
        if !self.state.identity_complete() {
            return Err(WizardError::IdentityIncomplete);
        }

        let name = self.state.name.trim().to_string();
        let username = self.state.username.trim().to_lowercase();
        let email = format!("{}@{}", username, self.config.contact_domain);

        if !self.session.is_authenticated().await {
            info!(%email, "No session yet, signing up implicitly before submit");
            let credentials =
                Credentials::new(email.clone(), generated_password()).with_name(name.clone());
            self.session
                .authenticate(&credentials, AuthMode::Signup)
                .await?;
        }

        let bio = self.state.bio.trim();
        let update = ProfileUpdate {
            name: Some(name),
            email: Some(email),
            bio: Some((!bio.is_empty()).then(|| bio.to_string())),
            photo_url: Some(self.state.photo.clone()),
            skills_to_teach: Some(self.state.selected_interests.clone()),
            is_profile_complete: Some(true),
            ..Default::default()
        };

        let profile = self.session.update_profile(update).await.map_err(|e| {
            warn!("Profile submission failed: {}", e);
            e
        })?;

        info!(user_id = %profile.id, "Onboarding complete");
        Ok(profile)
    }
}

/// Placeholder password for the implicit signup. A real backend would link
/// the account through a proper flow; this only has to satisfy the signup
/// policy and never be guessable.
fn generated_password() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::SessionConfig;
    use crate::error::SessionError;
    use crate::exchange::MockAuthExchange;
    use crate::media::MockMediaPicker;
    use crate::storage::{MemoryStorage, StorageBackend};

    async fn loaded_store(storage: Arc<MemoryStorage>) -> Arc<SessionStore> {
        let exchange = Arc::new(MockAuthExchange::new().with_latency(Duration::from_millis(0)));
        let store = Arc::new(SessionStore::new(
            storage as Arc<dyn StorageBackend>,
            exchange,
            SessionConfig::default(),
        ));
        store.load().await.unwrap();
        store
    }

    async fn wizard_with_picker(picker: MockMediaPicker) -> OnboardingWizard {
        let store = loaded_store(Arc::new(MemoryStorage::new())).await;
        OnboardingWizard::mount(store, Arc::new(picker), WizardConfig::default()).await
    }

    fn fill_to_bio(wizard: &mut OnboardingWizard) {
        wizard.set_name("Grace");
        wizard.set_username("Grace");
        wizard.advance().unwrap();
        for id in ["design", "tech", "art"] {
            wizard.toggle_interest(id);
        }
        wizard.advance().unwrap();
    }

    #[tokio::test]
    async fn mount_prefills_from_an_existing_profile() {
        let store = loaded_store(Arc::new(MemoryStorage::new())).await;
        store
            .authenticate(&Credentials::new("ada@example.com", "secret1"), AuthMode::Login)
            .await
            .unwrap();

        let wizard = OnboardingWizard::mount(
            store,
            Arc::new(MockMediaPicker::cancelling()),
            WizardConfig::default(),
        )
        .await;

        assert_eq!(wizard.state().name, "Existing User");
        assert_eq!(wizard.state().username, "ada");
        assert_eq!(wizard.step(), WizardStep::Identity);
    }

    #[tokio::test]
    async fn pick_photo_stores_the_uri() {
        let mut wizard = wizard_with_picker(MockMediaPicker::picking("file:///p.png")).await;

        let outcome = wizard.pick_photo().await;
        assert_eq!(
            outcome,
            PhotoPickOutcome::Selected {
                uri: "file:///p.png".to_string()
            }
        );
        assert_eq!(wizard.state().photo.as_deref(), Some("file:///p.png"));
    }

    #[tokio::test]
    async fn cancelled_pick_leaves_photo_unchanged() {
        let mut wizard = wizard_with_picker(MockMediaPicker::cancelling()).await;
        wizard.set_photo(Some("file:///old.png".to_string()));

        let outcome = wizard.pick_photo().await;
        assert_eq!(outcome, PhotoPickOutcome::Cancelled);
        assert_eq!(wizard.state().photo.as_deref(), Some("file:///old.png"));
    }

    #[tokio::test]
    async fn denied_permission_is_advisory_not_fatal() {
        let mut wizard = wizard_with_picker(MockMediaPicker::denied()).await;

        let outcome = wizard.pick_photo().await;
        assert!(matches!(
            outcome,
            PhotoPickOutcome::PermissionDenied { .. }
        ));
        assert!(wizard.state().photo.is_none());
    }

    #[tokio::test]
    async fn submit_is_rejected_before_the_final_step() {
        let mut wizard = wizard_with_picker(MockMediaPicker::cancelling()).await;
        wizard.set_name("Grace");
        wizard.set_username("grace");

        let err = wizard.submit().await.unwrap_err();
        assert!(matches!(err, WizardError::NotOnFinalStep));
        assert_eq!(wizard.step(), WizardStep::Identity);
    }

    #[tokio::test]
    async fn submit_signs_up_implicitly_when_unauthenticated() {
        let storage = Arc::new(MemoryStorage::new());
        let store = loaded_store(Arc::clone(&storage)).await;
        assert!(!store.is_authenticated().await);

        let mut wizard = OnboardingWizard::mount(
            Arc::clone(&store),
            Arc::new(MockMediaPicker::cancelling()),
            WizardConfig::default(),
        )
        .await;
        fill_to_bio(&mut wizard);
        wizard.set_bio("  hi there  ");

        let profile = wizard.submit().await.unwrap();

        assert!(store.is_authenticated().await);
        assert!(profile.is_profile_complete);
        assert_eq!(profile.name, "Grace");
        assert_eq!(profile.email, "grace@skillora.app", "username is lowercased");
        assert_eq!(profile.bio.as_deref(), Some("hi there"));
        assert_eq!(profile.skills_to_teach.len(), 3);
    }

    #[tokio::test]
    async fn blank_bio_is_cleared_on_submit() {
        let store = loaded_store(Arc::new(MemoryStorage::new())).await;
        store
            .authenticate(&Credentials::new("a@b.com", "secret1"), AuthMode::Login)
            .await
            .unwrap();

        let mut wizard = OnboardingWizard::mount(
            Arc::clone(&store),
            Arc::new(MockMediaPicker::cancelling()),
            WizardConfig::default(),
        )
        .await;
        fill_to_bio(&mut wizard);
        wizard.set_bio("   ");

        let profile = wizard.submit().await.unwrap();
        assert!(profile.bio.is_none());
        assert!(profile.photo_url.is_none(), "no photo means explicit null");
    }

    #[tokio::test]
    async fn failed_submit_stays_on_the_final_step_with_nothing_committed() {
        let storage = Arc::new(MemoryStorage::new());
        let store = loaded_store(Arc::clone(&storage)).await;
        store
            .authenticate(&Credentials::new("a@b.com", "secret1"), AuthMode::Login)
            .await
            .unwrap();

        let mut wizard = OnboardingWizard::mount(
            Arc::clone(&store),
            Arc::new(MockMediaPicker::cancelling()),
            WizardConfig::default(),
        )
        .await;
        fill_to_bio(&mut wizard);

        storage.fail_writes(true);
        let err = wizard.submit().await.unwrap_err();
        assert!(matches!(err, WizardError::Session(SessionError::Storage(_))));

        assert_eq!(wizard.step(), WizardStep::Bio, "wizard stays put for retry");
        let current = store.current_user().await.unwrap();
        assert!(!current.is_profile_complete, "nothing was committed");

        // Retry succeeds once storage recovers.
        storage.fail_writes(false);
        let profile = wizard.submit().await.unwrap();
        assert!(profile.is_profile_complete);
    }

    #[tokio::test]
    async fn generated_passwords_satisfy_the_signup_policy() {
        let config = SessionConfig::default();
        let password = generated_password();
        assert!(password.len() >= config.min_password_len);
        assert_ne!(password, generated_password());
    }
}
