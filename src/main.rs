use std::sync::Arc;

use skillora_core::config::{SessionConfig, WizardConfig};
use skillora_core::exchange::{AuthExchange, MockAuthExchange};
use skillora_core::media::{MediaPicker, MockMediaPicker};
use skillora_core::onboarding::{OnboardingWizard, INTERESTS};
use skillora_core::session::{AuthMode, Credentials, SessionStore};
use skillora_core::storage::{LibSqlStorage, StorageBackend};

/// Reference host wiring: opens the durable store, restores the session,
/// and walks the onboarding flow once. Run it twice to see the restart
/// round-trip; set SKILLORA_RESET=1 to log out first.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let db_path =
        std::env::var("SKILLORA_DB_PATH").unwrap_or_else(|_| "./data/skillora.db".to_string());

    eprintln!("📱 Skillora core v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Database: {}", db_path);

    let storage: Arc<dyn StorageBackend> =
        Arc::new(LibSqlStorage::new_local(std::path::Path::new(&db_path)).await?);
    let exchange: Arc<dyn AuthExchange> = Arc::new(MockAuthExchange::new());
    let session = Arc::new(SessionStore::new(
        storage,
        exchange,
        SessionConfig::default(),
    ));

    if let Err(e) = session.load().await {
        eprintln!("   Session restore failed: {e}");
    }

    if std::env::var("SKILLORA_RESET").is_ok() {
        session.logout().await;
        eprintln!("   Stored session cleared");
    }

    let user = match session.current_user().await {
        Some(user) => {
            eprintln!(
                "   Restored session for {} <{}> (profile complete: {})",
                user.name, user.email, user.is_profile_complete
            );
            user
        }
        None => {
            eprintln!("   No stored session, logging in");
            let credentials = Credentials::new("ada@example.com", "secret1");
            let user = session.authenticate(&credentials, AuthMode::Login).await?;
            eprintln!(
                "   Logged in as {} (profile complete: {})",
                user.email, user.is_profile_complete
            );
            user
        }
    };

    if user.is_profile_complete {
        eprintln!("\n   Profile already complete, onboarding skipped.");
        eprintln!("   Set SKILLORA_RESET=1 to start over.");
        return Ok(());
    }

    // ── Onboarding walkthrough ──────────────────────────────────────────
    let picker: Arc<dyn MediaPicker> =
        Arc::new(MockMediaPicker::picking("file:///demo/avatar.png"));
    let mut wizard =
        OnboardingWizard::mount(Arc::clone(&session), picker, WizardConfig::default()).await;

    eprintln!("\n   Step {} ({})", wizard.step().index(), wizard.step());
    wizard.set_name("Ada Lovelace");
    wizard.set_username("ada");
    wizard.advance()?;

    eprintln!("   Step {} ({})", wizard.step().index(), wizard.step());
    for id in ["design", "tech", "art"] {
        wizard.toggle_interest(id);
    }
    eprintln!(
        "   Selected {} of {} interests",
        wizard.state().selected_interests.len(),
        INTERESTS.len()
    );
    wizard.advance()?;

    eprintln!("   Step {} ({})", wizard.step().index(), wizard.step());
    wizard.set_bio("Mathematician, occasional poet.");
    let outcome = wizard.pick_photo().await;
    eprintln!("   Photo pick: {:?}", outcome);

    let profile = wizard.submit().await?;
    eprintln!("\n   Profile complete: {}", profile.is_profile_complete);
    eprintln!("   Contact: {}", profile.email);
    eprintln!("   Teaching: {:?}", profile.skills_to_teach);
    eprintln!("\n   Run again to see this session restored from disk.");

    Ok(())
}
