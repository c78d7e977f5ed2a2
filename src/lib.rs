//! Prompt intake — voice capture and intent extraction for the prompt
//! authoring form.
//!
//! Turns a spoken or typed description into the form's structured fields
//! (business area, objective, challenge). No UI lives here; the host app
//! injects a recognition engine and renders the published events.
//!
//! Domains:
//!   - speech   — dictation sessions, silence auto-commit, shared engine
//!   - classify — keyword classifier, remote classifier, resolver
//!   - form     — field state and submission payload
//!   - config   — environment-driven settings
//!   - error    — error taxonomy

pub mod classify;
pub mod config;
pub mod error;
pub mod form;
pub mod speech;

pub use classify::{BusinessArea, ClassificationGuess, ClassificationResolver, ResolvedGuess};
pub use config::IntakeConfig;
pub use error::{ClassifyError, SessionError, ValidationError};
pub use form::{IntakeForm, SubmissionPayload};
pub use speech::{EngineEvent, Field, RecognitionEngine, SessionEvent, SpeechController};

/// Load `.env.local` → `.env` from the working directory, start logging and
/// read the config. Safe to call more than once.
pub fn init() -> IntakeConfig {
    'env_load: for env_file in [".env.local", ".env"] {
        let path = std::path::Path::new(env_file);
        if path.exists() {
            match dotenvy::from_path(path) {
                Ok(_) => eprintln!("[STARTUP] Loaded {}", path.display()),
                Err(e) => eprintln!("[STARTUP] Failed to load {}: {}", path.display(), e),
            }
            break 'env_load;
        }
    }

    let _ = env_logger::try_init();
    log::info!("Prompt intake starting up");

    IntakeConfig::from_env()
}

/// Controller wired from config: remote-then-keyword resolver and the
/// given engine.
pub fn build_controller(engine: Box<dyn RecognitionEngine>, config: &IntakeConfig) -> SpeechController {
    let resolver = ClassificationResolver::from_config(config);
    SpeechController::new(engine, resolver, config)
}
