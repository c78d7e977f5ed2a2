//! Error types for the intake pipeline.
//!
//! Only three kinds of failure cross module boundaries: remote
//! classification errors (always degraded to the keyword path by the
//! resolver), speech session errors, and local validation errors.

use crate::speech::Field;
use thiserror::Error;

/// Failure of a single remote classification call.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("remote request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("remote returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed remote payload: {0}")]
    Malformed(String),
}

/// Failure to drive a speech session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("field {0} is still committing")]
    CommitInProgress(Field),

    #[error("recognition engine failed to start: {0}")]
    Engine(String),

    #[error("unknown field: {0}")]
    UnknownField(String),
}

impl SessionError {
    /// Message shown next to the microphone button.
    pub fn user_message(&self) -> String {
        match self {
            SessionError::CommitInProgress(_) => {
                "Espera a que termine el procesamiento del audio anterior.".to_string()
            }
            SessionError::Engine(_) => {
                "No se pudo iniciar el reconocimiento de voz. Inténtalo de nuevo.".to_string()
            }
            SessionError::UnknownField(f) => format!("Campo desconocido: {}", f),
        }
    }
}

/// Synchronous form validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("description too short: {len} chars, need {min}")]
    TooShort { min: usize, len: usize },

    #[error("business area is required")]
    MissingArea,

    #[error("objective is required")]
    MissingObjective,

    #[error("unknown model: {0}")]
    UnknownModel(String),
}

impl ValidationError {
    pub fn user_message(&self) -> String {
        match self {
            ValidationError::TooShort { min, .. } => format!(
                "Por favor, escribe al menos {} caracteres para poder analizar tu idea.",
                min
            ),
            ValidationError::MissingArea => "Selecciona un área de negocio.".to_string(),
            ValidationError::MissingObjective => "Describe el objetivo principal.".to_string(),
            ValidationError::UnknownModel(m) => format!("Modelo no disponible: {}", m),
        }
    }
}
