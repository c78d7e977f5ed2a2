//! Speech domain — continuous dictation into form fields.
//!
//! Public API for voice input. One [`SpeechSession`] per field, all
//! sharing a single recognition engine through [`SpeechController`].
//!
//!   - engine.rs     — injected recognition engine boundary + event types
//!   - transcript.rs — final/interim accumulation with duplicate suppression
//!   - silence.rs    — silence window for auto-commit
//!   - session.rs    — per-field state machine
//!   - controller.rs — engine ownership, preemption, commits

mod controller;
pub mod engine;
mod session;
mod silence;
mod transcript;

pub use controller::SpeechController;
pub use engine::{
    Alternative, EngineEvent, RecognitionConfig, RecognitionEngine, RecognitionErrorCode,
    RecognitionResult, RecognitionResultEvent,
};
pub use session::{ErrorDisposition, SpeechSession};
pub use silence::SilenceTimer;
pub use transcript::{MergeOutcome, TranscriptState};

use crate::classify::ResolvedGuess;
use crate::error::SessionError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Form fields that accept dictation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// Full free-text description; committed text is classified.
    Principal,
    Objetivo,
    Reto,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Principal, Field::Objetivo, Field::Reto];

    pub fn id(self) -> &'static str {
        match self {
            Field::Principal => "principal",
            Field::Objetivo => "objetivo",
            Field::Reto => "reto",
        }
    }

    pub fn is_primary(self) -> bool {
        self == Field::Principal
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Field {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|f| f.id() == s)
            .ok_or_else(|| SessionError::UnknownField(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Idle,
    Listening,
    Committing,
}

/// Events published by the controller for the UI.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum SessionEvent {
    ListeningStarted { field: Field },
    TranscriptUpdated { field: Field, text: String },
    /// Commit started; the field should show a progress indicator.
    Committing { field: Field },
    Committed {
        field: Field,
        text: String,
        suggestion: Option<ResolvedGuess>,
    },
    SessionFailed { field: Field, message: String },
    ValidationRejected { field: Field, message: String },
}
