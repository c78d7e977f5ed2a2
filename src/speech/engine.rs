//! Recognition engine boundary.
//!
//! The engine is whatever turns microphone audio into text (a browser
//! speech API, a local model, a cloud stream). It is injected into the
//! controller and only exposes start/stop plus the event stream below.

use serde::{Deserialize, Serialize};

/// Settings applied before every start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionConfig {
    pub lang: String,
    pub continuous: bool,
    pub interim_results: bool,
}

impl RecognitionConfig {
    /// Continuous mode with interim results, the only mode the sessions use.
    pub fn continuous(lang: impl Into<String>) -> Self {
        Self {
            lang: lang.into(),
            continuous: true,
            interim_results: true,
        }
    }
}

/// Handle to the single shared recognition resource.
pub trait RecognitionEngine: Send {
    fn configure(&mut self, config: &RecognitionConfig);

    fn start(&mut self) -> Result<(), String>;

    /// Must be safe to call when already stopped. A running engine may still
    /// deliver late results after this, then exactly one [`EngineEvent::End`].
    fn stop(&mut self);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    pub transcript: String,
    #[serde(default)]
    pub confidence: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognitionResult {
    pub alternatives: Vec<Alternative>,
    pub is_final: bool,
}

impl RecognitionResult {
    pub fn final_text(text: &str) -> Self {
        Self {
            alternatives: vec![Alternative {
                transcript: text.to_string(),
                confidence: 1.0,
            }],
            is_final: true,
        }
    }

    pub fn interim_text(text: &str) -> Self {
        Self {
            alternatives: vec![Alternative {
                transcript: text.to_string(),
                confidence: 0.0,
            }],
            is_final: false,
        }
    }

    /// Transcript of the top alternative.
    pub fn best_transcript(&self) -> Option<&str> {
        self.alternatives.first().map(|a| a.transcript.as_str())
    }
}

/// One result event. `results` is the engine's cumulative list;
/// entries before `result_index` were already delivered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognitionResultEvent {
    pub result_index: usize,
    pub results: Vec<RecognitionResult>,
}

impl RecognitionResultEvent {
    /// Results that are new in this event.
    pub fn changed(&self) -> &[RecognitionResult] {
        self.results.get(self.result_index..).unwrap_or(&[])
    }
}

/// Coarse engine error codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionErrorCode {
    NoSpeech,
    PermissionDenied,
    CaptureFailure,
    Other(String),
}

impl RecognitionErrorCode {
    /// Map the engine's string code (`no-speech`, `not-allowed`, `audio-capture`, ...).
    pub fn from_code(code: &str) -> Self {
        match code {
            "no-speech" => RecognitionErrorCode::NoSpeech,
            "not-allowed" | "service-not-allowed" => RecognitionErrorCode::PermissionDenied,
            "audio-capture" => RecognitionErrorCode::CaptureFailure,
            other => RecognitionErrorCode::Other(other.to_string()),
        }
    }

    /// No speech is expected during pauses and does not end the session.
    pub fn is_transient(&self) -> bool {
        matches!(self, RecognitionErrorCode::NoSpeech)
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            RecognitionErrorCode::NoSpeech => "No se detectó voz.",
            RecognitionErrorCode::PermissionDenied => {
                "Permiso de micrófono denegado. Habilítalo y vuelve a intentarlo."
            }
            RecognitionErrorCode::CaptureFailure => {
                "No se pudo acceder al micrófono. Verifica que esté conectado."
            }
            RecognitionErrorCode::Other(_) => "Error en el reconocimiento de voz. Inténtalo de nuevo.",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Result(RecognitionResultEvent),
    Error(RecognitionErrorCode),
    /// The engine stopped on its own.
    End,
}
