//! Speech session state machine — one per field.
//!
//! idle → listening → committing → idle. The session only tracks state;
//! the controller owns the engine and performs the commit work.

use super::engine::{RecognitionErrorCode, RecognitionResultEvent};
use super::silence::SilenceTimer;
use super::transcript::TranscriptState;
use super::{Field, SessionStatus};
use crate::error::SessionError;
use std::time::Duration;
use tokio::time::Instant;

/// What an engine error did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorDisposition {
    Ignored,
    /// Session forced back to idle; transcript kept.
    Failed(&'static str),
}

#[derive(Debug, Clone)]
pub struct SpeechSession {
    field: Field,
    status: SessionStatus,
    transcript: TranscriptState,
    /// Only the primary field auto-commits.
    silence: Option<SilenceTimer>,
}

impl SpeechSession {
    pub fn new(field: Field, silence_window: Duration) -> Self {
        Self {
            field,
            status: SessionStatus::Idle,
            transcript: TranscriptState::new(field),
            silence: field.is_primary().then(|| SilenceTimer::new(silence_window)),
        }
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn transcript(&self) -> &TranscriptState {
        &self.transcript
    }

    pub fn silence_deadline(&self) -> Option<Instant> {
        if self.status != SessionStatus::Listening {
            return None;
        }
        self.silence.as_ref().and_then(|t| t.deadline())
    }

    /// idle → listening. Resets the transcript.
    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.status == SessionStatus::Committing {
            return Err(SessionError::CommitInProgress(self.field));
        }
        self.transcript.clear();
        if let Some(timer) = self.silence.as_mut() {
            timer.cancel();
        }
        self.status = SessionStatus::Listening;
        log::info!("[SPEECH] {} listening", self.field);
        Ok(())
    }

    /// Back to idle without committing (engine refused to start).
    pub fn abort(&mut self) {
        if let Some(timer) = self.silence.as_mut() {
            timer.cancel();
        }
        self.status = SessionStatus::Idle;
    }

    /// Merge one result event. Returns the text the field should now show,
    /// or `None` when the session is not listening.
    pub fn apply_result(&mut self, event: &RecognitionResultEvent, now: Instant) -> Option<String> {
        if self.status != SessionStatus::Listening {
            log::debug!("[SPEECH] {} ignoring result while {:?}", self.field, self.status);
            return None;
        }

        let mut interim = String::new();
        for result in event.changed() {
            let Some(text) = result.best_transcript() else {
                continue;
            };
            if result.is_final {
                let outcome = self.transcript.merge_final(text);
                log::debug!("[SPEECH] {} final {:?}: {:?}", self.field, outcome, text);
                if let Some(timer) = self.silence.as_mut() {
                    timer.arm(now);
                }
            } else {
                interim.push_str(text);
            }
        }
        self.transcript.set_interim(interim);
        Some(self.transcript.display_text())
    }

    pub fn apply_error(&mut self, code: &RecognitionErrorCode) -> ErrorDisposition {
        if self.status != SessionStatus::Listening || code.is_transient() {
            log::debug!("[SPEECH] {} ignoring error {:?}", self.field, code);
            return ErrorDisposition::Ignored;
        }
        log::error!("[SPEECH] {} session failed: {:?}", self.field, code);
        self.abort();
        ErrorDisposition::Failed(code.user_message())
    }

    /// True once the silence window elapsed after the last final span.
    pub fn silence_due(&self, now: Instant) -> bool {
        self.status == SessionStatus::Listening
            && self.transcript.has_final()
            && self.silence.as_ref().is_some_and(|t| t.is_due(now))
    }

    /// listening → committing. Returns the trimmed final text, or `None`
    /// when the session was not listening.
    pub fn begin_commit(&mut self) -> Option<String> {
        if self.status != SessionStatus::Listening {
            return None;
        }
        if let Some(timer) = self.silence.as_mut() {
            timer.cancel();
        }
        self.transcript.clear_interim();
        self.status = SessionStatus::Committing;
        Some(self.transcript.final_text().trim().to_string())
    }

    /// committing → idle. The transcript is discarded.
    pub fn finish_commit(&mut self) {
        self.transcript.clear();
        self.status = SessionStatus::Idle;
        log::info!("[SPEECH] {} idle", self.field);
    }
}
