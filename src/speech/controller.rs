//! Speech controller — owns the shared recognition engine.
//!
//! Coordinates the three field sessions, the classification resolver and
//! the form:
//! - at most one field listens at a time (stop-before-start preemption)
//! - engine events are routed to the listening session in arrival order
//! - events after a stop the controller requested are dropped up to that
//!   stop's `End`
//! - commits classify the primary field and write secondary fields directly
//!
//! Driven by a single task via [`SpeechController::run`], so no locking.

use super::engine::{EngineEvent, RecognitionConfig, RecognitionEngine};
use super::session::{ErrorDisposition, SpeechSession};
use super::{Field, SessionEvent, SessionStatus};
use crate::classify::ClassificationResolver;
use crate::config::IntakeConfig;
use crate::error::SessionError;
use crate::form::{validate_description, IntakeForm};
use tokio::sync::{broadcast, mpsc};
use tokio::time::Instant;

const EVENT_CAPACITY: usize = 64;

pub struct SpeechController {
    engine: Box<dyn RecognitionEngine>,
    recognition: RecognitionConfig,
    sessions: [SpeechSession; 3],
    active: Option<Field>,
    /// Field text before the active session started, restored when a
    /// session commits without any final text.
    restore_value: Option<String>,
    /// Stops requested by the controller whose `End` has not arrived yet.
    /// Events up to each of those `End`s belong to a finished session.
    pending_ends: usize,
    resolver: ClassificationResolver,
    form: IntakeForm,
    min_chars: usize,
    events: broadcast::Sender<SessionEvent>,
}

fn slot(field: Field) -> usize {
    match field {
        Field::Principal => 0,
        Field::Objetivo => 1,
        Field::Reto => 2,
    }
}

impl SpeechController {
    pub fn new(
        engine: Box<dyn RecognitionEngine>,
        resolver: ClassificationResolver,
        config: &IntakeConfig,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            engine,
            recognition: RecognitionConfig::continuous(config.speech_lang.clone()),
            sessions: Field::ALL.map(|f| SpeechSession::new(f, config.silence_window)),
            active: None,
            restore_value: None,
            pending_ends: 0,
            resolver,
            form: IntakeForm::new(),
            min_chars: config.min_description_chars,
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn form(&self) -> &IntakeForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut IntakeForm {
        &mut self.form
    }

    pub fn resolver(&self) -> &ClassificationResolver {
        &self.resolver
    }

    pub fn status(&self, field: Field) -> SessionStatus {
        self.sessions[slot(field)].status()
    }

    pub fn session(&self, field: Field) -> &SpeechSession {
        &self.sessions[slot(field)]
    }

    pub fn active_field(&self) -> Option<Field> {
        self.active
    }

    /// Deadline of the listening session's silence window, if armed.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.active.and_then(|f| self.sessions[slot(f)].silence_deadline())
    }

    fn stop_engine(&mut self) {
        self.engine.stop();
        self.pending_ends += 1;
    }

    fn emit(&self, event: SessionEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    /// Start listening on `field`. A different listening field is committed
    /// first; a field that is still committing is rejected.
    pub async fn start(&mut self, field: Field) -> Result<(), SessionError> {
        if self.status(field) == SessionStatus::Committing {
            return Err(SessionError::CommitInProgress(field));
        }
        match self.active {
            Some(current) if current == field => return Ok(()),
            Some(current) => {
                log::info!("[SPEECH] {} preempts {} — committing {} first", field, current, current);
                self.commit(current, true).await;
            }
            None => {}
        }

        self.sessions[slot(field)].start()?;
        self.engine.configure(&self.recognition);
        if let Err(e) = self.engine.start() {
            log::error!("[SPEECH] Engine failed to start for {}: {}", field, e);
            self.sessions[slot(field)].abort();
            return Err(SessionError::Engine(e));
        }

        self.active = Some(field);
        self.restore_value = Some(self.form.field_value(field).to_string());
        self.emit(SessionEvent::ListeningStarted { field });
        Ok(())
    }

    /// Manual stop: commit whatever final text has accumulated.
    pub async fn stop(&mut self, field: Field) {
        if self.status(field) == SessionStatus::Listening {
            self.commit(field, true).await;
        }
    }

    /// Microphone button: stop when listening, start otherwise.
    pub async fn toggle(&mut self, field: Field) -> Result<(), SessionError> {
        if self.status(field) == SessionStatus::Listening {
            self.stop(field).await;
            Ok(())
        } else {
            self.start(field).await
        }
    }

    pub async fn handle_event(&mut self, event: EngineEvent) {
        if self.pending_ends > 0 {
            if matches!(event, EngineEvent::End) {
                self.pending_ends -= 1;
                log::debug!("[SPEECH] Engine confirmed stop ({} pending)", self.pending_ends);
            } else {
                log::debug!("[SPEECH] Dropping late event from a stopped session: {:?}", event);
            }
            return;
        }

        let Some(field) = self.active else {
            log::debug!("[SPEECH] Dropping engine event with no active session: {:?}", event);
            return;
        };

        match event {
            EngineEvent::Result(result) => {
                let now = Instant::now();
                if let Some(text) = self.sessions[slot(field)].apply_result(&result, now) {
                    self.form.set_field_value(field, text.clone());
                    self.emit(SessionEvent::TranscriptUpdated { field, text });
                }
            }
            EngineEvent::Error(code) => {
                if let ErrorDisposition::Failed(message) = self.sessions[slot(field)].apply_error(&code) {
                    self.stop_engine();
                    self.active = None;
                    self.restore_value = None;
                    self.emit(SessionEvent::SessionFailed {
                        field,
                        message: message.to_string(),
                    });
                }
            }
            EngineEvent::End => {
                log::info!("[SPEECH] Engine ended while {} was listening", field);
                self.commit(field, false).await;
            }
        }
    }

    /// Auto-commit the primary field once its silence window has passed.
    pub async fn poll_silence(&mut self, now: Instant) -> bool {
        let Some(field) = self.active else {
            return false;
        };
        if !self.sessions[slot(field)].silence_due(now) {
            return false;
        }
        log::info!("[SPEECH] Silence window elapsed — auto-committing {}", field);
        self.commit(field, true).await;
        true
    }

    /// `engine_running` is false when the engine already ended on its own,
    /// so no further `End` will follow.
    async fn commit(&mut self, field: Field, engine_running: bool) {
        let index = slot(field);
        let Some(text) = self.sessions[index].begin_commit() else {
            return;
        };
        if engine_running {
            self.stop_engine();
        }
        if self.active == Some(field) {
            self.active = None;
        }
        let restore = self.restore_value.take();
        self.emit(SessionEvent::Committing { field });

        if text.is_empty() {
            log::info!("[SPEECH] {} committed with no final text", field);
            if let Some(previous) = restore {
                self.form.set_field_value(field, previous);
            }
            self.sessions[index].finish_commit();
            self.emit(SessionEvent::Committed {
                field,
                text,
                suggestion: None,
            });
            return;
        }

        self.form.set_field_value(field, text.clone());

        let suggestion = if field.is_primary() {
            match validate_description(&text, self.min_chars) {
                Ok(valid) => {
                    let resolved = self.resolver.resolve(valid).await;
                    self.form.set_classification_suggestion(resolved.clone());
                    Some(resolved)
                }
                Err(e) => {
                    log::warn!("[SPEECH] Dictated description rejected: {}", e);
                    self.emit(SessionEvent::ValidationRejected {
                        field,
                        message: e.user_message(),
                    });
                    None
                }
            }
        } else {
            None
        };

        self.sessions[index].finish_commit();
        log::info!("[SPEECH] {} committed ({} chars)", field, text.chars().count());
        self.emit(SessionEvent::Committed {
            field,
            text,
            suggestion,
        });
    }

    /// Drive the listening session until it is idle again.
    ///
    /// Consumes engine events in order and fires the silence window. A
    /// closed channel is treated like the engine ending.
    pub async fn run(&mut self, events: &mut mpsc::UnboundedReceiver<EngineEvent>) {
        while let Some(field) = self.active {
            let deadline = self.next_deadline();
            tokio::select! {
                maybe = events.recv() => match maybe {
                    Some(event) => self.handle_event(event).await,
                    None => {
                        log::warn!("[SPEECH] Engine channel closed while {} was listening", field);
                        self.engine.stop();
                        self.pending_ends = 0;
                        self.commit(field, false).await;
                    }
                },
                _ = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.poll_silence(Instant::now()).await;
                }
            }
        }
    }
}
