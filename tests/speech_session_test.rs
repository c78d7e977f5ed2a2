//! Speech controller tests with a scripted recognition engine.
//!
//! Time is paused, so the silence window elapses instantly and
//! deterministically once every task is idle.

use prompt_intake_lib::classify::{BusinessArea, ClassificationResolver, GuessSource};
use prompt_intake_lib::config::IntakeConfig;
use prompt_intake_lib::error::SessionError;
use prompt_intake_lib::speech::{
    EngineEvent, Field, RecognitionConfig, RecognitionEngine, RecognitionErrorCode,
    RecognitionResult, RecognitionResultEvent, SessionEvent, SessionStatus, SpeechController,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Debug, Default)]
struct EngineLog {
    configs: Vec<RecognitionConfig>,
    starts: usize,
    stops: usize,
    refuse_start: bool,
    /// Final delivered after `stop()`, before the `End`.
    late_final: Option<String>,
}

struct MockEngine {
    log: Arc<Mutex<EngineLog>>,
    /// Mirrors a browser engine: every stop is followed by an `End`.
    events: Option<mpsc::UnboundedSender<EngineEvent>>,
}

impl RecognitionEngine for MockEngine {
    fn configure(&mut self, config: &RecognitionConfig) {
        self.log.lock().unwrap().configs.push(config.clone());
    }

    fn start(&mut self) -> Result<(), String> {
        let mut log = self.log.lock().unwrap();
        if log.refuse_start {
            return Err("microphone busy".to_string());
        }
        log.starts += 1;
        Ok(())
    }

    fn stop(&mut self) {
        let mut log = self.log.lock().unwrap();
        log.stops += 1;
        if let Some(tx) = &self.events {
            if let Some(text) = log.late_final.take() {
                tx.send(finals(0, &[text.as_str()])).unwrap();
            }
            tx.send(EngineEvent::End).unwrap();
        }
    }
}

fn controller() -> (SpeechController, Arc<Mutex<EngineLog>>) {
    let log = Arc::new(Mutex::new(EngineLog::default()));
    let engine = MockEngine {
        log: log.clone(),
        events: None,
    };
    let controller = SpeechController::new(
        Box::new(engine),
        ClassificationResolver::local_only(),
        &IntakeConfig::default(),
    );
    (controller, log)
}

type Wired = (
    SpeechController,
    Arc<Mutex<EngineLog>>,
    mpsc::UnboundedSender<EngineEvent>,
    mpsc::UnboundedReceiver<EngineEvent>,
);

/// Controller whose engine reports `End` on the event channel after each stop.
fn wired_controller() -> Wired {
    let log = Arc::new(Mutex::new(EngineLog::default()));
    let (tx, rx) = mpsc::unbounded_channel();
    let engine = MockEngine {
        log: log.clone(),
        events: Some(tx.clone()),
    };
    let controller = SpeechController::new(
        Box::new(engine),
        ClassificationResolver::local_only(),
        &IntakeConfig::default(),
    );
    (controller, log, tx, rx)
}

fn finals(index: usize, spans: &[&str]) -> EngineEvent {
    EngineEvent::Result(RecognitionResultEvent {
        result_index: index,
        results: spans.iter().map(|s| RecognitionResult::final_text(s)).collect(),
    })
}

fn drain(rx: &mut tokio::sync::broadcast::Receiver<SessionEvent>) -> Vec<SessionEvent> {
    let mut out = Vec::new();
    while let Ok(ev) = rx.try_recv() {
        out.push(ev);
    }
    out
}

#[tokio::test(start_paused = true)]
async fn start_configures_continuous_spanish() {
    let (mut controller, log) = controller();
    let mut events = controller.subscribe();

    controller.start(Field::Principal).await.unwrap();

    let log = log.lock().unwrap();
    assert_eq!(log.starts, 1);
    assert_eq!(log.configs[0], RecognitionConfig::continuous("es-ES"));
    assert!(log.configs[0].continuous && log.configs[0].interim_results);
    assert_eq!(controller.status(Field::Principal), SessionStatus::Listening);
    assert!(matches!(
        drain(&mut events).as_slice(),
        [SessionEvent::ListeningStarted { field: Field::Principal }]
    ));
}

#[tokio::test(start_paused = true)]
async fn silence_auto_commits_primary_once() {
    let (mut controller, log) = controller();
    let mut events = controller.subscribe();
    let (tx, mut rx) = mpsc::unbounded_channel();

    controller.start(Field::Principal).await.unwrap();
    tx.send(finals(
        0,
        &["Necesito crear una campaña de marketing para aumentar las ventas de mi producto"],
    ))
    .unwrap();
    tx.send(EngineEvent::Result(RecognitionResultEvent {
        result_index: 1,
        results: vec![
            RecognitionResult::final_text("x"),
            RecognitionResult::final_text("pero tengo poco presupuesto"),
        ],
    }))
    .unwrap();

    let started = tokio::time::Instant::now();
    controller.run(&mut rx).await;

    assert!(started.elapsed() >= Duration::from_secs(6));
    assert_eq!(controller.status(Field::Principal), SessionStatus::Idle);
    assert_eq!(controller.active_field(), None);
    assert_eq!(log.lock().unwrap().stops, 1);

    let fields = controller.form().fields();
    assert_eq!(fields.area_negocio, Some(BusinessArea::Marketing));
    assert_eq!(fields.objetivo, "Aumentar ventas/conversiones");
    assert_eq!(fields.reto, "Recursos limitados");
    assert_eq!(
        controller.form().description(),
        "Necesito crear una campaña de marketing para aumentar las ventas de mi producto pero tengo poco presupuesto"
    );

    let commits: Vec<_> = drain(&mut events)
        .into_iter()
        .filter(|e| matches!(e, SessionEvent::Committed { .. }))
        .collect();
    assert_eq!(commits.len(), 1);
    match &commits[0] {
        SessionEvent::Committed { suggestion, .. } => {
            assert_eq!(suggestion.as_ref().unwrap().source, GuessSource::Local);
        }
        _ => unreachable!(),
    }

    // Nothing left to fire.
    assert!(!controller.poll_silence(tokio::time::Instant::now() + Duration::from_secs(60)).await);
}

#[tokio::test(start_paused = true)]
async fn each_final_resets_the_silence_window() {
    let (mut controller, _log) = controller();
    controller.start(Field::Principal).await.unwrap();

    controller.handle_event(finals(0, &["quiero mejorar mi "])).await;
    let first_deadline = controller.next_deadline().unwrap();

    tokio::time::advance(Duration::from_secs(4)).await;
    controller.handle_event(finals(0, &["quiero mejorar mi negocio"])).await;
    let second_deadline = controller.next_deadline().unwrap();
    assert_eq!(second_deadline - first_deadline, Duration::from_secs(4));

    tokio::time::advance(Duration::from_secs(3)).await;
    assert!(!controller.poll_silence(tokio::time::Instant::now()).await);
    assert_eq!(controller.status(Field::Principal), SessionStatus::Listening);
    assert_eq!(
        controller.session(Field::Principal).transcript().final_segments(),
        ["quiero mejorar mi negocio"]
    );

    tokio::time::advance(Duration::from_secs(3)).await;
    assert!(controller.poll_silence(tokio::time::Instant::now()).await);
    assert_eq!(controller.status(Field::Principal), SessionStatus::Idle);
}

#[tokio::test(start_paused = true)]
async fn secondary_field_takes_dictated_text_without_classifying() {
    let (mut controller, _log) = controller();
    let mut events = controller.subscribe();

    controller.start(Field::Objetivo).await.unwrap();
    controller
        .handle_event(EngineEvent::Result(RecognitionResultEvent {
            result_index: 0,
            results: vec![
                RecognitionResult::final_text("duplicar las ventas"),
                RecognitionResult::interim_text("este"),
            ],
        }))
        .await;
    assert_eq!(controller.form().fields().objetivo, "duplicar las ventas este");

    // no auto-commit for secondary fields
    tokio::time::advance(Duration::from_secs(30)).await;
    assert!(!controller.poll_silence(tokio::time::Instant::now()).await);

    controller.stop(Field::Objetivo).await;
    assert_eq!(controller.form().fields().objetivo, "duplicar las ventas");
    assert_eq!(controller.form().fields().area_negocio, None);
    assert!(controller.form().suggestion().is_none());

    let committed = drain(&mut events)
        .into_iter()
        .find(|e| matches!(e, SessionEvent::Committed { .. }))
        .unwrap();
    match committed {
        SessionEvent::Committed { field, text, suggestion } => {
            assert_eq!(field, Field::Objetivo);
            assert_eq!(text, "duplicar las ventas");
            assert!(suggestion.is_none());
        }
        _ => unreachable!(),
    }
}

#[tokio::test(start_paused = true)]
async fn starting_another_field_commits_the_listening_one() {
    let (mut controller, log) = controller();
    controller.start(Field::Reto).await.unwrap();
    controller.handle_event(finals(0, &["poco presupuesto"])).await;

    controller.start(Field::Objetivo).await.unwrap();

    assert_eq!(controller.status(Field::Reto), SessionStatus::Idle);
    assert_eq!(controller.status(Field::Objetivo), SessionStatus::Listening);
    assert_eq!(controller.active_field(), Some(Field::Objetivo));
    assert_eq!(controller.form().fields().reto, "poco presupuesto");
    let log = log.lock().unwrap();
    assert_eq!(log.starts, 2);
    assert_eq!(log.stops, 1);
}

#[tokio::test(start_paused = true)]
async fn manual_stop_with_short_description_skips_classification() {
    let (mut controller, _log) = controller();
    let mut events = controller.subscribe();
    controller.start(Field::Principal).await.unwrap();
    controller.handle_event(finals(0, &["hola"])).await;

    controller.toggle(Field::Principal).await.unwrap();

    assert_eq!(controller.status(Field::Principal), SessionStatus::Idle);
    assert_eq!(controller.form().description(), "hola");
    assert!(controller.form().suggestion().is_none());
    assert!(drain(&mut events)
        .iter()
        .any(|e| matches!(e, SessionEvent::ValidationRejected { field: Field::Principal, .. })));
}

#[tokio::test(start_paused = true)]
async fn no_speech_error_keeps_listening() {
    let (mut controller, _log) = controller();
    controller.start(Field::Principal).await.unwrap();
    controller.handle_event(finals(0, &["tengo una clínica"])).await;
    let deadline = controller.next_deadline();

    controller
        .handle_event(EngineEvent::Error(RecognitionErrorCode::NoSpeech))
        .await;

    assert_eq!(controller.status(Field::Principal), SessionStatus::Listening);
    assert_eq!(controller.next_deadline(), deadline);
}

#[tokio::test(start_paused = true)]
async fn permission_denied_ends_session_and_keeps_text() {
    let (mut controller, log) = controller();
    let mut events = controller.subscribe();
    controller.start(Field::Reto).await.unwrap();
    controller.handle_event(finals(0, &["falta de personal"])).await;

    controller
        .handle_event(EngineEvent::Error(RecognitionErrorCode::from_code("not-allowed")))
        .await;

    assert_eq!(controller.status(Field::Reto), SessionStatus::Idle);
    assert_eq!(controller.active_field(), None);
    assert_eq!(controller.form().fields().reto, "falta de personal");
    assert_eq!(log.lock().unwrap().stops, 1);
    assert!(drain(&mut events).iter().any(|e| matches!(
        e,
        SessionEvent::SessionFailed { field: Field::Reto, message } if message.contains("micrófono")
    )));

    // user may retry
    controller.start(Field::Reto).await.unwrap();
    assert_eq!(controller.status(Field::Reto), SessionStatus::Listening);
}

#[tokio::test(start_paused = true)]
async fn engine_end_commits_like_manual_stop() {
    let (mut controller, _log) = controller();
    let (tx, mut rx) = mpsc::unbounded_channel();
    controller.start(Field::Objetivo).await.unwrap();
    tx.send(finals(0, &["abrir una tienda online"])).unwrap();
    tx.send(EngineEvent::End).unwrap();

    controller.run(&mut rx).await;

    assert_eq!(controller.status(Field::Objetivo), SessionStatus::Idle);
    assert_eq!(controller.form().fields().objetivo, "abrir una tienda online");
}

#[tokio::test(start_paused = true)]
async fn empty_commit_restores_previous_value() {
    let (mut controller, _log) = controller();
    controller
        .form_mut()
        .set_field_value(Field::Reto, "competencia fuerte");
    controller.start(Field::Reto).await.unwrap();
    controller
        .handle_event(EngineEvent::Result(RecognitionResultEvent {
            result_index: 0,
            results: vec![RecognitionResult::interim_text("eh")],
        }))
        .await;
    assert_eq!(controller.form().fields().reto, "eh");

    controller.stop(Field::Reto).await;
    assert_eq!(controller.form().fields().reto, "competencia fuerte");
}

#[tokio::test(start_paused = true)]
async fn engine_refusing_to_start_leaves_field_idle() {
    let (mut controller, log) = controller();
    log.lock().unwrap().refuse_start = true;

    let err = controller.start(Field::Principal).await.unwrap_err();
    assert!(matches!(err, SessionError::Engine(_)));
    assert_eq!(controller.status(Field::Principal), SessionStatus::Idle);
    assert_eq!(controller.active_field(), None);
}

#[tokio::test(start_paused = true)]
async fn events_without_active_session_are_dropped() {
    let (mut controller, _log) = controller();
    controller.handle_event(finals(0, &["nadie escucha"])).await;
    assert_eq!(controller.form().description(), "");
}

#[tokio::test(start_paused = true)]
async fn preempted_session_end_does_not_reach_next_field() {
    let (mut controller, log, tx, mut rx) = wired_controller();
    controller.start(Field::Reto).await.unwrap();
    controller.handle_event(finals(0, &["poco presupuesto"])).await;
    log.lock().unwrap().late_final = Some("y competencia".to_string());

    controller.start(Field::Objetivo).await.unwrap();
    tx.send(finals(0, &["duplicar las ventas"])).unwrap();

    // Objetivo has no silence window, so run only returns if it stopped.
    let still_running = tokio::time::timeout(Duration::from_secs(30), controller.run(&mut rx))
        .await
        .is_err();
    assert!(still_running);
    assert_eq!(controller.status(Field::Objetivo), SessionStatus::Listening);
    assert_eq!(controller.form().fields().objetivo, "duplicar las ventas");
    assert_eq!(controller.form().fields().reto, "poco presupuesto");

    tx.send(EngineEvent::End).unwrap();
    controller.run(&mut rx).await;
    assert_eq!(controller.status(Field::Objetivo), SessionStatus::Idle);
    assert_eq!(controller.form().fields().objetivo, "duplicar las ventas");
}

#[tokio::test(start_paused = true)]
async fn restart_after_stop_ignores_queued_end() {
    let (mut controller, _log, tx, mut rx) = wired_controller();
    controller.start(Field::Reto).await.unwrap();
    controller.handle_event(finals(0, &["falta de personal"])).await;
    controller.stop(Field::Reto).await;
    assert_eq!(controller.form().fields().reto, "falta de personal");

    controller.start(Field::Reto).await.unwrap();
    tx.send(finals(0, &["rotación alta"])).unwrap();
    tx.send(EngineEvent::End).unwrap();
    controller.run(&mut rx).await;

    assert_eq!(controller.status(Field::Reto), SessionStatus::Idle);
    assert_eq!(controller.form().fields().reto, "rotación alta");
}
