//! Classification resolver — remote first, keyword classifier as fallback.
//!
//! `resolve` never fails: every remote failure degrades to the local guess,
//! and a remote guess with an unknown area gets the local area instead.

use super::local::KeywordClassifier;
use super::remote::RemoteClassifier;
use super::types::{BusinessArea, ClassificationGuess, GuessSource, ResolvedGuess};
use super::Classifier;
use crate::config::IntakeConfig;

pub struct ClassificationResolver {
    remote: Option<Box<dyn Classifier>>,
    local: KeywordClassifier,
}

impl ClassificationResolver {
    pub fn new(remote: Option<Box<dyn Classifier>>) -> Self {
        Self {
            remote,
            local: KeywordClassifier::new(),
        }
    }

    /// Keyword classifier only.
    pub fn local_only() -> Self {
        Self::new(None)
    }

    /// Remote backend from config, or local-only when disabled or the HTTP
    /// client cannot be built.
    pub fn from_config(config: &IntakeConfig) -> Self {
        if !config.remote_enabled {
            log::info!("[CLASSIFY] Remote classifier disabled — keyword classifier only");
            return Self::local_only();
        }
        match RemoteClassifier::from_config(config) {
            Ok(remote) => Self::new(Some(Box::new(remote))),
            Err(e) => {
                log::error!("[CLASSIFY] Could not build remote client: {} — keyword classifier only", e);
                Self::local_only()
            }
        }
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Resolve `text` into a validated guess. One remote attempt, no retry.
    pub async fn resolve(&self, text: &str) -> ResolvedGuess {
        let Some(remote) = self.remote.as_ref() else {
            return self.local_guess(text);
        };

        match remote.classify(text).await {
            Ok(raw) => match BusinessArea::from_id(&raw.area_negocio) {
                Some(area) => {
                    log::info!("[CLASSIFY] {} guess accepted: area={}", remote.name(), area);
                    ResolvedGuess {
                        guess: ClassificationGuess {
                            area_negocio: area,
                            objetivo: raw.objetivo,
                            reto: raw.reto,
                        },
                        source: GuessSource::Remote,
                    }
                }
                None => {
                    let area = self.local.classify_text(text).area_negocio;
                    log::warn!(
                        "[CLASSIFY] {} returned unknown area {:?} — using keyword area {}",
                        remote.name(),
                        raw.area_negocio,
                        area
                    );
                    ResolvedGuess {
                        guess: ClassificationGuess {
                            area_negocio: area,
                            objetivo: raw.objetivo,
                            reto: raw.reto,
                        },
                        source: GuessSource::RemoteCorrected,
                    }
                }
            },
            Err(e) => {
                log::warn!("[CLASSIFY] {} failed: {} — falling back to keywords", remote.name(), e);
                self.local_guess(text)
            }
        }
    }

    fn local_guess(&self, text: &str) -> ResolvedGuess {
        ResolvedGuess {
            guess: self.local.classify_text(text),
            source: GuessSource::Local,
        }
    }
}
