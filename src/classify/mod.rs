//! Classification domain — free text to {area, objective, challenge}.
//!
//! Public API for turning a description (typed or dictated) into a
//! structured guess. External code should go through
//! [`ClassificationResolver`]; the individual classifiers are exported for
//! tests and for callers that want one path explicitly.
//!
//! Classifiers:
//!   - keywords (local.rs)  — deterministic, never fails
//!   - remote   (remote.rs) — backend interpret-voice endpoint

pub mod keywords;
mod local;
mod remote;
mod resolver;
pub mod types;

pub use local::KeywordClassifier;
pub use remote::RemoteClassifier;
pub use resolver::ClassificationResolver;
pub use types::{BusinessArea, ClassificationGuess, GuessSource, RawGuess, ResolvedGuess};

use crate::error::ClassifyError;
use async_trait::async_trait;

/// Anything that can propose a guess for a piece of text.
///
/// The returned area is unvalidated; the resolver checks it.
#[async_trait]
pub trait Classifier: Send + Sync {
    fn name(&self) -> &'static str;

    async fn classify(&self, text: &str) -> Result<RawGuess, ClassifyError>;
}
