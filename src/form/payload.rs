//! Submission payload handed to the prompt optimizer.

use crate::classify::BusinessArea;
use serde::Serialize;

pub const AVAILABLE_MODELS: [&str; 4] = ["gpt-4", "claude-3-opus", "gemini-1.5-pro", "deepseek"];
pub const DEFAULT_MODEL: &str = "gpt-4";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub area_negocio: BusinessArea,
    pub objetivo: String,
    pub reto: String,
    pub modelo: String,
}

impl SubmissionPayload {
    /// Query text in the format the optimizer parses. The challenge line is
    /// omitted when there is no challenge.
    pub fn consulta(&self) -> String {
        if self.reto.is_empty() {
            format!("OBJETIVO: {}", self.objetivo)
        } else {
            format!("OBJETIVO: {}\nRETO ESPECÍFICO: {}", self.objetivo, self.reto)
        }
    }
}
