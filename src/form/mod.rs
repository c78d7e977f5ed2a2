//! Form state — the structured fields behind the authoring form.
//!
//! `IntakeForm` is the only writer of field state. Values arrive from
//! direct edits, from a finished speech commit, or from the typed
//! "describe your idea" flow, and leave through [`IntakeForm::submit`].

mod payload;

pub use payload::{SubmissionPayload, AVAILABLE_MODELS, DEFAULT_MODEL};

use crate::classify::{BusinessArea, ClassificationResolver, ResolvedGuess};
use crate::error::ValidationError;
use crate::speech::Field;
use serde::Serialize;

/// Editable structured fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldState {
    pub area_negocio: Option<BusinessArea>,
    pub objetivo: String,
    pub reto: String,
}

#[derive(Debug, Clone, Default)]
pub struct IntakeForm {
    descripcion: String,
    fields: FieldState,
    suggestion: Option<ResolvedGuess>,
    model: Option<String>,
}

/// Check that a description is long enough to classify.
pub fn validate_description(text: &str, min_chars: usize) -> Result<&str, ValidationError> {
    let trimmed = text.trim();
    let len = trimmed.chars().count();
    if len < min_chars {
        return Err(ValidationError::TooShort { min: min_chars, len });
    }
    Ok(trimmed)
}

impl IntakeForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn description(&self) -> &str {
        &self.descripcion
    }

    pub fn fields(&self) -> &FieldState {
        &self.fields
    }

    pub fn suggestion(&self) -> Option<&ResolvedGuess> {
        self.suggestion.as_ref()
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// Current text of a dictation target.
    pub fn field_value(&self, field: Field) -> &str {
        match field {
            Field::Principal => &self.descripcion,
            Field::Objetivo => &self.fields.objetivo,
            Field::Reto => &self.fields.reto,
        }
    }

    /// Direct edit or dictated text. The primary field is the description.
    pub fn set_field_value(&mut self, field: Field, text: impl Into<String>) {
        let text = text.into();
        match field {
            Field::Principal => self.descripcion = text,
            Field::Objetivo => self.fields.objetivo = text,
            Field::Reto => self.fields.reto = text,
        }
    }

    pub fn select_area(&mut self, area: BusinessArea) {
        self.fields.area_negocio = Some(area);
    }

    pub fn select_model(&mut self, model: &str) -> Result<(), ValidationError> {
        if !AVAILABLE_MODELS.contains(&model) {
            return Err(ValidationError::UnknownModel(model.to_string()));
        }
        self.model = Some(model.to_string());
        Ok(())
    }

    /// Populate all three fields from a resolved guess and remember it.
    pub fn set_classification_suggestion(&mut self, resolved: ResolvedGuess) {
        log::info!(
            "[FORM] Suggestion applied: area={} source={:?}",
            resolved.guess.area_negocio,
            resolved.source
        );
        self.fields = FieldState {
            area_negocio: Some(resolved.guess.area_negocio),
            objetivo: resolved.guess.objetivo.clone(),
            reto: resolved.guess.reto.clone(),
        };
        self.suggestion = Some(resolved);
    }

    /// Reset the three fields, the description and the remembered suggestion.
    pub fn clear_suggestion(&mut self) {
        self.suggestion = None;
        self.descripcion.clear();
        self.fields = FieldState::default();
        log::info!("[FORM] Suggestions cleared");
    }

    /// The current area still matches the automatic suggestion.
    pub fn is_auto_selected(&self, area: BusinessArea) -> bool {
        self.fields.area_negocio == Some(area)
            && self
                .suggestion
                .as_ref()
                .is_some_and(|s| s.guess.area_negocio == area)
    }

    /// Typed "describe your idea" flow: validate the description, classify
    /// it and apply the result. Short input never reaches the resolver.
    pub async fn analyze_description(
        &mut self,
        resolver: &ClassificationResolver,
        min_chars: usize,
    ) -> Result<ResolvedGuess, ValidationError> {
        let text = validate_description(&self.descripcion, min_chars)?.to_string();
        let resolved = resolver.resolve(&text).await;
        self.set_classification_suggestion(resolved.clone());
        Ok(resolved)
    }

    pub fn submit(&self) -> Result<SubmissionPayload, ValidationError> {
        let area = self.fields.area_negocio.ok_or(ValidationError::MissingArea)?;
        if self.fields.objetivo.trim().is_empty() {
            return Err(ValidationError::MissingObjective);
        }
        let payload = SubmissionPayload {
            area_negocio: area,
            objetivo: self.fields.objetivo.trim().to_string(),
            reto: self.fields.reto.trim().to_string(),
            modelo: self.model.clone().unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        };
        log::info!("[FORM] Submitting area={} modelo={}", payload.area_negocio, payload.modelo);
        Ok(payload)
    }
}
