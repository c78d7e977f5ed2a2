//! Classification types — business areas and structured guesses.
//!
//! The backend returns JSON that deserializes into [`RawGuess`]. Its area is
//! a free string until the resolver has checked it against [`BusinessArea`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of business areas, in declaration order.
///
/// Declaration order matters: the keyword classifier breaks score ties in
/// favor of the earlier area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BusinessArea {
    #[serde(rename = "marketing")]
    Marketing,
    #[serde(rename = "programacion")]
    Programacion,
    #[serde(rename = "finanzas")]
    Finanzas,
    #[serde(rename = "recursos-humanos")]
    RecursosHumanos,
    #[serde(rename = "atencion-cliente")]
    AtencionCliente,
    #[serde(rename = "educacion")]
    Educacion,
    #[serde(rename = "salud")]
    Salud,
    #[serde(rename = "creatividad")]
    Creatividad,
}

impl BusinessArea {
    pub const ALL: [BusinessArea; 8] = [
        BusinessArea::Marketing,
        BusinessArea::Programacion,
        BusinessArea::Finanzas,
        BusinessArea::RecursosHumanos,
        BusinessArea::AtencionCliente,
        BusinessArea::Educacion,
        BusinessArea::Salud,
        BusinessArea::Creatividad,
    ];

    /// Area used when nothing in the text matches.
    pub const DEFAULT: BusinessArea = BusinessArea::Marketing;

    pub fn id(self) -> &'static str {
        match self {
            BusinessArea::Marketing => "marketing",
            BusinessArea::Programacion => "programacion",
            BusinessArea::Finanzas => "finanzas",
            BusinessArea::RecursosHumanos => "recursos-humanos",
            BusinessArea::AtencionCliente => "atencion-cliente",
            BusinessArea::Educacion => "educacion",
            BusinessArea::Salud => "salud",
            BusinessArea::Creatividad => "creatividad",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            BusinessArea::Marketing => "Marketing y Ventas",
            BusinessArea::Programacion => "Programación y Desarrollo",
            BusinessArea::Finanzas => "Finanzas y Contabilidad",
            BusinessArea::RecursosHumanos => "Recursos Humanos",
            BusinessArea::AtencionCliente => "Atención al Cliente",
            BusinessArea::Educacion => "Educación y Formación",
            BusinessArea::Salud => "Salud y Medicina",
            BusinessArea::Creatividad => "Creatividad y Diseño",
        }
    }

    /// Exact id lookup. Case and surrounding whitespace are not forgiven.
    pub fn from_id(id: &str) -> Option<BusinessArea> {
        Self::ALL.into_iter().find(|a| a.id() == id)
    }
}

impl fmt::Display for BusinessArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Validated structured guess: area, objective, challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationGuess {
    pub area_negocio: BusinessArea,
    pub objetivo: String,
    pub reto: String,
}

/// Unvalidated guess as produced by a [`super::Classifier`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGuess {
    pub area_negocio: String,
    pub objetivo: String,
    pub reto: String,
}

impl From<ClassificationGuess> for RawGuess {
    fn from(guess: ClassificationGuess) -> Self {
        Self {
            area_negocio: guess.area_negocio.id().to_string(),
            objetivo: guess.objetivo,
            reto: guess.reto,
        }
    }
}

/// Which path produced a resolved guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GuessSource {
    Remote,
    /// Remote guess whose area was replaced by the keyword result.
    RemoteCorrected,
    Local,
}

impl GuessSource {
    /// The keyword path is less reliable than the remote model.
    pub fn is_low_confidence(self) -> bool {
        !matches!(self, GuessSource::Remote)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedGuess {
    pub guess: ClassificationGuess,
    pub source: GuessSource,
}
