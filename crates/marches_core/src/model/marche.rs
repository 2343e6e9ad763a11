//! Marché (contract record) domain model.
//!
//! # Responsibility
//! - Define the aggregate root and its embedded documents and notes.
//! - Provide lifecycle constructors that stamp ids and timestamps.
//! - Validate semantic invariants before any persistence.
//!
//! # Invariants
//! - `id` is stable and never reused for another marché.
//! - `date_fin` is strictly after `date_debut`.
//! - `montant` is finite and non-negative; `nombre_annees` is at least 1.
//!
//! The serde attributes pin the wire schema to the historical French
//! camelCase JSON layout; renaming a field here is a breaking change for
//! every previously exported file.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::id::generate_id;

/// Contract lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statut {
    /// Contract execution is under way.
    EnCours,
    /// Contract fully executed and closed.
    Termine,
    /// Execution halted, may resume.
    Suspendu,
    /// Awarded but not yet started.
    EnAttente,
}

impl Statut {
    /// Stable wire name, identical to the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EnCours => "en_cours",
            Self::Termine => "termine",
            Self::Suspendu => "suspendu",
            Self::EnAttente => "en_attente",
        }
    }

    /// Parses the wire name back into the enum.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "en_cours" => Some(Self::EnCours),
            "termine" => Some(Self::Termine),
            "suspendu" => Some(Self::Suspendu),
            "en_attente" => Some(Self::EnAttente),
            _ => None,
        }
    }
}

impl Display for Statut {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Embedded file attachment owned by one marché.
///
/// `contenu` holds either decoded UTF-8 text or a self-describing
/// `data:<mime>;base64,<payload>` string; the codec module owns both
/// directions of that encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    /// Display file name, e.g. `rapport.pdf`.
    pub nom: String,
    /// Declared MIME type; wins over any MIME embedded in `contenu`.
    #[serde(rename = "type")]
    pub mime: String,
    /// Source byte length captured at upload time, never re-validated.
    pub taille: u64,
    pub date_ajout: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contenu: Option<String>,
}

/// Embedded free-text annotation owned by one marché.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub contenu: String,
    pub date_creation: DateTime<Utc>,
    /// Free-text author name; not checked against any identity system.
    pub auteur: String,
}

impl Note {
    /// Creates a note with a generated id and the current timestamp.
    pub fn new(contenu: impl Into<String>, auteur: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            contenu: contenu.into(),
            date_creation: Utc::now(),
            auteur: auteur.into(),
        }
    }
}

/// Aggregate root for one public-procurement contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Marche {
    pub id: String,
    pub titre: String,
    /// Owning institution (université in the historical data set).
    pub universite: String,
    pub nombre_annees: u32,
    pub statut: Statut,
    pub montant: f64,
    pub date_debut: NaiveDate,
    pub date_fin: NaiveDate,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub notes: Vec<Note>,
    pub date_creation: DateTime<Utc>,
    pub date_modification: DateTime<Utc>,
}

/// Field-level data needed to create a marché; id and timestamps are
/// stamped by [`Marche::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct MarcheDraft {
    pub titre: String,
    pub universite: String,
    pub nombre_annees: u32,
    pub statut: Statut,
    pub montant: f64,
    pub date_debut: NaiveDate,
    pub date_fin: NaiveDate,
    pub description: String,
    pub documents: Vec<Document>,
    pub notes: Vec<Note>,
}

/// Semantic invariant violation on a marché.
#[derive(Debug, Clone, PartialEq)]
pub enum MarcheValidationError {
    /// `date_fin` must be strictly after `date_debut`.
    DateOrdering {
        date_debut: NaiveDate,
        date_fin: NaiveDate,
    },
    /// `montant` must be finite and non-negative.
    NegativeMontant(f64),
    /// `nombre_annees` must be at least 1.
    ZeroDuration,
    /// `id` must be non-empty.
    EmptyId,
}

impl Display for MarcheValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DateOrdering {
                date_debut,
                date_fin,
            } => write!(
                f,
                "date_fin {date_fin} must be strictly after date_debut {date_debut}"
            ),
            Self::NegativeMontant(montant) => {
                write!(f, "montant {montant} must be finite and non-negative")
            }
            Self::ZeroDuration => write!(f, "nombre_annees must be at least 1"),
            Self::EmptyId => write!(f, "marché id must be non-empty"),
        }
    }
}

impl Error for MarcheValidationError {}

impl Marche {
    /// Creates a marché from draft data with a generated id and fresh
    /// creation/modification timestamps.
    pub fn new(draft: MarcheDraft) -> Self {
        Self::with_id(generate_id(), draft)
    }

    /// Creates a marché with a caller-provided id.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(id: impl Into<String>, draft: MarcheDraft) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            titre: draft.titre,
            universite: draft.universite,
            nombre_annees: draft.nombre_annees,
            statut: draft.statut,
            montant: draft.montant,
            date_debut: draft.date_debut,
            date_fin: draft.date_fin,
            description: draft.description,
            documents: draft.documents,
            notes: draft.notes,
            date_creation: now,
            date_modification: now,
        }
    }

    /// Checks the semantic invariants enforced on every write path.
    pub fn validate(&self) -> Result<(), MarcheValidationError> {
        if self.id.is_empty() {
            return Err(MarcheValidationError::EmptyId);
        }
        if self.date_fin <= self.date_debut {
            return Err(MarcheValidationError::DateOrdering {
                date_debut: self.date_debut,
                date_fin: self.date_fin,
            });
        }
        if !self.montant.is_finite() || self.montant < 0.0 {
            return Err(MarcheValidationError::NegativeMontant(self.montant));
        }
        if self.nombre_annees == 0 {
            return Err(MarcheValidationError::ZeroDuration);
        }
        Ok(())
    }

    /// Refreshes the modification timestamp after an in-place edit.
    pub fn touch(&mut self) {
        self.date_modification = Utc::now();
    }
}
