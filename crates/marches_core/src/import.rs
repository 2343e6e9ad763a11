//! Import parsing, per-record validation, and merge strategies.
//!
//! # Responsibility
//! - Gate externally supplied files: a wholesale parse failure or a
//!   non-array top level fails the import outright with no partial
//!   effect.
//! - Turn each array element into a strongly-typed record or an explicit
//!   per-element rejection reason.
//! - Reconcile an accepted batch against the current collection.
//!
//! # Invariants
//! - Additive merge never removes or overwrites an existing id: the
//!   existing record always wins over a colliding import.
//! - Incoming order is preserved for the records that are kept.

use serde_json::Value;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::model::marche::Marche;

/// Caller-selected reconciliation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStrategy {
    /// Keep the current collection; append only non-colliding records.
    Merge,
    /// Discard the current collection entirely. Irreversible, so the
    /// caller must pass the user's explicit confirmation; an unconfirmed
    /// replace fails before any state is touched.
    Replace { confirmed: bool },
}

/// Whole-file import failure; no element is considered.
#[derive(Debug)]
pub enum ImportError {
    /// The file is not valid JSON.
    Parse(serde_json::Error),
    /// The top-level value is not an array.
    NotAnArray,
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "import file is not valid JSON: {err}"),
            Self::NotAnArray => write!(f, "import file must contain a top-level array"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::NotAnArray => None,
        }
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// One element excluded from the batch, with the reason it was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    /// Position in the source array.
    pub index: usize,
    pub reason: String,
}

/// Outcome of parsing an import file: the typed records that passed both
/// the structural parse and semantic validation, plus every rejection.
#[derive(Debug, Default)]
pub struct ImportBatch {
    pub accepted: Vec<Marche>,
    pub rejected: Vec<RejectedRecord>,
}

impl ImportBatch {
    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty() && self.rejected.is_empty()
    }
}

/// Parses a UTF-8 JSON import file into a validated batch.
///
/// Non-conforming elements are excluded with an explicit reason; only a
/// top-level failure aborts the whole import.
pub fn parse_import(text: &str) -> Result<ImportBatch, ImportError> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Array(elements) = value else {
        return Err(ImportError::NotAnArray);
    };

    let mut batch = ImportBatch::default();
    for (index, element) in elements.into_iter().enumerate() {
        match serde_json::from_value::<Marche>(element) {
            Ok(marche) => match marche.validate() {
                Ok(()) => batch.accepted.push(marche),
                Err(err) => batch.rejected.push(RejectedRecord {
                    index,
                    reason: err.to_string(),
                }),
            },
            Err(err) => batch.rejected.push(RejectedRecord {
                index,
                reason: err.to_string(),
            }),
        }
    }

    Ok(batch)
}

/// Additively merges an incoming batch into the current collection.
///
/// Returns the merged collection and the count of records actually
/// added. Incoming records whose id already exists are silently dropped.
pub fn merge_additive(current: &[Marche], incoming: Vec<Marche>) -> (Vec<Marche>, usize) {
    let existing_ids: HashSet<&str> = current.iter().map(|m| m.id.as_str()).collect();

    let fresh: Vec<Marche> = incoming
        .into_iter()
        .filter(|m| !existing_ids.contains(m.id.as_str()))
        .collect();

    let added = fresh.len();
    let mut merged = current.to_vec();
    merged.extend(fresh);
    (merged, added)
}
