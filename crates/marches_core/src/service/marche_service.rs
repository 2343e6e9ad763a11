//! Marché use-case service: the contract exposed to presentation layers.
//!
//! # Responsibility
//! - Provide create/update/delete/list/filter/import entry points, each
//!   returning the resulting collection state for re-render.
//! - Run every mutation as read-full, compute-full, write-full through
//!   the repository.
//!
//! # Invariants
//! - Semantic validation runs before any persistence.
//! - A failed operation leaves the stored collection untouched.
//! - Destructive replace never mutates state without confirmation.

use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::filter::{apply_filters, FilterOptions};
use crate::import::{merge_additive, ImportStrategy};
use crate::model::marche::{Marche, MarcheDraft};
use crate::repo::collection_repo::{CollectionRepository, RepoError};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service-level error surfaced to the presentation layer.
#[derive(Debug)]
pub enum ServiceError {
    Repo(RepoError),
    /// A destructive replace was requested without user confirmation.
    ReplaceNotConfirmed,
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::ReplaceNotConfirmed => {
                write!(f, "destructive replace requires explicit confirmation")
            }
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::ReplaceNotConfirmed => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Result of applying an import strategy.
#[derive(Debug)]
pub struct ImportOutcome {
    /// Collection state after the import.
    pub collection: Vec<Marche>,
    /// Count of records actually added/imported, for reporting.
    pub imported: usize,
}

/// Use-case service wrapper over a collection repository.
pub struct MarcheService<R: CollectionRepository> {
    repo: R,
}

impl<R: CollectionRepository> MarcheService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a marché from draft data and returns the new collection.
    ///
    /// # Contract
    /// - Stamps a generated id and fresh creation/modification timestamps.
    /// - Validates before touching storage.
    pub fn create(&self, draft: MarcheDraft) -> ServiceResult<Vec<Marche>> {
        let marche = Marche::new(draft);
        marche.validate().map_err(RepoError::from)?;

        let mut collection = self.repo.load()?;
        collection.push(marche);
        self.repo.save(&collection)?;

        info!(
            "event=marche_create module=service status=ok total={}",
            collection.len()
        );
        Ok(collection)
    }

    /// Replaces an existing marché in place by id.
    ///
    /// Refreshes the modification timestamp; the creation timestamp is
    /// preserved from the caller-supplied record.
    pub fn update(&self, mut marche: Marche) -> ServiceResult<Vec<Marche>> {
        marche.validate().map_err(RepoError::from)?;
        marche.touch();

        let mut collection = self.repo.load()?;
        let slot = collection
            .iter_mut()
            .find(|existing| existing.id == marche.id)
            .ok_or_else(|| RepoError::NotFound(marche.id.clone()))?;
        *slot = marche;
        self.repo.save(&collection)?;

        info!("event=marche_update module=service status=ok");
        Ok(collection)
    }

    /// Removes a marché by id, discarding its embedded documents and
    /// notes with it.
    pub fn delete(&self, id: &str) -> ServiceResult<Vec<Marche>> {
        let mut collection = self.repo.load()?;
        let before = collection.len();
        collection.retain(|marche| marche.id != id);

        if collection.len() == before {
            return Err(RepoError::NotFound(id.to_string()).into());
        }

        self.repo.save(&collection)?;
        info!(
            "event=marche_delete module=service status=ok total={}",
            collection.len()
        );
        Ok(collection)
    }

    /// Returns the full current collection.
    pub fn list(&self) -> ServiceResult<Vec<Marche>> {
        Ok(self.repo.load()?)
    }

    /// Returns the ordered subsequence matching the composite query.
    pub fn filter(&self, filters: &FilterOptions) -> ServiceResult<Vec<Marche>> {
        let collection = self.repo.load()?;
        Ok(apply_filters(&collection, filters))
    }

    /// Applies an already-validated import batch under the chosen
    /// strategy.
    ///
    /// # Contract
    /// - `Merge`: existing ids win; colliding incoming records are
    ///   silently dropped and the added count is reported.
    /// - `Replace { confirmed: true }`: the stored collection becomes the
    ///   incoming batch exactly, independent of prior state.
    /// - `Replace { confirmed: false }`: fails before any load or save.
    pub fn import(
        &self,
        incoming: Vec<Marche>,
        strategy: ImportStrategy,
    ) -> ServiceResult<ImportOutcome> {
        match strategy {
            ImportStrategy::Merge => {
                let current = self.repo.load()?;
                let (merged, imported) = merge_additive(&current, incoming);
                self.repo.save(&merged)?;
                info!(
                    "event=import module=service status=ok strategy=merge imported={} total={}",
                    imported,
                    merged.len()
                );
                Ok(ImportOutcome {
                    collection: merged,
                    imported,
                })
            }
            ImportStrategy::Replace { confirmed: false } => {
                warn!("event=import module=service status=refused strategy=replace reason=unconfirmed");
                Err(ServiceError::ReplaceNotConfirmed)
            }
            ImportStrategy::Replace { confirmed: true } => {
                let imported = incoming.len();
                self.repo.save(&incoming)?;
                info!(
                    "event=import module=service status=ok strategy=replace imported={imported}"
                );
                Ok(ImportOutcome {
                    collection: incoming,
                    imported,
                })
            }
        }
    }

    /// Seeds the given examples when the stored collection is empty.
    ///
    /// Returns the resulting collection either way; an already-populated
    /// store is left untouched.
    pub fn seed_if_empty(&self, examples: Vec<Marche>) -> ServiceResult<Vec<Marche>> {
        let collection = self.repo.load()?;
        if !collection.is_empty() {
            return Ok(collection);
        }

        self.repo.save(&examples)?;
        info!(
            "event=seed module=service status=ok total={}",
            examples.len()
        );
        Ok(examples)
    }
}
