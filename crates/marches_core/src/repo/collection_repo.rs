//! Collection repository contract and kv-slot implementation.
//!
//! # Responsibility
//! - Bind a logical collection name (slot key) to the serialized record
//!   array and expose get/set semantics over it.
//!
//! # Invariants
//! - A successful `save` is visible to the next `load` on the same
//!   connection.
//! - Two handles on the same slot in different processes race as
//!   last-writer-wins; there is no conflict detection.

use crate::model::marche::{Marche, MarcheValidationError};
use crate::store::StoreError;
use log::warn;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for collection persistence and lookup operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(MarcheValidationError),
    /// The persistence medium rejected the operation; the in-memory
    /// change is not durable.
    Storage(StoreError),
    /// Serializing the collection for storage failed.
    Serialize(serde_json::Error),
    NotFound(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "storage unavailable: {err}"),
            Self::Serialize(err) => write!(f, "failed to serialize collection: {err}"),
            Self::NotFound(id) => write!(f, "marché not found: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<MarcheValidationError> for RepoError {
    fn from(value: MarcheValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Storage(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Storage(StoreError::Sqlite(value))
    }
}

/// Whole-collection persistence contract.
pub trait CollectionRepository {
    /// Loads the previously saved collection, or the empty collection if
    /// the slot is missing or its stored value fails to parse.
    fn load(&self) -> RepoResult<Vec<Marche>>;

    /// Durably overwrites the entire collection under this repository's
    /// slot key.
    fn save(&self, marches: &[Marche]) -> RepoResult<()>;
}

/// Kv-slot repository bound to one connection and one slot key.
///
/// Constructed once at process start and passed by handle to consumers;
/// no ambient global lookup.
pub struct KvCollectionRepository<'conn> {
    conn: &'conn Connection,
    slot: String,
}

impl<'conn> KvCollectionRepository<'conn> {
    pub fn new(conn: &'conn Connection, slot: impl Into<String>) -> Self {
        Self {
            conn,
            slot: slot.into(),
        }
    }

    /// Slot key this repository reads and writes.
    pub fn slot(&self) -> &str {
        &self.slot
    }
}

impl CollectionRepository for KvCollectionRepository<'_> {
    fn load(&self) -> RepoResult<Vec<Marche>> {
        let stored: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM slots WHERE key = ?1;",
                params![self.slot.as_str()],
                |row| row.get(0),
            )
            .optional()?;

        let Some(raw) = stored else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<Marche>>(&raw) {
            Ok(marches) => Ok(marches),
            Err(err) => {
                // Matches the historical localStorage behavior: a corrupt
                // slot degrades to an empty collection instead of wedging
                // every read path.
                warn!(
                    "event=collection_load module=repo status=degraded slot={} error={}",
                    self.slot, err
                );
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, marches: &[Marche]) -> RepoResult<()> {
        let serialized = serde_json::to_string(marches).map_err(RepoError::Serialize)?;

        self.conn.execute(
            "INSERT INTO slots (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![self.slot.as_str(), serialized],
        )?;

        Ok(())
    }
}
