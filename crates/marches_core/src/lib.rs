//! Core domain logic for the marchés publics record manager.
//! This crate is the single source of truth for business invariants.

pub mod codec;
pub mod export;
pub mod filter;
pub mod id;
pub mod import;
pub mod logging;
pub mod model;
pub mod repo;
pub mod samples;
pub mod service;
pub mod store;

pub use codec::{decode_document, encode_document, CodecError, DownloadBlob};
pub use export::{default_export_file_name, export_file_name, export_json, export_to_file};
pub use filter::{apply_filters, FilterOptions};
pub use id::generate_id;
pub use import::{merge_additive, parse_import, ImportBatch, ImportError, ImportStrategy};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::marche::{Document, Marche, MarcheDraft, MarcheValidationError, Note, Statut};
pub use repo::collection_repo::{
    CollectionRepository, KvCollectionRepository, RepoError, RepoResult,
};
pub use samples::example_marches;
pub use service::marche_service::{ImportOutcome, MarcheService, ServiceError, ServiceResult};
pub use store::{open_store, open_store_in_memory, StoreError};

/// Default slot key for the main collection, matching the historical
/// browser storage binding.
pub const DEFAULT_COLLECTION_SLOT: &str = "marches-publics";

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
