//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the whole-collection load/save contract consumed by services.
//! - Isolate SQLite and JSON-slot details from service orchestration.
//!
//! # Invariants
//! - There is no partial write path: every mutation is read-full,
//!   compute-full, write-full.
//! - A missing or unparseable slot loads as the empty collection, never
//!   as an error.

pub mod collection_repo;
