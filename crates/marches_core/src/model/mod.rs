//! Domain model for public-procurement contract records.
//!
//! # Responsibility
//! - Define the canonical record shape persisted and exchanged as JSON.
//! - Enforce semantic invariants on every write path (create, edit, import).
//!
//! # Invariants
//! - Every entity carries a stable opaque string `id`.
//! - Documents and notes are embedded in their parent record and have no
//!   existence outside it; deleting the parent discards them.

pub mod marche;
