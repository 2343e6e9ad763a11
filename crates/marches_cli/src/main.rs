//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `marches_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use marches_core::{
    example_marches, open_store_in_memory, KvCollectionRepository, MarcheService,
    DEFAULT_COLLECTION_SLOT,
};

fn main() {
    println!("marches_core version={}", marches_core::core_version());

    // End-to-end probe against a throwaway in-memory store.
    let conn = match open_store_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("store open failed: {err}");
            std::process::exit(1);
        }
    };

    let service = MarcheService::new(KvCollectionRepository::new(&conn, DEFAULT_COLLECTION_SLOT));
    match service.seed_if_empty(example_marches()) {
        Ok(collection) => println!("seeded collection size={}", collection.len()),
        Err(err) => {
            eprintln!("seed failed: {err}");
            std::process::exit(1);
        }
    }
}
