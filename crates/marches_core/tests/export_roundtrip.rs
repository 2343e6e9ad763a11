use chrono::NaiveDate;
use marches_core::{
    export_file_name, export_json, export_to_file, open_store_in_memory, parse_import,
    ImportStrategy, KvCollectionRepository, MarcheService, DEFAULT_COLLECTION_SLOT,
};
use std::collections::HashSet;
use std::fs;

#[test]
fn export_file_name_embeds_the_iso_date() {
    let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
    assert_eq!(export_file_name(date), "marches_publics_2024-03-07.json");
}

#[test]
fn export_is_pretty_printed_json() {
    let marches = marches_core::example_marches();
    let json = export_json(&marches).unwrap();
    assert!(json.starts_with("[\n"));
    assert!(json.contains("\"nombreAnnees\""));
}

#[test]
fn export_then_reimport_additively_is_an_id_set_no_op() {
    let conn = open_store_in_memory().unwrap();
    let service = MarcheService::new(KvCollectionRepository::new(&conn, DEFAULT_COLLECTION_SLOT));
    let before = service
        .seed_if_empty(marches_core::example_marches())
        .unwrap();

    let exported = export_json(&before).unwrap();
    let batch = parse_import(&exported).unwrap();
    assert!(batch.rejected.is_empty());

    let outcome = service.import(batch.accepted, ImportStrategy::Merge).unwrap();
    assert_eq!(outcome.imported, 0);

    let before_ids: HashSet<&str> = before.iter().map(|m| m.id.as_str()).collect();
    let after_ids: HashSet<&str> = outcome.collection.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(before_ids, after_ids);
    assert_eq!(outcome.collection.len(), before.len());
}

#[test]
fn export_to_file_writes_a_reimportable_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(marches_core::default_export_file_name());

    let marches = marches_core::example_marches();
    export_to_file(&path, &marches).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let batch = parse_import(&text).unwrap();
    assert_eq!(batch.accepted, marches);
    assert!(batch.rejected.is_empty());
}
