use chrono::NaiveDate;
use marches_core::{
    merge_additive, open_store_in_memory, parse_import, ImportError, ImportStrategy,
    KvCollectionRepository, Marche, MarcheDraft, MarcheService, ServiceError, Statut,
    DEFAULT_COLLECTION_SLOT,
};
use std::collections::HashSet;

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn marche(id: &str, titre: &str) -> Marche {
    Marche::with_id(
        id,
        MarcheDraft {
            titre: titre.to_string(),
            universite: "Université de Test".to_string(),
            nombre_annees: 1,
            statut: Statut::EnCours,
            montant: 100.0,
            date_debut: ymd(2024, 1, 1),
            date_fin: ymd(2025, 1, 1),
            description: String::new(),
            documents: Vec::new(),
            notes: Vec::new(),
        },
    )
}

#[test]
fn parse_import_accepts_a_valid_array() {
    let records = vec![marche("a", "Alpha"), marche("b", "Beta")];
    let text = serde_json::to_string(&records).unwrap();

    let batch = parse_import(&text).unwrap();
    assert_eq!(batch.accepted.len(), 2);
    assert!(batch.rejected.is_empty());
    assert_eq!(batch.accepted[0].id, "a");
    assert_eq!(batch.accepted[1].id, "b");
}

#[test]
fn parse_import_of_an_empty_array_yields_an_empty_batch() {
    let batch = parse_import("[]").unwrap();
    assert!(batch.is_empty());

    let text = serde_json::to_string(&vec![marche("a", "Alpha")]).unwrap();
    assert!(!parse_import(&text).unwrap().is_empty());
}

#[test]
fn parse_import_rejects_non_json_outright() {
    let err = parse_import("not json").unwrap_err();
    assert!(matches!(err, ImportError::Parse(_)));
}

#[test]
fn parse_import_rejects_non_array_top_level() {
    let err = parse_import(r#"{"id": "a"}"#).unwrap_err();
    assert!(matches!(err, ImportError::NotAnArray));
}

#[test]
fn parse_import_excludes_malformed_elements_with_reasons() {
    let good = marche("ok", "Valide");
    let text = format!(
        r#"[{}, {{"id": 42}}, "pas un objet"]"#,
        serde_json::to_string(&good).unwrap()
    );

    let batch = parse_import(&text).unwrap();
    assert_eq!(batch.accepted.len(), 1);
    assert_eq!(batch.accepted[0].id, "ok");
    assert_eq!(batch.rejected.len(), 2);
    assert_eq!(batch.rejected[0].index, 1);
    assert_eq!(batch.rejected[1].index, 2);
    assert!(!batch.rejected[0].reason.is_empty());
}

#[test]
fn parse_import_applies_semantic_validation_to_each_element() {
    let mut bad = marche("bad", "Montant négatif");
    bad.montant = -5.0;
    let text = serde_json::to_string(&vec![marche("good", "Valide"), bad]).unwrap();

    let batch = parse_import(&text).unwrap();
    assert_eq!(batch.accepted.len(), 1);
    assert_eq!(batch.rejected.len(), 1);
    assert!(batch.rejected[0].reason.contains("montant"));
}

#[test]
fn additive_merge_never_overwrites_existing_records() {
    let existing = vec![marche("a", "Original"), marche("b", "Beta")];
    let mut colliding = marche("a", "Usurpateur");
    colliding.montant = 999_999.0;
    let incoming = vec![colliding, marche("c", "Gamma")];

    let (merged, added) = merge_additive(&existing, incoming);

    assert_eq!(added, 1);
    assert_eq!(merged.len(), 3);
    // The pre-existing record's fields are untouched.
    assert_eq!(merged[0].titre, "Original");
    assert_eq!(merged[0].montant, 100.0);
    // Result is a superset of the existing id set.
    let existing_ids: HashSet<&str> = existing.iter().map(|m| m.id.as_str()).collect();
    let merged_ids: HashSet<&str> = merged.iter().map(|m| m.id.as_str()).collect();
    assert!(existing_ids.is_subset(&merged_ids));
}

#[test]
fn additive_merge_with_only_collisions_changes_nothing() {
    let existing = vec![marche("a", "Alpha")];
    let (merged, added) = merge_additive(&existing, vec![marche("a", "Doublon")]);
    assert_eq!(added, 0);
    assert_eq!(merged, existing);
}

#[test]
fn additive_merge_preserves_incoming_order() {
    let existing = vec![marche("a", "Alpha")];
    let incoming = vec![marche("c", "Gamma"), marche("b", "Beta")];
    let (merged, _) = merge_additive(&existing, incoming);
    let ids: Vec<&str> = merged.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c", "b"]);
}

#[test]
fn service_merge_import_reports_added_count() {
    let conn = open_store_in_memory().unwrap();
    let service = MarcheService::new(KvCollectionRepository::new(&conn, DEFAULT_COLLECTION_SLOT));
    service
        .import(vec![marche("a", "Alpha")], ImportStrategy::Replace { confirmed: true })
        .unwrap();

    let outcome = service
        .import(
            vec![marche("a", "Doublon"), marche("b", "Beta")],
            ImportStrategy::Merge,
        )
        .unwrap();

    assert_eq!(outcome.imported, 1);
    assert_eq!(outcome.collection.len(), 2);
    assert_eq!(service.list().unwrap(), outcome.collection);
}

#[test]
fn confirmed_replace_discards_prior_state_exactly() {
    let conn = open_store_in_memory().unwrap();
    let service = MarcheService::new(KvCollectionRepository::new(&conn, DEFAULT_COLLECTION_SLOT));
    service
        .import(
            vec![marche("old-1", "Ancien"), marche("old-2", "Ancien aussi")],
            ImportStrategy::Replace { confirmed: true },
        )
        .unwrap();

    let incoming = vec![marche("new-1", "Nouveau")];
    let outcome = service
        .import(incoming.clone(), ImportStrategy::Replace { confirmed: true })
        .unwrap();

    assert_eq!(outcome.imported, 1);
    assert_eq!(outcome.collection, incoming);
    assert_eq!(service.list().unwrap(), incoming);
}

#[test]
fn unconfirmed_replace_fails_without_mutating_state() {
    let conn = open_store_in_memory().unwrap();
    let service = MarcheService::new(KvCollectionRepository::new(&conn, DEFAULT_COLLECTION_SLOT));
    let before = service
        .import(
            vec![marche("keep", "À conserver")],
            ImportStrategy::Replace { confirmed: true },
        )
        .unwrap()
        .collection;

    let err = service
        .import(
            vec![marche("drop", "Jamais écrit")],
            ImportStrategy::Replace { confirmed: false },
        )
        .unwrap_err();

    assert!(matches!(err, ServiceError::ReplaceNotConfirmed));
    assert_eq!(service.list().unwrap(), before);
}
