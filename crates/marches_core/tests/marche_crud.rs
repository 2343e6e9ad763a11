use chrono::NaiveDate;
use marches_core::{
    example_marches, open_store_in_memory, KvCollectionRepository, MarcheDraft, MarcheService,
    RepoError, ServiceError, Statut, DEFAULT_COLLECTION_SLOT,
};

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn draft(titre: &str) -> MarcheDraft {
    MarcheDraft {
        titre: titre.to_string(),
        universite: "Université de Test".to_string(),
        nombre_annees: 1,
        statut: Statut::EnAttente,
        montant: 1_000.0,
        date_debut: ymd(2024, 1, 1),
        date_fin: ymd(2025, 6, 30),
        description: String::new(),
        documents: Vec::new(),
        notes: Vec::new(),
    }
}

#[test]
fn create_persists_and_returns_the_new_collection() {
    let conn = open_store_in_memory().unwrap();
    let service = MarcheService::new(KvCollectionRepository::new(&conn, DEFAULT_COLLECTION_SLOT));

    let collection = service.create(draft("Premier marché")).unwrap();
    assert_eq!(collection.len(), 1);
    assert_eq!(collection[0].titre, "Premier marché");
    assert!(!collection[0].id.is_empty());

    // Visible to a subsequent read within the same process.
    assert_eq!(service.list().unwrap(), collection);
}

#[test]
fn create_rejects_invalid_draft_without_saving() {
    let conn = open_store_in_memory().unwrap();
    let service = MarcheService::new(KvCollectionRepository::new(&conn, DEFAULT_COLLECTION_SLOT));

    let mut bad = draft("Dates inversées");
    bad.date_fin = ymd(2023, 1, 1);
    let err = service.create(bad).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Repo(RepoError::Validation(_))
    ));
    assert!(service.list().unwrap().is_empty());
}

#[test]
fn update_replaces_in_place_and_refreshes_modification_timestamp() {
    let conn = open_store_in_memory().unwrap();
    let service = MarcheService::new(KvCollectionRepository::new(&conn, DEFAULT_COLLECTION_SLOT));

    let collection = service.create(draft("Avant")).unwrap();
    let mut edited = collection[0].clone();
    edited.titre = "Après".to_string();
    edited.statut = Statut::EnCours;

    std::thread::sleep(std::time::Duration::from_millis(2));
    let updated = service.update(edited.clone()).unwrap();

    assert_eq!(updated.len(), 1);
    assert_eq!(updated[0].titre, "Après");
    assert_eq!(updated[0].statut, Statut::EnCours);
    assert_eq!(updated[0].date_creation, collection[0].date_creation);
    assert!(updated[0].date_modification > collection[0].date_modification);
}

#[test]
fn update_unknown_id_is_not_found() {
    let conn = open_store_in_memory().unwrap();
    let service = MarcheService::new(KvCollectionRepository::new(&conn, DEFAULT_COLLECTION_SLOT));
    service.create(draft("Existant")).unwrap();

    let mut ghost = marches_core::Marche::new(draft("Fantôme"));
    ghost.id = "absent".to_string();
    let err = service.update(ghost).unwrap_err();
    assert!(matches!(err, ServiceError::Repo(RepoError::NotFound(id)) if id == "absent"));
}

#[test]
fn delete_removes_record_and_embedded_children() {
    let conn = open_store_in_memory().unwrap();
    let service = MarcheService::new(KvCollectionRepository::new(&conn, DEFAULT_COLLECTION_SLOT));

    let seeded = service.seed_if_empty(example_marches()).unwrap();
    assert_eq!(seeded.len(), 2);
    // The first sample carries an embedded note.
    assert!(!seeded[0].notes.is_empty());

    let remaining = service.delete(&seeded[0].id).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, seeded[1].id);
    assert!(service
        .list()
        .unwrap()
        .iter()
        .all(|m| m.id != seeded[0].id));
}

#[test]
fn delete_unknown_id_is_not_found() {
    let conn = open_store_in_memory().unwrap();
    let service = MarcheService::new(KvCollectionRepository::new(&conn, DEFAULT_COLLECTION_SLOT));

    let err = service.delete("absent").unwrap_err();
    assert!(matches!(err, ServiceError::Repo(RepoError::NotFound(_))));
}

#[test]
fn seed_if_empty_only_seeds_once() {
    let conn = open_store_in_memory().unwrap();
    let service = MarcheService::new(KvCollectionRepository::new(&conn, DEFAULT_COLLECTION_SLOT));

    let first = service.seed_if_empty(example_marches()).unwrap();
    assert_eq!(first.len(), 2);

    // A second seed attempt must not replace the stored collection.
    let second = service.seed_if_empty(example_marches()).unwrap();
    assert_eq!(second, first);
}
