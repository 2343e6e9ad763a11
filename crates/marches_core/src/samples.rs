//! Canonical example contracts seeded into an empty collection.
//!
//! The historical application shipped these two records so a first run
//! never showed an empty dashboard; the CLI probe and scenario tests
//! reuse them.

use chrono::NaiveDate;

use crate::model::marche::{Marche, MarcheDraft, Note, Statut};

const fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid calendar date literal"),
    }
}

// Const items force the date literals to be checked at compile time, so
// no runtime panic path remains.
const INFRA_DEBUT: NaiveDate = ymd(2024, 1, 15);
const INFRA_FIN: NaiveDate = ymd(2026, 12, 31);
const BIBLIO_DEBUT: NaiveDate = ymd(2024, 6, 1);
const BIBLIO_FIN: NaiveDate = ymd(2026, 5, 31);

/// Returns the two canonical sample contracts.
///
/// Ids and timestamps are freshly generated on every call.
pub fn example_marches() -> Vec<Marche> {
    vec![
        Marche::new(MarcheDraft {
            titre: "Infrastructure IT Campus Nord".to_string(),
            universite: "Université de Lille".to_string(),
            nombre_annees: 3,
            statut: Statut::EnCours,
            montant: 150_000.0,
            date_debut: INFRA_DEBUT,
            date_fin: INFRA_FIN,
            description: "Modernisation complète de l'infrastructure informatique du campus \
                          nord incluant serveurs, réseaux et équipements."
                .to_string(),
            documents: Vec::new(),
            notes: vec![Note::new(
                "Réunion initiale programmée pour la semaine prochaine avec l'équipe technique.",
                "Marie Dubois",
            )],
        }),
        Marche::new(MarcheDraft {
            titre: "Rénovation Bibliothèque Centrale".to_string(),
            universite: "Université Paris-Saclay".to_string(),
            nombre_annees: 2,
            statut: Statut::EnAttente,
            montant: 250_000.0,
            date_debut: BIBLIO_DEBUT,
            date_fin: BIBLIO_FIN,
            description: "Rénovation complète de la bibliothèque centrale avec création \
                          d'espaces collaboratifs et mise aux normes énergétiques."
                .to_string(),
            documents: Vec::new(),
            notes: Vec::new(),
        }),
    ]
}
