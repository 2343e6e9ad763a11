//! Multi-criterion filtering for list display.
//!
//! # Responsibility
//! - Evaluate each record against the composite predicate (status,
//!   institution substring, free-text search).
//!
//! # Invariants
//! - All predicates are conjunctive; an unset predicate matches all.
//! - Output preserves the input collection's order; never re-sorts.

use serde::{Deserialize, Serialize};

use crate::model::marche::{Marche, Statut};

/// Composite filter query. Every criterion is independently optional;
/// `None`/empty means "match all".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// Exact status match.
    pub statut: Option<Statut>,
    /// Case-insensitive substring of the owning institution.
    pub universite: String,
    /// Case-insensitive substring of the title or the description.
    pub recherche: String,
}

impl FilterOptions {
    /// True when no criterion is set, i.e. the query matches everything.
    pub fn is_empty(&self) -> bool {
        self.statut.is_none() && self.universite.is_empty() && self.recherche.is_empty()
    }
}

/// Returns whether one record satisfies the composite predicate.
pub fn matches(marche: &Marche, filters: &FilterOptions) -> bool {
    let match_statut = filters.statut.map_or(true, |s| marche.statut == s);

    let match_universite = filters.universite.is_empty()
        || marche
            .universite
            .to_lowercase()
            .contains(&filters.universite.to_lowercase());

    let match_recherche = filters.recherche.is_empty() || {
        let needle = filters.recherche.to_lowercase();
        marche.titre.to_lowercase().contains(&needle)
            || marche.description.to_lowercase().contains(&needle)
    };

    match_statut && match_universite && match_recherche
}

/// Produces the ordered subsequence of records matching the query.
pub fn apply_filters(marches: &[Marche], filters: &FilterOptions) -> Vec<Marche> {
    marches
        .iter()
        .filter(|marche| matches(marche, filters))
        .cloned()
        .collect()
}
