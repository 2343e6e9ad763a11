//! Identifier generation for records and embedded entities.
//!
//! # Responsibility
//! - Produce opaque string ids unique with overwhelming probability
//!   within a session.
//!
//! # Invariants
//! - Ids combine a millisecond time component with random bits (UUID v7),
//!   so ids generated in one process sort roughly by creation time.
//! - No global cross-device uniqueness guarantee; imported ids from other
//!   devices are accepted as-is and never regenerated.

use uuid::Uuid;

/// Generates a fresh opaque identifier.
pub fn generate_id() -> String {
    Uuid::now_v7().to_string()
}

#[cfg(test)]
mod tests {
    use super::generate_id;
    use std::collections::HashSet;

    #[test]
    fn ids_are_unique_within_a_session() {
        let ids: HashSet<String> = (0..1000).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn ids_are_non_empty_opaque_strings() {
        let id = generate_id();
        assert!(!id.is_empty());
    }
}
