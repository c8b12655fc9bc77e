//! Identifier generation.
//!
//! Permanent ids are short uuid-derived handles (`tb-xxxxxxxx`). Projects
//! and rows created locally get a speculative `local-` id that is swapped
//! in place once the server confirms the insert; cells are keyed by block
//! id, so the swap touches no internal references.

use uuid::Uuid;

const LOCAL_PREFIX: &str = "local-";

/// Generate a permanent short id.
#[must_use]
pub fn fresh() -> String {
    let simple = Uuid::new_v4().simple().to_string();
    format!("tb-{}", &simple[..8])
}

/// Generate a speculative local id, replaced once the server confirms.
#[must_use]
pub fn fresh_local() -> String {
    format!("{LOCAL_PREFIX}{}", Uuid::new_v4().simple())
}

/// Whether `id` is a speculative local id awaiting server confirmation.
#[must_use]
pub fn is_local(id: &str) -> bool {
    id.starts_with(LOCAL_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::{fresh, fresh_local, is_local};

    #[test]
    fn fresh_ids_are_short_and_prefixed() {
        let id = fresh();
        assert!(id.starts_with("tb-"));
        assert_eq!(id.len(), 11);
        assert!(!is_local(&id));
    }

    #[test]
    fn local_ids_are_flagged() {
        let id = fresh_local();
        assert!(is_local(&id));
        assert_ne!(fresh_local(), id);
    }
}
