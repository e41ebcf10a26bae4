//! String normalization used for ordering and matching.
//!
//! Two distinct foldings exist on purpose. Ordering folds case only, so the
//! index key stays faithful to the recorded spelling. Matching additionally
//! folds hyphens to spaces, because botanical common names vary in
//! hyphenation ("honey-locust" vs "Honey Locust").

/// Case-folds a name for ordering and distinct-name bookkeeping.
#[must_use]
pub fn fold_case(s: &str) -> String {
    s.to_lowercase()
}

/// Case-folds a name and maps hyphens to spaces, for query matching.
#[must_use]
pub fn fold_matching(s: &str) -> String {
    s.to_lowercase().replace('-', " ")
}

/// True when two names match under the query-matching folding.
#[must_use]
pub fn names_match(a: &str, b: &str) -> bool {
    fold_matching(a) == fold_matching(b)
}

#[cfg(test)]
mod tests {
    use super::{fold_case, fold_matching, names_match};

    #[test]
    fn fold_case_lowercases_only() {
        assert_eq!(fold_case("Honey-Locust"), "honey-locust");
    }

    #[test]
    fn fold_matching_maps_hyphens_to_spaces() {
        assert_eq!(fold_matching("Honey-Locust"), "honey locust");
        assert!(names_match("honey-locust", "Honey Locust"));
        assert!(!names_match("honeylocust", "Honey Locust"));
    }
}
