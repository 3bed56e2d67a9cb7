/// Case-insensitive comparison of two user supplied names, ignoring surrounding whitespace.
pub fn names_match(left: &str, right: &str) -> bool {
    left.trim().to_lowercase() == right.trim().to_lowercase()
}

// Re-export common dependencies so consumers can rely on this module as a façade.
pub use chrono;
pub use serde;
pub use uuid;

#[cfg(test)]
mod tests {
    use super::names_match;

    #[test]
    fn names_match_ignores_case_and_padding() {
        assert!(names_match("  Karan ", "karan"));
        assert!(!names_match("Karan", "Kara"));
    }
}
