//! Small string helpers shared by the form handling on both sides of the API.

/// Case-insensitive substring test. An empty needle matches everything.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Returns the trimmed value, or `None` if nothing but whitespace is left.
pub fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Same as [`non_blank`] but owned, for optional form fields.
pub fn non_blank_owned(value: &str) -> Option<String> {
    non_blank(value).map(str::to_owned)
}

/// Splits a comma separated list, dropping empty entries.
/// `"Data Structures, , Algorithms"` becomes `["Data Structures", "Algorithms"]`.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .filter_map(non_blank)
        .map(str::to_owned)
        .collect()
}

/// Inverse of [`split_list`].
pub fn join_list(values: &[String]) -> String {
    values.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_case_insensitive() {
        assert!(contains_ignore_case("Block A • Floor 1", "block a"));
        assert!(contains_ignore_case("A-101", ""));
        assert!(!contains_ignore_case("A-101", "C-"));
    }

    #[test]
    fn lists_round_trip_through_form_text() {
        let courses = split_list(" Data Structures, ,Algorithms ,");
        assert_eq!(courses, vec!["Data Structures", "Algorithms"]);
        assert_eq!(join_list(&courses), "Data Structures, Algorithms");
        assert!(split_list("  ").is_empty());
    }

    #[test]
    fn blank_values_are_none() {
        assert_eq!(non_blank("  A-101 "), Some("A-101"));
        assert_eq!(non_blank(" \t"), None);
    }
}
