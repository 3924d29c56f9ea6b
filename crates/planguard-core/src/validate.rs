//! Syntactic validation of identifiers and request inputs.
//!
//! These checks run before any SQL is built, so they accept arbitrary strings
//! and always answer with a boolean rather than an error.

/// Checks that a proposed field name is safe to use as an identifier:
/// * can't be empty
/// * can't start or end with whitespace characters
/// * can't start with underscore
/// * can't contain double quote (`"`)
pub fn is_valid_field_name(name: &str) -> bool {
    !name.is_empty() && name == name.trim() && !name.starts_with('_') && !name.contains('"')
}

/// Like [`is_valid_field_name`], but additionally rejects `%`, which is
/// meaningful to the LIKE operator and to string interpolation.
pub fn is_valid_table_name(name: &str) -> bool {
    !name.contains('%') && is_valid_field_name(name)
}

/// Checks that `value` parses as an integer, optionally requiring it to be
/// non-negative.
pub fn validate_int(value: &str, non_negative: bool) -> bool {
    match value.trim().parse::<i64>() {
        Ok(parsed) => parsed >= 0 || !non_negative,
        Err(_) => false,
    }
}

/// Splits a comma-separated field list into trimmed entries, removing one
/// symmetric pair of double quotes per entry.
pub fn get_list(input: &str) -> Vec<String> {
    if input.is_empty() {
        return Vec::new();
    }
    input
        .split(',')
        .map(str::trim)
        .map(strip_matched_quotes)
        .map(ToOwned::to_owned)
        .collect()
}

fn strip_matched_quotes(entry: &str) -> &str {
    entry
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(entry)
}

/// Whether a field of the given type participates in full-text indexing.
pub fn should_fts_index_field_type(field_type: &str) -> bool {
    matches!(
        field_type.to_lowercase().as_str(),
        "tsvector" | "text" | "number"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_field_names() {
        assert!(is_valid_field_name("name"));
        assert!(is_valid_field_name("first name"));
        assert!(is_valid_field_name("my%field"));
    }

    #[test]
    fn test_invalid_field_names() {
        assert!(!is_valid_field_name(""));
        assert!(!is_valid_field_name(" name"));
        assert!(!is_valid_field_name("name "));
        assert!(!is_valid_field_name("_name"));
        assert!(!is_valid_field_name("na\"me"));
    }

    #[test]
    fn test_table_name_rejects_percent() {
        assert!(is_valid_table_name("my_table"));
        assert!(is_valid_table_name("orders"));
        assert!(!is_valid_table_name("my%table"));
        // still subject to the field-name rules
        assert!(!is_valid_table_name("_orders"));
        assert!(!is_valid_table_name(" orders"));
    }

    #[test]
    fn test_validate_int() {
        assert!(validate_int("10", false));
        assert!(validate_int("10", true));
        assert!(validate_int("-1", false));
        assert!(!validate_int("-1", true));
        assert!(!validate_int("x", false));
        assert!(!validate_int("", false));
        assert!(validate_int(" 42 ", true));
    }

    #[test]
    fn test_get_list() {
        assert_eq!(get_list("a, b, c"), vec!["a", "b", "c"]);
        assert_eq!(get_list("a, \"b\", c"), vec!["a", "b", "c"]);
        assert_eq!(get_list("single"), vec!["single"]);
        assert!(get_list("").is_empty());
    }

    #[test]
    fn test_get_list_keeps_inner_quotes() {
        assert_eq!(get_list("\"a\"b\""), vec!["a\"b"]);
    }

    #[test]
    fn test_should_fts_index_field_type() {
        assert!(should_fts_index_field_type("text"));
        assert!(should_fts_index_field_type("TEXT"));
        assert!(should_fts_index_field_type("tsvector"));
        assert!(should_fts_index_field_type("number"));
        assert!(!should_fts_index_field_type("json"));
        assert!(!should_fts_index_field_type("timestamp"));
    }
}
