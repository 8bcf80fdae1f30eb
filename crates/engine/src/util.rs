//! Internal helpers for model validation and conversion.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation and mapping logic so the engine enforces consistent invariants.

use uuid::Uuid;

use crate::{EngineError, ResultEngine};

/// Parse a UUID from storage and return a labeled error on failure.
pub(crate) fn parse_uuid(value: &str, label: &str) -> ResultEngine<Uuid> {
    Uuid::parse_str(value).map_err(|_| EngineError::InvalidField(format!("invalid {label} id")))
}

/// Trim `value` and reject it when nothing is left.
pub(crate) fn normalize_required(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidField(format!("{label} must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// Emails are compared case-insensitively, so they are stored lowercase.
pub(crate) fn normalize_email(value: &str) -> ResultEngine<String> {
    let email = normalize_required(value, "email")?.to_lowercase();
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
    if !valid {
        return Err(EngineError::InvalidField(format!("invalid email: {email}")));
    }
    Ok(email)
}

pub(crate) fn validate_capacity(capacity: i32) -> ResultEngine<i32> {
    if capacity < 0 {
        return Err(EngineError::InvalidField(
            "capacity must be >= 0".to_string(),
        ));
    }
    Ok(capacity)
}

/// Trim each tag and drop the empty ones.
pub(crate) fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// `%{value}%`, with the LIKE wildcards of `value` escaped by a backslash.
pub(crate) fn contains_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('%');
    for ch in value.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_values_are_trimmed() {
        assert_eq!(normalize_required("  Expo ", "name").unwrap(), "Expo");
        assert_eq!(
            normalize_required("   ", "name"),
            Err(EngineError::InvalidField("name must not be empty".to_string()))
        );
    }

    #[test]
    fn emails_are_lowercased_and_checked() {
        assert_eq!(
            normalize_email(" Ada@Example.COM ").unwrap(),
            "ada@example.com"
        );
        assert!(normalize_email("ada.example.com").is_err());
        assert!(normalize_email("@example.com").is_err());
        assert!(normalize_email("ada@").is_err());
    }

    #[test]
    fn negative_capacity_is_rejected() {
        assert_eq!(validate_capacity(0).unwrap(), 0);
        assert!(validate_capacity(-1).is_err());
    }

    #[test]
    fn empty_tags_are_dropped() {
        let tags = normalize_tags(vec![" Rust ".to_string(), "".to_string(), "  ".to_string()]);
        assert_eq!(tags, vec!["Rust".to_string()]);
    }

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(contains_pattern("rust"), "%rust%");
        assert_eq!(contains_pattern("50%"), "%50\\%%");
        assert_eq!(contains_pattern("UI_UX"), "%UI\\_UX%");
        assert_eq!(contains_pattern("a\\b"), "%a\\\\b%");
    }
}
