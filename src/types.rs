//! Common type definitions and small shared utilities.
//!
//! This module defines:
//! - Type aliases for entity IDs (UserId, CategoryId, etc.)
//! - [`slugify`]: the slug derivation used by categories and products
//! - [`abbrev_uuid`]: abbreviate UUIDs to first 8 chars for logging
//!
//! # ID Types
//!
//! All entity IDs are UUIDs wrapped in type aliases for better type safety:
//!
//! - [`UserId`]: User account identifier
//! - [`CategoryId`]: Product category identifier
//! - [`ProductId`]: Product identifier
//! - [`HelpCategoryId`]: Help category identifier
//! - [`HelpArticleId`]: Help article identifier

use uuid::Uuid;

// Type aliases for IDs
pub type UserId = Uuid;
pub type CategoryId = Uuid;
pub type ProductId = Uuid;
pub type HelpCategoryId = Uuid;
pub type HelpArticleId = Uuid;

/// Abbreviate a UUID to its first 8 characters for more readable logs and traces
/// Example: "550e8400-e29b-41d4-a716-446655440000" -> "550e8400"
pub fn abbrev_uuid(uuid: &Uuid) -> String {
    uuid.to_string().chars().take(8).collect()
}

/// Derive a URL-safe slug from a display name.
///
/// Lowercases ASCII letters, keeps alphanumerics and underscores, collapses
/// whitespace/hyphen runs into a single `-`, and drops all other punctuation.
/// Leading and trailing separators are removed.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_separator = false;

    for c in value.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '-' {
            pending_separator = true;
        }
    }

    slug.trim_matches(['-', '_']).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abbrev_uuid() {
        let id: Uuid = "550e8400-e29b-41d4-a716-446655440000".parse().unwrap();
        assert_eq!(abbrev_uuid(&id), "550e8400");
    }

    #[test]
    fn test_slugify_lowercases_and_hyphenates() {
        assert_eq!(slugify("Mobile Phones"), "mobile-phones");
        assert_eq!(slugify("Samsung Galaxy S20"), "samsung-galaxy-s20");
    }

    #[test]
    fn test_slugify_strips_punctuation() {
        assert_eq!(slugify("MacBook Pro, 2023!"), "macbook-pro-2023");
        assert_eq!(slugify("What's New?"), "whats-new");
    }

    #[test]
    fn test_slugify_collapses_separator_runs() {
        assert_eq!(slugify("a  -  b"), "a-b");
        assert_eq!(slugify("--hello--world--"), "hello-world");
    }

    #[test]
    fn test_slugify_keeps_underscores() {
        assert_eq!(slugify("snake_case name"), "snake_case-name");
    }

    #[test]
    fn test_slugify_empty_and_symbol_only() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }
}
