//! URL slugs for catalog navigation nodes.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Slug`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SlugError {
    /// The input is empty after trimming.
    #[error("slug cannot be empty")]
    Empty,
    /// The input is too long.
    #[error("slug must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character outside `a-z`, `0-9` and `-`.
    #[error("slug contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// A URL path segment identifying a category, subcategory or submenu.
///
/// Slugs are lower-case ASCII letters, digits and hyphens. Uniqueness is
/// scoped to the parent node and enforced by the database.
///
/// ```
/// use flipzokart_core::Slug;
///
/// assert_eq!(Slug::parse(" Mens-Shirts ").unwrap().as_str(), "mens-shirts");
/// assert_eq!(Slug::from_name("Home & Kitchen").unwrap().as_str(), "home-kitchen");
/// assert!(Slug::parse("a/b").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Maximum length of a slug.
    pub const MAX_LENGTH: usize = 120;

    /// Parse a slug, lower-casing it.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty, too long, or contains
    /// characters other than ASCII letters, digits and hyphens.
    pub fn parse(s: &str) -> Result<Self, SlugError> {
        let s = s.trim().to_ascii_lowercase();
        if s.is_empty() {
            return Err(SlugError::Empty);
        }
        if s.len() > Self::MAX_LENGTH {
            return Err(SlugError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        if let Some(c) = s
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
        {
            return Err(SlugError::InvalidCharacter(c));
        }
        Ok(Self(s))
    }

    /// Derive a slug from a display name.
    ///
    /// Runs of non-alphanumeric characters collapse into a single hyphen.
    ///
    /// # Errors
    ///
    /// Returns `SlugError::Empty` if the name has no ASCII alphanumerics, or
    /// `SlugError::TooLong` if the result exceeds the maximum length.
    pub fn from_name(name: &str) -> Result<Self, SlugError> {
        let mut slug = String::with_capacity(name.len());
        for c in name.chars() {
            if c.is_ascii_alphanumeric() {
                slug.push(c.to_ascii_lowercase());
            } else if !slug.is_empty() && !slug.ends_with('-') {
                slug.push('-');
            }
        }
        while slug.ends_with('-') {
            slug.pop();
        }
        Self::parse(&slug)
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Slug {
    type Err = SlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl_text_sqlx!(Slug);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lowercases() {
        assert_eq!(Slug::parse("T-Shirts").unwrap().as_str(), "t-shirts");
    }

    #[test]
    fn test_parse_rejects_empty_and_invalid() {
        assert_eq!(Slug::parse("  "), Err(SlugError::Empty));
        assert_eq!(
            Slug::parse("men shirts"),
            Err(SlugError::InvalidCharacter(' '))
        );
        assert_eq!(Slug::parse("kurta?"), Err(SlugError::InvalidCharacter('?')));
    }

    #[test]
    fn test_parse_rejects_too_long() {
        let long = "a".repeat(Slug::MAX_LENGTH + 1);
        assert!(matches!(Slug::parse(&long), Err(SlugError::TooLong { .. })));
    }

    #[test]
    fn test_from_name_collapses_separators() {
        assert_eq!(
            Slug::from_name("  Beauty & Personal  Care!! ").unwrap().as_str(),
            "beauty-personal-care"
        );
        assert_eq!(Slug::from_name("4K TVs").unwrap().as_str(), "4k-tvs");
    }

    #[test]
    fn test_from_name_without_alphanumerics() {
        assert_eq!(Slug::from_name("&&&"), Err(SlugError::Empty));
    }
}
