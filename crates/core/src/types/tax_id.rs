//! Indian tax identifiers submitted during seller onboarding.
//!
//! GSTIN and PAN are treated as opaque text: they are trimmed and upper-cased
//! but their checksum/format is not verified here. Verification is a manual
//! admin step recorded on the business record.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a tax identifier.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TaxIdError {
    /// The input is empty after trimming.
    #[error("{0} is required")]
    Empty(&'static str),
    /// The input is longer than any real identifier of this kind.
    #[error("{kind} must be at most {max} characters")]
    TooLong {
        /// Identifier kind.
        kind: &'static str,
        /// Maximum allowed length.
        max: usize,
    },
}

/// Normalize raw identifier input: trim surrounding whitespace and upper-case.
fn normalize(kind: &'static str, max: usize, raw: &str) -> Result<String, TaxIdError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TaxIdError::Empty(kind));
    }
    if trimmed.chars().count() > max {
        return Err(TaxIdError::TooLong { kind, max });
    }
    Ok(trimmed.to_uppercase())
}

/// Goods and Services Tax Identification Number.
///
/// ```
/// use flipzokart_core::Gstin;
///
/// let gstin = Gstin::parse(" 27aapfu0939f1zv ").unwrap();
/// assert_eq!(gstin.as_str(), "27AAPFU0939F1ZV");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Gstin(String);

impl Gstin {
    /// Upper bound on stored length; real GSTINs are 15 characters.
    pub const MAX_LENGTH: usize = 32;

    /// Parse and normalize a GSTIN.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty or too long.
    pub fn parse(s: &str) -> Result<Self, TaxIdError> {
        normalize("GSTIN", Self::MAX_LENGTH, s).map(Self)
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Permanent Account Number.
///
/// ```
/// use flipzokart_core::Pan;
///
/// assert_eq!(Pan::parse("abcde1234f").unwrap().as_str(), "ABCDE1234F");
/// assert!(Pan::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Pan(String);

impl Pan {
    /// Upper bound on stored length; real PANs are 10 characters.
    pub const MAX_LENGTH: usize = 32;

    /// Parse and normalize a PAN.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty or too long.
    pub fn parse(s: &str) -> Result<Self, TaxIdError> {
        normalize("PAN", Self::MAX_LENGTH, s).map(Self)
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Gstin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for Pan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl_text_sqlx!(Gstin);
impl_text_sqlx!(Pan);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_gstin_is_trimmed_and_uppercased() {
        let gstin = Gstin::parse("\t29abcde1234f1z5 \n").unwrap();
        assert_eq!(gstin.as_str(), "29ABCDE1234F1Z5");
    }

    #[test]
    fn test_pan_is_trimmed_and_uppercased() {
        assert_eq!(Pan::parse(" abcde1234f").unwrap().to_string(), "ABCDE1234F");
    }

    #[test]
    fn test_empty_identifiers_are_rejected() {
        assert_eq!(Gstin::parse("").unwrap_err(), TaxIdError::Empty("GSTIN"));
        assert_eq!(Pan::parse("  ").unwrap_err(), TaxIdError::Empty("PAN"));
    }

    #[test]
    fn test_overlong_identifier_is_rejected() {
        let long = "A".repeat(Gstin::MAX_LENGTH + 1);
        assert!(matches!(
            Gstin::parse(&long),
            Err(TaxIdError::TooLong { kind: "GSTIN", .. })
        ));
    }

    #[test]
    fn test_format_is_not_validated() {
        // Opaque text: anything non-empty is accepted.
        assert!(Gstin::parse("not-a-real-gstin").is_ok());
    }
}
