//! FQDN syntax rules.
//!
//! Pure string checks over the normalized (IDNA ASCII, lower-case) form of a
//! candidate. No I/O. The rules run in a fixed order and the first failing
//! rule decides the outcome:
//!
//! 1. the candidate must normalize
//! 2. no leading or trailing `.`
//! 3. at most 255 characters
//! 4. only `[a-zA-Z0-9-.]`
//! 5. at least two labels
//! 6. every label is 1..=63 characters and does not start or end with `-`

use std::fmt;

use thiserror::Error;

use crate::domain::value_objects::NormalizedName;

/// Fixed message for every syntax failure on an encodable name.
pub const MESSAGE_FQDN_INVALID: &str = "FQDN invalid";

pub const MAX_NAME_LEN: usize = 255;
pub const MAX_LABEL_LEN: usize = 63;
const MIN_LABELS: usize = 2;

/// Why a candidate failed the syntax rules.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxViolation {
    /// The candidate has no ASCII-compatible encoding.
    #[error("value is not a domain name string")]
    NotADomainString,

    /// The candidate encodes but breaks one of the FQDN rules.
    #[error("{}", MESSAGE_FQDN_INVALID)]
    Invalid(SyntaxRule),
}

/// The rule an encodable name broke. Carried for diagnostics only; callers
/// see the single "FQDN invalid" classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxRule {
    LeadingOrTrailingDot,
    NameTooLong,
    InvalidCharacter,
    TooFewLabels,
    EmptyLabel,
    LabelTooLong,
    LabelHyphen,
}

impl fmt::Display for SyntaxRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LeadingOrTrailingDot => "starts or ends with '.'",
            Self::NameTooLong => "longer than 255 characters",
            Self::InvalidCharacter => "contains characters outside [a-zA-Z0-9-.]",
            Self::TooFewLabels => "fewer than two labels",
            Self::EmptyLabel => "contains an empty label",
            Self::LabelTooLong => "a label is longer than 63 characters",
            Self::LabelHyphen => "a label starts or ends with '-'",
        })
    }
}

/// Stateless FQDN syntax validator.
pub struct SyntaxValidator;

impl SyntaxValidator {
    /// `true` when `candidate` is a syntactically valid FQDN.
    pub fn is_valid_fqdn(candidate: &str) -> bool {
        Self::validate(candidate).is_ok()
    }

    /// Normalize `candidate` and check it, returning the normalized name.
    pub fn validate(candidate: &str) -> Result<NormalizedName, SyntaxViolation> {
        let name =
            NormalizedName::parse(candidate).map_err(|_| SyntaxViolation::NotADomainString)?;
        Self::check(&name)?;
        Ok(name)
    }

    /// Run rules 2-6 on an already normalized name.
    pub fn check(name: &NormalizedName) -> Result<(), SyntaxViolation> {
        let value = name.as_str();

        if value.starts_with('.') || value.ends_with('.') {
            return Err(SyntaxViolation::Invalid(SyntaxRule::LeadingOrTrailingDot));
        }
        if value.len() > MAX_NAME_LEN {
            return Err(SyntaxViolation::Invalid(SyntaxRule::NameTooLong));
        }
        if !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
        {
            return Err(SyntaxViolation::Invalid(SyntaxRule::InvalidCharacter));
        }

        let labels: Vec<&str> = name.labels().collect();
        if labels.len() < MIN_LABELS {
            return Err(SyntaxViolation::Invalid(SyntaxRule::TooFewLabels));
        }

        for label in labels {
            if label.is_empty() {
                return Err(SyntaxViolation::Invalid(SyntaxRule::EmptyLabel));
            }
            if label.len() > MAX_LABEL_LEN {
                return Err(SyntaxViolation::Invalid(SyntaxRule::LabelTooLong));
            }
            if label.starts_with('-') || label.ends_with('-') {
                return Err(SyntaxViolation::Invalid(SyntaxRule::LabelHyphen));
            }
        }

        Ok(())
    }
}
