use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{TopNParseError, ValidationError};

/// The 20 standard single-letter amino-acid codes.
pub const AMINO_ACIDS: &str = "ACDEFGHIKLMNPQRSTVWY";

/// Longest sequence the prediction service accepts.
pub const MAX_SEQUENCE_LEN: usize = 600;

pub fn is_amino_acid(c: char) -> bool {
    AMINO_ACIDS.contains(c.to_ascii_uppercase())
}

/// A protein sequence that passed client-side validation.
///
/// Always uppercase, free of whitespace, drawn from [`AMINO_ACIDS`] and at
/// most [`MAX_SEQUENCE_LEN`] residues long.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Sequence(String);

impl Sequence {
    /// Normalizes raw form input and validates it.
    ///
    /// Whitespace anywhere in the input is dropped and the rest is uppercased
    /// with full Unicode case mapping, so `ß` becomes `SS` and dotless `ı`
    /// becomes `I`. Checks run in order: empty, alphabet, length.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let normalized: String = raw
            .trim()
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_uppercase)
            .collect();

        if normalized.is_empty() {
            return Err(ValidationError::EmptySequence);
        }
        if let Some(invalid) = normalized.chars().find(|c| !is_amino_acid(*c)) {
            return Err(ValidationError::InvalidCharacters { first: invalid });
        }
        // ASCII only at this point, so bytes == residues.
        if normalized.len() > MAX_SEQUENCE_LEN {
            return Err(ValidationError::TooLong {
                len: normalized.len(),
            });
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Sequence {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Sequence {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Sequence::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// How many ranked predictions to ask the service for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TopNRepr", into = "TopNRepr")]
pub enum TopN {
    Count(u32),
    All,
}

impl TopN {
    /// Choices offered by the `top_n` select control.
    pub const CHOICES: [TopN; 4] = [TopN::Count(5), TopN::Count(10), TopN::Count(20), TopN::All];

    pub fn limit(self) -> Option<usize> {
        match self {
            TopN::Count(n) => Some(n as usize),
            TopN::All => None,
        }
    }
}

impl Default for TopN {
    fn default() -> Self {
        TopN::Count(10)
    }
}

impl fmt::Display for TopN {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopN::Count(n) => write!(f, "{n}"),
            TopN::All => f.write_str("all"),
        }
    }
}

impl FromStr for TopN {
    type Err = TopNParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(TopN::All);
        }
        match s.parse::<u32>() {
            Ok(0) | Err(_) => Err(TopNParseError(s.to_string())),
            Ok(n) => Ok(TopN::Count(n)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum TopNRepr {
    Count(u32),
    Word(String),
}

impl TryFrom<TopNRepr> for TopN {
    type Error = TopNParseError;

    fn try_from(value: TopNRepr) -> Result<Self, Self::Error> {
        match value {
            TopNRepr::Count(0) => Err(TopNParseError("0".to_string())),
            TopNRepr::Count(n) => Ok(TopN::Count(n)),
            TopNRepr::Word(word) => word.parse(),
        }
    }
}

impl From<TopN> for TopNRepr {
    fn from(value: TopN) -> Self {
        match value {
            TopN::Count(n) => TopNRepr::Count(n),
            TopN::All => TopNRepr::Word("all".to_string()),
        }
    }
}

/// Color band of a confidence bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
}

impl ConfidenceBand {
    pub fn for_confidence(confidence: f64) -> Self {
        if confidence >= 0.8 {
            ConfidenceBand::High
        } else if confidence >= 0.5 {
            ConfidenceBand::Medium
        } else {
            ConfidenceBand::Low
        }
    }

    pub fn hex_color(self) -> &'static str {
        match self {
            ConfidenceBand::High => "#28a745",
            ConfidenceBand::Medium => "#ffc107",
            ConfidenceBand::Low => "#dc3545",
        }
    }

    pub fn rgb(self) -> [u8; 3] {
        match self {
            ConfidenceBand::High => [0x28, 0xa7, 0x45],
            ConfidenceBand::Medium => [0xff, 0xc1, 0x07],
            ConfidenceBand::Low => [0xdc, 0x35, 0x45],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_strips_whitespace_and_uppercases() {
        let seq = Sequence::parse("  mk wv\ttf\nis ll  ").expect("valid");
        assert_eq!(seq.as_str(), "MKWVTFISLL");
        assert_eq!(seq.len(), 10);
    }

    #[test]
    fn parse_accepts_every_standard_residue_in_either_case() {
        let lower = AMINO_ACIDS.to_ascii_lowercase();
        assert_eq!(Sequence::parse(&lower).expect("lower").as_str(), AMINO_ACIDS);
        assert_eq!(Sequence::parse(AMINO_ACIDS).expect("upper").as_str(), AMINO_ACIDS);
    }

    #[test]
    fn parse_rejects_empty_and_whitespace_only_input() {
        assert_eq!(Sequence::parse(""), Err(ValidationError::EmptySequence));
        assert_eq!(Sequence::parse(" \n\t "), Err(ValidationError::EmptySequence));
    }

    #[test]
    fn parse_rejects_non_residue_characters() {
        assert!(matches!(
            Sequence::parse("XYZ123"),
            Err(ValidationError::InvalidCharacters { first: 'X' })
        ));
        assert!(matches!(
            Sequence::parse("ACDB"),
            Err(ValidationError::InvalidCharacters { first: 'B' })
        ));
        assert!(matches!(
            Sequence::parse("acdé"),
            Err(ValidationError::InvalidCharacters { first: 'É' })
        ));
    }

    #[test]
    fn parse_applies_unicode_uppercasing_before_checks() {
        assert_eq!(Sequence::parse("ßıſ").expect("folds").as_str(), "SSIS");
        assert_eq!(Sequence::parse("ﬀ").expect("ligature").as_str(), "FF");

        let expanded = "ß".repeat(301);
        assert_eq!(
            Sequence::parse(&expanded),
            Err(ValidationError::TooLong { len: 602 })
        );
    }

    #[test]
    fn parse_enforces_length_limit_after_stripping() {
        let at_limit = "A".repeat(MAX_SEQUENCE_LEN);
        assert!(Sequence::parse(&at_limit).is_ok());

        let spaced = format!("{at_limit}   \n");
        assert!(Sequence::parse(&spaced).is_ok());

        let over = "G".repeat(MAX_SEQUENCE_LEN + 1);
        assert_eq!(
            Sequence::parse(&over),
            Err(ValidationError::TooLong { len: 601 })
        );
    }

    #[test]
    fn invalid_characters_win_over_length() {
        let over = format!("{}1", "A".repeat(MAX_SEQUENCE_LEN + 10));
        assert!(matches!(
            Sequence::parse(&over),
            Err(ValidationError::InvalidCharacters { first: '1' })
        ));
    }

    #[test]
    fn top_n_serializes_as_integer_or_all() {
        assert_eq!(serde_json::to_value(TopN::Count(5)).expect("json"), serde_json::json!(5));
        assert_eq!(serde_json::to_value(TopN::All).expect("json"), serde_json::json!("all"));

        let parsed: TopN = serde_json::from_value(serde_json::json!("all")).expect("all");
        assert_eq!(parsed, TopN::All);
        let parsed: TopN = serde_json::from_value(serde_json::json!(20)).expect("count");
        assert_eq!(parsed, TopN::Count(20));
        assert!(serde_json::from_value::<TopN>(serde_json::json!("some")).is_err());
    }

    #[test]
    fn top_n_parses_select_values() {
        assert_eq!("all".parse::<TopN>(), Ok(TopN::All));
        assert_eq!(" 10 ".parse::<TopN>(), Ok(TopN::Count(10)));
        assert!("0".parse::<TopN>().is_err());
        assert!("ten".parse::<TopN>().is_err());
        assert_eq!(TopN::default().limit(), Some(10));
        assert_eq!(TopN::All.limit(), None);
    }

    #[test]
    fn confidence_band_thresholds_are_inclusive() {
        assert_eq!(ConfidenceBand::for_confidence(0.8), ConfidenceBand::High);
        assert_eq!(ConfidenceBand::for_confidence(0.79), ConfidenceBand::Medium);
        assert_eq!(ConfidenceBand::for_confidence(0.5), ConfidenceBand::Medium);
        assert_eq!(ConfidenceBand::for_confidence(0.49), ConfidenceBand::Low);
        assert_eq!(ConfidenceBand::High.hex_color(), "#28a745");
        assert_eq!(ConfidenceBand::Low.hex_color(), "#dc3545");
    }
}
