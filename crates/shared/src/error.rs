use thiserror::Error;

use crate::domain::MAX_SEQUENCE_LEN;

pub const EMPTY_SEQUENCE_MESSAGE: &str = "Please enter a protein sequence.";
pub const INVALID_CHARACTERS_MESSAGE: &str =
    "Invalid amino acids. Use only: A, C, D, E, F, G, H, I, K, L, M, N, P, Q, R, S, T, V, W, Y";
pub const TOO_LONG_MESSAGE: &str = "Sequence too long. Maximum 600 amino acids.";

/// Client-side rejection of a sequence before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("empty sequence")]
    EmptySequence,
    #[error("invalid residue {first:?}")]
    InvalidCharacters { first: char },
    #[error("sequence has {len} residues, limit is {}", MAX_SEQUENCE_LEN)]
    TooLong { len: usize },
}

impl ValidationError {
    /// Text shown in the error region.
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::EmptySequence => EMPTY_SEQUENCE_MESSAGE,
            ValidationError::InvalidCharacters { .. } => INVALID_CHARACTERS_MESSAGE,
            ValidationError::TooLong { .. } => TOO_LONG_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("top_n must be a positive integer or \"all\", got {0:?}")]
pub struct TopNParseError(pub String);
