//! # Error Types

use crate::types::TagId;

/// Errors from reconstructing the entities of a single record.
///
/// Every variant is fatal for the record; no partial entity list is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpanError {
    /// A token could not be located in the sentence from the search start.
    ///
    /// This indicates the sentence was not built from the same token sequence.
    #[error("token {token_index} ({token:?}) not found in sentence at or after char {search_start}")]
    Alignment {
        /// The position of the token in the record.
        token_index: usize,

        /// The token text.
        token: String,

        /// The character offset the search started from.
        search_start: usize,
    },

    /// A tag id has no entry in the [`TagMapping`](crate::TagMapping).
    #[error("token {token_index} has unknown tag id {tag}")]
    UnknownTag {
        /// The position of the token in the record.
        token_index: usize,

        /// The unmapped tag id.
        tag: TagId,
    },

    /// The token and tag sequences differ in length.
    #[error("record has {tokens} tokens but {tags} tags")]
    LengthMismatch {
        /// The number of tokens.
        tokens: usize,

        /// The number of tags.
        tags: usize,
    },

    /// An empty token carries an entity tag; it cannot produce a non-empty span.
    #[error("token {token_index} is empty but carries an entity tag")]
    EmptyEntityToken {
        /// The position of the token in the record.
        token_index: usize,
    },
}

/// Errors from converting a sequence of records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    /// A record failed to convert.
    #[error("record {index}: {source}")]
    Record {
        /// The position of the record in the input.
        index: usize,

        /// The record failure.
        #[source]
        source: SpanError,
    },
}

impl ConvertError {
    /// The index of the offending record.
    pub fn record_index(&self) -> usize {
        match self {
            Self::Record { index, .. } => *index,
        }
    }
}

/// Errors from building a [`TagMapping`](crate::TagMapping).
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    /// The sentinel tag id has no label.
    #[error("sentinel tag id {0} is not mapped")]
    MissingSentinel(TagId),

    /// A mapping key is not a valid tag id.
    #[error("invalid tag id key: {0:?}")]
    InvalidTagId(String),

    /// A label is empty.
    #[error("tag id {0} has an empty label")]
    EmptyLabel(TagId),

    /// Malformed mapping JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type for single-record reconstruction.
pub type SpanResult<T> = core::result::Result<T, SpanError>;

/// Result type for batch conversion.
pub type ConvertResult<T> = core::result::Result<T, ConvertError>;
