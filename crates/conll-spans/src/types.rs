//! # Common Types

use core::ops::Range;

use crate::offsets::slice_chars;

/// A per-token NER tag id.
pub type TagId = u32;

/// A token-level input record.
///
/// `tokens` and `tags` are parallel; position `i` of each describes the same token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DatasetRecord {
    /// The pre-segmented tokens.
    pub tokens: Vec<String>,

    /// The tag id for each token.
    #[cfg_attr(feature = "serde", serde(rename = "ner_tags"))]
    pub tags: Vec<TagId>,
}

impl DatasetRecord {
    /// Build a record from tokens and tags.
    pub fn new<I, S, G>(
        tokens: I,
        tags: G,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        G: IntoIterator<Item = TagId>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
            tags: tags.into_iter().collect(),
        }
    }

    /// The number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Is the record empty?
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// A typed entity with a character span into its sentence.
///
/// `span_start..span_end` is a half-open range of char offsets,
/// and `sentence[span_start..span_end] == text`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    /// The literal entity text.
    pub text: String,

    /// The entity type label; e.g. `"PER"`.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub entity_type: String,

    /// The char offset of the first char.
    pub span_start: usize,

    /// The char offset one past the last char.
    pub span_end: usize,
}

impl Entity {
    /// Build a new entity.
    pub fn new<S, L>(
        text: S,
        entity_type: L,
        span_start: usize,
        span_end: usize,
    ) -> Self
    where
        S: Into<String>,
        L: Into<String>,
    {
        Self {
            text: text.into(),
            entity_type: entity_type.into(),
            span_start,
            span_end,
        }
    }

    /// The char span.
    pub fn span(&self) -> Range<usize> {
        self.span_start..self.span_end
    }

    /// Does this entity's span overlap `other`'s span?
    pub fn overlaps(
        &self,
        other: &Entity,
    ) -> bool {
        self.span_start < other.span_end && other.span_start < self.span_end
    }
}

/// A reconstructed sentence with its entities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvertedExample {
    /// The reconstructed sentence.
    pub sentence: String,

    /// The entities, ordered by first occurrence.
    pub entities: Vec<Entity>,
}

impl ConvertedExample {
    /// Build a new example.
    pub fn new<S: Into<String>>(
        sentence: S,
        entities: Vec<Entity>,
    ) -> Self {
        Self {
            sentence: sentence.into(),
            entities,
        }
    }

    /// Slice the sentence by an entity's char span.
    ///
    /// Returns `None` if the span does not fit the sentence.
    pub fn span_text(
        &self,
        entity: &Entity,
    ) -> Option<&str> {
        slice_chars(&self.sentence, entity.span())
    }

    /// Check that every entity span slices to its text,
    /// and that the spans are non-empty, ascending, and non-overlapping.
    pub fn spans_are_consistent(&self) -> bool {
        let aligned = self.entities.iter().all(|e| {
            e.span_start < e.span_end && self.span_text(e) == Some(e.text.as_str())
        });

        aligned
            && self
                .entities
                .windows(2)
                .all(|w| w[0].span_end <= w[1].span_start)
    }
}

/// Static check that a value is [`Send`].
pub fn check_is_send<S: Send>(_: S) {}

/// Static check that a value is [`Sync`].
pub fn check_is_sync<S: Sync>(_: S) {}
