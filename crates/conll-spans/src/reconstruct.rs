//! # Entity Reconstruction
//!
//! Walks a tag sequence against its tokens, merges runs of same-type
//! entity tokens, and resolves each entity's char span in the sentence
//! built from those tokens.
//!
//! Spans are found by forward substring search, since attached punctuation
//! means tokens are not at fixed-width positions, and the same token text
//! may recur in a sentence. Where each search starts is selected by
//! [`SpanAnchor`].

use crate::errors::{SpanError, SpanResult};
use crate::mapping::TagMapping;
use crate::offsets::CharOffsets;
use crate::types::{Entity, TagId};

/// Selects where span searches start.
#[derive(
    Default,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::EnumString,
    strum::EnumIter,
    strum::Display,
)]
#[strum(serialize_all = "kebab-case")]
#[non_exhaustive]
pub enum SpanAnchor {
    /// Locate every token, tagged or not, in order.
    ///
    /// A single cursor advances past the end of each located token;
    /// every search starts at the cursor. Merged entity text is the
    /// sentence slice under the merged span.
    #[default]
    TokenCursor,

    /// Historical span matching.
    ///
    /// * New entities are searched from one char past the end of the
    ///   previous *new* entity's first token.
    /// * Continuations are searched from the start of the entity being extended.
    /// * Merged text is always `previous + " " + token`.
    ///
    /// This reproduces existing converted corpora exactly; but an earlier
    /// duplicate of a continuation token, between the entity start and the
    /// token, will be matched instead of the token itself.
    EntityStart,
}

/// The byte span of the entity under construction.
#[derive(Debug, Clone, Copy)]
struct OpenSpan {
    start: usize,
}

/// Forward substring search over a sentence, in bytes.
struct SpanSearch<'a> {
    sentence: &'a str,
    offsets: CharOffsets,
}

impl<'a> SpanSearch<'a> {
    fn new(sentence: &'a str) -> Self {
        Self {
            sentence,
            offsets: CharOffsets::new(sentence),
        }
    }

    /// Find the byte offset of `token` at or after `from`.
    fn find(
        &self,
        token_index: usize,
        token: &str,
        from: usize,
    ) -> SpanResult<usize> {
        self.sentence
            .get(from..)
            .and_then(|rest| rest.find(token))
            .map(|at| from + at)
            .ok_or_else(|| SpanError::Alignment {
                token_index,
                token: token.to_string(),
                search_start: self.offsets.byte_to_char(from),
            })
    }

    /// The byte offset one char past `byte`.
    fn skip_char(
        &self,
        byte: usize,
    ) -> usize {
        byte + self.sentence[byte..]
            .chars()
            .next()
            .map_or(0, char::len_utf8)
    }

    fn char_at(
        &self,
        byte: usize,
    ) -> usize {
        self.offsets.byte_to_char(byte)
    }
}

/// Rebuilds typed entities from a tagged token sequence.
#[derive(Debug, Clone, Copy)]
pub struct EntityReconstructor<'a> {
    mapping: &'a TagMapping,
    anchor: SpanAnchor,
}

impl<'a> EntityReconstructor<'a> {
    /// Build a reconstructor.
    ///
    /// ## Arguments
    /// * `mapping` - resolves tag ids to type labels.
    /// * `anchor` - selects where span searches start.
    pub fn new(
        mapping: &'a TagMapping,
        anchor: SpanAnchor,
    ) -> Self {
        Self { mapping, anchor }
    }

    /// The tag mapping.
    pub fn mapping(&self) -> &TagMapping {
        self.mapping
    }

    /// The span anchor.
    pub fn anchor(&self) -> SpanAnchor {
        self.anchor
    }

    /// Reconstruct the entities of one record.
    ///
    /// ## Arguments
    /// * `tokens` - the record tokens.
    /// * `tags` - the tag id of each token.
    /// * `sentence` - the sentence built from `tokens`.
    ///
    /// ## Returns
    /// The entities in order of first occurrence; or the first [`SpanError`].
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub fn reconstruct<S: AsRef<str>>(
        &self,
        tokens: &[S],
        tags: &[TagId],
        sentence: &str,
    ) -> SpanResult<Vec<Entity>> {
        if tokens.len() != tags.len() {
            return Err(SpanError::LengthMismatch {
                tokens: tokens.len(),
                tags: tags.len(),
            });
        }

        let search = SpanSearch::new(sentence);

        let mut entities: Vec<Entity> = Vec::new();
        let mut open: Option<OpenSpan> = None;
        let mut cursor = 0;

        for (token_index, (token, &tag)) in tokens.iter().zip(tags).enumerate() {
            let token = token.as_ref();

            if self.mapping.is_outside(tag) {
                if self.anchor == SpanAnchor::TokenCursor {
                    cursor = search.find(token_index, token, cursor)? + token.len();
                }
                open = None;
                continue;
            }

            let entity_type = self
                .mapping
                .label(tag)
                .ok_or(SpanError::UnknownTag { token_index, tag })?;

            if token.is_empty() {
                return Err(SpanError::EmptyEntityToken { token_index });
            }

            let continues = match (open, entities.last()) {
                (Some(span), Some(last)) if last.entity_type == entity_type => Some(span),
                _ => None,
            };

            match (continues, entities.last_mut()) {
                (Some(span), Some(last)) => {
                    let from = match self.anchor {
                        SpanAnchor::TokenCursor => cursor,
                        SpanAnchor::EntityStart => span.start,
                    };
                    let at = search.find(token_index, token, from)?;
                    let end = at + token.len();

                    let text = match self.anchor {
                        SpanAnchor::TokenCursor => sentence[span.start..end].to_string(),
                        SpanAnchor::EntityStart => format!("{} {}", last.text, token),
                    };
                    *last = Entity::new(text, entity_type, last.span_start, search.char_at(end));

                    if self.anchor == SpanAnchor::TokenCursor {
                        cursor = end;
                    }
                }
                _ => {
                    let at = search.find(token_index, token, cursor)?;
                    let end = at + token.len();

                    entities.push(Entity::new(
                        token,
                        entity_type,
                        search.char_at(at),
                        search.char_at(end),
                    ));
                    open = Some(OpenSpan { start: at });

                    cursor = match self.anchor {
                        SpanAnchor::TokenCursor => end,
                        SpanAnchor::EntityStart => search.skip_char(end),
                    };
                }
            }
        }

        Ok(entities)
    }
}

/// Reconstruct the entities of one record.
///
/// See [`EntityReconstructor::reconstruct`].
pub fn reconstruct_entities<S: AsRef<str>>(
    tokens: &[S],
    tags: &[TagId],
    sentence: &str,
    mapping: &TagMapping,
    anchor: SpanAnchor,
) -> SpanResult<Vec<Entity>> {
    EntityReconstructor::new(mapping, anchor).reconstruct(tokens, tags, sentence)
}
