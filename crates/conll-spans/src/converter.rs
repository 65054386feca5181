//! # Dataset Converter
//!
//! Composes [`SentenceBuilder`] and [`EntityReconstructor`] over records.

use std::sync::Arc;

use crate::errors::{ConvertError, ConvertResult, SpanResult};
use crate::mapping::TagMapping;
use crate::reconstruct::{EntityReconstructor, SpanAnchor};
use crate::sentence::SentenceBuilder;
use crate::types::{ConvertedExample, DatasetRecord};

/// Options for [`DatasetConverter`].
#[derive(Debug, Clone, Default)]
pub struct ConverterOptions {
    /// The tag mapping; defaults to [`TagMapping::conll2003`].
    pub mapping: Option<TagMapping>,

    /// The span anchor.
    pub anchor: SpanAnchor,

    /// The sentence builder.
    pub sentence_builder: SentenceBuilder,
}

impl ConverterOptions {
    /// Set the tag mapping.
    pub fn with_mapping(
        mut self,
        mapping: TagMapping,
    ) -> Self {
        self.mapping = Some(mapping);
        self
    }

    /// Set the span anchor.
    pub fn with_anchor(
        mut self,
        anchor: SpanAnchor,
    ) -> Self {
        self.anchor = anchor;
        self
    }

    /// Set the sentence builder.
    pub fn with_sentence_builder(
        mut self,
        sentence_builder: SentenceBuilder,
    ) -> Self {
        self.sentence_builder = sentence_builder;
        self
    }

    /// Build the converter.
    pub fn build(self) -> DatasetConverter {
        DatasetConverter {
            mapping: Arc::new(self.mapping.unwrap_or_default()),
            anchor: self.anchor,
            sentence_builder: self.sentence_builder,
        }
    }
}

/// Record-to-example converter.
///
/// Holds the shared, read-only [`TagMapping`]; records are converted
/// independently of each other.
#[derive(Debug, Clone)]
pub struct DatasetConverter {
    mapping: Arc<TagMapping>,
    anchor: SpanAnchor,
    sentence_builder: SentenceBuilder,
}

impl Default for DatasetConverter {
    fn default() -> Self {
        ConverterOptions::default().build()
    }
}

impl DatasetConverter {
    /// Build a converter for a mapping and anchor.
    pub fn new(
        mapping: TagMapping,
        anchor: SpanAnchor,
    ) -> Self {
        ConverterOptions::default()
            .with_mapping(mapping)
            .with_anchor(anchor)
            .build()
    }

    /// The tag mapping.
    pub fn mapping(&self) -> &Arc<TagMapping> {
        &self.mapping
    }

    /// The span anchor.
    pub fn anchor(&self) -> SpanAnchor {
        self.anchor
    }

    /// The sentence builder.
    pub fn sentence_builder(&self) -> &SentenceBuilder {
        &self.sentence_builder
    }

    /// Convert one record.
    pub fn convert_record(
        &self,
        record: &DatasetRecord,
    ) -> SpanResult<ConvertedExample> {
        let sentence = self.sentence_builder.build(&record.tokens);
        let entities = EntityReconstructor::new(&self.mapping, self.anchor).reconstruct(
            &record.tokens,
            &record.tags,
            &sentence,
        )?;
        Ok(ConvertedExample { sentence, entities })
    }

    /// Convert a record at a known position in its input.
    pub fn convert_indexed(
        &self,
        index: usize,
        record: &DatasetRecord,
    ) -> ConvertResult<ConvertedExample> {
        self.convert_record(record)
            .map_err(|source| ConvertError::Record { index, source })
    }

    /// Convert records in order.
    ///
    /// Stops at the first failing record; no partial output is returned.
    pub fn convert_records<'r, I>(
        &self,
        records: I,
    ) -> ConvertResult<Vec<ConvertedExample>>
    where
        I: IntoIterator<Item = &'r DatasetRecord>,
    {
        let examples = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| self.convert_indexed(index, record))
            .collect::<ConvertResult<Vec<_>>>()?;

        log::debug!(
            "converted {} records ({} entities)",
            examples.len(),
            examples.iter().map(|e| e.entities.len()).sum::<usize>()
        );
        Ok(examples)
    }
}

/// Batch conversion over a [`DatasetConverter`].
pub trait BatchConverter: Send + Sync {
    /// The underlying record converter.
    fn converter(&self) -> &DatasetConverter;

    /// Convert a batch of records, in order.
    ///
    /// If several records fail, the lowest failing index is reported.
    fn convert_batch(
        &self,
        batch: &[DatasetRecord],
    ) -> ConvertResult<Vec<ConvertedExample>> {
        self.converter().convert_records(batch)
    }
}

impl BatchConverter for DatasetConverter {
    fn converter(&self) -> &DatasetConverter {
        self
    }
}

/// Convert records with the [`TagMapping::conll2003`] mapping.
pub fn convert_conll_dataset<'r, I>(records: I) -> ConvertResult<Vec<ConvertedExample>>
where
    I: IntoIterator<Item = &'r DatasetRecord>,
{
    DatasetConverter::default().convert_records(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SpanError;
    use crate::types::{Entity, check_is_send, check_is_sync};

    #[test]
    fn test_converter_is_shareable() {
        let converter = DatasetConverter::default();
        check_is_send(converter.clone());
        check_is_sync(converter);
    }

    #[test]
    fn test_options() {
        let converter = ConverterOptions::default().build();
        assert_eq!(converter.mapping().as_ref(), &TagMapping::conll2003());
        assert_eq!(converter.anchor(), SpanAnchor::TokenCursor);
        assert_eq!(converter.sentence_builder(), &SentenceBuilder::default());

        let converter = ConverterOptions::default()
            .with_mapping(TagMapping::new(0).with_tag(1, "PERSON"))
            .with_anchor(SpanAnchor::EntityStart)
            .with_sentence_builder(SentenceBuilder::new([',']))
            .build();
        assert_eq!(converter.mapping().label(1), Some("PERSON"));
        assert_eq!(converter.anchor(), SpanAnchor::EntityStart);
        assert_eq!(converter.sentence_builder().attach_chars(), &[',']);
    }

    #[test]
    fn test_convert_records() {
        let records = vec![
            DatasetRecord::new(["EU", "rejects", "German", "call"], [3, 0, 7, 0]),
            DatasetRecord::new(["Peter", "Blackburn"], [1, 2]),
            DatasetRecord::default(),
        ];

        let examples = convert_conll_dataset(&records).unwrap();
        assert_eq!(examples.len(), records.len());

        assert_eq!(
            examples[0],
            ConvertedExample::new(
                "EU rejects German call",
                vec![
                    Entity::new("EU", "ORG", 0, 2),
                    Entity::new("German", "MISC", 11, 17),
                ]
            )
        );
        assert_eq!(
            examples[1],
            ConvertedExample::new(
                "Peter Blackburn",
                vec![Entity::new("Peter Blackburn", "PER", 0, 15)]
            )
        );
        assert_eq!(examples[2], ConvertedExample::default());
    }

    #[test]
    fn test_failing_record_index() {
        let records = vec![
            DatasetRecord::new(["EU"], [3]),
            DatasetRecord::new(["EU"], [3]),
            DatasetRecord::new(["EU", "rejects"], [3]),
            DatasetRecord::new(["EU"], [42]),
        ];

        let err = DatasetConverter::default()
            .convert_batch(&records)
            .unwrap_err();
        assert_eq!(err.record_index(), 2);
        assert_eq!(
            err,
            ConvertError::Record {
                index: 2,
                source: SpanError::LengthMismatch { tokens: 2, tags: 1 },
            }
        );
        assert_eq!(err.to_string(), "record 2: record has 2 tokens but 1 tags");
    }

    #[test]
    fn test_deterministic() {
        let records = vec![DatasetRecord::new(
            ["Nadim", "Ladki", "AL-AIN", ",", "United", "Arab", "Emirates"],
            [1, 2, 5, 0, 5, 6, 6],
        )];
        let converter = DatasetConverter::default();
        let first = converter.convert_records(&records).unwrap();
        let second = converter.convert_records(&records).unwrap();
        assert_eq!(first, second);

        assert_eq!(first[0].sentence, "Nadim Ladki AL-AIN, United Arab Emirates");
        assert_eq!(
            first[0].entities,
            vec![
                Entity::new("Nadim Ladki", "PER", 0, 11),
                Entity::new("AL-AIN", "LOC", 12, 18),
                Entity::new("United Arab Emirates", "LOC", 20, 40),
            ]
        );
    }
}
