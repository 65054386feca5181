//! # `conll-spans` NER Dataset Converter
//!
//! Converts token-level, tag-per-token NER records (CoNLL style) into
//! sentence-level examples: a reconstructed sentence plus typed entities
//! with char spans into that sentence.
//!
//! See:
//! * [`sentence`] to rebuild sentences from tokens.
//! * [`reconstruct`] to merge tagged tokens into entities and resolve their spans.
//! * [`converter`] to convert records in order.
//! * [`mapping`] for tag id to entity type configuration.
//!
//! ## Crate Features
//!
#![doc = document_features::document_features!()]
//!
//! ## Converting Records
//!
//! ```rust
//! use conll_spans::{DatasetConverter, DatasetRecord, Entity};
//!
//! let record = DatasetRecord::new(
//!     ["Syria", ":", "24", "-", "Salem", "Bitar", ","],
//!     [5, 0, 0, 0, 1, 2, 0],
//! );
//!
//! let example = DatasetConverter::default().convert_record(&record)?;
//!
//! assert_eq!(example.sentence, "Syria: 24 - Salem Bitar,");
//! assert_eq!(
//!     example.entities,
//!     vec![
//!         Entity::new("Syria", "LOC", 0, 5),
//!         Entity::new("Salem Bitar", "PER", 12, 23),
//!     ]
//! );
//! # Ok::<(), conll_spans::SpanError>(())
//! ```
#![warn(missing_docs, unused)]

#[cfg(feature = "rayon")]
pub mod rayon;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub mod converter;
pub mod errors;
pub mod mapping;
pub mod offsets;
pub mod reconstruct;
pub mod sentence;
pub mod types;

#[doc(inline)]
pub use converter::{BatchConverter, ConverterOptions, DatasetConverter, convert_conll_dataset};
#[doc(inline)]
pub use errors::{ConvertError, ConvertResult, MappingError, SpanError, SpanResult};
#[doc(inline)]
pub use mapping::{OUTSIDE_LABEL, SENTINEL_TAG, TagMapping};
#[doc(inline)]
pub use reconstruct::{EntityReconstructor, SpanAnchor, reconstruct_entities};
#[doc(inline)]
pub use sentence::{NO_SPACE_BEFORE, SentenceBuilder, build_sentence};
#[doc(inline)]
pub use types::{ConvertedExample, DatasetRecord, Entity, TagId};
