//! # Dataset Sources
//!
//! Readers producing [`DatasetRecord`] sequences from on-disk datasets.

use std::path::Path;

use conll_spans::{DatasetRecord, TagMapping};

use crate::errors::DataResult;

pub mod conll_text;
pub mod jsonl_source;
pub mod parquet_source;

#[doc(inline)]
pub use conll_text::{parse_conll_text, read_conll_file};
#[doc(inline)]
pub use jsonl_source::read_jsonl_records;
#[doc(inline)]
pub use parquet_source::{RecordColumns, read_parquet_records};

/// On-disk input formats.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::EnumString,
    strum::EnumIter,
    strum::Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum InputFormat {
    /// Parquet with list columns of tokens and tag ids.
    #[default]
    Parquet,

    /// CoNLL-2003 column text with string tags.
    Conll,

    /// JSON Lines of `{"tokens": [...], "ner_tags": [...]}`.
    Jsonl,
}

/// Read records from a path in the given format.
///
/// ## Arguments
/// * `path` - the input file.
/// * `format` - the input format.
/// * `mapping` - resolves string tags; only used by [`InputFormat::Conll`].
/// * `columns` - the list columns; only used by [`InputFormat::Parquet`].
pub fn read_records<P: AsRef<Path>>(
    path: P,
    format: InputFormat,
    mapping: &TagMapping,
    columns: &RecordColumns,
) -> DataResult<Vec<DatasetRecord>> {
    match format {
        InputFormat::Parquet => read_parquet_records(path, columns),
        InputFormat::Conll => read_conll_file(path, mapping),
        InputFormat::Jsonl => read_jsonl_records(path),
    }
}
