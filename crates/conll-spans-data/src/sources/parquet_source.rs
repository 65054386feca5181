//! # Parquet Record Source
//!
//! Reads token-level records from parquet exports of NER datasets;
//! one row per record, with a `list<string>` tokens column and a
//! `list<int>` tags column.

use std::{fs::File, path::Path};

use arrow::{
    array::{Array, AsArray, ListArray, RecordBatch},
    compute::cast,
    datatypes::{DataType, Int64Type},
};
use conll_spans::{DatasetRecord, TagId};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::errors::{DataError, DataResult};

/// The default tokens column name.
pub const TOKENS_COLUMN: &str = "tokens";

/// The default tags column name.
pub const TAGS_COLUMN: &str = "ner_tags";

/// Column names for parquet record sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordColumns {
    /// The `list<string>` tokens column.
    pub tokens: String,

    /// The `list<int>` tags column.
    pub tags: String,
}

impl Default for RecordColumns {
    fn default() -> Self {
        Self {
            tokens: TOKENS_COLUMN.to_string(),
            tags: TAGS_COLUMN.to_string(),
        }
    }
}

impl RecordColumns {
    /// Set the tokens column name.
    pub fn with_tokens<S: Into<String>>(
        self,
        tokens: S,
    ) -> Self {
        Self {
            tokens: tokens.into(),
            ..self
        }
    }

    /// Set the tags column name.
    pub fn with_tags<S: Into<String>>(
        self,
        tags: S,
    ) -> Self {
        Self {
            tags: tags.into(),
            ..self
        }
    }
}

fn list_column<'b>(
    batch: &'b RecordBatch,
    name: &str,
) -> DataResult<&'b ListArray> {
    batch
        .column_by_name(name)
        .ok_or_else(|| DataError::Schema(format!("missing column {name:?}")))?
        .as_list_opt::<i32>()
        .ok_or_else(|| DataError::Schema(format!("column {name:?} is not a list")))
}

fn row_tokens(
    list: &ListArray,
    row: usize,
) -> DataResult<Vec<String>> {
    let values = list.value(row);
    let strings = values
        .as_string_opt::<i32>()
        .ok_or_else(|| DataError::Schema(format!("row {row}: tokens are not strings")))?;

    strings
        .iter()
        .map(|s| {
            s.map(str::to_string)
                .ok_or_else(|| DataError::Schema(format!("row {row}: null token")))
        })
        .collect()
}

fn row_tags(
    list: &ListArray,
    row: usize,
) -> DataResult<Vec<TagId>> {
    let values = cast(&list.value(row), &DataType::Int64)?;
    let ints = values
        .as_primitive_opt::<Int64Type>()
        .ok_or_else(|| DataError::Schema(format!("row {row}: tags are not integers")))?;

    ints.iter()
        .map(|v| match v {
            Some(v) => TagId::try_from(v)
                .map_err(|_| DataError::Schema(format!("row {row}: tag {v} out of range"))),
            None => Err(DataError::Schema(format!("row {row}: null tag"))),
        })
        .collect()
}

/// Extract records from one [`RecordBatch`].
pub fn batch_records(
    batch: &RecordBatch,
    columns: &RecordColumns,
) -> DataResult<Vec<DatasetRecord>> {
    let tokens = list_column(batch, &columns.tokens)?;
    let tags = list_column(batch, &columns.tags)?;

    (0..batch.num_rows())
        .map(|row| {
            if tokens.is_null(row) || tags.is_null(row) {
                return Err(DataError::Schema(format!("row {row}: null list")));
            }
            Ok(DatasetRecord {
                tokens: row_tokens(tokens, row)?,
                tags: row_tags(tags, row)?,
            })
        })
        .collect()
}

/// Read all records from a parquet file, in row order.
///
/// ## Arguments
/// * `path` - the parquet file.
/// * `columns` - the tokens and tags column names.
pub fn read_parquet_records<P: AsRef<Path>>(
    path: P,
    columns: &RecordColumns,
) -> DataResult<Vec<DatasetRecord>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut records = Vec::new();
    for batch in reader {
        records.extend(batch_records(&batch?, columns)?);
    }

    log::info!("read {} records from {}", records.len(), path.display());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::{
        array::{ArrayRef, Int64Array, ListBuilder, StringBuilder, UInt8Builder},
        datatypes::{Field, Schema},
    };
    use parquet::arrow::ArrowWriter;
    use tempdir::TempDir;

    use super::*;

    fn tokens_array(rows: &[&[&str]]) -> ListArray {
        let mut builder = ListBuilder::new(StringBuilder::new());
        for row in rows {
            for token in *row {
                builder.values().append_value(token);
            }
            builder.append(true);
        }
        builder.finish()
    }

    fn tags_array(rows: &[&[i64]]) -> ListArray {
        ListArray::from_iter_primitive::<Int64Type, _, _>(
            rows.iter()
                .map(|row| Some(row.iter().map(|t| Some(*t)).collect::<Vec<_>>())),
        )
    }

    fn batch(
        tokens: ListArray,
        tags: ArrayRef,
    ) -> RecordBatch {
        let schema = Schema::new(vec![
            Field::new("id", DataType::Int64, false),
            Field::new(TOKENS_COLUMN, tokens.data_type().clone(), true),
            Field::new(TAGS_COLUMN, tags.data_type().clone(), true),
        ]);
        let ids: ArrayRef = Arc::new(Int64Array::from_iter_values(0..tokens.len() as i64));
        RecordBatch::try_new(Arc::new(schema), vec![ids, Arc::new(tokens), tags]).unwrap()
    }

    #[test]
    fn test_batch_records() {
        let batch = batch(
            tokens_array(&[&["EU", "rejects", "German"], &["Peter", "Blackburn"]]),
            Arc::new(tags_array(&[&[3, 0, 7], &[1, 2]])),
        );

        let records = batch_records(&batch, &RecordColumns::default()).unwrap();
        assert_eq!(
            records,
            vec![
                DatasetRecord::new(["EU", "rejects", "German"], [3, 0, 7]),
                DatasetRecord::new(["Peter", "Blackburn"], [1, 2]),
            ]
        );
    }

    #[test]
    fn test_narrow_tag_type() {
        let mut tags = ListBuilder::new(UInt8Builder::new());
        tags.values().append_slice(&[5, 0]);
        tags.append(true);

        let batch = batch(tokens_array(&[&["BRUSSELS", "1996-08-22"]]), Arc::new(tags.finish()));
        let records = batch_records(&batch, &RecordColumns::default()).unwrap();
        assert_eq!(records, vec![DatasetRecord::new(["BRUSSELS", "1996-08-22"], [5, 0])]);
    }

    #[test]
    fn test_schema_errors() {
        let batch = batch(
            tokens_array(&[&["EU"]]),
            Arc::new(tags_array(&[&[-1]])),
        );

        let err = batch_records(&batch, &RecordColumns::default()).unwrap_err();
        assert!(matches!(err, DataError::Schema(ref m) if m.contains("out of range")), "{err}");

        let columns = RecordColumns::default().with_tags("labels");
        let err = batch_records(&batch, &columns).unwrap_err();
        assert!(matches!(err, DataError::Schema(ref m) if m.contains("missing column")), "{err}");

        let columns = RecordColumns::default().with_tokens("id");
        let err = batch_records(&batch, &columns).unwrap_err();
        assert!(matches!(err, DataError::Schema(ref m) if m.contains("not a list")), "{err}");
    }

    #[test]
    fn test_read_parquet_records() -> Result<(), Box<dyn std::error::Error>> {
        let tmpdir = TempDir::new("conll-spans-test")?;
        let path = tmpdir.path().join("test.parquet");

        let batch = batch(
            tokens_array(&[&["Syria", ":", "24"], &[]]),
            Arc::new(tags_array(&[&[5, 0, 0], &[]])),
        );
        let mut writer = ArrowWriter::try_new(File::create(&path)?, batch.schema(), None)?;
        writer.write(&batch)?;
        writer.close()?;

        let records = read_parquet_records(&path, &RecordColumns::default())?;
        assert_eq!(
            records,
            vec![
                DatasetRecord::new(["Syria", ":", "24"], [5, 0, 0]),
                DatasetRecord::default(),
            ]
        );
        Ok(())
    }
}
