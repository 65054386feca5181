//! # Parquet Example Sink
//!
//! One row per [`ConvertedExample`]:
//!
//! | column     | type                                                                    |
//! | ---------- | ----------------------------------------------------------------------- |
//! | `sentence` | `Utf8`                                                                  |
//! | `entities` | `List<Struct<text: Utf8, type: Utf8, span_start: Int64, span_end: Int64>>` |

use std::{fs::File, path::Path, sync::Arc};

use arrow::{
    array::{Array, ArrayRef, AsArray, Int64Array, ListArray, RecordBatch, StringArray, StructArray},
    buffer::OffsetBuffer,
    datatypes::{DataType, Field, Fields, Int64Type, Schema, SchemaRef},
};
use conll_spans::{ConvertedExample, Entity};
use parquet::arrow::{ArrowWriter, arrow_reader::ParquetRecordBatchReaderBuilder};

use crate::{
    errors::{DataError, DataResult},
    sinks::create_output,
};

/// The sentence column name.
pub const SENTENCE_COLUMN: &str = "sentence";

/// The entities column name.
pub const ENTITIES_COLUMN: &str = "entities";

/// Rows per written record batch.
pub const PARQUET_BATCH_ROWS: usize = 8192;

/// The struct fields of one entity.
pub fn entity_fields() -> Fields {
    Fields::from(vec![
        Field::new("text", DataType::Utf8, false),
        Field::new("type", DataType::Utf8, false),
        Field::new("span_start", DataType::Int64, false),
        Field::new("span_end", DataType::Int64, false),
    ])
}

fn entity_item_field() -> Arc<Field> {
    Arc::new(Field::new("item", DataType::Struct(entity_fields()), true))
}

/// The arrow schema of the example sink.
pub fn example_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new(SENTENCE_COLUMN, DataType::Utf8, false),
        Field::new(ENTITIES_COLUMN, DataType::List(entity_item_field()), false),
    ]))
}

/// Build one [`RecordBatch`] of examples.
pub fn examples_batch(examples: &[ConvertedExample]) -> DataResult<RecordBatch> {
    let sentences = StringArray::from_iter_values(examples.iter().map(|e| e.sentence.as_str()));

    // `from_iter_values` needs an exact size hint; a flattened iterator has none.
    let entities: Vec<&Entity> = examples.iter().flat_map(|e| e.entities.iter()).collect();
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from_iter_values(
            entities.iter().map(|e| e.text.as_str()),
        )),
        Arc::new(StringArray::from_iter_values(
            entities.iter().map(|e| e.entity_type.as_str()),
        )),
        Arc::new(Int64Array::from_iter_values(
            entities.iter().map(|e| e.span_start as i64),
        )),
        Arc::new(Int64Array::from_iter_values(
            entities.iter().map(|e| e.span_end as i64),
        )),
    ];
    let values = StructArray::try_new(entity_fields(), columns, None)?;

    let offsets = OffsetBuffer::<i32>::from_lengths(examples.iter().map(|e| e.entities.len()));
    let lists = ListArray::try_new(entity_item_field(), offsets, Arc::new(values), None)?;

    Ok(RecordBatch::try_new(
        example_schema(),
        vec![Arc::new(sentences), Arc::new(lists)],
    )?)
}

/// Write examples to a new parquet file.
///
/// Fails with [`DataError::OutputConflict`] if `path` exists.
///
/// ## Arguments
/// * `path` - the output file; must not exist.
/// * `examples` - the examples, written in order.
pub fn write_parquet<P: AsRef<Path>>(
    path: P,
    examples: &[ConvertedExample],
) -> DataResult<()> {
    let path = path.as_ref();
    let file = create_output(path)?;

    let mut writer = ArrowWriter::try_new(file, example_schema(), None)?;
    for chunk in examples.chunks(PARQUET_BATCH_ROWS) {
        writer.write(&examples_batch(chunk)?)?;
    }
    writer.close()?;

    log::info!("wrote {} examples to {}", examples.len(), path.display());
    Ok(())
}

fn schema_err<T>(message: String) -> DataResult<T> {
    Err(DataError::Schema(message))
}

fn column<'b>(
    batch: &'b RecordBatch,
    name: &str,
) -> DataResult<&'b ArrayRef> {
    batch
        .column_by_name(name)
        .ok_or_else(|| DataError::Schema(format!("missing column {name:?}")))
}

fn span_offset(
    value: i64,
    row: usize,
) -> DataResult<usize> {
    usize::try_from(value)
        .map_err(|_| DataError::Schema(format!("row {row}: negative span offset {value}")))
}

fn row_entities(
    entities: &StructArray,
    row: usize,
) -> DataResult<Vec<Entity>> {
    let strings = |name: &str| {
        entities
            .column_by_name(name)
            .and_then(|c| c.as_string_opt::<i32>())
            .ok_or_else(|| DataError::Schema(format!("row {row}: bad entity field {name:?}")))
    };
    let ints = |name: &str| {
        entities
            .column_by_name(name)
            .and_then(|c| c.as_primitive_opt::<Int64Type>())
            .ok_or_else(|| DataError::Schema(format!("row {row}: bad entity field {name:?}")))
    };

    let text = strings("text")?;
    let entity_type = strings("type")?;
    let start = ints("span_start")?;
    let end = ints("span_end")?;

    (0..entities.len())
        .map(|i| {
            Ok(Entity {
                text: text.value(i).to_string(),
                entity_type: entity_type.value(i).to_string(),
                span_start: span_offset(start.value(i), row)?,
                span_end: span_offset(end.value(i), row)?,
            })
        })
        .collect()
}

/// Extract examples from one [`RecordBatch`] in the sink format.
pub fn batch_examples(batch: &RecordBatch) -> DataResult<Vec<ConvertedExample>> {
    let Some(sentences) = column(batch, SENTENCE_COLUMN)?.as_string_opt::<i32>() else {
        return schema_err(format!("column {SENTENCE_COLUMN:?} is not a string"));
    };
    let Some(entities) = column(batch, ENTITIES_COLUMN)?.as_list_opt::<i32>() else {
        return schema_err(format!("column {ENTITIES_COLUMN:?} is not a list"));
    };

    (0..batch.num_rows())
        .map(|row| {
            let values = entities.value(row);
            let Some(values) = values.as_struct_opt() else {
                return schema_err(format!("row {row}: entities are not structs"));
            };
            Ok(ConvertedExample::new(
                sentences.value(row),
                row_entities(values, row)?,
            ))
        })
        .collect()
}

/// Read examples back from a parquet file written by [`write_parquet`].
pub fn read_parquet_examples<P: AsRef<Path>>(path: P) -> DataResult<Vec<ConvertedExample>> {
    let file = File::open(path.as_ref())?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut examples = Vec::new();
    for batch in reader {
        examples.extend(batch_examples(&batch?)?);
    }
    Ok(examples)
}
