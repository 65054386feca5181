//! # Parallel Converter

use crate::converter::{BatchConverter, DatasetConverter};
use crate::errors::ConvertResult;
use crate::types::{ConvertedExample, DatasetRecord};

/// Batch-Level Parallel Converter Wrapper.
///
/// Enables ``rayon`` conversion of batches; records are independent,
/// so no coordination is needed beyond the shared read-only mapping.
#[derive(Debug, Clone, Default)]
pub struct ParallelRayonConverter {
    /// Inner converter.
    pub inner: DatasetConverter,
}

impl ParallelRayonConverter {
    /// Create a new parallel converter.
    ///
    /// ## Arguments
    /// * `inner` - The converter to wrap.
    pub fn new(inner: DatasetConverter) -> Self {
        Self { inner }
    }
}

impl From<DatasetConverter> for ParallelRayonConverter {
    fn from(inner: DatasetConverter) -> Self {
        Self::new(inner)
    }
}

impl BatchConverter for ParallelRayonConverter {
    fn converter(&self) -> &DatasetConverter {
        &self.inner
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    fn convert_batch(
        &self,
        batch: &[DatasetRecord],
    ) -> ConvertResult<Vec<ConvertedExample>> {
        use rayon::prelude::*;

        let results: Vec<ConvertResult<ConvertedExample>> = batch
            .par_iter()
            .enumerate()
            .map(|(index, record)| self.inner.convert_indexed(index, record))
            .collect();

        // Sequential collect; reports the lowest failing index.
        let examples = results.into_iter().collect::<ConvertResult<Vec<_>>>()?;
        log::debug!("converted {} records in parallel", examples.len());
        Ok(examples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ConvertError, SpanError};
    use crate::mapping::TagMapping;
    use crate::reconstruct::SpanAnchor;
    use crate::types::{check_is_send, check_is_sync};

    fn sample_batch() -> Vec<DatasetRecord> {
        (0..64)
            .map(|i| {
                DatasetRecord::new(
                    [
                        "Reuters".to_string(),
                        format!("{i}"),
                        "-".to_string(),
                        "Japan".to_string(),
                        "Airlines".to_string(),
                        ".".to_string(),
                    ],
                    [3, 0, 0, 3, 4, 0],
                )
            })
            .collect()
    }

    #[test]
    fn test_matches_sequential() {
        let batch = sample_batch();

        for anchor in [SpanAnchor::TokenCursor, SpanAnchor::EntityStart] {
            let converter = DatasetConverter::new(TagMapping::conll2003(), anchor);
            let expected = converter.convert_batch(&batch).unwrap();

            let parallel = ParallelRayonConverter::new(converter);
            check_is_send(&parallel);
            check_is_sync(&parallel);

            let examples = parallel.convert_batch(&batch).unwrap();
            assert_eq!(examples, expected);
            assert_eq!(examples.len(), batch.len());
            assert_eq!(examples[7].sentence, "Reuters 7 - Japan Airlines.");
        }
    }

    #[test]
    fn test_lowest_failing_index() {
        let mut batch = sample_batch();
        batch[40].tags[0] = 99;
        batch[9].tags.pop();

        let parallel: ParallelRayonConverter = DatasetConverter::default().into();
        let err = parallel.convert_batch(&batch).unwrap_err();
        assert_eq!(
            err,
            ConvertError::Record {
                index: 9,
                source: SpanError::LengthMismatch { tokens: 6, tags: 5 },
            }
        );
        assert_eq!(parallel.converter().anchor(), SpanAnchor::TokenCursor);
    }
}
