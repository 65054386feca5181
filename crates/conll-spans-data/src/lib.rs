//! # conll-spans-data
//!
//! Dataset sources, tabular sinks, and a dataset download cache
//! for [`conll_spans`].
//!
//! ```rust,no_run
//! use conll_spans::convert_conll_dataset;
//! use conll_spans_data::{
//!     DatasetCache,
//!     DatasetCacheOptions,
//!     ensure_output_absent,
//!     write_parquet,
//! };
//!
//! let output = "/tmp/conll2003_test.parquet";
//! ensure_output_absent(output)?;
//!
//! let mut cache = DatasetCache::new(DatasetCacheOptions::default())?;
//! let records = cache.read_split_records("test", true)?;
//!
//! let examples = convert_conll_dataset(&records)?;
//! write_parquet(output, &examples)?;
//! # Ok::<(), anyhow::Error>(())
//! ```
#![warn(missing_docs, unused)]

pub mod dataset_cache;
pub mod errors;
pub mod path_resolver;
pub mod sinks;
pub mod sources;

#[doc(inline)]
pub use dataset_cache::{DatasetCache, DatasetCacheOptions, DatasetSource};
#[doc(inline)]
pub use errors::{DataError, DataResult};
#[doc(inline)]
pub use path_resolver::{CONLL_SPANS_CACHE_DIR, CONLL_SPANS_PATHS, PathResolver};
#[doc(inline)]
pub use sinks::{
    OutputFormat,
    ensure_output_absent,
    read_parquet_examples,
    write_examples,
    write_jsonl,
    write_parquet,
};
#[doc(inline)]
pub use sources::{
    InputFormat,
    RecordColumns,
    parse_conll_text,
    read_conll_file,
    read_jsonl_records,
    read_parquet_records,
    read_records,
};
