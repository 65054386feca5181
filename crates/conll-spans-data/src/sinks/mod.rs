//! # Tabular Sinks
//!
//! Writers for [`ConvertedExample`] sequences.
//! Every sink refuses to overwrite an existing target.

use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};

use conll_spans::ConvertedExample;

use crate::errors::{DataError, DataResult};

pub mod jsonl_sink;
pub mod parquet_sink;

#[doc(inline)]
pub use jsonl_sink::write_jsonl;
#[doc(inline)]
pub use parquet_sink::{read_parquet_examples, write_parquet};

/// On-disk output formats.
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
pub enum OutputFormat {
    /// Parquet; see [`parquet_sink`].
    #[default]
    Parquet,

    /// JSON Lines; see [`jsonl_sink`].
    Jsonl,
}

/// Fail with [`DataError::OutputConflict`] if `path` exists.
pub fn ensure_output_absent<P: AsRef<Path>>(path: P) -> DataResult<()> {
    let path = path.as_ref();
    if path.try_exists()? {
        return Err(DataError::OutputConflict {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Create a new output file, failing if it exists.
pub(crate) fn create_output(path: &Path) -> DataResult<File> {
    File::create_new(path).map_err(|err| match err.kind() {
        io::ErrorKind::AlreadyExists => DataError::OutputConflict {
            path: PathBuf::from(path),
        },
        _ => err.into(),
    })
}

/// Write examples to a new file in the given format.
pub fn write_examples<P: AsRef<Path>>(
    path: P,
    format: OutputFormat,
    examples: &[ConvertedExample],
) -> DataResult<()> {
    match format {
        OutputFormat::Parquet => write_parquet(path, examples),
        OutputFormat::Jsonl => write_jsonl(path, examples),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempdir::TempDir;

    use super::*;

    #[test]
    fn test_ensure_output_absent() -> Result<(), Box<dyn std::error::Error>> {
        let tmpdir = TempDir::new("conll-spans-test")?;
        let path = tmpdir.path().join("out.jsonl");

        ensure_output_absent(&path)?;
        fs::write(&path, "")?;
        assert!(matches!(
            ensure_output_absent(&path),
            Err(DataError::OutputConflict { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_write_examples_conflict() -> Result<(), Box<dyn std::error::Error>> {
        let tmpdir = TempDir::new("conll-spans-test")?;
        let path = tmpdir.path().join("out.jsonl");
        fs::write(&path, "keep")?;

        for format in [OutputFormat::Parquet, OutputFormat::Jsonl] {
            let err = write_examples(&path, format, &[]).unwrap_err();
            assert!(matches!(err, DataError::OutputConflict { .. }), "{err}");
        }
        assert_eq!(fs::read_to_string(&path)?, "keep");
        Ok(())
    }
}
