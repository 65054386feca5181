//! # Dataset Cache
//!
//! Downloads parquet splits of a hub dataset into a local cache:
//! `<cache_dir>/<dataset>/<split>.parquet`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use conll_spans::DatasetRecord;
use downloader::{Download, Downloader};

use crate::{
    path_resolver::CONLL_SPANS_PATHS,
    sources::parquet_source::{RecordColumns, read_parquet_records},
};

/// The CoNLL-2003 dataset name.
pub const CONLL2003_DATASET: &str = "conll2003";

/// The CoNLL-2003 parquet export base URL.
pub const CONLL2003_BASE_URL: &str =
    "https://huggingface.co/datasets/eriktks/conll2003/resolve/refs%2Fconvert%2Fparquet/conll2003";

/// The CoNLL-2003 remote file template.
pub const CONLL2003_FILE_TEMPLATE: &str = "{split}/0000.parquet";

/// The CoNLL-2003 splits.
pub const CONLL2003_SPLITS: [&str; 3] = ["train", "validation", "test"];

const CACHED_EXTENSION: &str = "parquet";

/// Where a dataset's splits are downloaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSource {
    /// The dataset name; the cache subdirectory.
    pub name: String,

    /// The upstream base URL.
    pub base_url: String,

    /// The remote file template; `"{split}"` is substituted.
    pub file_template: String,
}

impl Default for DatasetSource {
    fn default() -> Self {
        Self::conll2003()
    }
}

impl DatasetSource {
    /// The CoNLL-2003 parquet export.
    pub fn conll2003() -> Self {
        Self {
            name: CONLL2003_DATASET.to_string(),
            base_url: CONLL2003_BASE_URL.to_string(),
            file_template: CONLL2003_FILE_TEMPLATE.to_string(),
        }
    }

    /// Set the base URL.
    pub fn with_base_url<S: Into<String>>(
        self,
        base_url: S,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            ..self
        }
    }

    /// The remote file path of a split.
    pub fn format_remote_path(
        &self,
        split: &str,
    ) -> String {
        self.file_template.replace("{split}", split)
    }

    /// The download URL of a split.
    pub fn split_url(
        &self,
        split: &str,
    ) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.format_remote_path(split)
        )
    }
}

/// Options for [`DatasetCache`].
#[derive(Clone, Default, Debug)]
pub struct DatasetCacheOptions {
    /// Optional path to the cache directory.
    pub cache_dir: Option<PathBuf>,

    /// The dataset source.
    pub source: DatasetSource,

    /// Optional [`Downloader`] builder.
    pub downloader: Option<fn() -> Downloader>,
}

impl DatasetCacheOptions {
    /// Set the cache directory.
    pub fn with_cache_dir<P: AsRef<Path>>(
        mut self,
        cache_dir: Option<P>,
    ) -> Self {
        self.cache_dir = cache_dir.map(|p| p.as_ref().to_path_buf());
        self
    }

    /// Set the dataset source.
    pub fn with_source(
        mut self,
        source: DatasetSource,
    ) -> Self {
        self.source = source;
        self
    }

    /// Set the downloader builder.
    pub fn with_downloader(
        mut self,
        downloader: Option<fn() -> Downloader>,
    ) -> Self {
        self.downloader = downloader;
        self
    }
}

fn check_split(split: &str) -> anyhow::Result<()> {
    if split.is_empty() || split.contains(['/', '\\']) || split.starts_with('.') {
        anyhow::bail!("invalid split name: {split:?}");
    }
    Ok(())
}

/// Local cache of downloaded dataset splits.
pub struct DatasetCache {
    cache_dir: PathBuf,
    source: DatasetSource,
    downloader: Downloader,
}

impl DatasetCache {
    /// Construct a new [`DatasetCache`].
    ///
    /// The cache directory is resolved through [`CONLL_SPANS_PATHS`].
    pub fn new(options: DatasetCacheOptions) -> anyhow::Result<Self> {
        let cache_dir = CONLL_SPANS_PATHS
            .resolve_cache_dir(options.cache_dir)
            .context("failed to resolve cache directory")?;

        let downloader = match options.downloader {
            Some(builder) => builder(),
            None => Downloader::builder().build()?,
        };

        Ok(Self {
            cache_dir,
            source: options.source,
            downloader,
        })
    }

    /// Get the cache directory.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Get the dataset source.
    pub fn source(&self) -> &DatasetSource {
        &self.source
    }

    /// The cache path of a split.
    ///
    /// * Does not check that the path exists.
    /// * Does not initialize the containing directories.
    pub fn split_path(
        &self,
        split: &str,
    ) -> PathBuf {
        self.cache_dir
            .join(&self.source.name)
            .join(format!("{split}.{CACHED_EXTENSION}"))
    }

    /// Is the split cached?
    pub fn has_split(
        &self,
        split: &str,
    ) -> bool {
        self.split_path(split).exists()
    }

    /// Get a cached split path, or an error.
    pub fn try_split_path(
        &self,
        split: &str,
    ) -> anyhow::Result<PathBuf> {
        check_split(split)?;
        let path = self.split_path(split);
        if !path.exists() {
            anyhow::bail!("split {split:?} not cached: {}", path.display());
        }
        Ok(path)
    }

    /// Load a split; download if not cached.
    pub fn load_split(
        &mut self,
        split: &str,
    ) -> anyhow::Result<PathBuf> {
        check_split(split)?;
        let path = self.split_path(split);
        if path.exists() {
            log::debug!("using cached split {}", path.display());
            return Ok(path);
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let url = self.source.split_url(split);
        log::info!("downloading {url}");

        let summaries = self
            .downloader
            .download(&[Download::new(&url).file_name(path.as_ref())])?;
        for summary in summaries {
            summary.map_err(|err| anyhow::anyhow!("download of {url} failed: {err}"))?;
        }

        Ok(path)
    }

    /// Get a split path.
    ///
    /// ## Arguments
    /// * `split` - the split name; e.g. `"test"`.
    /// * `download` - whether to download the split if not cached.
    pub fn get_split(
        &mut self,
        split: &str,
        download: bool,
    ) -> anyhow::Result<PathBuf> {
        if download {
            self.load_split(split)
        } else {
            self.try_split_path(split)
        }
    }

    /// List the names of all cached splits, sorted.
    pub fn list_cached_splits(&self) -> anyhow::Result<Vec<String>> {
        let dir = self.cache_dir.join(&self.source.name);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut splits = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type()?.is_file()
                || path.extension().unwrap_or_default() != CACHED_EXTENSION
            {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                splits.push(stem.to_string());
            }
        }

        splits.sort();
        Ok(splits)
    }

    /// Read the records of a split.
    ///
    /// ## Arguments
    /// * `split` - the split name.
    /// * `download` - whether to download the split if not cached.
    pub fn read_split_records(
        &mut self,
        split: &str,
        download: bool,
    ) -> anyhow::Result<Vec<DatasetRecord>> {
        let path = self.get_split(split, download)?;
        read_parquet_records(&path, &RecordColumns::default())
            .with_context(|| format!("failed to read {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use std::{env, fs::File};

    use serial_test::serial;
    use tempdir::TempDir;

    use super::*;
    use crate::path_resolver::CONLL_SPANS_CACHE_DIR;

    #[test]
    fn test_dataset_source() {
        let source = DatasetSource::default();
        assert_eq!(source.name, "conll2003");
        assert_eq!(source.format_remote_path("test"), "test/0000.parquet");
        assert_eq!(
            source.split_url("test"),
            format!("{CONLL2003_BASE_URL}/test/0000.parquet")
        );

        let source = source.with_base_url("http://localhost:8000/");
        assert_eq!(
            source.split_url("train"),
            "http://localhost:8000/train/0000.parquet"
        );
    }

    #[test]
    fn test_dataset_cache() -> anyhow::Result<()> {
        let tmpdir = TempDir::new("conll-spans-test")?;

        let mut cache = DatasetCache::new(
            DatasetCacheOptions::default().with_cache_dir(Some(tmpdir.path())),
        )?;
        assert_eq!(cache.cache_dir(), tmpdir.path());
        assert!(cache.list_cached_splits()?.is_empty());

        let path = cache.split_path("test");
        assert_eq!(path, tmpdir.path().join("conll2003").join("test.parquet"));
        assert!(!cache.has_split("test"));
        assert!(cache.get_split("test", false).is_err());

        fs::create_dir_all(path.parent().unwrap())?;
        for split in ["validation", "test"] {
            File::create(cache.split_path(split))?;
        }
        File::create(tmpdir.path().join("conll2003").join("notes.txt"))?;

        assert!(cache.has_split("test"));
        assert_eq!(cache.get_split("test", true)?, path);
        assert_eq!(cache.list_cached_splits()?, vec!["test", "validation"]);
        Ok(())
    }

    #[test]
    fn test_invalid_split() -> anyhow::Result<()> {
        let tmpdir = TempDir::new("conll-spans-test")?;
        let mut cache = DatasetCache::new(
            DatasetCacheOptions::default().with_cache_dir(Some(tmpdir.path())),
        )?;
        for split in ["", "../test", ".hidden"] {
            assert!(cache.get_split(split, true).is_err(), "{split:?}");
        }
        Ok(())
    }

    #[test]
    #[serial]
    fn test_env_cache_dir() -> anyhow::Result<()> {
        let orig = env::var(CONLL_SPANS_CACHE_DIR);
        let env_dir = PathBuf::from("/tmp/conll_spans/env_cache");

        unsafe {
            env::set_var(CONLL_SPANS_CACHE_DIR, env_dir.to_str().unwrap());
        }
        let cache = DatasetCache::new(DatasetCacheOptions::default())?;
        assert_eq!(cache.cache_dir(), env_dir.as_path());

        let user_dir = PathBuf::from("/tmp/conll_spans/user_cache");
        let cache =
            DatasetCache::new(DatasetCacheOptions::default().with_cache_dir(Some(&user_dir)))?;
        assert_eq!(cache.cache_dir(), user_dir.as_path());

        match orig {
            Ok(original) => unsafe { env::set_var(CONLL_SPANS_CACHE_DIR, original) },
            Err(_) => unsafe { env::remove_var(CONLL_SPANS_CACHE_DIR) },
        }
        Ok(())
    }
}
