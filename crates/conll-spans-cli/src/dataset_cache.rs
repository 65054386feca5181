use conll_spans_data::{DatasetCache, DatasetCacheOptions, DatasetSource};

/// Known hub datasets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum DatasetName {
    /// The CoNLL-2003 shared task corpus.
    #[default]
    Conll2003,
}

impl DatasetName {
    /// The download source.
    pub fn source(self) -> DatasetSource {
        match self {
            DatasetName::Conll2003 => DatasetSource::conll2003(),
        }
    }
}

/// Dataset cache argument group.
#[derive(clap::Args, Debug)]
pub struct DatasetCacheArgs {
    /// The hub dataset.
    #[arg(long, value_enum, default_value_t = DatasetName::Conll2003)]
    dataset: DatasetName,

    /// Cache directory.
    #[arg(long, default_value = None)]
    cache_dir: Option<String>,

    /// Override the dataset download base URL.
    #[arg(long, default_value = None)]
    base_url: Option<String>,
}

impl DatasetCacheArgs {
    /// Initialize the dataset cache.
    pub fn init_dataset_cache(&self) -> Result<DatasetCache, Box<dyn std::error::Error>> {
        let mut source = self.dataset.source();
        if let Some(base_url) = &self.base_url {
            source = source.with_base_url(base_url.as_str());
        }

        let options = DatasetCacheOptions::default()
            .with_cache_dir(self.cache_dir.as_ref())
            .with_source(source);

        Ok(DatasetCache::new(options)?)
    }
}
