use crate::{
    dataset_cache::DatasetCacheArgs,
    logging::{DEFAULT_LOG_LEVEL, LogArgs},
};

/// Args for the fetch command.
#[derive(clap::Args, Debug)]
pub struct FetchArgs {
    #[clap(flatten)]
    pub logging: LogArgs,

    /// Splits to download.
    #[arg(long = "split", default_value = "test", num_args = 1..)]
    splits: Vec<String>,

    #[command(flatten)]
    dataset_cache: DatasetCacheArgs,
}

impl FetchArgs {
    /// Run the fetch command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(DEFAULT_LOG_LEVEL)?;

        let mut cache = self.dataset_cache.init_dataset_cache()?;
        for split in &self.splits {
            let path = cache.load_split(split)?;
            println!("{}", path.display());
        }

        log::info!(
            "cached splits: {}",
            cache.list_cached_splits()?.join(", ")
        );
        Ok(())
    }
}
