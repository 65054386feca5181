use conll_spans::{
    BatchConverter,
    ConvertedExample,
    DatasetConverter,
    DatasetRecord,
    SpanAnchor,
    TagMapping,
    rayon::ParallelRayonConverter,
};

use crate::{
    dataset_cache::DatasetCacheArgs,
    input_output::{InputArgs, OutputArgs},
    logging::{DEFAULT_LOG_LEVEL, LogArgs},
    tag_mapping::TagMappingArgs,
};

/// Span anchoring for merged entity tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum AnchorMode {
    /// Locate every token after the previous one.
    #[default]
    TokenCursor,

    /// Search continuation tokens from the entity start.
    EntityStart,
}

impl From<AnchorMode> for SpanAnchor {
    fn from(mode: AnchorMode) -> Self {
        match mode {
            AnchorMode::TokenCursor => SpanAnchor::TokenCursor,
            AnchorMode::EntityStart => SpanAnchor::EntityStart,
        }
    }
}

/// Args for the convert command.
#[derive(clap::Args, Debug)]
pub struct ConvertArgs {
    #[clap(flatten)]
    pub logging: LogArgs,

    #[command(flatten)]
    input: InputArgs,

    /// The dataset split to convert, when no input file is given.
    #[arg(long, default_value = "test", conflicts_with = "input")]
    split: String,

    /// Use only cached splits; never download.
    #[arg(long)]
    offline: bool,

    #[command(flatten)]
    dataset_cache: DatasetCacheArgs,

    #[command(flatten)]
    output: OutputArgs,

    #[command(flatten)]
    tag_mapping: TagMappingArgs,

    /// How merged entity tokens are located in the sentence.
    #[arg(long, value_enum, default_value_t = AnchorMode::TokenCursor)]
    anchor: AnchorMode,

    /// Convert records in parallel.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for --parallel; defaults to the rayon default.
    #[arg(long, requires = "parallel")]
    threads: Option<usize>,
}

impl ConvertArgs {
    /// Run the convert command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(DEFAULT_LOG_LEVEL)?;
        self.convert()
    }

    fn convert(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.output.check_absent()?;

        let mapping = self.tag_mapping.load()?;
        let records = self.load_records(&mapping)?;

        let converter = DatasetConverter::new(mapping, self.anchor.into());
        let examples = self.convert_records(converter, &records)?;
        log::info!(
            "converted {} records; {} entities",
            examples.len(),
            examples.iter().map(|e| e.entities.len()).sum::<usize>()
        );

        self.output.write(&examples)?;
        log::info!("Conversion completed and saved to: {}", self.output.output);

        Ok(())
    }

    fn load_records(
        &self,
        mapping: &TagMapping,
    ) -> Result<Vec<DatasetRecord>, Box<dyn std::error::Error>> {
        if let Some(records) = self.input.read_records(mapping)? {
            return Ok(records);
        }

        let mut cache = self.dataset_cache.init_dataset_cache()?;
        log::info!(
            "reading {}/{} from {}",
            cache.source().name,
            self.split,
            cache.cache_dir().display()
        );
        Ok(cache.read_split_records(&self.split, !self.offline)?)
    }

    fn convert_records(
        &self,
        converter: DatasetConverter,
        records: &[DatasetRecord],
    ) -> Result<Vec<ConvertedExample>, Box<dyn std::error::Error>> {
        if !self.parallel {
            return Ok(converter.convert_batch(records)?);
        }

        let parallel = ParallelRayonConverter::new(converter);
        match self.threads {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()?;
                Ok(pool.install(|| parallel.convert_batch(records))?)
            }
            None => Ok(parallel.convert_batch(records)?),
        }
    }
}
