use std::io::{BufReader, Read};

use conll_spans::{ConvertedExample, DatasetRecord, TagMapping};
use conll_spans_data::{
    InputFormat,
    OutputFormat,
    RecordColumns,
    ensure_output_absent,
    parse_conll_text,
    read_records,
    sinks::jsonl_sink::write_jsonl_to,
    sources::jsonl_source::read_jsonl,
    write_examples,
};

fn squash_standard_io(path: &Option<String>) -> Option<String> {
    match path {
        Some(p) if p == "-" => None,
        Some(p) => Some(p.clone()),
        None => None,
    }
}

/// Input file formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum FileFormat {
    /// Parquet with `tokens` and `ner_tags` list columns.
    #[default]
    Parquet,

    /// CoNLL-2003 column text.
    Conll,

    /// JSON Lines records.
    Jsonl,
}

impl From<FileFormat> for InputFormat {
    fn from(format: FileFormat) -> Self {
        match format {
            FileFormat::Parquet => InputFormat::Parquet,
            FileFormat::Conll => InputFormat::Conll,
            FileFormat::Jsonl => InputFormat::Jsonl,
        }
    }
}

/// Output file formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFileFormat {
    /// Parquet with `sentence` and `entities` columns.
    #[default]
    Parquet,

    /// JSON Lines examples.
    Jsonl,
}

impl From<OutputFileFormat> for OutputFormat {
    fn from(format: OutputFileFormat) -> Self {
        match format {
            OutputFileFormat::Parquet => OutputFormat::Parquet,
            OutputFileFormat::Jsonl => OutputFormat::Jsonl,
        }
    }
}

/// Input argument group.
#[derive(clap::Args, Debug)]
pub struct InputArgs {
    /// Optional input file; "-" may be used to indicate stdin.
    ///
    /// When absent, the dataset split is read from the cache.
    #[clap(long, default_value = None)]
    pub input: Option<String>,

    /// The input file format.
    #[arg(long, value_enum, default_value_t = FileFormat::Parquet)]
    pub format: FileFormat,

    /// The tokens column, for parquet inputs.
    #[arg(long, default_value = "tokens")]
    pub tokens_column: String,

    /// The tags column, for parquet inputs.
    #[arg(long, default_value = "ner_tags")]
    pub tags_column: String,
}

impl InputArgs {
    /// The parquet record columns.
    pub fn columns(&self) -> RecordColumns {
        RecordColumns::default()
            .with_tokens(self.tokens_column.as_str())
            .with_tags(self.tags_column.as_str())
    }

    /// Read the input records; `None` if no input was given.
    pub fn read_records(
        &self,
        mapping: &TagMapping,
    ) -> Result<Option<Vec<DatasetRecord>>, Box<dyn std::error::Error>> {
        let Some(input) = &self.input else {
            return Ok(None);
        };

        let records = match squash_standard_io(&self.input) {
            Some(path) => read_records(path, self.format.into(), mapping, &self.columns())?,
            None => match self.format {
                FileFormat::Parquet => return Err("parquet input cannot be read from stdin".into()),
                FileFormat::Conll => {
                    let mut text = String::new();
                    std::io::stdin().lock().read_to_string(&mut text)?;
                    parse_conll_text(&text, mapping)?
                }
                FileFormat::Jsonl => read_jsonl(BufReader::new(std::io::stdin().lock()))?,
            },
        };

        log::info!("loaded {} records from {input}", records.len());
        Ok(Some(records))
    }
}

/// Output argument group.
#[derive(clap::Args, Debug)]
pub struct OutputArgs {
    /// Output file; "-" may be used to indicate stdout.
    ///
    /// An existing file is never overwritten.
    #[clap(long)]
    pub output: String,

    /// The output file format.
    #[arg(long, value_enum, default_value_t = OutputFileFormat::Parquet)]
    pub output_format: OutputFileFormat,
}

impl OutputArgs {
    /// Fail if the output file already exists, or if parquet would go to stdout.
    pub fn check_absent(&self) -> Result<(), Box<dyn std::error::Error>> {
        match squash_standard_io(&Some(self.output.clone())) {
            Some(path) => ensure_output_absent(path)?,
            None if self.output_format == OutputFileFormat::Parquet => {
                return Err("parquet output cannot be written to stdout".into());
            }
            None => {}
        }
        Ok(())
    }

    /// Write the examples.
    pub fn write(
        &self,
        examples: &[ConvertedExample],
    ) -> Result<(), Box<dyn std::error::Error>> {
        match squash_standard_io(&Some(self.output.clone())) {
            Some(path) => write_examples(path, self.output_format.into(), examples)?,
            None => match self.output_format {
                OutputFileFormat::Parquet => {
                    return Err("parquet output cannot be written to stdout".into());
                }
                OutputFileFormat::Jsonl => write_jsonl_to(std::io::stdout().lock(), examples)?,
            },
        }
        Ok(())
    }
}
