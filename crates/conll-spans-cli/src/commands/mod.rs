mod convert;
mod fetch;
mod tags;

/// Subcommands for conll-spans
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Convert token-level NER records into sentences with entity spans.
    Convert(convert::ConvertArgs),

    /// Download dataset splits into the cache.
    Fetch(fetch::FetchArgs),

    /// Print the active tag mapping.
    Tags(tags::TagsArgs),
}

impl Commands {
    /// Run the subcommand.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Commands::Convert(cmd) => cmd.run(),
            Commands::Fetch(cmd) => cmd.run(),
            Commands::Tags(cmd) => cmd.run(),
        }
    }
}
