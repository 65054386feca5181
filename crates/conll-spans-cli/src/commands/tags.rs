use std::io::Write;

use conll_spans::TagMapping;

use crate::tag_mapping::TagMappingArgs;

/// Args for the tags command.
#[derive(clap::Args, Debug)]
pub struct TagsArgs {
    #[command(flatten)]
    tag_mapping: TagMappingArgs,
}

impl TagsArgs {
    /// Run the tags command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mapping = self.tag_mapping.load()?;
        write_mapping(&mut std::io::stdout().lock(), &mapping)
    }
}

fn write_mapping(
    writer: &mut dyn Write,
    mapping: &TagMapping,
) -> Result<(), Box<dyn std::error::Error>> {
    for (tag, label) in mapping.iter() {
        let marker = if tag == mapping.sentinel() {
            " (sentinel)"
        } else {
            ""
        };
        writeln!(writer, "{tag}\t{label}{marker}")?;
    }
    writeln!(writer, "types: {}", mapping.entity_types().join(", "))?;
    Ok(())
}
