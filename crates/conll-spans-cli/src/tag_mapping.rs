use conll_spans::TagMapping;

/// Tag mapping arg group.
///
/// Defaults to the standard `conll2003` mapping.
#[derive(clap::Args, Debug)]
#[group(required = false, multiple = false)]
pub struct TagMappingArgs {
    /// JSON file of `{"<tag id>": "<label>"}`; tag id 0 is the sentinel.
    #[arg(long, default_value = None)]
    tag_mapping: Option<String>,

    /// Comma separated class label names, in tag id order; e.g. "O,B-PER,I-PER".
    #[arg(long, value_delimiter = ',', num_args = 1..)]
    label_names: Option<Vec<String>>,
}

impl TagMappingArgs {
    /// Load the selected mapping.
    pub fn load(&self) -> Result<TagMapping, Box<dyn std::error::Error>> {
        if let Some(path) = &self.tag_mapping {
            let json = std::fs::read_to_string(path)?;
            log::debug!("loaded tag mapping from {path}");
            return Ok(TagMapping::from_json(&json)?);
        }
        if let Some(names) = &self.label_names {
            return Ok(TagMapping::from_label_names(names)?);
        }
        Ok(TagMapping::conll2003())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load() {
        let args = TagMappingArgs {
            tag_mapping: None,
            label_names: None,
        };
        assert_eq!(args.load().unwrap(), TagMapping::conll2003());

        let args = TagMappingArgs {
            tag_mapping: None,
            label_names: Some(vec!["O".into(), "B-DRUG".into(), "I-DRUG".into()]),
        };
        let mapping = args.load().unwrap();
        assert_eq!(mapping.label(2), Some("DRUG"));
        assert!(mapping.is_outside(0));
    }
}
