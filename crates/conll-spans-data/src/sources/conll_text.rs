//! # CoNLL Text Source
//!
//! Parses the CoNLL-2003 column format:
//!
//! ```text
//! -DOCSTART- -X- -X- O
//!
//! EU NNP B-NP B-ORG
//! rejects VBZ B-VP O
//! ```
//!
//! * Blank lines split sentences.
//! * `-DOCSTART-` lines are skipped.
//! * With 4+ columns, the token is the first column and the tag the fourth.
//! * With 2 or 3 columns, the tag is the last column.
//! * A lone token is tagged `O`.

use std::{fs, path::Path};

use conll_spans::{DatasetRecord, OUTSIDE_LABEL, TagId, TagMapping, mapping::strip_scheme_prefix};

use crate::errors::{DataError, DataResult};

/// The document separator token.
pub const DOCSTART: &str = "-DOCSTART-";

/// Resolve a scheme tag name to a tag id.
///
/// Tries the mapping's registered names first; then falls back to the
/// lowest tag id whose label matches the prefix-stripped name.
pub fn resolve_tag_name(
    mapping: &TagMapping,
    name: &str,
) -> Option<TagId> {
    if name == OUTSIDE_LABEL {
        return Some(mapping.sentinel());
    }
    if let Some(tag) = mapping.tag_for_name(name) {
        return Some(tag);
    }
    let label = strip_scheme_prefix(name);
    mapping
        .iter()
        .find(|(tag, l)| *l == label && !mapping.is_outside(*tag))
        .map(|(tag, _)| tag)
}

fn split_line(line: &str) -> (&str, &str) {
    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts.len() {
        0 => ("", OUTSIDE_LABEL),
        1 => (parts[0], OUTSIDE_LABEL),
        2 | 3 => (parts[0], parts[parts.len() - 1]),
        _ => (parts[0], parts[3]),
    }
}

/// Parse CoNLL text into records, in document order.
///
/// ## Arguments
/// * `text` - the CoNLL text.
/// * `mapping` - resolves string tags to tag ids.
pub fn parse_conll_text(
    text: &str,
    mapping: &TagMapping,
) -> DataResult<Vec<DatasetRecord>> {
    let mut records = Vec::new();
    let mut current = DatasetRecord::default();

    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();

        if line.is_empty() {
            if !current.is_empty() {
                records.push(std::mem::take(&mut current));
            }
            continue;
        }
        if line.starts_with(DOCSTART) {
            continue;
        }

        let (token, name) = split_line(line);
        let tag = resolve_tag_name(mapping, name).ok_or_else(|| DataError::Conll {
            line: idx + 1,
            message: format!("unknown tag {name:?}"),
        })?;

        current.tokens.push(token.to_string());
        current.tags.push(tag);
    }

    if !current.is_empty() {
        records.push(current);
    }

    log::debug!("parsed {} conll records", records.len());
    Ok(records)
}

/// Read and parse a CoNLL text file.
pub fn read_conll_file<P: AsRef<Path>>(
    path: P,
    mapping: &TagMapping,
) -> DataResult<Vec<DatasetRecord>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let records = parse_conll_text(&text, mapping)?;
    log::info!("read {} records from {}", records.len(), path.display());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
-DOCSTART- -X- -X- O

EU NNP B-NP B-ORG
rejects VBZ B-VP O
German JJ B-NP B-MISC
call NN I-NP O
. . O O

Peter NNP B-NP B-PER
Blackburn NNP I-NP I-PER


BRUSSELS NNP B-NP B-LOC
1996-08-22 CD I-NP O
";

    #[test]
    fn test_parse_conll_text() {
        let records = parse_conll_text(SAMPLE, &TagMapping::conll2003()).unwrap();
        assert_eq!(
            records,
            vec![
                DatasetRecord::new(["EU", "rejects", "German", "call", "."], [3, 0, 7, 0, 0]),
                DatasetRecord::new(["Peter", "Blackburn"], [1, 2]),
                DatasetRecord::new(["BRUSSELS", "1996-08-22"], [5, 0]),
            ]
        );
    }

    #[test]
    fn test_short_lines() {
        let text = "Paris\tB-LOC\nis\nnice x O\n";
        let records = parse_conll_text(text, &TagMapping::conll2003()).unwrap();
        assert_eq!(records, vec![DatasetRecord::new(["Paris", "is", "nice"], [5, 0, 0])]);
    }

    #[test]
    fn test_label_fallback() {
        let mapping = TagMapping::from_json(r#"{"0": "O", "4": "DRUG", "9": "DRUG"}"#).unwrap();
        let records = parse_conll_text("aspirin B-DRUG\n", &mapping).unwrap();
        assert_eq!(records, vec![DatasetRecord::new(["aspirin"], [4])]);
    }

    #[test]
    fn test_unknown_tag() {
        let err = parse_conll_text("\nParis B-LOC\nhere B-GPE\n", &TagMapping::conll2003()).unwrap_err();
        match err {
            DataError::Conll { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("B-GPE"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_text() {
        assert!(parse_conll_text("", &TagMapping::conll2003()).unwrap().is_empty());
        assert!(
            parse_conll_text("-DOCSTART- O\n\n\n", &TagMapping::conll2003())
                .unwrap()
                .is_empty()
        );
    }
}
