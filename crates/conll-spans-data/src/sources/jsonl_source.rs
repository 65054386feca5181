//! # JSON Lines Record Source

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use conll_spans::DatasetRecord;

use crate::errors::DataResult;

/// Read records from a reader of `{"tokens": [...], "ner_tags": [...]}` lines.
///
/// Blank lines are skipped.
pub fn read_jsonl<R: BufRead>(reader: R) -> DataResult<Vec<DatasetRecord>> {
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(serde_json::from_str(&line)?);
    }
    Ok(records)
}

/// Read records from a JSON Lines file.
pub fn read_jsonl_records<P: AsRef<Path>>(path: P) -> DataResult<Vec<DatasetRecord>> {
    let path = path.as_ref();
    let records = read_jsonl(BufReader::new(File::open(path)?))?;
    log::info!("read {} records from {}", records.len(), path.display());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DataError;

    #[test]
    fn test_read_jsonl() {
        let text = concat!(
            r#"{"tokens": ["Peter", "Blackburn"], "ner_tags": [1, 2]}"#,
            "\n\n",
            r#"{"id": "7", "tokens": [], "ner_tags": []}"#,
            "\n",
        );

        let records = read_jsonl(text.as_bytes()).unwrap();
        assert_eq!(
            records,
            vec![
                DatasetRecord::new(["Peter", "Blackburn"], [1, 2]),
                DatasetRecord::default(),
            ]
        );
    }

    #[test]
    fn test_bad_line() {
        let err = read_jsonl(r#"{"tokens": ["x"]}"#.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::Json(_)));
    }
}
