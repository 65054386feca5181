//! # JSON Lines Example Sink

use std::{
    io::{BufWriter, Write},
    path::Path,
};

use conll_spans::ConvertedExample;

use crate::{errors::DataResult, sinks::create_output};

/// Write examples as `{"sentence": ..., "entities": [...]}` lines.
pub fn write_jsonl_to<W: Write>(
    writer: W,
    examples: &[ConvertedExample],
) -> DataResult<()> {
    let mut writer = BufWriter::new(writer);
    for example in examples {
        serde_json::to_writer(&mut writer, example)?;
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write examples to a new JSON Lines file.
///
/// Fails with [`DataError::OutputConflict`](crate::DataError::OutputConflict) if `path` exists.
pub fn write_jsonl<P: AsRef<Path>>(
    path: P,
    examples: &[ConvertedExample],
) -> DataResult<()> {
    let path = path.as_ref();
    write_jsonl_to(create_output(path)?, examples)?;
    log::info!("wrote {} examples to {}", examples.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use conll_spans::Entity;

    use super::*;

    #[test]
    fn test_write_jsonl_to() {
        let examples = vec![ConvertedExample::new(
            "Peter Blackburn",
            vec![Entity::new("Peter Blackburn", "PER", 0, 15)],
        )];

        let mut buf = Vec::new();
        write_jsonl_to(&mut buf, &examples).unwrap();

        assert_eq!(
            String::from_utf8(buf).unwrap(),
            concat!(
                r#"{"sentence":"Peter Blackburn","entities":"#,
                r#"[{"text":"Peter Blackburn","type":"PER","span_start":0,"span_end":15}]}"#,
                "\n"
            )
        );
    }
}
