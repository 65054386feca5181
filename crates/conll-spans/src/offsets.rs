//! # Character Offsets
//!
//! Substring search over a `str` yields byte offsets; entity spans are
//! reported in character (unicode scalar) offsets.

use core::ops::Range;

/// Byte/char offset converter for a single text.
///
/// ASCII text maps offsets by identity; other text carries a
/// `byte -> char` table with an entry for every byte, plus the end.
#[derive(Debug, Clone)]
pub struct CharOffsets {
    byte_to_char: Option<Vec<usize>>,
    char_len: usize,
}

impl CharOffsets {
    /// Build the converter for `text`.
    pub fn new(text: &str) -> Self {
        if text.is_ascii() {
            return Self {
                byte_to_char: None,
                char_len: text.len(),
            };
        }

        let mut table = vec![0; text.len() + 1];
        let mut char_len = 0;
        for (char_idx, (byte_idx, ch)) in text.char_indices().enumerate() {
            table[byte_idx..byte_idx + ch.len_utf8()].fill(char_idx);
            char_len = char_idx + 1;
        }
        table[text.len()] = char_len;

        Self {
            byte_to_char: Some(table),
            char_len,
        }
    }

    /// The number of chars in the text.
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    /// Convert a byte offset (on a char boundary) to a char offset.
    ///
    /// Offsets past the end clamp to [`Self::char_len`].
    pub fn byte_to_char(
        &self,
        byte: usize,
    ) -> usize {
        match &self.byte_to_char {
            None => byte.min(self.char_len),
            Some(table) => table.get(byte).copied().unwrap_or(self.char_len),
        }
    }
}

/// Map a char range of `text` to its byte range.
///
/// Returns `None` if the range is reversed or runs past the end of `text`.
pub fn char_range_to_bytes(
    text: &str,
    chars: Range<usize>,
) -> Option<Range<usize>> {
    if chars.start > chars.end {
        return None;
    }
    if text.is_ascii() {
        return (chars.end <= text.len()).then_some(chars);
    }

    let mut boundaries = text
        .char_indices()
        .map(|(idx, _)| idx)
        .chain(core::iter::once(text.len()));

    let start = boundaries.nth(chars.start)?;
    let end = if chars.end == chars.start {
        start
    } else {
        boundaries.nth(chars.end - chars.start - 1)?
    };
    Some(start..end)
}

/// Slice `text` by a char range.
pub fn slice_chars(
    text: &str,
    chars: Range<usize>,
) -> Option<&str> {
    char_range_to_bytes(text, chars).map(|range| &text[range])
}
