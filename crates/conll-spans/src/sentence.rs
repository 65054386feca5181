//! # Sentence Builder
//!
//! Joins pre-segmented tokens back into a sentence string.

/// Leading chars which attach a token to the previous one, with no space.
pub const NO_SPACE_BEFORE: [char; 8] = ['\'', ',', '!', '.', '?', '%', ':', ';'];

/// Punctuation-aware token joiner.
///
/// A token is preceded by a single space unless it is the first token,
/// or its *leading* char is in the attach set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceBuilder {
    attach: Vec<char>,
}

impl Default for SentenceBuilder {
    fn default() -> Self {
        Self::new(NO_SPACE_BEFORE)
    }
}

impl SentenceBuilder {
    /// Build a joiner with the given attach set.
    pub fn new<I>(attach: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        Self {
            attach: attach.into_iter().collect(),
        }
    }

    /// The attach set.
    pub fn attach_chars(&self) -> &[char] {
        &self.attach
    }

    /// Does this token attach to the previous token?
    ///
    /// Empty tokens never attach.
    pub fn attaches(
        &self,
        token: &str,
    ) -> bool {
        token
            .chars()
            .next()
            .is_some_and(|c| self.attach.contains(&c))
    }

    /// Join `tokens` into a sentence.
    pub fn build<S: AsRef<str>>(
        &self,
        tokens: &[S],
    ) -> String {
        let capacity = tokens.iter().map(|t| t.as_ref().len() + 1).sum();
        let mut sentence = String::with_capacity(capacity);

        for token in tokens {
            let token = token.as_ref();
            if !sentence.is_empty() && !self.attaches(token) {
                sentence.push(' ');
            }
            sentence.push_str(token);
        }

        sentence
    }
}

/// Join `tokens` into a sentence with the default [`SentenceBuilder`].
pub fn build_sentence<S: AsRef<str>>(tokens: &[S]) -> String {
    SentenceBuilder::default().build(tokens)
}
