//! # Tag Mapping
//!
//! A [`TagMapping`] is the read-only configuration which resolves per-token
//! tag ids to entity type labels.
//!
//! Begin and inside tags of the same type resolve to the same label; so
//! `B-PER` and `I-PER` are both `"PER"`. Merging is driven only by
//! contiguity of same-type, non-sentinel tags.

use std::collections::BTreeMap;

use crate::errors::MappingError;
use crate::types::TagId;

/// The label of the non-entity sentinel.
pub const OUTSIDE_LABEL: &str = "O";

/// The default sentinel tag id.
pub const SENTINEL_TAG: TagId = 0;

/// The `conll2003` class label names, in tag id order.
pub const CONLL2003_LABEL_NAMES: [&str; 9] = [
    "O", "B-PER", "I-PER", "B-ORG", "I-ORG", "B-LOC", "I-LOC", "B-MISC", "I-MISC",
];

/// Scheme prefixes stripped from class label names.
const SCHEME_PREFIXES: [char; 6] = ['B', 'I', 'E', 'S', 'L', 'U'];

/// Strip a BIO/IOBES scheme prefix from a class label name.
///
/// `"B-PER"`, `"I_PER"` and `"PER"` all yield `"PER"`.
pub fn strip_scheme_prefix(name: &str) -> &str {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(p), Some('-' | '_'))
            if SCHEME_PREFIXES.contains(&p.to_ascii_uppercase()) && name.len() > 2 =>
        {
            &name[2..]
        }
        _ => name,
    }
}

/// Mapping from tag ids to entity type labels.
///
/// ## Style Hints
///
/// Instance names should prefer `tag_mapping`,
/// or `mapping` when there is no ambiguity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMapping {
    /// The non-entity tag id.
    sentinel: TagId,

    /// Type labels by tag id.
    labels: BTreeMap<TagId, String>,

    /// Tag ids by scheme tag name; e.g. `"B-PER" -> 1`.
    names: BTreeMap<String, TagId>,
}

impl Default for TagMapping {
    fn default() -> Self {
        Self::conll2003()
    }
}

impl TagMapping {
    /// Build a mapping holding only the sentinel.
    pub fn new(sentinel: TagId) -> Self {
        Self {
            sentinel,
            labels: BTreeMap::from([(sentinel, OUTSIDE_LABEL.to_string())]),
            names: BTreeMap::from([(OUTSIDE_LABEL.to_string(), sentinel)]),
        }
    }

    /// The standard `conll2003` mapping.
    ///
    /// `{0: O, 1: PER, 2: PER, 3: ORG, 4: ORG, 5: LOC, 6: LOC, 7: MISC, 8: MISC}`
    pub fn conll2003() -> Self {
        CONLL2003_LABEL_NAMES
            .iter()
            .enumerate()
            .skip(1)
            .fold(Self::new(SENTINEL_TAG), |mapping, (id, name)| {
                mapping
                    .with_tag(id as TagId, strip_scheme_prefix(name))
                    .with_tag_name(*name, id as TagId)
            })
    }

    /// Build a mapping from class label names, in tag id order.
    ///
    /// Scheme prefixes are stripped to form the type labels;
    /// the name `"O"` marks the sentinel.
    ///
    /// ## Arguments
    /// * `names` - the class label names; e.g. `["O", "B-PER", "I-PER"]`.
    pub fn from_label_names<I, S>(names: I) -> Result<Self, MappingError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<String> = names
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .collect();

        let sentinel = names
            .iter()
            .position(|n| n == OUTSIDE_LABEL)
            .ok_or(MappingError::MissingSentinel(SENTINEL_TAG))? as TagId;

        let mut mapping = Self::new(sentinel);
        for (id, name) in names.iter().enumerate() {
            let id = id as TagId;
            if id == sentinel {
                continue;
            }
            if name.is_empty() {
                return Err(MappingError::EmptyLabel(id));
            }
            mapping = mapping
                .with_tag(id, strip_scheme_prefix(name))
                .with_tag_name(name, id);
        }
        Ok(mapping)
    }

    /// Build a mapping from a JSON object of `{"<tag id>": "<label>"}`.
    ///
    /// The sentinel is tag id `0`, which must be present.
    pub fn from_json(json: &str) -> Result<Self, MappingError> {
        let raw: BTreeMap<String, String> = serde_json::from_str(json)?;

        let mut labels = BTreeMap::new();
        for (key, label) in raw {
            let id: TagId = key
                .trim()
                .parse()
                .map_err(|_| MappingError::InvalidTagId(key.clone()))?;
            if label.is_empty() {
                return Err(MappingError::EmptyLabel(id));
            }
            labels.insert(id, label);
        }

        if !labels.contains_key(&SENTINEL_TAG) {
            return Err(MappingError::MissingSentinel(SENTINEL_TAG));
        }

        let mut mapping = Self::new(SENTINEL_TAG);
        for (id, label) in labels {
            if id != SENTINEL_TAG {
                mapping = mapping.with_tag(id, label);
            }
        }
        Ok(mapping)
    }

    /// Set the label of a tag id.
    pub fn with_tag<S: Into<String>>(
        mut self,
        tag: TagId,
        label: S,
    ) -> Self {
        self.labels.insert(tag, label.into());
        self
    }

    /// Register a scheme tag name for a tag id.
    pub fn with_tag_name<S: Into<String>>(
        mut self,
        name: S,
        tag: TagId,
    ) -> Self {
        self.names.insert(name.into(), tag);
        self
    }

    /// The sentinel tag id.
    pub fn sentinel(&self) -> TagId {
        self.sentinel
    }

    /// The number of mapped tag ids.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Is the mapping empty?
    ///
    /// This is always false; the sentinel is always mapped.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// The label of a tag id, if mapped.
    pub fn label(
        &self,
        tag: TagId,
    ) -> Option<&str> {
        self.labels.get(&tag).map(String::as_str)
    }

    /// Is this tag id a non-entity tag?
    ///
    /// True for the sentinel, and for any tag id mapped to [`OUTSIDE_LABEL`].
    pub fn is_outside(
        &self,
        tag: TagId,
    ) -> bool {
        tag == self.sentinel || self.label(tag) == Some(OUTSIDE_LABEL)
    }

    /// Look up a tag id by its scheme tag name; e.g. `"B-LOC"`.
    pub fn tag_for_name(
        &self,
        name: &str,
    ) -> Option<TagId> {
        self.names.get(name).copied()
    }

    /// Iterate over `(tag id, label)` pairs, in tag id order.
    pub fn iter(&self) -> impl Iterator<Item = (TagId, &str)> {
        self.labels.iter().map(|(id, label)| (*id, label.as_str()))
    }

    /// The distinct entity type labels, sorted.
    pub fn entity_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self
            .iter()
            .filter(|(id, _)| !self.is_outside(*id))
            .map(|(_, label)| label)
            .collect();
        types.sort_unstable();
        types.dedup();
        types
    }
}
