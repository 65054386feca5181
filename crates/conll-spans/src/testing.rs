//! # Testing Fixtures
//!
//! Records with known conversions, shared by this crate's tests and by
//! downstream crates through the ``testing`` feature.

use crate::types::{ConvertedExample, DatasetRecord, Entity};

/// The tokens of the `conll2003` test-split Syria squad record.
pub const SYRIA_SQUAD_TOKENS: [&str; 72] = [
    "Syria", ":", "24", "-", "Salem", "Bitar", ",", "3", "-", "Bachar", "Srour", ";", "4", "-",
    "Hassan", "Abbas", ",", "5", "-", "Tarek", "Jabban", ",", "6", "-", "Ammar", "Awad", "(", "9",
    "-", "Louay", "Taleb", "69", ")", ",", "8", "-", "Nihad", "al-Boushi", ",", "10", "-",
    "Mohammed", "Afash", ",", "12", "-", "Ali", "Dib", ",", "13", "-", "Abdul", "Latif", "Helou",
    "(", "17", "-", "Ammar", "Rihawiy", "46", ")", ",", "14", "-", "Khaled", "Zaher", ";", "16",
    "-", "Nader", "Jokhadar", ".",
];

/// The `conll2003` tag ids of [`SYRIA_SQUAD_TOKENS`].
pub const SYRIA_SQUAD_TAGS: [u32; 72] = [
    5, 0, 0, 0, 1, 2, 0, 0, 0, 1, 2, 0, 0, 0, 1, 2, 0, 0, 0, 1, 2, 0, 0, 0, 1, 2, 0, 0, 0, 1, 2, 0,
    0, 0, 0, 0, 1, 2, 0, 0, 0, 1, 2, 0, 0, 0, 1, 2, 0, 0, 0, 1, 2, 2, 0, 0, 0, 1, 2, 0, 0, 0, 0, 0,
    1, 2, 0, 0, 0, 1, 2, 0,
];

/// The Syria squad record.
pub fn syria_squad_record() -> DatasetRecord {
    DatasetRecord::new(SYRIA_SQUAD_TOKENS, SYRIA_SQUAD_TAGS)
}

/// The converted Syria squad record.
pub fn syria_squad_example() -> ConvertedExample {
    let sentence = concat!(
        "Syria: 24 - Salem Bitar, 3 - Bachar Srour; 4 - Hassan Abbas, 5 - Tarek Jabban,",
        " 6 - Ammar Awad ( 9 - Louay Taleb 69 ), 8 - Nihad al-Boushi, 10 - Mohammed Afash,",
        " 12 - Ali Dib, 13 - Abdul Latif Helou ( 17 - Ammar Rihawiy 46 ), 14 - Khaled Zaher;",
        " 16 - Nader Jokhadar."
    );

    let per = |text: &str, start: usize, end: usize| Entity::new(text, "PER", start, end);
    ConvertedExample::new(
        sentence,
        vec![
            Entity::new("Syria", "LOC", 0, 5),
            per("Salem Bitar", 12, 23),
            per("Bachar Srour", 29, 41),
            per("Hassan Abbas", 47, 59),
            per("Tarek Jabban", 65, 77),
            per("Ammar Awad", 83, 93),
            per("Louay Taleb", 100, 111),
            per("Nihad al-Boushi", 122, 137),
            per("Mohammed Afash", 144, 158),
            per("Ali Dib", 165, 172),
            per("Abdul Latif Helou", 179, 196),
            per("Ammar Rihawiy", 204, 217),
            per("Khaled Zaher", 229, 241),
            per("Nader Jokhadar", 248, 262),
        ],
    )
}

/// A small multi-record batch covering every `conll2003` type.
pub fn sample_records() -> Vec<DatasetRecord> {
    vec![
        DatasetRecord::new(
            ["EU", "rejects", "German", "call", "to", "boycott", "British", "lamb", "."],
            [3, 0, 7, 0, 0, 0, 7, 0, 0],
        ),
        DatasetRecord::new(["Peter", "Blackburn"], [1, 2]),
        DatasetRecord::new(["BRUSSELS", "1996-08-22"], [5, 0]),
        syria_squad_record(),
    ]
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::{
        converter::{DatasetConverter, convert_conll_dataset},
        mapping::TagMapping,
        reconstruct::SpanAnchor,
    };

    #[test]
    fn test_fixtures_agree() {
        let examples = convert_conll_dataset(&[syria_squad_record()]).unwrap();
        assert_eq!(examples, vec![syria_squad_example()]);
        assert_eq!(examples[0].entities.len(), 14);

        let examples = convert_conll_dataset(&sample_records()).unwrap();
        assert_eq!(examples.len(), 4);
        assert_eq!(
            examples[0].sentence,
            "EU rejects German call to boycott British lamb."
        );
        assert_eq!(
            examples[0].entities,
            vec![
                Entity::new("EU", "ORG", 0, 2),
                Entity::new("German", "MISC", 11, 17),
                Entity::new("British", "MISC", 34, 41),
            ]
        );
    }

    #[test]
    fn test_syria_squad_every_anchor() {
        for anchor in SpanAnchor::iter() {
            let converter = DatasetConverter::new(TagMapping::conll2003(), anchor);
            let example = converter.convert_record(&syria_squad_record()).unwrap();
            assert_eq!(example, syria_squad_example(), "{anchor:?}");
        }
    }
}
