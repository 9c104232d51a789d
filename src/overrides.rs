// src/overrides.rs
//
// Hand-kept corrections for cards whose upstream rows are wrong or
// incomplete. Applied after normalization; a card that is not listed is left
// as extracted.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::record::{CardRecord, Field};

pub type Patch = &'static [(Field, &'static str)];

/// Card number → fields to overwrite. Values must already be normalized.
///
/// Only add an entry together with the card page that shows the correct
/// value, cited in a comment next to it.
pub const ENTRIES: &[(&str, Patch)] = &[];

/// Read-only lookup over a list of patches.
#[derive(Debug, Default)]
pub struct OverrideTable {
    by_number: HashMap<&'static str, Patch>,
}

impl OverrideTable {
    /// Later entries for the same card number replace earlier ones.
    pub fn new(entries: &[(&'static str, Patch)]) -> Self {
        Self { by_number: entries.iter().copied().collect() }
    }

    pub fn len(&self) -> usize {
        self.by_number.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_number.is_empty()
    }

    pub fn lookup(&self, number: &str) -> Option<Patch> {
        self.by_number.get(number).copied()
    }

    /// Overwrite the listed fields of `rec`, keyed by its card number.
    pub fn apply(&self, rec: &mut CardRecord) {
        let Some(patch) = self.lookup(rec.get(Field::Number)) else {
            return;
        };
        for (field, value) in patch {
            rec.set(*field, *value);
        }
        logd!("overrides: {} field(s) corrected on {}", patch.len(), rec.get(Field::Number));
    }
}

lazy_static! {
    static ref TABLE: OverrideTable = OverrideTable::new(ENTRIES);
}

/// Apply the shipped corrections.
pub fn apply(rec: &mut CardRecord) {
    TABLE.apply(rec);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sanitize::normalize;

    const SAMPLE: &[(&str, Patch)] = &[
        ("A9 010", &[(Field::Move1Damage, "30x")]),
        ("A9 020", &[(Field::Move2Cost, "🟣🟣*️⃣*️⃣")]),
        ("P-A 900", &[(Field::Illustrator, "Someone"), (Field::Generation, "9")]),
    ];

    fn record_for(number: &str) -> CardRecord {
        let mut rec = CardRecord::blank("N/A");
        rec.set(Field::Number, number);
        for f in Field::ALL.into_iter().filter(|f| *f != Field::Number) {
            rec.set(f, "extracted");
        }
        rec
    }

    #[test]
    fn every_entry_wins() {
        let table = OverrideTable::new(SAMPLE);
        for (number, patch) in SAMPLE {
            let mut rec = record_for(number);
            table.apply(&mut rec);
            for (field, value) in patch.iter() {
                assert_eq!(rec.get(*field), *value, "{number} {field}");
            }
            let untouched = Field::ALL
                .iter()
                .filter(|f| **f != Field::Number && !patch.iter().any(|(p, _)| p == *f));
            for f in untouched {
                assert_eq!(rec.get(*f), "extracted", "{number} {f}");
            }
        }
    }

    #[test]
    fn miss_is_a_no_op() {
        let table = OverrideTable::new(SAMPLE);
        let mut rec = record_for("A1 001");
        let before = rec.clone();
        table.apply(&mut rec);
        assert_eq!(rec, before);
        assert!(table.lookup("Z9 999").is_none());
    }

    #[test]
    fn later_entry_replaces_earlier() {
        let table = OverrideTable::new(&[
            ("A9 010", &[(Field::Hp, "60")]),
            ("A9 010", &[(Field::Hp, "70")]),
        ]);
        assert_eq!(table.len(), 1);
        let mut rec = record_for("A9 010");
        table.apply(&mut rec);
        assert_eq!(rec.get(Field::Hp), "70");
    }

    #[test]
    fn shipped_entries_are_normalized_and_unique() {
        for (number, patch) in ENTRIES {
            assert!(!patch.is_empty(), "{number}");
            for (_, value) in patch.iter() {
                assert_eq!(normalize(value, "N/A"), *value, "{number}");
                assert!(!value.is_empty());
            }
        }
        assert_eq!(TABLE.len(), ENTRIES.len());
    }
}
