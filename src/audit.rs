// src/audit.rs
//
// Completeness checks on an extracted batch: which card ids should exist but
// did not come out of the table.

use std::collections::{BTreeMap, HashSet};

use lazy_static::lazy_static;
use regex::Regex;

/// Highest known card number per pack prefix (secret rares included).
/// Needs a bump whenever a new set is released.
pub const PACK_MAX_IDS: &[(&str, u32)] = &[
    ("A1", 286),
    ("A1a", 86),
    ("A2", 207),
    ("A2a", 96),
    ("A2b", 111),
    ("A3", 239),
    ("A3a", 103),
    ("A3b", 107),
    ("A4", 241),
    ("A4a", 105),
    ("P-A", 108),
];

lazy_static! {
    static ref CARD_ID: Regex = Regex::new(r"\b((?:A|B)\d(?:a|b)?|P-A) (\d{3})\b").unwrap();
    static ref EXACT_ID: Regex = Regex::new(r"^((?:A|B)\d(?:a|b)?|P-A) (\d{3})$").unwrap();
}

/// First card id in free text: `"Pokemon TCG Pocket - A1 001 Bulbasaur"` → `"A1 001"`.
pub fn card_id_in(text: &str) -> Option<String> {
    CARD_ID.find(text).map(|m| s!(m.as_str()))
}

/// `"A2a 096"` → `("A2a", 96)`.
pub fn split_card_id(id: &str) -> Option<(&str, u32)> {
    let caps = EXACT_ID.captures(id.trim())?;
    let prefix = caps.get(1)?.as_str();
    let n = caps.get(2)?.as_str().parse().ok()?;
    Some((prefix, n))
}

/// Ids `001..=max` per prefix in `pack_max` that are not in `numbers`,
/// grouped by prefix (prefixes with nothing missing map to an empty list).
pub fn missing_card_ids<'a, I>(numbers: I, pack_max: &[(&str, u32)]) -> BTreeMap<String, Vec<String>>
where
    I: IntoIterator<Item = &'a str>,
{
    let seen: HashSet<(&str, u32)> = numbers.into_iter().filter_map(split_card_id).collect();

    let mut out = BTreeMap::new();
    for (prefix, max) in pack_max {
        let missing: Vec<String> = (1..=*max)
            .filter(|n| !seen.contains(&(*prefix, *n)))
            .map(|n| format!("{prefix} {n:03}"))
            .collect();
        if !missing.is_empty() {
            logw!("{}: {} card(s) missing", prefix, missing.len());
        }
        out.insert(s!(*prefix), missing);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_in_text() {
        assert_eq!(card_id_in("Pokemon TCG Pocket - A1 001 Bulbasaur").as_deref(), Some("A1 001"));
        assert_eq!(card_id_in("promo P-A 007 card").as_deref(), Some("P-A 007"));
        assert_eq!(card_id_in("A2a 096").as_deref(), Some("A2a 096"));
        assert_eq!(card_id_in("B1 012 Mega").as_deref(), Some("B1 012"));
        assert_eq!(card_id_in("A1 01"), None);
        assert_eq!(card_id_in("C1 001"), None);
    }

    #[test]
    fn split() {
        assert_eq!(split_card_id("A3b 107"), Some(("A3b", 107)));
        assert_eq!(split_card_id(" P-A 001 "), Some(("P-A", 1)));
        assert_eq!(split_card_id("N/A"), None);
    }

    #[test]
    fn reports_gaps_per_prefix() {
        let numbers = ["X1 001", "X1 003", "N/A", "Y2 001"];
        let packs = [("A1", 3), ("A2", 1)];
        // "X1"/"Y2" are not real prefixes and never match.
        let missing = missing_card_ids(numbers.iter().copied(), &packs);
        assert_eq!(missing["A1"], vec!["A1 001", "A1 002", "A1 003"]);
        assert_eq!(missing["A2"], vec!["A2 001"]);

        let numbers = ["A1 001", "A1 003", "A2 001"];
        let missing = missing_card_ids(numbers.iter().copied(), &packs);
        assert_eq!(missing["A1"], vec!["A1 002"]);
        assert!(missing["A2"].is_empty());
    }
}
