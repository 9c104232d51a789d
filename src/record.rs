// src/record.rs
//
// One card = one flat record with a fixed key set. Values live in an array
// indexed by `Field`, so a record can never gain or lose a key.

use std::fmt;
use std::ops::Index;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::core::sanitize::normalize;

pub const FIELD_COUNT: usize = 24;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Number,
    Name,
    Rarity,
    Stage,
    Hp,
    Type,
    Weakness,
    RetreatCost,
    Generation,
    Illustrator,
    PackName,
    PackPoints,
    AbilityName,
    AbilityEffect,
    Move1Name,
    Move1Cost,
    Move1Damage,
    Move1Effect,
    Move2Name,
    Move2Cost,
    Move2Damage,
    Move2Effect,
    Image,
    Url,
}

/// The four parts of an attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MovePart { Name, Cost, Damage, Effect }

impl Field {
    /// Export column order.
    pub const ALL: [Field; FIELD_COUNT] = [
        Field::Number, Field::Name, Field::Rarity, Field::Stage, Field::Hp, Field::Type,
        Field::Weakness, Field::RetreatCost, Field::Generation, Field::Illustrator,
        Field::PackName, Field::PackPoints, Field::AbilityName, Field::AbilityEffect,
        Field::Move1Name, Field::Move1Cost, Field::Move1Damage, Field::Move1Effect,
        Field::Move2Name, Field::Move2Cost, Field::Move2Damage, Field::Move2Effect,
        Field::Image, Field::Url,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Field::Number => "number",
            Field::Name => "name",
            Field::Rarity => "rarity",
            Field::Stage => "stage",
            Field::Hp => "HP",
            Field::Type => "type",
            Field::Weakness => "weakness",
            Field::RetreatCost => "retreat_cost",
            Field::Generation => "generation",
            Field::Illustrator => "illustrator",
            Field::PackName => "pack_name",
            Field::PackPoints => "pack_points",
            Field::AbilityName => "ability_name",
            Field::AbilityEffect => "ability_effect",
            Field::Move1Name => "move1_name",
            Field::Move1Cost => "move1_cost",
            Field::Move1Damage => "move1_damage",
            Field::Move1Effect => "move1_effect",
            Field::Move2Name => "move2_name",
            Field::Move2Cost => "move2_cost",
            Field::Move2Damage => "move2_damage",
            Field::Move2Effect => "move2_effect",
            Field::Image => "image",
            Field::Url => "url",
        }
    }

    pub fn from_key(key: &str) -> Option<Field> {
        Field::ALL.iter().copied().find(|f| f.key() == key)
    }

    /// `move{slot}_{part}`; only slots 1 and 2 exist.
    pub fn for_move(slot: usize, part: MovePart) -> Option<Field> {
        use MovePart::*;
        match (slot, part) {
            (1, Name) => Some(Field::Move1Name),
            (1, Cost) => Some(Field::Move1Cost),
            (1, Damage) => Some(Field::Move1Damage),
            (1, Effect) => Some(Field::Move1Effect),
            (2, Name) => Some(Field::Move2Name),
            (2, Cost) => Some(Field::Move2Cost),
            (2, Damage) => Some(Field::Move2Damage),
            (2, Effect) => Some(Field::Move2Effect),
            _ => None,
        }
    }

    fn ix(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Header row in export order.
pub fn headers() -> Vec<String> {
    Field::ALL.iter().map(|f| s!(f.key())).collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardRecord {
    values: [String; FIELD_COUNT],
}

impl CardRecord {
    /// Every field set to `empty`.
    pub fn blank(empty: &str) -> Self {
        Self { values: std::array::from_fn(|_| s!(empty)) }
    }

    pub fn get(&self, field: Field) -> &str {
        &self.values[field.ix()]
    }

    pub(crate) fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values[field.ix()] = value.into();
    }

    /// `set` when there is a value; `None` leaves the field alone.
    pub(crate) fn fill(&mut self, field: Field, value: Option<String>) {
        if let Some(v) = value {
            self.set(field, v);
        }
    }

    /// Run every value through the text normalizer.
    pub(crate) fn normalize(&mut self, empty: &str) {
        for v in self.values.iter_mut() {
            *v = normalize(v, empty);
        }
    }

    /// `(field, value)` pairs in export order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        Field::ALL.iter().map(move |f| (*f, self.get(*f)))
    }
}

impl Index<Field> for CardRecord {
    type Output = str;
    fn index(&self, field: Field) -> &str {
        self.get(field)
    }
}

impl Serialize for CardRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FIELD_COUNT))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field.key(), value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn field_order_matches_discriminants() {
        for (i, f) in Field::ALL.iter().enumerate() {
            assert_eq!(f.ix(), i, "{f}");
        }
    }

    #[test]
    fn keys_are_unique_and_round_trip() {
        let keys: HashSet<_> = Field::ALL.iter().map(|f| f.key()).collect();
        assert_eq!(keys.len(), FIELD_COUNT);
        for f in Field::ALL {
            assert_eq!(Field::from_key(f.key()), Some(f));
        }
        assert_eq!(Field::from_key("move3_name"), None);
    }

    #[test]
    fn header_order() {
        let h = headers();
        assert_eq!(h.first().map(String::as_str), Some("number"));
        assert_eq!(h[4], "HP");
        assert_eq!(h.last().map(String::as_str), Some("url"));
    }

    #[test]
    fn move_slots() {
        assert_eq!(Field::for_move(2, MovePart::Damage), Some(Field::Move2Damage));
        assert_eq!(Field::for_move(3, MovePart::Name), None);
        assert_eq!(Field::for_move(0, MovePart::Name), None);
    }

    #[test]
    fn json_keeps_column_order() {
        let mut r = CardRecord::blank("N/A");
        r.set(Field::Number, "A1 001");
        let json = serde_json::to_string(&r).unwrap();
        assert!(json.starts_with(r#"{"number":"A1 001","name":"N/A""#));
        assert!(json.ends_with(r#""url":"N/A"}"#));
    }
}
