// src/specs/moves.rs
//
// One attack inside the details cell:
//
//   <div class="align"> <b>Razor Leaf</b> <a><img alt="Grass"></a> <a><img alt="Colorless 2"></a> </div>
//   60 <br>
//   effect text…
//
// Name and cost live inside the block; damage and effect are the loose text
// between this block and the next one.

use lazy_static::lazy_static;
use regex::Regex;

use crate::core::html::{element_text, matching_close, text_runs, Tag, Token};
use crate::core::sanitize::normalize_ws;
use crate::core::symbols::parse_energy_cost;

lazy_static! {
    static ref DAMAGE: Regex = Regex::new(r"^\d+[x+]?$").unwrap();
}

/// Token span of one attack block: its open tag at `start`, its close at `end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveBlock {
    pub start: usize,
    pub end: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Move {
    pub name: Option<String>,
    pub cost: Option<String>,
    pub damage: Option<String>,
    pub effect: Option<String>,
}

/// `40`, `50x`, `30+`.
pub fn is_damage(s: &str) -> bool {
    DAMAGE.is_match(s)
}

pub(crate) fn is_bold(tag: &Tag) -> bool {
    tag.is("b") || tag.is("strong") || tag.has_class("a-bold")
}

/// First bold element in `tokens`: `(open index, normalized text)`.
pub(crate) fn bold_label(tokens: &[Token]) -> Option<(usize, String)> {
    tokens.iter().enumerate().find_map(|(i, tok)| {
        tok.open_tag()
            .filter(|t| is_bold(t))
            .map(|_| (i, normalize_ws(&element_text(tokens, i))))
    })
}

/// Energy part of an icon label: `"Pokemon TCG Pocket - Grass"` → `"Grass"`.
fn energy_label(alt: &str) -> String {
    let tail = alt.rsplit_once(" - ").map_or(alt, |(_, t)| t);
    normalize_ws(tail)
}

/// Parse `block`, reading damage/effect up to `next` (or the end of `tokens`).
pub fn extract_move(tokens: &[Token], block: MoveBlock, next: Option<MoveBlock>) -> Move {
    let end = block.end.min(tokens.len().saturating_sub(1));
    let inner = tokens.get(block.start..=end).unwrap_or(&[]);

    let name = bold_label(inner).map(|(_, n)| n).filter(|n| !n.is_empty());

    let cost: String = inner
        .iter()
        .filter_map(Token::open_tag)
        .filter(|t| t.is("img"))
        .filter_map(|t| t.attr("alt"))
        .map(energy_label)
        .filter(|l| !l.is_empty())
        .map(|l| parse_energy_cost(&l))
        .collect();
    let cost = if cost.is_empty() { None } else { Some(cost) };

    let tail_end = next.map_or(tokens.len(), |n| n.start);
    let tail = tokens.get(end + 1..tail_end).unwrap_or(&[]);
    let (damage, effect) = split_damage(text_runs(tail));

    Move { name, cost, damage, effect }
}

/// First fragment is damage when it looks like a number, then the effect.
/// A non-numeric first fragment is the effect on its own.
fn split_damage(runs: Vec<String>) -> (Option<String>, Option<String>) {
    let mut runs = runs.into_iter();
    match runs.next() {
        None => (None, None),
        Some(first) if is_damage(&first) => (Some(first), runs.next()),
        Some(first) => (None, Some(first)),
    }
}

/// Block span starting at the open tag `start`.
pub(crate) fn block_at(tokens: &[Token], start: usize) -> MoveBlock {
    MoveBlock { start, end: matching_close(tokens, start) }
}
