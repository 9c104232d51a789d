// src/specs/details.rs
//
// The free-form details cell. Everything here is document order over the
// cell's tokens; nothing relies on nesting beyond "which top-level element
// holds this label".
//
// Pokemon layout (whitespace trimmed):
//
//   <br> <b>Stage</b>: Stage 2 <br>
//   <div> <b>Retreat Cost</b>: <img data-src=".../3998539/..."> </div> <hr>
//   <span>[Ability]</span> Powder Heal <br> ability text
//   <div> <b>Gust</b> <img alt="Grass"> … </div> 60 <br> effect
//   <div> <b>…</b> … </div> …
//
// Trainer cards only carry a paragraph of rules text.

use std::ops::Range;

use crate::core::html::{inner_text, is_break, matching_close, text_runs, Tag, Token};
use crate::core::sanitize::{normalize_ws, strip_label_punct};
use crate::core::symbols::{icon_id_from_src, parse_retreat_cost};
use crate::record::{CardRecord, Field, MovePart};
use super::moves::{block_at, bold_label, extract_move, is_bold, Move, MoveBlock};

pub const ABILITY_MARKER: &str = "[Ability]";
pub const STAGE_LABEL: &str = "Stage";
pub const RETREAT_LABEL: &str = "Retreat Cost";
const TRAINER_PREFIX: &str = "- ";

/// Attack slots on a record.
pub const MOVE_SLOTS: usize = 2;

/// What the details cell yields. `None` leaves the record's empty marker in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DetailFields {
    pub stage: Option<String>,
    pub retreat_cost: Option<String>,
    pub ability_name: Option<String>,
    pub ability_effect: Option<String>,
    /// `moves[0]` is `move1_*`, `moves[1]` is `move2_*`.
    pub moves: [Move; MOVE_SLOTS],
}

impl DetailFields {
    pub fn apply(self, rec: &mut CardRecord) {
        rec.fill(Field::Stage, self.stage);
        rec.fill(Field::RetreatCost, self.retreat_cost);
        rec.fill(Field::AbilityName, self.ability_name);
        rec.fill(Field::AbilityEffect, self.ability_effect);

        for (i, mv) in self.moves.into_iter().enumerate() {
            let slot = i + 1;
            let parts = [
                (MovePart::Name, mv.name),
                (MovePart::Cost, mv.cost),
                (MovePart::Damage, mv.damage),
                (MovePart::Effect, mv.effect),
            ];
            for (part, value) in parts {
                if let Some(field) = Field::for_move(slot, part) {
                    rec.fill(field, value);
                }
            }
        }
    }
}

pub fn parse_details(tokens: &[Token], is_trainer: bool) -> DetailFields {
    if is_trainer {
        parse_trainer(tokens)
    } else {
        parse_pokemon(tokens)
    }
}

/* ---------------- Trainer ---------------- */

fn parse_trainer(tokens: &[Token]) -> DetailFields {
    let text = normalize_ws(&text_runs(tokens).join(" "));
    let text = text.strip_prefix(TRAINER_PREFIX).unwrap_or(&text).trim();
    DetailFields {
        ability_effect: non_empty(text),
        ..DetailFields::default()
    }
}

/* ---------------- Pokemon ---------------- */

fn parse_pokemon(tokens: &[Token]) -> DetailFields {
    let tops = top_level(tokens);
    let blocks = move_blocks(tokens, &tops);
    let ability = ability(tokens, &blocks);

    let mut out = DetailFields {
        stage: stage(tokens),
        retreat_cost: retreat_cost(tokens, &tops),
        ..DetailFields::default()
    };

    // An ability takes the first slot, unless the card also has two attacks.
    let first_slot = if ability.is_some() && blocks.len() < MOVE_SLOTS { 2 } else { 1 };
    if let Some(a) = ability {
        out.ability_name = a.name;
        out.ability_effect = a.effect;
    }

    for (i, block) in blocks.iter().enumerate().take(MOVE_SLOTS + 1 - first_slot) {
        let next = blocks.get(i + 1).copied();
        out.moves[first_slot - 1 + i] = extract_move(tokens, *block, next);
    }
    if blocks.len() > MOVE_SLOTS {
        logd!("details: {} attack blocks, keeping {}", blocks.len(), MOVE_SLOTS);
    }
    out
}

/// Spans of the top-level elements of the cell, in order.
fn top_level(tokens: &[Token]) -> Vec<Range<usize>> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        if tokens[i].open_tag().is_some() {
            let close = matching_close(tokens, i);
            out.push(i..close + 1);
            i = close + 1;
        } else {
            i += 1;
        }
    }
    out
}

/// First bold label whose text is `label` (a trailing colon is tolerated).
fn find_label(tokens: &[Token], label: &str) -> Option<(usize, usize)> {
    tokens.iter().enumerate().find_map(|(i, tok)| {
        if !tok.open_tag().is_some_and(is_bold) {
            return None;
        }
        let close = matching_close(tokens, i);
        let text = strip_label_punct(&inner_text(&tokens[i..=close]));
        text.eq_ignore_ascii_case(label).then_some((i, close))
    })
}

fn stage(tokens: &[Token]) -> Option<String> {
    let (_, close) = find_label(tokens, STAGE_LABEL)?;
    for tok in tokens.get(close + 1..).unwrap_or(&[]) {
        if is_break(tok) {
            break;
        }
        if let Some(text) = tok.text() {
            let v = strip_label_punct(text);
            if !v.is_empty() {
                return Some(v);
            }
        }
    }
    None
}

/// The label's top-level element, or when the label itself sits at the top
/// level, everything from it up to the next break.
fn grouping(tokens: &[Token], tops: &[Range<usize>], open: usize, close: usize) -> Range<usize> {
    match tops.iter().find(|r| r.contains(&open)) {
        Some(r) if r.start != open => r.clone(),
        _ => {
            let end = tokens
                .iter()
                .enumerate()
                .skip(close + 1)
                .find(|(_, t)| is_break(t))
                .map_or(tokens.len(), |(i, _)| i);
            open..end
        }
    }
}

fn retreat_cost(tokens: &[Token], tops: &[Range<usize>]) -> Option<String> {
    let (open, close) = find_label(tokens, RETREAT_LABEL)?;
    let group = grouping(tokens, tops, open, close);
    let src = tokens[group]
        .iter()
        .filter_map(Token::open_tag)
        .filter(|t| t.is("img"))
        .find_map(Tag::image_source)?;
    Some(parse_retreat_cost(icon_id_from_src(src)).to_string())
}

/// Top-level `div`s led by a bold label that is not Stage / Retreat Cost.
fn move_blocks(tokens: &[Token], tops: &[Range<usize>]) -> Vec<MoveBlock> {
    tops.iter()
        .filter(|r| tokens[r.start].is_open("div"))
        .filter(|r| match bold_label(&tokens[r.start..r.end]) {
            Some((_, label)) => {
                let label = strip_label_punct(&label);
                !label.is_empty()
                    && !label.eq_ignore_ascii_case(STAGE_LABEL)
                    && !label.eq_ignore_ascii_case(RETREAT_LABEL)
            }
            None => false,
        })
        .map(|r| block_at(tokens, r.start))
        .collect()
}

struct Ability {
    name: Option<String>,
    effect: Option<String>,
}

/// The two text lines after the marker, stopping at the next attack block.
fn ability(tokens: &[Token], blocks: &[MoveBlock]) -> Option<Ability> {
    let marker = tokens
        .iter()
        .position(|t| t.text().is_some_and(|s| s.contains(ABILITY_MARKER)))?;
    let end = blocks
        .iter()
        .map(|b| b.start)
        .find(|&s| s > marker)
        .unwrap_or(tokens.len());

    let mut lines = Vec::with_capacity(2);
    for (i, run) in text_runs(&tokens[marker..end]).into_iter().enumerate() {
        let run = if i == 0 {
            run.split_once(ABILITY_MARKER).map_or(run.clone(), |(_, rest)| normalize_ws(rest))
        } else {
            run
        };
        if !run.is_empty() {
            lines.push(run);
        }
        if lines.len() == 2 {
            break;
        }
    }

    let mut lines = lines.into_iter();
    Some(Ability { name: lines.next(), effect: lines.next() })
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s!(s)) }
}
