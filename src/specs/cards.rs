// src/specs/cards.rs
//
// One `<tr>` of the card table → one `CardRecord`.

use crate::audit::card_id_in;
use crate::config::consts::{MAX_CELLS, MIN_CELLS};
use crate::config::options::ExtractOptions;
use crate::core::html::{first_tag, inner_text, element_text, RawRow, Token};
use crate::core::sanitize::{normalize_ws, pack_points, trim_after_second_parens};
use crate::enrich::EnrichmentSource;
use crate::error::StructuralError;
use crate::overrides::{self, OverrideTable};
use crate::record::{CardRecord, Field};
use super::details::parse_details;

/// Card types that carry rules text instead of stage/attacks.
pub const TRAINER_TYPES: &[&str] = &["Item", "Supporter", "Pokemon Tool"];

/// Named view over a row's cells, checked once.
///
/// `0` checkbox, `1` number, `2` name/image/link, `3` rarity, `4` pack,
/// `5` type icon, `6` HP, `7` stage, `8` points, `9` details, `10` how to get.
/// Cells 0, 7 and 10 are not read: the stage comes from the details cell.
struct Cells<'a> {
    number: &'a [Token],
    name: &'a [Token],
    rarity: &'a [Token],
    pack: &'a [Token],
    type_icon: &'a [Token],
    hp: &'a [Token],
    points: &'a [Token],
    details: &'a [Token],
}

impl<'a> Cells<'a> {
    fn split(row: &'a RawRow) -> Result<Self, StructuralError> {
        let c = &row.cells;
        if c.len() < MIN_CELLS {
            return Err(StructuralError::TooFewCells { found: c.len(), expected: MIN_CELLS });
        }
        if c.len() > MAX_CELLS {
            logd!("row has {} cells, reading the first {}", c.len(), MAX_CELLS);
        }
        Ok(Self {
            number: &c[1],
            name: &c[2],
            rarity: &c[3],
            pack: &c[4],
            type_icon: &c[5],
            hp: &c[6],
            points: &c[8],
            details: &c[9],
        })
    }
}

/// `"Pokemon TCG Pocket - Grass"` → `"Grass"`, `"Pokemon TCG Pocket - Pokemon Tool"` → `"Pokemon Tool"`.
pub fn card_type(icon_label: &str) -> String {
    match icon_label.rsplit_once('-') {
        Some((_, t)) => normalize_ws(t),
        None => s!(icon_label.split_whitespace().last().unwrap_or("")),
    }
}

pub fn is_trainer(card_type: &str) -> bool {
    let t = normalize_ws(card_type);
    TRAINER_TYPES.iter().any(|k| k.eq_ignore_ascii_case(&t))
}

fn cell_text(cell: &[Token]) -> String {
    normalize_ws(&inner_text(cell))
}

/// Full pipeline for one row: base cells, details, enrichment, normalization,
/// then the shipped corrections.
pub fn extract_card(
    row: &RawRow,
    opts: &ExtractOptions,
    enrich: &dyn EnrichmentSource,
) -> Result<CardRecord, StructuralError> {
    let mut rec = extract_uncorrected(row, opts, enrich)?;
    overrides::apply(&mut rec);
    Ok(rec)
}

/// `extract_card` with a caller-supplied correction table.
pub fn extract_card_with(
    row: &RawRow,
    opts: &ExtractOptions,
    enrich: &dyn EnrichmentSource,
    corrections: &OverrideTable,
) -> Result<CardRecord, StructuralError> {
    let mut rec = extract_uncorrected(row, opts, enrich)?;
    corrections.apply(&mut rec);
    Ok(rec)
}

fn extract_uncorrected(
    row: &RawRow,
    opts: &ExtractOptions,
    enrich: &dyn EnrichmentSource,
) -> Result<CardRecord, StructuralError> {
    let cells = Cells::split(row)?;
    let empty = opts.empty_value();
    let mut rec = CardRecord::blank(empty);

    let card_image = first_tag(cells.name, "img").map(|(_, img)| img);
    let number = match cell_text(cells.number) {
        n if !n.is_empty() => n,
        _ => card_image
            .and_then(|img| img.attr("alt"))
            .and_then(card_id_in)
            .unwrap_or_default(),
    };
    let link = first_tag(cells.name, "a");
    let name = link.map(|(i, _)| normalize_ws(&element_text(cells.name, i)));
    let url = link.and_then(|(_, a)| a.attr("href")).map(normalize_ws);
    let image = card_image.and_then(|img| img.image_source()).map(normalize_ws);
    let kind = first_tag(cells.type_icon, "img")
        .and_then(|(_, img)| img.attr("alt"))
        .map(card_type);

    rec.set(Field::Number, number.as_str());
    rec.fill(Field::Name, name);
    rec.fill(Field::Image, image);
    rec.set(Field::Rarity, cell_text(cells.rarity));
    rec.set(Field::PackName, trim_after_second_parens(&cell_text(cells.pack)));
    rec.set(Field::Hp, cell_text(cells.hp));
    rec.set(Field::PackPoints, pack_points(&cell_text(cells.points)));

    let trainer = kind.as_deref().is_some_and(is_trainer);
    rec.fill(Field::Type, kind);
    if let Some(u) = &url {
        rec.set(Field::Url, u.as_str());
    }

    parse_details(cells.details, trainer).apply(&mut rec);
    enrich.lookup(&number, url.as_deref().unwrap_or("")).apply(&mut rec);

    rec.normalize(empty);
    Ok(rec)
}
