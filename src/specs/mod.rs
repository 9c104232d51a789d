// src/specs/mod.rs
//! # Card-table specs
//!
//! Where the data lives inside one row of the card table, and how to read it.
//!
//! ## Layers
//! - `cards`: the row contract (which cell holds what), base fields, card kind.
//! - `details`: the free-form details cell: stage, retreat cost, ability, attack blocks.
//! - `moves`: a single attack block and the loose damage/effect text after it.
//!
//! ## What does **not** live here
//! - Locating the table or iterating rows (`runner`).
//! - Per-card supplementary data (`enrich`) and curated corrections (`overrides`);
//!   `cards::extract_card` merges both in after parsing.
//! - Export formatting (`csv`, `file`).
//!
//! ## Conventions
//! - Everything works on `core::html::Token` lists, in document order.
//! - Parsers return `Option`s; the record keeps its empty marker for `None`.
//! - Unknown icons degrade (`?` glyph, `-1` retreat) and are logged, never raised.
pub mod cards;
pub mod details;
pub mod moves;
