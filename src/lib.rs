// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod specs;

pub mod audit;
pub mod csv;
pub mod enrich;
pub mod error;
pub mod file;
pub mod overrides;
pub mod progress;
pub mod record;
pub mod runner;

pub use crate::config::options::{AppOptions, ExportFormat, ExportOptions, ExtractOptions};
pub use crate::core::html::{parse_row, parse_table, RawRow};
pub use crate::enrich::{Enrichment, EnrichmentSource, NoEnrichment, StaticEnrichment};
pub use crate::error::{ConfigError, Error, Result, StructuralError, TableError};
pub use crate::record::{CardRecord, Field};
pub use crate::runner::{extract_rows, extract_table, Batch};
pub use crate::overrides::OverrideTable;
pub use crate::specs::cards::{extract_card, extract_card_with};
