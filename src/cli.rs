// src/cli.rs
use std::fs::{self, File};
use std::io::BufReader;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::audit::{missing_card_ids, PACK_MAX_IDS};
use crate::config::consts::{CARD_TABLE_SELECTOR, DEFAULT_LOG_LEVEL, EMPTY_VALUE, WORKERS};
use crate::config::options::{AppOptions, ExportFormat, ExtractOptions};
use crate::enrich::{EnrichmentSource, NoEnrichment, StaticEnrichment};
use crate::error::{ConfigError, Result};
use crate::progress::Progress;
use crate::record::Field;
use crate::{file, runner};

#[derive(Parser, Debug)]
#[command(author, version, about = "Pokemon TCG Pocket card table → CSV/TSV", long_about = None)]
pub struct Cli {
    /// Saved card-list page (HTML)
    #[arg(short, long, value_name = "HTML_FILE")]
    pub input: PathBuf,

    /// Output file, or a directory when it ends with a slash
    #[arg(short, long, value_name = "PATH")]
    pub out: Option<String>,

    #[arg(long, value_enum, default_value_t = Format::Csv)]
    pub format: Format,

    /// Leave out the header line
    #[arg(long, default_value_t = false)]
    pub no_headers: bool,

    /// Marker written for absent values
    #[arg(long, value_name = "TEXT", default_value = EMPTY_VALUE)]
    pub empty: String,

    /// CSS selector of the card table
    #[arg(long, value_name = "SELECTOR", default_value = CARD_TABLE_SELECTOR)]
    pub table: String,

    /// Per-card generation/illustrator/weakness, as JSON keyed by card number
    #[arg(long, value_name = "JSON_FILE")]
    pub enrich: Option<PathBuf>,

    /// Print the record for one card (e.g. "A1 007") as JSON and exit
    #[arg(long, value_name = "CARD_ID")]
    pub card: Option<String>,

    /// After exporting, list card ids missing from each known pack
    #[arg(long, default_value_t = false)]
    pub audit: bool,

    /// Worker threads
    #[arg(short, long, default_value_t = WORKERS)]
    pub jobs: usize,

    #[arg(long, value_name = "LEVEL", default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,

    /// Append logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Csv,
    Tsv,
}

impl From<Format> for ExportFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Csv => ExportFormat::Csv,
            Format::Tsv => ExportFormat::Tsv,
        }
    }
}

impl Cli {
    pub fn options(&self) -> std::result::Result<AppOptions, ConfigError> {
        let mut extract = ExtractOptions::with_empty_value(&self.empty)?;
        extract.table_selector = self.table.clone();
        extract.set_workers(self.jobs)?;

        let mut opts = AppOptions { extract, ..AppOptions::default() };
        opts.export.format = self.format.into();
        opts.export.include_headers = !self.no_headers;
        if let Some(out) = &self.out {
            opts.export.set_path(out);
        }
        Ok(opts)
    }
}

/// Progress lines go to the log.
#[derive(Default)]
struct LogProgress {
    failed: usize,
}

impl Progress for LogProgress {
    fn begin(&mut self, total: usize) {
        logf!("extracting {total} rows");
    }
    fn log(&mut self, msg: &str) {
        logf!("{msg}");
    }
    fn item_failed(&mut self, _row: usize, _reason: &str) {
        self.failed += 1;
    }
    fn finish(&mut self) {
        if self.failed > 0 {
            logw!("{} rows could not be read", self.failed);
        }
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let opts = cli.options()?;
    let html = fs::read_to_string(&cli.input)?;

    let enrich: Box<dyn EnrichmentSource> = match &cli.enrich {
        Some(path) => Box::new(StaticEnrichment::from_json(BufReader::new(File::open(path)?))?),
        None => Box::new(NoEnrichment),
    };

    if let Some(id) = &cli.card {
        match runner::find_card(&html, id, &opts.extract, enrich.as_ref())? {
            Some(rec) => println!("{}", serde_json::to_string_pretty(&rec)?),
            None => logw!("no row found for card {id}"),
        }
        return Ok(());
    }

    let mut progress = LogProgress::default();
    let batch = runner::extract_table(&html, &opts.extract, enrich.as_ref(), Some(&mut progress))?;
    let path = file::write_export(&opts.export, &batch.records)?;
    println!("{}", path.display());

    if cli.audit {
        let numbers = batch.records.iter().map(|r| r.get(Field::Number));
        for (prefix, ids) in missing_card_ids(numbers, PACK_MAX_IDS) {
            if ids.is_empty() {
                println!("{prefix}: complete");
            } else {
                println!("{prefix}: {} missing: {}", ids.len(), ids.join(", "));
            }
        }
    }
    Ok(())
}
