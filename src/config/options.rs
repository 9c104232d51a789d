// src/config/options.rs
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::consts::*;
use crate::core::sanitize::normalize_ws;
use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppOptions {
    pub extract: ExtractOptions,
    pub export: ExportOptions,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            extract: ExtractOptions::default(),
            export: ExportOptions::default(),
        }
    }
}

/* ---------------- Extraction ---------------- */

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractOptions {
    empty_value: String,
    pub table_selector: String,
    pub workers: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            empty_value: s!(EMPTY_VALUE),
            table_selector: s!(CARD_TABLE_SELECTOR),
            workers: WORKERS,
        }
    }
}

impl ExtractOptions {
    /// Options with a custom empty-value marker.
    /// The marker must be non-empty and already whitespace-normalized,
    /// otherwise normalizing a record twice would not be stable.
    pub fn with_empty_value(empty_value: &str) -> Result<Self, ConfigError> {
        if empty_value.is_empty() {
            return Err(ConfigError::EmptySentinel);
        }
        if normalize_ws(empty_value) != empty_value {
            return Err(ConfigError::SentinelNotNormalized(s!(empty_value)));
        }
        Ok(Self { empty_value: s!(empty_value), ..Self::default() })
    }

    pub fn empty_value(&self) -> &str {
        &self.empty_value
    }

    pub fn set_workers(&mut self, workers: usize) -> Result<(), ConfigError> {
        if workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        self.workers = workers;
        Ok(())
    }
}

/* ---------------- Export ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> char {
        match self { ExportFormat::Csv => ',', ExportFormat::Tsv => '\t' }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    out_path: OutputPath,
    pub include_headers: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            out_path: OutputPath::default(),
            include_headers: true,
        }
    }
}

impl ExportOptions {
    /// Final file path. A user-typed extension is kept; otherwise the format decides.
    pub fn out_path(&self) -> PathBuf {
        let mut path = self.out_path.dir.clone();
        let stem = self.out_path.file_stem.to_string_lossy().into_owned();
        match &self.out_path.ext {
            Some(ext) => path.push(join!(stem, ".", &ext.to_string_lossy())),
            None => path.push(join!(stem, ".", self.format.ext())),
        }
        path
    }

    /// Parse user text into dir + stem (+ explicit extension, if typed).
    /// A trailing separator means "directory, keep the default file name".
    pub fn set_path(&mut self, text: &str) {
        let s = text.trim();
        if s.is_empty() {
            return;
        }
        if s.ends_with('/') || s.ends_with('\\') {
            self.out_path.dir = PathBuf::from(s);
            return;
        }
        let p = Path::new(s);
        if let Some(parent) = p.parent() {
            self.out_path.dir = parent.to_path_buf();
        }
        if let Some(stem) = p.file_stem() {
            self.out_path.file_stem = stem.to_os_string();
        }
        self.out_path.ext = p.extension().map(|e| e.to_os_string());
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct OutputPath {
    dir: PathBuf,
    file_stem: OsString, // without extension
    ext: Option<OsString>,
}

impl Default for OutputPath {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUT_DIR),
            file_stem: OsString::from(DEFAULT_FILE),
            ext: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_follows_format() {
        let mut opts = ExportOptions::default();
        assert!(opts.out_path().to_string_lossy().ends_with("full.csv"));
        opts.format = ExportFormat::Tsv;
        assert!(opts.out_path().to_string_lossy().ends_with("full.tsv"));
    }

    #[test]
    fn typed_extension_survives_format_change() {
        let mut opts = ExportOptions::default();
        opts.set_path("out/cards.txt");
        opts.format = ExportFormat::Tsv;
        assert_eq!(opts.out_path(), PathBuf::from("out").join("cards.txt"));
    }

    #[test]
    fn trailing_separator_means_directory() {
        let mut opts = ExportOptions::default();
        opts.set_path("exports/");
        assert_eq!(opts.out_path(), PathBuf::from("exports/").join("full.csv"));
    }

    #[test]
    fn empty_value_must_be_normalized() {
        assert!(ExtractOptions::with_empty_value("-").is_ok());
        assert_eq!(ExtractOptions::with_empty_value(""), Err(ConfigError::EmptySentinel));
        assert_eq!(
            ExtractOptions::with_empty_value(" n/a "),
            Err(ConfigError::SentinelNotNormalized(s!(" n/a ")))
        );
    }

    #[test]
    fn zero_workers_rejected() {
        let mut opts = ExtractOptions::default();
        assert_eq!(opts.set_workers(0), Err(ConfigError::NoWorkers));
        assert!(opts.set_workers(2).is_ok());
        assert_eq!(opts.workers, 2);
    }
}
