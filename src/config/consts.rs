// src/config/consts.rs

// Record
pub const EMPTY_VALUE: &str = "N/A";

// Row layout
pub const MIN_CELLS: usize = 10;
pub const MAX_CELLS: usize = 11;

// Card table on a pack page
pub const CARD_TABLE_SELECTOR: &str = "table.a-table.table--fixed.flexible-cell";

// Export
pub const DEFAULT_OUT_DIR: &str = "data";
pub const DEFAULT_FILE: &str = "full";

// Logging
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Concurrency
pub const WORKERS: usize = 4;
