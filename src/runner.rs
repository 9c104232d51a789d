// src/runner.rs
//
// Table → records. Rows are independent, so a batch can be spread over a
// small worker pool; results are put back into table order afterwards.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;

use crate::config::options::ExtractOptions;
use crate::core::html::{parse_table, RawRow};
use crate::enrich::EnrichmentSource;
use crate::error::{Result, StructuralError, TableError};
use crate::progress::Progress;
use crate::record::{CardRecord, Field};
use crate::specs::cards::extract_card;

/// Outcome of one batch.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Batch {
    /// Records in table order.
    pub records: Vec<CardRecord>,
    /// Rows that could not be read: `(row index, reason)`.
    pub skipped: Vec<(usize, StructuralError)>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find(&self, number: &str) -> Option<&CardRecord> {
        self.records.iter().find(|r| r.get(Field::Number) == number)
    }
}

type RowResult = (usize, std::result::Result<CardRecord, StructuralError>);

/// Locate the card table in a page and extract every body row.
pub fn extract_table(
    html: &str,
    opts: &ExtractOptions,
    enrich: &dyn EnrichmentSource,
    progress: Option<&mut dyn Progress>,
) -> std::result::Result<Batch, TableError> {
    let rows = parse_table(html, &opts.table_selector)?;
    logf!("card table: {} rows", rows.len());
    Ok(extract_rows(&rows, opts, enrich, progress))
}

/// Extract a batch of rows. Malformed rows are logged and skipped.
pub fn extract_rows(
    rows: &[RawRow],
    opts: &ExtractOptions,
    enrich: &dyn EnrichmentSource,
    mut progress: Option<&mut dyn Progress>,
) -> Batch {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(rows.len());
    }

    let workers = opts.workers.min(rows.len()).max(1);
    let mut results: Vec<RowResult> = if workers == 1 {
        rows.iter()
            .enumerate()
            .map(|(i, row)| (i, extract_card(row, opts, enrich)))
            .collect()
    } else {
        extract_parallel(rows, opts, enrich, workers)
    };
    results.sort_by_key(|(i, _)| *i);

    let mut batch = Batch::default();
    for (i, result) in results {
        match result {
            Ok(rec) => {
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(i);
                }
                batch.records.push(rec);
            }
            Err(e) => {
                loge!("row {i}: {e}; skipped");
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(i, &e.to_string());
                }
                batch.skipped.push((i, e));
            }
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("{} records, {} rows skipped", batch.records.len(), batch.skipped.len()));
        p.finish();
    }
    logd!("batch: {} records, {} skipped", batch.records.len(), batch.skipped.len());
    batch
}

fn extract_parallel(
    rows: &[RawRow],
    opts: &ExtractOptions,
    enrich: &dyn EnrichmentSource,
    workers: usize,
) -> Vec<RowResult> {
    let counter = AtomicUsize::new(0);
    let (res_tx, res_rx) = mpsc::channel::<RowResult>();

    thread::scope(|scope| {
        for _ in 0..workers {
            let tx = res_tx.clone();
            let counter = &counter;
            scope.spawn(move || loop {
                let i = counter.fetch_add(1, Ordering::Relaxed);
                if i >= rows.len() {
                    break;
                }
                let _ = tx.send((i, extract_card(&rows[i], opts, enrich)));
            });
        }
        drop(res_tx); // main thread is sole receiver now

        res_rx.iter().collect()
    })
}

/// Debug helper: the record for one card number, if the table has it.
pub fn find_card(
    html: &str,
    number: &str,
    opts: &ExtractOptions,
    enrich: &dyn EnrichmentSource,
) -> Result<Option<CardRecord>> {
    let batch = extract_table(html, opts, enrich, None)?;
    Ok(batch.find(number.trim()).cloned())
}
