// src/enrich.rs
//
// Per-card supplementary data (generation, illustrator, weakness) that lives
// on each card's own page. Fetching it is somebody else's job; by the time a
// row is parsed the answer is already resolved, possibly empty.

use std::collections::HashMap;
use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::record::{CardRecord, Field};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Enrichment {
    pub generation: Option<String>,
    pub illustrator: Option<String>,
    pub weakness: Option<String>,
}

impl Enrichment {
    pub fn is_empty(&self) -> bool {
        self.generation.is_none() && self.illustrator.is_none() && self.weakness.is_none()
    }

    pub(crate) fn apply(self, rec: &mut CardRecord) {
        rec.fill(Field::Generation, self.generation);
        rec.fill(Field::Illustrator, self.illustrator);
        rec.fill(Field::Weakness, self.weakness);
    }
}

/// Anything that can answer "what else do we know about this card".
/// A failed lookup is just an empty `Enrichment`.
pub trait EnrichmentSource: Send + Sync {
    fn lookup(&self, number: &str, url: &str) -> Enrichment;
}

/// Always empty.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoEnrichment;

impl EnrichmentSource for NoEnrichment {
    fn lookup(&self, _number: &str, _url: &str) -> Enrichment {
        Enrichment::default()
    }
}

impl<F> EnrichmentSource for F
where
    F: Fn(&str, &str) -> Enrichment + Send + Sync,
{
    fn lookup(&self, number: &str, url: &str) -> Enrichment {
        self(number, url)
    }
}

/// In-memory answers keyed by card number, e.g. loaded from a JSON file
/// written by whatever crawled the detail pages:
///
/// ```json
/// { "A1 001": { "generation": "1", "illustrator": "Narumi Sato", "weakness": "Fire" } }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StaticEnrichment {
    by_number: HashMap<String, Enrichment>,
}

impl StaticEnrichment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, number: &str, data: Enrichment) {
        self.by_number.insert(s!(number), data);
    }

    pub fn len(&self) -> usize {
        self.by_number.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_number.is_empty()
    }

    pub fn from_json<R: Read>(reader: R) -> Result<Self> {
        let by_number: HashMap<String, Enrichment> = serde_json::from_reader(reader)?;
        logd!("enrichment: {} cards loaded", by_number.len());
        Ok(Self { by_number })
    }
}

impl EnrichmentSource for StaticEnrichment {
    fn lookup(&self, number: &str, _url: &str) -> Enrichment {
        self.by_number.get(number).cloned().unwrap_or_default()
    }
}
