//! Directory state holder
//!
//! The `Directory` owns the current record set and the current filter/sort
//! state. The visible list is always recomputed from those two, so there is
//! no cached view to keep in sync.
//!
//! ## Lifecycle
//!
//! ```ignore
//! let mut directory = Directory::new();          // built-in records
//! directory.load_from(source.as_ref()).await;     // one-shot, never fails
//! directory.set_query("gerente");
//! let visible = directory.visible();
//! ```

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::ImportError;
use crate::merge::merge;
use crate::models::Official;
use crate::query::{self, CategoryFilter, Filter, SortKey};
use crate::seed::seed_records;
use crate::snapshot::{self, records_from_array};
use crate::source::RecordSource;

/// The staff directory with its current filter state
#[derive(Debug, Clone)]
pub struct Directory {
    /// Records the directory starts with
    seed: Vec<Official>,
    /// Current record set
    records: Vec<Official>,
    /// Current filter and sort state
    filter: Filter,
}

impl Default for Directory {
    fn default() -> Self {
        Self::new()
    }
}

impl Directory {
    /// Create a directory holding the built-in records
    pub fn new() -> Self {
        Self::with_seed(seed_records())
    }

    /// Create a directory starting from a specific record set
    pub fn with_seed(seed: Vec<Official>) -> Self {
        Self {
            records: seed.clone(),
            seed,
            filter: Filter::default(),
        }
    }

    /// Current record set, unfiltered
    pub fn records(&self) -> &[Official] {
        &self.records
    }

    /// Current filter state
    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    // ==================== Filter State ====================

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.filter.query = text.into();
    }

    pub fn set_category(&mut self, category: impl Into<CategoryFilter>) {
        self.filter.category = category.into();
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.filter.sort = sort;
    }

    // ==================== Views ====================

    /// Records to display under the current filter state
    pub fn visible(&self) -> Vec<&Official> {
        query::query(&self.records, &self.filter)
    }

    /// Categories available for filtering, sentinel first
    pub fn categories(&self) -> Vec<String> {
        query::categories(&self.records)
    }

    /// Find a record by identity key, or by a unique key prefix
    pub fn find(&self, key: &str) -> Lookup<'_> {
        if let Some(exact) = self.records.iter().find(|o| o.identity_key() == key) {
            return Lookup::Found(exact);
        }

        let matches: Vec<&Official> = self
            .records
            .iter()
            .filter(|o| o.identity_key().starts_with(key))
            .collect();

        match matches.len() {
            0 => Lookup::NotFound,
            1 => Lookup::Found(matches[0]),
            _ => Lookup::Ambiguous(matches),
        }
    }

    // ==================== Record Set ====================

    /// Load the external directory once and merge it in
    ///
    /// The merge runs against the seed followed by the current records.
    /// Any failure (network, status, decode, payload that isn't an array)
    /// leaves the record set untouched. Returns whether the
    /// record set was replaced.
    pub async fn load_from(&mut self, source: &dyn RecordSource) -> bool {
        let location = source.location();
        debug!("Loading directory from {}", location);

        match source.fetch().await {
            Ok(payload) => self.apply_fetched(payload),
            Err(e) => {
                warn!("Could not load directory from {}: {}", location, e);
                false
            }
        }
    }

    /// Merge an already-fetched payload
    ///
    /// Same contract as `load_from` minus the fetch.
    pub fn apply_fetched(&mut self, payload: Value) -> bool {
        let incoming = match records_from_array(payload) {
            Ok(incoming) => incoming,
            Err(e) => {
                warn!("Ignoring external directory: {}", e);
                return false;
            }
        };

        let mut base = self.seed.clone();
        base.extend(self.records.iter().cloned());
        self.records = merge(&base, &incoming);

        info!(
            "Merged {} external record(s); directory now has {}",
            incoming.len(),
            self.records.len()
        );
        true
    }

    /// Replace the whole record set (import)
    ///
    /// No merge and no deduplication. Anything but an array is rejected and
    /// the record set stays as it was; array elements are never rejected.
    pub fn replace_all(&mut self, payload: Value) -> Result<usize, ImportError> {
        let records = records_from_array(payload)?;
        Ok(self.replace_records(records))
    }

    /// Replace the record set from the text of an import file
    pub fn import_str(&mut self, text: &str) -> Result<usize, ImportError> {
        let records = snapshot::parse_records(text)?;
        Ok(self.replace_records(records))
    }

    /// Replace the record set with already-decoded records
    pub fn replace_records(&mut self, records: Vec<Official>) -> usize {
        self.records = records;
        info!("Imported {} record(s)", self.records.len());
        self.records.len()
    }

    /// Current record set as the pretty-printed export document
    pub fn export_snapshot(&self) -> serde_json::Result<String> {
        snapshot::to_pretty_json(&self.records)
    }
}

/// Result of looking a record up by key
#[derive(Debug)]
pub enum Lookup<'a> {
    Found(&'a Official),
    NotFound,
    Ambiguous(Vec<&'a Official>),
}
