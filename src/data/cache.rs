use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;

use super::loader::DatasetSource;
use super::model::{Instrument, SessionTable};

/// Loaded tables keyed by instrument, kept until the next login.
#[derive(Debug, Default)]
pub struct DatasetCache {
    tables: HashMap<Instrument, Arc<SessionTable>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached table, or fetch it from `source` and remember it.
    /// A failed fetch leaves the cache unchanged.
    pub fn get_or_load(
        &mut self,
        instrument: Instrument,
        source: &dyn DatasetSource,
    ) -> Result<Arc<SessionTable>> {
        if let Some(table) = self.tables.get(&instrument) {
            return Ok(Arc::clone(table));
        }

        log::info!("Loading {instrument} from {}", source.location(instrument));
        let table = Arc::new(source.fetch(instrument)?);
        log::info!(
            "Loaded {} sessions for {instrument} with columns {:?}",
            table.len(),
            table.columns
        );
        self.tables.insert(instrument, Arc::clone(&table));
        Ok(table)
    }

    #[cfg(test)]
    fn contains(&self, instrument: Instrument) -> bool {
        self.tables.contains_key(&instrument)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn clear(&mut self) {
        if !self.tables.is_empty() {
            log::info!("Clearing {} cached dataset(s)", self.len());
        }
        self.tables.clear();
    }
}
