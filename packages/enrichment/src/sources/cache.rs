//! Memoised input table, keyed by source identity.

use std::future::Future;
use std::sync::Arc;

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::SourceResult;
use crate::types::table::Table;

/// Identity of an input source.
///
/// Two loads with the same id yield the same table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceId {
    /// SHA-256 of the file contents.
    Csv { digest: String },

    /// Google spreadsheet id.
    Sheet { spreadsheet_id: String },
}

impl SourceId {
    pub fn for_csv_bytes(bytes: &[u8]) -> Self {
        let digest = Sha256::digest(bytes);
        SourceId::Csv {
            digest: hex::encode(digest),
        }
    }

    pub fn for_sheet(spreadsheet_id: impl Into<String>) -> Self {
        SourceId::Sheet {
            spreadsheet_id: spreadsheet_id.into(),
        }
    }
}

/// Holds the most recently loaded table until a different source is used.
#[derive(Debug, Default)]
pub struct SourceCache {
    entry: Option<(SourceId, Arc<Table>)>,
}

impl SourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity of the cached table, if any.
    pub fn current_id(&self) -> Option<&SourceId> {
        self.entry.as_ref().map(|(id, _)| id)
    }

    /// Cached table for `id`, if that is what is cached.
    pub fn get(&self, id: &SourceId) -> Option<Arc<Table>> {
        match &self.entry {
            Some((cached, table)) if cached == id => Some(Arc::clone(table)),
            _ => None,
        }
    }

    /// Return the cached table for `id`, or run `load` and cache its result.
    ///
    /// A different id drops the old entry before loading; a failed load
    /// leaves the cache empty.
    pub async fn get_or_load<F, Fut>(&mut self, id: SourceId, load: F) -> SourceResult<Arc<Table>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = SourceResult<Table>>,
    {
        if let Some(table) = self.get(&id) {
            debug!(source = ?id, "Using cached table");
            return Ok(table);
        }

        self.invalidate();
        let table = Arc::new(load().await?);
        debug!(source = ?id, rows = table.len(), "Loaded table");
        self.entry = Some((id, Arc::clone(&table)));
        Ok(table)
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}
