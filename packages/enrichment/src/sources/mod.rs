//! Input table sources.
//!
//! - CSV files ([`delimited`])
//! - Google Sheets through a service account ([`sheets`])
//! - A memo that keeps the loaded table until the source changes ([`cache`])

pub mod cache;
pub mod delimited;
pub mod sheets;

use std::path::PathBuf;
use std::sync::Arc;

pub use cache::{SourceCache, SourceId};
pub use delimited::{read_csv, read_csv_path};
pub use sheets::{spreadsheet_id_from_url, ServiceAccountKey, SheetsClient};

use crate::error::{SourceError, SourceResult};
use crate::types::table::Table;

/// Where the entity table comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSource {
    /// Local CSV file.
    Csv(PathBuf),

    /// Google Sheets URL.
    Sheet(String),
}

impl std::fmt::Display for TableSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableSource::Csv(path) => write!(f, "{}", path.display()),
            TableSource::Sheet(url) => f.write_str(url),
        }
    }
}

/// Loads tables, reusing the last one while the source identity is unchanged.
#[derive(Default)]
pub struct SourceLoader {
    sheets: Option<SheetsClient>,
    cache: SourceCache,
}

impl SourceLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable Google Sheets sources.
    pub fn with_sheets(mut self, client: SheetsClient) -> Self {
        self.sheets = Some(client);
        self
    }

    pub fn cache(&self) -> &SourceCache {
        &self.cache
    }

    /// Load `source`, or return the cached table if it has not changed.
    ///
    /// CSV identity is the file content, so an edited file is re-read.
    pub async fn load(&mut self, source: &TableSource) -> SourceResult<Arc<Table>> {
        match source {
            TableSource::Csv(path) => {
                let bytes = std::fs::read(path)?;
                let id = SourceId::for_csv_bytes(&bytes);
                self.cache
                    .get_or_load(id, || async move { read_csv(bytes.as_slice()) })
                    .await
            }
            TableSource::Sheet(url) => {
                let spreadsheet_id = spreadsheet_id_from_url(url)?;
                let sheets = self.sheets.as_ref().ok_or_else(|| {
                    SourceError::Credentials(
                        "Google Sheets credentials not configured".to_string(),
                    )
                })?;
                self.cache
                    .get_or_load(SourceId::for_sheet(spreadsheet_id.clone()), || async move {
                        sheets.fetch_table_by_id(&spreadsheet_id).await
                    })
                    .await
            }
        }
    }

    /// Forget the cached table.
    pub fn invalidate(&mut self) {
        self.cache.invalidate();
    }
}
