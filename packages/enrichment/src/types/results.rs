//! Result table and run report.

use std::io;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::outcome::ExtractionOutcome;

/// Header of the entity column in exported tables.
pub const ENTITY_COLUMN: &str = "Entity";

/// Header of the value column in exported tables.
pub const EXTRACTED_COLUMN: &str = "Extracted Information";

/// Default file name for downloads.
pub const DEFAULT_OUTPUT_FILE: &str = "extracted_information.csv";

/// Ordered entity → outcome table. Insertion order is processing order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultTable {
    rows: IndexMap<String, ExtractionOutcome>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row. An entity already present keeps its original position
    /// and first outcome; returns `false` in that case.
    pub fn insert(&mut self, entity: impl Into<String>, outcome: ExtractionOutcome) -> bool {
        match self.rows.entry(entity.into()) {
            indexmap::map::Entry::Occupied(_) => false,
            indexmap::map::Entry::Vacant(slot) => {
                slot.insert(outcome);
                true
            }
        }
    }

    pub fn get(&self, entity: &str) -> Option<&ExtractionOutcome> {
        self.rows.get(entity)
    }

    pub fn contains(&self, entity: &str) -> bool {
        self.rows.contains_key(entity)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in processing order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExtractionOutcome)> {
        self.rows.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Entities in processing order.
    pub fn entities(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    pub fn extracted_count(&self) -> usize {
        self.rows.values().filter(|o| o.is_extracted()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.len() - self.extracted_count()
    }

    /// Write the table as CSV with an `Entity,Extracted Information` header.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record([ENTITY_COLUMN, EXTRACTED_COLUMN])?;
        for (entity, outcome) in self.iter() {
            csv_writer.write_record([entity, outcome.render().as_str()])?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// CSV rendering as a string.
    pub fn to_csv_string(&self) -> Result<String, csv::Error> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        String::from_utf8(buf).map_err(|e| {
            csv::Error::from(io::Error::new(io::ErrorKind::InvalidData, e))
        })
    }

    /// Write the CSV to `path`, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), csv::Error> {
        let file = std::fs::File::create(path)?;
        self.write_csv(io::BufWriter::new(file))
    }
}

impl<'a> IntoIterator for &'a ResultTable {
    type Item = (&'a String, &'a ExtractionOutcome);
    type IntoIter = indexmap::map::Iter<'a, String, ExtractionOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Why an entity produced no row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    /// Search succeeded but yielded no usable snippet.
    NoSnippet,

    /// Search call failed (non-2xx or transport).
    SearchFailed(String),
}

/// An entity that was dropped from the result table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedEntity {
    pub entity: String,
    pub reason: SkipReason,
}

/// Everything a run produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// One row per entity that reached extraction.
    pub results: ResultTable,

    /// Entities dropped after search, in processing order.
    pub skipped: Vec<SkippedEntity>,
}

impl RunReport {
    /// Number of entities processed.
    pub fn processed(&self) -> usize {
        self.results.len() + self.skipped.len()
    }
}
