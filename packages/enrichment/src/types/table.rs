//! In-memory input table.

use indexmap::IndexSet;

use crate::error::{EnrichmentError, Result, SourceError, SourceResult};

/// A table with named columns and string cells.
///
/// Rows shorter than the header are padded with empty cells; longer rows
/// are truncated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table from a header and rows.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// Build a table whose first record is the header.
    pub fn from_records(records: Vec<Vec<String>>) -> SourceResult<Self> {
        let mut records = records.into_iter();
        let columns = records.next().ok_or(SourceError::EmptyTable)?;
        if columns.is_empty() {
            return Err(SourceError::EmptyTable);
        }
        Ok(Self::new(columns, records.collect()))
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First `n` rows, for display.
    pub fn preview(&self, n: usize) -> &[Vec<String>] {
        &self.rows[..n.min(self.rows.len())]
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Values of `column`, missing cells dropped.
    pub fn values(&self, column: &str) -> Result<impl Iterator<Item = &str>> {
        let idx = self
            .column_index(column)
            .ok_or_else(|| EnrichmentError::InvalidColumn {
                column: column.to_string(),
                available: self.columns.clone(),
            })?;

        Ok(self
            .rows
            .iter()
            .map(move |row| row[idx].as_str())
            .filter(|cell| !cell.trim().is_empty()))
    }

    /// Distinct entities in `column`, in order of first appearance.
    pub fn entities(&self, column: &str) -> Result<Vec<String>> {
        let unique: IndexSet<&str> = self.values(column)?.collect();
        Ok(unique.into_iter().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(
            vec!["Company".into(), "City".into()],
            vec![
                vec!["OpenAI".into(), "SF".into()],
                vec!["".into(), "NYC".into()],
                vec!["Anthropic".into()],
                vec!["OpenAI".into(), "Paris".into()],
                vec!["  ".into(), "Oslo".into()],
            ],
        )
    }

    #[test]
    fn test_entities_deduplicated_in_order() {
        let table = sample();
        assert_eq!(table.entities("Company").unwrap(), vec!["OpenAI", "Anthropic"]);
    }

    #[test]
    fn test_short_rows_padded() {
        let table = sample();
        assert_eq!(table.rows()[2], vec!["Anthropic".to_string(), String::new()]);
        assert_eq!(
            table.entities("City").unwrap(),
            vec!["SF", "NYC", "Paris", "Oslo"]
        );
    }

    #[test]
    fn test_unknown_column() {
        let err = sample().entities("Fruit").unwrap_err();
        match err {
            EnrichmentError::InvalidColumn { column, available } => {
                assert_eq!(column, "Fruit");
                assert_eq!(available, vec!["Company", "City"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_records_requires_header() {
        assert!(matches!(
            Table::from_records(vec![]),
            Err(SourceError::EmptyTable)
        ));

        let table = Table::from_records(vec![
            vec!["Fruits".into()],
            vec!["Mango".into()],
        ])
        .unwrap();
        assert_eq!(table.columns(), ["Fruits".to_string()]);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_preview_clamps() {
        let table = sample();
        assert_eq!(table.preview(2).len(), 2);
        assert_eq!(table.preview(50).len(), 5);
    }
}
