use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const HOTEL_CODE: &str = "HotelCode";
pub const HOTEL_NAME: &str = "HotelName";

/// One raw table cell as it arrives from the ingestion layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(n) => Some(*n as f64),
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(true) => write!(f, "True"),
            Self::Bool(false) => write!(f, "False"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

/// Materialized source table. Every column but the last is an attribute;
/// the last one holds the score fraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTable {
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<CellValue>>,
}

/// A hotel after cleaning, with its derived chain fields and navigation keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotelRecord {
    pub hotel_code: String,
    pub hotel_name: String,
    pub chain_code: String,
    pub chain_name: String,
    pub score: u8,
    pub chain_url: String,
    pub hotel_url: String,
    /// Aligned with the dataset's attribute list.
    pub values: Vec<CellValue>,
}

/// Reduced projection row: identity and aggregation columns only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotelSummary {
    pub hotel_code: String,
    pub hotel_name: String,
    pub chain_code: String,
    pub chain_name: String,
    pub score: u8,
    pub chain_url: String,
    pub hotel_url: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub numeric: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleaningReport {
    pub rows_read: usize,
    /// Rows whose hotel name is missing or not text.
    pub unnamed_dropped: usize,
    pub test_entries_dropped: usize,
    pub duplicates_dropped: usize,
}

/// Output of the cleaning pipeline. Records and projection are sorted by
/// hotel code and share indices.
#[derive(Debug, Clone, Default)]
pub struct CleanedDataset {
    pub(crate) attributes: Vec<String>,
    pub(crate) records: Vec<HotelRecord>,
    pub(crate) projection: Vec<HotelSummary>,
    pub(crate) report: CleaningReport,
}

impl CleanedDataset {
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn records(&self) -> &[HotelRecord] {
        &self.records
    }

    pub fn projection(&self) -> &[HotelSummary] {
        &self.projection
    }

    pub fn report(&self) -> CleaningReport {
        self.report
    }

    pub fn total_hotels(&self) -> usize {
        self.records.len()
    }

    pub fn find(&self, hotel_code: &str) -> Option<&HotelRecord> {
        self.records
            .binary_search_by(|r| r.hotel_code.as_str().cmp(hotel_code))
            .ok()
            .map(|i| &self.records[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_deserialize_by_shape() {
        let cells: Vec<CellValue> =
            serde_json::from_str(r#"[null, false, 42, 0.5, "NONE"]"#).unwrap();
        assert_eq!(
            cells,
            vec![
                CellValue::Null,
                CellValue::Bool(false),
                CellValue::Integer(42),
                CellValue::Float(0.5),
                CellValue::Text("NONE".into()),
            ]
        );
    }

    #[test]
    fn textual_form() {
        assert_eq!(CellValue::Bool(false).to_string(), "False");
        assert_eq!(CellValue::Null.to_string(), "");
        assert_eq!(CellValue::Integer(7).to_string(), "7");
        assert_eq!(CellValue::from("x").to_string(), "x");
    }

    #[test]
    fn numeric_view() {
        assert_eq!(CellValue::Integer(3).as_f64(), Some(3.0));
        assert_eq!(CellValue::Float(0.25).as_f64(), Some(0.25));
        assert_eq!(CellValue::Bool(true).as_f64(), None);
        assert_eq!(CellValue::from("3").as_f64(), None);
    }
}
