use crate::dataset::{CellValue, CleanedDataset, is_value_absent};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeAvailabilityCount {
    pub attribute: String,
    pub count: usize,
}

/// Dataset-wide present-value counts, one row per attribute in column order.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityTable {
    rows: Vec<AttributeAvailabilityCount>,
    index: HashMap<String, usize>,
}

impl AvailabilityTable {
    pub fn rows(&self) -> &[AttributeAvailabilityCount] {
        &self.rows
    }

    pub fn count(&self, attribute: &str) -> Option<usize> {
        self.index.get(attribute).map(|&i| self.rows[i].count)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn count_availability(dataset: &CleanedDataset) -> AvailabilityTable {
    let rows: Vec<AttributeAvailabilityCount> = dataset
        .attributes()
        .iter()
        .enumerate()
        .map(|(i, attribute)| AttributeAvailabilityCount {
            attribute: attribute.clone(),
            count: dataset
                .records()
                .iter()
                .filter(|r| is_counted(&r.values[i]))
                .count(),
        })
        .collect();
    let index = rows
        .iter()
        .enumerate()
        .map(|(i, row)| (row.attribute.clone(), i))
        .collect();

    info!(
        attributes = rows.len(),
        hotels = dataset.total_hotels(),
        "availability counts complete"
    );
    AvailabilityTable { rows, index }
}

// Missing cells never count here, although a single record treats them as present.
fn is_counted(value: &CellValue) -> bool {
    !matches!(value, CellValue::Null) && !is_value_absent(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::dataset::{RawTable, clean};

    fn dataset() -> CleanedDataset {
        let table = RawTable {
            columns: vec![
                "HotelCode".into(),
                "HotelName".into(),
                "Phone".into(),
                "Room_WiFi".into(),
                "Score".into(),
            ],
            rows: vec![
                vec![
                    CellValue::from("HLA01"),
                    CellValue::from("Hilton One"),
                    CellValue::from("+1 555 0101"),
                    CellValue::Bool(true),
                    CellValue::Float(0.5),
                ],
                vec![
                    CellValue::from("HLA02"),
                    CellValue::from("Hilton Two"),
                    CellValue::from("NONE"),
                    CellValue::Bool(false),
                    CellValue::Float(0.5),
                ],
                vec![
                    CellValue::from("HLA03"),
                    CellValue::from("Hilton Three"),
                    CellValue::from("Ext. False"),
                    CellValue::Bool(true),
                    CellValue::Float(0.5),
                ],
                vec![
                    CellValue::from("HLA04"),
                    CellValue::from("Hilton Test"),
                    CellValue::from("+1 555 0404"),
                    CellValue::Bool(true),
                    CellValue::Float(0.5),
                ],
            ],
        };
        clean(table, &Catalog::default(), &[]).unwrap()
    }

    #[test]
    fn counts_present_values_per_attribute() {
        let table = count_availability(&dataset());
        assert_eq!(table.len(), 4);
        assert_eq!(table.count("HotelCode"), Some(3));
        assert_eq!(table.count("HotelName"), Some(3));
        assert_eq!(table.count("Phone"), Some(1));
        assert_eq!(table.count("Room_WiFi"), Some(2));
        assert_eq!(table.count("Score"), None);
    }

    #[test]
    fn rows_follow_column_order() {
        let table = count_availability(&dataset());
        let names: Vec<&str> = table.rows().iter().map(|r| r.attribute.as_str()).collect();
        assert_eq!(names, vec!["HotelCode", "HotelName", "Phone", "Room_WiFi"]);
    }

    #[test]
    fn missing_cells_are_not_counted() {
        let table = RawTable {
            columns: vec![
                "HotelCode".into(),
                "HotelName".into(),
                "Phone".into(),
                "Score".into(),
            ],
            rows: vec![
                vec![
                    CellValue::from("HLA01"),
                    CellValue::from("Hilton One"),
                    CellValue::Null,
                    CellValue::Float(0.5),
                ],
                vec![
                    CellValue::from("HLA02"),
                    CellValue::from("Hilton Two"),
                    CellValue::from("+1"),
                    CellValue::Float(0.5),
                ],
            ],
        };
        let ds = clean(table, &Catalog::default(), &[]).unwrap();
        let counts = count_availability(&ds);
        assert_eq!(counts.count("Phone"), Some(1));
        assert_eq!(counts.count("HotelCode"), Some(2));
    }

    #[test]
    fn empty_dataset_counts_zero() {
        let table = count_availability(&CleanedDataset::default());
        assert!(table.is_empty());
    }
}
