use super::types::{CellValue, HotelRecord};
use crate::catalog::{Catalog, HOTEL_LEVEL_ATTRIBUTES};
use serde::Serialize;

/// Tokens that mark a cell as carrying no usable content. Matched as
/// case-sensitive substrings of the cell's textual form.
const ABSENT_MARKERS: &[&str] = &["False", "NONE"];

pub fn is_value_absent(value: &CellValue) -> bool {
    match value {
        CellValue::Bool(b) => !b,
        other => {
            let text = other.to_string();
            ABSENT_MARKERS.iter().any(|m| text.contains(m))
        }
    }
}

/// Membership in the built-in hotel-level attribute set. Stores built with a
/// custom [`Catalog`] use [`Catalog::is_hotel_level_attribute`] instead.
pub fn is_hotel_level_attribute(name: &str) -> bool {
    HOTEL_LEVEL_ATTRIBUTES.contains(&name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AttributeLevel {
    Hotel,
    Room,
}

impl AttributeLevel {
    pub fn of(name: &str, catalog: &Catalog) -> Self {
        if catalog.is_hotel_level_attribute(name) {
            Self::Hotel
        } else {
            Self::Room
        }
    }
}

impl std::fmt::Display for AttributeLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hotel => write!(f, "Hotel"),
            Self::Room => write!(f, "Room"),
        }
    }
}

/// Attribute names of one record, split by level and presence. Each list
/// keeps column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttributeBuckets {
    pub available_hotel: Vec<String>,
    pub unavailable_hotel: Vec<String>,
    pub available_room: Vec<String>,
    pub unavailable_room: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BucketCounts {
    pub available_hotel: usize,
    pub unavailable_hotel: usize,
    pub available_room: usize,
    pub unavailable_room: usize,
    pub total_present: usize,
    pub total_absent: usize,
}

impl AttributeBuckets {
    pub fn counts(&self) -> BucketCounts {
        let available_hotel = self.available_hotel.len();
        let unavailable_hotel = self.unavailable_hotel.len();
        let available_room = self.available_room.len();
        let unavailable_room = self.unavailable_room.len();
        BucketCounts {
            available_hotel,
            unavailable_hotel,
            available_room,
            unavailable_room,
            total_present: available_hotel + available_room,
            total_absent: unavailable_hotel + unavailable_room,
        }
    }

    fn push(&mut self, name: &str, level: AttributeLevel, present: bool) {
        let bucket = match (level, present) {
            (AttributeLevel::Hotel, true) => &mut self.available_hotel,
            (AttributeLevel::Hotel, false) => &mut self.unavailable_hotel,
            (AttributeLevel::Room, true) => &mut self.available_room,
            (AttributeLevel::Room, false) => &mut self.unavailable_room,
        };
        bucket.push(name.to_string());
    }
}

pub fn classify_record(
    record: &HotelRecord,
    attributes: &[String],
    catalog: &Catalog,
) -> AttributeBuckets {
    let mut buckets = AttributeBuckets::default();
    for (name, value) in attributes.iter().zip(&record.values) {
        buckets.push(name, AttributeLevel::of(name, catalog), !is_value_absent(value));
    }
    buckets
}
