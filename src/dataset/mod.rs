// Ingestion side: raw table types, loading, cleaning and attribute classification.

pub mod classify;
pub mod clean;
mod load;
mod types;

pub use classify::{
    AttributeBuckets, AttributeLevel, BucketCounts, classify_record, is_hotel_level_attribute,
    is_value_absent,
};
pub use clean::clean;
pub use load::load_table;
pub use types::{
    CellValue, CleanedDataset, CleaningReport, HOTEL_CODE, HOTEL_NAME, HotelRecord, HotelSummary,
    RawTable,
};
