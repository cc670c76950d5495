use crate::aggregate::{AvailabilityTable, ChainSummary, ChainTable};
use crate::catalog::Catalog;
use crate::dataset::{
    AttributeBuckets, AttributeLevel, BucketCounts, HotelRecord, HotelSummary, classify_record,
    is_value_absent,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One dropdown entry: what to show and which view it leads to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    pub label: String,
    pub target: String,
}

/// Landing page: every chain with its size and mean score.
#[derive(Debug, Clone, Serialize)]
pub struct ChainSummaryView {
    pub total_hotels: usize,
    pub total_chains: usize,
    /// Sorted by chain name.
    pub navigation: Vec<NavEntry>,
    /// Sorted by mean score, lowest first.
    pub chains_by_score: Vec<ChainSummary>,
    pub built_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChainView {
    pub chain_code: String,
    pub chain_name: String,
    pub hotel_count: usize,
    /// Sorted by score, lowest first.
    pub hotels_by_score: Vec<HotelSummary>,
    /// Highest-scoring hotels, then the lowest-scoring ones.
    pub navigation: Vec<NavEntry>,
    pub built_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeContext {
    pub attribute: String,
    pub level: AttributeLevel,
    pub present: bool,
    /// Hotels in the whole dataset with this attribute present.
    pub hotels_with_attribute: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct HotelView {
    pub hotel_code: String,
    pub hotel_name: String,
    pub chain_code: String,
    pub chain_name: String,
    pub score: u8,
    /// Listed properties in this hotel's chain.
    pub chain_hotel_count: usize,
    pub buckets: AttributeBuckets,
    pub counts: BucketCounts,
    pub attributes: Vec<AttributeContext>,
    pub built_at: DateTime<Utc>,
}

pub fn build_chain_summary_view(chains: &ChainTable, total_hotels: usize) -> ChainSummaryView {
    let mut by_name: Vec<&ChainSummary> = chains.summaries().iter().collect();
    by_name.sort_by(|a, b| a.chain_name.cmp(&b.chain_name));
    let navigation = by_name
        .into_iter()
        .map(|c| NavEntry {
            label: c.chain_name.clone(),
            target: c.chain_url.clone(),
        })
        .collect();

    let mut chains_by_score = chains.summaries().to_vec();
    chains_by_score.sort_by(|a, b| a.mean_score.total_cmp(&b.mean_score));

    ChainSummaryView {
        total_hotels,
        total_chains: chains.total_chains(),
        navigation,
        chains_by_score,
        built_at: Utc::now(),
    }
}

/// `hotels` is the chain's slice of the projection; `excerpt` caps each end
/// of the navigation list.
pub fn build_chain_view(
    chain_code: &str,
    hotels: &[HotelSummary],
    catalog: &Catalog,
    excerpt: usize,
) -> ChainView {
    let mut hotels_by_score = hotels.to_vec();
    hotels_by_score.sort_by_key(|h| h.score);

    ChainView {
        chain_code: chain_code.to_string(),
        chain_name: catalog.chain_display_name(chain_code).to_string(),
        hotel_count: hotels_by_score.len(),
        navigation: navigation_excerpt(&hotels_by_score, excerpt),
        hotels_by_score,
        built_at: Utc::now(),
    }
}

/// Last `n` of the ascending list followed by the first `n`. A chain with
/// fewer than `2n` hotels lists some of them twice.
fn navigation_excerpt(sorted: &[HotelSummary], n: usize) -> Vec<NavEntry> {
    let top = &sorted[sorted.len().saturating_sub(n)..];
    let bottom = &sorted[..n.min(sorted.len())];

    top.iter()
        .chain(bottom)
        .map(|h| NavEntry {
            label: h.hotel_name.clone(),
            target: h.hotel_url.clone(),
        })
        .collect()
}

pub fn build_hotel_view(
    record: &HotelRecord,
    attributes: &[String],
    chain_hotel_count: usize,
    availability: &AvailabilityTable,
    catalog: &Catalog,
) -> HotelView {
    let buckets = classify_record(record, attributes, catalog);
    let counts = buckets.counts();
    let attributes = attributes
        .iter()
        .zip(&record.values)
        .map(|(name, value)| AttributeContext {
            attribute: name.clone(),
            level: AttributeLevel::of(name, catalog),
            present: !is_value_absent(value),
            hotels_with_attribute: availability.count(name).unwrap_or(0),
        })
        .collect();

    HotelView {
        hotel_code: record.hotel_code.clone(),
        hotel_name: record.hotel_name.clone(),
        chain_code: record.chain_code.clone(),
        chain_name: record.chain_name.clone(),
        score: record.score,
        chain_hotel_count,
        buckets,
        counts,
        attributes,
        built_at: Utc::now(),
    }
}
