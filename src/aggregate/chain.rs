use crate::dataset::HotelSummary;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainSummary {
    pub chain_code: String,
    pub chain_name: String,
    pub chain_url: String,
    pub hotel_count: usize,
    pub mean_score: f64,
    /// Means of the extra numeric projection columns. A column with no
    /// numeric cell in this chain has no entry.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attribute_means: BTreeMap<String, f64>,
}

/// Chain-level aggregates plus each chain's slice of the projection.
#[derive(Debug, Clone, Default)]
pub struct ChainTable {
    summaries: Vec<ChainSummary>,
    per_chain: BTreeMap<String, Arc<[HotelSummary]>>,
}

impl ChainTable {
    /// One row per chain, ordered by chain code.
    pub fn summaries(&self) -> &[ChainSummary] {
        &self.summaries
    }

    pub fn total_chains(&self) -> usize {
        self.summaries.len()
    }

    pub fn total_hotels(&self) -> usize {
        self.summaries.iter().map(|s| s.hotel_count).sum()
    }

    /// Hotels of one chain in hotel-code order.
    pub fn hotels(&self, chain_code: &str) -> Option<&Arc<[HotelSummary]>> {
        self.per_chain.get(chain_code)
    }

    pub fn contains(&self, chain_code: &str) -> bool {
        self.per_chain.contains_key(chain_code)
    }
}

type GroupKey<'a> = (&'a str, &'a str, &'a str);

/// Group the projection by `(chain_code, chain_name, chain_url)`.
pub fn aggregate(projection: &[HotelSummary]) -> ChainTable {
    let mut groups: BTreeMap<GroupKey<'_>, Vec<&HotelSummary>> = BTreeMap::new();
    for hotel in projection {
        groups
            .entry((
                hotel.chain_code.as_str(),
                hotel.chain_name.as_str(),
                hotel.chain_url.as_str(),
            ))
            .or_default()
            .push(hotel);
    }

    let summaries: Vec<ChainSummary> = groups
        .iter()
        .map(|(&(code, name, url), members)| summarize(code, name, url, members))
        .collect();

    let mut per_chain: BTreeMap<String, Vec<HotelSummary>> = BTreeMap::new();
    for hotel in projection {
        per_chain
            .entry(hotel.chain_code.clone())
            .or_default()
            .push(hotel.clone());
    }
    let per_chain = per_chain
        .into_iter()
        .map(|(code, hotels)| (code, Arc::from(hotels)))
        .collect();

    info!(
        chains = summaries.len(),
        hotels = projection.len(),
        "chain aggregation complete"
    );

    ChainTable {
        summaries,
        per_chain,
    }
}

fn summarize(code: &str, name: &str, url: &str, members: &[&HotelSummary]) -> ChainSummary {
    // group-by never yields an empty group
    let hotel_count = members.len();
    let mean_score =
        members.iter().map(|h| f64::from(h.score)).sum::<f64>() / hotel_count as f64;

    let mut sums: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for hotel in members {
        for (column, value) in &hotel.numeric {
            let entry = sums.entry(column).or_insert((0.0, 0));
            entry.0 += value;
            entry.1 += 1;
        }
    }
    let attribute_means = sums
        .into_iter()
        .map(|(column, (total, n))| (column.to_string(), total / n as f64))
        .collect();

    ChainSummary {
        chain_code: code.to_string(),
        chain_name: name.to_string(),
        chain_url: url.to_string(),
        hotel_count,
        mean_score,
        attribute_means,
    }
}
