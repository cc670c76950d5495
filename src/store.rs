use crate::aggregate::{AvailabilityTable, ChainTable, aggregate_chains, count_availability};
use crate::cache::{MemoMap, MemoSlot};
use crate::catalog::Catalog;
use crate::config::Config;
use crate::dataset::{CleanedDataset, RawTable, clean, load_table};
use crate::error::{NotFound, Result};
use crate::views::{
    ChainSummaryView, ChainView, HotelView, build_chain_summary_view, build_chain_view,
    build_hotel_view,
};
use std::sync::Arc;
use tracing::{debug, info};

/// The cleaned dataset and every table derived from it. Built once at
/// startup and never mutated afterwards.
pub struct DataStore {
    catalog: Catalog,
    dataset: CleanedDataset,
    chains: ChainTable,
    availability: AvailabilityTable,
}

impl DataStore {
    pub fn build(table: RawTable, catalog: Catalog, numeric_columns: &[String]) -> Result<Self> {
        let dataset = clean(table, &catalog, numeric_columns)?;
        let chains = aggregate_chains(dataset.projection());
        let availability = count_availability(&dataset);
        info!(
            hotels = dataset.total_hotels(),
            chains = chains.total_chains(),
            "data store ready"
        );
        Ok(Self {
            catalog,
            dataset,
            chains,
            availability,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn dataset(&self) -> &CleanedDataset {
        &self.dataset
    }

    pub fn chains(&self) -> &ChainTable {
        &self.chains
    }

    pub fn availability(&self) -> &AvailabilityTable {
        &self.availability
    }

    pub fn total_hotels(&self) -> usize {
        self.dataset.total_hotels()
    }

    pub fn total_chains(&self) -> usize {
        self.chains.total_chains()
    }
}

/// Memoized views over a [`DataStore`]: one chain summary, one view per
/// chain code, one per hotel code. Each is built on first request and
/// returned as the same `Arc` for the rest of the process. Lookups for
/// unknown codes return [`NotFound`] and leave the cache untouched.
pub struct ViewCache {
    store: Arc<DataStore>,
    navigation_excerpt: usize,
    summary: MemoSlot<ChainSummaryView>,
    chain_views: MemoMap<String, ChainView>,
    hotel_views: MemoMap<String, HotelView>,
}

impl ViewCache {
    pub fn new(store: impl Into<Arc<DataStore>>, navigation_excerpt: usize) -> Self {
        Self {
            store: store.into(),
            navigation_excerpt,
            summary: MemoSlot::new(),
            chain_views: MemoMap::new(),
            hotel_views: MemoMap::new(),
        }
    }

    /// Load the configured table and build the store behind a fresh cache.
    pub async fn open(config: &Config) -> Result<Self> {
        config.validate()?;
        let table = load_table(&config.data.path).await?;
        let store = DataStore::build(table, config.catalog(), &config.aggregate.numeric_columns)?;
        Ok(Self::new(store, config.views.navigation_excerpt))
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    pub fn chain_summary_view(&self) -> Arc<ChainSummaryView> {
        self.summary.get_or_build(|| {
            debug!("building chain summary view");
            build_chain_summary_view(self.store.chains(), self.store.total_hotels())
        })
    }

    pub fn chain_view(&self, chain_code: &str) -> std::result::Result<Arc<ChainView>, NotFound> {
        if let Some(view) = self.chain_views.get(chain_code) {
            debug!(chain_code, "chain view cache hit");
            return Ok(view);
        }
        let hotels = self
            .store
            .chains()
            .hotels(chain_code)
            .ok_or_else(|| NotFound::chain(chain_code))?;
        Ok(self.chain_views.get_or_build(chain_code, || {
            debug!(chain_code, hotels = hotels.len(), "building chain view");
            build_chain_view(
                chain_code,
                hotels,
                self.store.catalog(),
                self.navigation_excerpt,
            )
        }))
    }

    pub fn hotel_view(&self, hotel_code: &str) -> std::result::Result<Arc<HotelView>, NotFound> {
        if let Some(view) = self.hotel_views.get(hotel_code) {
            debug!(hotel_code, "hotel view cache hit");
            return Ok(view);
        }
        let record = self
            .store
            .dataset()
            .find(hotel_code)
            .ok_or_else(|| NotFound::hotel(hotel_code))?;
        Ok(self.hotel_views.get_or_build(hotel_code, || {
            debug!(hotel_code, "building hotel view");
            let chain_hotel_count = self
                .store
                .chains()
                .hotels(&record.chain_code)
                .map_or(0, |h| h.len());
            build_hotel_view(
                record,
                self.store.dataset().attributes(),
                chain_hotel_count,
                self.store.availability(),
                self.store.catalog(),
            )
        }))
    }

    pub fn total_hotels(&self) -> usize {
        self.store.total_hotels()
    }

    pub fn total_chains(&self) -> usize {
        self.store.total_chains()
    }

    pub fn chain_display_name<'a>(&'a self, chain_code: &'a str) -> &'a str {
        self.store.catalog().chain_display_name(chain_code)
    }

    pub fn chain_code_for_name(&self, chain_name: &str) -> Option<&str> {
        self.store.catalog().chain_code_for_name(chain_name)
    }

    /// Number of chain and hotel views built so far.
    pub fn cached_views(&self) -> (usize, usize) {
        (self.chain_views.len(), self.hotel_views.len())
    }
}
