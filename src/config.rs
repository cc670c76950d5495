use crate::catalog::{
    Catalog, DEFAULT_CHAIN_NAMES, DEFAULT_CHAIN_URL_BASE, DEFAULT_HOTEL_URL_BASE,
    HOTEL_LEVEL_ATTRIBUTES,
};
use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub views: ViewsConfig,
    #[serde(default)]
    pub aggregate: AggregateConfig,
}

#[derive(Debug, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
        }
    }
}

/// Overrides for the built-in lookup tables.
#[derive(Debug, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_chain_url_base")]
    pub chain_url_base: String,
    #[serde(default = "default_hotel_url_base")]
    pub hotel_url_base: String,
    /// Merged over the built-in chain map.
    #[serde(default)]
    pub chain_names: BTreeMap<String, String>,
    /// Replaces the built-in hotel-level attribute set when present.
    #[serde(default)]
    pub hotel_attributes: Option<Vec<String>>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            chain_url_base: default_chain_url_base(),
            hotel_url_base: default_hotel_url_base(),
            chain_names: BTreeMap::new(),
            hotel_attributes: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ViewsConfig {
    /// Hotels listed from each end of a chain's score ranking.
    #[serde(default = "default_navigation_excerpt")]
    pub navigation_excerpt: usize,
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            navigation_excerpt: default_navigation_excerpt(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct AggregateConfig {
    /// Extra numeric columns averaged per chain alongside the score.
    #[serde(default)]
    pub numeric_columns: Vec<String>,
}

// Defaults
fn default_data_path() -> PathBuf {
    std::env::var("HOTEL_RANK_DATA")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data/hotels.json"))
}
fn default_chain_url_base() -> String {
    DEFAULT_CHAIN_URL_BASE.into()
}
fn default_hotel_url_base() -> String {
    DEFAULT_HOTEL_URL_BASE.into()
}
fn default_navigation_excerpt() -> usize {
    10
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read config {}: {e}", path.display())))?;
        toml::from_str(&content).map_err(|e| Error::config(format!("Failed to parse config: {e}")))
    }

    pub fn validate(&self) -> Result<()> {
        if self.data.path.as_os_str().is_empty() {
            return Err(Error::config(
                "data.path is empty. Set it in the config or export HOTEL_RANK_DATA",
            ));
        }
        if self.catalog.chain_url_base.is_empty() || self.catalog.hotel_url_base.is_empty() {
            return Err(Error::config("catalog URL bases must not be empty"));
        }
        if self.views.navigation_excerpt == 0 {
            return Err(Error::config("views.navigation_excerpt must be at least 1"));
        }
        Ok(())
    }

    /// Lookup tables with this config's overrides applied.
    pub fn catalog(&self) -> Catalog {
        let hotel_attributes: Vec<String> = match &self.catalog.hotel_attributes {
            Some(attrs) => attrs.clone(),
            None => HOTEL_LEVEL_ATTRIBUTES.iter().map(|a| a.to_string()).collect(),
        };
        Catalog::new(
            DEFAULT_CHAIN_NAMES
                .iter()
                .map(|(code, name)| (code.to_string(), name.to_string())),
            hotel_attributes,
            &self.catalog.chain_url_base,
            &self.catalog.hotel_url_base,
        )
        .with_chain_names(self.catalog.chain_names.clone())
    }
}
