use std::collections::{BTreeMap, BTreeSet};

pub const DEFAULT_CHAIN_URL_BASE: &str = "/chain?ChainCode=";
pub const DEFAULT_HOTEL_URL_BASE: &str = "/hotel?HotelCode=";

/// Built-in chain code → display name map.
pub const DEFAULT_CHAIN_NAMES: &[(&str, &str)] = &[
    ("BY", "Banyan Tree"),
    ("CP", "Crowne Plaza"),
    ("DT", "DoubleTree"),
    ("FN", "Fairfield Inn"),
    ("FR", "RocketFuel"),
    ("HL", "Hilton"),
    ("HI", "Holiday Inn"),
    ("IC", "Intercontinental"),
    ("LR", "The Leela Palace"),
    ("LW", "The Leading Hotels of the World"),
    ("MC", "Marriott"),
    ("MK", "Movenpick"),
    ("MN", "Montage"),
    ("MV", "MGM"),
    ("NH", "NH Hotel group"),
    ("ON", "One and Only Hotels"),
    ("PI", "Premier Inn"),
    ("PK", "Park Plaza"),
    ("PU", "Pullman"),
    ("RD", "Radisson Blu"),
    ("RX", "Rixos"),
    ("RT", "Accor"),
    ("SB", "Sofitel"),
    ("SH", "Scandic"),
    ("SI", "Sheraton"),
];

/// Attribute names describing the property itself. Anything else is a room
/// attribute. `Dinning` is spelled the way the source tables spell it.
pub const HOTEL_LEVEL_ATTRIBUTES: &[&str] = &[
    "HotelCode",
    "HotelName",
    "SegmentCategory",
    "Services",
    "AcceptedPayments",
    "CheckInTime",
    "CheckOutTime",
    "RefPoint",
    "Phone",
    "PolicyInfo",
    "PenaltyDescription",
    "TaxPolicies",
    "CommissionPolicy",
    "Dinning",
    "MeetingRooms",
    "LanguageSpoken",
];

/// Immutable lookup configuration handed to the cleaner and the views.
#[derive(Debug, Clone)]
pub struct Catalog {
    chain_names: BTreeMap<String, String>,
    name_to_chain: BTreeMap<String, String>,
    hotel_attributes: BTreeSet<String>,
    chain_url_base: String,
    hotel_url_base: String,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(
            DEFAULT_CHAIN_NAMES
                .iter()
                .map(|(code, name)| (code.to_string(), name.to_string())),
            HOTEL_LEVEL_ATTRIBUTES.iter().map(|a| a.to_string()),
            DEFAULT_CHAIN_URL_BASE,
            DEFAULT_HOTEL_URL_BASE,
        )
    }
}

impl Catalog {
    pub fn new(
        chain_names: impl IntoIterator<Item = (String, String)>,
        hotel_attributes: impl IntoIterator<Item = String>,
        chain_url_base: impl Into<String>,
        hotel_url_base: impl Into<String>,
    ) -> Self {
        let chain_names: BTreeMap<String, String> = chain_names.into_iter().collect();
        let name_to_chain = reverse(&chain_names);
        Self {
            chain_names,
            name_to_chain,
            hotel_attributes: hotel_attributes.into_iter().collect(),
            chain_url_base: chain_url_base.into(),
            hotel_url_base: hotel_url_base.into(),
        }
    }

    /// Merge extra chain names over the current map. Later entries win.
    pub fn with_chain_names(mut self, extra: impl IntoIterator<Item = (String, String)>) -> Self {
        self.chain_names.extend(extra);
        self.name_to_chain = reverse(&self.chain_names);
        self
    }

    /// Display name for a chain code, or the code itself when unmapped.
    pub fn chain_display_name<'a>(&'a self, chain_code: &'a str) -> &'a str {
        self.chain_names
            .get(chain_code)
            .map(String::as_str)
            .unwrap_or(chain_code)
    }

    pub fn chain_code_for_name(&self, chain_name: &str) -> Option<&str> {
        self.name_to_chain.get(chain_name).map(String::as_str)
    }

    pub fn is_hotel_level_attribute(&self, name: &str) -> bool {
        self.hotel_attributes.contains(name)
    }

    pub fn chain_url(&self, chain_code: &str) -> String {
        format!("{}{chain_code}", self.chain_url_base)
    }

    pub fn hotel_url(&self, hotel_code: &str) -> String {
        format!("{}{hotel_code}", self.hotel_url_base)
    }
}

fn reverse(map: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    map.iter().map(|(k, v)| (v.clone(), k.clone())).collect()
}
