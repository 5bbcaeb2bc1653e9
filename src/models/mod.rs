use serde::Deserialize;

/// Number of stations a search asks the directory for.
pub const SEARCH_LIMIT: u32 = 10;

#[derive(Clone, Deserialize, Debug, PartialEq, Eq)]
pub struct Station {
    #[serde(rename = "stationuuid")]
    pub uuid: String,
    pub name: String,
    // Missing on some directory records, so it can't be trusted before play.
    #[serde(default)]
    pub url_resolved: String,
    pub country: String,
    pub language: String,
    pub clickcount: u32,
    pub votes: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchQuery {
    pub name: Option<String>,
    pub country_code: Option<String>,
    pub limit: u32,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            name: None,
            country_code: None,
            limit: SEARCH_LIMIT,
        }
    }
}
