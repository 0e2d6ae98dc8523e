//! Provider response payloads.

use serde::Deserialize;

/// Zippopotam-format ZIP lookup response. Coordinates arrive as strings.
#[derive(Debug, Deserialize)]
pub(crate) struct ZipLookupResponse {
    #[serde(rename = "post code")]
    pub post_code: String,
    pub places: Vec<ZipPlace>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ZipPlace {
    #[serde(rename = "place name")]
    pub place_name: String,
    #[serde(rename = "state abbreviation")]
    pub state_abbreviation: String,
    pub latitude: String,
    pub longitude: String,
}

/// One row of a Nominatim-format `/search` response.
#[derive(Debug, Deserialize)]
pub(crate) struct PlaceSearchResult {
    pub lat: String,
    pub lon: String,
    pub display_name: String,
}
