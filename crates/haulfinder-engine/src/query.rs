//! Request and response types for one search cycle. All of these are
//! transient — created per request, dropped with the response.

use std::time::Duration;

use haulfinder_core::{Facility, LocationType};
use serde::Serialize;

/// What the caller gave us to resolve a center point from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    Zip(String),
    FreeText(String),
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Locator::Zip(zip) => write!(f, "zip:{zip}"),
            Locator::FreeText(text) => write!(f, "{text}"),
        }
    }
}

/// The resolved point a search is measured from, plus a human-readable
/// address for map display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchCenter {
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
}

/// One search request. Exactly one center-resolution path must succeed:
/// explicit coordinates if present (the ZIP is then ignored with a
/// warning), otherwise the ZIP goes through the geocoder.
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    pub zip_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Defaults to [`EngineConfig::default_radius_miles`] when absent.
    pub radius_miles: Option<f64>,
    /// Empty means "any type".
    pub location_types: Vec<LocationType>,
    /// Debris type ids the facility must accept. Empty means "any".
    pub debris_types: Vec<String>,
    pub offset: usize,
    /// Clamped to [`EngineConfig::max_page_size`]; never rejected.
    pub limit: Option<usize>,
    /// Per-request deadline override; defaults to [`EngineConfig::timeout`].
    pub timeout: Option<Duration>,
}

/// Coarse filter handed to the catalog. Fine-grained geo filtering is the
/// ranking core's job, not the catalog's.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateFilter {
    pub location_types: Vec<LocationType>,
    pub debris_types: Vec<String>,
    pub active_only: bool,
}

/// A facility annotated with its display distance (miles, one decimal)
/// from the search center.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedFacility {
    #[serde(flatten)]
    pub facility: Facility,
    pub distance: f64,
}

/// The response envelope the orchestrator assembles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub locations: Vec<RankedFacility>,
    /// Matching count before the page window was applied.
    pub total_count: usize,
    pub search_location: SearchCenter,
}

/// Engine tunables, passed explicitly at construction — never read from
/// ambient global state.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub default_radius_miles: f64,
    pub max_page_size: usize,
    pub timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_radius_miles: 50.0,
            max_page_size: 50,
            timeout: Duration::from_secs(10),
        }
    }
}
