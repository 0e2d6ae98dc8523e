//! Location Search & Ranking Engine for the haulfinder directory.
//!
//! Given a search center (ZIP code or explicit coordinates) and coarse
//! filter criteria, the engine selects matching facilities, computes
//! great-circle distances, ranks deterministically, and produces a
//! bounded, paginated [`SearchResult`]. Geocoding and catalog access sit
//! behind the [`Geocoder`] and [`FacilityCatalog`] traits; the engine
//! owns no persistent state.

mod error;
pub mod geo;
mod query;
pub mod ranking;
mod search;

pub use error::{GeocodeError, SearchError};
pub use query::{
    CandidateFilter, EngineConfig, Locator, RankedFacility, SearchCenter, SearchQuery,
    SearchResult,
};
pub use search::{FacilityCatalog, Geocoder, SearchService};
