//! The search orchestrator: resolve a center, pull coarse candidates,
//! rank, assemble the response. One attempt per external call; the
//! per-request deadline covers both calls.

use std::sync::Arc;

use async_trait::async_trait;
use haulfinder_core::{Facility, LatLng};
use tokio::time::{timeout_at, Instant};

use crate::error::{GeocodeError, SearchError};
use crate::query::{
    CandidateFilter, EngineConfig, Locator, RankedFacility, SearchCenter, SearchQuery,
    SearchResult,
};
use crate::{geo, ranking};

/// Resolves a ZIP code or free-text locator to a center point. Retry and
/// caching policy, if any, belong to the implementation, not the engine.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn resolve(&self, locator: &Locator) -> Result<SearchCenter, GeocodeError>;
}

/// Read-only access to the facility catalog, coarse-filtered. Returned
/// order is unspecified; ranking happens downstream.
#[async_trait]
pub trait FacilityCatalog: Send + Sync {
    async fn query_candidates(&self, filter: &CandidateFilter)
        -> anyhow::Result<Vec<Facility>>;
}

/// Stateless per request — a single instance serves concurrent searches
/// with no coordination.
pub struct SearchService {
    geocoder: Arc<dyn Geocoder>,
    catalog: Arc<dyn FacilityCatalog>,
    config: EngineConfig,
}

impl SearchService {
    #[must_use]
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        catalog: Arc<dyn FacilityCatalog>,
        config: EngineConfig,
    ) -> Self {
        Self {
            geocoder,
            catalog,
            config,
        }
    }

    /// Run one search request end to end.
    ///
    /// # Errors
    ///
    /// - [`SearchError::InvalidQuery`] — no usable center, or non-positive
    ///   radius.
    /// - [`SearchError::Geocode`] — the locator could not be resolved.
    /// - [`SearchError::Timeout`] — the deadline elapsed during an
    ///   external call.
    /// - [`SearchError::Catalog`] — catalog failure, passed through.
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResult, SearchError> {
        let radius_miles = query
            .radius_miles
            .unwrap_or(self.config.default_radius_miles);
        let deadline = Instant::now() + query.timeout.unwrap_or(self.config.timeout);

        let center = timeout_at(deadline, self.resolve_center(query))
            .await
            .map_err(|_| SearchError::Timeout)??;

        let filter = CandidateFilter {
            location_types: query.location_types.clone(),
            debris_types: query.debris_types.clone(),
            active_only: true,
        };
        let candidates = timeout_at(deadline, self.catalog.query_candidates(&filter))
            .await
            .map_err(|_| SearchError::Timeout)?
            .map_err(SearchError::Catalog)?;
        tracing::debug!(
            candidates = candidates.len(),
            radius_miles,
            "ranking candidate facilities"
        );

        let center_point = LatLng {
            latitude: center.latitude,
            longitude: center.longitude,
        };
        let ranked = ranking::rank_by_distance(center_point, radius_miles, candidates)?;
        let total_count = ranked.len();

        let window = ranking::page_window(
            total_count,
            query.offset,
            query.limit,
            self.config.max_page_size,
        );
        let locations = ranked
            .into_iter()
            .skip(window.start)
            .take(window.len())
            .map(|r| RankedFacility {
                distance: geo::display_miles(r.distance_miles),
                facility: r.facility,
            })
            .collect();

        Ok(SearchResult {
            locations,
            total_count,
            search_location: center,
        })
    }

    /// Explicit coordinates win over a ZIP code; a lone ZIP goes through
    /// the geocoder; anything else is an invalid query.
    async fn resolve_center(&self, query: &SearchQuery) -> Result<SearchCenter, SearchError> {
        match (query.latitude, query.longitude) {
            (Some(latitude), Some(longitude)) => {
                if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
                    return Err(SearchError::InvalidQuery(format!(
                        "coordinates out of range: ({latitude}, {longitude})"
                    )));
                }
                if query.zip_code.is_some() {
                    tracing::warn!(
                        latitude,
                        longitude,
                        "both zip_code and coordinates supplied; ignoring zip_code"
                    );
                }
                Ok(SearchCenter {
                    latitude,
                    longitude,
                    address: format!("{latitude:.4}, {longitude:.4}"),
                })
            }
            (None, None) => match &query.zip_code {
                Some(zip) => {
                    let locator = Locator::Zip(zip.clone());
                    Ok(self.geocoder.resolve(&locator).await?)
                }
                None => Err(SearchError::InvalidQuery(
                    "a zip_code or a latitude/longitude pair is required".to_string(),
                )),
            },
            _ => Err(SearchError::InvalidQuery(
                "latitude and longitude must be supplied together".to_string(),
            )),
        }
    }
}
