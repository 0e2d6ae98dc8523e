use axum::{extract::Query, extract::State, Extension, Json};
use serde::Deserialize;

use haulfinder_core::LocationType;
use haulfinder_engine::{GeocodeError, SearchError, SearchQuery, SearchResult};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

/// Query parameters of `GET /api/v1/facilities/search`. List-valued
/// params arrive as comma-separated tokens.
#[derive(Debug, Deserialize)]
pub(super) struct SearchParams {
    pub zip_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Radius in miles; defaults to the engine's configured radius.
    pub radius: Option<f64>,
    pub location_types: Option<String>,
    pub debris_types: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

pub(super) async fn search_facilities(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ApiResponse<SearchResult>>, ApiError> {
    let query = build_query(&req_id.0, params)?;

    let result = state
        .search
        .search(&query)
        .await
        .map_err(|e| map_search_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: result,
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// Turn raw HTTP params into a typed engine query. Unsupported
/// location-type tokens are rejected here so the engine only ever sees
/// valid classifications.
fn build_query(request_id: &str, params: SearchParams) -> Result<SearchQuery, ApiError> {
    let location_types = split_tokens(params.location_types.as_deref())
        .into_iter()
        .map(|token| {
            token.parse::<LocationType>().map_err(|_| {
                ApiError::new(
                    request_id,
                    "validation_error",
                    format!("unsupported location type: {token}"),
                )
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SearchQuery {
        zip_code: params.zip_code.filter(|z| !z.trim().is_empty()),
        latitude: params.latitude,
        longitude: params.longitude,
        radius_miles: params.radius,
        location_types,
        debris_types: split_tokens(params.debris_types.as_deref()),
        offset: params.offset.unwrap_or(0),
        limit: params.limit,
        timeout: None,
    })
}

fn split_tokens(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(ToOwned::to_owned)
            .collect()
    })
    .unwrap_or_default()
}

fn map_search_error(request_id: String, error: &SearchError) -> ApiError {
    match error {
        SearchError::InvalidQuery(message) => {
            ApiError::new(request_id, "validation_error", message.clone())
        }
        SearchError::Geocode(GeocodeError::Unresolved { locator }) => {
            tracing::info!(locator, "search location could not be resolved");
            ApiError::new(
                request_id,
                "unresolvable_location",
                "couldn't find that location",
            )
        }
        SearchError::Geocode(e @ GeocodeError::Provider(_)) => {
            tracing::error!(error = %e, "geocoding provider failed");
            ApiError::new(request_id, "internal_error", "geocoding failed")
        }
        SearchError::Timeout => ApiError::new(
            request_id,
            "timeout",
            "search timed out; please try again",
        ),
        SearchError::Catalog(e) => {
            tracing::error!(error = %e, "facility catalog query failed");
            ApiError::new(request_id, "internal_error", "facility lookup failed")
        }
    }
}
