use axum::{
    extract::{Path, State},
    Extension, Json,
};

use haulfinder_core::Facility;

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

/// `GET /api/v1/facilities/{id}` — directory detail view. Deactivated
/// facilities still resolve here; they are only hidden from search.
pub(super) async fn get_facility(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Facility>>, ApiError> {
    let facility = haulfinder_db::get_facility(&state.pool, &id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?
        .ok_or_else(|| ApiError::new(req_id.0.clone(), "not_found", "unknown facility"))?;

    Ok(Json(ApiResponse {
        data: facility,
        meta: ResponseMeta::new(req_id.0),
    }))
}
