//! Read operations for the facility tables.

use std::collections::HashMap;

use sqlx::PgPool;

use haulfinder_core::Facility;
use haulfinder_engine::CandidateFilter;

use super::types::{DebrisRow, FacilityRow, HoursRow, PaymentRow};
use crate::DbError;

const FACILITY_COLUMNS: &str = "f.id, f.name, f.street, f.city, f.state, f.zip, \
     f.latitude, f.longitude, f.location_type, f.is_active, f.created_at, f.updated_at";

/// Query candidate facilities under the given coarse filter.
///
/// Filtering here is coarse only (active flag, location type, accepted
/// debris); geo filtering and ranking happen in the engine. Rows come
/// back ordered by id for reproducible assembly, but callers must not
/// rely on the order — ranking owns it.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if a query fails, or [`DbError::CorruptRow`]
/// if a stored row violates domain invariants.
pub async fn list_candidates(
    pool: &PgPool,
    filter: &CandidateFilter,
) -> Result<Vec<Facility>, DbError> {
    let location_types: Vec<String> = filter
        .location_types
        .iter()
        .map(|t| t.as_str().to_string())
        .collect();

    let rows: Vec<FacilityRow> = sqlx::query_as::<_, FacilityRow>(&format!(
        "SELECT {FACILITY_COLUMNS} \
         FROM facilities f \
         WHERE ($1 = FALSE OR f.is_active = TRUE) \
           AND (cardinality($2::text[]) = 0 OR f.location_type = ANY($2::text[])) \
           AND (cardinality($3::text[]) = 0 OR EXISTS (\
                 SELECT 1 FROM facility_debris_types fd \
                 WHERE fd.facility_id = f.id \
                   AND fd.debris_type = ANY($3::text[])\
               )) \
         ORDER BY f.id"
    ))
    .bind(filter.active_only)
    .bind(&location_types)
    .bind(&filter.debris_types)
    .fetch_all(pool)
    .await?;

    assemble(pool, rows).await
}

/// Fetch one facility by id, regardless of active flag (the detail view
/// still renders deactivated sites).
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if a query fails, or [`DbError::CorruptRow`]
/// if the stored row violates domain invariants.
pub async fn get_facility(pool: &PgPool, id: &str) -> Result<Option<Facility>, DbError> {
    let row: Option<FacilityRow> = sqlx::query_as::<_, FacilityRow>(&format!(
        "SELECT {FACILITY_COLUMNS} FROM facilities f WHERE f.id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };
    Ok(assemble(pool, vec![row]).await?.into_iter().next())
}

/// Join child rows (debris, payment, hours) onto the facility rows.
async fn assemble(pool: &PgPool, rows: Vec<FacilityRow>) -> Result<Vec<Facility>, DbError> {
    if rows.is_empty() {
        return Ok(vec![]);
    }
    let ids: Vec<String> = rows.iter().map(|r| r.id.clone()).collect();

    let debris: Vec<DebrisRow> = sqlx::query_as::<_, DebrisRow>(
        "SELECT facility_id, debris_type, price_per_ton, price_note \
         FROM facility_debris_types \
         WHERE facility_id = ANY($1::text[]) \
         ORDER BY facility_id, debris_type",
    )
    .bind(&ids)
    .fetch_all(pool)
    .await?;

    let payments: Vec<PaymentRow> = sqlx::query_as::<_, PaymentRow>(
        "SELECT facility_id, payment_type \
         FROM facility_payment_types \
         WHERE facility_id = ANY($1::text[]) \
         ORDER BY facility_id, payment_type",
    )
    .bind(&ids)
    .fetch_all(pool)
    .await?;

    let hours: Vec<HoursRow> = sqlx::query_as::<_, HoursRow>(
        "SELECT facility_id, day_of_week, is_closed, open_time, close_time \
         FROM facility_hours \
         WHERE facility_id = ANY($1::text[]) \
         ORDER BY facility_id, day_of_week",
    )
    .bind(&ids)
    .fetch_all(pool)
    .await?;

    let mut debris_by_id = group_by_facility(debris, |r| r.facility_id.clone());
    let mut payments_by_id = group_by_facility(payments, |r| r.facility_id.clone());
    let mut hours_by_id = group_by_facility(hours, |r| r.facility_id.clone());

    rows.into_iter()
        .map(|row| {
            let id = row.id.clone();
            row.into_domain(
                debris_by_id.remove(&id).unwrap_or_default(),
                payments_by_id.remove(&id).unwrap_or_default(),
                hours_by_id.remove(&id).unwrap_or_default(),
            )
        })
        .collect()
}

fn group_by_facility<T, F: Fn(&T) -> String>(rows: Vec<T>, key: F) -> HashMap<String, Vec<T>> {
    let mut grouped: HashMap<String, Vec<T>> = HashMap::new();
    for row in rows {
        grouped.entry(key(&row)).or_default().push(row);
    }
    grouped
}
