//! Write operations for the facility tables. Facility records are owned
//! by the directory's ingestion/moderation side; the search engine only
//! ever reads them.

use sqlx::PgPool;

use haulfinder_core::Facility;

/// Insert a facility and its child rows in one transaction.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if any statement fails; nothing is written in
/// that case.
pub async fn insert_facility(pool: &PgPool, facility: &Facility) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO facilities \
             (id, name, street, city, state, zip, latitude, longitude, location_type, is_active) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
    )
    .bind(&facility.id)
    .bind(&facility.name)
    .bind(&facility.address.street)
    .bind(&facility.address.city)
    .bind(&facility.address.state)
    .bind(&facility.address.zip)
    .bind(facility.latitude)
    .bind(facility.longitude)
    .bind(facility.location_type.as_str())
    .bind(facility.is_active)
    .execute(&mut *tx)
    .await?;

    for debris in &facility.debris_types {
        sqlx::query(
            "INSERT INTO facility_debris_types \
                 (facility_id, debris_type, price_per_ton, price_note) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(&facility.id)
        .bind(&debris.debris_type)
        .bind(debris.price_per_ton)
        .bind(&debris.price_note)
        .execute(&mut *tx)
        .await?;
    }

    for payment_type in &facility.payment_types {
        sqlx::query(
            "INSERT INTO facility_payment_types (facility_id, payment_type) VALUES ($1, $2)",
        )
        .bind(&facility.id)
        .bind(payment_type)
        .execute(&mut *tx)
        .await?;
    }

    for entry in &facility.hours {
        let (open_time, close_time) = match entry.hours {
            Some(open) => (Some(open.open), Some(open.close)),
            None => (None, None),
        };
        sqlx::query(
            "INSERT INTO facility_hours \
                 (facility_id, day_of_week, is_closed, open_time, close_time) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&facility.id)
        .bind(i16::from(entry.day_of_week))
        .bind(entry.hours.is_none())
        .bind(open_time)
        .bind(close_time)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await
}

/// Mark a facility inactive. Returns `false` if the id is unknown.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the update fails.
pub async fn deactivate_facility(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE facilities SET is_active = FALSE, updated_at = NOW() WHERE id = $1",
    )
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}
