//! Row types for the facility tables and their conversion into the
//! domain [`Facility`].

use chrono::{DateTime, NaiveTime, Utc};
use rust_decimal::Decimal;

use haulfinder_core::{
    Address, DebrisAcceptance, Facility, HoursEntry, LocationType, OpenHours,
};

use crate::DbError;

/// A row from the `facilities` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub(super) struct FacilityRow {
    pub id: String,
    pub name: String,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub location_type: String,
    pub is_active: bool,
    #[allow(dead_code)]
    pub created_at: DateTime<Utc>,
    #[allow(dead_code)]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub(super) struct DebrisRow {
    pub facility_id: String,
    pub debris_type: String,
    pub price_per_ton: Option<Decimal>,
    pub price_note: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub(super) struct PaymentRow {
    pub facility_id: String,
    pub payment_type: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub(super) struct HoursRow {
    pub facility_id: String,
    pub day_of_week: i16,
    pub is_closed: bool,
    pub open_time: Option<NaiveTime>,
    pub close_time: Option<NaiveTime>,
}

impl FacilityRow {
    /// Assemble a domain facility from this row plus its child rows.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::CorruptRow`] if the stored `location_type` token
    /// or an hours row violates the domain invariants. The schema CHECK
    /// constraints make this unreachable through normal writes.
    pub(super) fn into_domain(
        self,
        debris: Vec<DebrisRow>,
        payments: Vec<PaymentRow>,
        hours: Vec<HoursRow>,
    ) -> Result<Facility, DbError> {
        let location_type: LocationType =
            self.location_type
                .parse()
                .map_err(|e| DbError::CorruptRow {
                    id: self.id.clone(),
                    reason: format!("{e}"),
                })?;

        let hours = hours
            .into_iter()
            .map(|row| hours_entry(&self.id, row))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Facility {
            id: self.id,
            name: self.name,
            address: Address {
                street: self.street,
                city: self.city,
                state: self.state,
                zip: self.zip,
            },
            latitude: self.latitude,
            longitude: self.longitude,
            location_type,
            debris_types: debris
                .into_iter()
                .map(|row| DebrisAcceptance {
                    debris_type: row.debris_type,
                    price_per_ton: row.price_per_ton,
                    price_note: row.price_note,
                })
                .collect(),
            payment_types: payments.into_iter().map(|row| row.payment_type).collect(),
            hours,
            is_active: self.is_active,
        })
    }
}

fn hours_entry(facility_id: &str, row: HoursRow) -> Result<HoursEntry, DbError> {
    let corrupt = |reason: String| DbError::CorruptRow {
        id: facility_id.to_string(),
        reason,
    };

    let day_of_week = u8::try_from(row.day_of_week)
        .map_err(|_| corrupt(format!("negative day_of_week {}", row.day_of_week)))?;
    let hours = if row.is_closed {
        None
    } else {
        match (row.open_time, row.close_time) {
            (Some(open), Some(close)) => Some(OpenHours { open, close }),
            _ => {
                return Err(corrupt(format!(
                    "day {day_of_week} is open but missing open/close times"
                )))
            }
        }
    };
    HoursEntry::new(day_of_week, hours).map_err(|e| corrupt(format!("{e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, location_type: &str) -> FacilityRow {
        FacilityRow {
            id: id.to_string(),
            name: format!("Facility {id}"),
            street: None,
            city: None,
            state: None,
            zip: None,
            latitude: Some(41.5),
            longitude: Some(-81.7),
            location_type: location_type.to_string(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn into_domain_parses_location_type() {
        let facility = row("f-1", "transfer_station")
            .into_domain(vec![], vec![], vec![])
            .expect("convert");
        assert_eq!(facility.location_type, LocationType::TransferStation);
    }

    #[test]
    fn into_domain_rejects_unknown_location_type() {
        let err = row("f-1", "quarry")
            .into_domain(vec![], vec![], vec![])
            .unwrap_err();
        assert!(
            matches!(err, DbError::CorruptRow { ref id, .. } if id == "f-1"),
            "expected CorruptRow, got: {err:?}"
        );
    }

    #[test]
    fn into_domain_rejects_open_day_without_times() {
        let hours = vec![HoursRow {
            facility_id: "f-1".to_string(),
            day_of_week: 2,
            is_closed: false,
            open_time: None,
            close_time: None,
        }];
        let err = row("f-1", "landfill")
            .into_domain(vec![], vec![], hours)
            .unwrap_err();
        assert!(matches!(err, DbError::CorruptRow { .. }));
    }

    #[test]
    fn into_domain_maps_closed_day_to_none() {
        let hours = vec![HoursRow {
            facility_id: "f-1".to_string(),
            day_of_week: 0,
            is_closed: true,
            open_time: None,
            close_time: None,
        }];
        let facility = row("f-1", "landfill")
            .into_domain(vec![], vec![], hours)
            .expect("convert");
        assert_eq!(facility.hours.len(), 1);
        assert!(facility.hours[0].hours.is_none());
    }
}
