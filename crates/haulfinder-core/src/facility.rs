//! Domain types for waste-disposal facilities.

use std::str::FromStr;

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Facility classification. Closed set — an unrecognized token fails at
/// parse time, never at ranking time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationType {
    Landfill,
    TransferStation,
    ConstructionLandfill,
}

impl LocationType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Landfill => "landfill",
            Self::TransferStation => "transfer_station",
            Self::ConstructionLandfill => "construction_landfill",
        }
    }
}

impl std::fmt::Display for LocationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocationType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "landfill" => Ok(Self::Landfill),
            "transfer_station" => Ok(Self::TransferStation),
            "construction_landfill" => Ok(Self::ConstructionLandfill),
            other => Err(CoreError::InvalidLocationType(other.to_string())),
        }
    }
}

/// Postal address of a facility. All fields optional — source records are
/// frequently incomplete and the engine tolerates partial data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
}

/// One debris type a facility accepts, with optional pricing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebrisAcceptance {
    pub debris_type: String,
    pub price_per_ton: Option<Decimal>,
    pub price_note: Option<String>,
}

/// Open/close times for a single day, serialized as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenHours {
    #[serde(with = "hhmm")]
    pub open: NaiveTime,
    #[serde(with = "hhmm")]
    pub close: NaiveTime,
}

/// Schedule entry for one day of the week (0 = Sunday .. 6 = Saturday).
/// `hours = None` means the facility is closed that day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursEntry {
    pub day_of_week: u8,
    pub hours: Option<OpenHours>,
}

impl HoursEntry {
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidDayOfWeek`] if `day_of_week > 6`.
    pub fn new(day_of_week: u8, hours: Option<OpenHours>) -> Result<Self, CoreError> {
        if day_of_week > 6 {
            return Err(CoreError::InvalidDayOfWeek(day_of_week));
        }
        Ok(Self { day_of_week, hours })
    }
}

/// Latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

/// One waste-disposal site as the catalog stores it. `distance` is not on
/// this type — it is request-scoped and lives on the ranked wrapper the
/// engine produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub address: Address,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub location_type: LocationType,
    pub debris_types: Vec<DebrisAcceptance>,
    pub payment_types: Vec<String>,
    pub hours: Vec<HoursEntry>,
    pub is_active: bool,
}

impl Facility {
    /// Both coordinates, or `None` if the facility is unlocated and
    /// therefore cannot be distance-ranked.
    #[must_use]
    pub fn coordinates(&self) -> Option<LatLng> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(LatLng {
                latitude,
                longitude,
            }),
            _ => None,
        }
    }
}

/// Serde adapter for `HH:MM` wire format on [`NaiveTime`].
mod hhmm {
    use chrono::NaiveTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}
