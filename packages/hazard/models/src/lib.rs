#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Road hazard record and taxonomy types.
//!
//! This crate defines the canonical hazard taxonomy (type, severity,
//! status) and the immutable [`Hazard`] record shared across the entire
//! `SafeLens` system. The taxonomy is closed: records carrying values
//! outside these enums are rejected at deserialization rather than
//! silently dropped from downstream aggregates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Kind of road hazard being reported.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HazardType {
    /// Road surface damage.
    Pothole,
    /// Obstruction on the roadway (construction debris, fallen branches).
    Debris,
    /// Stalled or abandoned vehicle.
    Vehicle,
}

impl HazardType {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Pothole, Self::Debris, Self::Vehicle]
    }
}

/// Severity level for a hazard, from 1 (low) to 4 (critical), ordered by
/// urgency.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HazardSeverity {
    /// Level 1: Minor inconvenience, no immediate action required
    Low = 1,
    /// Level 2: Noticeable impact on traffic flow
    Medium = 2,
    /// Level 3: Significant danger or disruption
    High = 3,
    /// Level 4: Immediate danger to road users
    Critical = 4,
}

impl HazardSeverity {
    /// Returns the numeric value of this severity level.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Creates a severity level from a numeric value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not in the range 1-4.
    pub const fn from_value(value: u8) -> Result<Self, InvalidSeverityError> {
        match value {
            1 => Ok(Self::Low),
            2 => Ok(Self::Medium),
            3 => Ok(Self::High),
            4 => Ok(Self::Critical),
            _ => Err(InvalidSeverityError { value }),
        }
    }

    /// Returns all variants of this enum, most urgent first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Critical, Self::High, Self::Medium, Self::Low]
    }
}

/// Error returned when attempting to create a [`HazardSeverity`] from an
/// invalid numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidSeverityError {
    /// The invalid severity value that was provided.
    pub value: u8,
}

impl std::fmt::Display for InvalidSeverityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid severity value {}: expected 1-4", self.value)
    }
}

impl std::error::Error for InvalidSeverityError {}

/// Resolution status of a hazard report.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HazardStatus {
    /// Hazard is still present on the road.
    Active,
    /// Hazard has been cleared or repaired.
    Resolved,
}

impl HazardStatus {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Active, Self::Resolved]
    }
}

/// A single reported road hazard.
///
/// Records are immutable once created by the upstream source; the
/// collection as a whole is replaced wholesale on refresh. Timestamps
/// travel over the wire as epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hazard {
    /// Unique opaque identifier.
    pub id: String,
    /// Kind of hazard.
    #[serde(rename = "type")]
    pub hazard_type: HazardType,
    /// Urgency level.
    pub severity: HazardSeverity,
    /// Resolution status.
    pub status: HazardStatus,
    /// Latitude of the report.
    pub latitude: f64,
    /// Longitude of the report.
    pub longitude: f64,
    /// Human-readable place name.
    pub location: String,
    /// Reporting time.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    /// Detection/report confidence in `[0, 1]`.
    pub confidence: f64,
    /// Free-text reporter identifier.
    pub reported_by: String,
    /// Free-text description of the hazard.
    pub description: String,
    /// Optional photo of the hazard.
    pub image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn hazard() -> Hazard {
        Hazard {
            id: "1".to_string(),
            hazard_type: HazardType::Pothole,
            severity: HazardSeverity::Critical,
            status: HazardStatus::Active,
            latitude: 28.6139,
            longitude: 77.209,
            location: "Connaught Place, New Delhi".to_string(),
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap()
                .and_utc(),
            confidence: 0.92,
            reported_by: "User_A123".to_string(),
            description: "Large pothole causing traffic disruption".to_string(),
            image_url: None,
        }
    }

    #[test]
    fn severity_from_value_roundtrip() {
        for v in 1..=4u8 {
            let severity = HazardSeverity::from_value(v).unwrap();
            assert_eq!(severity.value(), v);
        }
        assert!(HazardSeverity::from_value(0).is_err());
        assert!(HazardSeverity::from_value(5).is_err());
    }

    #[test]
    fn severity_ordered_by_urgency() {
        assert!(HazardSeverity::Critical > HazardSeverity::High);
        assert!(HazardSeverity::High > HazardSeverity::Medium);
        assert!(HazardSeverity::Medium > HazardSeverity::Low);
    }

    #[test]
    fn enum_string_forms_are_lowercase() {
        assert_eq!(HazardType::Pothole.to_string(), "pothole");
        assert_eq!(HazardSeverity::Critical.to_string(), "critical");
        assert_eq!(HazardStatus::Resolved.to_string(), "resolved");
        assert_eq!("debris".parse::<HazardType>().unwrap(), HazardType::Debris);
    }

    #[test]
    fn record_serializes_with_wire_field_names() {
        let json = serde_json::to_value(hazard()).unwrap();
        assert_eq!(json["type"], "pothole");
        assert_eq!(json["reportedBy"], "User_A123");
        // Epoch milliseconds for 2024-01-15T10:30:00Z
        assert_eq!(json["timestamp"], 1_705_314_600_000_i64);
    }

    #[test]
    fn unknown_taxonomy_value_is_rejected() {
        let mut json = serde_json::to_value(hazard()).unwrap();
        json["type"] = "sinkhole".into();
        assert!(serde_json::from_value::<Hazard>(json).is_err());
    }
}
