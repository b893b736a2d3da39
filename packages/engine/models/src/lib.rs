#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Filter specification and statistics summary types.
//!
//! Defines the four-dimensional [`HazardFilter`] applied to the hazard
//! collection and the derived [`HazardStats`] recomputed over each
//! filtered subset. The statistics types reproduce the upstream JSON
//! statistics shape exactly, so they double as the JSON export payload.

use chrono::TimeDelta;
use safelens_hazard_models::{HazardSeverity, HazardStatus, HazardType};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// One dimension of the hazard filter: either unconstrained or pinned to
/// a single value.
///
/// Absence of a constraint is always this explicit `All` sentinel, never
/// an omitted field — every filter dimension is present on every
/// [`HazardFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<T> {
    /// No constraint on this dimension.
    All,
    /// Only records with exactly this value pass.
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T: PartialEq> Selection<T> {
    /// Returns `true` if `value` passes this dimension.
    #[must_use]
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(only) => only == value,
        }
    }

    /// Returns `true` if this dimension is unconstrained.
    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

/// Recency window measured against the evaluation instant.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum TimeRange {
    /// No recency constraint.
    #[default]
    #[serde(rename = "all")]
    #[strum(serialize = "all")]
    All,
    /// Reported within the last hour.
    #[serde(rename = "1h")]
    #[strum(serialize = "1h")]
    LastHour,
    /// Reported within the last six hours.
    #[serde(rename = "6h")]
    #[strum(serialize = "6h")]
    Last6Hours,
    /// Reported within the last day.
    #[serde(rename = "24h")]
    #[strum(serialize = "24h")]
    Last24Hours,
    /// Reported within the last week.
    #[serde(rename = "7d")]
    #[strum(serialize = "7d")]
    Last7Days,
}

impl TimeRange {
    /// Returns the window duration, or `None` for [`TimeRange::All`].
    #[must_use]
    pub fn window(self) -> Option<TimeDelta> {
        let ms = match self {
            Self::All => return None,
            Self::LastHour => 3_600_000,
            Self::Last6Hours => 21_600_000,
            Self::Last24Hours => 86_400_000,
            Self::Last7Days => 604_800_000,
        };
        Some(TimeDelta::milliseconds(ms))
    }

    /// Returns all variants of this enum, narrowest window first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::LastHour,
            Self::Last6Hours,
            Self::Last24Hours,
            Self::Last7Days,
            Self::All,
        ]
    }
}

/// The four-dimensional constraint currently applied to the hazard
/// collection.
///
/// The default filter admits everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HazardFilter {
    /// Constraint on the hazard type.
    pub hazard_type: Selection<HazardType>,
    /// Constraint on the severity level.
    pub severity: Selection<HazardSeverity>,
    /// Constraint on the resolution status.
    pub status: Selection<HazardStatus>,
    /// Recency window.
    pub time_range: TimeRange,
}

impl HazardFilter {
    /// Returns `true` if no dimension constrains the collection.
    #[must_use]
    pub const fn is_unconstrained(&self) -> bool {
        self.hazard_type.is_all()
            && self.severity.is_all()
            && self.status.is_all()
            && matches!(self.time_range, TimeRange::All)
    }
}

/// Per-severity hazard counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeverityCounts {
    /// Hazards with critical severity.
    pub critical: u64,
    /// Hazards with high severity.
    pub high: u64,
    /// Hazards with medium severity.
    pub medium: u64,
    /// Hazards with low severity.
    pub low: u64,
}

impl SeverityCounts {
    /// Returns the count for a single severity level.
    #[must_use]
    pub const fn count(&self, severity: HazardSeverity) -> u64 {
        match severity {
            HazardSeverity::Critical => self.critical,
            HazardSeverity::High => self.high,
            HazardSeverity::Medium => self.medium,
            HazardSeverity::Low => self.low,
        }
    }

    /// Returns the sum of all severity buckets.
    #[must_use]
    pub const fn sum(&self) -> u64 {
        self.critical + self.high + self.medium + self.low
    }
}

/// Per-type hazard counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeCounts {
    /// Pothole reports.
    pub pothole: u64,
    /// Debris reports.
    pub debris: u64,
    /// Stalled-vehicle reports.
    pub vehicle: u64,
}

impl TypeCounts {
    /// Returns the count for a single hazard type.
    #[must_use]
    pub const fn count(&self, hazard_type: HazardType) -> u64 {
        match hazard_type {
            HazardType::Pothole => self.pothole,
            HazardType::Debris => self.debris,
            HazardType::Vehicle => self.vehicle,
        }
    }

    /// Returns the sum of all type buckets.
    #[must_use]
    pub const fn sum(&self) -> u64 {
        self.pothole + self.debris + self.vehicle
    }
}

/// Derived counts over a filtered subset of the hazard collection.
///
/// Recomputed from scratch on every filter change, never incrementally
/// updated. Because the taxonomy enums are closed, every breakdown sums
/// exactly to `total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HazardStats {
    /// Size of the filtered subset.
    pub total: u64,
    /// Records with active status.
    pub active: u64,
    /// Records with resolved status.
    pub resolved: u64,
    /// Breakdown by severity level.
    pub by_severity: SeverityCounts,
    /// Breakdown by hazard type.
    pub by_type: TypeCounts,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_is_unconstrained() {
        assert!(HazardFilter::default().is_unconstrained());
        let pinned = HazardFilter {
            status: Selection::Only(HazardStatus::Active),
            ..HazardFilter::default()
        };
        assert!(!pinned.is_unconstrained());
    }

    #[test]
    fn selection_admits() {
        let all: Selection<HazardType> = Selection::All;
        assert!(all.admits(&HazardType::Debris));

        let only = Selection::Only(HazardType::Pothole);
        assert!(only.admits(&HazardType::Pothole));
        assert!(!only.admits(&HazardType::Vehicle));
    }

    #[test]
    fn time_range_windows() {
        assert_eq!(TimeRange::All.window(), None);
        assert_eq!(
            TimeRange::LastHour.window(),
            Some(TimeDelta::milliseconds(3_600_000))
        );
        assert_eq!(
            TimeRange::Last6Hours.window(),
            Some(TimeDelta::milliseconds(21_600_000))
        );
        assert_eq!(
            TimeRange::Last24Hours.window(),
            Some(TimeDelta::milliseconds(86_400_000))
        );
        assert_eq!(
            TimeRange::Last7Days.window(),
            Some(TimeDelta::milliseconds(604_800_000))
        );
    }

    #[test]
    fn time_range_string_forms() {
        assert_eq!(TimeRange::LastHour.to_string(), "1h");
        assert_eq!("7d".parse::<TimeRange>().unwrap(), TimeRange::Last7Days);
        assert_eq!("all".parse::<TimeRange>().unwrap(), TimeRange::All);
    }

    #[test]
    fn stats_serialize_with_wire_field_names() {
        let stats = HazardStats {
            total: 3,
            active: 2,
            resolved: 1,
            by_severity: SeverityCounts {
                critical: 1,
                high: 1,
                medium: 1,
                low: 0,
            },
            by_type: TypeCounts {
                pothole: 2,
                debris: 1,
                vehicle: 0,
            },
        };
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["bySeverity"]["critical"], 1);
        assert_eq!(json["byType"]["pothole"], 2);
    }
}
