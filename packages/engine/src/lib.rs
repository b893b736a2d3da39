#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Pure filter and aggregation engine over the hazard collection.
//!
//! Both operations are stateless, total over their inputs, and never
//! mutate the collection they are given: every view (map, list, charts,
//! export) renders from the subset and statistics produced here. The
//! evaluation instant is an explicit argument so recency windows can be
//! tested at a fixed point in time; callers wanting wall-clock behavior
//! pass `Utc::now()`.

use chrono::{DateTime, Utc};
use safelens_engine_models::{HazardFilter, HazardStats};
use safelens_hazard_models::{Hazard, HazardSeverity, HazardStatus, HazardType};

/// Filters the collection against the active filter specification.
///
/// A record is retained iff every dimension of `filter` admits it. The
/// recency window compares `now - timestamp` against the window
/// duration, so a future-dated record is retained under any window. The
/// filter is stable: input order is preserved and no sorting occurs. An
/// empty collection or no matches yields an empty subset.
#[must_use]
pub fn filter_hazards(hazards: &[Hazard], filter: &HazardFilter, now: DateTime<Utc>) -> Vec<Hazard> {
    hazards
        .iter()
        .filter(|hazard| admits(hazard, filter, now))
        .cloned()
        .collect()
}

/// Returns `true` if every dimension of `filter` admits the record.
fn admits(hazard: &Hazard, filter: &HazardFilter, now: DateTime<Utc>) -> bool {
    if !filter.hazard_type.admits(&hazard.hazard_type) {
        return false;
    }
    if !filter.severity.admits(&hazard.severity) {
        return false;
    }
    if !filter.status.admits(&hazard.status) {
        return false;
    }
    filter
        .time_range
        .window()
        .is_none_or(|window| now.signed_duration_since(hazard.timestamp) <= window)
}

/// Computes summary counts over a filtered subset.
///
/// One linear pass. Because the taxonomy enums are closed, every
/// breakdown sums exactly to `total`.
#[must_use]
pub fn hazard_stats(hazards: &[Hazard]) -> HazardStats {
    let mut stats = HazardStats::default();

    for hazard in hazards {
        stats.total += 1;

        match hazard.status {
            HazardStatus::Active => stats.active += 1,
            HazardStatus::Resolved => stats.resolved += 1,
        }

        match hazard.severity {
            HazardSeverity::Critical => stats.by_severity.critical += 1,
            HazardSeverity::High => stats.by_severity.high += 1,
            HazardSeverity::Medium => stats.by_severity.medium += 1,
            HazardSeverity::Low => stats.by_severity.low += 1,
        }

        match hazard.hazard_type {
            HazardType::Pothole => stats.by_type.pothole += 1,
            HazardType::Debris => stats.by_type.debris += 1,
            HazardType::Vehicle => stats.by_type.vehicle += 1,
        }
    }

    stats
}
