//! In-memory mock source for development and tests.
//!
//! Stands in for the future real-time backend: delivers a fixed
//! collection, optionally after an artificial delay simulating network
//! latency.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use safelens_hazard_models::{Hazard, HazardSeverity, HazardStatus, HazardType};

use crate::{HazardSource, StoreError};

/// Hazard source backed by an in-memory collection.
pub struct MockHazardSource {
    hazards: Vec<Hazard>,
    delay: Duration,
}

impl MockHazardSource {
    /// Creates a source delivering the [`sample_hazards`] development
    /// dataset with no delay.
    #[must_use]
    pub fn new() -> Self {
        Self::with_hazards(sample_hazards())
    }

    /// Creates a source delivering the given collection.
    #[must_use]
    pub const fn with_hazards(hazards: Vec<Hazard>) -> Self {
        Self {
            hazards,
            delay: Duration::ZERO,
        }
    }

    /// Adds an artificial delay before each delivery.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl Default for MockHazardSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HazardSource for MockHazardSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self) -> Result<Vec<Hazard>, StoreError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.hazards.clone())
    }
}

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap_or_default()
        .and_hms_opt(h, mi, 0)
        .unwrap_or_default()
        .and_utc()
}

/// The 8-record development dataset: three potholes (IDs 1, 4, 7), six
/// active and two resolved reports, spanning all four severity levels.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn sample_hazards() -> Vec<Hazard> {
    vec![
        Hazard {
            id: "1".to_string(),
            hazard_type: HazardType::Pothole,
            severity: HazardSeverity::Critical,
            status: HazardStatus::Active,
            latitude: 28.6139,
            longitude: 77.2090,
            location: "Connaught Place, New Delhi".to_string(),
            timestamp: at(2024, 1, 15, 10, 30),
            confidence: 0.92,
            reported_by: "User_A123".to_string(),
            description: "Large pothole causing traffic disruption".to_string(),
            image_url: None,
        },
        Hazard {
            id: "2".to_string(),
            hazard_type: HazardType::Debris,
            severity: HazardSeverity::High,
            status: HazardStatus::Active,
            latitude: 19.0760,
            longitude: 72.8777,
            location: "Marine Drive, Mumbai".to_string(),
            timestamp: at(2024, 1, 15, 11, 15),
            confidence: 0.87,
            reported_by: "User_B456".to_string(),
            description: "Construction debris blocking right lane".to_string(),
            image_url: None,
        },
        Hazard {
            id: "3".to_string(),
            hazard_type: HazardType::Vehicle,
            severity: HazardSeverity::Medium,
            status: HazardStatus::Resolved,
            latitude: 12.9716,
            longitude: 77.5946,
            location: "MG Road, Bangalore".to_string(),
            timestamp: at(2024, 1, 15, 9, 45),
            confidence: 0.95,
            reported_by: "User_C789".to_string(),
            description: "Stalled vehicle on main road".to_string(),
            image_url: None,
        },
        Hazard {
            id: "4".to_string(),
            hazard_type: HazardType::Pothole,
            severity: HazardSeverity::High,
            status: HazardStatus::Active,
            latitude: 13.0827,
            longitude: 80.2707,
            location: "Anna Salai, Chennai".to_string(),
            timestamp: at(2024, 1, 15, 8, 20),
            confidence: 0.89,
            reported_by: "User_D012".to_string(),
            description: "Multiple potholes in succession".to_string(),
            image_url: None,
        },
        Hazard {
            id: "5".to_string(),
            hazard_type: HazardType::Debris,
            severity: HazardSeverity::Medium,
            status: HazardStatus::Active,
            latitude: 22.5726,
            longitude: 88.3639,
            location: "Park Street, Kolkata".to_string(),
            timestamp: at(2024, 1, 15, 12, 0),
            confidence: 0.84,
            reported_by: "User_E345".to_string(),
            description: "Fallen tree branches on road".to_string(),
            image_url: None,
        },
        Hazard {
            id: "6".to_string(),
            hazard_type: HazardType::Vehicle,
            severity: HazardSeverity::Critical,
            status: HazardStatus::Active,
            latitude: 17.3850,
            longitude: 78.4867,
            location: "Hitech City, Hyderabad".to_string(),
            timestamp: at(2024, 1, 15, 13, 30),
            confidence: 0.96,
            reported_by: "User_F678".to_string(),
            description: "Accident blocking two lanes".to_string(),
            image_url: None,
        },
        Hazard {
            id: "7".to_string(),
            hazard_type: HazardType::Pothole,
            severity: HazardSeverity::Low,
            status: HazardStatus::Active,
            latitude: 23.0225,
            longitude: 72.5714,
            location: "SG Highway, Ahmedabad".to_string(),
            timestamp: at(2024, 1, 14, 16, 45),
            confidence: 0.78,
            reported_by: "User_G901".to_string(),
            description: "Small pothole near junction".to_string(),
            image_url: None,
        },
        Hazard {
            id: "8".to_string(),
            hazard_type: HazardType::Debris,
            severity: HazardSeverity::Low,
            status: HazardStatus::Resolved,
            latitude: 26.9124,
            longitude: 75.7873,
            location: "MI Road, Jaipur".to_string(),
            timestamp: at(2024, 1, 14, 14, 20),
            confidence: 0.81,
            reported_by: "User_H234".to_string(),
            description: "Minor debris cleared".to_string(),
            image_url: None,
        },
    ]
}
