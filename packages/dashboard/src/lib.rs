#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Top-level dashboard state.
//!
//! The [`Dashboard`] owns the current collection and the active filter
//! explicitly; views (map, list, charts, export panel) read immutable
//! snapshots of the filtered subset and its statistics and never write
//! back. The filtered subset and statistics are re-derived from scratch
//! whenever the filter or the underlying collection changes.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use safelens_engine::{filter_hazards, hazard_stats};
use safelens_engine_models::{HazardFilter, HazardStats};
use safelens_export::ExportFormat;
use safelens_hazard_models::Hazard;
use safelens_store::{HazardSource, HazardStore};

/// Orchestrating state behind every dashboard view.
pub struct Dashboard {
    store: HazardStore,
    filter: HazardFilter,
    hazards: Vec<Hazard>,
    filtered: Vec<Hazard>,
    stats: HazardStats,
    loading: bool,
    exporting: bool,
    last_error: Option<String>,
}

impl Dashboard {
    /// Creates a dashboard over `source` with an empty collection and an
    /// unconstrained filter. Call [`Dashboard::refresh`] to load data.
    #[must_use]
    pub fn new(source: Arc<dyn HazardSource>) -> Self {
        Self {
            store: HazardStore::new(source),
            filter: HazardFilter::default(),
            hazards: Vec::new(),
            filtered: Vec::new(),
            stats: HazardStats::default(),
            loading: false,
            exporting: false,
            last_error: None,
        }
    }

    /// Fetches the collection through the sequenced store and re-derives
    /// the filtered subset and statistics.
    ///
    /// On failure the previous collection stays visible and the error is
    /// recorded as a non-blocking indicator; retry is another `refresh`
    /// call. Never panics the dashboard.
    pub async fn refresh(&mut self) {
        self.loading = true;
        match self.store.refresh().await {
            Ok(hazards) => {
                self.hazards = hazards;
                self.last_error = None;
                self.rederive();
            }
            Err(e) => {
                log::error!("refresh failed, keeping last-known-good collection: {e}");
                self.last_error = Some(e.to_string());
            }
        }
        self.loading = false;
    }

    /// Replaces the active filter wholesale and re-derives.
    pub fn set_filter(&mut self, filter: HazardFilter) {
        self.filter = filter;
        self.rederive();
    }

    /// Resets every filter dimension to "all".
    pub fn clear_filters(&mut self) {
        self.set_filter(HazardFilter::default());
    }

    /// Recomputes the filtered subset and its statistics from scratch.
    fn rederive(&mut self) {
        self.filtered = filter_hazards(&self.hazards, &self.filter, Utc::now());
        self.stats = hazard_stats(&self.filtered);
    }

    /// Generates one report artifact over the currently filtered subset.
    ///
    /// This is the export-invocation boundary: failures are logged and
    /// swallowed, the busy flag is always cleared, and `None` comes back
    /// whether the export was unavailable (empty subset) or failed. No
    /// retry is attempted.
    pub fn export(&mut self, format: ExportFormat, dir: &Path) -> Option<PathBuf> {
        self.exporting = true;
        let result = safelens_export::export(format, &self.filtered, &self.stats, dir);
        self.exporting = false;

        match result {
            Ok(path) => path,
            Err(e) => {
                log::error!("{format:?} export failed: {e}");
                None
            }
        }
    }

    /// Returns `true` if there is anything to export.
    #[must_use]
    pub fn can_export(&self) -> bool {
        !self.filtered.is_empty()
    }

    /// The full collection snapshot.
    #[must_use]
    pub fn hazards(&self) -> &[Hazard] {
        &self.hazards
    }

    /// The subset passing the active filter, in collection order.
    #[must_use]
    pub fn filtered(&self) -> &[Hazard] {
        &self.filtered
    }

    /// Statistics over the filtered subset.
    #[must_use]
    pub const fn stats(&self) -> &HazardStats {
        &self.stats
    }

    /// The active filter.
    #[must_use]
    pub const fn filter(&self) -> &HazardFilter {
        &self.filter
    }

    /// Whether a refresh is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether an export is in progress.
    #[must_use]
    pub const fn is_exporting(&self) -> bool {
        self.exporting
    }

    /// The last refresh failure, if the visible collection is stale.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use safelens_engine_models::Selection;
    use safelens_hazard_models::{HazardStatus, HazardType};
    use safelens_store::StoreError;
    use safelens_store::mock::MockHazardSource;

    use super::*;

    struct DownSource;

    #[async_trait]
    impl HazardSource for DownSource {
        fn name(&self) -> &str {
            "down"
        }

        async fn fetch(&self) -> Result<Vec<Hazard>, StoreError> {
            Err(StoreError::Unavailable {
                message: "backend offline".to_string(),
            })
        }
    }

    async fn loaded_dashboard() -> Dashboard {
        let mut dashboard = Dashboard::new(Arc::new(MockHazardSource::new()));
        dashboard.refresh().await;
        dashboard
    }

    #[tokio::test]
    async fn refresh_populates_collection_and_stats() {
        let dashboard = loaded_dashboard().await;
        assert_eq!(dashboard.hazards().len(), 8);
        assert_eq!(dashboard.filtered().len(), 8);
        assert_eq!(dashboard.stats().total, 8);
        assert!(dashboard.last_error().is_none());
        assert!(!dashboard.is_loading());
    }

    #[tokio::test]
    async fn filter_changes_rederive_subset_and_stats() {
        let mut dashboard = loaded_dashboard().await;

        dashboard.set_filter(HazardFilter {
            status: Selection::Only(HazardStatus::Active),
            ..HazardFilter::default()
        });
        assert_eq!(dashboard.filtered().len(), 6);
        assert_eq!(dashboard.stats().active, 6);
        assert_eq!(dashboard.stats().resolved, 0);

        dashboard.clear_filters();
        assert!(dashboard.filter().is_unconstrained());
        assert_eq!(dashboard.filtered().len(), 8);
    }

    #[tokio::test]
    async fn failed_refresh_reports_nonblocking_error() {
        let mut broken = Dashboard::new(Arc::new(DownSource));
        broken.refresh().await;
        assert!(broken.last_error().unwrap().contains("backend offline"));
        assert!(broken.hazards().is_empty());
        assert!(!broken.is_loading());

        // The dashboard stays interactive: filters still apply.
        broken.set_filter(HazardFilter {
            status: Selection::Only(HazardStatus::Active),
            ..HazardFilter::default()
        });
        assert!(broken.filtered().is_empty());
    }

    #[tokio::test]
    async fn export_over_filtered_subset() {
        let mut dashboard = loaded_dashboard().await;
        dashboard.set_filter(HazardFilter {
            hazard_type: Selection::Only(HazardType::Pothole),
            ..HazardFilter::default()
        });
        assert!(dashboard.can_export());

        let dir = tempfile::tempdir().unwrap();
        let path = dashboard.export(ExportFormat::Csv, dir.path()).unwrap();
        let csv = std::fs::read_to_string(path).unwrap();
        // Header plus the three pothole rows only.
        assert_eq!(csv.lines().count(), 4);
        assert!(!dashboard.is_exporting());
    }

    #[tokio::test]
    async fn empty_subset_disables_exports() {
        let mut dashboard = Dashboard::new(Arc::new(MockHazardSource::with_hazards(Vec::new())));
        dashboard.refresh().await;
        assert!(!dashboard.can_export());

        let dir = tempfile::tempdir().unwrap();
        for format in ExportFormat::all() {
            assert!(dashboard.export(*format, dir.path()).is_none());
        }
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
        assert!(!dashboard.is_exporting());
    }

    #[tokio::test]
    async fn export_failure_is_contained() {
        let mut dashboard = loaded_dashboard().await;
        // A directory that does not exist makes the file write fail.
        let missing = Path::new("/nonexistent/safelens-exports");
        assert!(dashboard.export(ExportFormat::Json, missing).is_none());
        assert!(!dashboard.is_exporting());
    }
}
