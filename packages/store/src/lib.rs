#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Hazard store accessor.
//!
//! Each backend implements the [`HazardSource`] trait to define how the
//! full hazard collection is fetched. [`HazardStore`] wraps a source and
//! resolves refresh races: every fetch is stamped with a monotonically
//! increasing sequence number and a completion that lost the race is
//! discarded, so the latest-issued fetch determines the visible
//! collection rather than the last one to complete. On fetch failure the
//! last-known-good collection is retained.

pub mod mock;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use safelens_hazard_models::Hazard;

/// Errors that can occur while fetching the hazard collection.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing source could not deliver the collection.
    #[error("Source unavailable: {message}")]
    Unavailable {
        /// Description of what went wrong.
        message: String,
    },
}

/// Trait that all hazard collection sources must implement.
///
/// A source delivers the complete current collection exactly once per
/// `fetch` call, never partially. Record order within the collection
/// carries no meaning; consumers must not depend on it.
#[async_trait]
pub trait HazardSource: Send + Sync {
    /// Returns the human-readable name of this source.
    fn name(&self) -> &str;

    /// Fetches the full hazard collection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the collection could not be delivered.
    async fn fetch(&self) -> Result<Vec<Hazard>, StoreError>;
}

struct Inner {
    /// Sequence number of the installed collection.
    seq: u64,
    hazards: Vec<Hazard>,
}

/// Sequenced wrapper around a [`HazardSource`].
///
/// Owns the last-known-good collection. Refreshes may overlap; the
/// sequence number decides which completion wins.
pub struct HazardStore {
    source: Arc<dyn HazardSource>,
    next_seq: AtomicU64,
    inner: Mutex<Inner>,
}

impl HazardStore {
    /// Creates a store over `source` with an empty initial collection.
    #[must_use]
    pub fn new(source: Arc<dyn HazardSource>) -> Self {
        Self {
            source,
            next_seq: AtomicU64::new(0),
            inner: Mutex::new(Inner {
                seq: 0,
                hazards: Vec::new(),
            }),
        }
    }

    /// Fetches the collection from the source and installs it if this
    /// refresh is still the latest issued.
    ///
    /// Returns the currently visible collection, which is the freshly
    /// fetched one unless a later-issued refresh already completed. On
    /// fetch failure the previous collection is retained and the error
    /// is returned; retrying is simply calling `refresh` again.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the source fetch fails.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub async fn refresh(&self) -> Result<Vec<Hazard>, StoreError> {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst) + 1;
        log::debug!("refresh #{seq} from source '{}'", self.source.name());

        match self.source.fetch().await {
            Ok(hazards) => {
                let mut inner = self.inner.lock().expect("store mutex poisoned");
                if seq > inner.seq {
                    log::info!("installed {} hazards from refresh #{seq}", hazards.len());
                    inner.seq = seq;
                    inner.hazards = hazards;
                } else {
                    log::debug!(
                        "discarding stale refresh #{seq} (refresh #{} already installed)",
                        inner.seq
                    );
                }
                Ok(inner.hazards.clone())
            }
            Err(e) => {
                log::error!(
                    "refresh #{seq} from source '{}' failed: {e}",
                    self.source.name()
                );
                Err(e)
            }
        }
    }

    /// Returns a snapshot of the currently visible collection.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn hazards(&self) -> Vec<Hazard> {
        self.inner
            .lock()
            .expect("store mutex poisoned")
            .hazards
            .clone()
    }
}
