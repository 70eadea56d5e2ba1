//! Shared, swappable station catalog.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::domain::ChargingStation;

use super::error::CatalogError;
use super::source::parse_stations;

/// An immutable, fully validated set of stations.
#[derive(Debug)]
pub struct CatalogSnapshot {
    stations: Vec<ChargingStation>,
    loaded_at: DateTime<Utc>,
    source: String,
}

impl CatalogSnapshot {
    fn new(stations: Vec<ChargingStation>, source: String) -> Self {
        Self {
            stations,
            loaded_at: Utc::now(),
            source,
        }
    }

    /// Stations in load order.
    pub fn stations(&self) -> &[ChargingStation] {
        &self.stations
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// When this snapshot was published.
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Where the data came from (file path or upload label).
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Thread-safe station catalog.
///
/// Readers take a cheap `Arc` clone of the current snapshot and never block
/// a reload for longer than that clone. Loads parse into a temporary
/// collection first and only swap the published snapshot on success.
#[derive(Clone)]
pub struct StationCatalog {
    inner: Arc<RwLock<Option<Arc<CatalogSnapshot>>>>,
    source_path: Option<PathBuf>,
}

impl StationCatalog {
    /// Create a catalog with nothing loaded and no file source.
    pub fn empty() -> Self {
        Self {
            inner: Arc::new(RwLock::new(None)),
            source_path: None,
        }
    }

    /// Create a catalog by loading the given CSV file.
    ///
    /// The path is remembered so that [`StationCatalog::refresh`] can re-read it.
    pub async fn from_path(path: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        let catalog = Self {
            inner: Arc::new(RwLock::new(None)),
            source_path: Some(path.into()),
        };
        catalog.refresh().await?;
        Ok(catalog)
    }

    /// The configured file source, if any.
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Replace the catalog with the contents of a CSV file.
    pub async fn load_path(&self, path: impl AsRef<Path>) -> Result<usize, CatalogError> {
        let path = path.as_ref();
        let label = path.display().to_string();

        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(source) => {
                let err = CatalogError::Io {
                    path: label,
                    source,
                };
                warn!(error = %err, "failed to load station catalog");
                return Err(err);
            }
        };

        self.load_reader(bytes.as_slice(), label).await
    }

    /// Replace the catalog with CSV data from any reader.
    ///
    /// On error the previously published snapshot stays in place.
    pub async fn load_reader<R: Read>(
        &self,
        reader: R,
        source: impl Into<String>,
    ) -> Result<usize, CatalogError> {
        let source = source.into();

        let stations = match parse_stations(reader) {
            Ok(stations) => stations,
            Err(err) => {
                warn!(source = %source, error = %err, "rejected station catalog, keeping previous");
                return Err(err);
            }
        };

        let count = stations.len();
        let snapshot = Arc::new(CatalogSnapshot::new(stations, source));
        info!(count, source = %snapshot.source(), "loaded charging station catalog");

        let mut guard = self.inner.write().await;
        *guard = Some(snapshot);

        Ok(count)
    }

    /// Re-read the configured file source.
    ///
    /// On failure, the existing snapshot is preserved and the error returned.
    pub async fn refresh(&self) -> Result<usize, CatalogError> {
        let path = self.source_path.as_ref().ok_or(CatalogError::NoSource)?;
        self.load_path(path).await
    }

    /// The current snapshot, or `None` if nothing has been loaded.
    pub async fn snapshot(&self) -> Option<Arc<CatalogSnapshot>> {
        let guard = self.inner.read().await;
        guard.clone()
    }

    /// All stations of the current snapshot, in load order.
    pub async fn all(&self) -> Vec<ChargingStation> {
        self.snapshot()
            .await
            .map(|s| s.stations().to_vec())
            .unwrap_or_default()
    }

    /// Number of stations currently loaded.
    pub async fn len(&self) -> usize {
        self.snapshot().await.map_or(0, |s| s.len())
    }

    /// Whether the catalog has no stations (including never loaded).
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
