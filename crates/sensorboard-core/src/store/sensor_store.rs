use std::sync::Arc;

use tokio::sync::watch;
use tracing::trace;

use super::Generation;
use crate::model::{Filters, Reading};

/// Observable dashboard state.
///
/// Every field is a `watch` channel so readers get wait-free snapshots and
/// change notification. Writes happen only through the crate-private
/// actions below.
pub struct SensorStore {
    readings: watch::Sender<Arc<Vec<Reading>>>,
    sites: watch::Sender<Arc<Vec<String>>>,
    sensor_types: watch::Sender<Arc<Vec<String>>>,
    filters: watch::Sender<Filters>,
    loading: watch::Sender<bool>,
    error: watch::Sender<Option<String>>,
    pub(crate) sensor_types_generation: Generation,
    pub(crate) readings_generation: Generation,
}

impl SensorStore {
    pub fn new() -> Self {
        Self::with_filters(Filters::default())
    }

    pub fn with_filters(filters: Filters) -> Self {
        let (readings, _) = watch::channel(Arc::new(Vec::new()));
        let (sites, _) = watch::channel(Arc::new(Vec::new()));
        let (sensor_types, _) = watch::channel(Arc::new(Vec::new()));
        let (filters, _) = watch::channel(filters);
        let (loading, _) = watch::channel(false);
        let (error, _) = watch::channel(None);

        Self {
            readings,
            sites,
            sensor_types,
            filters,
            loading,
            error,
            sensor_types_generation: Generation::default(),
            readings_generation: Generation::default(),
        }
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn readings(&self) -> Arc<Vec<Reading>> {
        self.readings.borrow().clone()
    }

    pub fn sites(&self) -> Arc<Vec<String>> {
        self.sites.borrow().clone()
    }

    pub fn sensor_types(&self) -> Arc<Vec<String>> {
        self.sensor_types.borrow().clone()
    }

    pub fn filters(&self) -> Filters {
        self.filters.borrow().clone()
    }

    pub fn loading(&self) -> bool {
        *self.loading.borrow()
    }

    /// The banner: last user-visible read-path error or notice.
    pub fn error(&self) -> Option<String> {
        self.error.borrow().clone()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_readings(&self) -> watch::Receiver<Arc<Vec<Reading>>> {
        self.readings.subscribe()
    }

    pub fn subscribe_sites(&self) -> watch::Receiver<Arc<Vec<String>>> {
        self.sites.subscribe()
    }

    pub fn subscribe_sensor_types(&self) -> watch::Receiver<Arc<Vec<String>>> {
        self.sensor_types.subscribe()
    }

    pub fn subscribe_filters(&self) -> watch::Receiver<Filters> {
        self.filters.subscribe()
    }

    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    pub fn subscribe_error(&self) -> watch::Receiver<Option<String>> {
        self.error.subscribe()
    }

    // ── Actions ──────────────────────────────────────────────────────

    pub(crate) fn replace_readings(&self, readings: Vec<Reading>) {
        trace!(count = readings.len(), "store: replace readings");
        self.readings.send_replace(Arc::new(readings));
    }

    pub(crate) fn replace_sites(&self, sites: Vec<String>) {
        trace!(count = sites.len(), "store: replace sites");
        self.sites.send_replace(Arc::new(sites));
    }

    pub(crate) fn replace_sensor_types(&self, types: Vec<String>) {
        trace!(count = types.len(), "store: replace sensor types");
        self.sensor_types.send_replace(Arc::new(types));
    }

    pub(crate) fn clear_sensor_types(&self) {
        self.sensor_types.send_if_modified(|types| {
            if types.is_empty() {
                return false;
            }
            *types = Arc::new(Vec::new());
            true
        });
    }

    /// Replace the filters, returning the previous value.
    pub(crate) fn replace_filters(&self, filters: Filters) -> Filters {
        trace!(?filters, "store: replace filters");
        self.filters.send_replace(filters)
    }

    pub(crate) fn set_loading(&self, loading: bool) {
        self.loading.send_if_modified(|current| {
            let changed = *current != loading;
            *current = loading;
            changed
        });
    }

    pub(crate) fn set_error(&self, message: impl Into<String>) {
        self.error.send_replace(Some(message.into()));
    }

    pub(crate) fn clear_error(&self) {
        self.error.send_if_modified(|current| current.take().is_some());
    }
}

impl Default for SensorStore {
    fn default() -> Self {
        Self::new()
    }
}
