// ── Dashboard ──
//
// Owns the API client and the state store, and exposes the intents that
// drive them. Cheaply cloneable: all clones share one client and one store.
// Read-path failures land in the store banner and are returned; write-path
// failures are only returned.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use sensorboard_api::{
    ApiClient, CandidateSet, ConnectionStatus, CreatedReading, EndpointLabel, HealthReport,
    TransportConfig,
};

use crate::config::DashboardConfig;
use crate::error::{CoreError, Operation};
use crate::model::{Filters, Reading, ReadingDraft};
use crate::store::SensorStore;

const NO_SITES_NOTICE: &str = "No sites available. Create a reading first.";

/// Point-in-time copy of everything a view renders.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardState {
    pub readings: Arc<Vec<Reading>>,
    pub sites: Arc<Vec<String>>,
    pub sensor_types: Arc<Vec<String>>,
    pub filters: Filters,
    pub loading: bool,
    pub error: Option<String>,
    pub api_status: ConnectionStatus,
    pub active_endpoint: String,
    pub active_label: EndpointLabel,
}

#[derive(Clone)]
pub struct Dashboard {
    inner: Arc<DashboardInner>,
}

struct DashboardInner {
    api: ApiClient,
    store: SensorStore,
}

impl Dashboard {
    /// Build the HTTP client from `config`. No network traffic happens here.
    pub fn new(config: &DashboardConfig) -> Result<Self, CoreError> {
        let candidates = CandidateSet::parse(&config.endpoints)?;
        let transport = TransportConfig {
            timeout: config.timeout,
            ..TransportConfig::default()
        };
        let api = ApiClient::new(candidates, &transport)?;
        let store = SensorStore::with_filters(Filters {
            limit: Filters::clamp_limit(config.limit),
            ..Filters::default()
        });
        Ok(Self::with_parts(api, store))
    }

    /// Assemble from an existing client and store.
    pub fn with_parts(api: ApiClient, store: SensorStore) -> Self {
        Self {
            inner: Arc::new(DashboardInner { api, store }),
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn store(&self) -> &SensorStore {
        &self.inner.store
    }

    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    pub fn api_status(&self) -> ConnectionStatus {
        self.inner.api.status()
    }

    pub fn subscribe_api_status(&self) -> watch::Receiver<ConnectionStatus> {
        self.inner.api.subscribe_status()
    }

    pub fn snapshot(&self) -> DashboardState {
        let store = self.store();
        DashboardState {
            readings: store.readings(),
            sites: store.sites(),
            sensor_types: store.sensor_types(),
            filters: store.filters(),
            loading: store.loading(),
            error: store.error(),
            api_status: self.api_status(),
            active_endpoint: self.inner.api.active_endpoint().to_string(),
            active_label: self.inner.api.active_label(),
        }
    }

    // ── Intents ──────────────────────────────────────────────────────

    /// Probe `GET /`. Does not touch the store.
    pub async fn health(&self) -> Result<HealthReport, CoreError> {
        let report = self
            .inner
            .api
            .health()
            .await
            .map_err(|e| CoreError::classify(e, Operation::Health))?;

        if report.is_healthy() {
            info!(
                endpoint = %self.inner.api.active_endpoint(),
                storage = ?report.cassandra_connected,
                "service healthy"
            );
        } else {
            debug!(?report, "service answered with an unexpected health payload");
        }
        Ok(report)
    }

    /// Probe the service, then load the site list whatever the outcome.
    ///
    /// Returns the health report when the probe answered.
    pub async fn init(&self) -> Option<HealthReport> {
        let report = match self.health().await {
            Ok(report) => Some(report),
            Err(e) => {
                warn!(error = %e, "health probe failed");
                None
            }
        };

        if let Err(e) = self.load_sites().await {
            debug!(error = %e, "initial site load failed");
        }
        report
    }

    /// Fetch the site list into the store.
    pub async fn load_sites(&self) -> Result<Arc<Vec<String>>, CoreError> {
        let store = self.store();
        match self.inner.api.list_sites().await {
            Ok(sites) => {
                if sites.is_empty() {
                    store.set_error(NO_SITES_NOTICE);
                }
                store.replace_sites(sites);
                Ok(store.sites())
            }
            Err(e) => {
                let err = CoreError::classify(e, Operation::LoadSites);
                store.set_error(err.to_string());
                Err(err)
            }
        }
    }

    /// Fetch sensor types for `site` into the store.
    ///
    /// A response superseded by a later fetch (or by clearing the site) is
    /// returned to the caller but not written.
    pub async fn load_sensor_types(&self, site: &str) -> Result<Arc<Vec<String>>, CoreError> {
        let store = self.store();
        let ticket = store.sensor_types_generation.begin();
        let result = self.inner.api.list_sensor_types(site).await;
        let current = store.sensor_types_generation.is_current(ticket);
        if !current {
            debug!(site, "dropping superseded sensor types response");
        }

        match result {
            Ok(types) => {
                if !current {
                    return Ok(Arc::new(types));
                }
                if types.is_empty() {
                    store.set_error(format!(
                        "No sensor types for site \"{site}\". Create a reading first."
                    ));
                }
                store.replace_sensor_types(types);
                Ok(store.sensor_types())
            }
            Err(e) => {
                let err = CoreError::classify(e, Operation::LoadSensorTypes);
                if current {
                    store.set_error(err.to_string());
                }
                Err(err)
            }
        }
    }

    /// Replace the filters.
    ///
    /// `limit` is clamped. A changed site clears `sensor_type` and the
    /// sensor-type list; a non-empty new site then fetches its types once.
    pub async fn set_filters(&self, filters: Filters) -> Result<(), CoreError> {
        let store = self.store();
        let mut next = filters;
        next.limit = Filters::clamp_limit(next.limit);

        let previous = store.filters();
        let site_changed = next.site != previous.site;
        if site_changed {
            next.sensor_type.clear();
        }
        let site = next.site.clone();
        store.replace_filters(next);

        if !site_changed {
            return Ok(());
        }

        // Invalidate any fetch still in flight for the old site.
        store.sensor_types_generation.begin();
        store.clear_sensor_types();

        if site.is_empty() {
            return Ok(());
        }
        self.load_sensor_types(&site).await.map(|_| ())
    }

    /// Select a site, keeping the current limit.
    pub async fn select_site(&self, site: impl Into<String>) -> Result<(), CoreError> {
        let filters = Filters {
            site: site.into(),
            ..self.store().filters()
        };
        self.set_filters(filters).await
    }

    /// Select a sensor type within the current site.
    pub async fn select_sensor_type(&self, sensor_type: impl Into<String>) -> Result<(), CoreError> {
        let filters = Filters {
            sensor_type: sensor_type.into(),
            ..self.store().filters()
        };
        self.set_filters(filters).await
    }

    pub async fn set_limit(&self, limit: u32) -> Result<(), CoreError> {
        let filters = Filters {
            limit,
            ..self.store().filters()
        };
        self.set_filters(filters).await
    }

    /// Fetch readings for the current filters.
    ///
    /// Needs both site and sensor type; otherwise the banner gets a
    /// validation message and no call is made. `loading` is set for the
    /// duration of the current request.
    pub async fn load_readings(&self) -> Result<Arc<Vec<Reading>>, CoreError> {
        let store = self.store();
        let filters = store.filters();
        if !filters.is_searchable() {
            let err = CoreError::validation("Select a site and a sensor type first");
            store.set_error(err.to_string());
            return Err(err);
        }

        let ticket = store.readings_generation.begin();
        store.set_loading(true);
        store.clear_error();

        let result = self.inner.api.list_readings(&filters.to_query()).await;
        let current = store.readings_generation.is_current(ticket);

        let outcome = match result {
            Ok(wire) => {
                let readings: Vec<Reading> = wire.into_iter().map(Reading::from_wire).collect();
                debug!(
                    site = %filters.site,
                    sensor_type = %filters.sensor_type,
                    count = readings.len(),
                    "readings loaded"
                );
                if current {
                    store.replace_readings(readings);
                    Ok(store.readings())
                } else {
                    Ok(Arc::new(readings))
                }
            }
            Err(e) => {
                let err = CoreError::classify(e, Operation::LoadReadings);
                if current {
                    store.set_error(err.to_string());
                }
                Err(err)
            }
        };

        if current {
            store.set_loading(false);
        } else {
            debug!("dropping superseded readings response");
        }
        outcome
    }

    /// Validate and store a new reading.
    ///
    /// On success, reloads readings when the reading falls under the active
    /// filters, then always refreshes the site list. The banner is never
    /// touched by a failed create.
    pub async fn create_reading(&self, draft: &ReadingDraft) -> Result<CreatedReading, CoreError> {
        let reading = draft.validate()?;
        let created = self
            .inner
            .api
            .create_reading(&reading)
            .await
            .map_err(|e| CoreError::classify(e, Operation::CreateReading))?;

        info!(
            site = %reading.sede,
            sensor_type = %reading.sensor_type,
            sensor_id = %reading.sensor_id,
            timestamp = ?created.timestamp,
            "reading created"
        );

        if self
            .store()
            .filters()
            .matches(&reading.sede, &reading.sensor_type)
        {
            if let Err(e) = self.load_readings().await {
                debug!(error = %e, "reload after create failed");
            }
        }
        if let Err(e) = self.load_sites().await {
            debug!(error = %e, "site refresh after create failed");
        }

        Ok(created)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn offline_dashboard() -> Dashboard {
        Dashboard::new(&DashboardConfig {
            endpoints: vec!["http://127.0.0.1:1".into()],
            limit: 500,
            ..DashboardConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn new_clamps_initial_limit() {
        let dashboard = offline_dashboard();
        assert_eq!(dashboard.store().filters().limit, 100);
        assert_eq!(dashboard.api_status(), ConnectionStatus::Checking);
    }

    #[test]
    fn new_rejects_empty_endpoint_list() {
        let result = Dashboard::new(&DashboardConfig {
            endpoints: Vec::new(),
            ..DashboardConfig::default()
        });
        assert!(matches!(result, Err(CoreError::Config { .. })));
    }

    #[tokio::test]
    async fn limit_change_keeps_site_and_type() {
        let dashboard = offline_dashboard();
        dashboard
            .set_filters(Filters {
                site: String::new(),
                sensor_type: "temperature".into(),
                limit: 0,
            })
            .await
            .unwrap();

        let filters = dashboard.store().filters();
        assert_eq!(filters.sensor_type, "temperature");
        assert_eq!(filters.limit, 1);
    }

    #[test]
    fn snapshot_reflects_store() {
        let dashboard = offline_dashboard();
        dashboard.store().set_error("hello");
        let state = dashboard.snapshot();
        assert_eq!(state.error.as_deref(), Some("hello"));
        assert!(!state.loading);
        assert_eq!(state.active_label, EndpointLabel::LocalBackend);
    }
}
