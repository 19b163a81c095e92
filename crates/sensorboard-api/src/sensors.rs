// Sensor-service endpoints
//
// Thin typed wrappers over `ApiClient::call`. Each carries its endpoint's
// timeout, which a client-wide configured timeout replaces.

use std::time::Duration;

use tracing::debug;

use crate::client::{ApiClient, ApiRequest};
use crate::error::Error;
use crate::models::{CreatedReading, HealthReport, NewReading, ReadingQuery, WireReading};

/// Per-attempt timeout when neither the endpoint nor the client sets one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Timeout of the lightweight `GET /` probe.
pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);
/// Site listing scans the whole table server-side and gets more headroom.
pub const SITES_TIMEOUT: Duration = Duration::from_secs(15);

impl ApiClient {
    /// Probe the service root.
    ///
    /// `GET /`. Any 2xx JSON body is accepted; unknown shapes yield a
    /// default report.
    pub async fn health(&self) -> Result<HealthReport, Error> {
        let req = ApiRequest::get("/").timeout(HEALTH_TIMEOUT);
        let value: serde_json::Value = self.call(&req).await?;
        Ok(HealthReport::from_value(value))
    }

    /// List all known sites.
    ///
    /// `GET /sedes`
    pub async fn list_sites(&self) -> Result<Vec<String>, Error> {
        let req = ApiRequest::get("/sedes").timeout(SITES_TIMEOUT);
        let sites: Option<Vec<String>> = self.call(&req).await?;
        Ok(sites.unwrap_or_default())
    }

    /// List sensor types recorded for `site`.
    ///
    /// `GET /sensor_types?sede={site}`
    pub async fn list_sensor_types(&self, site: &str) -> Result<Vec<String>, Error> {
        debug!(site, "listing sensor types");
        let req = ApiRequest::get("/sensor_types")
            .query("sede", site)
            .timeout(DEFAULT_TIMEOUT);
        let types: Option<Vec<String>> = self.call(&req).await?;
        Ok(types.unwrap_or_default())
    }

    /// List readings for a site and sensor type.
    ///
    /// `GET /readings?sede=&sensor_type=&limit=`
    pub async fn list_readings(&self, query: &ReadingQuery) -> Result<Vec<WireReading>, Error> {
        let req = ApiRequest::get("/readings")
            .query("sede", &query.sede)
            .query("sensor_type", &query.sensor_type)
            .query("limit", query.limit)
            .timeout(DEFAULT_TIMEOUT);
        let readings: Option<Vec<WireReading>> = self.call(&req).await?;
        Ok(readings.unwrap_or_default())
    }

    /// Store a new reading.
    ///
    /// `POST /readings`
    pub async fn create_reading(&self, reading: &NewReading) -> Result<CreatedReading, Error> {
        let req = ApiRequest::post("/readings", reading)?.timeout(DEFAULT_TIMEOUT);
        let created: Option<CreatedReading> = self.call(&req).await?;
        Ok(created.unwrap_or_default())
    }
}
