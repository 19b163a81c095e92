// sensorboard-api: Async client for the sensor-reading service.
//
// One `ApiClient` sweeps an ordered list of candidate base URLs per call and
// tracks which endpoint answered last. Typed endpoint methods live in
// `sensors`, wire shapes in `models`.

pub mod candidates;
pub mod client;
pub mod error;
pub mod models;
mod sensors;
pub mod status;
pub mod transport;

pub use candidates::{CandidateSet, EndpointLabel};
pub use client::{ApiClient, ApiRequest};
pub use error::Error;
pub use models::{CreatedReading, HealthReport, NewReading, ReadingQuery, WireReading};
pub use sensors::{DEFAULT_TIMEOUT, HEALTH_TIMEOUT, SITES_TIMEOUT};
pub use status::ConnectionStatus;
pub use transport::TransportConfig;
