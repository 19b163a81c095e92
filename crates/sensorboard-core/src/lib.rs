// sensorboard-core: State store and intents between sensorboard-api and consumers.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod store;
pub mod time;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::DashboardConfig;
pub use dashboard::{Dashboard, DashboardState};
pub use error::{CoreError, Operation, SERVICE_UNAVAILABLE_MESSAGE};
pub use model::{Filters, Reading, ReadingDraft, Timestamp};
pub use store::SensorStore;

// Connectivity and response types surface unchanged from the API layer.
pub use sensorboard_api::{ConnectionStatus, CreatedReading, EndpointLabel, HealthReport};
