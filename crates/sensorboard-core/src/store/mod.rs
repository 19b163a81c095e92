// ── Sensor state store ──
//
// Single-writer state container for the dashboard. Consumers read
// snapshots or subscribe; only `Dashboard` mutates, through the named
// actions in `sensor_store`.

mod generation;
mod sensor_store;

pub(crate) use generation::Generation;
pub use sensor_store::SensorStore;
