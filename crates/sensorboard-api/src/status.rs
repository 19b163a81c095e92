use serde::Serialize;
use strum::Display;

/// Connectivity as observed by the client.
///
/// Starts at `Checking`. Each published call outcome moves it to
/// `Connected` or `Error`; it never returns to `Checking`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, Serialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ConnectionStatus {
    #[default]
    Checking,
    Connected,
    Error,
}

impl ConnectionStatus {
    /// Badge text for display.
    pub fn badge(self) -> &'static str {
        match self {
            Self::Checking => "Checking...",
            Self::Connected => "Connected",
            Self::Error => "Error",
        }
    }
}
