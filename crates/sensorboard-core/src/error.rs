// ── Core error types ──
//
// User-facing errors from sensorboard-core. Consumers never match on HTTP
// transport details; `CoreError::classify` folds a `sensorboard_api::Error`
// into one of four classes using the same policy on every path.

use strum::Display;
use thiserror::Error;

/// Banner text for HTTP 503: the service answers but its database does not.
pub const SERVICE_UNAVAILABLE_MESSAGE: &str =
    "Service unavailable: the API is up but its storage backend is unreachable.";

/// Banner text when no candidate endpoint produced a response.
pub const CONNECTION_MESSAGE: &str =
    "Connection error: could not reach any configured API endpoint.";

/// The operation a failure happened in; picks the generic fallback message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
    Health,
    LoadSites,
    LoadSensorTypes,
    LoadReadings,
    CreateReading,
}

impl Operation {
    fn fallback_message(self) -> &'static str {
        match self {
            Self::Health => "Health check failed",
            Self::LoadSites => "Failed to load sites",
            Self::LoadSensorTypes => "Failed to load sensor types",
            Self::LoadReadings => "Failed to load readings",
            Self::CreateReading => "Failed to create reading",
        }
    }
}

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No response at all from any candidate (refused, reset, timed out).
    #[error("{CONNECTION_MESSAGE}")]
    Connection { reason: String },

    /// HTTP 503 from the service.
    #[error("{SERVICE_UNAVAILABLE_MESSAGE}")]
    ServiceUnavailable,

    /// Missing or invalid user input, caught before any network call.
    #[error("{message}")]
    Validation { message: String },

    /// Any other non-2xx answer, or a body that could not be decoded.
    #[error("{message}")]
    Remote { status: Option<u16>, message: String },

    /// Unusable client configuration (no endpoints, malformed URL).
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Classify a transport-layer error raised during `op`.
    pub fn classify(err: sensorboard_api::Error, op: Operation) -> Self {
        use sensorboard_api::Error as ApiError;

        if err.is_connection() {
            return Self::Connection {
                reason: err.to_string(),
            };
        }
        if err.is_service_unavailable() {
            return Self::ServiceUnavailable;
        }

        match err {
            ApiError::Api { status, detail } => Self::Remote {
                status: Some(status),
                message: detail.unwrap_or_else(|| op.fallback_message().to_owned()),
            },
            ApiError::NoCandidates | ApiError::InvalidUrl(_) | ApiError::ClientBuild(_) => {
                Self::Config {
                    message: err.to_string(),
                }
            }
            ApiError::Deserialization { .. }
            | ApiError::Encode(_)
            | ApiError::Transport(_)
            | ApiError::Timeout { .. } => Self::Remote {
                status: None,
                message: op.fallback_message().to_owned(),
            },
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

impl From<sensorboard_api::Error> for CoreError {
    fn from(err: sensorboard_api::Error) -> Self {
        Self::classify(err, Operation::Health)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sensorboard_api::Error as ApiError;

    #[test]
    fn timeout_is_a_connection_error() {
        let err = CoreError::classify(
            ApiError::Timeout { timeout_secs: 10 },
            Operation::LoadReadings,
        );
        assert!(matches!(err, CoreError::Connection { .. }));
        assert_eq!(err.to_string(), CONNECTION_MESSAGE);
    }

    #[test]
    fn status_503_gets_the_storage_hint() {
        let err = CoreError::classify(
            ApiError::Api {
                status: 503,
                detail: Some("Cassandra no está conectado".into()),
            },
            Operation::LoadSites,
        );
        assert!(matches!(err, CoreError::ServiceUnavailable));
        assert_eq!(err.to_string(), SERVICE_UNAVAILABLE_MESSAGE);
    }

    #[test]
    fn other_status_surfaces_detail() {
        let err = CoreError::classify(
            ApiError::Api {
                status: 422,
                detail: Some("value must be a float".into()),
            },
            Operation::CreateReading,
        );
        assert_eq!(err.to_string(), "value must be a float");
    }

    #[test]
    fn other_status_without_detail_uses_operation_fallback() {
        let err = CoreError::classify(
            ApiError::Api {
                status: 500,
                detail: None,
            },
            Operation::LoadReadings,
        );
        match err {
            CoreError::Remote { status, ref message } => {
                assert_eq!(status, Some(500));
                assert_eq!(message, "Failed to load readings");
            }
            other => panic!("expected Remote, got: {other:?}"),
        }
    }

    #[test]
    fn undecodable_body_uses_operation_fallback() {
        let err = CoreError::classify(
            ApiError::Deserialization {
                message: "expected value".into(),
                body: "<html>".into(),
            },
            Operation::CreateReading,
        );
        assert_eq!(err.to_string(), "Failed to create reading");
    }

    #[test]
    fn empty_candidate_list_is_a_config_error() {
        let err = CoreError::from(ApiError::NoCandidates);
        assert!(matches!(err, CoreError::Config { .. }));
    }
}
