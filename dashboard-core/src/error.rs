//! Error kinds surfaced by the dashboard core.
//!
//! Every failed search resolves to exactly one [`DashboardError`]; its
//! `Display` output is the message shown to the user.

use std::path::PathBuf;

use thiserror::Error;

/// Failures of the durable key-value layer behind the favorites store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Stored value for '{key}' is not valid: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode value for '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not determine platform data directory")]
    NoDataDir,
}

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Please enter a city name.")]
    EmptyCity,

    #[error("Invalid characters in city name.")]
    InvalidCityFormat,

    #[error("Invalid API Key. Please check your configuration.")]
    InvalidApiKey,

    /// The provider rejected the city; carries the provider's own message.
    #[error("{0}")]
    NotFound(String),

    #[error("Please search for a city within {0}.")]
    OutOfRegion(String),

    #[error("OpenWeather {endpoint} request failed with status {status}: {body}")]
    Api {
        endpoint: &'static str,
        status: u16,
        body: String,
    },

    #[error("Failed to send request to OpenWeather ({endpoint})")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse OpenWeather {endpoint} JSON")]
    Parse {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("OpenWeather {0} response contained no data")]
    MissingData(&'static str),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type Result<T, E = DashboardError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_facing_messages() {
        assert_eq!(DashboardError::EmptyCity.to_string(), "Please enter a city name.");
        assert_eq!(
            DashboardError::OutOfRegion("Luzon, Philippines".into()).to_string(),
            "Please search for a city within Luzon, Philippines."
        );
        assert_eq!(DashboardError::NotFound("city not found".into()).to_string(), "city not found");
    }

    #[test]
    fn storage_error_converts() {
        let err: DashboardError = StorageError::NoDataDir.into();
        assert!(matches!(err, DashboardError::Storage(StorageError::NoDataDir)));
        assert_eq!(err.to_string(), "Could not determine platform data directory");
    }
}
