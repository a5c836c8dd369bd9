//! Core library for the `weather-dash` CLI.
//!
//! This crate defines:
//! - The forecast view (sort, filter, incremental reveal)
//! - The favorites store and its key-value persistence
//! - City validation and region restriction
//! - The OpenWeather provider and search orchestration
//! - Configuration & credentials handling
//!
//! It is used by `dashboard-cli`, but rendering is left to the caller: the
//! core only exposes ready-to-paint data.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod favorites;
pub mod forecast;
pub mod model;
pub mod provider;
pub mod region;
pub mod storage;
pub mod validate;

pub use config::Config;
pub use dashboard::Dashboard;
pub use error::{DashboardError, StorageError};
pub use favorites::FavoritesStore;
pub use forecast::{ForecastView, SortMode};
pub use model::{AirQuality, Coordinates, CurrentConditions, ForecastEntry, Snapshot};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider};
pub use region::Region;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use validate::validate_city;
