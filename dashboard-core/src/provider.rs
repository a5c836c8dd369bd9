use crate::{
    Config,
    error::Result,
    model::{AirQuality, Coordinates, CurrentConditions, ForecastEntry},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::{fmt::Debug, time::Duration};

pub mod openweather;

/// Default HTTP timeout when the config does not set one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Source of weather data for the dashboard.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for a provider query such as `"Baguio,PH"`.
    async fn current(&self, query: &str) -> Result<CurrentConditions>;

    /// Daily forecast, one reading per calendar day, chronological.
    async fn forecast(&self, query: &str) -> Result<Vec<ForecastEntry>>;

    async fn air_quality(&self, coord: Coordinates) -> Result<AirQuality>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.require_api_key()?;
    let timeout = config
        .request_timeout_secs
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_TIMEOUT);

    let mut provider = OpenWeatherProvider::with_timeout(api_key.to_owned(), timeout)?;
    if let Some(base) = config.api_base.as_deref() {
        provider = provider.with_base_url(base);
    }

    Ok(Box::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(&cfg).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("No OpenWeather API key configured"));
        assert!(msg.contains("Hint: run `weather-dash configure`"));
    }

    #[test]
    fn provider_from_config_works_when_configured() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());
        cfg.api_base = Some("http://localhost:9999/data/2.5/".to_string());
        cfg.request_timeout_secs = Some(3);

        let provider = provider_from_config(&cfg);
        assert!(provider.is_ok());
    }
}
