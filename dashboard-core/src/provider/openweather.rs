use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use std::time::Duration;

use crate::{
    error::{DashboardError, Result},
    model::{AirQuality, Coordinates, CurrentConditions, ForecastEntry},
};

use super::{DEFAULT_TIMEOUT, WeatherProvider};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/";

/// Forecast slots at this time of day are kept as the day's reading.
const DAILY_SLOT: &str = "12:00:00";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_timeout(api_key, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(api_key: String, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| DashboardError::Transport { endpoint: "client", source })?;

        Ok(Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            http,
        })
    }

    /// Point the provider at another host, e.g. a mock server.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        let mut base = base_url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        self.base_url = base;
        self
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!(%url, "OpenWeather request");

        let res = self
            .http
            .get(&url)
            .query(params)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|source| DashboardError::Transport { endpoint, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| DashboardError::Transport { endpoint, source })?;

        if !status.is_success() {
            return Err(status_error(endpoint, status, &body));
        }

        serde_json::from_str(&body).map_err(|source| DashboardError::Parse { endpoint, source })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, query: &str) -> Result<CurrentConditions> {
        let parsed: OwCurrentResponse = self
            .get_json("weather", &[("q", query), ("units", "metric")])
            .await?;

        let observation_time = unix_to_utc(parsed.dt).unwrap_or_else(Utc::now);
        let (description, icon) = first_weather(parsed.weather);

        Ok(CurrentConditions {
            location_name: parsed.name,
            coord: Coordinates { lat: parsed.coord.lat, lon: parsed.coord.lon },
            temperature_c: parsed.main.temp,
            humidity_pct: parsed.main.humidity,
            wind_speed_mps: parsed.wind.speed,
            description,
            icon,
            observation_time,
        })
    }

    async fn forecast(&self, query: &str) -> Result<Vec<ForecastEntry>> {
        let parsed: OwForecastResponse = self
            .get_json("forecast", &[("q", query), ("units", "metric")])
            .await?;

        Ok(daily_readings(parsed.list))
    }

    async fn air_quality(&self, coord: Coordinates) -> Result<AirQuality> {
        let lat = coord.lat.to_string();
        let lon = coord.lon.to_string();
        let parsed: OwAirResponse = self
            .get_json("air_pollution", &[("lat", lat.as_str()), ("lon", lon.as_str())])
            .await?;

        parsed
            .list
            .first()
            .map(|s| AirQuality { aqi: s.main.aqi })
            .ok_or(DashboardError::MissingData("air_pollution"))
    }
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    coord: OwCoord,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    dt_txt: String,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct OwAirMain {
    aqi: u8,
}

#[derive(Debug, Deserialize)]
struct OwAirSample {
    main: OwAirMain,
}

#[derive(Debug, Deserialize)]
struct OwAirResponse {
    list: Vec<OwAirSample>,
}

#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: Option<String>,
}

/// Keep the midday slot of each day from the 3-hourly forecast.
fn daily_readings(list: Vec<OwForecastEntry>) -> Vec<ForecastEntry> {
    list.into_iter()
        .filter(|e| e.dt_txt.contains(DAILY_SLOT))
        .map(|e| {
            let (description, icon) = first_weather(e.weather);
            ForecastEntry {
                timestamp: e.dt,
                temperature_c: e.main.temp,
                humidity_pct: e.main.humidity,
                description,
                icon,
            }
        })
        .collect()
}

fn first_weather(weather: Vec<OwWeather>) -> (String, String) {
    weather
        .into_iter()
        .next()
        .map(|w| (w.description, w.icon))
        .unwrap_or_else(|| ("Unknown".to_string(), String::new()))
}

fn status_error(endpoint: &'static str, status: StatusCode, body: &str) -> DashboardError {
    if status == StatusCode::UNAUTHORIZED {
        return DashboardError::InvalidApiKey;
    }

    if endpoint == "weather" {
        let message = serde_json::from_str::<OwErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "City not found".to_string());
        return DashboardError::NotFound(message);
    }

    DashboardError::Api {
        endpoint,
        status: status.as_u16(),
        body: truncate_body(body),
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
