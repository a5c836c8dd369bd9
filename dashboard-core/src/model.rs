use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Geographic coordinates as reported by the weather provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// One day's representative forecast sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
    pub temperature_c: f64,
    pub humidity_pct: u8,
    pub description: String,
    pub icon: String,
}

impl ForecastEntry {
    pub fn time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub location_name: String,
    pub coord: Coordinates,
    pub temperature_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub description: String,
    pub icon: String,
    pub observation_time: DateTime<Utc>,
}

/// Air quality index on the provider's 1..=5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirQuality {
    pub aqi: u8,
}

impl AirQuality {
    pub fn label(&self) -> &'static str {
        match self.aqi {
            1 => "Good",
            2 => "Fair",
            3 => "Moderate",
            4 => "Poor",
            5 => "Very Poor",
            _ => "Unknown",
        }
    }
}

impl std::fmt::Display for AirQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.aqi, self.label())
    }
}

/// Everything a successful search produced apart from the forecast list,
/// which is handed to the [`ForecastView`](crate::ForecastView).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub query: String,
    pub current: CurrentConditions,
    pub air_quality: AirQuality,
    pub fetched_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn air_quality_labels() {
        assert_eq!(AirQuality { aqi: 1 }.label(), "Good");
        assert_eq!(AirQuality { aqi: 3 }.label(), "Moderate");
        assert_eq!(AirQuality { aqi: 5 }.label(), "Very Poor");
        assert_eq!(AirQuality { aqi: 0 }.label(), "Unknown");
        assert_eq!(AirQuality { aqi: 9 }.label(), "Unknown");
    }

    #[test]
    fn air_quality_display() {
        assert_eq!(AirQuality { aqi: 2 }.to_string(), "2 - Fair");
    }

    #[test]
    fn forecast_entry_time() {
        let entry = ForecastEntry {
            timestamp: 1_700_000_000,
            temperature_c: 30.0,
            humidity_pct: 70,
            description: "clear sky".into(),
            icon: "01d".into(),
        };
        assert_eq!(entry.time().map(|t| t.timestamp()), Some(1_700_000_000));
    }
}
