//! Search orchestration: validate, fetch, region-check, then commit.

use chrono::Utc;

use crate::{
    error::{DashboardError, Result},
    forecast::ForecastView,
    model::Snapshot,
    provider::WeatherProvider,
    region::Region,
    validate::validate_city,
};

/// Dashboard state for one user session.
///
/// `search` takes `&mut self`, so a second search cannot start while one is
/// in flight, and state is only replaced once every fetch has succeeded.
#[derive(Debug)]
pub struct Dashboard {
    provider: Box<dyn WeatherProvider>,
    region: Region,
    snapshot: Option<Snapshot>,
    forecast: ForecastView,
}

impl Dashboard {
    pub fn new(provider: Box<dyn WeatherProvider>, region: Region) -> Self {
        Self {
            provider,
            region,
            snapshot: None,
            forecast: ForecastView::new(),
        }
    }

    /// Fetch current conditions, forecast and air quality for `city`.
    ///
    /// On any failure the previous snapshot and forecast are kept as they
    /// were.
    pub async fn search(&mut self, city: &str) -> Result<&Snapshot> {
        let city = validate_city(city)?;
        let query = self.region.query_for(city);

        let current = self.provider.current(&query).await?;
        if !self.region.contains(current.coord) {
            tracing::warn!(
                %query,
                lat = current.coord.lat,
                lon = current.coord.lon,
                "location outside region"
            );
            return Err(DashboardError::OutOfRegion(self.region.name.clone()));
        }

        let daily = self.provider.forecast(&query).await?;
        let air_quality = self.provider.air_quality(current.coord).await?;

        tracing::info!(
            %query,
            location = %current.location_name,
            days = daily.len(),
            aqi = air_quality.aqi,
            "dashboard updated"
        );

        self.forecast.set_forecast_data(daily);
        Ok(self.snapshot.insert(Snapshot {
            query,
            current,
            air_quality,
            fetched_at: Utc::now(),
        }))
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn forecast(&self) -> &ForecastView {
        &self.forecast
    }

    pub fn forecast_mut(&mut self) -> &mut ForecastView {
        &mut self.forecast
    }

    pub fn region(&self) -> &Region {
        &self.region
    }
}
