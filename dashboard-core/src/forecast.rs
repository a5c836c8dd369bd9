//! Sorted, filtered and paginated projection over the daily forecast.
//!
//! [`ForecastView`] owns the raw daily entries plus the user's sort mode and
//! text filter. Every state transition recomputes the projection in full and
//! restarts pagination at [`INITIAL_PAGE`] entries; [`ForecastView::reveal_all`]
//! then extends it up to [`REVEAL_CAP`].

use std::{fmt, str::FromStr};

use crate::model::ForecastEntry;

/// Entries revealed right after data, sort or filter changes.
pub const INITIAL_PAGE: usize = 3;

/// Upper bound for the "load more" action, independent of how many entries
/// the projection holds.
pub const REVEAL_CAP: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortMode {
    /// Arrival order.
    #[default]
    Default,
    TempAsc,
    TempDesc,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Default => "default",
            SortMode::TempAsc => "temp-asc",
            SortMode::TempDesc => "temp-desc",
        }
    }

    pub const fn all() -> &'static [SortMode] {
        &[SortMode::Default, SortMode::TempAsc, SortMode::TempDesc]
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "default" => Ok(SortMode::Default),
            "temp-asc" => Ok(SortMode::TempAsc),
            "temp-desc" => Ok(SortMode::TempDesc),
            _ => Err(anyhow::anyhow!(
                "Unknown sort mode '{value}'. Supported modes: default, temp-asc, temp-desc."
            )),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ForecastView {
    daily: Vec<ForecastEntry>,
    sort: SortMode,
    filter: String,
    /// Indices into `daily`, filtered then sorted.
    sorted_filtered: Vec<usize>,
    shown: usize,
}

impl ForecastView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the daily entries and restart with default sort, no filter and
    /// the initial page revealed.
    pub fn set_forecast_data(&mut self, entries: Vec<ForecastEntry>) {
        tracing::debug!(entries = entries.len(), "forecast data replaced");
        self.daily = entries;
        self.sort = SortMode::Default;
        self.filter.clear();
        self.recompute();
    }

    pub fn set_sort(&mut self, mode: SortMode) {
        tracing::debug!(sort = %mode, "forecast sort changed");
        self.sort = mode;
        self.recompute();
    }

    /// Case-insensitive substring filter on the description. Surrounding
    /// whitespace is ignored; an empty filter matches everything.
    pub fn set_filter(&mut self, text: &str) {
        self.filter = text.trim().to_lowercase();
        tracing::debug!(filter = %self.filter, "forecast filter changed");
        self.recompute();
    }

    /// The "load more" action.
    pub fn reveal_all(&mut self) {
        let target = REVEAL_CAP.min(self.sorted_filtered.len());
        self.shown = self.shown.max(target);
    }

    pub fn visible_entries(&self) -> Vec<&ForecastEntry> {
        self.sorted_filtered[..self.shown]
            .iter()
            .map(|&i| &self.daily[i])
            .collect()
    }

    pub fn has_more(&self) -> bool {
        self.shown < self.sorted_filtered.len()
    }

    pub fn sort(&self) -> SortMode {
        self.sort
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn shown(&self) -> usize {
        self.shown
    }

    /// Length of the sorted/filtered projection.
    pub fn matching(&self) -> usize {
        self.sorted_filtered.len()
    }

    pub fn daily(&self) -> &[ForecastEntry] {
        &self.daily
    }

    fn recompute(&mut self) {
        let mut indices: Vec<usize> = self
            .daily
            .iter()
            .enumerate()
            .filter(|(_, e)| {
                self.filter.is_empty() || e.description.to_lowercase().contains(&self.filter)
            })
            .map(|(i, _)| i)
            .collect();

        // `sort_by` is stable, so equal temperatures keep arrival order.
        let daily = &self.daily;
        match self.sort {
            SortMode::Default => {}
            SortMode::TempAsc => indices
                .sort_by(|&a, &b| daily[a].temperature_c.total_cmp(&daily[b].temperature_c)),
            SortMode::TempDesc => indices
                .sort_by(|&a, &b| daily[b].temperature_c.total_cmp(&daily[a].temperature_c)),
        }

        self.sorted_filtered = indices;
        self.shown = INITIAL_PAGE.min(self.sorted_filtered.len());
    }
}
