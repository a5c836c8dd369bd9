//! Plain-text painting of dashboard data.

use chrono::{DateTime, Local, Utc};
use dashboard_core::{ForecastEntry, ForecastView, Snapshot};

const ICON_BASE: &str = "https://openweathermap.org/img/wn";

/// Large icon used for current conditions.
pub fn icon_url(icon: &str) -> String {
    format!("{ICON_BASE}/{icon}@2x.png")
}

/// Small icon used next to forecast rows.
pub fn forecast_icon_url(icon: &str) -> String {
    format!("{ICON_BASE}/{icon}.png")
}

/// "manila" -> "Manila"
pub fn display_city(city: &str) -> String {
    let mut chars = city.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn current(snapshot: &Snapshot, favorite: bool) -> String {
    let c = &snapshot.current;
    let date = c.observation_time.with_timezone(&Local).format("%A, %B %-d, %Y");
    let star = if favorite { " ★" } else { "" };

    format!(
        "{name}{star}\n\
         {date}\n  \
         {temp}°C  {desc}\n  \
         Humidity:    {humidity}%\n  \
         Wind:        {wind} m/s\n  \
         Air quality: {aqi}\n  \
         Icon:        {icon}\n",
        name = c.location_name,
        temp = c.temperature_c.round(),
        desc = c.description.to_uppercase(),
        humidity = c.humidity_pct,
        wind = c.wind_speed_mps,
        aqi = snapshot.air_quality,
        icon = icon_url(&c.icon),
    )
}

pub fn forecast_row(entry: &ForecastEntry) -> String {
    let day = entry
        .time()
        .map(|t: DateTime<Utc>| t.with_timezone(&Local).format("%a").to_string())
        .unwrap_or_else(|| "---".to_string());

    format!(
        "{day:<4} {:>4}°C  {:<20} {:>3}% humidity  {}",
        entry.temperature_c.round(),
        entry.description.to_uppercase(),
        entry.humidity_pct,
        forecast_icon_url(&entry.icon),
    )
}

pub fn forecast(view: &ForecastView) -> String {
    let mut lines = Vec::with_capacity(view.shown() + 2);

    if view.filter().is_empty() {
        lines.push(format!("Forecast (sort: {})", view.sort()));
    } else {
        lines.push(format!("Forecast (sort: {}, filter: \"{}\")", view.sort(), view.filter()));
    }

    let visible = view.visible_entries();
    if visible.is_empty() {
        lines.push("  No forecast entries match.".to_string());
    }
    lines.extend(visible.into_iter().map(|entry| format!("  {}", forecast_row(entry))));

    if view.has_more() {
        lines.push(format!(
            "  … {} of {} shown, load more to see the rest",
            view.shown(),
            view.matching()
        ));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

pub fn favorites(cities: &[String], active: Option<&str>) -> String {
    if cities.is_empty() {
        return "No favorites yet.\n".to_string();
    }

    let active = active.map(|a| a.trim().to_lowercase());
    let mut out = String::from("Favorites:\n");
    for city in cities {
        let marker = if active.as_deref() == Some(city.as_str()) { "★" } else { " " };
        out.push_str(&format!("  {marker} {}\n", display_city(city)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(temp: f64, description: &str) -> ForecastEntry {
        ForecastEntry {
            timestamp: 1_760_788_800,
            temperature_c: temp,
            humidity_pct: 75,
            description: description.to_string(),
            icon: "10d".to_string(),
        }
    }

    #[test]
    fn display_city_capitalizes_first_letter() {
        assert_eq!(display_city("manila"), "Manila");
        assert_eq!(display_city("quezon city"), "Quezon city");
        assert_eq!(display_city(""), "");
    }

    #[test]
    fn icon_url_format() {
        assert_eq!(icon_url("10d"), "https://openweathermap.org/img/wn/10d@2x.png");
    }

    #[test]
    fn forecast_row_rounds_and_uppercases() {
        let row = forecast_row(&entry(28.6, "light rain"));
        assert!(row.contains("29°C"));
        assert!(row.contains("LIGHT RAIN"));
        assert!(row.contains("75% humidity"));
        assert!(row.ends_with("https://openweathermap.org/img/wn/10d.png"));
    }

    #[test]
    fn current_block_lists_every_field() {
        let snapshot = Snapshot {
            query: "Baguio,PH".to_string(),
            current: dashboard_core::CurrentConditions {
                location_name: "Baguio".to_string(),
                coord: dashboard_core::Coordinates { lat: 16.41, lon: 120.59 },
                temperature_c: 19.6,
                humidity_pct: 91,
                wind_speed_mps: 2.4,
                description: "light rain".to_string(),
                icon: "10d".to_string(),
                observation_time: Utc::now(),
            },
            air_quality: dashboard_core::AirQuality { aqi: 3 },
            fetched_at: Utc::now(),
        };

        let out = current(&snapshot, true);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Baguio ★");
        assert_eq!(lines[2], "  20°C  LIGHT RAIN");
        assert_eq!(lines[3], "  Humidity:    91%");
        assert_eq!(lines[4], "  Wind:        2.4 m/s");
        assert_eq!(lines[5], "  Air quality: 3 - Moderate");
        assert_eq!(lines[6], "  Icon:        https://openweathermap.org/img/wn/10d@2x.png");
        assert!(!current(&snapshot, false).starts_with("Baguio ★"));
    }

    #[test]
    fn forecast_shows_load_more_hint() {
        let mut view = ForecastView::new();
        view.set_forecast_data((0..5u8).map(|i| entry(20.0 + f64::from(i), "clouds")).collect());

        let out = forecast(&view);
        assert!(out.contains("3 of 5 shown"));

        view.reveal_all();
        let out = forecast(&view);
        assert!(!out.contains("load more"));
    }

    #[test]
    fn forecast_empty_filter_message() {
        let mut view = ForecastView::new();
        view.set_forecast_data(vec![entry(30.0, "clear sky")]);
        view.set_filter("rain");

        let out = forecast(&view);
        assert!(out.contains("filter: \"rain\""));
        assert!(out.contains("No forecast entries match."));
    }

    #[test]
    fn favorites_marks_active_city() {
        let cities = vec!["manila".to_string(), "baguio".to_string()];
        let out = favorites(&cities, Some("Baguio"));
        assert!(out.contains("★ Baguio"));
        assert!(out.contains("  Manila"));
        assert_eq!(favorites(&[], None), "No favorites yet.\n");
    }
}
