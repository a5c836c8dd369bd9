use std::ops::RangeInclusive;

use crate::model::Coordinates;

/// A rectangular area searches are restricted to.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub name: String,
    /// ISO 3166 country code appended to bare city queries.
    pub country_code: String,
    pub lat: RangeInclusive<f64>,
    pub lon: RangeInclusive<f64>,
}

impl Region {
    /// Approximate bounding box of Luzon.
    pub fn luzon() -> Self {
        Self {
            name: "Luzon, Philippines".to_string(),
            country_code: "PH".to_string(),
            lat: 12.5..=19.0,
            lon: 119.0..=124.5,
        }
    }

    pub fn contains(&self, coord: Coordinates) -> bool {
        self.lat.contains(&coord.lat) && self.lon.contains(&coord.lon)
    }

    /// Build the provider query for `city`, pinning it to this region's
    /// country unless the name already mentions the country code.
    pub fn query_for(&self, city: &str) -> String {
        let city = city.trim();
        let code = self.country_code.to_lowercase();
        if city.to_lowercase().contains(&code) {
            city.to_string()
        } else {
            format!("{city},{}", self.country_code)
        }
    }
}

impl Default for Region {
    fn default() -> Self {
        Self::luzon()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luzon_contains_manila() {
        let region = Region::luzon();
        assert!(region.contains(Coordinates { lat: 14.6, lon: 120.98 }));
    }

    #[test]
    fn luzon_excludes_cebu_and_davao() {
        let region = Region::luzon();
        assert!(!region.contains(Coordinates { lat: 10.32, lon: 123.89 }));
        assert!(!region.contains(Coordinates { lat: 7.07, lon: 125.61 }));
    }

    #[test]
    fn bounds_are_inclusive() {
        let region = Region::luzon();
        assert!(region.contains(Coordinates { lat: 12.5, lon: 124.5 }));
        assert!(region.contains(Coordinates { lat: 19.0, lon: 119.0 }));
        assert!(!region.contains(Coordinates { lat: 19.01, lon: 121.0 }));
    }

    #[test]
    fn query_appends_country_code() {
        let region = Region::luzon();
        assert_eq!(region.query_for(" Baguio "), "Baguio,PH");
    }

    #[test]
    fn query_keeps_names_mentioning_country() {
        let region = Region::luzon();
        assert_eq!(region.query_for("Manila PH"), "Manila PH");
        // Substring match, so names containing "ph" are left alone too.
        assert_eq!(region.query_for("Alphaville"), "Alphaville");
    }
}
