use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// A captured WGS84 position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> AppResult<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(AppError::InvalidCoordinates(format!(
                "latitude {} out of range [-90, 90]",
                latitude
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(AppError::InvalidCoordinates(format!(
                "longitude {} out of range [-180, 180]",
                longitude
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn maps_url(&self) -> String {
        format!(
            "https://www.google.com/maps?q={},{}",
            self.latitude, self.longitude
        )
    }

    /// Parse the "lat,lon" form used by IP geolocation services.
    pub fn parse_pair(s: &str) -> AppResult<Self> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| AppError::InvalidCoordinates(s.to_string()))?;
        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|_| AppError::InvalidCoordinates(s.to_string()))?;
        let lon: f64 = lon
            .trim()
            .parse()
            .map_err(|_| AppError::InvalidCoordinates(s.to_string()))?;
        Self::new(lat, lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_url_embeds_both_coordinates() {
        let c = Coordinates::new(22.5726, 88.3639).unwrap();
        assert_eq!(c.maps_url(), "https://www.google.com/maps?q=22.5726,88.3639");
    }

    #[test]
    fn parse_pair_reads_ipinfo_loc() {
        let c = Coordinates::parse_pair("22.5726,88.3639").unwrap();
        assert_eq!(c.latitude, 22.5726);
        assert_eq!(c.longitude, 88.3639);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(Coordinates::new(91.0, 0.0).is_err());
        assert!(Coordinates::new(0.0, -181.0).is_err());
        assert!(Coordinates::parse_pair("abc").is_err());
        assert!(Coordinates::parse_pair("1.0;2.0").is_err());
    }
}
