use serde::Deserialize;

use crate::{Coordinate, DirectionsError};

pub const DEFAULT_BASE_URL: &str = "https://api.mapbox.com";

/// Mapbox routing profiles, named the way they appear in the request path
#[derive(Clone, Copy, PartialEq, Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Profile {
    #[default]
    Driving,
    DrivingTraffic,
    Walking,
    Cycling,
}

impl Profile {
    pub fn as_str(self) -> &'static str {
        match self {
            Profile::Driving => "driving",
            Profile::DrivingTraffic => "driving-traffic",
            Profile::Walking => "walking",
            Profile::Cycling => "cycling",
        }
    }
}

impl std::str::FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "driving" => Ok(Profile::Driving),
            "driving-traffic" => Ok(Profile::DrivingTraffic),
            "walking" => Ok(Profile::Walking),
            "cycling" => Ok(Profile::Cycling),
            x => Err(format!("unknown profile {x}")),
        }
    }
}

/// A single origin-to-destination query
#[derive(Clone, Debug)]
pub struct DirectionsRequest {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub profile: Profile,
    pub base_url: String,
    pub access_token: String,
}

impl DirectionsRequest {
    pub fn new(origin: Coordinate, destination: Coordinate, access_token: String) -> Self {
        Self {
            origin,
            destination,
            profile: Profile::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token,
        }
    }

    /// Asks for GeoJSON geometry at full overview detail and step-by-step instructions.
    pub fn url(&self) -> Result<String, DirectionsError> {
        if self.access_token.trim().is_empty() {
            return Err(DirectionsError::MissingAccessToken);
        }
        Ok(format!(
            "{}/directions/v5/mapbox/{}/{};{}?geometries=geojson&overview=full&steps=true&access_token={}",
            self.base_url.trim_end_matches('/'),
            self.profile.as_str(),
            self.origin.lon_lat_param(),
            self.destination.lon_lat_param(),
            self.access_token.trim(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url() {
        let req = DirectionsRequest::new(
            Coordinate::new(47.6, -122.3).unwrap(),
            Coordinate::new(45.5, -122.6).unwrap(),
            "pk.abc".to_string(),
        );
        assert_eq!(
            req.url().unwrap(),
            "https://api.mapbox.com/directions/v5/mapbox/driving/-122.3,47.6;-122.6,45.5?geometries=geojson&overview=full&steps=true&access_token=pk.abc"
        );
    }

    #[test]
    fn test_url_needs_token() {
        let req = DirectionsRequest::new(
            Coordinate::new(47.6, -122.3).unwrap(),
            Coordinate::new(45.5, -122.6).unwrap(),
            "  ".to_string(),
        );
        assert!(matches!(req.url(), Err(DirectionsError::MissingAccessToken)));
    }

    #[test]
    fn test_profile_and_base_url() {
        let mut req = DirectionsRequest::new(
            Coordinate::new(1.0, 2.0).unwrap(),
            Coordinate::new(3.0, 4.0).unwrap(),
            "t".to_string(),
        );
        req.profile = "cycling".parse().unwrap();
        req.base_url = "http://localhost:8080/".to_string();
        assert!(req
            .url()
            .unwrap()
            .starts_with("http://localhost:8080/directions/v5/mapbox/cycling/2,1;4,3?"));
        assert!("flying".parse::<Profile>().is_err());
    }
}
