//! Everything about talking to the Mapbox Directions API that doesn't depend on where it runs:
//! building the request, parsing the response, boiling the turn-by-turn steps down to a short
//! list of major roads, and linking out to other map apps.

use std::fmt;
use std::str::FromStr;

#[cfg(not(target_arch = "wasm32"))]
mod client;
mod error;
mod request;
mod response;
mod share;
mod simplify;

#[cfg(not(target_arch = "wasm32"))]
pub use client::DirectionsClient;
pub use error::DirectionsError;
pub use request::{DirectionsRequest, Profile, DEFAULT_BASE_URL};
pub use response::{parse_response, DirectionsResponse, Leg, Maneuver, Route, Step};
pub use share::ShareLinks;
pub use simplify::{
    extract_road_name, is_significant, meters_to_miles, simplify_steps, RouteStep, DIRECT_ROUTE,
};

/// A WGS84 point in decimal degrees, as tapped on the map or reported by the device.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Result<Coordinate, DirectionsError> {
        if !lat.is_finite() || !lon.is_finite() || lat.abs() > 90.0 || lon.abs() > 180.0 {
            return Err(DirectionsError::InvalidCoordinate(format!("{lat}, {lon}")));
        }
        Ok(Coordinate { lat, lon })
    }

    /// Like `new`, but first wraps the longitude into [-180, 180). Web maps repeat the world
    /// horizontally, so a click on a neighboring copy reports something like -237.5.
    pub fn wrapped(lat: f64, lon: f64) -> Result<Coordinate, DirectionsError> {
        Coordinate::new(lat, (lon + 180.0).rem_euclid(360.0) - 180.0)
    }

    pub fn lat(self) -> f64 {
        self.lat
    }

    pub fn lon(self) -> f64 {
        self.lon
    }

    /// `lat,lon` with six decimals, the form the share links want
    pub fn lat_lon_param(self) -> String {
        format!("{:.6},{:.6}", self.lat, self.lon)
    }

    /// `lon,lat`, the order Mapbox puts in the request path
    pub fn lon_lat_param(self) -> String {
        format!("{},{}", self.lon, self.lat)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lon)
    }
}

impl FromStr for Coordinate {
    type Err = DirectionsError;

    /// Parses `lat,lon`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || DirectionsError::InvalidCoordinate(s.to_string());
        let (lat, lon) = s.split_once(',').ok_or_else(bad)?;
        let lat = lat.trim().parse::<f64>().map_err(|_| bad())?;
        let lon = lon.trim().parse::<f64>().map_err(|_| bad())?;
        Coordinate::new(lat, lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_six_decimals() {
        let pt = Coordinate::new(47.6062, -122.3321).unwrap();
        assert_eq!(pt.to_string(), "47.606200, -122.332100");
    }

    #[test]
    fn test_parse() {
        let pt: Coordinate = " 37.7749, -122.4194 ".parse().unwrap();
        assert_eq!(pt.lat(), 37.7749);
        assert_eq!(pt.lon(), -122.4194);

        assert!("37.7749".parse::<Coordinate>().is_err());
        assert!("north,west".parse::<Coordinate>().is_err());
        assert!("91.0,0.0".parse::<Coordinate>().is_err());
        assert!("0.0,181.0".parse::<Coordinate>().is_err());
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_wrapped() {
        let pt = Coordinate::wrapped(47.6, -237.5).unwrap();
        assert_eq!(pt.lon(), 122.5);
        assert_eq!(Coordinate::wrapped(10.0, 540.0).unwrap().lon(), -180.0);
        assert_eq!(Coordinate::wrapped(10.0, -73.25).unwrap().lon(), -73.25);
        assert!(Coordinate::wrapped(95.0, 0.0).is_err());
        assert!(Coordinate::wrapped(0.0, f64::INFINITY).is_err());
        assert!(Coordinate::wrapped(f64::NAN, 0.0).is_err());
    }
}
