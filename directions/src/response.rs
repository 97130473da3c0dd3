use geo::LineString;
use geojson::de::deserialize_geometry;
use serde::Deserialize;

use crate::DirectionsError;

/// The parts of a Mapbox Directions response we use. Everything else (waypoints, annotations,
/// intersections, voice instructions) is ignored.
#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    pub code: String,
    pub message: Option<String>,
    #[serde(default)]
    pub routes: Vec<Route>,
}

#[derive(Debug, Deserialize)]
pub struct Route {
    #[serde(deserialize_with = "deserialize_geometry")]
    pub geometry: LineString,
    /// Meters
    pub distance: f64,
    /// Seconds
    pub duration: f64,
    pub legs: Vec<Leg>,
}

#[derive(Debug, Deserialize)]
pub struct Leg {
    pub distance: f64,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub summary: String,
    pub steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
pub struct Step {
    pub maneuver: Maneuver,
    pub distance: f64,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct Maneuver {
    pub instruction: String,
}

// Mapbox error bodies look like {"message": "...", "code": "..."}, but a proxy in the way might
// send anything
#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Interprets an HTTP response from the directions endpoint.
pub fn parse_response(status: u16, body: &str) -> Result<DirectionsResponse, DirectionsError> {
    if !(200..300).contains(&status) {
        let message = match serde_json::from_str::<ErrorBody>(body) {
            Ok(err) => err.message,
            Err(_) => body.trim().to_string(),
        };
        return Err(DirectionsError::Status { status, message });
    }

    let resp: DirectionsResponse = serde_json::from_str(body)?;
    if resp.code != "Ok" {
        return Err(DirectionsError::Api {
            message: resp.message.clone().unwrap_or_default(),
            code: resp.code,
        });
    }
    Ok(resp)
}

impl DirectionsResponse {
    /// We never ask for alternatives, so the first candidate is the route.
    pub fn first_route(&self) -> Result<&Route, DirectionsError> {
        self.routes.first().ok_or(DirectionsError::NoRoute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = r#"{
        "code": "Ok",
        "uuid": "abc",
        "waypoints": [],
        "routes": [{
            "weight": 100.0,
            "duration": 120.5,
            "distance": 2000.0,
            "geometry": {"type": "LineString", "coordinates": [[-122.3, 47.6], [-122.31, 47.61]]},
            "legs": [{
                "distance": 2000.0,
                "duration": 120.5,
                "summary": "Main Street",
                "steps": [
                    {"distance": 2000.0, "name": "Main Street", "mode": "driving",
                     "maneuver": {"type": "depart", "instruction": "Drive north on Main Street.", "location": [-122.3, 47.6]}},
                    {"distance": 0.0, "name": "Main Street",
                     "maneuver": {"type": "arrive", "instruction": "You have arrived at your destination."}}
                ]
            }]
        }]
    }"#;

    #[test]
    fn test_parse_ok() {
        let resp = parse_response(200, SMALL).unwrap();
        let route = resp.first_route().unwrap();
        assert_eq!(route.geometry.0.len(), 2);
        assert_eq!(route.legs.len(), 1);
        assert_eq!(route.legs[0].steps.len(), 2);
        assert_eq!(
            route.legs[0].steps[0].maneuver.instruction,
            "Drive north on Main Street."
        );
        assert_eq!(route.legs[0].steps[0].distance, 2000.0);
    }

    #[test]
    fn test_http_error_uses_mapbox_message() {
        let err = parse_response(401, r#"{"message": "Not Authorized - Invalid Token"}"#)
            .unwrap_err();
        match err {
            DirectionsError::Status { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Not Authorized - Invalid Token");
            }
            x => panic!("unexpected {x:?}"),
        }

        let err = parse_response(502, "<html>Bad Gateway</html>\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Directions request failed with HTTP 502: <html>Bad Gateway</html>"
        );
    }

    #[test]
    fn test_api_error_code() {
        let err = parse_response(
            200,
            r#"{"code": "NoRoute", "message": "No route found", "routes": []}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DirectionsError::Api { ref code, .. } if code == "NoRoute"));
    }

    #[test]
    fn test_garbage_and_empty() {
        assert!(matches!(
            parse_response(200, "not json"),
            Err(DirectionsError::Parse(_))
        ));

        let resp = parse_response(200, r#"{"code": "Ok", "routes": []}"#).unwrap();
        assert!(matches!(resp.first_route(), Err(DirectionsError::NoRoute)));
    }
}
