use crate::Coordinate;

/// Driving directions between the same two points, handed off to other map apps
#[derive(Clone, PartialEq, Debug)]
pub struct ShareLinks {
    pub google_maps: String,
    pub apple_maps: String,
}

impl ShareLinks {
    pub fn new(origin: Coordinate, destination: Coordinate) -> Self {
        let from = origin.lat_lon_param();
        let to = destination.lat_lon_param();
        Self {
            google_maps: format!(
                "https://www.google.com/maps/dir/?api=1&origin={from}&destination={to}&travelmode=driving"
            ),
            apple_maps: format!("https://maps.apple.com/?saddr={from}&daddr={to}&dirflg=d"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links() {
        let links = ShareLinks::new(
            Coordinate::new(40.7128, -74.006).unwrap(),
            Coordinate::new(42.3601, -71.0589).unwrap(),
        );
        assert_eq!(
            links.google_maps,
            "https://www.google.com/maps/dir/?api=1&origin=40.712800,-74.006000&destination=42.360100,-71.058900&travelmode=driving"
        );
        assert_eq!(
            links.apple_maps,
            "https://maps.apple.com/?saddr=40.712800,-74.006000&daddr=42.360100,-71.058900&dirflg=d"
        );
    }
}
