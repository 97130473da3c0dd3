use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectionsError {
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("No Mapbox access token configured")]
    MissingAccessToken,

    #[error("Directions request failed with HTTP {status}: {message}")]
    Status { status: u16, message: String },

    // The request went through, but Mapbox couldn't route it (NoRoute, NoSegment, ...)
    #[error("Directions API returned {code}: {message}")]
    Api { code: String, message: String },

    #[error("Failed to parse directions response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Directions response didn't contain any routes")]
    NoRoute,

    #[cfg(not(target_arch = "wasm32"))]
    #[error("Directions request failed: {0}")]
    Http(#[from] reqwest::Error),
}
