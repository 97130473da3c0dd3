use std::time::Duration;

use reqwest::blocking::Client;

use crate::{parse_response, DirectionsError, DirectionsRequest, DirectionsResponse};

/// Blocking access to the directions endpoint, for use outside the browser
pub struct DirectionsClient {
    client: Client,
}

impl DirectionsClient {
    pub fn new(timeout: Duration) -> Result<Self, DirectionsError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
        })
    }

    pub fn fetch(&self, req: &DirectionsRequest) -> Result<DirectionsResponse, DirectionsError> {
        let url = req.url()?;
        log::debug!(
            "Requesting {} directions from {} to {}",
            req.profile.as_str(),
            req.origin,
            req.destination
        );
        let resp = self.client.get(&url).send()?;
        let status = resp.status().as_u16();
        let body = resp.text()?;
        parse_response(status, &body)
    }
}
