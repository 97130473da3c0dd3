#[cfg(target_arch = "wasm32")]
use std::sync::Once;

use anyhow::{bail, Result};
use geo::LineString;
use geojson::{Feature, FeatureCollection, GeoJson, Geometry};
use log::{debug, error, info, warn};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

use directions::{
    parse_response, simplify_steps, Coordinate, DirectionsRequest, Profile, RouteStep,
    ShareLinks, DEFAULT_BASE_URL,
};

use self::gesture::{PressGesture, DEFAULT_HOLD_MS};
use self::selection::Selection;

mod gesture;
mod selection;

// Baked in by the build, like `MAPBOX_ACCESS_TOKEN=pk.... wasm-pack build`
const BUILD_ACCESS_TOKEN: Option<&str> = option_env!("MAPBOX_ACCESS_TOKEN");

#[cfg(target_arch = "wasm32")]
static START: Once = Once::new();

#[wasm_bindgen]
pub struct JsRoutePlanner {
    config: Config,
    selection: Selection,
    gesture: PressGesture,
    // The endpoints of the request currently in flight. At most one at a time.
    in_flight: Option<(Coordinate, Coordinate)>,
    route: Option<PlannedRoute>,
}

#[derive(Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Config {
    hold_ms: f64,
    profile: Profile,
    base_url: String,
    access_token: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hold_ms: DEFAULT_HOLD_MS,
            profile: Profile::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token: BUILD_ACCESS_TOKEN.unwrap_or_default().to_string(),
        }
    }
}

/// What's left of a directions response after simplification
struct PlannedRoute {
    geometry: LineString,
    steps: Vec<RouteStep>,
    distance_meters: f64,
    duration_seconds: f64,
}

#[wasm_bindgen]
impl JsRoutePlanner {
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsRoutePlanner {
        // Panics shouldn't happen, but if they do, console.log them.
        #[cfg(target_arch = "wasm32")]
        START.call_once(|| {
            console_error_panic_hook::set_once();
            // Only fails if some other logger got there first
            let _ = console_log::init_with_level(log::Level::Info);
        });

        let config = Config::default();
        if config.access_token.is_empty() {
            warn!("Built without MAPBOX_ACCESS_TOKEN; call setConfig with an accessToken");
        }
        Self {
            gesture: PressGesture::new(config.hold_ms),
            config,
            selection: Selection::default(),
            in_flight: None,
            route: None,
        }
    }

    /// Replaces the configuration. Fields left out keep their defaults.
    #[wasm_bindgen(js_name = setConfig)]
    pub fn set_config(&mut self, input: JsValue) {
        match serde_wasm_bindgen::from_value(input) {
            Ok(config) => self.apply_config(config),
            Err(err) => {
                error!("Bad input to setConfig: {}", err);
            }
        }
    }

    #[wasm_bindgen(js_name = holdMs)]
    pub fn hold_ms(&self) -> f64 {
        self.gesture.hold_ms()
    }

    #[wasm_bindgen(js_name = onPointerDown)]
    pub fn on_pointer_down(&mut self, lon: f64, lat: f64, now_ms: f64) {
        match Coordinate::wrapped(lat, lon) {
            Ok(pt) => self.gesture.press(pt, now_ms),
            Err(err) => warn!("Ignoring press: {}", err),
        }
    }

    #[wasm_bindgen(js_name = onPointerMove)]
    pub fn on_pointer_move(&mut self) {
        self.gesture.cancel();
    }

    #[wasm_bindgen(js_name = onDragStart)]
    pub fn on_drag_start(&mut self) {
        self.gesture.cancel();
    }

    /// True while a press is held but not yet confirmed. If the dwell timer fires a little
    /// early, the caller should check again.
    #[wasm_bindgen(js_name = isPressPending)]
    pub fn is_press_pending(&self) -> bool {
        self.gesture.is_pending()
    }

    // True if the selection changed and the caller should redraw
    #[wasm_bindgen(js_name = onHoldElapsed)]
    pub fn on_hold_elapsed(&mut self, now_ms: f64) -> bool {
        match self.gesture.elapsed(now_ms) {
            Some(pt) => self.on_tap(pt),
            None => false,
        }
    }

    // True if the selection changed and the caller should redraw
    #[wasm_bindgen(js_name = onPointerUp)]
    pub fn on_pointer_up(&mut self, now_ms: f64) -> bool {
        match self.gesture.release(now_ms) {
            Some(pt) => self.on_tap(pt),
            None => false,
        }
    }

    /// One of "awaiting-start", "awaiting-end", "ready"
    #[wasm_bindgen(js_name = selectionState)]
    pub fn selection_state(&self) -> String {
        self.selection.name().to_string()
    }

    #[wasm_bindgen(js_name = originLabel)]
    pub fn origin_label(&self) -> Option<String> {
        self.selection.origin().map(|pt| pt.to_string())
    }

    #[wasm_bindgen(js_name = destinationLabel)]
    pub fn destination_label(&self) -> Option<String> {
        self.selection.destination().map(|pt| pt.to_string())
    }

    #[wasm_bindgen(js_name = isLoading)]
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    #[wasm_bindgen(js_name = canSubmit)]
    pub fn can_submit(&self) -> bool {
        self.in_flight.is_none() && self.selection.endpoints().is_some()
    }

    /// Returns the URL to fetch and marks a request as in flight. Returns nothing if both
    /// endpoints aren't picked yet, or if a request is already loading.
    #[wasm_bindgen(js_name = routeRequestUrl)]
    pub fn route_request_url(&mut self) -> Result<Option<String>, JsValue> {
        self.start_request().map_err(err_to_js)
    }

    /// Hands over the finished fetch. On failure, the error is meant for `alert()`.
    #[wasm_bindgen(js_name = onRouteResponse)]
    pub fn on_route_response(&mut self, status: u16, body: &str) -> Result<(), JsValue> {
        self.finish_request(status, body).map_err(|err| {
            error!("Directions request failed: {:#}", err);
            err_to_js(format!("Couldn't get directions: {:#}", err))
        })
    }

    /// The fetch itself failed, before any response. Returns the text to `alert()`.
    #[wasm_bindgen(js_name = onRouteFailure)]
    pub fn on_route_failure(&mut self, message: &str) -> String {
        error!("Directions request failed: {}", message);
        self.in_flight = None;
        format!("Couldn't get directions: {}", message)
    }

    /// An array of `{ordinal, roadName, distanceMiles, distanceLabel}`, empty with no route
    #[wasm_bindgen(js_name = routeSteps)]
    pub fn route_steps(&self) -> Result<JsValue, JsValue> {
        let steps: &[RouteStep] = self
            .route
            .as_ref()
            .map(|r| r.steps.as_slice())
            .unwrap_or_default();
        serde_wasm_bindgen::to_value(steps).map_err(err_to_js)
    }

    #[wasm_bindgen(js_name = toFinalFeature)]
    pub fn to_final_feature(&self) -> Option<String> {
        let route = self.route.as_ref()?;
        Some(route.to_feature().to_string())
    }

    /// The route line and both markers, tagged with a "type" property for styling
    #[wasm_bindgen(js_name = renderGeojson)]
    pub fn render_geojson(&self) -> String {
        let mut features = Vec::new();

        if let Some(route) = &self.route {
            features.push(route.to_feature());
        }
        for (label, pt) in [
            ("origin", self.selection.origin()),
            ("destination", self.selection.destination()),
        ] {
            if let Some(pt) = pt {
                let mut f = Feature::from(Geometry::from(geojson::Value::Point(vec![
                    pt.lon(),
                    pt.lat(),
                ])));
                f.set_property("type", label);
                f.set_property("label", pt.to_string());
                features.push(f);
            }
        }

        GeoJson::from(features.into_iter().collect::<FeatureCollection>()).to_string()
    }

    #[wasm_bindgen(js_name = googleMapsUrl)]
    pub fn google_maps_url(&self) -> Option<String> {
        self.share_links().map(|links| links.google_maps)
    }

    #[wasm_bindgen(js_name = appleMapsUrl)]
    pub fn apple_maps_url(&self) -> Option<String> {
        self.share_links().map(|links| links.apple_maps)
    }

    #[wasm_bindgen(js_name = openGoogleMaps)]
    pub fn open_google_maps(&self) -> Result<(), JsValue> {
        match self.google_maps_url() {
            Some(url) => open_in_new_tab(&url),
            None => Ok(()),
        }
    }

    #[wasm_bindgen(js_name = openAppleMaps)]
    pub fn open_apple_maps(&self) -> Result<(), JsValue> {
        match self.apple_maps_url() {
            Some(url) => open_in_new_tab(&url),
            None => Ok(()),
        }
    }

    /// Returns `[lon, lat]` as JSON to center the map on, if the device reported something sane
    #[wasm_bindgen(js_name = onGeolocation)]
    pub fn on_geolocation(&self, lon: f64, lat: f64) -> Option<String> {
        match Coordinate::new(lat, lon) {
            Ok(pt) => {
                info!("Centering on device location {}", pt);
                Some(format!("[{},{}]", pt.lon(), pt.lat()))
            }
            Err(err) => {
                warn!("Ignoring device location: {}", err);
                None
            }
        }
    }

    // Without a location the map just keeps its default view
    #[wasm_bindgen(js_name = onGeolocationError)]
    pub fn on_geolocation_error(&self, message: &str) {
        warn!("Geolocation unavailable: {}", message);
    }

    /// Forgets both endpoints and the route. A request already in flight can't be aborted, but
    /// its response will be dropped.
    #[wasm_bindgen(js_name = clearState)]
    pub fn clear_state(&mut self) {
        self.selection.reset();
        self.gesture.cancel();
        self.route = None;
    }
}

impl Default for JsRoutePlanner {
    fn default() -> Self {
        Self::new()
    }
}

impl JsRoutePlanner {
    fn apply_config(&mut self, mut config: Config) {
        if !config.hold_ms.is_finite() || config.hold_ms < 0.0 {
            error!(
                "Bad holdMs {} in setConfig, keeping {}",
                config.hold_ms,
                self.gesture.hold_ms()
            );
            config.hold_ms = self.gesture.hold_ms();
        }
        self.gesture.set_hold_ms(config.hold_ms);
        self.config = config;
    }

    fn on_tap(&mut self, pt: Coordinate) -> bool {
        if !self.selection.advance(pt) {
            debug!("Both endpoints are already set, ignoring tap at {}", pt);
            return false;
        }
        info!("Picked {} ({})", pt, self.selection.name());
        true
    }

    fn share_links(&self) -> Option<ShareLinks> {
        let (origin, destination) = self.selection.endpoints()?;
        Some(ShareLinks::new(origin, destination))
    }

    fn start_request(&mut self) -> Result<Option<String>> {
        if self.in_flight.is_some() {
            debug!("A route is already loading");
            return Ok(None);
        }
        let Some((origin, destination)) = self.selection.endpoints() else {
            return Ok(None);
        };

        let req = DirectionsRequest {
            origin,
            destination,
            profile: self.config.profile,
            base_url: self.config.base_url.clone(),
            access_token: self.config.access_token.clone(),
        };
        let url = req.url()?;
        self.in_flight = Some((origin, destination));
        Ok(Some(url))
    }

    fn finish_request(&mut self, status: u16, body: &str) -> Result<()> {
        let Some(requested) = self.in_flight.take() else {
            bail!("got a directions response with no request in flight");
        };

        if self.selection.endpoints() != Some(requested) {
            info!("Endpoints changed while loading, dropping the old response");
            return Ok(());
        }

        let resp = parse_response(status, body)?;
        let route = resp.first_route()?;
        let steps = simplify_steps(&route.legs);
        info!(
            "Got a route of {:.1} km, simplified to {} steps",
            route.distance / 1000.0,
            steps.len()
        );
        self.route = Some(PlannedRoute {
            geometry: route.geometry.clone(),
            steps,
            distance_meters: route.distance,
            duration_seconds: route.duration,
        });
        Ok(())
    }
}

impl PlannedRoute {
    fn to_feature(&self) -> Feature {
        let mut f = Feature::from(Geometry::from(&self.geometry));
        f.set_property("type", "route");
        f.set_property("length_meters", self.distance_meters);
        f.set_property("duration_seconds", self.duration_seconds);
        f
    }
}

fn open_in_new_tab(url: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    window.open_with_url_and_target(url, "_blank")?;
    Ok(())
}

fn err_to_js<E: std::fmt::Display>(err: E) -> JsValue {
    JsValue::from_str(&err.to_string())
}
