//! Boils turn-by-turn directions down to the handful of major roads a driver would mention when
//! describing the trip. This is a display heuristic tuned on US driving instructions, not a
//! parser; steps it can't make sense of are just left out.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::Leg;

pub const DIRECT_ROUTE: &str = "Direct route";

const METERS_TO_MILES: f64 = 0.000621371;
// Any step longer than this is worth mentioning, whatever the road is called
const LONG_STEP_METERS: f64 = 1000.0;
const MAJOR_ROAD_KEYWORDS: [&str; 7] = [
    "highway",
    "freeway",
    "interstate",
    "i-",
    "route",
    "us-",
    "sr-",
];

// "on", "onto", or "along", then everything up to the next comma, period, or the end. The
// preposition has to be a whole word, so "Marathon Road" doesn't yield "Road" (see the
// extraction regex notes in DESIGN.md).
static ROAD_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:onto|on|along)\s+([^,.]+)").unwrap());

#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteStep {
    /// Starts at 1, counting only the steps that survived simplification
    pub ordinal: usize,
    pub road_name: String,
    pub distance_miles: f64,
    pub distance_label: String,
}

impl RouteStep {
    fn new(ordinal: usize, road_name: String, meters: f64) -> Self {
        let distance_miles = meters_to_miles(meters);
        Self {
            ordinal,
            road_name,
            distance_miles,
            distance_label: format!("{distance_miles:.1} mi"),
        }
    }
}

pub fn meters_to_miles(meters: f64) -> f64 {
    meters * METERS_TO_MILES
}

/// Finds the road an instruction puts you on, like "I-5 N" in "Merge onto I-5 N, then...".
pub fn extract_road_name(instruction: &str) -> Option<String> {
    let name = ROAD_NAME.captures(instruction)?.get(1)?.as_str().trim();
    if name.is_empty() {
        return None;
    }
    Some(name.to_string())
}

pub fn is_significant(instruction: &str, meters: f64) -> bool {
    let lower = instruction.to_lowercase();
    MAJOR_ROAD_KEYWORDS.iter().any(|kw| lower.contains(kw)) || meters > LONG_STEP_METERS
}

/// Keeps only the steps that name a road and look major, numbering them from 1. If nothing
/// qualifies, the whole trip is described as a single "Direct route" entry.
pub fn simplify_steps(legs: &[Leg]) -> Vec<RouteStep> {
    let mut result = Vec::new();
    for step in legs.iter().flat_map(|leg| &leg.steps) {
        let instruction = &step.maneuver.instruction;
        let Some(road_name) = extract_road_name(instruction) else {
            continue;
        };
        if !is_significant(instruction, step.distance) {
            continue;
        }
        result.push(RouteStep::new(result.len() + 1, road_name, step.distance));
    }

    if result.is_empty() {
        let total: f64 = legs.iter().map(|leg| leg.distance).sum();
        result.push(RouteStep::new(1, DIRECT_ROUTE.to_string(), total));
    }
    result
}
