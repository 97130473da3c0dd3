use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use geojson::{Feature, Geometry};
use log::info;

use directions::{
    parse_response, simplify_steps, Coordinate, DirectionsClient, DirectionsRequest,
    DirectionsResponse, Profile, ShareLinks, DEFAULT_BASE_URL,
};

#[derive(Parser)]
struct Args {
    /// Where to start, as `lat,lon`
    #[arg(long, allow_hyphen_values = true, required_unless_present = "response")]
    from: Option<Coordinate>,

    /// Where to go, as `lat,lon`
    #[arg(long, allow_hyphen_values = true, required_unless_present = "response")]
    to: Option<Coordinate>,

    /// Mapbox access token
    #[arg(long, env = "MAPBOX_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// One of driving, driving-traffic, walking, cycling
    #[arg(long, default_value = "driving")]
    profile: Profile,

    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Simplify a saved Directions API response instead of fetching one
    #[arg(long)]
    response: Option<String>,

    /// Write the route as a GeoJSON feature to this file
    #[arg(long)]
    geojson: Option<String>,

    /// Also print links to open the same trip in Google and Apple Maps
    #[clap(long)]
    share: bool,
}

fn main() -> Result<()> {
    simple_logger::init_with_level(log::Level::Info)?;
    let args = Args::parse();

    let resp = match &args.response {
        Some(path) => {
            let body = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
            parse_response(200, &body).with_context(|| format!("parsing {path}"))?
        }
        None => fetch(&args)?,
    };

    let route = resp.first_route()?;
    let steps = simplify_steps(&route.legs);
    println!(
        "{:.1} mi, {:.0} min",
        directions::meters_to_miles(route.distance),
        route.duration / 60.0
    );
    for step in &steps {
        println!("{}. {} ({})", step.ordinal, step.road_name, step.distance_label);
    }

    if args.share {
        if let (Some(from), Some(to)) = (args.from, args.to) {
            let links = ShareLinks::new(from, to);
            println!("Google Maps: {}", links.google_maps);
            println!("Apple Maps: {}", links.apple_maps);
        } else {
            info!("Pass --from and --to to get share links");
        }
    }

    if let Some(path) = &args.geojson {
        let mut feature = Feature::from(Geometry::from(&route.geometry));
        feature.set_property("length_meters", route.distance);
        feature.set_property("duration_seconds", route.duration);
        feature.set_property("steps", serde_json::to_value(&steps)?);
        std::fs::write(path, serde_json::to_string_pretty(&feature)?)
            .with_context(|| format!("writing {path}"))?;
        info!("Wrote {path}");
    }

    Ok(())
}

fn fetch(args: &Args) -> Result<DirectionsResponse> {
    let (Some(from), Some(to)) = (args.from, args.to) else {
        anyhow::bail!("--from and --to are required without --response");
    };
    let access_token = args
        .access_token
        .clone()
        .context("no access token; pass --access-token or set MAPBOX_ACCESS_TOKEN")?;

    let mut req = DirectionsRequest::new(from, to, access_token);
    req.profile = args.profile;
    req.base_url = args.base_url.clone();

    info!("Routing from {from} to {to}");
    let client = DirectionsClient::new(Duration::from_secs(15))?;
    let resp = client.fetch(&req).context("fetching directions")?;
    Ok(resp)
}
