//! Geocoding + forecast collaborators used by the weather tool.
//!
//! [`WeatherApi`] is the seam; [`NwsWeatherApi`] talks to Nominatim and
//! api.weather.gov. Wire payloads are decoded leniently by the `parse_*`
//! helpers so a missing field reads as "nothing found" rather than an error.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use dl_domain::config::{GridConfig, WeatherConfig};
use dl_domain::error::{Error, Result};

use crate::http::HttpFetcher;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Types
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// First geocoding match for a free-text location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
    pub display_name: String,
}

impl GeoPoint {
    /// Short label: the first comma-separated segment of the display name.
    pub fn label(&self) -> String {
        self.display_name
            .split(',')
            .next()
            .map(str::trim)
            .unwrap_or_default()
            .to_owned()
    }
}

/// A weather.gov forecast office + grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridRef {
    pub grid_id: String,
    pub grid_x: u32,
    pub grid_y: u32,
}

impl From<&GridConfig> for GridRef {
    fn from(cfg: &GridConfig) -> Self {
        Self {
            grid_id: cfg.grid_id.clone(),
            grid_x: cfg.grid_x,
            grid_y: cfg.grid_y,
        }
    }
}

/// Result of a `/points/{lat},{lon}` lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
    pub grid: GridRef,
    pub forecast_url: Option<String>,
    /// "City, ST" of the nearest named place, when weather.gov reports one.
    pub relative_location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPeriod {
    pub name: String,
    pub temperature: Option<i64>,
    pub temperature_unit: String,
    pub short_description: String,
    pub detailed_description: String,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// WeatherApi trait
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[async_trait]
pub trait WeatherApi: Send + Sync {
    /// Resolve free text to coordinates. `Ok(None)` when nothing matched.
    async fn geocode(&self, query: &str) -> Result<Option<GeoPoint>>;

    /// Resolve coordinates to a forecast grid. `Ok(None)` when the point is
    /// outside weather.gov coverage.
    async fn grid_point(&self, lat: f64, lon: f64) -> Result<Option<GridPoint>>;

    /// Ordered forecast periods for a grid cell.
    async fn forecast(&self, grid: &GridRef) -> Result<Vec<ForecastPeriod>>;
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Nominatim + weather.gov
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub struct NwsWeatherApi {
    http: HttpFetcher,
    geocode_base_url: String,
    nws_base_url: String,
}

impl NwsWeatherApi {
    pub fn new(http: HttpFetcher, cfg: &WeatherConfig) -> Self {
        Self {
            http,
            geocode_base_url: cfg.geocode_base_url.trim_end_matches('/').to_owned(),
            nws_base_url: cfg.nws_base_url.trim_end_matches('/').to_owned(),
        }
    }

    pub fn from_config(cfg: &WeatherConfig) -> Result<Self> {
        Ok(Self::new(HttpFetcher::new(cfg.user_agent.clone())?, cfg))
    }
}

#[async_trait]
impl WeatherApi for NwsWeatherApi {
    async fn geocode(&self, query: &str) -> Result<Option<GeoPoint>> {
        let url = format!("{}/search", self.geocode_base_url);
        let body = self
            .http
            .get_json(&url, &[("q", query), ("format", "json"), ("limit", "1")])
            .await?;
        Ok(parse_geocode(&body))
    }

    async fn grid_point(&self, lat: f64, lon: f64) -> Result<Option<GridPoint>> {
        let url = format!("{}/points/{lat:.4},{lon:.4}", self.nws_base_url);
        let body = self.http.get_json(&url, &[]).await?;
        Ok(parse_grid_point(&body))
    }

    async fn forecast(&self, grid: &GridRef) -> Result<Vec<ForecastPeriod>> {
        let url = format!(
            "{}/gridpoints/{}/{},{}/forecast",
            self.nws_base_url, grid.grid_id, grid.grid_x, grid.grid_y
        );
        let body = self.http.get_json(&url, &[]).await?;
        parse_forecast(&body)
            .ok_or_else(|| Error::Other(format!("forecast payload from {url} has no periods array")))
    }
}

// ── payload decoding ────────────────────────────────────────────────

/// Nominatim returns lat/lon as strings; accept numbers too.
fn coord(v: &Value) -> Option<f64> {
    match v {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

pub fn parse_geocode(body: &Value) -> Option<GeoPoint> {
    let first = body.as_array()?.first()?;
    Some(GeoPoint {
        lat: coord(first.get("lat")?)?,
        lon: coord(first.get("lon")?)?,
        display_name: first
            .get("display_name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned(),
    })
}

pub fn parse_grid_point(body: &Value) -> Option<GridPoint> {
    let props = body.get("properties")?;
    let grid = GridRef {
        grid_id: props.get("gridId")?.as_str()?.to_owned(),
        grid_x: u32::try_from(props.get("gridX")?.as_u64()?).ok()?,
        grid_y: u32::try_from(props.get("gridY")?.as_u64()?).ok()?,
    };
    let relative_location = props
        .pointer("/relativeLocation/properties")
        .and_then(|p| {
            let city = p.get("city")?.as_str()?;
            match p.get("state").and_then(Value::as_str) {
                Some(state) => Some(format!("{city}, {state}")),
                None => Some(city.to_owned()),
            }
        });
    Some(GridPoint {
        grid,
        forecast_url: props
            .get("forecast")
            .and_then(Value::as_str)
            .map(str::to_owned),
        relative_location,
    })
}

pub fn parse_forecast(body: &Value) -> Option<Vec<ForecastPeriod>> {
    let periods = body.pointer("/properties/periods")?.as_array()?;
    Some(
        periods
            .iter()
            .map(|p| {
                let text = |key: &str| {
                    p.get(key)
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .trim()
                        .to_owned()
                };
                // Newer payloads wrap temperature as {"value": .., "unitCode": ..}.
                let temperature = p.get("temperature").and_then(|t| {
                    t.as_i64()
                        .or_else(|| t.as_f64().map(|f| f.round() as i64))
                        .or_else(|| t.get("value")?.as_f64().map(|f| f.round() as i64))
                });
                ForecastPeriod {
                    name: text("name"),
                    temperature,
                    temperature_unit: text("temperatureUnit"),
                    short_description: text("shortForecast"),
                    detailed_description: text("detailedForecast"),
                }
            })
            .collect(),
    )
}
