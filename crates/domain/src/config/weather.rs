use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Weather tool
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Defaults and endpoints for the weather tool.
///
/// The home location and fallback grid are used whenever the utterance
/// names no location; the fallback grid also covers a failed grid lookup
/// for the home location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Sent as `User-Agent` on every outbound call (weather.gov requires one).
    #[serde(default = "d_user_agent")]
    pub user_agent: String,
    #[serde(default = "d_home_label")]
    pub home_label: String,
    #[serde(default = "d_home_lat")]
    pub home_lat: f64,
    #[serde(default = "d_home_lon")]
    pub home_lon: f64,
    #[serde(default)]
    pub fallback_grid: GridConfig,
    #[serde(default = "d_geocode_url")]
    pub geocode_base_url: String,
    #[serde(default = "d_nws_url")]
    pub nws_base_url: String,
}

/// A weather.gov forecast office + grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default = "d_grid_id")]
    pub grid_id: String,
    #[serde(default = "d_grid_x")]
    pub grid_x: u32,
    #[serde(default = "d_grid_y")]
    pub grid_y: u32,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            user_agent: d_user_agent(),
            home_label: d_home_label(),
            home_lat: d_home_lat(),
            home_lon: d_home_lon(),
            fallback_grid: GridConfig::default(),
            geocode_base_url: d_geocode_url(),
            nws_base_url: d_nws_url(),
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            grid_id: d_grid_id(),
            grid_x: d_grid_x(),
            grid_y: d_grid_y(),
        }
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_user_agent() -> String {
    "Delilah/1.0 (contact: local)".into()
}
fn d_home_label() -> String {
    "Rockford, MI".into()
}
fn d_home_lat() -> f64 {
    43.12
}
fn d_home_lon() -> f64 {
    -85.56
}
fn d_grid_id() -> String {
    "GRR".into()
}
fn d_grid_x() -> u32 {
    50
}
fn d_grid_y() -> u32 {
    47
}
fn d_geocode_url() -> String {
    "https://nominatim.openstreetmap.org".into()
}
fn d_nws_url() -> String {
    "https://api.weather.gov".into()
}
