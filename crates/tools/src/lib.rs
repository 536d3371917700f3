//! Real-time tools for the Delilah brain.
//!
//! - `http`: the shared GET-and-decode helper every tool goes through
//! - `weather_api`: Nominatim geocoding + weather.gov grid/forecast client
//! - `weather`: location resolution and forecast rendering
//! - `sports`: team-query normalization; always reports "unavailable"
//! - `dispatcher`: name → tool registry that never lets a failure escape

pub mod dispatcher;
pub mod http;
pub mod sports;
pub mod weather;
pub mod weather_api;

pub use dispatcher::{Tool, ToolDispatcher};
pub use http::HttpFetcher;
pub use sports::SportsTool;
pub use weather::WeatherTool;
pub use weather_api::{NwsWeatherApi, WeatherApi};
