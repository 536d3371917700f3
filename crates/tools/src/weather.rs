//! Weather tool: location → grid → forecast → rendered summary.

use std::sync::Arc;

use dl_domain::config::WeatherConfig;
use dl_domain::error::Result;
use dl_domain::tool::{ToolPayload, ToolResult, WeatherReport};
use dl_domain::turn::{DetailLevel, ToolArgs, ToolName};

use crate::dispatcher::Tool;
use crate::weather_api::{ForecastPeriod, GridRef, WeatherApi};

pub struct WeatherTool {
    api: Arc<dyn WeatherApi>,
    cfg: WeatherConfig,
}

impl WeatherTool {
    pub fn new(api: Arc<dyn WeatherApi>, cfg: WeatherConfig) -> Self {
        Self { api, cfg }
    }

    /// Resolve and render the forecast. Never fails: every problem is an
    /// `ok: false` result carrying a short reason.
    pub async fn lookup(&self, location_name: Option<&str>, level: DetailLevel) -> ToolResult {
        let report = |label: &str, summary: String| WeatherReport {
            summary,
            detail_level: level,
            location_name: location_name.map(str::to_owned),
            location_label: label.to_owned(),
        };

        // 1–2. coordinates + label
        let (lat, lon, label) = match location_name {
            Some(name) => match self.api.geocode(name).await {
                Ok(Some(point)) => {
                    let label = point.label();
                    let label = if label.is_empty() { name.to_owned() } else { label };
                    (point.lat, point.lon, label)
                }
                Ok(None) => {
                    tracing::info!(location = %name, "geocoding found no match");
                    return ToolResult::failed_with(
                        "could not resolve location",
                        ToolPayload::Weather(report(name, String::new())),
                    );
                }
                Err(e) => {
                    tracing::warn!(location = %name, error = %e, "geocoding failed");
                    return ToolResult::failed_with(
                        "could not resolve location",
                        ToolPayload::Weather(report(name, String::new())),
                    );
                }
            },
            None => (
                self.cfg.home_lat,
                self.cfg.home_lon,
                self.cfg.home_label.clone(),
            ),
        };

        // 3. grid
        let grid = match self.api.grid_point(lat, lon).await {
            Ok(Some(point)) => point.grid,
            other => {
                if let Err(e) = &other {
                    tracing::warn!(lat, lon, error = %e, "grid lookup failed");
                }
                if location_name.is_some() {
                    return ToolResult::failed_with(
                        format!("could not resolve forecast grid for {label}"),
                        ToolPayload::Weather(report(&label, String::new())),
                    );
                }
                tracing::debug!(grid = %self.cfg.fallback_grid.grid_id, "using fallback grid for home location");
                GridRef::from(&self.cfg.fallback_grid)
            }
        };

        // 4. forecast
        let periods = match self.api.forecast(&grid).await {
            Ok(periods) if !periods.is_empty() => periods,
            Ok(_) => {
                tracing::warn!(grid = ?grid, "forecast had no periods");
                return ToolResult::failed_with(
                    "forecast unavailable",
                    ToolPayload::Weather(report(&label, String::new())),
                );
            }
            Err(e) => {
                tracing::warn!(grid = ?grid, error = %e, "forecast fetch failed");
                return ToolResult::failed_with(
                    "forecast unavailable",
                    ToolPayload::Weather(report(&label, String::new())),
                );
            }
        };

        // 5–6. render
        ToolResult::success(ToolPayload::Weather(report(
            &label,
            render_forecast(&periods, level),
        )))
    }
}

#[async_trait::async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> ToolName {
        ToolName::Weather
    }

    async fn run(&self, args: &ToolArgs, _query: &str) -> Result<ToolResult> {
        let level = args.detail_level.unwrap_or_default();
        Ok(self.lookup(args.location_name.as_deref(), level).await)
    }
}

// ── rendering ───────────────────────────────────────────────────────

/// Render forecast periods at the given detail level.
///
/// `short` and `medium` use one sentence per period built from the
/// temperature and short description; `full` uses the detailed
/// description (or the short one when it is missing).
pub fn render_forecast(periods: &[ForecastPeriod], level: DetailLevel) -> String {
    let take = periods.iter().take(level.period_count());
    let sentences: Vec<String> = match level {
        DetailLevel::Short | DetailLevel::Medium => take.map(brief_sentence).collect(),
        DetailLevel::Full => take.map(detailed_sentence).collect(),
    };
    sentences.join(" ")
}

fn brief_sentence(p: &ForecastPeriod) -> String {
    let desc = if p.short_description.is_empty() {
        &p.detailed_description
    } else {
        &p.short_description
    };
    let body = match p.temperature {
        Some(t) => format!("{}: {t}°{}, {desc}", p.name, p.temperature_unit),
        None => format!("{}: {desc}", p.name),
    };
    end_sentence(body)
}

fn detailed_sentence(p: &ForecastPeriod) -> String {
    let desc = if p.detailed_description.is_empty() {
        &p.short_description
    } else {
        &p.detailed_description
    };
    end_sentence(format!("{}: {desc}", p.name))
}

fn end_sentence(mut s: String) -> String {
    let trimmed_len = s.trim_end().len();
    s.truncate(trimmed_len);
    if !s.ends_with(['.', '!', '?']) {
        s.push('.');
    }
    s
}
