//! Tool registry + the failure boundary between tools and the pipeline.
//!
//! [`ToolDispatcher::dispatch`] always returns a [`ToolResult`]: an `Err`
//! from a tool, a panic inside one, or a name with nothing registered all
//! come back as `ok: false`.

use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use futures_util::FutureExt;

use dl_domain::config::WeatherConfig;
use dl_domain::error::Result;
use dl_domain::tool::ToolResult;
use dl_domain::turn::{ToolArgs, ToolName};

use crate::sports::SportsTool;
use crate::weather::WeatherTool;
use crate::weather_api::NwsWeatherApi;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tool trait
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> ToolName;

    /// Run the tool. Expected failures (unknown location, no data) should
    /// come back as `Ok(ToolResult { ok: false, .. })`; `Err` is reserved
    /// for the unexpected.
    async fn run(&self, args: &ToolArgs, query: &str) -> Result<ToolResult>;
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ToolDispatcher
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Default)]
pub struct ToolDispatcher {
    tools: HashMap<ToolName, Arc<dyn Tool>>,
}

impl ToolDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. Returns self for chaining.
    pub fn register(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.insert(tool.name(), tool);
        self
    }

    /// Registered tool names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut v: Vec<_> = self.tools.keys().map(|t| t.as_str()).collect();
        v.sort_unstable();
        v
    }

    /// Invoke `tool` and normalize whatever happens into a [`ToolResult`].
    pub async fn dispatch(&self, tool: ToolName, args: &ToolArgs, query: &str) -> ToolResult {
        let Some(imp) = self.tools.get(&tool) else {
            tracing::warn!(tool = %tool, "no implementation registered");
            return ToolResult::failed(format!("no implementation registered for tool: {tool}"));
        };

        let started = Instant::now();
        let outcome = AssertUnwindSafe(imp.run(args, query)).catch_unwind().await;
        let duration_ms = started.elapsed().as_millis() as u64;

        match outcome {
            Ok(Ok(result)) => {
                tracing::debug!(tool = %tool, ok = result.ok, duration_ms, "tool finished");
                result
            }
            Ok(Err(e)) => {
                tracing::warn!(tool = %tool, error = %e, duration_ms, "tool returned an error");
                ToolResult::failed(format!("{tool} execution failed"))
            }
            Err(panic) => {
                let msg = panic
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_owned())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "non-string panic payload".into());
                tracing::error!(tool = %tool, panic = %msg, duration_ms, "tool panicked");
                ToolResult::failed(format!("{tool} execution failed"))
            }
        }
    }
}

/// Build the production dispatcher: weather.gov-backed weather + the
/// sports stub.
pub fn build_default_dispatcher(cfg: &WeatherConfig) -> Result<ToolDispatcher> {
    let api = Arc::new(NwsWeatherApi::from_config(cfg)?);
    Ok(ToolDispatcher::new()
        .register(Arc::new(WeatherTool::new(api, cfg.clone())))
        .register(Arc::new(SportsTool)))
}
