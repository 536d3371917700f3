mod llm;
mod memory;
mod pipeline;
mod server;
mod weather;

pub use llm::*;
pub use memory::*;
pub use pipeline::*;
pub use server::*;
pub use weather::*;

use serde::{Deserialize, Serialize};
use std::fmt;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Top-level config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub memory: MemoryConfig,
    #[serde(default)]
    pub llm: LlmConfig,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Config validation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Severity level for a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSeverity {
    Error,
    Warning,
}

/// A single configuration validation issue.
#[derive(Debug, Clone)]
pub struct ConfigError {
    pub severity: ConfigSeverity,
    pub field: String,
    pub message: String,
}

impl ConfigError {
    fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: ConfigSeverity::Error,
            field: field.into(),
            message: message.into(),
        }
    }

    fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: ConfigSeverity::Warning,
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            ConfigSeverity::Error => "ERROR",
            ConfigSeverity::Warning => "WARN",
        };
        write!(f, "[{tag}] {}: {}", self.field, self.message)
    }
}

impl Config {
    /// Validate the configuration and return a list of issues.
    ///
    /// Returns an empty vec when everything looks good.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.server.port == 0 {
            errors.push(ConfigError::error("server.port", "port must be greater than 0"));
        }
        if self.server.host.is_empty() {
            errors.push(ConfigError::error("server.host", "host must not be empty"));
        }

        // ── pipeline ──
        if self.pipeline.assistant_name.trim().is_empty() {
            errors.push(ConfigError::error(
                "pipeline.assistant_name",
                "assistant name must not be empty",
            ));
        }
        if self.pipeline.default_user_id.trim().is_empty() {
            errors.push(ConfigError::error(
                "pipeline.default_user_id",
                "default user id must not be empty",
            ));
        }
        if self.pipeline.memory_k == 0 {
            errors.push(ConfigError::warning(
                "pipeline.memory_k",
                "memory_k is 0; long-term memory will never contribute context",
            ));
        }
        for (field, limit) in [
            ("pipeline.memory_max_chars", self.pipeline.memory_max_chars),
            ("pipeline.persona_max_chars", self.pipeline.persona_max_chars),
            (
                "pipeline.conversation_max_chars",
                self.pipeline.conversation_max_chars,
            ),
        ] {
            if limit == 0 {
                errors.push(ConfigError::error(field, "clamp limit must be greater than 0"));
            }
        }

        // ── weather ──
        if self.weather.user_agent.trim().is_empty() {
            errors.push(ConfigError::error(
                "weather.user_agent",
                "weather.gov rejects requests without a User-Agent",
            ));
        }
        if !(-90.0..=90.0).contains(&self.weather.home_lat) {
            errors.push(ConfigError::error(
                "weather.home_lat",
                "latitude must be within [-90, 90]",
            ));
        }
        if !(-180.0..=180.0).contains(&self.weather.home_lon) {
            errors.push(ConfigError::error(
                "weather.home_lon",
                "longitude must be within [-180, 180]",
            ));
        }
        if self.weather.fallback_grid.grid_id.trim().is_empty() {
            errors.push(ConfigError::error(
                "weather.fallback_grid.grid_id",
                "fallback grid id must not be empty",
            ));
        }
        for (field, url) in [
            ("weather.geocode_base_url", &self.weather.geocode_base_url),
            ("weather.nws_base_url", &self.weather.nws_base_url),
            ("memory.qdrant_url", &self.memory.qdrant_url),
            ("memory.embed_url", &self.memory.embed_url),
            ("llm.base_url", &self.llm.base_url),
        ] {
            if url.is_empty() {
                errors.push(ConfigError::error(field, "base url must not be empty"));
            } else if !url.starts_with("http://") && !url.starts_with("https://") {
                errors.push(ConfigError::error(
                    field,
                    format!("expected an http(s) url, got \"{url}\""),
                ));
            }
        }

        // ── memory ──
        if self.memory.knowledge_collection.trim().is_empty() {
            errors.push(ConfigError::error(
                "memory.knowledge_collection",
                "the long-term memory collection is required",
            ));
        }
        if self.memory.embed_model.trim().is_empty() {
            errors.push(ConfigError::error(
                "memory.embed_model",
                "embedding model must not be empty",
            ));
        }
        if self.memory.timeout_ms == 0 {
            errors.push(ConfigError::error("memory.timeout_ms", "timeout must be greater than 0"));
        }

        // ── llm ──
        if self.llm.model.trim().is_empty() {
            errors.push(ConfigError::error("llm.model", "model must not be empty"));
        }
        if self.llm.timeout_ms == 0 {
            errors.push(ConfigError::error("llm.timeout_ms", "timeout must be greater than 0"));
        }
        if self.llm.kind == ProviderKind::OpenaiCompat && self.llm.api_key_env.is_none() {
            errors.push(ConfigError::warning(
                "llm.api_key_env",
                "no API key env var set for the openai_compat provider",
            ));
        }

        errors
    }
}
