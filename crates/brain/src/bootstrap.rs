//! Brain and AppState construction shared by `serve` and `ask`.

use std::sync::Arc;

use anyhow::Context;

use dl_domain::config::{Config, ConfigSeverity};
use dl_domain::trace::{TracingObserver, TurnObserver};
use dl_memory::create_stores;
use dl_providers::create_generator;
use dl_tools::dispatcher::build_default_dispatcher;

use crate::pipeline::Brain;
use crate::state::AppState;

/// Log config issues and refuse to start on errors.
pub fn check_config(config: &Config) -> anyhow::Result<()> {
    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            ConfigSeverity::Warning => tracing::warn!("config: {issue}"),
            ConfigSeverity::Error => tracing::error!("config: {issue}"),
        }
    }
    let errors = issues
        .iter()
        .filter(|i| i.severity == ConfigSeverity::Error)
        .count();
    if errors > 0 {
        anyhow::bail!("config validation failed with {errors} error(s)");
    }
    Ok(())
}

/// Wire the production collaborators into a [`Brain`].
pub fn build_brain(config: &Config) -> anyhow::Result<Brain> {
    check_config(config)?;

    // ── Tools ────────────────────────────────────────────────────────
    let dispatcher =
        build_default_dispatcher(&config.weather).context("initializing tool dispatcher")?;
    tracing::info!(tools = ?dispatcher.names(), "tool dispatcher ready");

    // ── Memory stores ────────────────────────────────────────────────
    let stores = create_stores(&config.memory).context("initializing memory stores")?;

    // ── Generation ───────────────────────────────────────────────────
    let generator = create_generator(&config.llm).context("initializing generator")?;

    let observer: Arc<dyn TurnObserver> = Arc::new(TracingObserver);

    Ok(Brain::new(
        config.pipeline.clone(),
        Arc::new(dispatcher),
        stores,
        generator,
        observer,
    ))
}

pub fn build_app_state(config: Arc<Config>) -> anyhow::Result<AppState> {
    let brain = Arc::new(build_brain(&config)?);
    Ok(AppState::new(config, brain))
}
