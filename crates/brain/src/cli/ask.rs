//! `delilah ask`: one-shot turn.

use std::sync::Arc;

use anyhow::Context;

use dl_domain::config::Config;

use crate::bootstrap;
use crate::pipeline::TurnSummary;

pub async fn ask(
    config: Arc<Config>,
    message: String,
    user: Option<String>,
    json_output: bool,
    show_prompt: bool,
) -> anyhow::Result<()> {
    let brain = bootstrap::build_brain(&config)?;
    let outcome = brain
        .run_turn(&message, user.as_deref())
        .await
        .context("running turn")?;

    if show_prompt {
        eprintln!("{}\n", outcome.prompt);
    }

    if json_output {
        let json = serde_json::to_string_pretty(&TurnSummary::from(&outcome))
            .map_err(|e| anyhow::anyhow!("serializing turn: {e}"))?;
        println!("{json}");
    } else {
        println!("{}", outcome.answer());
    }
    Ok(())
}
