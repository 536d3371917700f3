pub mod ask;
pub mod config;

use clap::{Parser, Subcommand};

use dl_domain::config::Config;

/// Delilah: a personal assistant brain.
#[derive(Debug, Parser)]
#[command(name = "delilah", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the HTTP API (default when no subcommand is given).
    Serve,
    /// Run a single turn and print the answer.
    Ask {
        /// The utterance to answer.
        message: String,
        /// User id (defaults to `pipeline.default_user_id`).
        #[arg(long)]
        user: Option<String>,
        /// Print the turn summary as JSON instead of plain text.
        #[arg(long)]
        json: bool,
        /// Also print the assembled instruction block to stderr.
        #[arg(long)]
        show_prompt: bool,
    },
    /// Configuration utilities.
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Print version information.
    Version,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Parse the config file and report any errors.
    Validate,
    /// Dump the resolved configuration (with defaults) as TOML.
    Show,
}

// ── Config loading helper ─────────────────────────────────────────────

/// Load the configuration from the path in `DELILAH_CONFIG` (or
/// `config.toml` by default). A missing file yields the defaults.
pub fn load_config() -> anyhow::Result<(Config, String)> {
    let config_path =
        std::env::var("DELILAH_CONFIG").unwrap_or_else(|_| "config.toml".into());
    let config = load_config_from(&config_path)?;
    Ok((config, config_path))
}

pub fn load_config_from(config_path: &str) -> anyhow::Result<Config> {
    if !std::path::Path::new(config_path).exists() {
        return Ok(Config::default());
    }
    let raw = std::fs::read_to_string(config_path)
        .map_err(|e| anyhow::anyhow!("reading {config_path}: {e}"))?;
    toml::from_str(&raw).map_err(|e| anyhow::anyhow!("parsing {config_path}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_gives_defaults() {
        let config = load_config_from("/nonexistent/delilah.toml").unwrap();
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn file_overrides_are_applied() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[pipeline]\nassistant_name = \"Dee\"\n[llm]\nmodel = \"mistral\"").unwrap();
        let config = load_config_from(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.pipeline.assistant_name, "Dee");
        assert_eq!(config.llm.model, "mistral");
        assert_eq!(config.pipeline.memory_k, 3);
    }

    #[test]
    fn bad_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nport = ").unwrap();
        let err = load_config_from(file.path().to_str().unwrap()).unwrap_err();
        assert!(err.to_string().starts_with("parsing "));
    }

    #[test]
    fn ask_flags_parse() {
        let cli = Cli::try_parse_from([
            "delilah", "ask", "hello", "--user", "sam", "--json", "--show-prompt",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Ask {
                message,
                user,
                json,
                show_prompt,
            }) => {
                assert_eq!(message, "hello");
                assert_eq!(user.as_deref(), Some("sam"));
                assert!(json && show_prompt);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
