use dl_domain::config::{Config, ConfigSeverity, MemoryConfig, ProviderKind};

#[test]
fn default_host_is_localhost() {
    let config = Config::default();
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8000);
}

#[test]
fn empty_toml_yields_defaults() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config.pipeline.assistant_name, "Delilah");
    assert_eq!(config.pipeline.memory_k, 3);
    assert_eq!(config.pipeline.persona_k, 4);
    assert_eq!(config.pipeline.persona_max_chars, 1200);
    assert_eq!(config.memory.knowledge_collection, "delilah_knowledge");
    assert_eq!(config.llm.kind, ProviderKind::Ollama);
    assert!(config.validate().is_empty());
}

#[test]
fn weather_defaults_point_at_home() {
    let config = Config::default();
    assert_eq!(config.weather.home_label, "Rockford, MI");
    assert_eq!(config.weather.fallback_grid.grid_id, "GRR");
    assert!(config.weather.user_agent.starts_with("Delilah/"));
}

#[test]
fn partial_weather_section_keeps_other_defaults() {
    let toml_str = r#"
[weather]
home_label = "Duluth, MN"
home_lat = 46.78
home_lon = -92.10

[weather.fallback_grid]
grid_id = "DLH"
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.weather.home_label, "Duluth, MN");
    assert_eq!(config.weather.fallback_grid.grid_id, "DLH");
    assert_eq!(config.weather.fallback_grid.grid_x, 50);
    assert_eq!(config.weather.nws_base_url, "https://api.weather.gov");
}

#[test]
fn llm_kind_parses_snake_case() {
    let toml_str = r#"
[llm]
kind = "openai_compat"
base_url = "http://localhost:8080/v1"
model = "qwen2.5"
api_key_env = "OPENAI_API_KEY"
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.llm.kind, ProviderKind::OpenaiCompat);
    assert!(config.validate().is_empty());
}

#[test]
fn empty_optional_collection_disables_lookup() {
    let toml_str = r#"
[memory]
router_hints_collection = ""
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(
        MemoryConfig::optional_collection(&config.memory.router_hints_collection),
        None
    );
    assert_eq!(
        MemoryConfig::optional_collection(&config.memory.persona_collection),
        Some("persona_memory")
    );
}

#[test]
fn validate_flags_bad_values() {
    let mut config = Config::default();
    config.server.port = 0;
    config.weather.home_lat = 123.0;
    config.memory.qdrant_url = "localhost:6333".into();
    config.llm.kind = ProviderKind::OpenaiCompat;

    let issues = config.validate();
    let fields: Vec<&str> = issues.iter().map(|e| e.field.as_str()).collect();
    assert!(fields.contains(&"server.port"));
    assert!(fields.contains(&"weather.home_lat"));
    assert!(fields.contains(&"memory.qdrant_url"));

    let key_warning = issues
        .iter()
        .find(|e| e.field == "llm.api_key_env")
        .unwrap();
    assert_eq!(key_warning.severity, ConfigSeverity::Warning);
    assert!(key_warning.to_string().starts_with("[WARN]"));
}
