use proposal_agent::cli::Args;
use proposal_agent::config::{
    expand_env_var_in_string, normalize_endpoint, parse_flag, Config, FileConfig, RoutingMode,
};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_normalize_endpoint() {
    assert_eq!(
        normalize_endpoint("http://localhost:11434/v1"),
        "http://localhost:11434/v1/chat/completions"
    );
    assert_eq!(
        normalize_endpoint("http://localhost:11434/v1/"),
        "http://localhost:11434/v1/chat/completions"
    );
    assert_eq!(
        normalize_endpoint("http://localhost:11434/"),
        "http://localhost:11434/v1/chat/completions"
    );
    assert_eq!(
        normalize_endpoint("https://api.openai.com/v1/chat/completions"),
        "https://api.openai.com/v1/chat/completions"
    );
}

#[test]
fn test_expand_env_var_in_string() {
    std::env::set_var("PROPOSAL_TEST_OUTPUT", "/srv/proposals");
    assert_eq!(
        expand_env_var_in_string("${PROPOSAL_TEST_OUTPUT}/generated"),
        "/srv/proposals/generated"
    );
    assert_eq!(
        expand_env_var_in_string("${PROPOSAL_TEST_UNSET_VAR}/x"),
        "${PROPOSAL_TEST_UNSET_VAR}/x"
    );
}

#[test]
fn test_parse_flag() {
    assert!(parse_flag("true"));
    assert!(parse_flag("YES"));
    assert!(parse_flag("1"));
    assert!(!parse_flag("off"));
}

#[test]
fn test_routing_mode_parse() {
    assert_eq!(RoutingMode::parse("model"), Some(RoutingMode::Model));
    assert_eq!(RoutingMode::parse("Rules"), Some(RoutingMode::Rules));
    assert_eq!(RoutingMode::parse("random"), None);
    assert_eq!(RoutingMode::default(), RoutingMode::Model);
}

#[test]
fn test_load_yaml_config() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(".proposal-agent.yaml");
    fs::write(
        &path,
        r#"
models:
  cover_letter:
    name: gpt-4o-mini
    temperature: 0.3
session:
  routing: rules
  max_tool_rounds: 3
storage:
  base_dir: out
renderer:
  width: 1200
"#,
    )
    .unwrap();

    let config = FileConfig::load_from(&path).unwrap();
    assert_eq!(config.models.cover_letter.name, "gpt-4o-mini");
    assert_eq!(config.models.cover_letter.temperature, 0.3);
    assert_eq!(config.models.orchestrator.temperature, 0.0);
    assert_eq!(config.session.routing, Some(RoutingMode::Rules));
    assert_eq!(config.session.max_tool_rounds, Some(3));
    assert_eq!(config.storage.base_dir.as_deref(), Some("out"));
    assert_eq!(config.renderer.width, 1200);
    assert_eq!(config.renderer.height, 350);
}

#[test]
fn test_load_invalid_json_config_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(".proposal-agent.json");
    fs::write(&path, "{ not json").unwrap();

    assert!(FileConfig::load_from(&path).is_err());
}

#[test]
fn test_args_override_file_config() {
    std::env::set_var("OPENAI_API_KEY", "sk-test");

    let mut file_config = FileConfig::default();
    file_config.storage.base_dir = Some("from-file".to_string());
    file_config.session.max_tool_rounds = Some(4);

    let args = Args {
        output_dir: Some(PathBuf::from("from-args")),
        routing: Some(RoutingMode::Rules),
        api_endpoint: Some("http://localhost:8080/v1".to_string()),
        ..Args::default()
    };

    let config = Config::from_parts(&args, file_config).unwrap();
    assert_eq!(config.base_dir, PathBuf::from("from-args"));
    assert_eq!(config.routing, RoutingMode::Rules);
    assert_eq!(config.max_tool_rounds, 4);
    assert_eq!(
        config.api_endpoint,
        "http://localhost:8080/v1/chat/completions"
    );
}
