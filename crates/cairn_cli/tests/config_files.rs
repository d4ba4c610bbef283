//! Loading configuration files from disk.

use cairn_cli::config::{AgentFile, ConfigError, ModelsFile, load_json};
use std::io::Write;

#[test]
fn loads_models_and_agent_files() {
    let dir = tempfile::tempdir().unwrap();

    let models_path = dir.path().join("models.json");
    std::fs::write(
        &models_path,
        r#"{"models":{"fast":{"url":"http://localhost:8080/v1","name":"tiny","key":"sk"}}}"#,
    )
    .unwrap();

    let agent_path = dir.path().join("agent.json");
    let mut file = std::fs::File::create(&agent_path).unwrap();
    write!(
        file,
        r#"{{"agent_name":"top","model_name":"fast","view_files":true,
            "scenarios":{{"lost":{{"headline":"User is lost","takeaways":["Ask"]}}}},
            "sub_agents":[{{"agent_name":"helper","model_name":"fast"}}]}}"#
    )
    .unwrap();

    let models: ModelsFile = load_json(&models_path).unwrap();
    let agent: AgentFile = load_json(&agent_path).unwrap();

    assert_eq!(models.models["fast"].name, "tiny");
    assert!(agent.view_files);
    assert_eq!(agent.scenarios["lost"].takeaways, ["Ask"]);
    assert_eq!(agent.sub_agents[0].agent_name, "helper");
}

#[test]
fn missing_file_names_the_path() {
    let err = load_json::<ModelsFile>("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
    assert!(err.to_string().contains("/definitely/not/here.json"));
}

#[test]
fn malformed_file_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("agent.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = load_json::<AgentFile>(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}
