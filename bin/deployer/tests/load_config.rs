//! Loading the deployment configuration at process entry.

use config::{DeploymentMode, Networks};
use deployer::load_config;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_temp(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("Failed to write temp file");
    path
}

#[test]
fn test_load_config_from_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let env_file = write_temp(dir.path(), "empty.env", "");
    let config_file = write_temp(
        dir.path(),
        "local.toml",
        r#"
        deploy_governance_to_nova = true

        [mode]
        kind = "local"

        [mode.rpc]
        eth = "http://localhost:8545"
        arb = "http://localhost:8547"
        nova = "http://localhost:8548"

        [mode.keys]
        nova = "0x5de4111afa1a4b94908f83103eb1f1706367c2e68ca870fc3fb9a804cdab365a"
        "#,
    );

    let config = load_config(Some(&config_file), Some(&env_file)).unwrap();

    assert!(config.is_deploying_to_nova());
    let DeploymentMode::Local(env) = config.mode else {
        panic!("expected local mode");
    };
    assert_eq!(
        env.rpc,
        Networks::new(
            "http://localhost:8545".to_string(),
            "http://localhost:8547".to_string(),
            "http://localhost:8548".to_string(),
        )
    );
    assert!(env.keys.nova.is_some());

    let path = dir.path().to_path_buf();
    dir.close().expect("Failed to remove temp dir");
    assert!(!path.exists());
}

#[test]
fn test_load_config_missing_env_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let missing = dir.path().join("missing.env");
    assert!(load_config(None, Some(&missing)).is_err());
}
