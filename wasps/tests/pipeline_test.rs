use clap::Parser;
use serde_json::{Value, json};
use std::fs;
use tempfile::TempDir;

use wasps::{
    WaspsError,
    app::execute,
    cli::Args,
    configs::WaspsConfig,
    store::LocalParameterStore,
};

fn config(argv: &[&str]) -> WaspsConfig {
    let mut full = vec!["wasps"];
    full.extend_from_slice(argv);
    WaspsConfig::try_from(Args::try_parse_from(full).unwrap()).unwrap()
}

fn store() -> LocalParameterStore {
    LocalParameterStore::with_parameters([
        ("/dev/app/HOST", "a"),
        ("/dev/app/PORT", "1"),
        ("/dev/app/db/PASSWORD", "s3cr3t"),
        ("/dev/override/HOST", "b"),
    ])
}

#[tokio::test]
async fn test_suppress_prints_nothing_but_writes_json() {
    let dir = TempDir::new().unwrap();
    let json_path = dir.path().join("config.json");
    let config = config(&["-d", "/dev/app", "-j", json_path.to_str().unwrap(), "-n"]);
    let store = store();
    let mut out: Vec<u8> = Vec::new();

    execute(&config, &store, &store, &mut out).await.unwrap();

    assert!(out.is_empty());
    let written: Value = serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(
        written,
        json!({"HOST": "a", "PORT": "1", "db/PASSWORD": "s3cr3t"})
    );
}

#[tokio::test]
async fn test_prints_merged_parameters_to_stdout() {
    let config = config(&["-d", "/dev/app", "/dev/override", "--key-policy", "name"]);
    let store = store();
    let mut out: Vec<u8> = Vec::new();

    let merged = execute(&config, &store, &store, &mut out)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(merged.get("HOST"), Some("b"));
    let printed: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(
        printed,
        json!({"HOST": "b", "PORT": "1", "PASSWORD": "s3cr3t"})
    );
}

#[tokio::test]
async fn test_path_order_decides_collisions() {
    let store = store();
    let mut out: Vec<u8> = Vec::new();

    let forward = execute(
        &config(&["-d", "/dev/app", "/dev/override", "-n"]),
        &store,
        &store,
        &mut out,
    )
    .await
    .unwrap()
    .unwrap();
    let backward = execute(
        &config(&["-d", "/dev/override", "/dev/app", "-n"]),
        &store,
        &store,
        &mut out,
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(forward.get("HOST"), Some("b"));
    assert_eq!(backward.get("HOST"), Some("a"));
    assert_eq!(
        store.fetch_log(),
        vec!["/dev/app", "/dev/override", "/dev/override", "/dev/app"]
    );
}

#[tokio::test]
async fn test_every_format_from_one_merge() {
    let dir = TempDir::new().unwrap();
    let json_path = dir.path().join("config.json");
    let ini_path = dir.path().join("config.ini");
    let properties_path = dir.path().join("application.properties");
    let config = config(&[
        "-d",
        "/dev/app",
        "-j",
        json_path.to_str().unwrap(),
        "-i",
        ini_path.to_str().unwrap(),
        "-o",
        properties_path.to_str().unwrap(),
        "--nested",
        "--ini-section",
        "app",
        "-n",
    ]);
    let store = store();

    execute(&config, &store, &store, &mut Vec::<u8>::new())
        .await
        .unwrap();

    let written: Value = serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(
        written,
        json!({"HOST": "a", "PORT": "1", "db": {"PASSWORD": "s3cr3t"}})
    );
    assert_eq!(
        fs::read_to_string(&ini_path).unwrap(),
        "[app]\nHOST = a\nPORT = 1\ndb/PASSWORD = s3cr3t\n"
    );
    assert_eq!(
        fs::read_to_string(&properties_path).unwrap(),
        "HOST=a\nPORT=1\ndb/PASSWORD=s3cr3t\n"
    );
}

#[tokio::test]
async fn test_fetch_failure_leaves_no_output() {
    let dir = TempDir::new().unwrap();
    let json_path = dir.path().join("config.json");
    let config = config(&["-d", "/dev/app", "/dev/override", "-j", json_path.to_str().unwrap()]);
    let store = store();
    store.deny("/dev/override");
    let mut out: Vec<u8> = Vec::new();

    let err = execute(&config, &store, &store, &mut out).await.unwrap_err();

    assert!(matches!(err, WaspsError::Fetch { ref path, .. } if path == "/dev/override"));
    assert!(err.to_string().contains("/dev/override"));
    assert!(out.is_empty());
    assert!(!json_path.exists());
}

#[tokio::test]
async fn test_seed_is_written_before_reading() {
    let dir = TempDir::new().unwrap();
    let seed_path = dir.path().join("seed.json");
    fs::write(&seed_path, r#"{"/dev/app/HOST": "seeded", "/dev/app/NEW": "n"}"#).unwrap();
    let config = config(&["-c", seed_path.to_str().unwrap(), "-d", "/dev/app", "-n"]);
    let store = store();

    let merged = execute(&config, &store, &store, &mut Vec::<u8>::new())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(merged.get("HOST"), Some("seeded"));
    assert_eq!(merged.get("NEW"), Some("n"));
    assert_eq!(store.get("/dev/app/NEW").as_deref(), Some("n"));
}

#[tokio::test]
async fn test_seed_only_skips_merge() {
    let config = config(&["--config-json", r#"{"/dev/other/KEY": "v"}"#]);
    let store = store();
    let mut out: Vec<u8> = Vec::new();

    let merged = execute(&config, &store, &store, &mut out).await.unwrap();

    assert!(merged.is_none());
    assert!(out.is_empty());
    assert!(store.fetch_log().is_empty());
    assert_eq!(store.get("/dev/other/KEY").as_deref(), Some("v"));
}

#[tokio::test]
async fn test_invalid_seed_aborts_before_any_fetch() {
    let config = config(&["--config-json", r#"{"/dev/app/HOST": ["a"]}"#, "-d", "/dev/app"]);
    let store = store();

    let err = execute(&config, &store, &store, &mut Vec::<u8>::new())
        .await
        .unwrap_err();

    assert!(matches!(err, WaspsError::Configuration(_)));
    assert!(store.fetch_log().is_empty());
    assert_eq!(store.get("/dev/app/HOST").as_deref(), Some("a"));
}
