//! 設定の保存・読み込みテスト

use meter_ai_rust::config::Config;
use tempfile::tempdir;

/// 保存した設定がそのまま読み戻せる
#[test]
fn test_config_round_trip() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");

    let config = Config {
        upload_url: Some("https://example.com/upload".to_string()),
        submit_url: Some("https://example.com/submit".to_string()),
        timeout_seconds: 30,
    };
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.upload_url.as_deref(), Some("https://example.com/upload"));
    assert_eq!(loaded.submit_url.as_deref(), Some("https://example.com/submit"));
    assert_eq!(loaded.timeout_seconds, 30);
}

/// 設定ファイルがない場合はデフォルト設定になる
#[test]
fn test_missing_config_file_yields_default() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nonexistent.json");

    let config = Config::load_from(&path).unwrap();
    assert!(config.upload_url.is_none());
    assert!(config.submit_url.is_none());
    assert_eq!(config.timeout_seconds, 60);
}

/// 親ディレクトリがなくても保存できる
#[test]
fn test_save_creates_parent_directories() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("dir").join("config.json");

    Config::default().save_to(&path).unwrap();
    assert!(path.exists());
}

/// 壊れた設定ファイルはエラーになる
#[test]
fn test_corrupt_config_file_is_an_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(Config::load_from(&path).is_err());
}

/// 環境変数が設定ファイルより優先される
#[test]
fn test_env_var_overrides_config_file() {
    let config = Config {
        upload_url: Some("https://example.com/from-file".to_string()),
        submit_url: Some("https://example.com/from-file".to_string()),
        timeout_seconds: 60,
    };

    // 同一プロセス内の他テストと競合しないよう、ここでまとめて検証する
    std::env::set_var(
        meter_ai_rust::config::UPLOAD_URL_ENV,
        "https://example.com/from-env",
    );
    assert_eq!(config.upload_url().unwrap(), "https://example.com/from-env");

    std::env::remove_var(meter_ai_rust::config::UPLOAD_URL_ENV);
    assert_eq!(config.upload_url().unwrap(), "https://example.com/from-file");
}
