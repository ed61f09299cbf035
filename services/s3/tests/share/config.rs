use anyhow::Result;
use pretty_assertions::assert_eq;
use sharesign_core::{Context, ErrorKind, StaticEnv};
use sharesign_file_read_tokio::TokioFileRead;
use sharesign_s3::{Config, SHARE_TO_S3_ENDPOINT, SHARE_TO_S3_SECRET_KEY};
use std::collections::HashMap;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

const SETTINGS: &str = r#"{
    "s3_endpoint": "https://s3.example.com/",
    "s3_username": "AKIDEXAMPLE",
    "s3_password": "wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY",
    "s3_url_prefix": "https://cdn.example.com",
    "s3_bucket": "notes"
}"#;

fn file_ctx(home: Option<&TempDir>) -> Context {
    Context::new()
        .with_file_read(TokioFileRead)
        .with_env(StaticEnv {
            home_dir: home.map(|v| v.path().to_path_buf()),
            envs: HashMap::new(),
        })
}

#[tokio::test]
async fn test_from_file() -> Result<()> {
    super::init_logger();

    let mut f = NamedTempFile::new()?;
    f.write_all(SETTINGS.as_bytes())?;
    let path = f.path().to_string_lossy().to_string();

    let cfg = Config::default().from_file(&file_ctx(None), &path).await?;
    cfg.validate()?;

    assert_eq!(cfg.endpoint(), "https://s3.example.com");
    assert_eq!(cfg.url_prefix(), "https://cdn.example.com");
    assert_eq!(cfg.bucket(), "notes");
    assert_eq!(cfg.region(), "global");
    assert_eq!(cfg.credential().access_key_id, "AKIDEXAMPLE");
    Ok(())
}

#[tokio::test]
async fn test_from_file_expands_home_dir() -> Result<()> {
    let home = TempDir::new()?;
    std::fs::write(home.path().join("share.json"), SETTINGS)?;

    let cfg = Config::default()
        .from_file(&file_ctx(Some(&home)), "~/share.json")
        .await?;

    assert_eq!(cfg.bucket(), "notes");
    Ok(())
}

#[tokio::test]
async fn test_from_file_keeps_explicit_fields() -> Result<()> {
    let mut f = NamedTempFile::new()?;
    f.write_all(SETTINGS.as_bytes())?;
    let path = f.path().to_string_lossy().to_string();

    let cfg = Config {
        bucket: Some("explicit".to_string()),
        region: Some("us-east-1".to_string()),
        ..Default::default()
    }
    .from_file(&file_ctx(None), &path)
    .await?;

    assert_eq!(cfg.bucket(), "explicit");
    assert_eq!(cfg.region(), "us-east-1");
    assert_eq!(cfg.endpoint(), "https://s3.example.com");
    Ok(())
}

#[tokio::test]
async fn test_from_file_with_partial_settings() -> Result<()> {
    let mut f = NamedTempFile::new()?;
    f.write_all(br#"{"s3_endpoint": "http://127.0.0.1:9000"}"#)?;
    let path = f.path().to_string_lossy().to_string();

    let cfg = Config::default().from_file(&file_ctx(None), &path).await?;

    let err = cfg.validate().expect_err("settings are incomplete");
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    assert_eq!(
        err.message(),
        "missing settings: access key, secret key, url prefix"
    );
    Ok(())
}

#[tokio::test]
async fn test_from_file_malformed() -> Result<()> {
    let mut f = NamedTempFile::new()?;
    f.write_all(b"{ not json")?;
    let path = f.path().to_string_lossy().to_string();

    let err = Config::default()
        .from_file(&file_ctx(None), &path)
        .await
        .expect_err("malformed settings must fail");
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    Ok(())
}

#[tokio::test]
async fn test_from_file_missing() {
    let err = Config::default()
        .from_file(&file_ctx(None), "/definitely/not/here/share.json")
        .await
        .expect_err("missing settings file must fail");
    assert_eq!(err.kind(), ErrorKind::Unexpected);
}

#[tokio::test]
async fn test_env_takes_precedence_over_file() -> Result<()> {
    let mut f = NamedTempFile::new()?;
    f.write_all(SETTINGS.as_bytes())?;
    let path = f.path().to_string_lossy().to_string();

    let ctx = Context::new()
        .with_file_read(TokioFileRead)
        .with_env(StaticEnv {
            home_dir: None,
            envs: HashMap::from([
                (
                    SHARE_TO_S3_ENDPOINT.to_string(),
                    "http://127.0.0.1:9000".to_string(),
                ),
                (SHARE_TO_S3_SECRET_KEY.to_string(), "from-env".to_string()),
            ]),
        });

    let cfg = Config::default().from_env(&ctx).from_file(&ctx, &path).await?;

    assert_eq!(cfg.endpoint(), "http://127.0.0.1:9000");
    assert_eq!(cfg.credential().secret_access_key, "from-env");
    assert_eq!(cfg.credential().access_key_id, "AKIDEXAMPLE");
    Ok(())
}
