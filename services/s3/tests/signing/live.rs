use super::init_logger;
use anyhow::Result;
use bytes::Bytes;
use http::{Method, StatusCode};
use log::{debug, warn};
use sharesign_core::{Context, OsEnv};
use sharesign_file_read_tokio::TokioFileRead;
use sharesign_http_send_reqwest::ReqwestHttpSend;
use sharesign_s3::{default_object_name, object_url, public_url, Config, RequestSigner};
use std::env;

/// Load config from `SHARE_TO_S3_*` envs if live tests are enabled.
fn init_live_test() -> Option<(Context, Config)> {
    init_logger();
    let _ = dotenv::dotenv();

    if env::var("SHARESIGN_S3_TEST").ok().as_deref() != Some("on") {
        return None;
    }

    let ctx = Context::new()
        .with_file_read(TokioFileRead)
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);
    let cfg = Config::default().from_env(&ctx);
    cfg.validate().expect("SHARE_TO_S3_* envs must be set");

    Some((ctx, cfg))
}

#[tokio::test]
async fn test_live_put_object() -> Result<()> {
    let Some((ctx, cfg)) = init_live_test() else {
        warn!("SHARESIGN_S3_TEST is not set, skipped");
        return Ok(());
    };

    let key = default_object_name(&chrono::Utc::now());
    let url = object_url(&cfg, &key);
    let content = Bytes::from_static(b"Hello, World!");

    let headers = RequestSigner::new(cfg.region()).sign_parts(
        Method::PUT,
        &url,
        content.clone(),
        &cfg.credential(),
    )?;

    let mut req = http::Request::builder()
        .method(Method::PUT)
        .uri(&url)
        .body(content)?;
    req.headers_mut().extend(headers);

    let resp = ctx.http_send(req).await?;
    debug!("live upload got status {}", resp.status());
    assert!(
        matches!(resp.status(), StatusCode::OK | StatusCode::CREATED),
        "upload must succeed, got {}: {}",
        resp.status(),
        String::from_utf8_lossy(resp.body())
    );
    debug!("object served at {}", public_url(&cfg, &key));

    Ok(())
}

#[tokio::test]
async fn test_live_put_object_with_wrong_secret() -> Result<()> {
    let Some((ctx, cfg)) = init_live_test() else {
        warn!("SHARESIGN_S3_TEST is not set, skipped");
        return Ok(());
    };

    let key = default_object_name(&chrono::Utc::now());
    let url = object_url(&cfg, &key);
    let mut cred = cfg.credential();
    cred.secret_access_key.push('X');

    let headers =
        RequestSigner::new(cfg.region()).sign_parts(Method::PUT, &url, "Hello, World!", &cred)?;

    let mut req = http::Request::builder()
        .method(Method::PUT)
        .uri(&url)
        .body(Bytes::from_static(b"Hello, World!"))?;
    req.headers_mut().extend(headers);

    let resp = ctx.http_send(req).await?;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    Ok(())
}
