use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use sharesign_core::{Context, OsEnv};
use sharesign_file_read_tokio::TokioFileRead;
use sharesign_http_send_reqwest::ReqwestHttpSend;
use sharesign_s3::{Config, Host, Notice, Uploader};
use tokio::io::AsyncReadExt;

/// Host that shares whatever is piped into stdin.
///
/// Settings come from `SHARE_TO_S3_*` envs, then from the JSON settings file
/// given as the first argument.
#[derive(Debug)]
struct StdinHost {
    ctx: Context,
    settings: Option<String>,
}

#[async_trait]
impl Host for StdinHost {
    async fn secrets(&self) -> sharesign_core::Result<Config> {
        let cfg = Config::default().from_env(&self.ctx);
        match &self.settings {
            Some(path) => cfg.from_file(&self.ctx, path).await,
            None => Ok(cfg),
        }
    }

    async fn buffer_content(&self) -> sharesign_core::Result<Bytes> {
        let mut buf = Vec::new();
        tokio::io::stdin().read_to_end(&mut buf).await?;
        Ok(buf.into())
    }

    fn notify(&self, notice: Notice) {
        match notice {
            Notice::Status(msg) => eprintln!("{msg}"),
            Notice::Error(msg) => eprintln!("error: {msg}"),
        }
    }

    async fn prompt_filename(&self, default: &str) -> Option<String> {
        Some(default.to_string())
    }

    fn set_clipboard(&self, text: &str) {
        println!("{text}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = env_logger::try_init();
    let _ = dotenv::dotenv();

    let ctx = Context::new()
        .with_file_read(TokioFileRead)
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);
    let host = StdinHost {
        ctx: ctx.clone(),
        settings: std::env::args().nth(1),
    };

    let uploader = Uploader::new(ctx, host);
    // Failures were already reported through the host.
    if let Ok(handle) = uploader.share().await {
        let _ = handle.await?;
    }

    Ok(())
}
