use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use serde::Serialize;
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use oss_client::{config, OperationResult, ProgressCallback, StorageGateway};

const USAGE: &str = "\
Usage: oss-client [--config PATH] <command> [args]

Commands:
  upload <local> <key>              Upload a local file
  put <key> <text>                  Upload text content
  download <key> <local>            Download through a signed URL
  delete <key>                      Delete an object
  copy <src> <dest>                 Copy within the bucket
  move <src> <dest>                 Move within the bucket
  list [prefix] [limit] [marker]    List one page of objects
  stat <key>                        Show object metadata
  exists <key>                      Check whether an object exists
  url <key> [ttl_secs]              Signed download URL
  token [key]                       Upload token for the bucket or one key";

/// Parsed command line / 命令行参数
struct Cli {
    config_path: PathBuf,
    command: String,
    args: Vec<String>,
}

impl Cli {
    fn parse() -> anyhow::Result<Option<Self>> {
        let mut config_path = None;
        let mut rest = Vec::new();
        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-c" | "--config" => {
                    config_path = Some(PathBuf::from(args.next().ok_or_else(|| anyhow!("--config needs a path"))?));
                }
                "-h" | "--help" => return Ok(None),
                "-V" | "--version" => {
                    println!("oss-client {} (built {})", env!("CARGO_PKG_VERSION"), env!("BUILD_TIME"));
                    std::process::exit(0);
                }
                _ => rest.push(arg),
            }
        }
        if rest.is_empty() {
            return Ok(None);
        }
        let command = rest.remove(0);
        Ok(Some(Self {
            config_path: config_path.unwrap_or_else(config::default_config_path),
            command,
            args: rest,
        }))
    }

    fn arg(&self, index: usize, name: &str) -> anyhow::Result<&str> {
        self.args
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| anyhow!("missing argument <{}>\n\n{}", name, USAGE))
    }

    fn opt(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }
}

/// Print the flat JSON rendering and map success to the exit code / 输出结果
fn report<T: Serialize>(result: OperationResult<T>) -> anyhow::Result<bool> {
    println!("{}", serde_json::to_string_pretty(&result.to_json())?);
    Ok(result.is_success())
}

async fn run(cli: Cli) -> anyhow::Result<bool> {
    let gateway = StorageGateway::from_config_file(&cli.config_path)
        .with_context(|| format!("Failed to initialize storage client from {:?}", cli.config_path))?;

    match cli.command.as_str() {
        "upload" => {
            let local = cli.arg(0, "local")?;
            let key = cli.arg(1, "key")?;
            let progress: ProgressCallback = Arc::new(|sent, total| {
                tracing::debug!("Upload progress: {}/{}", sent, total);
            });
            report(gateway.upload(local, key, Some(progress)).await?)
        }
        "put" => {
            let key = cli.arg(0, "key")?;
            let text = cli.arg(1, "text")?.to_string();
            report(gateway.upload_bytes(text, key).await)
        }
        "download" => report(gateway.download(cli.arg(0, "key")?, cli.arg(1, "local")?).await),
        "delete" => report(gateway.delete(cli.arg(0, "key")?).await),
        "copy" => report(gateway.copy(cli.arg(0, "src")?, cli.arg(1, "dest")?).await),
        "move" => report(gateway.move_object(cli.arg(0, "src")?, cli.arg(1, "dest")?).await),
        "list" => {
            let prefix = cli.opt(0).unwrap_or("");
            let limit = match cli.opt(1) {
                Some(limit) => limit.parse().with_context(|| format!("invalid limit: {}", limit))?,
                None => 100,
            };
            let marker = cli.opt(2).unwrap_or("");
            report(gateway.list(prefix, limit, marker).await)
        }
        "stat" => report(gateway.stat(cli.arg(0, "key")?).await),
        "exists" => {
            let key = cli.arg(0, "key")?;
            let exists = gateway.exists(key).await;
            println!("{}", json!({ "key": key, "exists": exists }));
            Ok(exists)
        }
        "url" => {
            let key = cli.arg(0, "key")?;
            let ttl = match cli.opt(1) {
                Some(ttl) => Some(Duration::from_secs(
                    ttl.parse().with_context(|| format!("invalid ttl: {}", ttl))?,
                )),
                None => None,
            };
            println!("{}", gateway.download_url(key, ttl)?);
            Ok(true)
        }
        "token" => {
            let token = gateway.upload_token(cli.opt(0), None);
            println!("{}", token.as_str());
            Ok(true)
        }
        other => bail!("unknown command: {}\n\n{}", other, USAGE),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "oss_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = match Cli::parse() {
        Ok(Some(cli)) => cli,
        Ok(None) => {
            println!("{}", USAGE);
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::from(2)
        }
    }
}
