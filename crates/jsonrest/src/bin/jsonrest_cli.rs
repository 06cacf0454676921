use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jsonrest::{JsonExecutor, JsonRequest, JsonRestClient};
use jsonrest_core::{ClientConfig, CONFIG};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "jsonrest-cli", about = "JSON REST endpoint smoke-test tool", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// GET a resource
    Get {
        url: String,
    },
    /// POST a JSON payload
    Post {
        url: String,
        /// Request body, sent verbatim, e.g. '{"name":"demo"}'
        #[arg(long, short = 'd')]
        data: String,
    },
    /// PUT a JSON payload
    Put {
        url: String,
        /// Request body, sent verbatim
        #[arg(long, short = 'd')]
        data: String,
    },
    /// DELETE a resource
    Delete {
        url: String,
    },
}

impl Command {
    fn into_request(self) -> JsonRequest {
        match self {
            Command::Get { url } => JsonRequest::get(url),
            Command::Post { url, data } => JsonRequest::post(url, data),
            Command::Put { url, data } => JsonRequest::put(url, data),
            Command::Delete { url } => JsonRequest::delete(url),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    let cli = Cli::parse();
    let config: &ClientConfig = &CONFIG;
    let client = JsonRestClient::from_config(config).context("failed to build http client")?;

    let request = cli.command.into_request();
    let target = format!("{} {}", request.verb, request.url);
    let object = client
        .execute(request)
        .await
        .with_context(|| format!("{} failed", target))?;

    println!("{}", serde_json::to_string_pretty(&object)?);
    Ok(())
}

fn init_tracing() -> Result<()> {
    if tracing::subscriber::set_global_default(
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .finish(),
    )
    .is_err()
    {
        // tracing already initialised; ignore.
    }
    Ok(())
}
