mod chat;
mod gemini;
mod markdown;
mod places;
mod tools;

pub const USER_AGENT: &str = concat!("digitravel/", env!("CARGO_PKG_VERSION"));

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use reqwest::Client;
use rmcp::{ServiceExt, transport::stdio};
use tracing::info;

use chat::ChatSession;
use chat::render::render_message;
use gemini::GeminiClient;
use places::ContentPack;
use places::format::format_places;
use tools::DigiTravel;

/// TCP connection establishment timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Network-level ceiling for one upstream call; the guide itself sets no per-query timeout.
const HTTP_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Parser)]
#[command(version, about = "Real-time travel guide backed by Gemini with Google Search grounding")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// JSON content pack with featured places
    #[arg(long, env = "DIGITRAVEL_CONTENT", global = true)]
    content: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run as an MCP server over stdio (default)
    Serve,
    /// Ask a single question and print the answer with its sources
    Ask { question: String },
    /// Interactive chat in the terminal
    Chat,
    /// Print the featured places from the content pack
    Places {
        /// Language code for localized text
        #[arg(long, default_value = places::DEFAULT_LANG)]
        lang: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "digitravel=info",
        1 => "digitravel=debug",
        _ => "digitravel=trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.parse()?),
        )
        .init();

    let places = cli
        .content
        .as_deref()
        .map(ContentPack::load)
        .transpose()
        .inspect_err(|e| tracing::error!("failed to load content pack: {e}"))?;

    let http = Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(HTTP_TIMEOUT)
        .build()?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            info!("starting digitravel MCP server");
            let service = DigiTravel::new(http, places)
                .serve(stdio())
                .await
                .inspect_err(|e| tracing::error!("failed to start server: {e}"))?;
            service.waiting().await?;
            info!("server stopped");
        }
        Command::Ask { question } => {
            let session = ChatSession::new(GeminiClient::from_env(http)?);
            let reply = session.send(&question).await?;
            print!("{}", render_message(&reply));
        }
        Command::Chat => {
            let session = ChatSession::new(GeminiClient::from_env(http)?);
            chat::repl::run(&session).await?;
        }
        Command::Places { lang } => {
            let pack = places.ok_or("no content pack; pass --content or set DIGITRAVEL_CONTENT")?;
            print!("{}", format_places(pack.places(), &lang));
        }
    }
    Ok(())
}
