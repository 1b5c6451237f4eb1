// src/main.rs
// seo-report - webhook proxy and heuristic SEO scorer

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use seo_report::api::{self, AppState};
use seo_report::config::CONFIG;

#[derive(Parser)]
#[command(name = "seo-report")]
#[command(about = "Website SEO reports via an analysis webhook or a local heuristic scorer")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve {
        /// Address to bind (overrides SEO_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides SEO_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Score a topic locally and print the report as JSON
    Analyze {
        /// Main topic of the page
        #[arg(short, long)]
        topic: String,

        /// Website the report is for
        #[arg(short, long, default_value = "https://example.com")]
        url: String,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
}

async fn run_server(host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut config = (*CONFIG).clone();
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }

    let validation = config.validate();
    for warning in &validation.warnings {
        warn!("{}", warning);
    }
    if !validation.is_valid() {
        bail!("Invalid configuration\n{}", validation.report());
    }

    let addr = config.bind_address();
    let state = AppState::new(config)?;
    match &state.webhook {
        Some(client) => info!(webhook = %client.url(), "Webhook analysis enabled"),
        None => info!("No webhook configured - using heuristic scorer"),
    }

    let app = api::create_router(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("SEO report server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

fn run_analyze(topic: &str, url: &str, pretty: bool) -> Result<()> {
    let report = seo_report::analysis::analyze(url, topic);
    let output = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", output);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so `analyze` output stays clean JSON
    let subscriber = FmtSubscriber::builder()
        .with_max_level(CONFIG.tracing_level())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Some(Commands::Serve { host, port }) => run_server(host, port).await,
        None => run_server(None, None).await,
        Some(Commands::Analyze { topic, url, pretty }) => run_analyze(&topic, &url, pretty),
    }
}
