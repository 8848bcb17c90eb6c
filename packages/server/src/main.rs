#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the football API server.

use std::time::Duration;

use clap::{Parser, Subcommand};
use football_api_league_models::UpstreamSource;
use football_api_server::ServerConfig;

#[derive(Parser)]
#[command(name = "football_api_server", about = "Football data scraping API server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Prompt for the bind address and port before starting
    #[arg(long)]
    interactive: bool,
    /// Listen address (overrides `BIND_ADDR`)
    #[arg(long)]
    bind: Option<String>,
    /// Listen port (overrides `PORT`)
    #[arg(long)]
    port: Option<u16>,
    /// Wikipedia base URL (overrides `FOOTBALL_API_WIKIPEDIA_URL`)
    #[arg(long)]
    wikipedia_url: Option<String>,
    /// Eurosport base URL (overrides `FOOTBALL_API_EUROSPORT_URL`)
    #[arg(long)]
    eurosport_url: Option<String>,
    /// Outbound fetch timeout in seconds (overrides `FOOTBALL_API_TIMEOUT_SECS`)
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported leagues, their keys and upstream coverage
    Leagues,
}

impl Cli {
    fn server_config(&self) -> ServerConfig {
        let mut config = ServerConfig::from_env();

        if let Some(bind) = &self.bind {
            config = config.with_bind_addr(bind);
        }
        if let Some(port) = self.port {
            config = config.with_port(port);
        }
        if let Some(url) = &self.wikipedia_url {
            config.scrape = config.scrape.with_wikipedia_url(url);
        }
        if let Some(url) = &self.eurosport_url {
            config.scrape = config.scrape.with_eurosport_url(url);
        }
        if let Some(secs) = self.timeout_secs {
            config.scrape = config.scrape.with_timeout(Duration::from_secs(secs));
        }

        config
    }
}

fn print_leagues() {
    println!("{:<24} {:<40} SOURCES", "NAME", "KEYS");
    println!("{}", "-".repeat(100));
    for league in football_api_league::registry().all() {
        let sources: Vec<String> = league
            .supported_sources()
            .iter()
            .map(UpstreamSource::to_string)
            .collect();
        println!(
            "{:<24} {:<40} {}",
            league.name,
            league.keys.join(", "),
            sources.join(", ")
        );
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    if let Some(Commands::Leagues) = cli.command {
        print_leagues();
        return Ok(());
    }

    let config = cli.server_config();

    if cli.interactive {
        return football_api_server::interactive::run(config).await;
    }

    football_api_server::run_server(config).await
}
