//! ceos-scrape — entry point.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use ceos_core::CacheStore;
use ceos_scrape::{
    render_json, scrape, AcronymResolver, AcronymServiceClient, ConsolePrompter, HttpClient,
    MissionPageClient, ScrapeConfig,
};

#[derive(Parser)]
#[command(
    name = "ceos-scrape",
    about = "Scrape CEOS mission metadata and resolve agency acronyms to canonical names",
    version
)]
struct Cli {
    /// Agency cache file (JSON object of acronym -> name).
    #[arg(long)]
    cache: Option<String>,

    /// Write the mission JSON here instead of stdout.
    #[arg(short, long)]
    output: Option<String>,

    /// CEOS mission table URL.
    #[arg(long)]
    mission_url: Option<String>,

    /// Acronym service base URL (organizations category).
    #[arg(long)]
    acronym_url: Option<String>,

    /// Per-request timeout in milliseconds.
    #[arg(long)]
    timeout: Option<u64>,

    /// Do not clear the screen before showing acronym choices.
    #[arg(long)]
    no_clear: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completion scripts.
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "ceos-scrape", &mut std::io::stdout());
        return Ok(());
    }

    let config = ScrapeConfig::resolve(
        cli.mission_url.as_deref(),
        cli.acronym_url.as_deref(),
        cli.cache.as_deref(),
        cli.timeout,
        !cli.no_clear,
    );

    if let Err(e) = run(&config, cli.output.as_deref()).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run(config: &ScrapeConfig, output: Option<&str>) -> anyhow::Result<()> {
    tracing::info!("Missions: {}", config.mission_url);
    tracing::info!("Agency cache: {}", config.cache_path.display());

    let http = HttpClient::new(config.timeout_ms);
    let missions = MissionPageClient::new(http.clone(), config.mission_url.clone());
    let acronyms = AcronymServiceClient::new(http, config.acronym_url.clone());
    let prompter = ConsolePrompter::new(config.clear_screen)?;
    let mut resolver = AcronymResolver::new(
        CacheStore::new(config.cache_path.clone()),
        acronyms,
        prompter,
    );

    let records = scrape(&missions, &mut resolver).await?;
    let json = render_json(&records)?;

    match output {
        Some(path) => {
            std::fs::write(path, format!("{json}\n"))?;
            tracing::info!("wrote {} missions to {path}", records.len());
        }
        None => println!("{json}"),
    }

    Ok(())
}
