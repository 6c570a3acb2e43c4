use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::prelude::*;

// Invited teams of The International 2025
const DEFAULT_TEAMS: [i64; 16] = [
    36, 2163, 7119388, 7554697, 7732977, 8255888, 8261500, 8291895, 9247354, 9303484, 9351740,
    9467224, 9572001, 9640842, 9651185, 9691969,
];

const DEFAULT_TOURNAMENT: i64 = 18324;

#[derive(Debug, Parser)]
#[command(version, about = "Collects and analyzes pro match data for a tournament")]
struct Cli {
    /// API token for the upstream GraphQL endpoint
    #[arg(long, env = "STRATZ_API_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    #[arg(long, env = "STRATZ_ENDPOINT", default_value = collector::stratz::DEFAULT_ENDPOINT, global = true)]
    endpoint: String,

    /// League id the analysis is restricted to
    #[arg(long, default_value_t = DEFAULT_TOURNAMENT, global = true)]
    tournament: i64,

    /// Team id to collect, may be repeated
    #[arg(long = "team", default_values_t = DEFAULT_TEAMS, global = true)]
    teams: Vec<i64>,

    #[arg(long, default_value = "out", global = true)]
    out: PathBuf,

    /// Matches requested per team
    #[arg(long, default_value_t = 15, global = true)]
    take: u32,

    #[arg(long, default_value_t = 0, global = true)]
    skip: u32,

    /// Heroes requested per player career
    #[arg(long, default_value_t = 10, global = true)]
    take_heroes: u32,

    /// Teams processed concurrently
    #[arg(long, default_value_t = 4, global = true)]
    workers: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, clap::Subcommand)]
enum Command {
    /// Dump the raw team documents
    Fetch,
    /// Analyze the dumped team documents
    Analyze,
    /// Fetch the careers of every player in the dumped team documents
    Careers,
    /// Attach the fetched careers to the analyzed team documents
    Join,
    /// Fetch, analyze and fetch careers in one go
    Run,
}

impl Cli {
    fn settings(&self) -> collector::pipeline::Settings {
        collector::pipeline::Settings {
            tournament_id: self.tournament,
            team_ids: self.teams.clone(),
            take: self.take,
            skip: self.skip,
            take_heroes: self.take_heroes,
            workers: self.workers,
            out_dir: self.out.clone(),
        }
    }

    fn client(&self) -> collector::Result<collector::stratz::Client> {
        let token = self
            .token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or(collector::Error::MissingToken)?;

        Ok(collector::stratz::Client::new(self.endpoint.as_str(), token))
    }
}

async fn execute(cli: Cli) -> collector::Result<()> {
    let settings = cli.settings();

    match cli.command {
        Command::Fetch => {
            let client = cli.client()?;
            let written = collector::pipeline::fetch_teams(&client, &settings).await;
            tracing::info!("Dumped {} of {} teams", written.len(), settings.team_ids.len());
        }
        Command::Analyze => {
            let written = collector::pipeline::analyze_dir(&settings).await?;
            tracing::info!("Analyzed {} teams", written.len());
        }
        Command::Careers => {
            let client = cli.client()?;
            collector::pipeline::careers_from_dir(&client, &settings).await?;
        }
        Command::Join => {
            let written = collector::pipeline::join_careers(&settings).await?;
            tracing::info!("Joined careers into {} teams", written.len());
        }
        Command::Run => {
            let client = cli.client()?;
            collector::pipeline::run(&client, &settings).await?;
        }
    };

    Ok(())
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let registry = tracing_subscriber::Registry::default()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        );
    if let Err(e) = tracing::subscriber::set_global_default(registry) {
        eprintln!("Installing tracing subscriber: {}", e);
    }

    let cli = Cli::parse();
    tracing::debug!(command = ?cli.command, tournament = cli.tournament, "Starting");

    match execute(cli).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::ExitCode::FAILURE
        }
    }
}
