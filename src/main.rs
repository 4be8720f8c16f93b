use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::{debug, info};

use racecontrol::fetch::{fetch_dashboard, FetchStatus};
use racecontrol::output;
use racecontrol::provider::SnapshotSource;
use racecontrol::scoring::{validate_scoring, ParameterOverrides};

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_NETWORK: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq)]
enum OutputFormat {
    #[default]
    Table,
    Tsv,
    Json,
}

#[derive(Args, Debug, Default)]
struct ScoringArgs {
    /// Recent-form window in rounds (at least 2)
    #[arg(long)]
    last_n: Option<usize>,

    /// Weight of recent form
    #[arg(long)]
    weight_recent: Option<f64>,

    /// Weight of season form
    #[arg(long)]
    weight_season: Option<f64>,

    /// Penalty per unit of normalized volatility
    #[arg(long)]
    volatility_penalty: Option<f64>,
}

impl ScoringArgs {
    fn overrides(&self) -> ParameterOverrides {
        ParameterOverrides {
            last_n: self.last_n,
            weight_recent: self.weight_recent,
            weight_season: self.weight_season,
            volatility_penalty: self.volatility_penalty,
        }
    }
}

#[derive(Args, Debug, Default)]
struct ScoresArgs {
    /// Score using results up to this round (defaults to the latest completed round)
    #[arg(long)]
    round: Option<u32>,

    #[command(flatten)]
    scoring: ScoringArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Show how each signal contributed to the score
    #[arg(long)]
    breakdown: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rank competitors by fantasy score (default if no subcommand)
    Scores(ScoresArgs),
    /// Season overview: completed rounds, leaders, next race
    Summary,
    /// Full drivers' and constructors' championship tables
    Standings {
        /// Show only the drivers' table
        #[arg(long, conflicts_with = "constructors")]
        drivers: bool,

        /// Show only the constructors' table
        #[arg(long)]
        constructors: bool,
    },
    /// Race-by-race results up to the selected round
    Results {
        /// Last round to list (defaults to the latest completed round)
        #[arg(long)]
        round: Option<u32>,
    },
    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "racecontrol")]
#[command(about = "Season dashboard and fantasy helper", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/racecontrol/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Season to load, e.g. 2025 or "current"
    #[arg(long, global = true)]
    season: Option<String>,

    /// Read results from a JSON snapshot instead of the API
    #[arg(long, global = true)]
    snapshot: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+); an
    // already-installed provider is fine
    let _ = rustls::crypto::ring::default_provider().install_default();

    let cli = Cli::parse();
    racecontrol::logging::init_logging(cli.verbose);
    let command = cli
        .command
        .unwrap_or_else(|| Commands::Scores(ScoresArgs::default()));
    let config_path = cli.config.map(PathBuf::from);

    if let Commands::Init { force } = command {
        let path = match config_path {
            Some(p) => p,
            None => match racecontrol::config::get_config_path() {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("Config error: {}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            },
        };
        if let Err(e) = racecontrol::config::write_default_config(&path, force) {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        println!("Wrote default config to {}", path.display());
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let mut config = match racecontrol::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    if cli.season.is_some() {
        config.season = cli.season;
    }
    if cli.snapshot.is_some() {
        config.snapshot = cli.snapshot;
    }

    let (requested_round, overrides) = match &command {
        Commands::Scores(args) => (args.round, args.scoring.overrides()),
        Commands::Results { round } => (*round, ParameterOverrides::default()),
        _ => (None, ParameterOverrides::default()),
    };

    // Validate scoring parameters before anything is fetched
    let params = config
        .scoring
        .clone()
        .unwrap_or_default()
        .with_overrides(&overrides);
    if let Err(errors) = validate_scoring(&params) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }
    debug!(?params, "Effective scoring parameters");

    let source = match SnapshotSource::from_config(&config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to create results client: {:#}", e);
            std::process::exit(EXIT_NETWORK);
        }
    };
    info!(season = config.season(), source = %source.describe(), "Loading season");

    let fetched = fetch_dashboard(&source, config.season(), requested_round, &params).await;
    let dashboard = match fetched {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Scoring error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let use_colors = output::should_use_colors();
    if let FetchStatus::Offline { last_error } = &dashboard.status {
        eprintln!("{}", output::format_offline_banner(last_error, use_colors));
        eprintln!();
    }

    match command {
        Commands::Scores(args) => match args.format {
            OutputFormat::Table if args.breakdown && !dashboard.scores.is_empty() => {
                for scored in &dashboard.scores {
                    println!("{}", output::format_breakdown(scored, use_colors));
                    println!();
                }
            }
            OutputFormat::Table => {
                println!("{}", output::format_scored_table(&dashboard.scores, use_colors));
            }
            OutputFormat::Tsv => {
                let tsv = output::format_tsv(&dashboard.scores);
                if !tsv.is_empty() {
                    println!("{}", tsv);
                }
            }
            OutputFormat::Json => match output::format_json(&dashboard.scores) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("Output error: {:#}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            },
        },
        Commands::Summary => {
            println!("{}", output::format_summary(&dashboard, use_colors));
        }
        Commands::Standings {
            drivers,
            constructors,
        } => {
            let mut sections = Vec::new();
            if !constructors {
                sections.push((
                    "Driver Standings",
                    &dashboard.snapshot.driver_standings,
                ));
            }
            if !drivers {
                sections.push((
                    "Constructor Standings",
                    &dashboard.snapshot.constructor_standings,
                ));
            }
            let rendered: Vec<String> = sections
                .into_iter()
                .map(|(title, standings)| {
                    format!(
                        "{}\n{}",
                        title,
                        output::format_standings_table(standings, use_colors)
                    )
                })
                .collect();
            println!("{}", rendered.join("\n\n"));
        }
        Commands::Results { .. } => {
            let rows = dashboard.results_in_window();
            println!("{}", output::format_results_table(&rows, use_colors));
        }
        // Handled before the config is loaded
        Commands::Init { .. } => {}
    }

    if dashboard.status.is_offline() {
        std::process::exit(EXIT_NETWORK);
    }
    std::process::exit(EXIT_SUCCESS);
}
