//! clubctl - rate club games and generate schedules from the command line.

mod config;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use club_core::{Format, PlayerId, Score};
use club_rating::{compute_rating_update, GameInput, PlayerRating};
use club_schedule::{generate_matches, ScheduleKind, ScheduleRequest};
use config::ClubConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "clubctl")]
#[command(about = "Club rating and scheduling tool")]
struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, default_value_os_t = ClubConfig::default_path())]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rate a completed game and print the update as JSON
    Rate {
        /// Singles or doubles
        #[arg(long, value_enum, default_value = "singles")]
        format: FormatArg,
        /// Team 1 players as id=rating, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        team1: Vec<PlayerRating>,
        /// Team 2 players as id=rating, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        team2: Vec<PlayerRating>,
        /// Final score, team 1 first (e.g. 11-7)
        #[arg(long)]
        score: Score,
    },
    /// Generate matches and print them as JSON
    Schedule {
        /// Kind of event
        #[arg(long, value_enum)]
        kind: KindArg,
        /// Singles or doubles
        #[arg(long, value_enum, default_value = "singles")]
        format: FormatArg,
        /// Seed for reproducible shuffles
        #[arg(long)]
        seed: Option<u64>,
        /// Player ids; box leagues are seeded in this order
        #[arg(required = true)]
        players: Vec<String>,
    },
    /// Print the effective configuration as TOML
    Config,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Singles,
    Doubles,
}

impl From<FormatArg> for Format {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Singles => Format::Singles,
            FormatArg::Doubles => Format::Doubles,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum KindArg {
    RoundRobin,
    SingleElimination,
    DoubleElimination,
    BoxLeague,
}

impl From<KindArg> for ScheduleKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::RoundRobin => ScheduleKind::RoundRobin,
            KindArg::SingleElimination => ScheduleKind::SingleElimination,
            KindArg::DoubleElimination => ScheduleKind::DoubleElimination,
            KindArg::BoxLeague => ScheduleKind::BoxLeague,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ClubConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    match cli.command {
        Commands::Rate {
            format,
            team1,
            team2,
            score,
        } => {
            let input = GameInput {
                format: format.into(),
                team1,
                team2,
                score,
            };
            let update = compute_rating_update(&config.rating, &input).context("rating game")?;
            for player in &update.players {
                tracing::info!(
                    player = %player.player_id,
                    before = player.before,
                    after = player.after,
                    "{:?}",
                    player.outcome
                );
            }
            println!("{}", serde_json::to_string_pretty(&update)?);
        }
        Commands::Schedule {
            kind,
            format,
            seed,
            players,
        } => {
            let request = ScheduleRequest::new(
                players.into_iter().map(PlayerId::from).collect(),
                format.into(),
                kind.into(),
            )
            .with_box_size(config.schedule.box_size);

            let matches = match seed {
                Some(seed) => generate_matches(&request, &mut StdRng::seed_from_u64(seed)),
                None => generate_matches(&request, &mut rand::thread_rng()),
            }
            .context("generating schedule")?;

            tracing::info!(kind = %request.kind, matches = matches.len(), "generated schedule");
            println!("{}", serde_json::to_string_pretty(&matches)?);
        }
        Commands::Config => {
            print!("{}", toml::to_string(&config)?);
        }
    }

    Ok(())
}
