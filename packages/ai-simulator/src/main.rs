//! AI Simulator CLI - decide single moves and run in-memory self-play.
//!
//! `decide` answers one snapshot the way the HTTP listener would; `simulate`
//! deals fresh games and lets the configured AIs play them out.

mod metrics;
mod output;
mod simulator;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};
use durak_backend::ai::{create_ai, decide_attack, decide_defense, AiPlayer, SearchConfig};
use durak_backend::domain::GameSnapshot;
use metrics::build_game_metrics;
use output::OutputWriter;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use simulator::{GameResult, Simulator};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "ai-simulator")]
#[command(about = "Durak AI debugging and self-play")]
struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decide one move for a snapshot file and print it as JSON
    Decide {
        #[arg(long)]
        role: Role,

        /// Path to a JSON game snapshot
        #[arg(long)]
        snapshot: PathBuf,

        /// Search time budget in milliseconds
        #[arg(long)]
        budget_ms: Option<u64>,

        #[arg(long)]
        seed: Option<u64>,
    },
    /// Play games between AIs and report results per seat
    Simulate {
        /// Number of games to simulate
        #[arg(short, long, default_value = "1")]
        games: u32,

        /// Players per game (2-6)
        #[arg(short, long, default_value = "2")]
        players: usize,

        /// AI per seat, comma separated; repeats when shorter than the table
        #[arg(long, value_delimiter = ',', default_value = "mcts,random")]
        seats: Vec<AiType>,

        /// Search time budget in milliseconds for MCTS seats
        #[arg(long, default_value = "200")]
        budget_ms: u64,

        /// Iteration cap for MCTS seats
        #[arg(long)]
        iterations: Option<u64>,

        /// Base seed for dealing and AI randomness (random when omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Stop a game after this many moves
        #[arg(long, default_value = "2000")]
        max_moves: usize,

        /// Write one JSON line per game to this file
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Role {
    Attack,
    Defend,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AiType {
    Mcts,
    Random,
}

impl AiType {
    fn name(&self) -> &'static str {
        match self {
            AiType::Mcts => "mcts",
            AiType::Random => "random",
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match args.command {
        Command::Decide {
            role,
            snapshot,
            budget_ms,
            seed,
        } => run_decide(role, &snapshot, budget_ms, seed),
        Command::Simulate {
            games,
            players,
            seats,
            budget_ms,
            iterations,
            seed,
            max_moves,
            output,
        } => {
            let seat_types: Vec<AiType> = seats.iter().copied().cycle().take(players).collect();
            if seat_types.len() != players {
                return Err("--seats needs at least one AI type".into());
            }
            let settings = SimulateSettings {
                games,
                players,
                seat_types,
                budget_ms,
                iterations,
                seed,
                max_moves,
            };
            run_simulate(&settings, output.as_deref())
        }
    }
}

fn run_decide(
    role: Role,
    path: &std::path::Path,
    budget_ms: Option<u64>,
    seed: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path)?;
    let snapshot: GameSnapshot = serde_json::from_str(&raw)?;

    let mut config = SearchConfig::default();
    if let Some(ms) = budget_ms {
        config = config.with_budget_ms(ms);
    }
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    let mut rng = match config.seed() {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let game = snapshot.into_game(&mut rng)?;
    let started = Instant::now();
    let rendered = match role {
        Role::Attack => serde_json::to_string(&decide_attack(&game, &config, &mut rng)?)?,
        Role::Defend => serde_json::to_string(&decide_defense(&game, &config, &mut rng)?)?,
    };
    info!(?role, elapsed_ms = started.elapsed().as_millis() as u64, "Decision made");

    println!("{rendered}");
    Ok(())
}

struct SimulateSettings {
    games: u32,
    players: usize,
    seat_types: Vec<AiType>,
    budget_ms: u64,
    iterations: Option<u64>,
    seed: Option<u64>,
    max_moves: usize,
}

fn run_simulate(
    settings: &SimulateSettings,
    output: Option<&std::path::Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let base_seed = settings.seed.unwrap_or_else(rand::random);
    let ai_types: Vec<String> = settings
        .seat_types
        .iter()
        .map(|t| t.name().to_string())
        .collect();
    info!(
        games = settings.games,
        players = settings.players,
        seats = ?ai_types,
        base_seed,
        "Starting AI simulator"
    );

    let ais = settings
        .seat_types
        .iter()
        .enumerate()
        .map(|(seat, ai_type)| create_ai_player(*ai_type, settings, base_seed, seat))
        .collect::<Result<Vec<_>, _>>()?;

    let mut writer = output.map(OutputWriter::new).transpose()?;

    let start = Instant::now();
    let mut results = Vec::new();
    let mut errors = 0;

    for game_num in 1..=settings.games {
        let game_seed = base_seed.wrapping_add(u64::from(game_num));
        let game_start = Instant::now();

        let outcome = Simulator::new(settings.players, game_seed, settings.max_moves)
            .and_then(|sim| sim.simulate_game(&ais));

        match outcome {
            Ok(result) => {
                let duration_ms = game_start.elapsed().as_secs_f64() * 1000.0;
                if let Some(w) = writer.as_mut() {
                    let metrics =
                        build_game_metrics(game_num, game_seed, &ai_types, &result, duration_ms);
                    if let Err(e) = w.write_game(&metrics) {
                        warn!("Failed to write metrics for game {}: {}", game_num, e);
                    }
                }
                info!(
                    game = game_num,
                    moves = result.moves,
                    durak = ?result.durak,
                    "Game completed"
                );
                results.push(result);
            }
            Err(e) => {
                errors += 1;
                warn!("Game {} failed: {}", game_num, e);
            }
        }
    }

    if let Some(w) = writer {
        let path = w.finish()?;
        println!("Results written to: {}", path.display());
    }

    print_summary(&results, &ai_types, errors, start.elapsed(), settings.games);
    Ok(())
}

fn create_ai_player(
    ai_type: AiType,
    settings: &SimulateSettings,
    base_seed: u64,
    seat: usize,
) -> Result<Box<dyn AiPlayer>, Box<dyn std::error::Error>> {
    let seed = base_seed.wrapping_mul(31).wrapping_add(seat as u64);
    let mut config = json!({ "seed": seed, "time_budget_ms": settings.budget_ms });
    if let Some(n) = settings.iterations {
        config["max_iterations"] = json!(n);
    }

    create_ai(ai_type.name(), Some(&config))
        .ok_or_else(|| format!("Unknown AI type: {}", ai_type.name()).into())
}

fn print_summary(
    results: &[GameResult],
    ai_types: &[String],
    errors: u32,
    elapsed: std::time::Duration,
    total: u32,
) {
    println!("\n=== Simulation Summary ===");
    println!("Games completed: {}/{}", results.len(), total);
    if errors > 0 {
        println!("Errors: {}", errors);
    }
    println!("Total time: {:?}", elapsed);
    if results.is_empty() {
        return;
    }
    println!(
        "Average time per game: {:?}",
        elapsed / results.len() as u32
    );

    let unfinished = results.iter().filter(|r| !r.completed).count();
    let draws = results
        .iter()
        .filter(|r| r.completed && r.durak.is_none())
        .count();
    if unfinished > 0 {
        println!("Stopped at move ceiling: {}", unfinished);
    }
    if draws > 0 {
        println!("Draws: {}", draws);
    }

    println!("\n=== Results by Seat ===");
    let finished = results.iter().filter(|r| r.completed).count().max(1);
    for (seat, ai_type) in ai_types.iter().enumerate() {
        let first_out = results
            .iter()
            .filter(|r| r.finish_order.first() == Some(&seat))
            .count();
        let durak = results.iter().filter(|r| r.durak == Some(seat)).count();
        let escaped = results
            .iter()
            .filter(|r| r.completed && r.durak != Some(seat))
            .count();
        println!(
            "Seat {} ({}): first out={}, not durak={} ({:.1}%), durak={}",
            seat,
            ai_type,
            first_out,
            escaped,
            escaped as f64 / finished as f64 * 100.0,
            durak
        );
    }
}
