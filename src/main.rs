//! chess_rules - command-line front end
//!
//! Usage:
//!     chess_rules status --fen "<fen>"
//!     chess_rules check --fen "<fen>" e2e4
//!     chess_rules play --fen "<fen>" e2e4 e7e5 g1f3
//!     chess_rules best --fen "<fen>" --depth 3 --threads 0
//!     chess_rules config --config engine.toml
//!
//! FEN strings need only the placement and side-to-move fields. Without
//! `--fen` the standard starting position is used. Set `RUST_LOG` or pass
//! `--verbose` to see engine logging on stderr.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use chess_rules::{ChessError, Colour, EngineConfig, Game, Move, ParallelSearchEngine, RecordingHandler};

/// Chess rules engine: legality, status and search
#[derive(Parser)]
#[command(name = "chess_rules")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Position as FEN (placement and side to move)
    #[arg(long, global = true)]
    fen: Option<String>,

    /// TOML file with engine settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Record handler notifications instead of failing on them
    #[arg(long, global = true)]
    lenient: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the board and the status of both sides
    Status,
    /// Report whether a move is legal for the side to move
    Check {
        /// Move in long algebraic notation, e.g. e2e4
        #[arg(value_name = "MOVE")]
        mv: Move,
    },
    /// Play a sequence of moves, validating each one
    Play {
        #[arg(value_name = "MOVES")]
        moves: Vec<Move>,
    },
    /// Search for the best move of the side to move
    Best {
        /// Search depth in plies
        #[arg(short, long)]
        depth: Option<u32>,
        /// Worker threads, 0 = all CPUs
        #[arg(short, long)]
        threads: Option<usize>,
    },
    /// Print the effective configuration as TOML
    Config,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), ChessError> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if cli.lenient {
        config.strict = false;
    }

    let mut game = match &cli.fen {
        Some(fen) => Game::from_fen(fen)?,
        None => Game::standard(),
    };
    let recorder = Arc::new(RecordingHandler::new());
    if !config.strict {
        game.set_handler(recorder.clone());
    }

    match cli.command {
        Commands::Config => print!("{}", config.to_toml_string()?),
        Commands::Status => print_status(&game),
        Commands::Check { mv } => {
            let result = game.check_move(mv.from, mv.to);
            println!("{result}");
        }
        Commands::Play { moves } => {
            for mv in moves {
                let result = game.try_make(mv)?;
                if result.is_ok() {
                    info!(%mv, "played");
                } else {
                    warn!(%result, "skipped");
                }
            }
            print_status(&game);
            println!("history: {}", format_moves(game.history()));
        }
        Commands::Best { depth, threads } => {
            if let Some(depth) = depth {
                config.depth = depth;
            }
            if let Some(threads) = threads {
                config.threads = threads;
            }
            let colour = game.current_player();
            info!(%colour, depth = config.depth, threads = config.worker_count(), "searching");

            let mut engine = ParallelSearchEngine::new(config.worker_count());
            let result = engine.best_move(&game, colour, config.depth);
            match result.best_move {
                Some(mv) => println!("bestmove {mv} score {} nodes {}", result.score, result.nodes),
                None => println!("bestmove none score {} nodes {}", result.score, result.nodes),
            }
        }
    }

    for event in recorder.events() {
        println!("note: {event:?}");
    }
    Ok(())
}

fn print_status(game: &Game) {
    println!("{}", game.position());
    println!("fen: {} {}", game.position().to_fen_placement(), side_char(game));
    println!("to move: {}", game.current_player());
    for colour in [Colour::White, Colour::Black] {
        println!("{colour}: {}", game.status(colour));
    }
}

fn side_char(game: &Game) -> char {
    match game.current_player() {
        Colour::White => 'w',
        Colour::Black => 'b',
    }
}

fn format_moves(moves: &[Move]) -> String {
    moves.iter().map(|m| m.to_string()).collect::<Vec<_>>().join(" ")
}
