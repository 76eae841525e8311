//! Sliding-Tile Puzzle Solver
//!
//! Generates random solvable N×N sliding-tile puzzles, checks whether a
//! given configuration can be solved, and solves it with breadth-first
//! search or A* under a choice of heuristics. Solutions can be replayed
//! board by board in the terminal.
//!
//! Boards are written row by row, rows separated by '/', e.g.
//! `slidesolve solve "1 2 3/4 5 0/7 8 6"`. Set `RUST_LOG=debug` to see
//! search statistics.

use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use slidesolve::heuristic::Heuristic;
use slidesolve::solvability::{scramble, shuffle, shuffle_tiles};
use slidesolve::{replay, solve, Board, BoardError, Move, SolveError, Strategy};

/// Solves N×N sliding-tile puzzles.
#[derive(Parser)]
#[command(name = "slidesolve")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print a random solvable board.
    Shuffle {
        /// Grid dimension N.
        #[arg(short, long, default_value_t = 3)]
        size: usize,
        /// Seed for a reproducible board.
        #[arg(long)]
        seed: Option<u64>,
        /// Scramble the goal with this many random slides instead of
        /// drawing a uniformly random permutation.
        #[arg(long, conflicts_with = "keep_blank")]
        moves: Option<usize>,
        /// Shuffle only the tiles and leave the blank in the bottom-right corner.
        #[arg(long)]
        keep_blank: bool,
    },
    /// Report whether a board can be solved.
    Check { board: Board },
    /// Solve a board and print the moves.
    Solve {
        board: Board,
        #[arg(short, long, value_enum, default_value_t = Algorithm::Astar)]
        strategy: Algorithm,
        /// Heuristic tag for A* (H1-H6); unknown tags use H2.
        #[arg(long, default_value = "H2")]
        heuristic: Heuristic,
        /// Print every intermediate board.
        #[arg(long)]
        replay: bool,
    },
    /// Print every heuristic's estimate for a board.
    Estimate { board: Board },
}

#[derive(Clone, Copy, ValueEnum)]
enum Algorithm {
    Bfs,
    Astar,
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let outcome = match cli.command {
        Some(Command::Shuffle {
            size,
            seed,
            moves,
            keep_blank,
        }) => run_shuffle(size, seed, moves, keep_blank).map_err(SolveError::from),
        Some(Command::Check { board }) => {
            run_check(&board);
            Ok(())
        }
        Some(Command::Solve {
            board,
            strategy,
            heuristic,
            replay,
        }) => {
            let strategy = match strategy {
                Algorithm::Bfs => Strategy::Bfs,
                Algorithm::Astar => Strategy::AStar(heuristic),
            };
            run_solve(&board, strategy, replay)
        }
        Some(Command::Estimate { board }) => {
            run_estimate(&board);
            Ok(())
        }
        None => run_demo(),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so stdout stays parseable; `RUST_LOG` overrides the level.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Prints a fresh solvable board in notation and grid form.
fn run_shuffle(
    size: usize,
    seed: Option<u64>,
    moves: Option<usize>,
    keep_blank: bool,
) -> Result<(), BoardError> {
    let mut rng = make_rng(seed);
    let board = match moves {
        Some(moves) => scramble(size, moves, &mut rng)?,
        None if keep_blank => shuffle_tiles(size, &mut rng)?,
        None => shuffle(size, &mut rng)?,
    };

    println!("{}", board.notation());
    println!("{}", board);
    Ok(())
}

fn run_check(board: &Board) {
    if board.is_solvable() {
        println!("solvable");
    } else {
        println!("unsolvable");
    }
}

/// Solves one board and prints the moves, optionally with every step.
fn run_solve(board: &Board, strategy: Strategy, show_steps: bool) -> Result<(), SolveError> {
    if matches!(strategy, Strategy::Bfs) && board.size() > 3 {
        warn!(size = board.size(), "BFS visits every reachable board and may not finish");
    }

    let path = solve(board, strategy)?;
    println!("{} solved in {} moves", strategy, path.len());
    if !strategy.is_optimal() {
        println!("({} is not admissible; the path may not be the shortest)", strategy);
    }

    if show_steps {
        print!("{}", format_replay(board, &path)?);
    } else {
        println!("{}", format_moves(board, &path)?);
    }
    Ok(())
}

fn run_estimate(board: &Board) {
    for heuristic in Heuristic::ALL {
        let note = if heuristic.is_admissible() {
            ""
        } else {
            " (inadmissible)"
        };
        println!(
            "{}  {:>4}  {}{}",
            heuristic,
            heuristic.estimate(board),
            heuristic.description(),
            note
        );
    }
}

/// Default action: shuffle a 3x3 board, solve it with A* H2 and replay it.
fn run_demo() -> Result<(), SolveError> {
    let board = shuffle(3, &mut make_rng(None))?;
    println!("Shuffled: {}", board.notation());
    run_solve(&board, Strategy::default(), true)
}

/// Lists the moves as the labels of the tiles being slid.
fn format_moves(start: &Board, path: &[Move]) -> Result<String, BoardError> {
    let mut labels = Vec::with_capacity(path.len());
    let mut board = *start;
    for &mv in path {
        labels.push(format!("{}@{}", board.get(mv.from), mv.from));
        board = board.apply(mv)?;
    }
    Ok(labels.join(" "))
}

/// Renders the start board and the board after each move.
fn format_replay(start: &Board, path: &[Move]) -> Result<String, BoardError> {
    let mut output = format!("Start:\n{}\n", start);
    let mut board = *start;

    for (step, &mv) in path.iter().enumerate() {
        let label = board.get(mv.from);
        board = board.apply(mv)?;
        output.push_str(&format!(
            "\nMove {}: tile {} at {}\n{}\n",
            step + 1,
            label,
            mv.from,
            board
        ));
    }

    debug_assert_eq!(replay(start, path).ok(), Some(board));
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replay_snapshot() {
        let start: Board = "1 2 3/4 5 6/0 7 8".parse().unwrap();
        let path = solve(&start, Strategy::Bfs).unwrap();

        insta::assert_snapshot!(format_replay(&start, &path).unwrap(), @r"
        Start:
        1 2 3
        4 5 6
        . 7 8

        Move 1: tile 7 at (2, 1)
        1 2 3
        4 5 6
        7 . 8

        Move 2: tile 8 at (2, 2)
        1 2 3
        4 5 6
        7 8 .
        ");
    }

    #[test]
    fn test_format_moves() {
        let start: Board = "1 2 3/4 5 6/0 7 8".parse().unwrap();
        let path = vec![Move::new(2, 1), Move::new(2, 2)];
        assert_eq!(format_moves(&start, &path).unwrap(), "7@(2, 1) 8@(2, 2)");
    }

    #[test]
    fn test_cli_parses_board_arguments() {
        let cli = Cli::try_parse_from([
            "slidesolve",
            "solve",
            "1 2 3/4 5 0/7 8 6",
            "--strategy",
            "bfs",
            "--heuristic",
            "bogus",
        ])
        .unwrap();

        match cli.command {
            Some(Command::Solve {
                board, heuristic, ..
            }) => {
                assert_eq!(board.notation(), "1 2 3/4 5 0/7 8 6");
                assert_eq!(heuristic, Heuristic::H2);
            }
            _ => panic!("expected the solve subcommand"),
        }

        assert!(Cli::try_parse_from(["slidesolve", "check", "1 2/2 0"]).is_err());
    }

    #[test]
    fn test_cli_shuffle_keep_blank_flag() {
        let cli = Cli::try_parse_from(["slidesolve", "shuffle", "--size", "4", "--keep-blank"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Shuffle {
                size: 4,
                keep_blank: true,
                moves: None,
                ..
            })
        ));

        let conflicting =
            Cli::try_parse_from(["slidesolve", "shuffle", "--moves", "10", "--keep-blank"]);
        assert!(conflicting.is_err());
    }
}
