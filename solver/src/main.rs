mod cli;
mod logging;

use std::time::Duration;

use clap::Parser;
use colored::Colorize;
use eyre::{Result, WrapErr};
use log::{debug, info};

use cli::{Args, Command, LedgerKind};
use ledger_walker::{
    env::GridEnvironment,
    error::SolveError,
    ledger::{DenseLedger, SparseLedger},
    maze::{self, BoundedMaze},
    solvers::{BlindSolver, SolveReport, SolverConfig},
};
use logging::Logger;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    Logger::init(args.verbosity);

    info!("no map, no memory, only the ledger.");

    let maze = load_maze(&args)?;
    info!(
        "{}x{} maze with {} passages",
        maze.height(),
        maze.width(),
        maze.passage_count()
    );
    debug!("maze:\n{}", maze);

    let config = SolverConfig {
        delay: Duration::from_millis(args.delay),
        move_timeout: Duration::from_millis(args.timeout),
        max_steps: args.max_steps,
    };
    let mut env =
        GridEnvironment::new(maze).with_animation(Duration::from_millis(args.animation));

    match args.command {
        Command::Solve { ledger } => run_solver(&mut env, ledger, config).await?,
        Command::Benchmark => run_benchmark(&mut env, config).await?,
    }

    Ok(())
}

fn load_maze(args: &Args) -> Result<BoundedMaze> {
    if let Some(ref path) = args.map {
        info!("loading map: {}", path.display());
        let text = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        return BoundedMaze::parse(&text);
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(
        "generating {}x{} room maze (seed {}, {} loops)",
        args.rows, args.cols, seed, args.loops
    );
    maze::generate(args.rows, args.cols, seed, args.loops)
}

async fn solve(
    env: &mut GridEnvironment,
    ledger: LedgerKind,
    config: SolverConfig,
) -> Result<SolveReport, SolveError> {
    match ledger {
        LedgerKind::Dense => {
            BlindSolver::new(DenseLedger::new(), config)
                .solve(env)
                .await
        }
        LedgerKind::Sparse => {
            BlindSolver::new(SparseLedger::new(), config)
                .solve(env)
                .await
        }
    }
}

async fn run_solver(
    env: &mut GridEnvironment,
    ledger: LedgerKind,
    config: SolverConfig,
) -> Result<()> {
    info!("solving with the {} ledger", ledger.name());
    if !config.delay.is_zero() {
        debug!("delay: {:?}", config.delay);
    }

    let report = solve(env, ledger, config).await?;
    print_result(&report, env.maze().passage_count());
    Ok(())
}

async fn run_benchmark(env: &mut GridEnvironment, config: SolverConfig) -> Result<()> {
    info!("benchmarking ledger backends");

    let mut completed_results = Vec::new();

    for (i, ledger) in LedgerKind::all().enumerate() {
        info!("testing {}", ledger.name());

        if i > 0 {
            debug!("resetting maze");
            env.reset();
        }

        match solve(env, ledger, config.clone()).await {
            Ok(report) => {
                print_result(&report, env.maze().passage_count());
                completed_results.push((ledger.name(), report));
            }
            Err(e) => {
                log::error!("{} failed: {}", ledger.name(), e);
            }
        }
    }

    print_benchmark_summary(&completed_results);
    Ok(())
}

// ========== Utilities ==========

fn print_result(report: &SolveReport, passages: usize) {
    info!(
        "{} at {} in {} steps ({:?})",
        "reached exit".green().bold(),
        report.exit,
        report.steps,
        report.elapsed
    );
    debug!(
        "{} forward, {} backtrack, {} cells visited, bound {}",
        report.forward_moves,
        report.backtrack_moves,
        report.cells_visited,
        2 * passages
    );
    debug!("started at {}", report.started_at.format("%Y-%m-%d %H:%M:%S"));
}

fn print_benchmark_summary(results: &[(&str, SolveReport)]) {
    info!("\nbenchmark results:");
    info!(
        "{:<10} {:>8}  {:>8}  {:>8}  {:>12}",
        "ledger", "steps", "forward", "back", "total"
    );
    info!("{:-<54}", "");

    for (name, report) in results {
        info!(
            "{:<10} {:>8}  {:>8}  {:>8}  {:>12?}",
            name, report.steps, report.forward_moves, report.backtrack_moves, report.elapsed,
        );
    }

    if let Some((name, report)) = results.iter().min_by_key(|(_, r)| r.elapsed) {
        info!("\nfastest: {} ({:?})", name, report.elapsed);
    }
}
