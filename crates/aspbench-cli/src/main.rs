//! aspbench CLI
//!
//! # Commands
//!
//! - `aspbench generate-graphs` - Write the graph library data files
//! - `aspbench run <suite>` - Sweep one suite into its result shard
//! - `aspbench gather` - Merge result shards into a dated report
//! - `aspbench import-graph5col <dir>` - Convert graph-coloring instances
//! - `aspbench probe` - Show which solvers are available

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;

mod commands;

use commands::CliError;

/// Config file picked up from the working directory when `--config` is
/// not given.
const DEFAULT_CONFIG: &str = "aspbench.toml";

#[derive(Parser, Debug)]
#[command(name = "aspbench")]
#[command(about = "Benchmark answer-set and finite-choice logic solvers")]
#[command(version)]
struct Cli {
    /// Configuration file (TOML, or YAML by extension)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log more (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate one graph per family and size into the data directory
    GenerateGraphs {
        /// Seed for reproducible graphs
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run a benchmark suite
    Run {
        /// graph, queens, groundexplosion, mapgen, reachability, cutedge or graph5col
        suite: aspbench_benchmark::SuiteKind,
        /// Repetitions per instance
        #[arg(short, long)]
        repetitions: Option<u32>,
        /// Per-run timeout in seconds
        #[arg(short, long)]
        timeout: Option<u64>,
        /// Write rows to stdout instead of the suite's shard file
        #[arg(long)]
        stdout: bool,
    },
    /// Merge result shards into all-tests-<date>.csv
    Gather {
        /// Shard directory (defaults to the configured results directory)
        dir: Option<PathBuf>,
    },
    /// Convert instance<nodes>_<edges>_<num> files into suite input data
    ImportGraph5col {
        /// Directory holding the instance files
        dir: PathBuf,
        /// Output file (defaults to <data_dir>/test-graph5col.json)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Probe the configured solvers
    Probe,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    aspbench_console::init_with(log_directive(cli.verbose));

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err}", "error:".bright_red().bold());
            ExitCode::FAILURE
        }
    }
}

fn log_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => aspbench_console::DEFAULT_DIRECTIVE,
        1 => "aspbench=debug",
        _ => "aspbench=trace",
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::GenerateGraphs { seed } => {
            if let Some(seed) = seed {
                config = config.with_generator_seed(seed);
            }
            commands::generate_graphs(&config)
        }
        Command::Run {
            suite,
            repetitions,
            timeout,
            stdout,
        } => {
            if let Some(repetitions) = repetitions {
                config = config.with_repetitions(repetitions);
            }
            if let Some(secs) = timeout {
                config = config.with_timeout(Duration::from_secs(secs));
            }
            commands::run_suite(&config, suite, stdout)
        }
        Command::Gather { dir } => {
            let dir = dir.unwrap_or_else(|| config.results_dir.clone());
            commands::gather(&dir)
        }
        Command::ImportGraph5col { dir, out } => {
            let out = out.unwrap_or_else(|| config.data_dir.join("test-graph5col.json"));
            commands::import_graph5col(&dir, &out)
        }
        Command::Probe => commands::probe(&config),
    }
}

/// Loads `path`, or `aspbench.toml` if it exists, or the defaults.
fn load_config(path: Option<&Path>) -> Result<aspbench_config::BenchConfig, CliError> {
    match path {
        Some(path) => Ok(aspbench_config::BenchConfig::load(path)?),
        None if Path::new(DEFAULT_CONFIG).is_file() => Ok(aspbench_config::BenchConfig::load(DEFAULT_CONFIG)?),
        None => Ok(aspbench_config::BenchConfig::default()),
    }
}
