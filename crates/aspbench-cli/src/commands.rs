//! Subcommand implementations.

use std::fs;
use std::io;
use std::path::Path;

use aspbench_benchmark::{Benchmark, BenchmarkError, BenchmarkResult, CsvReport, SuiteKind};
use aspbench_config::{BenchConfig, ConfigError};
use aspbench_core::{CoreError, GraphGenerator, GraphLibrary, SizeRange, StructuralFamily};
use aspbench_runner::BackendRegistry;
use owo_colors::OwoColorize;
use thiserror::Error;

/// Anything that ends a command early.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Benchmark(#[from] BenchmarkError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Writes one library file per standard size range.
pub fn generate_graphs(config: &BenchConfig) -> Result<(), CliError> {
    fs::create_dir_all(&config.data_dir)?;
    let mut generator = match config.generator_seed {
        Some(seed) => GraphGenerator::seeded(seed),
        None => GraphGenerator::from_os_rng(),
    }
    .with_max_attempts(config.max_generation_attempts);

    for range in SizeRange::STANDARD {
        let library = GraphLibrary::generate(range, &StructuralFamily::ALL, &mut generator)?;
        let path = config.data_dir.join(range.file_name());
        library.save(&path)?;
        println!("{}", path.display());
    }
    Ok(())
}

/// Probes the solvers and sweeps `kind`.
pub fn run_suite(config: &BenchConfig, kind: SuiteKind, to_stdout: bool) -> Result<(), CliError> {
    let registry = BackendRegistry::probe(config);
    let benchmark = Benchmark::new(config, &registry)?;
    let mut suite = kind.load(config)?;

    let result = if to_stdout {
        let mut report = CsvReport::new(io::stdout().lock())?;
        benchmark.run(suite.as_mut(), &mut report)?
    } else {
        let (path, result) = benchmark.run_to_dir(suite.as_mut(), &config.results_dir)?;
        println!("{}", path.display());
        result
    };
    print_summary(&result);
    Ok(())
}

fn print_summary(result: &BenchmarkResult) {
    eprintln!(
        "{} {} runs in {:.1}s │ {} timeouts │ {} failures │ {} skipped",
        result.suite.bright_white().bold(),
        result.run_count(),
        result.total_time().as_secs_f64(),
        result.timeout_count(),
        result.failure_count(),
        result.skipped_trials
    );
}

pub fn gather(dir: &Path) -> Result<(), CliError> {
    let path = aspbench_benchmark::gather_today(dir)?;
    println!("{}", path.display());
    Ok(())
}

pub fn import_graph5col(dir: &Path, out: &Path) -> Result<(), CliError> {
    aspbench_benchmark::import_graph5col(dir, out)?;
    println!("{}", out.display());
    Ok(())
}

/// Prints one line per backend.
pub fn probe(config: &BenchConfig) -> Result<(), CliError> {
    let registry = BackendRegistry::probe(config);
    for descriptor in registry.descriptors() {
        let status = if descriptor.available {
            "available".bright_green().to_string()
        } else {
            "unavailable".bright_red().to_string()
        };
        println!("{:<8} {:<20} {}", descriptor.kind.name(), descriptor.system(), status);
    }
    Ok(())
}
