//! Configuration for aspbench.
//!
//! Load harness settings from TOML or YAML files to control timeouts,
//! repetitions, directory layout and how each backend is launched.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use aspbench_config::BenchConfig;
//! use std::time::Duration;
//!
//! let config = BenchConfig::from_toml_str(r#"
//!     repetitions = 5
//!     timeout_secs = 30
//!
//!     [backends.clingo]
//!     command = ["/opt/clingo/bin/clingo"]
//! "#).unwrap();
//!
//! assert_eq!(config.repetitions, 5);
//! assert_eq!(config.timeout(), Duration::from_secs(30));
//! assert_eq!(config.backends.clingo.command, vec!["/opt/clingo/bin/clingo"]);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use aspbench_config::BenchConfig;
//!
//! let config = BenchConfig::load("aspbench.toml").unwrap_or_default();
//! assert_eq!(config.repetitions, 3);
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main harness configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct BenchConfig {
    /// Repetitions of every (problem, size) cell.
    pub repetitions: u32,

    /// Nominal wall-clock budget of a single solver run.
    pub timeout_secs: u64,

    /// Margin added to the budget before the solver is killed.
    pub timeout_grace_ms: u64,

    /// Cap on captured solver output; the rest is discarded.
    pub max_output_bytes: usize,

    /// Directory holding the program encodings.
    pub programs_dir: PathBuf,

    /// Directory holding generated graphs and suite input data.
    pub data_dir: PathBuf,

    /// Directory the result shards are written to.
    pub results_dir: PathBuf,

    /// Directory for cached instances and show files. Defaults to the OS
    /// temporary directory.
    pub scratch_dir: Option<PathBuf>,

    /// Seed for graph generation. Unseeded generation draws from the OS.
    pub generator_seed: Option<u64>,

    /// Cap on rejected draws for one probabilistic graph.
    pub max_generation_attempts: u32,

    /// How each backend is launched.
    pub backends: BackendsConfig,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            repetitions: 3,
            timeout_secs: 100,
            timeout_grace_ms: 500,
            max_output_bytes: 16 * 1024 * 1024,
            programs_dir: PathBuf::from("test-programs"),
            data_dir: PathBuf::from("data"),
            results_dir: PathBuf::from("results"),
            scratch_dir: None,
            generator_seed: None,
            max_generation_attempts: 100_000,
            backends: BackendsConfig::default(),
        }
    }
}

impl BenchConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file, picking YAML for `.yaml`/`.yml`
    /// and TOML otherwise.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, fails to parse, or holds
    /// values that fail [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings no sweep can run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeout_secs must be positive".into()));
        }
        if self.max_output_bytes == 0 {
            return Err(ConfigError::Invalid("max_output_bytes must be positive".into()));
        }
        for (name, command) in [
            ("dusa", &self.backends.dusa.command),
            ("clingo", &self.backends.clingo.command),
            ("alpha", &self.backends.alpha.command),
        ] {
            if command.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "backends.{name}.command must name an executable"
                )));
            }
        }
        Ok(())
    }

    /// Sets the number of repetitions.
    pub fn with_repetitions(mut self, repetitions: u32) -> Self {
        self.repetitions = repetitions;
        self
    }

    /// Sets the nominal per-run budget.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs().max(1);
        self
    }

    /// Sets the generator seed.
    pub fn with_generator_seed(mut self, seed: u64) -> Self {
        self.generator_seed = Some(seed);
        self
    }

    /// Sets the scratch directory.
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }

    /// Sets the data directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Returns the nominal per-run budget.
    ///
    /// # Examples
    ///
    /// ```
    /// use aspbench_config::BenchConfig;
    /// use std::time::Duration;
    ///
    /// let config = BenchConfig::default();
    /// assert_eq!(config.timeout(), Duration::from_secs(100));
    /// assert_eq!(config.grace(), Duration::from_millis(500));
    /// ```
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn grace(&self) -> Duration {
        Duration::from_millis(self.timeout_grace_ms)
    }

    /// Returns the configured scratch directory or `<tmp>/aspbench`.
    pub fn scratch_dir(&self) -> PathBuf {
        self.scratch_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("aspbench"))
    }
}

/// Launch settings of all three backends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct BackendsConfig {
    pub dusa: DusaConfig,
    pub clingo: ClingoConfig,
    pub alpha: AlphaConfig,
}

/// Stream evaluator launch settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct DusaConfig {
    /// Runner script invocation; program, data, relation and count are appended.
    pub command: Vec<String>,

    /// Command whose success shows the runtime is installed.
    pub version_command: Vec<String>,

    /// Lock file the evaluator version is read from.
    pub package_lock: PathBuf,
}

impl Default for DusaConfig {
    fn default() -> Self {
        Self {
            command: vec!["node".into(), "run-dusa.js".into()],
            version_command: vec!["node".into(), "--version".into()],
            package_lock: PathBuf::from("package-lock.json"),
        }
    }
}

/// Grounding solver launch settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ClingoConfig {
    pub command: Vec<String>,
}

impl Default for ClingoConfig {
    fn default() -> Self {
        Self {
            command: vec!["clingo".into()],
        }
    }
}

/// JVM solver launch settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct AlphaConfig {
    pub command: Vec<String>,

    /// Jar that must exist for the solver to count as available.
    pub jar: PathBuf,
}

impl Default for AlphaConfig {
    fn default() -> Self {
        Self {
            command: vec!["java".into(), "-jar".into(), "alpha.jar".into()],
            jar: PathBuf::from("alpha.jar"),
        }
    }
}

#[cfg(test)]
mod tests;
