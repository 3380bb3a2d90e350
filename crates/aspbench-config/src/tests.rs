//! Tests for harness configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        repetitions = 1
        timeout_secs = 10
        timeout_grace_ms = 250
        generator_seed = 42
        data_dir = "bench-data"

        [backends.dusa]
        command = ["node", "scripts/run-dusa.js"]

        [backends.alpha]
        jar = "/opt/alpha/alpha.jar"
        command = ["java", "-Xmx4g", "-jar", "/opt/alpha/alpha.jar"]
    "#;

    let config = BenchConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.repetitions, 1);
    assert_eq!(config.timeout(), Duration::from_secs(10));
    assert_eq!(config.grace(), Duration::from_millis(250));
    assert_eq!(config.generator_seed, Some(42));
    assert_eq!(config.data_dir, PathBuf::from("bench-data"));
    assert_eq!(config.backends.dusa.command[1], "scripts/run-dusa.js");
    assert_eq!(config.backends.dusa.version_command, vec!["node", "--version"]);
    assert_eq!(config.backends.alpha.jar, PathBuf::from("/opt/alpha/alpha.jar"));
    assert_eq!(config.backends.clingo.command, vec!["clingo"]);
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        repetitions: 2
        max_output_bytes: 4096
        backends:
          clingo:
            command: ["clingo-5.6"]
    "#;

    let config = BenchConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.repetitions, 2);
    assert_eq!(config.max_output_bytes, 4096);
    assert_eq!(config.backends.clingo.command, vec!["clingo-5.6"]);
    assert_eq!(config.timeout_secs, 100);
}

#[test]
fn test_empty_file_gives_defaults() {
    let config = BenchConfig::from_toml_str("").unwrap();
    assert_eq!(config, BenchConfig::default());
    assert_eq!(config.max_generation_attempts, 100_000);
    assert_eq!(config.max_output_bytes, 16 * 1024 * 1024);
    assert_eq!(config.programs_dir, PathBuf::from("test-programs"));
    assert_eq!(config.results_dir, PathBuf::from("results"));
}

#[test]
fn test_invalid_values_rejected() {
    assert!(matches!(
        BenchConfig::from_toml_str("timeout_secs = 0"),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(
        BenchConfig::from_toml_str("[backends.clingo]\ncommand = []"),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(
        BenchConfig::from_toml_str("repetitions = \"three\""),
        Err(ConfigError::Toml(_))
    ));
}

#[test]
fn test_load_picks_format_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let yaml = dir.path().join("bench.yml");
    std::fs::write(&yaml, "repetitions: 7\n").unwrap();
    let toml = dir.path().join("bench.toml");
    std::fs::write(&toml, "repetitions = 8\n").unwrap();

    assert_eq!(BenchConfig::load(&yaml).unwrap().repetitions, 7);
    assert_eq!(BenchConfig::load(&toml).unwrap().repetitions, 8);
    assert!(matches!(
        BenchConfig::load(dir.path().join("missing.toml")),
        Err(ConfigError::Io(_))
    ));
}

#[test]
fn test_builder() {
    let config = BenchConfig::new()
        .with_repetitions(1)
        .with_timeout(Duration::from_millis(2500))
        .with_generator_seed(9)
        .with_scratch_dir("/tmp/bench-scratch");

    assert_eq!(config.repetitions, 1);
    assert_eq!(config.timeout(), Duration::from_secs(2));
    assert_eq!(config.generator_seed, Some(9));
    assert_eq!(config.scratch_dir(), PathBuf::from("/tmp/bench-scratch"));
}
