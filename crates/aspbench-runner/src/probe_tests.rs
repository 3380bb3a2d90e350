use super::*;

#[test]
fn test_clingo_version_banner() {
    assert_eq!(
        clingo_version("clingo version 5.7.1\nAddress model: 64-bit\n").as_deref(),
        Some("5.7.1")
    );
    assert_eq!(clingo_version("gringo version 5.7.1\n"), None);
    assert_eq!(clingo_version("clingo version \n"), None);
}

#[test]
fn test_package_version_from_lock_file() {
    let dir = tempfile::tempdir().unwrap();
    let lock = dir.path().join("package-lock.json");
    std::fs::write(
        &lock,
        r#"{"packages": {"": {"name": "bench"}, "node_modules/dusa": {"version": "0.1.6"}}}"#,
    )
    .unwrap();

    assert_eq!(package_version(&lock, "dusa").as_deref(), Some("0.1.6"));
    assert_eq!(package_version(&lock, "clingo"), None);
    assert_eq!(package_version(&dir.path().join("missing.json"), "dusa"), None);
}

#[test]
fn test_registry_only_returns_available_backends() {
    let registry = BackendRegistry::new(vec![
        Box::new(DusaBackend::new(vec!["node".into()], Some("0.1.6".into()))),
        Box::new(AlphaBackend::unavailable(vec!["java".into()])),
    ]);

    assert!(registry.is_available(BackendKind::StreamEvaluator));
    assert!(!registry.is_available(BackendKind::JvmSolver));
    assert!(registry.get(BackendKind::GroundingSolver).is_none());
    assert_eq!(registry.descriptors().count(), 2);
}

#[cfg(unix)]
#[test]
fn test_probe_with_fake_solvers() {
    use aspbench_test::FakeSolver;

    let dir = tempfile::tempdir().unwrap();
    let lock = dir.path().join("package-lock.json");
    std::fs::write(&lock, r#"{"packages": {"node_modules/dusa": {"version": "0.2.0"}}}"#).unwrap();

    let node = FakeSolver::printing("v20.0.0").unwrap();
    let clingo = FakeSolver::printing("clingo version 5.6.2\n").unwrap();

    let mut config = BenchConfig::default().with_scratch_dir(dir.path());
    config.backends.dusa.version_command = node.command();
    config.backends.dusa.package_lock = lock;
    config.backends.clingo.command = clingo.command();
    config.backends.alpha.command = vec!["/nonexistent/java".into()];

    let registry = BackendRegistry::probe(&config);
    let systems: Vec<(BackendKind, bool, String)> = registry
        .descriptors()
        .map(|d| (d.kind, d.available, d.system()))
        .collect();
    assert_eq!(
        systems,
        vec![
            (BackendKind::StreamEvaluator, true, "dusa-0.2.0".to_string()),
            (BackendKind::GroundingSolver, true, "clingo-5.6.2".to_string()),
            (BackendKind::JvmSolver, false, "alpha".to_string()),
        ]
    );
}
