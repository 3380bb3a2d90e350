use std::path::PathBuf;
use std::time::Duration;

use aspbench_test::{data, FakeSolver};

use super::*;
use crate::error::RunnerError;

fn request(relation: Relation, timeout: Duration) -> RunRequest {
    RunRequest {
        program: PathBuf::from("test-programs/spanning-tree.lp"),
        facts: PathBuf::from("/tmp/graph-sparse-linear-32.lp"),
        relation,
        solutions: 3,
        timeout,
        seed: 0xcafe + 0xbeef,
        measure: Measure::Cardinality,
    }
}

fn runner() -> ProcessRunner {
    ProcessRunner::new(Duration::from_secs(10)).with_grace(Duration::from_millis(100))
}

#[test]
fn test_system_labels() {
    let dusa = BackendDescriptor::available(BackendKind::StreamEvaluator, Some("0.1.6".into()));
    assert_eq!(dusa.system(), "dusa-0.1.6");
    let alpha = BackendDescriptor::available(BackendKind::JvmSolver, None);
    assert_eq!(alpha.system(), "alpha");
    assert!(!BackendDescriptor::unavailable(BackendKind::GroundingSolver).available);
}

#[test]
fn test_outcome_sentinels() {
    assert_eq!(RunStatus::Completed.sentinel(), None);
    assert_eq!(RunStatus::LaunchFailure.sentinel(), Some(-1));
    assert_eq!(RunStatus::ErrorExit.sentinel(), Some(-1));
    assert_eq!(RunStatus::Timeout.sentinel(), Some(-2));

    let timeout = RunOutcome::timeout(Duration::from_secs(100));
    assert_eq!((timeout.solutions, timeout.output), (-2, 0));
    assert_eq!(timeout.elapsed, Duration::from_secs(100));
}

#[test]
fn test_dusa_command_line() {
    let backend = DusaBackend::new(vec!["node".into(), "run-dusa.js".into()], None);
    let mut req = request(Relation::new("parent", 2), Duration::from_secs(1));
    req.facts = PathBuf::from("/tmp/g.json");
    let spec = backend.command(&req).unwrap();
    assert_eq!(
        spec.command_line(),
        "node run-dusa.js test-programs/spanning-tree.lp /tmp/g.json parent 3"
    );
}

#[test]
fn test_clingo_command_line_and_show_file() {
    let scratch = tempfile::tempdir().unwrap();
    let backend = ClingoBackend::new(vec!["clingo".into()], Some("5.7.1".into()), scratch.path());
    let req = request(Relation::new("inTree", 1), Duration::from_secs(1));

    let spec = backend.command(&req).unwrap();
    let show = scratch.path().join("show-inTree-1.lp");
    assert_eq!(
        spec.command_line(),
        format!(
            "clingo -n3 -V0 --rand-freq=1 --seed=100845 test-programs/spanning-tree.lp \
             /tmp/graph-sparse-linear-32.lp {}",
            show.display()
        )
    );
    assert_eq!(std::fs::read_to_string(show).unwrap(), "#show inTree/1.\n");
}

#[test]
fn test_alpha_command_line() {
    let backend = AlphaBackend::new(vec!["java".into(), "-jar".into(), "alpha.jar".into()]);
    let req = request(Relation::new("inTree", 1), Duration::from_secs(1));
    assert_eq!(
        backend.command(&req).unwrap().command_line(),
        "java -jar alpha.jar -n3 -dni -i test-programs/spanning-tree.lp -i \
         /tmp/graph-sparse-linear-32.lp -finTree -e100845"
    );
}

#[test]
fn test_empty_command_is_setup_error() {
    let backend = AlphaBackend::new(Vec::new());
    let req = request(Relation::new("inTree", 1), Duration::from_secs(1));
    assert!(matches!(backend.command(&req), Err(RunnerError::EmptyCommand)));
}

#[test]
fn test_outcome_mapping() {
    let backend = ClingoBackend::new(vec!["clingo".into()], None, std::env::temp_dir());
    let req = request(Relation::new("inTree", 1), Duration::from_secs(5));
    let output = |exit, stdout: &str, elapsed| ProcessOutput {
        exit,
        stdout: stdout.to_string(),
        truncated: false,
        elapsed,
    };

    let ok = backend.outcome(
        &output(ProcessExit::Exited(Some(10)), data::CLINGO_TWO_MODELS, Duration::from_secs(1)),
        &req,
    );
    assert_eq!(ok.status, RunStatus::Completed);
    assert_eq!((ok.solutions, ok.output), (2, 5));

    let unsat = backend.outcome(
        &output(ProcessExit::Exited(Some(20)), data::CLINGO_UNSATISFIABLE, Duration::from_secs(1)),
        &req,
    );
    assert_eq!((unsat.status, unsat.solutions), (RunStatus::Completed, 0));

    let crashed = backend.outcome(
        &output(ProcessExit::Exited(Some(1)), data::CLINGO_TWO_MODELS, Duration::from_secs(1)),
        &req,
    );
    assert_eq!((crashed.status, crashed.solutions), (RunStatus::ErrorExit, -1));

    let signalled = backend.outcome(&output(ProcessExit::Exited(None), "", Duration::from_secs(1)), &req);
    assert_eq!(signalled.status, RunStatus::ErrorExit);

    // Slow but finished before the kill: still a timeout.
    let slow = backend.outcome(
        &output(ProcessExit::Exited(Some(10)), data::CLINGO_TWO_MODELS, Duration::from_millis(5200)),
        &req,
    );
    assert_eq!(slow, RunOutcome::timeout(Duration::from_secs(5)));
}

#[cfg(unix)]
#[test]
fn test_dusa_end_to_end() {
    let solver = FakeSolver::printing(data::DUSA_THREE_SOLUTIONS).unwrap();
    let backend = DusaBackend::new(solver.command(), Some("0.1.6".into()));
    let req = request(Relation::new("parent", 2), Duration::from_secs(10));

    let outcome = backend.run(&runner(), &req).unwrap();
    assert_eq!(outcome.status, RunStatus::Completed);
    assert_eq!((outcome.solutions, outcome.output), (3, 12));
    assert!(outcome.elapsed < Duration::from_secs(10));

    let args = solver.recorded_args().unwrap();
    assert_eq!(args[1..], ["/tmp/graph-sparse-linear-32.lp", "parent", "3"]);
}

#[cfg(unix)]
#[test]
fn test_truncated_output_is_parse_failure() {
    let solver = FakeSolver::printing(data::DUSA_TRUNCATED).unwrap();
    let backend = DusaBackend::new(solver.command(), None);
    let req = request(Relation::new("parent", 2), Duration::from_secs(10));

    let outcome = backend.run(&runner(), &req).unwrap();
    assert_eq!(outcome.status, RunStatus::ParseFailure);
    assert_eq!((outcome.solutions, outcome.output), (-1, 0));
}

#[cfg(unix)]
#[test]
fn test_missing_solver_is_launch_failure() {
    let backend = AlphaBackend::new(vec!["/nonexistent/java".into()]);
    let req = request(Relation::new("inTree", 1), Duration::from_secs(10));

    let outcome = backend.run(&runner(), &req).unwrap();
    assert_eq!(outcome.status, RunStatus::LaunchFailure);
    assert_eq!(outcome.solutions, -1);
}

#[cfg(unix)]
#[test]
fn test_hanging_solver_times_out() {
    let solver = FakeSolver::hanging("(1)", 30).unwrap();
    let backend = DusaBackend::new(solver.command(), None);
    let timeout = Duration::from_millis(300);
    let req = request(Relation::new("parent", 2), timeout);

    let outcome = backend.run(&runner(), &req).unwrap();
    assert_eq!(outcome.status, RunStatus::Timeout);
    assert_eq!(outcome.solutions, -2);
    assert_eq!(outcome.output, 0);
    assert_eq!(outcome.elapsed, timeout);
}

#[cfg(unix)]
#[test]
fn test_alpha_end_to_end() {
    let solver = FakeSolver::printing(data::ALPHA_TWO_ANSWER_SETS).unwrap();
    let backend = AlphaBackend::new(solver.command());
    let mut req = request(Relation::new("inTree", 1), Duration::from_secs(10));
    req.measure = Measure::ArgumentSum;

    let outcome = backend.run(&runner(), &req).unwrap();
    assert_eq!((outcome.solutions, outcome.output), (2, 9));
}
