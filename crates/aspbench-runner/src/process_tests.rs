use std::time::Duration;

use aspbench_test::FakeSolver;

use super::*;

fn spec(solver: &FakeSolver) -> ProcessSpec {
    ProcessSpec::from_command(&solver.command()).unwrap()
}

#[test]
fn test_captures_stdout_and_exit_code() {
    let solver = FakeSolver::exiting("hello\nworld", 4).unwrap();
    let runner = ProcessRunner::new(Duration::from_secs(10));

    let output = runner.run(&spec(&solver).arg("x"));
    assert_eq!(output.exit, ProcessExit::Exited(Some(4)));
    assert_eq!(output.stdout, "hello\nworld\n");
    assert!(!output.truncated);
    assert_eq!(solver.recorded_args().unwrap(), vec!["x"]);
}

#[test]
fn test_missing_executable_is_launch_failure() {
    let runner = ProcessRunner::new(Duration::from_secs(1));
    let output = runner.run(&ProcessSpec::new("/nonexistent/aspbench-solver"));
    assert!(matches!(output.exit, ProcessExit::LaunchFailed(_)));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_kills_child_past_budget() {
    let solver = FakeSolver::hanging("partial", 30).unwrap();
    let runner = ProcessRunner::new(Duration::from_millis(200)).with_grace(Duration::from_millis(100));

    let output = runner.run(&spec(&solver));
    assert_eq!(output.exit, ProcessExit::Killed);
    assert!(output.elapsed >= Duration::from_millis(300));
    assert!(output.elapsed < Duration::from_secs(10));
}

#[test]
fn test_kill_reaches_grandchildren() {
    let solver = FakeSolver::script(
        "echo '(1)'\nsleep 30 &\necho $! > \"$(dirname \"$0\")/sleep.pid\"\nwait\necho DONE",
    )
    .unwrap();
    let runner = ProcessRunner::new(Duration::from_millis(200)).with_grace(Duration::from_millis(100));

    let start = Instant::now();
    let output = runner.run(&spec(&solver));
    assert_eq!(output.exit, ProcessExit::Killed);
    assert_eq!(output.stdout, "(1)\n");
    // The pipe closes with the group, so the drain does not wait it out.
    assert!(start.elapsed() < DRAIN_TIMEOUT);

    let pid = std::fs::read_to_string(solver.dir().join("sleep.pid")).unwrap();
    let alive = || {
        std::process::Command::new("kill")
            .args(["-0", pid.trim()])
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    };
    let mut tries = 0;
    while alive() && tries < 40 {
        std::thread::sleep(Duration::from_millis(50));
        tries += 1;
    }
    assert!(!alive());
}

#[test]
fn test_output_cap_discards_excess_without_blocking() {
    let solver = FakeSolver::flooding(1 << 20, "DONE").unwrap();
    let runner = ProcessRunner::new(Duration::from_secs(20)).with_max_output_bytes(1024);

    let output = runner.run(&spec(&solver));
    assert_eq!(output.exit, ProcessExit::Exited(Some(0)));
    assert!(output.truncated);
    assert_eq!(output.stdout.len(), 1024);
}

#[test]
fn test_command_line_display() {
    let spec = ProcessSpec::from_command(&["clingo".to_string()])
        .unwrap()
        .args(["-n1", "-V0"]);
    assert_eq!(spec.command_line(), "clingo -n1 -V0");
    assert!(ProcessSpec::from_command(&[]).is_none());
}
