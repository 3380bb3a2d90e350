//! Fake solver executables.
//!
//! Each fake is a shell script in its own temporary directory. It is launched
//! as `/bin/sh <script>`, so the script needs no execute permission.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

const ARGS_FILE: &str = "args.txt";
const END_MARKER: &str = "ASPBENCH_FAKE_EOF";

/// A shell script standing in for a solver.
#[derive(Debug)]
pub struct FakeSolver {
    dir: TempDir,
    script: PathBuf,
}

impl FakeSolver {
    /// A solver whose behaviour is the given shell script body.
    ///
    /// Every invocation records its arguments, one per line, before running
    /// the body.
    pub fn script(body: &str) -> io::Result<Self> {
        let dir = tempfile::tempdir()?;
        let script = dir.path().join("solver.sh");
        let args = dir.path().join(ARGS_FILE);
        let contents = format!(
            "#!/bin/sh\nprintf '%s\\n' \"$@\" > '{}'\n{body}\n",
            args.display()
        );
        fs::write(&script, contents)?;
        Ok(Self { dir, script })
    }

    /// Prints `output` verbatim and exits 0.
    pub fn printing(output: &str) -> io::Result<Self> {
        Self::script(&format!("cat <<'{END_MARKER}'\n{output}\n{END_MARKER}"))
    }

    /// Prints `output` and exits with `code`.
    pub fn exiting(output: &str, code: i32) -> io::Result<Self> {
        Self::script(&format!(
            "cat <<'{END_MARKER}'\n{output}\n{END_MARKER}\nexit {code}"
        ))
    }

    /// Prints `output`, then sleeps for `seconds` without exiting.
    ///
    /// The shell is replaced by `sleep`, so killing the solver leaves no
    /// process holding its stdout open.
    pub fn hanging(output: &str, seconds: u32) -> io::Result<Self> {
        Self::script(&format!(
            "cat <<'{END_MARKER}'\n{output}\n{END_MARKER}\nexec sleep {seconds}"
        ))
    }

    /// Writes `bytes` bytes of output and then `tail` on its own line.
    pub fn flooding(bytes: usize, tail: &str) -> io::Result<Self> {
        Self::script(&format!(
            "head -c {bytes} /dev/zero | tr '\\0' 'x'\necho\necho '{tail}'"
        ))
    }

    /// The command line launching this solver.
    pub fn command(&self) -> Vec<String> {
        vec!["/bin/sh".to_string(), self.script.display().to_string()]
    }

    pub fn script_path(&self) -> &Path {
        &self.script
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Arguments of the most recent invocation.
    pub fn recorded_args(&self) -> io::Result<Vec<String>> {
        let contents = fs::read_to_string(self.dir.path().join(ARGS_FILE))?;
        Ok(contents.lines().map(str::to_string).collect())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::process::Command;

    fn run(solver: &FakeSolver, args: &[&str]) -> (Option<i32>, String) {
        let command = solver.command();
        let output = Command::new(&command[0])
            .args(&command[1..])
            .args(args)
            .output()
            .unwrap();
        (
            output.status.code(),
            String::from_utf8(output.stdout).unwrap(),
        )
    }

    #[test]
    fn test_printing_solver() {
        let solver = FakeSolver::printing("a(1)\nSATISFIABLE").unwrap();
        let (code, stdout) = run(&solver, &["-n3", "prog.lp"]);
        assert_eq!(code, Some(0));
        assert_eq!(stdout, "a(1)\nSATISFIABLE\n");
        assert_eq!(solver.recorded_args().unwrap(), vec!["-n3", "prog.lp"]);
    }

    #[test]
    fn test_exiting_solver() {
        let solver = FakeSolver::exiting("boom", 3).unwrap();
        let (code, stdout) = run(&solver, &[]);
        assert_eq!(code, Some(3));
        assert_eq!(stdout, "boom\n");
    }

    #[test]
    fn test_flooding_solver() {
        let solver = FakeSolver::flooding(1000, "DONE").unwrap();
        let (_, stdout) = run(&solver, &[]);
        assert_eq!(stdout.len(), 1000 + 1 + 5);
        assert!(stdout.ends_with("\nDONE\n"));
    }
}
