//! Colored console output for benchmark sweeps.
//!
//! Provides a custom `tracing` layer that renders harness events on stderr,
//! leaving stdout free for CSV rows.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (probe, sweep start/end, finished runs, merge)
//! - **DEBUG**: Solver command lines, cache hits, rejected graph draws
//! - **WARN**: Instances that could not be built, solvers that failed to launch

use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Write};
use std::sync::OnceLock;

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Directive used when `RUST_LOG` is unset.
pub const DEFAULT_DIRECTIVE: &str = "aspbench=info";

/// Initializes console logging at the default level.
///
/// Safe to call multiple times - only the first call has effect.
pub fn init() {
    init_with(DEFAULT_DIRECTIVE);
}

/// Initializes console logging, filtering with `RUST_LOG` when it is set and
/// with `directive` otherwise.
pub fn init_with(directive: &str) {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(HarnessConsoleLayer)
            .try_init();
    });
}

/// A tracing layer that formats harness events with colors.
pub struct HarnessConsoleLayer;

impl<S: Subscriber> Layer<S> for HarnessConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("aspbench") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stderr(), "{} {}", format_timestamp(), output);
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    strings: BTreeMap<&'static str, String>,
    integers: BTreeMap<&'static str, i64>,
    floats: BTreeMap<&'static str, f64>,
    flags: BTreeMap<&'static str, bool>,
}

impl EventVisitor {
    fn event(&self) -> &str {
        self.str("event").unwrap_or("")
    }

    fn str(&self, name: &str) -> Option<&str> {
        self.strings.get(name).map(String::as_str)
    }

    fn int(&self, name: &str) -> i64 {
        self.integers.get(name).copied().unwrap_or(0)
    }

    fn count(&self, name: &str) -> String {
        self.int(name).to_formatted_string(&Locale::en)
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let s = format!("{:?}", value);
        self.strings
            .insert(field.name(), s.trim_matches('"').to_string());
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.strings.insert(field.name(), value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.integers.insert(field.name(), value as i64);
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.integers.insert(field.name(), value);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.floats.insert(field.name(), value);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.flags.insert(field.name(), value);
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    match v.event() {
        "probe" => format_probe(v),
        "graph_library" => format_graph_library(v),
        "graph_generated" => format_graph_generated(v),
        "generation_accepted" | "generation_rejected" => format_generation(v),
        "instance_generated" | "instance_cached" => format_instance(v),
        "instance_failed" => format_instance_failed(v),
        "run_start" => format_run_start(v),
        "run_end" => format_run_end(v),
        "launch_failed" => format_launch_failed(v),
        "trial_skipped" => format_trial_skipped(v),
        "sweep_start" => format_sweep_start(v),
        "sweep_end" => format_sweep_end(v),
        "merge" | "import" => format_file_written(v),
        _ if level <= Level::WARN => format_message(v, level),
        _ => String::new(),
    }
}

fn format_timestamp() -> String {
    chrono::Local::now()
        .format("%H:%M:%S%.3f")
        .to_string()
        .bright_black()
        .to_string()
}

fn format_probe(v: &EventVisitor) -> String {
    let backend = v.str("backend").unwrap_or("?");
    if v.flags.get("available").copied().unwrap_or(false) {
        let mut output = format!("{} {} available", "●".bright_green().bold(), backend.bright_white().bold());
        if let Some(version) = v.str("version") {
            output.push_str(&format!(" │ {}", version.bright_yellow()));
        }
        output
    } else {
        format!(
            "{} {} unavailable │ {}",
            "○".bright_black(),
            backend.bright_white(),
            v.str("reason").unwrap_or("not found").bright_black()
        )
    }
}

fn format_graph_library(v: &EventVisitor) -> String {
    match v.integers.get("sets") {
        Some(_) => format!(
            "{} Graph library │ {} edge counts",
            "◆".bright_cyan(),
            v.count("sets").bright_yellow()
        ),
        None => format!(
            "{} Graph library │ {}",
            "◆".bright_cyan(),
            v.str("message").unwrap_or("not found")
        ),
    }
}

fn format_graph_generated(v: &EventVisitor) -> String {
    format!(
        "{} {} │ {} edges",
        "◆".bright_cyan(),
        v.str("family").unwrap_or("?").bright_white(),
        v.count("edges").bright_yellow()
    )
}

fn format_generation(v: &EventVisitor) -> String {
    let family = v.str("family").unwrap_or("?");
    if v.event() == "generation_accepted" {
        format!(
            "{} {} │ {} edges after {} draws",
            "·".bright_green(),
            family,
            v.count("target"),
            v.count("attempt")
        )
    } else {
        let got = v
            .integers
            .get("got")
            .map(|n| n.to_formatted_string(&Locale::en))
            .unwrap_or_else(|| "too many".to_string());
        format!(
            "{} {} │ wanted {} edges, drew {}",
            "·".bright_black(),
            family,
            v.count("target"),
            got
        )
        .bright_black()
        .to_string()
    }
}

fn format_instance(v: &EventVisitor) -> String {
    let key = v.str("key").unwrap_or("?");
    if v.event() == "instance_cached" {
        return format!("{} {} (cached)", "=".bright_black(), key.bright_black());
    }
    format!(
        "{} {} │ {} facts",
        "+".bright_green(),
        key.bright_white(),
        v.count("facts").bright_yellow()
    )
}

fn format_instance_failed(v: &EventVisitor) -> String {
    format!(
        "{} {} skipped │ {}",
        "!".bright_red().bold(),
        v.str("key").unwrap_or("?").bright_white(),
        v.str("error").unwrap_or("generation failed").bright_red()
    )
}

fn format_run_start(v: &EventVisitor) -> String {
    format!(
        "{} {} │ {}",
        "▸".bright_black(),
        v.str("backend").unwrap_or("?"),
        v.str("command").unwrap_or("").bright_black()
    )
}

fn format_run_end(v: &EventVisitor) -> String {
    let solutions = v.int("solutions");
    let (icon, verdict) = match solutions {
        -2 => ("⏱".bright_yellow().to_string(), "TIMEOUT".bright_yellow().bold().to_string()),
        n if n < 0 => ("✗".bright_red().to_string(), "FAILED".bright_red().bold().to_string()),
        _ => (
            "✓".bright_green().to_string(),
            format!(
                "{} solutions │ output {}",
                v.count("solutions").bright_yellow(),
                v.count("output").bright_magenta()
            ),
        ),
    };
    let elapsed = v.floats.get("elapsed_ms").copied().unwrap_or(0.0);

    format!(
        "{} {} │ {} │ {} │ size {} │ rep {} │ {:>9} │ {}",
        icon,
        v.str("problem").unwrap_or("?").bright_white(),
        v.str("system").unwrap_or("?").bright_cyan(),
        v.str("variant").unwrap_or("?"),
        v.count("size").bright_yellow(),
        v.int("rep"),
        format_duration_ms(elapsed),
        verdict
    )
}

fn format_launch_failed(v: &EventVisitor) -> String {
    format!(
        "{} {} failed to launch │ {}",
        "✗".bright_red().bold(),
        v.str("backend").unwrap_or("?").bright_white(),
        v.str("reason").unwrap_or("").bright_red()
    )
}

fn format_trial_skipped(v: &EventVisitor) -> String {
    format!(
        "{} {} │ {} unavailable",
        "-".bright_black(),
        v.str("problem").unwrap_or("?").bright_black(),
        v.str("backend").unwrap_or("?").bright_black()
    )
}

fn format_sweep_start(v: &EventVisitor) -> String {
    format!(
        "{} Sweep {} │ {} cells │ {} repetitions",
        "▶".bright_green().bold(),
        v.str("suite").unwrap_or("?").bright_white().bold(),
        v.count("cells").bright_yellow(),
        v.count("repetitions").bright_yellow()
    )
}

fn format_sweep_end(v: &EventVisitor) -> String {
    let mut output = format!(
        "{} Sweep {} complete │ {} runs",
        "■".bright_cyan().bold(),
        v.str("suite").unwrap_or("?").bright_white().bold(),
        v.count("runs").bright_yellow()
    );

    let timeouts = v.int("timeouts");
    if timeouts > 0 {
        output.push_str(&format!(" │ {} timeouts", v.count("timeouts").bright_yellow()));
    }
    let failures = v.int("failures");
    if failures > 0 {
        output.push_str(&format!(" │ {} failures", v.count("failures").bright_red()));
    }
    let skipped = v.int("skipped");
    if skipped > 0 {
        output.push_str(&format!(" │ {} skipped", v.count("skipped").bright_black()));
    }
    let failed_instances = v.int("failed_instances");
    if failed_instances > 0 {
        output.push_str(&format!(
            " │ {} instances not built",
            v.count("failed_instances").bright_red()
        ));
    }

    output
}

fn format_file_written(v: &EventVisitor) -> String {
    let out = v.str("out").unwrap_or("?");
    if v.event() == "merge" {
        format!(
            "{} Merged {} shards │ {} rows │ {}",
            "⇉".bright_cyan().bold(),
            v.count("shards").bright_yellow(),
            v.count("rows").bright_yellow(),
            out.bright_white()
        )
    } else {
        format!(
            "{} Imported {} instances in {} classes │ {}",
            "⇉".bright_cyan().bold(),
            v.count("instances").bright_yellow(),
            v.count("classes").bright_yellow(),
            out.bright_white()
        )
    }
}

fn format_message(v: &EventVisitor, level: Level) -> String {
    let message = v.str("message").unwrap_or(v.event());
    if level == Level::ERROR {
        format!("{} {}", "ERROR".bright_red().bold(), message)
    } else {
        format!("{} {}", "WARN".bright_yellow().bold(), message)
    }
}

fn format_duration_ms(ms: f64) -> String {
    if ms < 1000.0 {
        format!("{:.1}ms", ms)
    } else if ms < 60_000.0 {
        format!("{:.2}s", ms / 1000.0)
    } else {
        let total_secs = (ms / 1000.0) as u64;
        format!("{}m {}s", total_secs / 60, total_secs % 60)
    }
}
