//! Extraction of solution counts from solver output.
//!
//! Every backend ends a successful run with a marker line. Output without
//! its marker, truncated or otherwise, yields `None` and is never an error.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// A predicate name and arity, e.g. `inTree/1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Relation {
    pub name: String,
    pub arity: usize,
}

impl Relation {
    pub fn new(name: impl Into<String>, arity: usize) -> Self {
        Self {
            name: name.into(),
            arity,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.arity)
    }
}

/// What a solution contributes to the aggregate output value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Measure {
    /// Number of atoms of the relation.
    #[default]
    Cardinality,
    /// Sum of the integer arguments of the relation's atoms, for counter
    /// relations such as `numqueens(8)`.
    ArgumentSum,
}

impl Measure {
    fn of<'a>(self, atoms: impl Iterator<Item = Vec<&'a str>>) -> i64 {
        match self {
            Measure::Cardinality => atoms.count() as i64,
            Measure::ArgumentSum => atoms
                .flatten()
                .filter_map(|arg| arg.trim().parse::<i64>().ok())
                .sum(),
        }
    }
}

/// Solution count and aggregate value of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedOutput {
    pub solutions: i64,
    pub aggregate: i64,
}

static COUNT_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((\d+)\)").expect("count pattern is valid"));

static ATOM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([a-z_][A-Za-z0-9_']*)(?:\(([^()]*)\))?").expect("atom pattern is valid")
});

static ANSWER_SET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^{}]*)\}").expect("answer set pattern is valid"));

fn last_line(output: &str) -> Option<&str> {
    output.lines().map(str::trim).filter(|l| !l.is_empty()).last()
}

/// Satisfiability verdict on the last line of a solver's output.
fn verdict(output: &str) -> Option<bool> {
    match last_line(output)? {
        "SATISFIABLE" => Some(true),
        "UNSATISFIABLE" => Some(false),
        _ => None,
    }
}

/// Atoms of `relation` in `text`, as argument lists.
///
/// A name without parentheses is a 0-arity atom.
fn relation_atoms<'a>(text: &'a str, relation: &'a Relation) -> impl Iterator<Item = Vec<&'a str>> {
    ATOM.captures_iter(text).filter_map(move |caps| {
        let name = caps.get(1)?.as_str();
        let args: Vec<&str> = caps
            .get(2)
            .map_or_else(Vec::new, |args| args.as_str().split(',').collect());
        (name == relation.name && args.len() == relation.arity).then_some(args)
    })
}

/// Stream evaluator output: one `(n)` group per solution, then `DONE`.
///
/// `n` is the solution's size of the counted relation.
///
/// # Example
///
/// ```
/// use aspbench_runner::parser::parse_dusa;
///
/// let parsed = parse_dusa("(3)\n(4)\nDONE\n").unwrap();
/// assert_eq!((parsed.solutions, parsed.aggregate), (2, 7));
/// assert!(parse_dusa("(3)\n(4)\n").is_none());
/// ```
pub fn parse_dusa(output: &str) -> Option<ParsedOutput> {
    if last_line(output)? != "DONE" {
        return None;
    }
    let mut parsed = ParsedOutput {
        solutions: 0,
        aggregate: 0,
    };
    for caps in COUNT_GROUP.captures_iter(output) {
        parsed.solutions += 1;
        parsed.aggregate += caps[1].parse::<i64>().unwrap_or(0);
    }
    Some(parsed)
}

/// Grounding solver output in `-V0` mode: one model per line, then the
/// satisfiability verdict.
pub fn parse_clingo(output: &str, relation: &Relation, measure: Measure) -> Option<ParsedOutput> {
    if !verdict(output)? {
        return Some(ParsedOutput {
            solutions: 0,
            aggregate: 0,
        });
    }
    let lines: Vec<&str> = output.trim_end().lines().collect();
    let models = &lines[..lines.len().saturating_sub(1)];
    Some(ParsedOutput {
        solutions: models.len() as i64,
        aggregate: models
            .iter()
            .map(|model| measure.of(relation_atoms(model, relation)))
            .sum(),
    })
}

/// JVM solver output: one `{ ... }` listing per answer set, then the verdict.
pub fn parse_alpha(output: &str, relation: &Relation, measure: Measure) -> Option<ParsedOutput> {
    if !verdict(output)? {
        return Some(ParsedOutput {
            solutions: 0,
            aggregate: 0,
        });
    }
    let mut parsed = ParsedOutput {
        solutions: 0,
        aggregate: 0,
    };
    for caps in ANSWER_SET.captures_iter(output) {
        parsed.solutions += 1;
        parsed.aggregate += measure.of(relation_atoms(caps.get(1).map_or("", |m| m.as_str()), relation));
    }
    Some(parsed)
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
