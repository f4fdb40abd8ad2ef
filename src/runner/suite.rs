//! In-process test runner
//!
//! [`Suite`] records registrations as a tree of groups and cases, then
//! [`Suite::run`] executes the cases one at a time in registration order.

use std::time::{Duration, Instant};

use colored::Colorize;

use super::registry::{CaseBody, CaseFailure, Registry};
use crate::common::config::RunnerConfig;
use crate::common::panic_message;

struct Group {
    label: String,
    entries: Vec<Entry>,
}

impl Group {
    fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            entries: Vec::new(),
        }
    }
}

enum Entry {
    Group(Group),
    Case { label: String, body: CaseBody },
}

/// A flattened step of the execution plan
enum Step {
    Enter { label: String, depth: usize },
    Case {
        groups: Vec<String>,
        label: String,
        body: CaseBody,
        depth: usize,
    },
}

/// Registered groups and cases, ready to run
#[derive(Default)]
pub struct Suite {
    root: Vec<Entry>,
    open: Vec<Group>,
}

impl Registry for Suite {
    fn register_group(&mut self, label: &str, body: &mut dyn FnMut(&mut dyn Registry)) {
        self.open.push(Group::new(label));
        body(self);
        if let Some(group) = self.open.pop() {
            tracing::trace!(group = %group.label, entries = group.entries.len(), "registered group");
            self.entries().push(Entry::Group(group));
        }
    }

    fn register_case(&mut self, label: &str, body: CaseBody) {
        self.entries().push(Entry::Case {
            label: label.to_string(),
            body,
        });
    }
}

impl Suite {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&mut self) -> &mut Vec<Entry> {
        match self.open.last_mut() {
            Some(group) => &mut group.entries,
            None => &mut self.root,
        }
    }

    /// Number of registered cases
    pub fn case_count(&self) -> usize {
        fn count(entries: &[Entry]) -> usize {
            entries
                .iter()
                .map(|entry| match entry {
                    Entry::Group(group) => count(&group.entries),
                    Entry::Case { .. } => 1,
                })
                .sum()
        }
        count(&self.root)
    }

    /// Indented group labels and `- case` lines in registration order
    pub fn outline(&self) -> Vec<String> {
        fn walk(entries: &[Entry], depth: usize, lines: &mut Vec<String>) {
            let indent = "  ".repeat(depth);
            for entry in entries {
                match entry {
                    Entry::Group(group) => {
                        lines.push(format!("{indent}{}", group.label));
                        walk(&group.entries, depth + 1, lines);
                    }
                    Entry::Case { label, .. } => lines.push(format!("{indent}- {label}")),
                }
            }
        }
        let mut lines = Vec::new();
        walk(&self.root, 0, &mut lines);
        lines
    }

    /// Execute every registered case, in order, one at a time
    pub async fn run(self, config: &RunnerConfig) -> SuiteReport {
        let mut steps = Vec::new();
        flatten(self.root, &mut Vec::new(), &mut steps);

        let started = Instant::now();
        let mut report = SuiteReport::default();

        for step in steps {
            match step {
                Step::Enter { label, depth } => {
                    if config.reporter {
                        println!("{}{}", "  ".repeat(depth), label.bold());
                    }
                }
                Step::Case {
                    groups,
                    label,
                    body,
                    depth,
                } => {
                    let case_started = Instant::now();
                    let outcome = execute(body, config.case_timeout()).await;
                    let result = CaseResult {
                        groups,
                        label,
                        outcome,
                        elapsed: case_started.elapsed(),
                    };

                    if config.reporter {
                        print_case(&result, depth);
                    }
                    match &result.outcome {
                        Ok(()) => tracing::debug!(case = %result.title(), "passed"),
                        Err(e) => tracing::debug!(case = %result.title(), error = %e, "failed"),
                    }

                    let stop = config.bail && !result.passed();
                    report.results.push(result);
                    if stop {
                        tracing::info!("bailing out after first failure");
                        break;
                    }
                }
            }
        }

        report.elapsed = started.elapsed();
        if config.reporter {
            print_summary(&report);
        }
        tracing::info!(
            passed = report.passed(),
            failed = report.failed(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            "suite finished"
        );
        report
    }
}

fn flatten(entries: Vec<Entry>, groups: &mut Vec<String>, steps: &mut Vec<Step>) {
    for entry in entries {
        match entry {
            Entry::Group(group) => {
                steps.push(Step::Enter {
                    label: group.label.clone(),
                    depth: groups.len(),
                });
                groups.push(group.label);
                flatten(group.entries, groups, steps);
                groups.pop();
            }
            Entry::Case { label, body } => steps.push(Step::Case {
                groups: groups.clone(),
                label,
                body,
                depth: groups.len(),
            }),
        }
    }
}

/// Run one case body in its own task so panics stay contained
async fn execute(body: CaseBody, timeout: Option<Duration>) -> Result<(), CaseFailure> {
    let mut handle = tokio::spawn(body());

    let joined = match timeout {
        Some(limit) => match tokio::time::timeout(limit, &mut handle).await {
            Ok(joined) => joined,
            Err(_) => {
                handle.abort();
                return Err(CaseFailure::TimedOut(limit));
            }
        },
        None => handle.await,
    };

    match joined {
        Ok(outcome) => outcome,
        Err(e) if e.is_panic() => Err(CaseFailure::Panicked(panic_message(&*e.into_panic()))),
        Err(_) => Err(CaseFailure::Abandoned),
    }
}

fn print_case(result: &CaseResult, depth: usize) {
    let indent = "  ".repeat(depth);
    match &result.outcome {
        Ok(()) => println!("{indent}{} {}", "✓".green(), result.label.dimmed()),
        Err(e) => println!(
            "{indent}{} {}: {}",
            "✗".red(),
            result.label,
            e.to_string().red()
        ),
    }
}

fn print_summary(report: &SuiteReport) {
    println!();
    println!(
        "  {} ({}ms)",
        format!("{} passing", report.passed()).green(),
        report.elapsed.as_millis()
    );
    if report.failed() > 0 {
        println!("  {}", format!("{} failing", report.failed()).red());
        for (index, failure) in report.failures().enumerate() {
            if let Err(e) = &failure.outcome {
                println!("\n  {}) {}", index + 1, failure.title());
                println!("     {}", e.to_string().red());
            }
        }
    }
    println!();
}

/// Result of one executed case
#[derive(Debug)]
pub struct CaseResult {
    /// Labels of the enclosing groups, outermost first
    pub groups: Vec<String>,
    pub label: String,
    pub outcome: Result<(), CaseFailure>,
    pub elapsed: Duration,
}

impl CaseResult {
    pub fn passed(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Group labels and case label joined with spaces
    pub fn title(&self) -> String {
        let mut parts: Vec<&str> = self.groups.iter().map(String::as_str).collect();
        parts.push(&self.label);
        parts.join(" ")
    }
}

/// Results of a suite run
#[derive(Debug, Default)]
pub struct SuiteReport {
    pub results: Vec<CaseResult>,
    pub elapsed: Duration,
}

impl SuiteReport {
    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.passed()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &CaseResult> {
        self.results.iter().filter(|r| !r.passed())
    }

    /// Find a result by case label
    pub fn case(&self, label: &str) -> Option<&CaseResult> {
        self.results.iter().find(|r| r.label == label)
    }

    /// Panic with every failure listed unless all cases passed
    ///
    /// Meant for the end of a `#[tokio::test]`.
    pub fn assert_success(&self) {
        if !self.is_success() {
            let listing: Vec<String> = self
                .failures()
                .map(|r| match &r.outcome {
                    Err(e) => format!("  {}: {e}", r.title()),
                    Ok(()) => r.title(),
                })
                .collect();
            panic!(
                "{} of {} cases failed:\n{}",
                self.failed(),
                self.total(),
                listing.join("\n")
            );
        }
    }
}
