//! Package existence probe
//!
//! Spawns a `which`-style lookup for a package name and collects everything
//! the process writes, line by line, until it exits. Failures to spawn or
//! read are collected as error lines in the report; [`Probe::run`] never
//! returns an error.

use std::path::PathBuf;
use std::process::Stdio;

use serde::Serialize;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

use crate::common::config::ProbeConfig;

/// Streams and exit code of the lookup process
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProbeOutput {
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
    /// `None` when the process could not be spawned or was killed by a signal
    pub code: Option<i32>,
}

/// Everything a probe run produced
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProbeReport {
    /// Error lines, `None` when nothing went wrong
    pub errors: Option<Vec<String>>,
    pub output: ProbeOutput,
}

impl ProbeReport {
    /// Whether the lookup succeeded
    pub fn found(&self) -> bool {
        self.output.code == Some(0)
    }

    fn push_error(&mut self, line: String) {
        self.errors.get_or_insert_with(Vec::new).push(line);
    }
}

/// A configured lookup command
#[derive(Debug, Clone)]
pub struct Probe {
    command: String,
    working_dir: Option<PathBuf>,
}

impl Default for Probe {
    fn default() -> Self {
        Self::from_config(&ProbeConfig::default())
    }
}

impl Probe {
    pub fn from_config(config: &ProbeConfig) -> Self {
        Self {
            command: config.command.clone(),
            working_dir: config.working_dir.clone(),
        }
    }

    /// Look `package` up by spawning the lookup command
    pub async fn run(&self, package: &str) -> ProbeReport {
        let mut report = ProbeReport::default();

        // The command may carry its own arguments, e.g. "busybox which".
        let mut parts = self.command.split_whitespace();
        let Some(program) = parts.next() else {
            report.push_error("probe command is empty".to_string());
            return report;
        };

        let mut cmd = Command::new(program);
        cmd.args(parts)
            .arg(package)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                tracing::debug!(program, error = %e, "failed to spawn probe");
                report.push_error(format!("Failed to spawn '{}': {}", program, e));
                return report;
            }
        };

        let (stdout, stderr) = tokio::join!(
            collect_lines(child.stdout.take()),
            collect_lines(child.stderr.take())
        );
        match stdout {
            Ok(lines) => report.output.stdout = lines,
            Err(e) => report.push_error(format!("Failed to read probe stdout: {}", e)),
        }
        match stderr {
            Ok(lines) => report.output.stderr = lines,
            Err(e) => report.push_error(format!("Failed to read probe stderr: {}", e)),
        }

        match child.wait().await {
            Ok(status) => report.output.code = status.code(),
            Err(e) => report.push_error(format!("Failed to wait for probe: {}", e)),
        }

        tracing::debug!(package, code = ?report.output.code, "probe finished");
        report
    }
}

async fn collect_lines<R>(stream: Option<R>) -> std::io::Result<Vec<String>>
where
    R: AsyncRead + Unpin,
{
    let mut collected = Vec::new();
    if let Some(stream) = stream {
        let mut lines = BufReader::new(stream).lines();
        while let Some(line) = lines.next_line().await? {
            collected.push(line);
        }
    }
    Ok(collected)
}

/// Look `package` up on `PATH` without spawning a process
pub fn locate(package: &str) -> Option<PathBuf> {
    which::which(package).ok()
}

/// Run the default `which` probe for `package`
pub async fn which(package: &str) -> ProbeReport {
    Probe::default().run(package).await
}
