//! CLI command handling
//!
//! Dispatches CLI commands and formats their output.

use colored::Colorize;

use crate::commands::Commands;
use crate::common::config::Config;
use crate::common::{Error, Result};
use crate::graph::DatasetNode;
use crate::probe::{Probe, ProbeReport};

/// Dispatch a CLI command
pub async fn dispatch(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Which { packages, json } => {
            let probe = Probe::from_config(&config.probe);

            let mut reports = Vec::with_capacity(packages.len());
            for package in &packages {
                reports.push((package.as_str(), probe.run(package).await));
            }

            if json {
                let mut out = serde_json::Map::new();
                for (package, report) in &reports {
                    out.insert(package.to_string(), serde_json::to_value(report)?);
                }
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                for (package, report) in &reports {
                    print_probe(package, report);
                }
            }

            let missing: Vec<&str> = reports
                .iter()
                .filter(|(_, report)| !report.found())
                .map(|(package, _)| *package)
                .collect();
            if missing.is_empty() {
                Ok(())
            } else {
                Err(Error::PackagesMissing(missing.join(", ")))
            }
        }

        Commands::List { dataset, root } => {
            let node = DatasetNode::load(&dataset)?;
            for line in node.outline(&root) {
                println!("{line}");
            }
            println!(
                "\n{} {}",
                node.case_count().to_string().bold(),
                "cases".dimmed()
            );
            Ok(())
        }
    }
}

fn print_probe(package: &str, report: &ProbeReport) {
    if report.found() {
        let location = report.output.stdout.join(" ");
        println!("{} {} {}", "✓".green(), package.bold(), location.dimmed());
    } else {
        let code = report
            .output
            .code
            .map_or_else(|| "no exit code".to_string(), |code| format!("exit code {code}"));
        println!("{} {} ({})", "✗".red(), package.bold(), code.dimmed());
    }

    for line in &report.output.stderr {
        println!("    {}", line.dimmed());
    }
    for line in report.errors.iter().flatten() {
        println!("    {}", line.red());
    }
}
