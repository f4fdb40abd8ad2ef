//! Configuration file handling

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::paths::config_path;
use super::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Test runner settings
    #[serde(default)]
    pub runner: RunnerConfig,

    /// Package probe settings
    #[serde(default)]
    pub probe: ProbeConfig,
}

/// Settings for [`crate::runner::Suite::run`]
#[derive(Debug, Clone, Deserialize)]
pub struct RunnerConfig {
    /// Per-case timeout in milliseconds, `0` disables it
    #[serde(default = "default_case_timeout")]
    pub case_timeout_ms: u64,

    /// Stop after the first failing case
    #[serde(default)]
    pub bail: bool,

    /// Print the nested pass/fail report to stdout
    #[serde(default = "default_reporter")]
    pub reporter: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            case_timeout_ms: default_case_timeout(),
            bail: false,
            reporter: default_reporter(),
        }
    }
}

impl RunnerConfig {
    /// A configuration with the reporter switched off, for use inside tests
    pub fn quiet() -> Self {
        Self {
            reporter: false,
            ..Self::default()
        }
    }

    /// The case timeout, if one is set
    pub fn case_timeout(&self) -> Option<Duration> {
        (self.case_timeout_ms > 0).then(|| Duration::from_millis(self.case_timeout_ms))
    }
}

fn default_case_timeout() -> u64 {
    2000
}

fn default_reporter() -> bool {
    true
}

/// Settings for [`crate::probe::Probe`]
#[derive(Debug, Clone, Deserialize)]
pub struct ProbeConfig {
    /// Lookup command; extra words are passed before the package name
    #[serde(default = "default_probe_command")]
    pub command: String,

    /// Working directory for the lookup process
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            command: default_probe_command(),
            working_dir: None,
        }
    }
}

fn default_probe_command() -> String {
    "which".to_string()
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = config_path() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }
        Ok(Self::default())
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| super::Error::file_read(&path.display().to_string(), &e))?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| super::Error::ConfigParse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.runner.case_timeout_ms, 2000);
        assert!(!config.runner.bail);
        assert!(config.runner.reporter);
        assert_eq!(config.probe.command, "which");
        assert!(config.probe.working_dir.is_none());
    }

    #[test]
    fn test_partial_runner_section() {
        let config = Config::parse("[runner]\nbail = true\ncase_timeout_ms = 0\n").unwrap();
        assert!(config.runner.bail);
        assert!(config.runner.reporter);
        assert_eq!(config.runner.case_timeout(), None);
    }

    #[test]
    fn test_case_timeout_duration() {
        let runner = RunnerConfig {
            case_timeout_ms: 150,
            ..RunnerConfig::quiet()
        };
        assert_eq!(runner.case_timeout(), Some(Duration::from_millis(150)));
        assert!(!runner.reporter);
    }

    #[test]
    fn test_invalid_config_is_parse_error() {
        let err = Config::parse("[runner]\nbail = \"sometimes\"\n").unwrap_err();
        assert!(matches!(err, super::super::Error::ConfigParse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[probe]\ncommand = \"busybox which\"\nworking_dir = \"/tmp\"").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.probe.command, "busybox which");
        assert_eq!(config.probe.working_dir, Some(PathBuf::from("/tmp")));
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = Config::load_from(Path::new("/nonexistent/treetest.toml")).unwrap_err();
        assert!(matches!(err, super::super::Error::FileRead { .. }));
    }
}
