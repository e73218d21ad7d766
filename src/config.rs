//! Settings loaded from an optional config file and the environment.
//!
//! # Configuration
//!
//! ```toml
//! since = "6h"
//! step = 60
//! aggregate = false
//! timeout = "30s"
//!
//! [plugin]
//! exec = "fetch-metrics"
//! args = ["--metric", "cpu"]
//! ```
//!
//! Every key can also be set through `TSA_`-prefixed environment
//! variables, with `__` separating nested keys (`TSA_PLUGIN__FILE`).
//! Command-line flags take precedence over both.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::data::duration::parse_duration;
use crate::data::RangeOptions;
use crate::error::{Error, ParseError, Result};
use crate::source::{CommandPlugin, FilePlugin, Plugin, StreamPlugin};

/// Path value that selects standard input for the file plugin.
pub const STDIN_PATH: &str = "-";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub since: Option<String>,
    pub until: Option<String>,
    pub step: Option<String>,
    pub aggregate: bool,
    pub timeout: Option<String>,
    pub plugin: PluginSettings,
}

/// Which plugin to run. Exactly one of `file` or `exec` must be set.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PluginSettings {
    pub file: Option<PathBuf>,
    pub exec: Option<String>,
    pub args: Vec<String>,
}

impl Settings {
    /// Load settings from `path` (if any) and `TSA_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, environment())
    }

    fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        builder.add_source(env).build()?.try_deserialize()
    }

    /// The raw range options handed to the window resolver and the plugin.
    pub fn range_options(&self) -> RangeOptions {
        RangeOptions {
            since: self.since.clone(),
            until: self.until.clone(),
            step: self.step.clone(),
            aggregate: self.aggregate,
        }
    }

    /// The parsed plugin timeout, if one is configured.
    pub fn timeout(&self) -> Result<Option<Duration>, ParseError> {
        self.timeout
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| parse_duration(s).map_err(|err| ParseError::new("timeout", s, err)))
            .transpose()
    }
}

impl PluginSettings {
    /// Construct the configured plugin.
    pub fn build(&self) -> Result<Box<dyn Plugin>> {
        match (&self.file, &self.exec) {
            (Some(path), None) if path.as_os_str() == STDIN_PATH => {
                Ok(Box::new(StreamPlugin::stdin()))
            }
            (Some(path), None) => Ok(Box::new(FilePlugin::new(path))),
            (None, Some(program)) => Ok(Box::new(CommandPlugin::new(
                program.clone(),
                self.args.clone(),
            ))),
            (Some(_), Some(_)) => Err(Error::Config(ConfigError::Message(
                "plugin.file and plugin.exec are mutually exclusive".to_string(),
            ))),
            (None, None) => Err(Error::Config(ConfigError::Message(
                "no plugin configured: pass --file or --exec".to_string(),
            ))),
        }
    }
}

fn environment() -> Environment {
    Environment::with_prefix("TSA")
        .prefix_separator("_")
        .separator("__")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        environment().source(Some(map))
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::load_with_env(None, env(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.range_options(), RangeOptions::default());
        assert_eq!(settings.timeout().unwrap(), None);
    }

    #[test]
    fn test_load_toml_file() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
since = "6h"
step = 60
aggregate = true
timeout = "30s"

[plugin]
exec = "fetch-metrics"
args = ["--metric", "cpu"]
"#
        )
        .unwrap();

        let settings = Settings::load_with_env(Some(file.path()), env(&[])).unwrap();
        assert_eq!(settings.since.as_deref(), Some("6h"));
        assert_eq!(settings.step.as_deref(), Some("60"));
        assert!(settings.aggregate);
        assert_eq!(settings.timeout().unwrap(), Some(Duration::from_secs(30)));
        assert_eq!(settings.plugin.exec.as_deref(), Some("fetch-metrics"));
        assert_eq!(settings.plugin.args, vec!["--metric", "cpu"]);

        let plugin = settings.plugin.build().unwrap();
        assert_eq!(plugin.description(), "exec: fetch-metrics");
    }

    #[test]
    fn test_environment_overrides_file() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "since = \"6h\"").unwrap();

        let settings = Settings::load_with_env(
            Some(file.path()),
            env(&[("TSA_SINCE", "2h"), ("TSA_PLUGIN__FILE", "data.json")]),
        )
        .unwrap();
        assert_eq!(settings.since.as_deref(), Some("2h"));
        assert_eq!(settings.plugin.file, Some(PathBuf::from("data.json")));
    }

    #[test]
    fn test_missing_file() {
        let path = Path::new("/nonexistent/tsa.toml");
        assert!(Settings::load_with_env(Some(path), env(&[])).is_err());
    }

    #[test]
    fn test_invalid_timeout() {
        let settings = Settings {
            timeout: Some("soonish".to_string()),
            ..Default::default()
        };
        let err = settings.timeout().unwrap_err();
        assert_eq!(err.option, "timeout");
    }

    #[test]
    fn test_plugin_selection() {
        let stdin = PluginSettings {
            file: Some(PathBuf::from("-")),
            ..Default::default()
        };
        assert_eq!(stdin.build().unwrap().description(), "stream: stdin");

        let file = PluginSettings {
            file: Some(PathBuf::from("series.json")),
            ..Default::default()
        };
        assert_eq!(file.build().unwrap().description(), "file: series.json");

        let both = PluginSettings {
            file: Some(PathBuf::from("series.json")),
            exec: Some("fetch".to_string()),
            args: Vec::new(),
        };
        assert!(matches!(both.build(), Err(Error::Config(_))));
        assert!(matches!(PluginSettings::default().build(), Err(Error::Config(_))));
    }
}
