//! External command plugin.
//!
//! Runs a program once per invocation and reads its JSON result from
//! stdout. The resolved window is appended to the program's arguments and
//! the raw options are exported through the environment:
//!
//! ```text
//! <program> <args>... --start <ms> --end <ms> --step <step>
//!
//! TSA_SINCE, TSA_UNTIL, TSA_STEP   raw option text (unset when absent)
//! TSA_AGGREGATE                    "true" or "false"
//! ```

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use super::{decode, Plugin};
use crate::data::{PluginResult, RangeOptions, TimeWindow};
use crate::error::PluginError;

/// A plugin backed by an external program.
#[derive(Debug, Clone)]
pub struct CommandPlugin {
    program: String,
    args: Vec<String>,
    description: String,
}

impl CommandPlugin {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        let program = program.into();
        let description = format!("exec: {}", program);
        Self {
            program,
            args,
            description,
        }
    }

    /// The full argument list passed for `window`.
    pub fn arguments(&self, window: &TimeWindow) -> Vec<String> {
        let mut args = self.args.clone();
        args.extend([
            "--start".to_string(),
            window.start.to_string(),
            "--end".to_string(),
            window.end.to_string(),
            "--step".to_string(),
            window.step.to_string(),
        ]);
        args
    }

    fn command(&self, window: &TimeWindow, options: &RangeOptions) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(self.arguments(window))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        for (key, value) in [
            ("TSA_SINCE", &options.since),
            ("TSA_UNTIL", &options.until),
            ("TSA_STEP", &options.step),
        ] {
            match value {
                Some(value) => command.env(key, value),
                None => command.env_remove(key),
            };
        }
        command.env("TSA_AGGREGATE", options.aggregate.to_string());
        command
    }
}

#[async_trait]
impl Plugin for CommandPlugin {
    async fn execute(
        &self,
        window: &TimeWindow,
        options: &RangeOptions,
    ) -> Result<PluginResult, PluginError> {
        debug!(program = %self.program, args = ?self.arguments(window), "running plugin command");

        let output = self.command(window, options).output().await?;
        if !output.status.success() {
            return Err(PluginError::Command {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        decode(&output.stdout)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> TimeWindow {
        TimeWindow {
            start: 1_000,
            end: 61_000,
            step: 30.0,
        }
    }

    fn sh(script: &str) -> CommandPlugin {
        CommandPlugin::new("sh", vec!["-c".to_string(), script.to_string(), "sh".to_string()])
    }

    #[test]
    fn test_arguments_append_window() {
        let plugin = CommandPlugin::new("fetch", vec!["--metric".into(), "cpu".into()]);
        assert_eq!(
            plugin.arguments(&window()),
            vec!["--metric", "cpu", "--start", "1000", "--end", "61000", "--step", "30"]
        );
        assert_eq!(plugin.description(), "exec: fetch");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_receives_window_and_options() {
        // Echo back the values the plugin was given as a labeled result
        let plugin = sh(r#"if [ "$TSA_AGGREGATE" = true ]; then a=1; else a=0; fi
echo "{\"data\": {\"start\": [$2], \"end\": [$4], \"agg\": [$a]}}""#);

        let options = RangeOptions {
            aggregate: true,
            ..Default::default()
        };
        let result = plugin.execute(&window(), &options).await.unwrap();
        let PluginResult::Labeled(labeled) = result else {
            panic!("expected labeled result");
        };
        assert_eq!(labeled["start"], vec![1000.0]);
        assert_eq!(labeled["end"], vec![61000.0]);
        assert_eq!(labeled["agg"], vec![1.0]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_failure_carries_stderr() {
        let plugin = sh("echo 'upstream unavailable' >&2; exit 3");
        let err = plugin
            .execute(&window(), &RangeOptions::default())
            .await
            .unwrap_err();
        match err {
            PluginError::Command { stderr, status, .. } => {
                assert_eq!(stderr, "upstream unavailable");
                assert_eq!(status.code(), Some(3));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_missing_program() {
        let plugin = CommandPlugin::new("/nonexistent/tsa-plugin", Vec::new());
        let err = plugin
            .execute(&window(), &RangeOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, PluginError::Io(_)));
    }
}
