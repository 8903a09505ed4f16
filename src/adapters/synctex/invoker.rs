//! SyncTeX process adapter - Implementation of PositionMapper.
//!
//! Runs `synctex edit -o "<page>:<x>:<y>:<file>"` once per query. Arguments
//! are handed to the OS as a vector, not through a shell, so file names with
//! spaces or shell metacharacters reach SyncTeX unchanged.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::config::MapperConfig;
use crate::domain::preview::{FailureKind, FailureReport, MapperQuery, MapperResult};
use crate::ports::PositionMapper;

use super::output::parse_edit_output;

/// Position mapper backed by the `synctex` executable.
#[derive(Debug, Clone)]
pub struct SynctexMapper {
    program: String,
    prefix_args: Vec<String>,
    timeout: Duration,
}

impl SynctexMapper {
    pub fn new(config: &MapperConfig) -> Self {
        Self {
            program: config.program.clone(),
            prefix_args: config.prefix_args.clone(),
            timeout: config.timeout(),
        }
    }

    /// Arguments for one query.
    pub fn args(&self, query: &MapperQuery) -> Vec<String> {
        let mut args = self.prefix_args.clone();
        args.extend([
            "edit".to_string(),
            "-o".to_string(),
            query.edit_operand(),
        ]);
        args
    }

    /// Shell-style rendering of the command, for logs.
    pub fn display_command(&self, query: &MapperQuery) -> String {
        std::iter::once(self.program.clone())
            .chain(self.args(query))
            .map(|arg| quote(&arg))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn failure(kind: FailureKind, exit_code: Option<i32>, diagnostics: String) -> MapperResult {
        MapperResult::Failed(FailureReport {
            kind,
            exit_code,
            diagnostics,
        })
    }
}

/// Double-quotes arguments that would not survive word splitting.
fn quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=,+@%".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("\"{}\"", arg.replace('\\', "\\\\").replace('"', "\\\""))
    }
}

#[async_trait]
impl PositionMapper for SynctexMapper {
    async fn invoke(&self, query: &MapperQuery) -> MapperResult {
        let command_line = self.display_command(query);
        tracing::debug!(command = %command_line, "Invoking position mapper");

        let child = Command::new(&self.program)
            .args(self.args(query))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn();

        let child = match child {
            Ok(child) => child,
            Err(e) => {
                return Self::failure(
                    FailureKind::Spawn,
                    None,
                    format!("Failed to start {}: {}", command_line, e),
                );
            }
        };

        // Dropping the future on timeout drops the child, which kills it.
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Self::failure(
                    FailureKind::Spawn,
                    None,
                    format!("Failed to collect output of {}: {}", command_line, e),
                );
            }
            Err(_) => {
                return Self::failure(
                    FailureKind::Timeout,
                    None,
                    format!(
                        "Command timed out after {} ms: {}",
                        self.timeout.as_millis(),
                        command_line
                    ),
                );
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            return Self::failure(
                FailureKind::Exit,
                output.status.code(),
                format!("Command failed: {}\n{}{}", command_line, stderr, stdout),
            );
        }

        tracing::trace!(stdout = %stdout, "Position mapper output");

        match parse_edit_output(&stdout) {
            Some(location) => MapperResult::Mapped(location),
            None => Self::failure(
                FailureKind::NoMatch,
                output.status.code(),
                format!("No source record in output of {}\n{}{}", command_line, stdout, stderr),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn query(hint: &str) -> MapperQuery {
        MapperQuery {
            artifact: None,
            page: 3,
            x: 100.0,
            y: 200.0,
            source_hint: hint.to_string(),
        }
    }

    fn mapper(program: &str, prefix_args: &[&str], timeout_ms: u64) -> SynctexMapper {
        SynctexMapper::new(&MapperConfig {
            program: program.to_string(),
            prefix_args: prefix_args.iter().map(|s| s.to_string()).collect(),
            timeout_ms,
        })
    }

    #[test]
    fn args_follow_edit_syntax() {
        let mapper = SynctexMapper::new(&MapperConfig::default());
        assert_eq!(
            mapper.args(&query("/proj/main.tex")),
            vec!["edit", "-o", "3:100:200:/proj/main.tex"]
        );
    }

    #[test]
    fn display_command_quotes_paths_with_spaces() {
        let mapper = SynctexMapper::new(&MapperConfig::default());
        assert_eq!(
            mapper.display_command(&query("/my proj/main.tex")),
            r#"synctex edit -o "3:100:200:/my proj/main.tex""#
        );
    }

    #[test]
    fn quote_escapes_embedded_quotes() {
        assert_eq!(quote(r#"a"b"#), r#""a\"b""#);
        assert_eq!(quote(""), r#""""#);
    }

    #[tokio::test]
    async fn missing_program_is_spawn_failure() {
        let mapper = mapper("/nonexistent/synctex-binary", &[], 1000);

        let MapperResult::Failed(report) = mapper.invoke(&query("/proj/main.tex")).await else {
            panic!("expected failure");
        };
        assert_eq!(report.kind, FailureKind::Spawn);
        let command_line = "/nonexistent/synctex-binary edit -o 3:100:200:/proj/main.tex";
        assert!(report
            .diagnostics
            .starts_with(&format!("Failed to start {}:", command_line)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn parses_location_from_successful_run() {
        // With `sh -c`, the operand after "edit -o" arrives as $3.
        let mapper = mapper(
            "sh",
            &[
                "-c",
                "printf 'SyncTeX result begin\\nInput:%s\\nLine:12\\nColumn:4\\n' \"${3##*:}\"",
                "synctex",
            ],
            5000,
        );

        let result = mapper.invoke(&query("/my proj/main.tex")).await;

        assert_eq!(
            result,
            MapperResult::Mapped(crate::domain::preview::SourceLocation {
                path: PathBuf::from("/my proj/main.tex"),
                line: 12,
                column: 4,
            })
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_captures_code_and_stderr() {
        let mapper = mapper("sh", &["-c", "echo 'no entry' >&2; exit 1", "synctex"], 5000);

        let MapperResult::Failed(report) = mapper.invoke(&query("/proj/main.tex")).await else {
            panic!("expected failure");
        };
        assert_eq!(report.kind, FailureKind::Exit);
        assert_eq!(report.exit_code, Some(1));
        assert!(report.diagnostics.contains("no entry"));
        assert!(report.notification().contains('1'));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn success_without_record_is_no_match() {
        let mapper = mapper("sh", &["-c", "echo 'SyncTeX result begin'", "synctex"], 5000);

        let MapperResult::Failed(report) = mapper.invoke(&query("/proj/main.tex")).await else {
            panic!("expected failure");
        };
        assert_eq!(report.kind, FailureKind::NoMatch);
        assert_eq!(report.exit_code, Some(0));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn hanging_process_times_out() {
        let mapper = mapper("sh", &["-c", "sleep 10", "synctex"], 100);

        let started = std::time::Instant::now();
        let MapperResult::Failed(report) = mapper.invoke(&query("/proj/main.tex")).await else {
            panic!("expected failure");
        };
        assert_eq!(report.kind, FailureKind::Timeout);
        assert!(report.diagnostics.ends_with("3:100:200:/proj/main.tex"));
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
