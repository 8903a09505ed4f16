//! Position-mapping queries and their outcomes.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use super::identity::ArtifactIdentity;

/// A click on the rendered artifact, translated into a mapper request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapperQuery {
    /// Artifact the clicking surface announced, if it announced one.
    pub artifact: Option<ArtifactIdentity>,
    /// 1-based page number.
    pub page: u32,
    pub x: f64,
    pub y: f64,
    /// URL-decoded path hint sent with the click.
    pub source_hint: String,
}

impl MapperQuery {
    /// The `page:x:y:file` operand understood by `synctex edit -o`.
    pub fn edit_operand(&self) -> String {
        format!(
            "{}:{}:{}:{}",
            self.page,
            format_coordinate(self.x),
            format_coordinate(self.y),
            self.source_hint
        )
    }
}

/// Integral coordinates are written without a fractional part.
fn format_coordinate(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Source position the mapper resolved a click to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    pub path: PathBuf,
    /// 1-based line.
    pub line: u32,
    /// 0-based column; the mapper reports unknown columns as 0.
    pub column: u32,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.path.display(), self.line, self.column)
    }
}

/// Why a mapper invocation did not produce a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The process could not be started.
    Spawn,
    /// The process exited with a non-zero status.
    Exit,
    /// The process did not finish within the configured timeout.
    Timeout,
    /// The process succeeded but reported no source record.
    NoMatch,
}

/// Diagnostics captured from a failed mapper invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureReport {
    pub kind: FailureKind,
    /// Process exit code, when the process ran to completion.
    pub exit_code: Option<i32>,
    /// Captured stdout and stderr.
    pub diagnostics: String,
}

impl FailureReport {
    /// User-facing notification text.
    pub fn notification(&self) -> String {
        match (self.kind, self.exit_code) {
            (FailureKind::Exit, Some(code)) => format!(
                "SyncTeX returned error code {}. See the preview log for details.",
                code
            ),
            (FailureKind::Exit, None) => {
                "SyncTeX was terminated by a signal. See the preview log for details.".to_string()
            }
            (FailureKind::Spawn, _) => {
                "SyncTeX could not be started. See the preview log for details.".to_string()
            }
            (FailureKind::Timeout, _) => {
                "SyncTeX did not respond in time. See the preview log for details.".to_string()
            }
            (FailureKind::NoMatch, _) => {
                "SyncTeX found no source location for this position.".to_string()
            }
        }
    }
}

/// Terminal outcome of one mapper invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MapperResult {
    Mapped(SourceLocation),
    Failed(FailureReport),
}

impl MapperResult {
    pub fn is_mapped(&self) -> bool {
        matches!(self, MapperResult::Mapped(_))
    }
}
