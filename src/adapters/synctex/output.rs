//! Parser for `synctex edit` output.
//!
//! A successful lookup prints a result block of `Key:value` records:
//!
//! ```text
//! SyncTeX result begin
//! Output:/proj/main.pdf
//! Input:/proj/./main.tex
//! Line:12
//! Column:-1
//! Offset:0
//! Context:
//! SyncTeX result end
//! ```
//!
//! Only the first record of each kind is used.

use std::path::PathBuf;

use crate::domain::preview::SourceLocation;

/// Extract the source location from `synctex edit` stdout.
///
/// Returns `None` when no `Input`/`Line` pair is present. Unknown columns
/// (`-1`) are reported as column 0.
pub fn parse_edit_output(stdout: &str) -> Option<SourceLocation> {
    let mut input = None;
    let mut line = None;
    let mut column = None;

    for record in stdout.lines() {
        let Some((key, value)) = record.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match key.trim() {
            "Input" if input.is_none() && !value.is_empty() => input = Some(PathBuf::from(value)),
            "Line" if line.is_none() => line = value.parse::<u32>().ok(),
            "Column" if column.is_none() => column = value.parse::<i64>().ok(),
            _ => {}
        }
    }

    Some(SourceLocation {
        path: input?,
        line: line?,
        column: column
            .and_then(|c| u32::try_from(c).ok())
            .unwrap_or(0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULT: &str = "This is SyncTeX command line utility, version 1.5\n\
        SyncTeX result begin\n\
        Output:/proj/main.pdf\n\
        Input:/proj/./main.tex\n\
        Line:12\n\
        Column:-1\n\
        Offset:0\n\
        Context:\n\
        SyncTeX result end\n";

    #[test]
    fn parses_result_block() {
        let location = parse_edit_output(RESULT).unwrap();
        assert_eq!(location.path, PathBuf::from("/proj/./main.tex"));
        assert_eq!(location.line, 12);
        assert_eq!(location.column, 0);
    }

    #[test]
    fn keeps_known_column() {
        let location = parse_edit_output("Input:/a.tex\nLine:3\nColumn:7\n").unwrap();
        assert_eq!(location.column, 7);
    }

    #[test]
    fn first_record_wins() {
        let location =
            parse_edit_output("Input:/a.tex\nLine:3\nInput:/b.tex\nLine:9\n").unwrap();
        assert_eq!(location.path, PathBuf::from("/a.tex"));
        assert_eq!(location.line, 3);
    }

    #[test]
    fn windows_paths_keep_drive_letter() {
        let location = parse_edit_output("Input:C:\\proj\\main.tex\nLine:1\n").unwrap();
        assert_eq!(location.path, PathBuf::from("C:\\proj\\main.tex"));
    }

    #[test]
    fn missing_line_is_no_match() {
        assert!(parse_edit_output("Input:/a.tex\n").is_none());
    }

    #[test]
    fn empty_output_is_no_match() {
        assert!(parse_edit_output("").is_none());
        assert!(parse_edit_output("SyncTeX result begin\nSyncTeX result end\n").is_none());
    }
}
