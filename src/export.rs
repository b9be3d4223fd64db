//! Report serialization for export and copy-all
//!
//! One fixed document shape serves both paths: "copy all" puts it on the
//! clipboard, export writes it to a timestamped text file. Section bodies
//! go in raw, exactly as the service sent them, so the artifact survives
//! being pasted into anything.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::api::AnalysisResult;
use crate::error::{ClearThinkError, Result};

const TITLE: &str = "CLEARTHINK DECISION ANALYSIS";
const FILE_PREFIX: &str = "clearthink-analysis";
const RULE_WIDTH: usize = 60;

/// Build the textual report for a completed analysis.
///
/// Structure is fixed: title, `Decision:` line, `Date:` line, a rule,
/// then each agent section as an emoji-prefixed heading over its raw
/// result text, each closed by a rule.
pub fn report_document(
    decision: &str,
    result: &AnalysisResult,
    generated_at: DateTime<Local>,
) -> String {
    let mut doc = String::new();
    doc.push_str(TITLE);
    doc.push('\n');
    doc.push_str(&format!("Decision: {decision}\n"));
    doc.push_str(&format!("Date: {}\n", generated_at.format("%Y-%m-%d %H:%M:%S")));
    doc.push_str(&"=".repeat(RULE_WIDTH));
    doc.push('\n');

    for section in &result.agents {
        doc.push('\n');
        doc.push_str(&format!("{} {}\n", section.emoji, section.name));
        doc.push_str(section.result_text.trim_end_matches('\n'));
        doc.push('\n');
        doc.push_str(&"-".repeat(RULE_WIDTH));
        doc.push('\n');
    }

    doc
}

/// File name for an export generated at `at`, unique to the second.
pub fn export_file_name(at: DateTime<Local>) -> String {
    format!("{FILE_PREFIX}-{}.txt", at.format("%Y%m%d-%H%M%S"))
}

/// Write the report into `dir` and return the file's path.
///
/// # Errors
///
/// Returns [`ClearThinkError::Export`] when the file cannot be written.
pub fn write_report(dir: &Path, decision: &str, result: &AnalysisResult) -> Result<PathBuf> {
    let now = Local::now();
    let path = dir.join(export_file_name(now));
    let document = report_document(decision, result, now);
    fs::write(&path, document).map_err(|e| ClearThinkError::Export {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::AgentSection;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn two_section_result() -> AnalysisResult {
        AnalysisResult {
            agents: vec![
                AgentSection {
                    name: "Problem Framing".into(),
                    emoji: "🎯".into(),
                    result_text: "## The real question\nIt is about autonomy.\n".into(),
                },
                AgentSection {
                    name: "Decision Summary".into(),
                    emoji: "✅".into(),
                    result_text: "**Take the offer.**".into(),
                },
            ],
        }
    }

    fn fixed_moment() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 8, 21, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_document_has_fixed_structure() {
        let doc = report_document(
            "Should I take a new job offer?",
            &two_section_result(),
            fixed_moment(),
        );

        let expected = format!(
            "CLEARTHINK DECISION ANALYSIS\n\
             Decision: Should I take a new job offer?\n\
             Date: 2026-08-21 09:30:00\n\
             {heavy}\n\
             \n\
             🎯 Problem Framing\n\
             ## The real question\n\
             It is about autonomy.\n\
             {light}\n\
             \n\
             ✅ Decision Summary\n\
             **Take the offer.**\n\
             {light}\n",
            heavy = "=".repeat(RULE_WIDTH),
            light = "-".repeat(RULE_WIDTH),
        );
        assert_eq!(doc, expected);
    }

    #[test]
    fn test_section_text_is_raw_markup() {
        let doc = report_document("d", &two_section_result(), fixed_moment());
        // Markup passes through untouched; export never renders it.
        assert!(doc.contains("## The real question"));
        assert!(doc.contains("**Take the offer.**"));
    }

    #[test]
    fn test_file_name_is_timestamped() {
        assert_eq!(
            export_file_name(fixed_moment()),
            "clearthink-analysis-20260821-093000.txt"
        );
    }

    #[test]
    fn test_write_report_creates_readable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_report(dir.path(), "a decision", &two_section_result()).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with(TITLE));
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with(FILE_PREFIX));
    }

    #[test]
    fn test_unwritable_directory_reports_export_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        let err = write_report(&missing, "d", &two_section_result()).unwrap_err();
        assert_eq!(err.code(), "CT-031");
    }
}
