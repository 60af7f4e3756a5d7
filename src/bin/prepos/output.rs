use std::io::Write;

use anyhow::Result;
use prepos::{OutputFormat, RunResult};

/// Writes the result document. Compact output has no trailing newline;
/// pretty output ends with one.
pub fn write_run_result<W: Write>(
    result: &RunResult,
    format: OutputFormat,
    writer: &mut W,
) -> Result<()> {
    match format {
        OutputFormat::Compact => {
            serde_json::to_writer(&mut *writer, result)?;
        }
        OutputFormat::Pretty => {
            serde_json::to_writer_pretty(&mut *writer, result)?;
            writeln!(writer)?;
        }
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use prepos::{ConfigError, PrResult};

    use super::*;

    fn render(result: &RunResult, format: OutputFormat) -> String {
        let mut output = Vec::new();
        write_run_result(result, format, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    fn sample_pulls() -> RunResult {
        RunResult::Pulls(vec![
            PrResult {
                repo: "author/repo1".to_string(),
                number: 1,
                title: "Test PR".to_string(),
                body: Some("Nothing special.\n".to_string()),
                approved: false,
                mergeable: true,
            },
            PrResult {
                repo: "author/repo3".to_string(),
                number: 1,
                title: "Added specs".to_string(),
                body: None,
                approved: false,
                mergeable: true,
            },
        ])
    }

    #[test]
    fn test_compact_pulls() {
        assert_eq!(
            render(&sample_pulls(), OutputFormat::Compact),
            concat!(
                r#"{"pulls":["#,
                r#"{"repo":"author/repo1","number":1,"title":"Test PR","body":"Nothing special.\n","approved":false,"mergeable":true},"#,
                r#"{"repo":"author/repo3","number":1,"title":"Added specs","body":null,"approved":false,"mergeable":true}"#,
                "]}"
            )
        );
    }

    #[test]
    fn test_compact_empty_pulls() {
        assert_eq!(
            render(&RunResult::Pulls(vec![]), OutputFormat::Compact),
            r#"{"pulls":[]}"#
        );
    }

    #[test]
    fn test_compact_error() {
        let result = RunResult::from(ConfigError::MissingToken);
        assert_eq!(
            render(&result, OutputFormat::Compact),
            r#"{"error":"Invalid argument(s), please use prepos --help."}"#
        );
    }

    #[test]
    fn test_pretty_error() {
        let result = RunResult::Error("boom".to_string());
        assert_eq!(
            render(&result, OutputFormat::Pretty),
            "{\n  \"error\": \"boom\"\n}\n"
        );
    }

    #[test]
    fn test_pretty_pulls() {
        let output = render(&sample_pulls(), OutputFormat::Pretty);
        assert!(output.starts_with("{\n  \"pulls\": [\n    {\n      \"repo\": \"author/repo1\","));
        assert!(output.contains("\"body\": null,"));
        assert!(output.ends_with("}\n"));

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["pulls"].as_array().unwrap().len(), 2);
    }
}
