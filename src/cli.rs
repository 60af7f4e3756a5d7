use clap::Parser;

use crate::types::{DEFAULT_MIN_APPROVALS, OutputFormat, Rules, RunRequest};

const BUILD_INFO_HUMAN: &str = env!("BUILD_INFO_HUMAN");

#[derive(Parser, Debug)]
#[command(
    name = "prepos",
    about = "Summarize open pull requests across an author's GitHub repositories as JSON, with approval and mergeability per PR"
)]
#[command(version, long_version = BUILD_INFO_HUMAN)]
struct CliArgs {
    /// GitHub access token
    #[arg(short = 't', long = "gh-token", value_name = "TOKEN")]
    pub token: Option<String>,

    /// Owner of the repositories
    #[arg(short = 'a', long = "gh-author", value_name = "AUTHOR")]
    pub author: Option<String>,

    /// Author's repositories to report on (comma-separated)
    #[arg(
        short = 'r',
        long = "gh-repos",
        value_name = "COMMA,SEPARATED,REPOS",
        value_delimiter = ','
    )]
    pub repos: Vec<String>,

    /// Minimum approvals required
    #[arg(
        short = 'm',
        long = "min-approvals",
        default_value_t = DEFAULT_MIN_APPROVALS,
        value_name = "INTEGER"
    )]
    pub min_approvals: u32,

    /// Labels to skip PRs with (comma-separated)
    #[arg(
        short = 's',
        long = "skip-labels",
        value_name = "COMMA,SEPARATED,LABELS",
        value_delimiter = ',',
        default_value = "wip"
    )]
    pub skip_labels: Vec<String>,

    /// Prettify JSON output
    #[arg(short = 'p', long)]
    pub prettify: bool,
}

fn split_list(values: Vec<String>) -> impl Iterator<Item = String> {
    values
        .into_iter()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn determine_output_format(cli: &CliArgs) -> OutputFormat {
    if cli.prettify {
        OutputFormat::Pretty
    } else {
        OutputFormat::Compact
    }
}

fn build_request_from_cli(cli: CliArgs) -> (RunRequest, OutputFormat) {
    let output_format = determine_output_format(&cli);

    let request = RunRequest {
        token: cli.token,
        author: cli.author,
        repos: split_list(cli.repos).collect(),
        rules: Rules {
            min_approvals: cli.min_approvals,
            skip_labels: split_list(cli.skip_labels).collect(),
        },
    };

    (request, output_format)
}

/// Parses command-line arguments into a run request and output format.
///
/// Required inputs are not enforced here; a request missing them is
/// rejected by `RunRequest::validate` so the failure can be reported as a
/// JSON document. Errors returned here come straight from clap, including
/// the help and version "errors".
pub fn parse_args<I, T>(args: I) -> Result<(RunRequest, OutputFormat), clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = CliArgs::try_parse_from(args)?;
    Ok(build_request_from_cli(cli))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use clap::error::ErrorKind;

    use super::*;

    #[test]
    fn test_defaults() {
        let (request, format) = parse_args(["prepos"]).unwrap();
        assert_eq!(request, RunRequest::default());
        assert_eq!(format, OutputFormat::Compact);
    }

    #[test]
    fn test_short_flags() {
        let (request, format) = parse_args([
            "prepos", "-t", "TOKEN", "-a", "your", "-r", "one,two", "-m", "1", "-s", "bug,wontfix",
            "-p",
        ])
        .unwrap();

        assert_eq!(request.token.as_deref(), Some("TOKEN"));
        assert_eq!(request.author.as_deref(), Some("your"));
        assert_eq!(request.repos, vec!["one", "two"]);
        assert_eq!(request.rules.min_approvals, 1);
        assert_eq!(
            request.rules.skip_labels,
            HashSet::from(["bug".to_string(), "wontfix".to_string()])
        );
        assert_eq!(format, OutputFormat::Pretty);
    }

    #[test]
    fn test_long_flags() {
        let (request, format) = parse_args([
            "prepos",
            "--gh-token",
            "TOKEN",
            "--gh-author",
            "your",
            "--gh-repos",
            "_repo",
            "--min-approvals",
            "3",
            "--skip-labels",
            "hold",
            "--prettify",
        ])
        .unwrap();

        assert_eq!(request.token.as_deref(), Some("TOKEN"));
        assert_eq!(request.author.as_deref(), Some("your"));
        assert_eq!(request.repos, vec!["_repo"]);
        assert_eq!(request.rules.min_approvals, 3);
        assert_eq!(request.rules.skip_labels, HashSet::from(["hold".to_string()]));
        assert_eq!(format, OutputFormat::Pretty);
    }

    #[test]
    fn test_list_entries_are_trimmed() {
        let (request, _) = parse_args(["prepos", "-r", " a,,b ,", "-s", ", wip ,"]).unwrap();
        assert_eq!(request.repos, vec!["a", "b"]);
        assert_eq!(request.rules.skip_labels, HashSet::from(["wip".to_string()]));
    }

    #[test]
    fn test_empty_skip_labels_disables_skipping() {
        let (request, _) = parse_args(["prepos", "-s", ""]).unwrap();
        assert!(request.rules.skip_labels.is_empty());
    }

    #[test]
    fn test_help_and_version() {
        let err = parse_args(["prepos", "-h"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert!(err.to_string().contains("--gh-token"));

        let err = parse_args(["prepos", "--version"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_non_numeric_min_approvals() {
        let err = parse_args(["prepos", "-m", "two"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }
}
