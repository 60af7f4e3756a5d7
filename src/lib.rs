//! Prepos: pull request approval summaries for GitHub repositories.
//!
//! Lists the open pull requests of an author's repositories, decides per PR
//! whether it is approved (latest review per reviewer, a minimum number of
//! approvals and no outstanding change requests) and whether GitHub reports
//! it mergeable, and produces the whole report as a single JSON document.

pub mod approval;
pub mod cli;
pub mod github;
pub mod pipeline;
pub mod review;
pub mod types;

pub use approval::{Verdict, evaluate};
pub use cli::parse_args;
pub use github::GitHub;
pub use pipeline::{run, summarize_pull_requests};
pub use review::{StateCounts, count_by_state, latest_state_per_reviewer};
pub use types::{
    ConfigError, DEFAULT_MIN_APPROVALS, DEFAULT_SKIP_LABELS, Forge, INVALID_ARGUMENTS, Issue,
    OutputFormat, PrResult, Pull, Repo, RepoError, Review, ReviewState, Rules, RunRequest,
    RunResult, RunSpec,
};
