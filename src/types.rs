use std::collections::HashSet;

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

/// Default number of approvals a pull request needs.
pub const DEFAULT_MIN_APPROVALS: u32 = 2;

/// Labels that exclude an issue from the report unless overridden.
pub const DEFAULT_SKIP_LABELS: &[&str] = &["wip"];

/// User-facing message for any missing or malformed argument.
pub const INVALID_ARGUMENTS: &str = "Invalid argument(s), please use prepos --help.";

/// Error returned when a repository owner or name is not a usable path
/// segment.
#[derive(Debug, Clone, PartialEq)]
pub enum RepoError {
    EmptyOwner,
    EmptyName,
    InvalidOwner(String),
    InvalidName(String),
}

impl std::fmt::Display for RepoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepoError::EmptyOwner => write!(f, "repository owner cannot be empty"),
            RepoError::EmptyName => write!(f, "repository name cannot be empty"),
            RepoError::InvalidOwner(owner) => {
                write!(f, "repository owner '{}' must not contain '/'", owner)
            }
            RepoError::InvalidName(name) => {
                write!(f, "repository name '{}' must not contain '/'", name)
            }
        }
    }
}

impl std::error::Error for RepoError {}

/// A GitHub repository identified by owner and name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repo {
    owner: String,
    name: String,
}

impl Repo {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self, RepoError> {
        let owner = owner.into();
        let name = name.into();

        if owner.is_empty() {
            return Err(RepoError::EmptyOwner);
        }
        if name.is_empty() {
            return Err(RepoError::EmptyName);
        }
        if owner.contains('/') {
            return Err(RepoError::InvalidOwner(owner));
        }
        if name.contains('/') {
            return Err(RepoError::InvalidName(name));
        }

        Ok(Self { owner, name })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for Repo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// An entry from a repository's issue tracker. GitHub lists pull requests
/// through the same endpoint, flagged by `is_pull_request`.
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    pub labels: HashSet<String>,
    pub is_pull_request: bool,
}

impl Issue {
    pub fn has_any_label(&self, labels: &HashSet<String>) -> bool {
        !self.labels.is_disjoint(labels)
    }
}

/// Review states as reported by GitHub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewState {
    Approved,
    ChangesRequested,
    Commented,
    Dismissed,
    Pending,
    Other,
}

/// A single submitted review. Reviews for a pull request are kept in the
/// order GitHub returns them, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub reviewer_id: String,
    pub state: ReviewState,
}

impl Review {
    pub fn new(reviewer_id: impl Into<String>, state: ReviewState) -> Self {
        Self {
            reviewer_id: reviewer_id.into(),
            state,
        }
    }
}

/// Snapshot of a pull request's mergeability. `None` means GitHub has not
/// finished computing it yet.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pull {
    pub mergeable: Option<bool>,
}

/// Approval rules applied to every pull request in a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Rules {
    pub min_approvals: u32,
    pub skip_labels: HashSet<String>,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            min_approvals: DEFAULT_MIN_APPROVALS,
            skip_labels: DEFAULT_SKIP_LABELS.iter().map(|l| l.to_string()).collect(),
        }
    }
}

/// Raised when the run cannot start because required input is missing or
/// malformed.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    MissingToken,
    MissingAuthor,
    MissingRepos,
    InvalidRepo(RepoError),
    InvalidArguments,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(INVALID_ARGUMENTS)
    }
}

impl std::error::Error for ConfigError {}

/// Unvalidated run inputs as collected from the command line.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunRequest {
    pub token: Option<String>,
    pub author: Option<String>,
    pub repos: Vec<String>,
    pub rules: Rules,
}

impl RunRequest {
    /// Checks that token, author and at least one repository are present
    /// and resolves every repository name against the author.
    pub fn validate(&self) -> Result<RunSpec, ConfigError> {
        let token = self
            .token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingToken)?;
        let author = self
            .author
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .ok_or(ConfigError::MissingAuthor)?;

        let repos = self
            .repos
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .map(|name| Repo::new(author, name).map_err(ConfigError::InvalidRepo))
            .collect::<Result<Vec<_>, _>>()?;

        if repos.is_empty() {
            return Err(ConfigError::MissingRepos);
        }

        Ok(RunSpec {
            token: token.to_string(),
            repos,
            rules: self.rules.clone(),
        })
    }
}

/// Validated inputs for a single run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSpec {
    pub token: String,
    pub repos: Vec<Repo>,
    pub rules: Rules,
}

/// One reported pull request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrResult {
    pub repo: String,
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    pub approved: bool,
    pub mergeable: bool,
}

/// Top-level output document: either every qualifying pull request or a
/// single error message, never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunResult {
    Pulls(Vec<PrResult>),
    Error(String),
}

impl RunResult {
    pub fn from_error(err: &anyhow::Error) -> Self {
        RunResult::Error(format!("{:#}", err))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, RunResult::Error(_))
    }
}

impl From<ConfigError> for RunResult {
    fn from(err: ConfigError) -> Self {
        RunResult::Error(err.to_string())
    }
}

/// How the result document is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum OutputFormat {
    #[default]
    Compact,
    Pretty,
}

/// Read access to a code hosting service. `Err` means the request failed;
/// an empty `Ok` is a successful empty answer.
#[async_trait]
pub trait Forge {
    /// Lists every open issue of `repo`, pull requests included, across all
    /// pages.
    async fn list_issues(&self, repo: &Repo) -> Result<Vec<Issue>>;

    async fn get_pull(&self, repo: &Repo, number: u64) -> Result<Pull>;

    /// Lists every review of a pull request, oldest first.
    async fn list_reviews(&self, repo: &Repo, number: u64) -> Result<Vec<Review>>;
}
