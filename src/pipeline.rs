use tracing::{debug, info};

use crate::{
    approval::evaluate,
    types::{Forge, Issue, PrResult, Repo, RunRequest, RunResult, RunSpec},
};

/// Runs a complete report for the request.
///
/// Configuration is validated before anything is fetched. The first failed
/// request aborts the run and discards results gathered so far; the result
/// is then the error document instead of the pull request list.
pub async fn run<F>(request: &RunRequest, forge: &F) -> RunResult
where
    F: Forge + Sync,
{
    let spec = match request.validate() {
        Ok(spec) => spec,
        Err(err) => {
            debug!(?err, "rejecting run configuration");
            return err.into();
        }
    };

    match summarize_pull_requests(&spec, forge).await {
        Ok(pulls) => RunResult::Pulls(pulls),
        Err(err) => RunResult::from_error(&err),
    }
}

/// Collects a result for every open, non-skipped pull request in each
/// repository, preserving repository order and the forge's issue order.
pub async fn summarize_pull_requests<F>(spec: &RunSpec, forge: &F) -> anyhow::Result<Vec<PrResult>>
where
    F: Forge + Sync,
{
    let mut pulls = Vec::new();

    for repo in &spec.repos {
        let issues = forge.list_issues(repo).await?;
        debug!(%repo, issues = issues.len(), "fetched issues");

        for issue in issues {
            if !should_report(&issue, spec) {
                continue;
            }
            pulls.push(summarize_pull_request(repo, issue, spec, forge).await?);
        }
    }

    info!(pulls = pulls.len(), "summarized pull requests");
    Ok(pulls)
}

fn should_report(issue: &Issue, spec: &RunSpec) -> bool {
    if !issue.is_pull_request {
        return false;
    }

    if issue.has_any_label(&spec.rules.skip_labels) {
        debug!(number = issue.number, "skipping labelled pull request");
        return false;
    }

    true
}

async fn summarize_pull_request<F>(
    repo: &Repo,
    issue: Issue,
    spec: &RunSpec,
    forge: &F,
) -> anyhow::Result<PrResult>
where
    F: Forge + Sync,
{
    let reviews = forge.list_reviews(repo, issue.number).await?;
    let pull = forge.get_pull(repo, issue.number).await?;
    let verdict = evaluate(&reviews, &pull, &spec.rules);

    debug!(
        %repo,
        number = issue.number,
        reviews = reviews.len(),
        approved = verdict.approved,
        mergeable = verdict.mergeable,
        "evaluated pull request"
    );

    Ok(PrResult {
        repo: repo.to_string(),
        number: issue.number,
        title: issue.title,
        body: issue.body,
        approved: verdict.approved,
        mergeable: verdict.mergeable,
    })
}
