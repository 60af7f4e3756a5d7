use anyhow::{Context, Result};
use async_trait::async_trait;
use octocrab::{Octocrab, models, params};
use tracing::debug;

use crate::types::{Forge, Issue, Pull, Repo, Review, ReviewState};

/// Largest page size the GitHub REST API accepts.
const PER_PAGE: u8 = 100;

/// `Forge` backed by the GitHub REST API.
///
/// Listings are always followed to the last page.
pub struct GitHub {
    client: Octocrab,
}

impl GitHub {
    /// Creates a client authenticated with a personal access token.
    /// Building the client performs no requests.
    pub fn new(token: Option<&str>) -> Result<Self> {
        let builder = Octocrab::builder();
        let builder = match token {
            Some(token) => builder.personal_token(token.to_string()),
            None => builder,
        };
        let client = builder.build().context("Failed to create GitHub client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Forge for GitHub {
    async fn list_issues(&self, repo: &Repo) -> Result<Vec<Issue>> {
        let endpoint = format!("GET /repos/{}/issues", repo);
        debug!(%endpoint, "listing issues");

        let first_page = self
            .client
            .issues(repo.owner(), repo.name())
            .list()
            .state(params::State::Open)
            .per_page(PER_PAGE)
            .send()
            .await
            .with_context(|| endpoint.clone())?;
        let issues = self
            .client
            .all_pages(first_page)
            .await
            .with_context(|| endpoint.clone())?;

        Ok(issues.into_iter().map(convert_issue).collect())
    }

    async fn get_pull(&self, repo: &Repo, number: u64) -> Result<Pull> {
        let endpoint = format!("GET /repos/{}/pulls/{}", repo, number);
        debug!(%endpoint, "fetching pull request");

        let pull = self
            .client
            .pulls(repo.owner(), repo.name())
            .get(number)
            .await
            .with_context(|| endpoint.clone())?;

        Ok(Pull {
            mergeable: pull.mergeable,
        })
    }

    async fn list_reviews(&self, repo: &Repo, number: u64) -> Result<Vec<Review>> {
        let endpoint = format!("GET /repos/{}/pulls/{}/reviews", repo, number);
        debug!(%endpoint, "listing reviews");

        let first_page = self
            .client
            .pulls(repo.owner(), repo.name())
            .list_reviews(number)
            .per_page(PER_PAGE)
            .send()
            .await
            .with_context(|| endpoint.clone())?;
        let reviews = self
            .client
            .all_pages(first_page)
            .await
            .with_context(|| endpoint.clone())?;

        Ok(reviews.into_iter().filter_map(convert_review).collect())
    }
}

fn convert_issue(issue: models::issues::Issue) -> Issue {
    Issue {
        number: issue.number,
        title: issue.title,
        body: issue.body,
        labels: issue.labels.into_iter().map(|label| label.name).collect(),
        is_pull_request: issue.pull_request.is_some(),
    }
}

// Reviews from deleted accounts have no user and cannot be attributed.
fn convert_review(review: models::pulls::Review) -> Option<Review> {
    let reviewer = review.user?;
    let state = review.state?;
    Some(Review::new(reviewer.id.to_string(), convert_review_state(&state)))
}

fn convert_review_state(state: &models::pulls::ReviewState) -> ReviewState {
    use models::pulls::ReviewState as Api;

    match state {
        Api::Approved => ReviewState::Approved,
        Api::ChangesRequested => ReviewState::ChangesRequested,
        Api::Commented => ReviewState::Commented,
        Api::Dismissed => ReviewState::Dismissed,
        Api::Pending => ReviewState::Pending,
        _ => ReviewState::Other,
    }
}
