use crate::{
    review::{count_by_state, latest_state_per_reviewer},
    types::{Pull, Review, ReviewState, Rules},
};

/// Approval and mergeability of one pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub approved: bool,
    pub mergeable: bool,
}

/// Decides whether a pull request is approved and mergeable.
///
/// A pull request is approved when no reviewer's latest review requests
/// changes and at least `rules.min_approvals` reviewers' latest reviews
/// approve it. Mergeability is reported only when GitHub has confirmed it;
/// an uncomputed value counts as not mergeable.
pub fn evaluate(reviews: &[Review], pull: &Pull, rules: &Rules) -> Verdict {
    let counts = count_by_state(&latest_state_per_reviewer(reviews));

    let approved = counts.get(ReviewState::ChangesRequested) == 0
        && counts.get(ReviewState::Approved) >= rules.min_approvals as usize;

    Verdict {
        approved,
        mergeable: pull.mergeable.unwrap_or(false),
    }
}
