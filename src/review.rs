use std::collections::HashMap;

use crate::types::{Review, ReviewState};

/// Number of reviewers whose most recent review is in each state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateCounts(HashMap<ReviewState, usize>);

impl StateCounts {
    pub fn get(&self, state: ReviewState) -> usize {
        self.0.get(&state).copied().unwrap_or(0)
    }
}

/// Reduces a reviewer's history to their most recent review state.
///
/// Reviews must be ordered oldest first, as GitHub returns them. The scan
/// runs newest to oldest and keeps the first state seen per reviewer, so an
/// approval submitted after a change request replaces it.
pub fn latest_state_per_reviewer(reviews: &[Review]) -> HashMap<&str, ReviewState> {
    let mut latest = HashMap::new();

    for review in reviews.iter().rev() {
        latest
            .entry(review.reviewer_id.as_str())
            .or_insert(review.state);
    }

    latest
}

pub fn count_by_state(latest: &HashMap<&str, ReviewState>) -> StateCounts {
    let mut counts = HashMap::new();

    for state in latest.values() {
        *counts.entry(*state).or_insert(0) += 1;
    }

    StateCounts(counts)
}
