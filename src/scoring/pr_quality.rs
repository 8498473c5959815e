//! Pull request hygiene from activity metadata.
//!
//! Every factor is neutral when the snapshot carries no pull requests.

use super::{share_score, ScoringContext, MAX_SCORE, NEUTRAL_SCORE};
use crate::core::{PullRequestInfo, SubFactor};

const MIN_TITLE_CHARS: usize = 10;
const MAX_TITLE_CHARS: usize = 100;
const MIN_DESCRIPTION_CHARS: usize = 30;
const SMALL_PR_CHANGES: u64 = 400;
const MEDIUM_PR_CHANGES: u64 = 1000;

pub fn analyze(ctx: &ScoringContext<'_>) -> Vec<SubFactor> {
    let prs = ctx.pull_requests();
    vec![
        SubFactor::new("titles", titles(prs)),
        SubFactor::new("descriptions", descriptions(prs)),
        SubFactor::new("size", size(prs)),
        SubFactor::new("reviews", reviews(prs)),
    ]
}

fn titles(prs: &[PullRequestInfo]) -> f64 {
    let good = prs
        .iter()
        .filter(|pr| {
            let len = pr.title.trim().chars().count();
            (MIN_TITLE_CHARS..=MAX_TITLE_CHARS).contains(&len)
        })
        .count();
    share_score(good, prs.len(), NEUTRAL_SCORE)
}

fn descriptions(prs: &[PullRequestInfo]) -> f64 {
    let described = prs
        .iter()
        .filter(|pr| {
            pr.body
                .as_deref()
                .is_some_and(|b| b.trim().chars().count() >= MIN_DESCRIPTION_CHARS)
        })
        .count();
    share_score(described, prs.len(), NEUTRAL_SCORE)
}

fn size_score(pr: &PullRequestInfo) -> f64 {
    match pr.total_changes() {
        n if n <= SMALL_PR_CHANGES => MAX_SCORE,
        n if n <= MEDIUM_PR_CHANGES => MAX_SCORE / 2.0,
        _ => 0.0,
    }
}

fn size(prs: &[PullRequestInfo]) -> f64 {
    if prs.is_empty() {
        return NEUTRAL_SCORE;
    }
    prs.iter().map(size_score).sum::<f64>() / prs.len() as f64
}

fn reviews(prs: &[PullRequestInfo]) -> f64 {
    let reviewed = prs
        .iter()
        .filter(|pr| pr.review_comments + pr.comments > 0)
        .count();
    share_score(reviewed, prs.len(), NEUTRAL_SCORE)
}
