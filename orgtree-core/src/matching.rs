//! Token-overlap similarity between person names.
//!
//! Scoring counts the tokens of the query that appear anywhere in the
//! candidate and divides by the larger token count. It is not symmetric:
//! `"john john"` scores `1.0` against `"john smith"` but the reverse scores
//! `0.5`. Resolution relies on the observed behaviour, so it is kept.

use crate::{name::NormalizedName, record::EmployeeRecord};

/// Scores must exceed this value for a fuzzy match to be accepted.
pub const MATCH_THRESHOLD: f64 = 0.7;

/// Scores how closely `query` resembles `candidate`, in `[0, 1]`.
///
/// # Examples
/// ```
/// use orgtree_core::similarity;
///
/// assert_eq!(similarity("Smith, John", "john smith"), 1.0);
/// assert_eq!(similarity("John Smith", "John Smyth"), 0.5);
/// assert_eq!(similarity("", "John"), 0.0);
/// ```
#[must_use]
pub fn similarity(query: &str, candidate: &str) -> f64 {
    normalized_similarity(&NormalizedName::new(query), &NormalizedName::new(candidate))
}

pub(crate) fn normalized_similarity(query: &NormalizedName, candidate: &NormalizedName) -> f64 {
    if query == candidate {
        return 1.0;
    }
    let candidate_tokens: Vec<&str> = candidate.tokens().collect();
    let (query_len, matched) = query.tokens().fold((0_usize, 0_usize), |(len, hits), token| {
        let hit = usize::from(candidate_tokens.contains(&token));
        (len + 1, hits + hit)
    });
    let denominator = query_len.max(candidate_tokens.len());
    if denominator == 0 {
        return 0.0;
    }
    ratio(matched, denominator)
}

#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "token counts are tiny and the score is a ratio by definition"
)]
fn ratio(numerator: usize, denominator: usize) -> f64 {
    numerator as f64 / denominator as f64
}

/// Finds the roster member whose name best matches `name`.
///
/// Only scores strictly above [`MATCH_THRESHOLD`] qualify, and a later
/// candidate replaces the current best only with a strictly higher score, so
/// the first of several equal scores wins.
///
/// # Examples
/// ```
/// use orgtree_core::{find_best_match, EmployeeRecord};
///
/// let roster = vec![
///     EmployeeRecord::new("Ann Lee"),
///     EmployeeRecord::new("Mary Ann Lee"),
/// ];
/// let best = find_best_match("Lee, Mary-Ann", &roster);
/// assert!(best.is_none());
/// let best = find_best_match("Mary Ann Lee Smith", &roster).map(|r| r.name.as_str());
/// assert_eq!(best, Some("Mary Ann Lee"));
/// ```
#[must_use]
pub fn find_best_match<'a>(name: &str, roster: &'a [EmployeeRecord]) -> Option<&'a EmployeeRecord> {
    best_match_index(&NormalizedName::new(name), roster).and_then(|index| roster.get(index))
}

pub(crate) fn best_match_index(query: &NormalizedName, roster: &[EmployeeRecord]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, record) in roster.iter().enumerate() {
        let score = normalized_similarity(query, &record.normalized_name());
        let floor = best.map_or(MATCH_THRESHOLD, |(_, top)| top);
        if score > floor {
            best = Some((index, score));
        }
    }
    best.map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("John Smith", "John Smith", 1.0)]
    #[case("Smith, John", "JOHN SMITH", 1.0)]
    #[case("John Smith", "John Smyth", 0.5)]
    #[case("John", "John Smith", 0.5)]
    #[case("Mary Ann Lee", "Ann Lee", 2.0 / 3.0)]
    #[case("Bob", "Alice", 0.0)]
    #[case("", "", 1.0)]
    fn scores(#[case] left: &str, #[case] right: &str, #[case] expected: f64) {
        let score = similarity(left, right);
        assert!((score - expected).abs() < 1e-9, "{left} vs {right}: {score}");
    }

    #[rstest]
    fn scoring_is_asymmetric_for_repeated_tokens() {
        assert!((similarity("john john", "john smith") - 1.0).abs() < 1e-9);
        assert!((similarity("john smith", "john john") - 0.5).abs() < 1e-9);
    }

    #[rstest]
    fn identical_names_score_one() {
        assert!((similarity("Carol", "carol") - 1.0).abs() < f64::EPSILON);
    }

    #[rstest]
    fn threshold_is_strict() {
        // 3 of 4 tokens = 0.75 clears the bar, 2 of 3 = 0.67 does not.
        let roster = vec![EmployeeRecord::new("Anna Maria de Souza")];
        assert!(find_best_match("Anna Maria Souza", &roster).is_some());
        let roster = vec![EmployeeRecord::new("Anna Maria Souza")];
        assert!(find_best_match("Anna Souza", &roster).is_none());
    }

    #[rstest]
    fn first_of_equal_scores_wins() {
        let roster = vec![
            EmployeeRecord::new("Pat Lee Wong").with_employee_id("1"),
            EmployeeRecord::new("Pat Lee Wong").with_employee_id("2"),
        ];
        let best = find_best_match("Pat Lee Wong Jr", &roster);
        assert_eq!(best.map(|r| r.employee_id.as_str()), Some("1"));
    }

    #[rstest]
    fn higher_score_replaces_earlier_candidate() {
        let roster = vec![
            EmployeeRecord::new("Kim Park Lee Choi"),
            EmployeeRecord::new("Kim Park Lee"),
        ];
        let best = find_best_match("Kim Park Lee", &roster);
        assert_eq!(best.map(|r| r.name.as_str()), Some("Kim Park Lee"));
    }

    #[rstest]
    fn empty_roster_has_no_match() {
        assert!(find_best_match("Anyone", &[]).is_none());
    }
}
