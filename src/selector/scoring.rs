//! Deterministic keyword scoring for the algorithmic selection strategy.
//!
//! Scoring is a policy detail, not a fixed formula: the [`Scorer`] trait
//! lets callers swap the default token-overlap implementation for their
//! own without touching the selection machinery. Whatever the policy, it
//! must stay deterministic: identical inputs must produce identical
//! scores, because tie-breaking and the tiered escalation decision both
//! hang off them.

use crate::registry::NodeInfo;

/// Minimum token length kept by [`tokenize`]; shorter runs are noise.
const MIN_TOKEN_LEN: usize = 2;

/// Split free text into lowercase alphanumeric tokens.
///
/// # Examples
///
/// ```rust
/// use rowloom::selector::tokenize;
///
/// assert_eq!(
///     tokenize("My card was charged twice!"),
///     vec!["my", "card", "was", "charged", "twice"]
/// );
/// ```
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|run| run.len() >= MIN_TOKEN_LEN)
        .map(str::to_lowercase)
        .collect()
}

/// Scores every candidate against an input text.
///
/// Implementations return one score per candidate, aligned with the input
/// slice, each in `[0, 1]`. Higher is better.
pub trait Scorer: Send + Sync {
    /// Score all candidates for the given input text.
    fn score(&self, input_text: &str, candidates: &[NodeInfo]) -> Vec<f64>;
}

/// Default scorer: normalized token intersection weighted by inverse
/// candidate-set frequency.
///
/// For each candidate, the score is the idf mass of the input tokens that
/// also appear in the candidate's document (name + keywords +
/// description), divided by the total idf mass of the input tokens.
/// Tokens shared by every candidate therefore contribute little, while a
/// token unique to one candidate dominates.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokenOverlapScorer;

impl Scorer for TokenOverlapScorer {
    fn score(&self, input_text: &str, candidates: &[NodeInfo]) -> Vec<f64> {
        let input_tokens = tokenize(input_text);
        if input_tokens.is_empty() || candidates.is_empty() {
            return vec![0.0; candidates.len()];
        }

        let documents: Vec<Vec<String>> = candidates.iter().map(candidate_document).collect();

        let candidate_count = candidates.len() as f64;
        let idf = |token: &str| -> f64 {
            let df = documents
                .iter()
                .filter(|doc| doc.iter().any(|t| t == token))
                .count() as f64;
            if df == 0.0 {
                // Token appears in no candidate; carries no signal either way.
                0.0
            } else {
                (1.0 + candidate_count / df).ln()
            }
        };

        let total_mass: f64 = input_tokens.iter().map(|t| idf(t)).sum();
        if total_mass <= 0.0 {
            return vec![0.0; candidates.len()];
        }

        documents
            .iter()
            .map(|doc| {
                let overlap_mass: f64 = input_tokens
                    .iter()
                    .filter(|t| doc.iter().any(|d| d == *t))
                    .map(|t| idf(t))
                    .sum();
                overlap_mass / total_mass
            })
            .collect()
    }
}

/// Tokens describing one candidate: its name, keywords, and description.
fn candidate_document(info: &NodeInfo) -> Vec<String> {
    let mut doc = tokenize(&info.name);
    for keyword in &info.keywords {
        doc.extend(tokenize(keyword));
    }
    doc.extend(tokenize(&info.description));
    doc
}

/// Outcome of ranking all candidates with a [`Scorer`].
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Ranked {
    /// Index of the best candidate in registry order.
    pub best: usize,
    /// The best candidate's score.
    pub score: f64,
    /// Confidence derived from score separation between top-1 and top-2.
    pub confidence: f64,
}

/// Rank candidates and derive a confidence from score separation.
///
/// A larger gap between the top two scores means higher confidence; an
/// exact tie means confidence 0, with the earlier candidate in registry
/// iteration order winning for determinism. With a single candidate there
/// is no separation to measure, so its own score stands in.
pub(crate) fn rank(scorer: &dyn Scorer, input_text: &str, candidates: &[NodeInfo]) -> Option<Ranked> {
    let scores = scorer.score(input_text, candidates);
    debug_assert_eq!(scores.len(), candidates.len());

    let best = scores
        .iter()
        .enumerate()
        // Strict comparison keeps the first candidate on ties.
        .fold(None, |winner: Option<(usize, f64)>, (i, &s)| match winner {
            Some((_, best_score)) if s <= best_score => winner,
            _ => Some((i, s)),
        })?;

    let runner_up = scores
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != best.0)
        .map(|(_, s)| *s)
        .fold(None, |max: Option<f64>, s| match max {
            Some(m) if s <= m => max,
            _ => Some(s),
        });

    let confidence = match runner_up {
        None => best.1,
        Some(_) if best.1 <= 0.0 => 0.0,
        Some(second) if second >= best.1 => 0.0,
        Some(second) => (best.1 - second) / best.1,
    };

    Some(Ranked {
        best: best.0,
        score: best.1,
        confidence,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(name: &str, description: &str) -> NodeInfo {
        NodeInfo {
            name: name.to_string(),
            agent_type: "specialist".to_string(),
            description: description.to_string(),
            keywords: Vec::new(),
        }
    }

    #[test]
    fn tokenize_drops_short_runs_and_punctuation() {
        assert_eq!(tokenize("a I.. go-go 42"), vec!["go", "go", "42"]);
    }

    #[test]
    fn overlapping_candidate_scores_higher() {
        let candidates = vec![
            info("billing", "refunds invoices charged card"),
            info("shipping", "parcel tracking delivery"),
        ];
        let scores = TokenOverlapScorer.score("my card was charged twice", &candidates);
        assert!(scores[0] > scores[1]);
    }

    #[test]
    fn exact_tie_yields_zero_confidence_and_first_candidate() {
        let candidates = vec![info("alpha", "widget"), info("beta", "widget")];
        let ranked = rank(&TokenOverlapScorer, "widget", &candidates).unwrap();
        assert_eq!(ranked.best, 0);
        assert_eq!(ranked.confidence, 0.0);
    }

    #[test]
    fn single_candidate_confidence_is_its_score() {
        let candidates = vec![info("billing", "charged card")];
        let ranked = rank(&TokenOverlapScorer, "charged card", &candidates).unwrap();
        assert!(ranked.confidence > 0.0);
        assert_eq!(ranked.confidence, ranked.score);
    }

    #[test]
    fn no_token_overlap_scores_zero() {
        let candidates = vec![info("billing", "refunds"), info("shipping", "parcels")];
        let scores = TokenOverlapScorer.score("completely unrelated words", &candidates);
        assert_eq!(scores, vec![0.0, 0.0]);
    }
}
