// src/matching/matcher.rs
//! Rank-product matching: picks the best counterpart for one unit among many
//! candidates.
//!
//! Every configured scorer ranks all candidates independently; the candidate
//! with the smallest product of ranks wins. Multiplying (rather than summing)
//! rewards multiple low ranks: given ranks (1, 1, 4) and (2, 2, 1), the
//! product favors the first candidate (4 vs 9) while the sum would favor the
//! second (8 vs 7). One strong negative signal thus vetoes a match. This is a
//! heuristic and can pick wrong.

use std::cmp::Ordering;

use crate::error::{Result, SiftError};
use crate::frontend::ProgramUnit;

use super::scorer::{default_matching_names, matching_scorers, Scorer};

/// Matches a query unit against a candidate set using a fixed scorer list.
pub struct UnitMatcher {
    scorers: Vec<Box<dyn Scorer>>,
}

impl UnitMatcher {
    #[must_use]
    pub fn new(scorers: Vec<Box<dyn Scorer>>) -> Self {
        Self { scorers }
    }

    /// Matcher with the default scorer list.
    #[must_use]
    pub fn with_defaults() -> Self {
        // Default names always resolve.
        Self::new(matching_scorers(&default_matching_names()).unwrap_or_default())
    }

    /// Builds a matcher from configured scorer names.
    ///
    /// # Errors
    /// Rejects duplicate and unknown names.
    pub fn from_names(names: &[String]) -> Result<Self> {
        Ok(Self::new(matching_scorers(names)?))
    }

    /// Returns the candidate that best matches `query`.
    ///
    /// Ties on the rank product resolve to the earliest candidate in
    /// enumeration order.
    ///
    /// # Errors
    /// Returns `SiftError::EmptyCandidates` when `candidates` is empty.
    pub fn find_match<'a>(
        &self,
        query: &ProgramUnit,
        candidates: &'a [ProgramUnit],
    ) -> Result<&'a ProgramUnit> {
        let table = self.rank_table(query, candidates)?;

        let mut best_idx = 0;
        let mut best_product = u128::MAX;
        for idx in 0..candidates.len() {
            let product: u128 = table.iter().map(|column| column[idx] as u128).product();
            if product < best_product {
                best_product = product;
                best_idx = idx;
            }
        }

        Ok(&candidates[best_idx])
    }

    /// Computes the per-scorer rank columns for one matching query.
    ///
    /// The result has one column per scorer; `column[i]` is candidate `i`'s
    /// rank under that scorer, 1 = most similar. Each column is a permutation
    /// of `1..=N`. Equal scores keep candidate enumeration order, so ranking
    /// is deterministic and never depends on score-dependent tie behavior.
    ///
    /// # Errors
    /// Returns `SiftError::EmptyCandidates` when `candidates` is empty.
    pub fn rank_table(
        &self,
        query: &ProgramUnit,
        candidates: &[ProgramUnit],
    ) -> Result<Vec<Vec<usize>>> {
        if candidates.is_empty() {
            return Err(SiftError::EmptyCandidates);
        }

        let mut table = Vec::with_capacity(self.scorers.len());
        for scorer in &self.scorers {
            let scores: Vec<f64> = candidates.iter().map(|c| scorer.compute(query, c)).collect();
            table.push(ranks_ascending(&scores));
        }

        Ok(table)
    }
}

/// Assigns ranks 1..=N by ascending score; stable sort keeps enumeration
/// order for equal scores.
fn ranks_ascending(scores: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&i, &j| scores[i].partial_cmp(&scores[j]).unwrap_or(Ordering::Equal));

    let mut ranks = vec![0; scores.len()];
    for (position, &idx) in order.iter().enumerate() {
        ranks[idx] = position + 1;
    }
    ranks
}
