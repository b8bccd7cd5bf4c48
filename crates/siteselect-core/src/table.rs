//! Immutable store of candidate records.

use std::path::Path;

use crate::candidate::Candidate;
use crate::error::{Result, SelectionError};

/// Validated, id-ordered table of candidates.
///
/// Invariants enforced by [`ScoreTable::new`]:
/// - ids are exactly `0..n` with no gaps or duplicates,
/// - probability, cost and risk are finite and within `[0, 1]`,
/// - area is finite and non-negative.
///
/// An empty table is representable; the objective builder rejects it.
///
/// # Examples
///
/// ```
/// use siteselect_core::{Candidate, ScoreTable};
///
/// let table = ScoreTable::new(vec![
///     Candidate::new(1, 0.2, 0.05, 0.05),
///     Candidate::new(0, 0.9, 0.1, 0.1),
/// ]).unwrap();
///
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.net_benefits(), vec![70, 10]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreTable {
    candidates: Vec<Candidate>,
}

impl ScoreTable {
    /// Validates and stores the candidates, sorted by id.
    pub fn new(mut candidates: Vec<Candidate>) -> Result<Self> {
        candidates.sort_by_key(|c| c.id);

        for (position, candidate) in candidates.iter().enumerate() {
            if candidate.id != position {
                let reason = if position > 0 && candidates[position - 1].id == candidate.id {
                    "duplicate id".to_string()
                } else {
                    format!("ids must be dense, expected {}", position)
                };
                return Err(SelectionError::InvalidCandidate {
                    id: candidate.id,
                    reason,
                });
            }
            validate_scores(candidate)?;
        }

        Ok(Self { candidates })
    }

    /// Parses a JSON array of candidate records.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let candidates: Vec<Candidate> = serde_json::from_str(s)?;
        Self::new(candidates)
    }

    /// Loads a JSON array of candidate records from a file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Returns the candidate with the given id.
    pub fn get(&self, id: usize) -> Option<&Candidate> {
        self.candidates.get(id)
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.iter()
    }

    /// Scaled net benefit per candidate, index-aligned with ids.
    pub fn net_benefits(&self) -> Vec<i64> {
        self.candidates.iter().map(Candidate::net_benefit).collect()
    }
}

fn validate_scores(candidate: &Candidate) -> Result<()> {
    let scores = [
        ("probability", candidate.probability),
        ("cost", candidate.cost),
        ("risk", candidate.risk),
    ];
    for (name, value) in scores {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(SelectionError::InvalidCandidate {
                id: candidate.id,
                reason: format!("{} must be within [0, 1], got {}", name, value),
            });
        }
    }
    if !candidate.area.is_finite() || candidate.area < 0.0 {
        return Err(SelectionError::InvalidCandidate {
            id: candidate.id,
            reason: format!("area must be non-negative, got {}", candidate.area),
        });
    }
    Ok(())
}
