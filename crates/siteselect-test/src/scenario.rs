//! Small candidate tables whose answers can be checked by hand.

use siteselect_core::{Candidate, ScoreTable};

/// Three sites with scaled net benefits `[70, 10, -20]`.
///
/// With `K = 2` the best pick is `{0, 1}` with net benefit 80.
pub fn scenario_candidates() -> Vec<Candidate> {
    vec![
        Candidate::new(0, 0.9, 0.1, 0.1).with_area(12.0),
        Candidate::new(1, 0.2, 0.05, 0.05).with_area(3.5),
        Candidate::new(2, 0.5, 0.4, 0.3).with_area(8.0),
    ]
}

pub fn scenario_table() -> ScoreTable {
    build(scenario_candidates())
}

/// Four sites with scaled net benefits `[-40, -5, -10, -100]`.
pub fn all_negative_table() -> ScoreTable {
    build(vec![
        Candidate::new(0, 0.1, 0.3, 0.2),
        Candidate::new(1, 0.2, 0.1, 0.15),
        Candidate::new(2, 0.3, 0.2, 0.2),
        Candidate::new(3, 0.0, 0.5, 0.5),
    ])
}

/// One site with scaled net benefit `-50`.
pub fn single_negative_table() -> ScoreTable {
    build(vec![Candidate::new(0, 0.1, 0.3, 0.3)])
}

/// Six sites with scaled net benefits `[35, -20, 60, 0, 15, -45]`.
pub fn mixed_table() -> ScoreTable {
    build(vec![
        Candidate::new(0, 0.6, 0.1, 0.15).with_area(4.0),
        Candidate::new(1, 0.2, 0.25, 0.15).with_area(9.0),
        Candidate::new(2, 0.9, 0.2, 0.1).with_area(2.5),
        Candidate::new(3, 0.5, 0.25, 0.25).with_area(6.0),
        Candidate::new(4, 0.45, 0.1, 0.2).with_area(1.0),
        Candidate::new(5, 0.1, 0.3, 0.25).with_area(7.5),
    ])
}

fn build(candidates: Vec<Candidate>) -> ScoreTable {
    match ScoreTable::new(candidates) {
        Ok(table) => table,
        Err(e) => panic!("fixture table is invalid: {e}"),
    }
}
