// src/candidates/mod.rs

pub mod counts;
pub mod normalize;
pub mod select;

use rand::Rng;
use serde::Serialize;

use crate::sheet::RawRow;

pub use counts::{build_counts, CountsTable, Facet};
pub use normalize::normalize_tech;
pub use select::{
    filter_candidates, select_candidates, CandidateRecord, Filters, Selection, SAMPLE_SIZE,
};

/// Body of a successful candidates query.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidatesResponse {
    pub profiles: Vec<CandidateRecord>,
    pub total_matches: usize,
    pub counts: CountsTable,
}

/// Counts over the whole pool plus a filtered random sample.
pub fn query<R: Rng + ?Sized>(
    rows: &[RawRow],
    filters: &Filters,
    rng: &mut R,
) -> CandidatesResponse {
    let counts = build_counts(rows);
    let Selection {
        profiles,
        total_matches,
    } = select_candidates(rows, filters, rng);
    CandidatesResponse {
        profiles,
        total_matches,
        counts,
    }
}
