//! Picks the most likely dataset kind for a group of unlabeled arrays.

use ordered_float::OrderedFloat;
use smallvec::SmallVec;
use tracing::debug;

use crate::core::array::{IntoPlotArrays, PlotArray};
use crate::core::dataset::Dataset;
use crate::core::kind::{CATALOGUE, DatasetKind};
use crate::error::{PlotError, PlotResult};

/// A kind whose validation passed, with its likelihood score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedKind {
    pub kind: DatasetKind,
    pub score: f64,
}

pub type Ranking = SmallVec<[RankedKind; 6]>;

/// Every valid kind for `arrays`, ascending by score.
///
/// Candidates with equal score keep catalogue order, so the last entry is
/// the best match with ties going to the kind declared latest.
#[must_use]
pub fn rank_kinds(arrays: &[PlotArray]) -> Ranking {
    rank_candidates(
        CATALOGUE
            .iter()
            .filter(|descriptor| descriptor.kind.is_valid(arrays))
            .map(|descriptor| RankedKind {
                kind: descriptor.kind,
                score: descriptor.kind.likelihood(arrays),
            }),
    )
}

/// Stable ascending sort by score; equal scores keep their input order.
fn rank_candidates(candidates: impl IntoIterator<Item = RankedKind>) -> Ranking {
    let mut ranking: Ranking = candidates.into_iter().collect();
    ranking.sort_by_key(|candidate| OrderedFloat(candidate.score));
    ranking
}

#[must_use]
pub fn pick_most_likely(ranking: &[RankedKind]) -> Option<DatasetKind> {
    ranking.last().map(|candidate| candidate.kind)
}

/// Wraps `arrays` into a [`Dataset`] of the most likely kind.
///
/// Fails with [`PlotError::InvalidInputShape`] when no arrays are given or
/// no kind accepts them.
pub fn classify(arrays: impl IntoPlotArrays, names: Option<Vec<String>>) -> PlotResult<Dataset> {
    let arrays = arrays.into_plot_arrays()?;
    if arrays.is_empty() {
        return Err(PlotError::InvalidInputShape(
            "no arrays to classify".to_owned(),
        ));
    }

    let ranking = rank_kinds(&arrays);
    let Some(kind) = pick_most_likely(&ranking) else {
        let shapes: Vec<&[usize]> = arrays.iter().map(PlotArray::shape).collect();
        return Err(PlotError::InvalidInputShape(format!(
            "no dataset kind accepts arrays shaped {shapes:?}"
        )));
    };

    debug!(
        %kind,
        candidates = ranking.len(),
        arrays = arrays.len(),
        "classified dataset"
    );
    Dataset::new(kind, arrays, names)
}
