use std::cmp::Ordering;

use ndarray::Array2;

use crate::types::Coord;

/// How the strongest coefficients are picked out of the spectrum.
///
/// Both strategies rank by the same total order (descending magnitude, then
/// ascending row-major index), so they always return the same selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ranking {
    /// Sort every coefficient, then take the prefix.
    Sort,
    /// Partition around the k-th coefficient, then sort only the prefix.
    #[default]
    Select,
}

/// Clamp a requested budget into `0..=total`.
pub fn clamp_budget(k: i64, total: usize) -> usize {
    if k <= 0 {
        0
    } else {
        usize::try_from(k).map_or(total, |k| k.min(total))
    }
}

#[inline]
fn rank_cmp(values: &[f64], a: usize, b: usize) -> Ordering {
    values[b].total_cmp(&values[a]).then_with(|| a.cmp(&b))
}

/// Coordinates of the `k` largest entries of `magnitude`, strongest first.
pub fn top_k(magnitude: &Array2<f64>, k: usize, ranking: Ranking) -> Vec<Coord> {
    let cols = magnitude.ncols();
    let values: Vec<f64> = magnitude.iter().copied().collect();
    let k = k.min(values.len());

    if k == 0 {
        return Vec::new();
    }

    let mut indices: Vec<usize> = (0..values.len()).collect();
    let cmp = |a: &usize, b: &usize| rank_cmp(&values, *a, *b);

    match ranking {
        Ranking::Sort => {
            indices.sort_unstable_by(cmp);
            indices.truncate(k);
        }
        Ranking::Select => {
            if k < indices.len() {
                indices.select_nth_unstable_by(k - 1, cmp);
                indices.truncate(k);
            }
            indices.sort_unstable_by(cmp);
        }
    }

    indices
        .into_iter()
        .map(|i| Coord::from_flat(i, cols))
        .collect()
}
