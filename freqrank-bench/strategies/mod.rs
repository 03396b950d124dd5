use freqrank::{Ranking, Reconstruction, Spectrum};
use strum_macros::{Display, EnumIter};

#[derive(Debug, Display, EnumIter, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StrategyType {
    Sort,
    Select,
}

impl StrategyType {
    pub fn ranking(&self) -> Ranking {
        match self {
            StrategyType::Sort => Ranking::Sort,
            StrategyType::Select => Ranking::Select,
        }
    }

    pub fn reconstruct(&self, spectrum: &Spectrum, k: i64) -> Reconstruction {
        spectrum.reconstruct_with(k, self.ranking())
    }
}

/// Budgets swept for an image with `total` coefficients: a few absolute
/// counts, then fixed fractions of the spectrum.
pub fn budgets(total: usize) -> Vec<i64> {
    let total = total as i64;
    let mut budgets = vec![1, 10, 100, total / 100, total / 10, total / 2, total];
    budgets.retain(|&k| k > 0 && k <= total);
    budgets.sort_unstable();
    budgets.dedup();
    budgets
}
