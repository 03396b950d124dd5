use ndarray::Array2;
use thiserror::Error;

pub mod rank;
pub mod spectrum;
pub mod types;

pub use rank::Ranking;
pub use spectrum::Spectrum;
pub use types::{Coord, Reconstruction};

/// Reconstruct `image` from its `k` strongest frequency coefficients.
///
/// `k` is clamped to `0..=rows * cols`, so any slider position is accepted.
/// Only an image with a zero-length dimension is rejected.
pub fn reconstruct(image: &Array2<f64>, k: i64) -> Result<Reconstruction, ReconstructError> {
    Ok(Spectrum::analyze(image)?.reconstruct(k))
}

/// Same as [`reconstruct`], with an explicit ranking strategy.
pub fn reconstruct_with(
    image: &Array2<f64>,
    k: i64,
    ranking: Ranking,
) -> Result<Reconstruction, ReconstructError> {
    Ok(Spectrum::analyze(image)?.reconstruct_with(k, ranking))
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconstructError {
    #[error("Invalid image dimensions: {rows}x{cols}")]
    InvalidDimension { rows: usize, cols: usize },
}
