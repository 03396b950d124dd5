use std::f64::consts::PI;

use ndarray::{Array2, Zip};
use num_complex::Complex64;
use rustfft::{FftDirection, FftPlanner};

use crate::{
    rank::{clamp_budget, top_k, Ranking},
    types::{keep_mask, Reconstruction},
    ReconstructError,
};

/// Centered frequency-domain view of an image.
///
/// Holds everything that does not depend on the coefficient budget, so a
/// driver that only varies `k` can analyze once and reconstruct many times.
#[derive(Debug, Clone)]
pub struct Spectrum {
    centered: Array2<Complex64>,
    magnitude: Array2<f64>,
    phase: Array2<f64>,
}

impl Spectrum {
    pub fn analyze(image: &Array2<f64>) -> Result<Spectrum, ReconstructError> {
        let (rows, cols) = image.dim();
        if rows == 0 || cols == 0 {
            return Err(ReconstructError::InvalidDimension { rows, cols });
        }

        let mut data = image.mapv(|v| Complex64::new(v, 0.0));
        fft2(&mut data);
        let centered = fftshift(&data);

        let magnitude = centered.mapv(|c| c.norm());
        let phase = centered.mapv(|c| normalize_phase(c.arg()));

        log::debug!("analyzed {rows}x{cols} image");

        Ok(Spectrum {
            centered,
            magnitude,
            phase,
        })
    }

    pub fn reconstruct(&self, k: i64) -> Reconstruction {
        self.reconstruct_with(k, Ranking::default())
    }

    pub fn reconstruct_with(&self, k: i64, ranking: Ranking) -> Reconstruction {
        let budget = clamp_budget(k, self.len());
        let selected = top_k(&self.magnitude, budget, ranking);
        let mask = keep_mask(self.dim(), &selected);

        let masked = Zip::from(&self.centered)
            .and(&mask)
            .map_collect(|&c, &keep| c * f64::from(keep));

        let mut data = ifftshift(&masked);
        ifft2(&mut data);

        let max_imaginary_residual = data.iter().map(|c| c.im.abs()).fold(0.0, f64::max);
        let image = data.mapv(|c| c.norm());

        log::debug!(
            "reconstructed with {budget}/{} coefficients (k = {k}, imaginary residual {max_imaginary_residual:e})",
            self.len()
        );

        Reconstruction {
            image,
            magnitude: self.magnitude.clone(),
            phase: self.phase.clone(),
            selected,
            max_imaginary_residual,
        }
    }

    pub fn dim(&self) -> (usize, usize) {
        self.centered.dim()
    }

    /// Number of coefficients, `rows * cols`.
    pub fn len(&self) -> usize {
        self.centered.len()
    }

    // analyze rejects empty images
    pub fn is_empty(&self) -> bool {
        self.centered.is_empty()
    }

    pub fn centered(&self) -> &Array2<Complex64> {
        &self.centered
    }

    pub fn magnitude(&self) -> &Array2<f64> {
        &self.magnitude
    }

    pub fn phase(&self) -> &Array2<f64> {
        &self.phase
    }
}

// atan2 yields exactly -pi for a negative real part with a -0.0 imaginary part
#[inline]
fn normalize_phase(angle: f64) -> f64 {
    if angle <= -PI {
        PI
    } else {
        angle
    }
}

/// In-place forward 2D transform (unnormalized).
pub fn fft2(data: &mut Array2<Complex64>) {
    transform(data, FftDirection::Forward);
}

/// In-place inverse 2D transform, scaled by `1 / (rows * cols)`.
pub fn ifft2(data: &mut Array2<Complex64>) {
    transform(data, FftDirection::Inverse);
    let scale = 1.0 / data.len() as f64;
    data.mapv_inplace(|c| c * scale);
}

fn transform(data: &mut Array2<Complex64>, direction: FftDirection) {
    let (rows, cols) = data.dim();
    let mut planner = FftPlanner::new();
    let row_fft = planner.plan_fft(cols, direction);
    let col_fft = planner.plan_fft(rows, direction);

    let mut buffer: Vec<Complex64> = Vec::with_capacity(rows.max(cols));

    for mut row in data.rows_mut() {
        buffer.clear();
        buffer.extend(row.iter().copied());
        row_fft.process(&mut buffer);
        row.iter_mut().zip(&buffer).for_each(|(dst, src)| *dst = *src);
    }

    for mut col in data.columns_mut() {
        buffer.clear();
        buffer.extend(col.iter().copied());
        col_fft.process(&mut buffer);
        col.iter_mut().zip(&buffer).for_each(|(dst, src)| *dst = *src);
    }
}

/// Move the zero-frequency term from `[0, 0]` to `[rows / 2, cols / 2]`.
pub fn fftshift<T: Clone>(data: &Array2<T>) -> Array2<T> {
    let (rows, cols) = data.dim();
    roll(data, rows / 2, cols / 2)
}

/// Inverse of [`fftshift`], also for odd sizes.
pub fn ifftshift<T: Clone>(data: &Array2<T>) -> Array2<T> {
    let (rows, cols) = data.dim();
    roll(data, rows - rows / 2, cols - cols / 2)
}

// out[(y + dy) % rows, (x + dx) % cols] = data[y, x]
fn roll<T: Clone>(data: &Array2<T>, dy: usize, dx: usize) -> Array2<T> {
    let (rows, cols) = data.dim();
    Array2::from_shape_fn((rows, cols), |(y, x)| {
        data[[(y + rows - dy) % rows, (x + cols - dx) % cols]].clone()
    })
}
