use std::path::Path;

use anyhow::{Context, Result};
use ndarray::Array2;

pub fn read_luma(path: &Path) -> Result<Array2<f64>> {
    let image = image::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?
        .to_luma8();
    let (width, height) = image.dimensions();
    let pixels = image.into_raw().into_iter().map(f64::from).collect();
    Ok(Array2::from_shape_vec((height as usize, width as usize), pixels)?)
}

pub fn rmse(a: &Array2<f64>, b: &Array2<f64>) -> f64 {
    let sum: f64 = a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum();
    (sum / a.len() as f64).sqrt()
}

pub fn to_dir(path: &str) -> String {
    path.split('/')
        .take(path.split('/').count() - 1)
        .collect::<Vec<&str>>()
        .join("/")
}
