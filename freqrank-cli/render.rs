use std::{f64::consts::PI, path::Path};

use anyhow::{Context, Result};
use freqrank::{Coord, Reconstruction};
use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use ndarray::Array2;
use palette::{LinSrgb, Mix, Srgb};

/// Write the six panels of a reconstruction into `dir`.
pub fn write_panels(dir: &Path, original: &Array2<f64>, reconstruction: &Reconstruction) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;

    let (magnitude_selected, phase_selected) = highlight(
        &reconstruction.magnitude,
        &reconstruction.phase,
        &reconstruction.selected,
    );

    save(dir, "original.png", to_gray(original))?;
    save(dir, "magnitude.png", to_gray(&log_scale(&reconstruction.magnitude)))?;
    save(dir, "phase.png", to_gray(&reconstruction.phase))?;
    save(dir, "reconstructed.png", to_gray(&reconstruction.image))?;
    save(dir, "magnitude_selected.png", to_hot(&log_scale(&magnitude_selected)))?;
    save(dir, "phase_selected.png", to_hot(&phase_selected))?;

    log::info!("wrote panels to {}", dir.display());
    Ok(())
}

fn save(dir: &Path, name: &str, image: impl Into<DynamicImage>) -> Result<()> {
    let path = dir.join(name);
    let image: DynamicImage = image.into();
    image
        .save(&path)
        .with_context(|| format!("failed to write {}", path.display()))
}

/// `ln(1 + m)`, the usual way to make a spectrum visible.
pub fn log_scale(magnitude: &Array2<f64>) -> Array2<f64> {
    magnitude.mapv(|m| m.ln_1p())
}

/// Copies of magnitude and phase with the selected coefficients pushed to
/// the top of their range, so they stand out in a colormap.
pub fn highlight(
    magnitude: &Array2<f64>,
    phase: &Array2<f64>,
    selected: &[Coord],
) -> (Array2<f64>, Array2<f64>) {
    let max = magnitude.fold(f64::MIN, |acc, &m| acc.max(m));
    let mut magnitude = magnitude.clone();
    let mut phase = phase.clone();

    for coord in selected {
        magnitude[coord.index()] = max;
        phase[coord.index()] = PI;
    }

    (magnitude, phase)
}

// min-max normalization into 0..=1; a flat array maps to 0
fn normalized(values: &Array2<f64>) -> Array2<f64> {
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let range = max - min;

    if range > 0.0 && range.is_finite() {
        values.mapv(|v| (v - min) / range)
    } else {
        values.mapv(|_| 0.0)
    }
}

pub fn to_gray(values: &Array2<f64>) -> GrayImage {
    let scaled = normalized(values);
    let (rows, cols) = scaled.dim();

    GrayImage::from_fn(cols as u32, rows as u32, |x, y| {
        Luma([(scaled[[y as usize, x as usize]] * 255.0).round() as u8])
    })
}

pub fn to_hot(values: &Array2<f64>) -> RgbImage {
    let scaled = normalized(values);
    let (rows, cols) = scaled.dim();

    RgbImage::from_fn(cols as u32, rows as u32, |x, y| {
        hot(scaled[[y as usize, x as usize]] as f32)
    })
}

/// Black, red, yellow, white.
pub fn hot(t: f32) -> Rgb<u8> {
    const STOPS: [(f32, f32, f32); 4] = [
        (0.0, 0.0, 0.0),
        (1.0, 0.0, 0.0),
        (1.0, 1.0, 0.0),
        (1.0, 1.0, 1.0),
    ];

    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let position = t * (STOPS.len() - 1) as f32;
    let index = (position.floor() as usize).min(STOPS.len() - 2);

    let (r0, g0, b0) = STOPS[index];
    let (r1, g1, b1) = STOPS[index + 1];
    let color = LinSrgb::new(r0, g0, b0).mix(LinSrgb::new(r1, g1, b1), position - index as f32);

    let encoded = Srgb::<f32>::from_linear(color).into_format::<u8>();
    Rgb([encoded.red, encoded.green, encoded.blue])
}
