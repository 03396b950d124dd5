use approx::assert_abs_diff_eq;
use freqrank::{reconstruct, reconstruct_with, Coord, Ranking, ReconstructError, Spectrum};
use ndarray::{array, Array2};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_image(rows: usize, cols: usize, seed: u64) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    Array2::from_shape_fn((rows, cols), |_| rng.gen_range(0.0..255.0))
}

#[test]
fn full_budget_is_lossless() {
    for (rows, cols) in [(1, 1), (4, 4), (5, 7), (8, 3), (16, 16)] {
        let image = random_image(rows, cols, (rows * 31 + cols) as u64);
        let out = reconstruct(&image, (rows * cols) as i64).unwrap();

        assert_eq!(out.budget(), rows * cols);
        for (a, b) in out.image.iter().zip(image.iter()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-8);
        }
        assert!(out.max_imaginary_residual < 1e-8);
    }
}

#[test]
fn retains_clamped_budget() {
    let image = random_image(6, 5, 7);
    let total = image.len() as i64;

    for k in -3..=total + 5 {
        let out = reconstruct(&image, k).unwrap();
        let expected = k.clamp(0, total) as usize;

        assert_eq!(out.selected.len(), expected);
        assert_eq!(
            out.keep_mask().iter().map(|&v| v as usize).sum::<usize>(),
            expected
        );
    }
}

#[test]
fn deterministic() {
    let image = random_image(9, 12, 42);
    for k in [0, 1, 17, 60, 108, 500] {
        let a = reconstruct(&image, k).unwrap();
        let b = reconstruct(&image, k).unwrap();

        assert_eq!(a.image, b.image);
        assert_eq!(a.magnitude, b.magnitude);
        assert_eq!(a.phase, b.phase);
        assert_eq!(a.selected, b.selected);
    }
}

#[test]
fn cached_spectrum_matches_one_shot() {
    let image = random_image(7, 9, 3);
    let spectrum = Spectrum::analyze(&image).unwrap();

    for k in [1, 10, 63] {
        let cached = spectrum.reconstruct(k);
        let direct = reconstruct(&image, k).unwrap();
        assert_eq!(cached.image, direct.image);
        assert_eq!(cached.selected, direct.selected);
    }
}

#[test]
fn strategies_select_the_same_coefficients() {
    let image = random_image(10, 10, 11);
    for k in [1, 5, 33, 99, 100] {
        let sort = reconstruct_with(&image, k, Ranking::Sort).unwrap();
        let select = reconstruct_with(&image, k, Ranking::Select).unwrap();
        assert_eq!(sort.selected, select.selected);
        assert_eq!(sort.image, select.image);
    }
}

#[test]
fn magnitude_is_non_negative() {
    let image = random_image(8, 8, 5).mapv(|v| v - 128.0);
    let out = reconstruct(&image, 10).unwrap();
    assert!(out.magnitude.iter().all(|&m| m >= 0.0));
}

#[test]
fn selection_is_ordered_by_magnitude() {
    let image = random_image(6, 6, 9);
    let out = reconstruct(&image, 36).unwrap();
    for pair in out.selected.windows(2) {
        assert!(out.magnitude[pair[0].index()] >= out.magnitude[pair[1].index()]);
    }
}

#[test]
fn non_positive_budget_keeps_nothing() {
    let image = random_image(4, 4, 1);
    for k in [0, -1, i64::MIN] {
        let out = reconstruct(&image, k).unwrap();
        assert!(out.selected.is_empty());
        assert!(out.keep_mask().iter().all(|&v| v == 0));
        assert!(out.image.iter().all(|&v| v == 0.0));
        assert_eq!(out.fraction_retained(), 0.0);
    }
}

#[test]
fn constant_image_has_only_dc() {
    let c = 3.0;
    let image = Array2::from_elem((4, 4), c);

    let out = reconstruct(&image, 1).unwrap();
    assert_eq!(out.selected, vec![Coord::new(2, 2)]);
    assert_abs_diff_eq!(out.magnitude[[2, 2]], 16.0 * c, epsilon = 1e-9);

    for (idx, &m) in out.magnitude.indexed_iter() {
        if idx != (2, 2) {
            assert_abs_diff_eq!(m, 0.0, epsilon = 1e-9);
        }
    }
    for &v in out.image.iter() {
        assert_abs_diff_eq!(v, c, epsilon = 1e-9);
    }

    let out = reconstruct(&image, 0).unwrap();
    for &v in out.image.iter() {
        assert_abs_diff_eq!(v, 0.0, epsilon = 1e-12);
    }
}

#[test]
fn conjugate_pair_ties_break_by_index() {
    // each row is a cosine at a quarter of the sampling rate; its two
    // frequencies form a conjugate pair of equal magnitude
    let image = Array2::from_shape_fn((4, 4), |(_, x)| [1.0, 0.0, -1.0, 0.0][x]);

    let out = reconstruct(&image, 2).unwrap();
    assert_eq!(out.magnitude[[2, 1]], out.magnitude[[2, 3]]);
    assert_abs_diff_eq!(out.magnitude[[2, 1]], 8.0, epsilon = 1e-12);
    assert_eq!(out.selected, vec![Coord::new(2, 1), Coord::new(2, 3)]);

    let out = reconstruct(&image, 1).unwrap();
    assert_eq!(out.selected, vec![Coord::new(2, 1)]);
}

#[test]
fn flat_spectrum_selects_in_row_major_order() {
    // a unit impulse transforms to all ones
    let mut image = Array2::zeros((3, 4));
    image[[0, 0]] = 1.0;

    let out = reconstruct(&image, 5).unwrap();
    assert_eq!(
        out.selected,
        vec![
            Coord::new(0, 0),
            Coord::new(0, 1),
            Coord::new(0, 2),
            Coord::new(0, 3),
            Coord::new(1, 0)
        ]
    );
}

#[test]
fn does_not_mutate_input() {
    let image = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
    let copy = image.clone();
    reconstruct(&image, 2).unwrap();
    assert_eq!(image, copy);
}

#[test]
fn empty_image_is_rejected() {
    let image = Array2::<f64>::zeros((0, 0));
    assert_eq!(
        reconstruct(&image, 1).unwrap_err(),
        ReconstructError::InvalidDimension { rows: 0, cols: 0 }
    );
}
