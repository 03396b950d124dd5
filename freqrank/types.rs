use ndarray::Array2;

/// Position of a coefficient in the centered spectrum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Coord { row, col }
    }

    pub fn from_flat(index: usize, cols: usize) -> Self {
        Coord {
            row: index / cols,
            col: index % cols,
        }
    }

    pub fn flat(&self, cols: usize) -> usize {
        self.row * cols + self.col
    }

    pub fn index(&self) -> [usize; 2] {
        [self.row, self.col]
    }
}

/// Output of a single reconstruction.
#[derive(Debug, Clone)]
pub struct Reconstruction {
    /// |ifft2(ifftshift(spectrum * mask))|
    pub image: Array2<f64>,
    /// |spectrum|, centered
    pub magnitude: Array2<f64>,
    /// arg(spectrum) in (-pi, pi], centered
    pub phase: Array2<f64>,
    /// retained coefficients, strongest first
    pub selected: Vec<Coord>,

    // largest imaginary part left over by the inverse transform
    pub max_imaginary_residual: f64,
}

impl Reconstruction {
    pub fn dim(&self) -> (usize, usize) {
        self.image.dim()
    }

    pub fn total(&self) -> usize {
        self.image.len()
    }

    /// Number of retained coefficients (the clamped budget).
    pub fn budget(&self) -> usize {
        self.selected.len()
    }

    pub fn fraction_retained(&self) -> f64 {
        self.budget() as f64 / self.total() as f64
    }

    /// Binary keep-mask with a 1 at every selected coordinate.
    pub fn keep_mask(&self) -> Array2<u8> {
        keep_mask(self.dim(), &self.selected)
    }
}

pub fn keep_mask(dim: (usize, usize), selected: &[Coord]) -> Array2<u8> {
    let mut mask = Array2::zeros(dim);
    for coord in selected {
        mask[coord.index()] = 1;
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_index_is_row_major() {
        let c = Coord::from_flat(7, 3);
        assert_eq!(c, Coord::new(2, 1));
        assert_eq!(c.flat(3), 7);
    }

    #[test]
    fn ordering_follows_flat_index() {
        assert!(Coord::new(0, 5) < Coord::new(1, 0));
        assert!(Coord::new(1, 0) < Coord::new(1, 1));
    }

    #[test]
    fn mask_marks_selection() {
        let mask = keep_mask((2, 3), &[Coord::new(0, 2), Coord::new(1, 0)]);
        assert_eq!(mask.iter().map(|&v| v as usize).sum::<usize>(), 2);
        assert_eq!(mask[[0, 2]], 1);
        assert_eq!(mask[[1, 0]], 1);
        assert_eq!(mask[[0, 0]], 0);
    }
}
