use freqrank::{Ranking, Reconstruction, Spectrum};

/// What the interactive viewer currently shows.
#[derive(Debug, Clone)]
pub struct ViewState {
    /// Requested budget, before clamping.
    pub k: i64,
    pub reconstruction: Reconstruction,
}

impl ViewState {
    pub fn new(spectrum: &Spectrum, k: i64, ranking: Ranking) -> Self {
        ViewState {
            k,
            reconstruction: spectrum.reconstruct_with(k, ranking),
        }
    }
}

/// Apply one slider event. Input that is not an integer keeps the current view.
pub fn update(state: ViewState, input: &str, spectrum: &Spectrum, ranking: Ranking) -> ViewState {
    let k = match input.trim().parse::<i64>() {
        Ok(k) => k,
        Err(e) => {
            log::warn!("ignoring {input:?}: {e}");
            return state;
        }
    };

    if k == state.k {
        return state;
    }

    ViewState::new(spectrum, k, ranking)
}

/// Last non-blank line of a batch of pending events.
pub fn latest<I: IntoIterator<Item = String>>(batch: I) -> Option<String> {
    batch
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .last()
        .map(|line| line.trim().to_string())
}
