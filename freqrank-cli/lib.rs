use std::{
    io::{self, BufRead},
    path::{Path, PathBuf},
    sync::mpsc,
    thread,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use freqrank::{Ranking, Reconstruction, Spectrum};
use ndarray::Array2;

pub mod render;
pub mod view;

use view::ViewState;

// initial slider position of the interactive viewer
pub const DEFAULT_FREQUENCIES: i64 = 100;

#[derive(Parser, Debug)]
#[command(
    name = "freqrank",
    version,
    about = "Reconstruct a grayscale image from its strongest frequencies"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// How the strongest coefficients are selected
    #[arg(long, value_enum, global = true, default_value_t = Strategy::Select)]
    pub ranking: Strategy,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Reconstruct once and write all panels as png files
    Render {
        input: PathBuf,

        /// Number of frequencies to keep
        #[arg(short, long, allow_negative_numbers = true, default_value_t = DEFAULT_FREQUENCIES)]
        k: i64,

        /// Directory the panels are written to
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },

    /// Print the reconstruction error for a list of budgets
    Sweep {
        input: PathBuf,

        #[arg(
            short,
            long,
            value_delimiter = ',',
            allow_negative_numbers = true,
            default_values_t = [1i64, 10, 100, 1000, 10000]
        )]
        k: Vec<i64>,
    },

    /// Read budgets from stdin, one per line, re-rendering after each
    Interactive {
        input: PathBuf,

        #[arg(short, long, allow_negative_numbers = true, default_value_t = DEFAULT_FREQUENCIES)]
        k: i64,

        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Sort,
    Select,
}

impl From<Strategy> for Ranking {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Sort => Ranking::Sort,
            Strategy::Select => Ranking::Select,
        }
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let ranking = Ranking::from(cli.ranking);

    match cli.command {
        Command::Render { input, k, out } => {
            let image = read_luma(&input)?;
            let spectrum = Spectrum::analyze(&image)?;
            let reconstruction = spectrum.reconstruct_with(k, ranking);

            render::write_panels(&out, &image, &reconstruction)?;
            println!("Original Image ({} total frequencies)", image.len());
            println!("{}", summary(&reconstruction));
        }
        Command::Sweep { input, k } => {
            let image = read_luma(&input)?;
            let spectrum = Spectrum::analyze(&image)?;
            print_sweep(&image, &spectrum, &k, ranking);
        }
        Command::Interactive { input, k, out } => {
            let image = read_luma(&input)?;
            let spectrum = Spectrum::analyze(&image)?;
            interactive(&image, &spectrum, k, ranking, &out)?;
        }
    }

    Ok(())
}

/// Load any decodable image as a single-channel intensity array.
pub fn read_luma(path: &Path) -> Result<Array2<f64>> {
    let image = image::open(path)
        .with_context(|| format!("failed to open image {}", path.display()))?
        .to_luma8();
    let (width, height) = image.dimensions();

    let pixels = image.into_raw().into_iter().map(f64::from).collect();
    Array2::from_shape_vec((height as usize, width as usize), pixels)
        .context("image buffer does not match its dimensions")
}

pub fn summary(reconstruction: &Reconstruction) -> String {
    format!(
        "Reconstructed Image ({} frequencies, {:.2}% used)",
        reconstruction.budget(),
        reconstruction.fraction_retained() * 100.0
    )
}

/// Root mean square error between two images of the same shape.
pub fn rmse(a: &Array2<f64>, b: &Array2<f64>) -> f64 {
    let sum: f64 = a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum();
    (sum / a.len() as f64).sqrt()
}

fn print_sweep(image: &Array2<f64>, spectrum: &Spectrum, budgets: &[i64], ranking: Ranking) {
    println!("┌──────────┬─────────┬────────────┐");
    println!("│ k        │ used    │ rmse       │");
    println!("├──────────┼─────────┼────────────┤");
    for &k in budgets {
        let reconstruction = spectrum.reconstruct_with(k, ranking);
        println!(
            "│ {k: >8} │ {used: >6.2}% │ {error: >10.4} │",
            k = reconstruction.budget(),
            used = reconstruction.fraction_retained() * 100.0,
            error = rmse(image, &reconstruction.image)
        );
    }
    println!("└──────────┴─────────┴────────────┘");
}

fn interactive(
    image: &Array2<f64>,
    spectrum: &Spectrum,
    k: i64,
    ranking: Ranking,
    out: &Path,
) -> Result<()> {
    let (tx, rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    let mut state = ViewState::new(spectrum, k, ranking);
    show(out, image, &state)?;

    // everything queued up while rendering collapses into the latest request
    while let Ok(first) = rx.recv() {
        let Some(input) = view::latest(std::iter::once(first).chain(rx.try_iter())) else {
            continue;
        };

        if matches!(input.as_str(), "q" | "quit" | "exit") {
            break;
        }

        let previous = state.k;
        state = view::update(state, &input, spectrum, ranking);
        if state.k != previous {
            show(out, image, &state)?;
        }
    }

    Ok(())
}

fn show(out: &Path, image: &Array2<f64>, state: &ViewState) -> Result<()> {
    render::write_panels(out, image, &state.reconstruction)?;
    println!("{}", summary(&state.reconstruction));
    Ok(())
}
