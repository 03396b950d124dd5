use std::collections::BTreeMap;
use std::hint::black_box;
use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use freqrank::Spectrum;
use indicatif::ProgressBar;
use ndarray::Array2;
use strum::IntoEnumIterator;

mod strategies;
mod suite;
mod util;

use crate::strategies::{budgets, StrategyType};
use crate::suite::{generate_test_suites, StrategyResult, Test};
use crate::util::{read_luma, rmse};

#[derive(Parser, Debug)]
#[command(about = "Time frequency-rank reconstruction over a directory of png images")]
struct Args {
    /// Root directory, every subdirectory becomes its own suite
    #[arg(default_value = "images")]
    images: String,

    /// How many times to run each test (the minimum time is kept)
    #[arg(short, long, default_value_t = 1)]
    runs: usize,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    let runs = args.runs.max(1);

    let mut suites = generate_test_suites(&args.images);

    println!(
        " \x1b[1mRunning benchmarks\x1b[0m ({} runs per image)",
        runs
    );

    for suite in suites.values_mut() {
        if suite.files.is_empty() {
            continue;
        }

        println!("┌──────────────────────────────────────────────────────┐");
        println!(
            "│ running tests for {suite_name: <34} │",
            suite_name = suite.name
        );
        println!("└──────────────────────────────────────────────────────┘");

        let pb = ProgressBar::new(suite.files.len() as u64);
        for file in suite.files.iter() {
            pb.inc(1);

            let test = match read_luma(Path::new(file)) {
                Ok(image) => run_test(file, &image, runs),
                Err(e) => {
                    pb.println(format!("Error reading {file}, skipping: {e:#}"));
                    Test {
                        name: file.to_string(),
                        pixels: 0,
                        analyze_min_time: 0,
                        results: BTreeMap::new(),
                        errored: true,
                    }
                }
            };

            log::debug!("{}: {} px", test.name, test.pixels);
            suite.tests.push(test);
        }
        pb.finish_and_clear()
    }

    println!("\n \x1b[1mResults\x1b[0m");

    for suite in suites.values() {
        let successful_tests = suite
            .tests
            .iter()
            .filter(|t| !t.errored)
            .collect::<Vec<_>>();

        print_results(successful_tests, &suite.name);
    }

    let all_tests = suites
        .values()
        .flat_map(|s| s.tests.iter())
        .filter(|t| !t.errored)
        .collect::<Vec<_>>();

    print_results(all_tests, "Overall");

    Ok(())
}

fn print_results(tests: Vec<&Test>, title: &str) {
    let total_pixels: usize = tests.iter().map(|t| t.pixels).sum();

    if total_pixels == 0 {
        return;
    }

    let total_time_analyze: u128 = tests.iter().map(|t| t.analyze_min_time).sum();

    println!("┌────────────────────────────────────────────┐");
    println!("│ {title: <42} │", title = title);
    println!("│ {: <42} │", format!("{total_pixels} px, analyze {}ms", total_time_analyze / 1000));
    println!("├─────────┬──────────────────┬───────────────┤");
    println!("│ ranking │ reconstruct      │ rmse @ 10%    │");
    println!("├─────────┼──────────────────┼───────────────┤");
    for strategy in StrategyType::iter() {
        let results = tests
            .iter()
            .filter_map(|t| t.results.get(&strategy))
            .collect::<Vec<_>>();

        let total_time: u128 = results.iter().map(|r| r.reconstruct_min_time).sum();
        let mean_rmse = results.iter().map(|r| r.rmse).sum::<f64>() / results.len().max(1) as f64;

        println!(
            "│ {strategy: <7} │ {time: >14}ms │ {error: >13.4} │",
            strategy = strategy,
            time = total_time / 1000,
            error = mean_rmse
        );
    }
    println!("└─────────┴──────────────────┴───────────────┘");
}

fn run_test(name: &str, image: &Array2<f64>, runs: usize) -> Test {
    let mut results: BTreeMap<StrategyType, StrategyResult> = BTreeMap::new();

    let spectrum = match Spectrum::analyze(image) {
        Ok(spectrum) => spectrum,
        Err(e) => {
            println!("Error analyzing {name}, skipping: {e}");
            return Test {
                name: name.to_string(),
                pixels: image.len(),
                analyze_min_time: 0,
                results,
                errored: true,
            };
        }
    };

    // ANALYZE
    let mut shortest_analyze: u128 = u128::MAX;
    for _ in 0..runs {
        let start = Instant::now();
        let _ = black_box(Spectrum::analyze(black_box(image)));
        shortest_analyze = std::cmp::min(shortest_analyze, start.elapsed().as_micros());
    }

    let sweep = budgets(spectrum.len());
    let tenth = (spectrum.len() / 10).max(1) as i64;

    // RECONSTRUCT
    for strategy in StrategyType::iter() {
        let mut shortest: u128 = u128::MAX;

        for _ in 0..runs {
            let start = Instant::now();
            for &k in &sweep {
                black_box(strategy.reconstruct(black_box(&spectrum), k));
            }
            shortest = std::cmp::min(shortest, start.elapsed().as_micros());
        }

        let error = rmse(image, &strategy.reconstruct(&spectrum, tenth).image);

        results.insert(
            strategy,
            StrategyResult {
                reconstruct_min_time: shortest,
                rmse: error,
            },
        );
    }

    Test {
        name: name.to_string(),
        pixels: image.len(),
        analyze_min_time: shortest_analyze,
        results,
        errored: false,
    }
}
