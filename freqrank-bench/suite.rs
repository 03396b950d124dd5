use std::collections::BTreeMap;
use walkdir::WalkDir;

use crate::{strategies::StrategyType, util::to_dir};

#[derive(Debug)]
pub struct StrategyResult {
    pub reconstruct_min_time: u128,
    // rmse at a tenth of the coefficients
    pub rmse: f64,
}

#[derive(Debug)]
pub struct Test {
    pub name: String,
    pub pixels: usize,
    pub analyze_min_time: u128,
    pub results: BTreeMap<StrategyType, StrategyResult>,
    pub errored: bool,
}

#[derive(Debug)]
pub struct TestSuite {
    pub name: String,
    pub files: Vec<String>,
    pub tests: Vec<Test>,
}

/// One suite per directory under `root`, holding the png files directly inside it.
pub fn generate_test_suites(root: &str) -> BTreeMap<String, TestSuite> {
    let mut suites: BTreeMap<String, TestSuite> = BTreeMap::new();
    let root = root.trim_end_matches('/');

    for entry in WalkDir::new(root).sort_by_file_name() {
        let Ok(entry) = entry else {
            continue;
        };

        let Some(path) = entry.path().to_str() else {
            continue;
        };

        if entry.file_type().is_dir() {
            suites.insert(
                path.to_string(),
                TestSuite {
                    name: path.to_string(),
                    files: Vec::new(),
                    tests: Vec::new(),
                },
            );
            continue;
        }

        if !path.ends_with(".png") {
            continue;
        }

        let Some(suite) = suites.get_mut(&to_dir(path)) else {
            log::warn!("no suite for {path}");
            continue;
        };

        suite.files.push(path.to_string());
    }

    suites
}
