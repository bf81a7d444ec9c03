#![allow(dead_code)]

use std::path::PathBuf;

use starpath_lib::{PathSearchEngine, PointSet};

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

pub fn load_fixture(name: &str) -> PointSet {
    let path = fixtures_dir().join(name);
    PointSet::from_path(&path).expect("fixture loads")
}

pub fn fixture_engine(name: &str) -> PathSearchEngine {
    PathSearchEngine::new(load_fixture(name))
}
