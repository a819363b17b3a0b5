//! Integration tests for a full ingestion run on the local filesystem
//!
//! These tests verify that:
//! 1. A run writes raw, train and test CSVs with an 80/20 split
//! 2. Train and test together reconstruct the source rows, without overlap
//! 3. A missing source fails before anything is created
//! 4. An existing output directory and its unrelated files are left alone
//! 5. Repeated runs produce byte-identical artifacts

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use stratum_csv::{CsvTableStore, TracingEventSink};
use stratum_domain::ingestion::{FailureKind, IngestionConfig, Ingestor, Stage};
use stratum_domain::ports::{MemoryEventSink, TableStore};
use tempfile::TempDir;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Source with header `a,b,c` and `a` running 0..n
fn write_source(dir: &Path, n: usize) -> PathBuf {
    let path = dir.join("source.csv");
    let mut contents = String::from("a,b,c\n");
    for i in 0..n {
        contents.push_str(&format!("{},{},row-{}\n", i, i * i, i));
    }
    fs::write(&path, contents).unwrap();
    path
}

fn config_in(dir: &Path, source: &Path) -> IngestionConfig {
    IngestionConfig::default()
        .with_source_path(source)
        .with_artifacts_dir(dir.join("artifacts"))
}

fn column_a(path: &Path) -> Vec<usize> {
    let dataset = CsvTableStore::new().load(path).unwrap();
    (0..dataset.len())
        .map(|i| dataset.value(i, "a").unwrap().parse().unwrap())
        .collect()
}

#[test]
fn test_ten_row_scenario() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let source = write_source(dir.path(), 10);
    let ingestor = Ingestor::new(
        CsvTableStore::new(),
        TracingEventSink::new(),
        config_in(dir.path(), &source),
    );

    let (train_path, test_path) = ingestor.run().unwrap().into_pair();

    let artifacts = dir.path().join("artifacts");
    assert_eq!(train_path, artifacts.join("train.csv"));
    assert_eq!(test_path, artifacts.join("test.csv"));

    for path in [&train_path, &test_path] {
        let metadata = fs::metadata(path).unwrap();
        assert!(metadata.len() > 0, "{} should not be empty", path.display());
    }

    assert_eq!(column_a(&artifacts.join("data.csv")).len(), 10);
    let train = column_a(&train_path);
    let test = column_a(&test_path);
    assert_eq!(train.len(), 8);
    assert_eq!(test.len(), 2);

    let train_set: HashSet<usize> = train.iter().copied().collect();
    let test_set: HashSet<usize> = test.iter().copied().collect();
    assert!(train_set.is_disjoint(&test_set));
    let union: HashSet<usize> = train_set.union(&test_set).copied().collect();
    assert_eq!(union, (0..10).collect());
}

#[test]
fn test_raw_copy_round_trips_source() {
    let dir = TempDir::new().unwrap();
    let source = write_source(dir.path(), 37);
    let config = config_in(dir.path(), &source);
    let raw_path = config.raw_data_path.clone();
    let ingestor = Ingestor::new(CsvTableStore::new(), MemoryEventSink::new(), config);

    ingestor.run().unwrap();

    let store = CsvTableStore::new();
    assert_eq!(store.load(&raw_path).unwrap(), store.load(&source).unwrap());
    assert_eq!(
        fs::read_to_string(&raw_path).unwrap(),
        fs::read_to_string(&source).unwrap()
    );
}

#[test]
fn test_splits_carry_header_and_whole_rows() {
    let dir = TempDir::new().unwrap();
    let source = write_source(dir.path(), 50);
    let config = config_in(dir.path(), &source);
    let ingestor = Ingestor::new(CsvTableStore::new(), MemoryEventSink::new(), config.clone());

    ingestor.run().unwrap();

    let store = CsvTableStore::new();
    let mut seen = Vec::new();
    for path in [&config.train_data_path, &config.test_data_path] {
        let contents = fs::read_to_string(path).unwrap();
        assert!(contents.starts_with("a,b,c\n"));

        let dataset = store.load(path).unwrap();
        for i in 0..dataset.len() {
            let a: usize = dataset.value(i, "a").unwrap().parse().unwrap();
            assert_eq!(dataset.value(i, "b").unwrap(), (a * a).to_string());
            assert_eq!(dataset.value(i, "c").unwrap(), format!("row-{}", a));
            seen.push(a);
        }
    }

    seen.sort_unstable();
    assert_eq!(seen, (0..50).collect::<Vec<_>>());
}

#[test]
fn test_missing_source_creates_nothing() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("notebook").join("data").join("missing.csv");
    let events = MemoryEventSink::new();
    let ingestor = Ingestor::new(
        CsvTableStore::new(),
        events.clone(),
        config_in(dir.path(), &source),
    );

    let failure = ingestor.run().unwrap_err();

    assert_eq!(failure.kind(), FailureKind::MissingInput);
    assert_eq!(failure.stage(), Stage::LocateSource);
    assert!(failure.to_string().contains("missing.csv"));
    assert!(!dir.path().join("artifacts").exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_malformed_source_fails_with_parse_kind() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("source.csv");
    fs::write(&source, "a,b,c\n1,2,3\n4,5\n").unwrap();
    let ingestor = Ingestor::new(
        CsvTableStore::new(),
        MemoryEventSink::new(),
        config_in(dir.path(), &source),
    );

    let failure = ingestor.run().unwrap_err();

    assert_eq!(failure.kind(), FailureKind::Parse);
    assert_eq!(failure.stage(), Stage::Load);
    assert!(!dir.path().join("artifacts").exists());
}

#[test]
fn test_existing_directory_keeps_unrelated_files() {
    let dir = TempDir::new().unwrap();
    let source = write_source(dir.path(), 20);
    let artifacts = dir.path().join("artifacts");
    fs::create_dir_all(&artifacts).unwrap();
    let unrelated = artifacts.join("model.pkl");
    fs::write(&unrelated, b"keep me").unwrap();
    let events = MemoryEventSink::new();
    let ingestor = Ingestor::new(
        CsvTableStore::new(),
        events.clone(),
        config_in(dir.path(), &source),
    );

    let report = ingestor.run_with_report().unwrap();

    assert!(!report.directory_created);
    assert_eq!(fs::read(&unrelated).unwrap(), b"keep me");
    assert!(events
        .messages()
        .iter()
        .any(|m| m.starts_with("Directory already exists")));
}

#[test]
fn test_repeated_runs_are_identical() {
    let dir = TempDir::new().unwrap();
    let source = write_source(dir.path(), 120);
    let config = config_in(dir.path(), &source);
    let ingestor = Ingestor::new(CsvTableStore::new(), MemoryEventSink::new(), config.clone());

    ingestor.run().unwrap();
    let first_train = fs::read(&config.train_data_path).unwrap();
    let first_test = fs::read(&config.test_data_path).unwrap();

    ingestor.run().unwrap();

    assert_eq!(fs::read(&config.train_data_path).unwrap(), first_train);
    assert_eq!(fs::read(&config.test_data_path).unwrap(), first_test);
    assert_eq!(column_a(&config.test_data_path).len(), 24);
}
