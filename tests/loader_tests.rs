// Integration tests for ferrite-data: real IDX files on disk through DataHandler.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use ferrite_data::idx::{build_idx1_bytes, build_idx3_bytes};
use ferrite_data::{DataError, DataHandler, LoaderConfig};

/// A per-test directory under the system temp dir, removed on drop.
struct Scratch {
    dir: PathBuf,
}

impl Scratch {
    fn new(test: &str) -> Self {
        let dir = std::env::temp_dir()
            .join(format!("ferrite-data-{}-{}", test, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        Self { dir }
    }

    fn write(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.dir.join(name);
        fs::write(&path, bytes).unwrap();
        path
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.dir);
    }
}

fn seeded(seed: u64) -> LoaderConfig {
    LoaderConfig { seed: Some(seed), ..Default::default() }
}

// Feature reading

#[test]
fn test_three_two_by_two_samples() {
    let tmp = Scratch::new("three_two_by_two_samples");
    let pixels: Vec<u8> = (0..12).collect();
    let bytes = build_idx3_bytes(&[&pixels[0..4], &pixels[4..8], &pixels[8..12]], 2, 2);
    let path = tmp.write("three_samples.idx3", &bytes);

    let mut h = DataHandler::default();
    h.read_feature_vector(&path).unwrap();

    assert_eq!(h.len(), 3);
    assert_eq!(h.feature_len(), 4);
    assert_eq!(h.records()[0].features(), &[0, 1, 2, 3]);
    assert_eq!(h.records()[1].features(), &[4, 5, 6, 7]);
    assert_eq!(h.records()[2].features(), &[8, 9, 10, 11]);
}

#[test]
fn test_truncated_feature_file_names_sample() {
    let tmp = Scratch::new("truncated_feature_file_names_sample");
    let mut bytes = build_idx3_bytes(&[&[1; 4], &[2; 4], &[3; 4]], 2, 2);
    bytes.truncate(16 + 4 + 2);
    let path = tmp.write("truncated.idx3", &bytes);

    let mut h = DataHandler::default();
    let err = h.read_feature_vector(&path).unwrap_err();
    assert!(err.to_string().contains("sample 1"));
    match err {
        DataError::TruncatedSample { sample, offset, .. } => {
            assert_eq!(sample, 1);
            assert_eq!(offset, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(h.is_empty(), "failed read must not leave partial records");
}

#[test]
fn test_oversized_header_on_short_file_is_an_error() {
    let tmp = Scratch::new("oversized_header");
    let mut bytes = Vec::new();
    for word in [0x0000_0803u32, 1, 0xFFFF_FFFF, 0xFFFF_FFFF] {
        bytes.extend_from_slice(&word.to_be_bytes());
    }
    bytes.extend_from_slice(&[7, 8, 9]);
    let path = tmp.write("oversized.idx3", &bytes);

    let mut h = DataHandler::default();
    let err = h.read_feature_vector(&path).unwrap_err();
    assert!(matches!(
        err,
        DataError::TruncatedSample { sample: 0, .. } | DataError::InvalidDimensions { .. }
    ));
    assert!(h.is_empty());
}

#[test]
fn test_missing_files_are_typed_errors() {
    let mut h = DataHandler::default();
    let missing = std::env::temp_dir().join("ferrite-data-does-not-exist.idx3");
    assert!(matches!(
        h.read_feature_vector(&missing),
        Err(DataError::FileNotFound { .. })
    ));
    assert!(matches!(
        h.read_feature_labels(&missing),
        Err(DataError::FileNotFound { .. })
    ));
}

// Label attachment and enumeration

#[test]
fn test_labels_attach_and_enumerate() {
    let tmp = Scratch::new("labels_attach_and_enumerate");
    let features = tmp.write("enum.idx3", &build_idx3_bytes(&[&[0], &[1], &[2]], 1, 1));
    let labels = tmp.write("enum.idx1", &build_idx1_bytes(&[5, 5, 7]));

    let mut h = DataHandler::default();
    h.load(&features, &labels).unwrap();

    assert_eq!(h.num_classes(), 2);
    let raw: Vec<u8> = h.records().iter().map(|r| r.label()).collect();
    let enumerated: Vec<Option<usize>> =
        h.records().iter().map(|r| r.enumerated_label()).collect();
    assert_eq!(raw, vec![5, 5, 7]);
    assert_eq!(enumerated, vec![Some(0), Some(0), Some(1)]);
}

#[test]
fn test_too_many_labels_is_rejected() {
    let tmp = Scratch::new("too_many_labels_is_rejected");
    let features = tmp.write("few.idx3", &build_idx3_bytes(&[&[0], &[1]], 1, 1));
    let labels = tmp.write("many.idx1", &build_idx1_bytes(&[1, 2, 3]));

    let mut h = DataHandler::default();
    h.read_feature_vector(&features).unwrap();
    let err = h.read_feature_labels(&labels).unwrap_err();
    assert!(matches!(err, DataError::LabelCountExceedsRecords { labels: 3, records: 2 }));
    assert!(h.records().iter().all(|r| r.label() == 0));
}

#[test]
fn test_fewer_labels_is_a_count_mismatch() {
    let tmp = Scratch::new("fewer_labels");
    let features = tmp.write("three.idx3", &build_idx3_bytes(&[&[0], &[1], &[2]], 1, 1));
    let labels = tmp.write("two.idx1", &build_idx1_bytes(&[4, 4]));

    for strict in [false, true] {
        let mut h = DataHandler::new(LoaderConfig { strict, ..Default::default() });
        let err = h.load(&features, &labels).unwrap_err();
        assert!(matches!(err, DataError::CountMismatch { records: 3, labels: 2 }));
        assert!(h.records().iter().all(|r| r.label() == 0));
        assert_eq!(h.num_classes(), 0, "no class may be invented for unlabelled records");
    }
}

// Splitting

fn hundred_records(tmp: &Scratch) -> (PathBuf, PathBuf) {
    let samples: Vec<Vec<u8>> = (0..100u8).map(|i| vec![i]).collect();
    let refs: Vec<&[u8]> = samples.iter().map(|s| s.as_slice()).collect();
    let labels: Vec<u8> = (0..100u8).map(|i| i % 10).collect();
    (
        tmp.write("hundred.idx3", &build_idx3_bytes(&refs, 1, 1)),
        tmp.write("hundred.idx1", &build_idx1_bytes(&labels)),
    )
}

fn ids(records: &[ferrite_data::Record]) -> Vec<u8> {
    records.iter().map(|r| r.features()[0]).collect()
}

#[test]
fn test_split_sizes_and_coverage() {
    let tmp = Scratch::new("split_sizes_and_coverage");
    let (features, labels) = hundred_records(&tmp);
    let mut h = DataHandler::new(LoaderConfig {
        train_percent: 0.7,
        test_percent: 0.2,
        seed: Some(5),
        strict: true,
    });
    h.load(&features, &labels).unwrap();
    h.split_data().unwrap();

    assert_eq!(h.training_data().len(), 70);
    assert_eq!(h.test_data().len(), 20);
    assert_eq!(h.validation_data().len(), 10);

    let all: Vec<u8> = [h.training_data(), h.test_data(), h.validation_data()]
        .iter()
        .flat_map(|s| ids(s))
        .collect();
    let unique: HashSet<u8> = all.iter().copied().collect();
    assert_eq!(all.len(), 100);
    assert_eq!(unique, (0..100u8).collect::<HashSet<_>>());

    // Labels travel with their features through the shuffle.
    for r in h.records() {
        assert_eq!(r.label(), r.features()[0] % 10);
    }
}

#[test]
fn test_fixed_seed_reproduces_partition() {
    let tmp = Scratch::new("fixed_seed_reproduces_partition");
    let (features, labels) = hundred_records(&tmp);
    let run = |seed| {
        let mut h = DataHandler::new(seeded(seed));
        h.load(&features, &labels).unwrap();
        h.split_data().unwrap();
        (ids(h.training_data()), ids(h.test_data()), ids(h.validation_data()))
    };

    assert_eq!(run(99), run(99));

    let (a_train, a_test, a_val) = run(1);
    let (b_train, b_test, b_val) = run(2);
    assert_eq!(a_train.len(), b_train.len());
    assert_eq!(a_test.len(), b_test.len());
    assert_eq!(a_val.len(), b_val.len());
    assert_ne!(a_train, b_train);
}

#[test]
fn test_reading_features_again_resets_split() {
    let tmp = Scratch::new("reading_features_again_resets_split");
    let (features, labels) = hundred_records(&tmp);
    let mut h = DataHandler::new(seeded(0));
    h.load(&features, &labels).unwrap();
    h.split_data().unwrap();
    assert!(!h.training_data().is_empty());

    h.read_feature_vector(&features).unwrap();
    assert_eq!(h.len(), 200);
    assert!(h.training_data().is_empty());
}
