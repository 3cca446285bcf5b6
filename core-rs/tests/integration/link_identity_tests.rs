//! Integration tests for fan-out link identity
//!
//! The defining property of the link scenario: every `test-k/link` shares
//! identity with `test-0/input`. Equal content alone would also hold for a
//! copy; inode equality and mutation visibility hold only for a link.

use evq_core::{DriverState, EvqError, FileSystemDriver, HarnessConfig, HarnessDriver, Scenario};
use std::fs;
use std::path::Path;
use std::sync::{mpsc, Arc};
use tempfile::TempDir;

fn fanout_harness(root: &Path, queue_count: usize) -> HarnessDriver {
    let driver = Arc::new(FileSystemDriver::new(root.to_path_buf()));
    let config = HarnessConfig {
        root: root.to_path_buf(),
        queue_count,
        message_count: 0,
    };
    let (_tx, rx) = mpsc::channel();
    HarnessDriver::new(driver, config, rx)
}

#[test]
fn test_fanout_contents_identical_through_all_names() {
    let temp_dir = TempDir::new().unwrap();
    let mut harness = fanout_harness(temp_dir.path(), 10);

    harness.setup(Scenario::LinkFanout).unwrap();
    assert_eq!(harness.state(), DriverState::Linked);

    let input = fs::read(temp_dir.path().join("test-0").join("input")).unwrap();
    assert_eq!(input, b"event text");

    for k in 1..10 {
        let link = fs::read(temp_dir.path().join(format!("test-{}", k)).join("link")).unwrap();
        assert_eq!(link, input);
    }
}

#[cfg(unix)]
#[test]
fn test_fanout_links_share_one_inode() {
    use std::os::unix::fs::MetadataExt;

    let temp_dir = TempDir::new().unwrap();
    let mut harness = fanout_harness(temp_dir.path(), 10);
    harness.setup(Scenario::LinkFanout).unwrap();

    let input_meta = fs::metadata(temp_dir.path().join("test-0").join("input")).unwrap();

    // One identity behind all ten names
    assert_eq!(input_meta.nlink(), 10);
    for k in 1..10 {
        let link_meta =
            fs::metadata(temp_dir.path().join(format!("test-{}", k)).join("link")).unwrap();
        assert_eq!(link_meta.ino(), input_meta.ino());
    }
}

#[test]
fn test_fanout_mutation_visible_through_every_name() {
    let temp_dir = TempDir::new().unwrap();
    let mut harness = fanout_harness(temp_dir.path(), 4);
    harness.setup(Scenario::LinkFanout).unwrap();

    // Truncate-write through the original name; a copy would leave the
    // links holding the old bytes
    fs::write(temp_dir.path().join("test-0").join("input"), b"rewritten").unwrap();

    for k in 1..4 {
        let link = fs::read(temp_dir.path().join(format!("test-{}", k)).join("link")).unwrap();
        assert_eq!(link, b"rewritten");
    }
}

#[test]
fn test_fanout_mutation_through_a_link_reaches_the_original() {
    let temp_dir = TempDir::new().unwrap();
    let mut harness = fanout_harness(temp_dir.path(), 3);
    harness.setup(Scenario::LinkFanout).unwrap();

    fs::write(temp_dir.path().join("test-2").join("link"), b"from the side").unwrap();

    let input = fs::read(temp_dir.path().join("test-0").join("input")).unwrap();
    assert_eq!(input, b"from the side");
}

#[test]
fn test_fanout_minimum_two_queues() {
    let temp_dir = TempDir::new().unwrap();
    let mut harness = fanout_harness(temp_dir.path(), 2);
    harness.setup(Scenario::LinkFanout).unwrap();

    assert!(temp_dir.path().join("test-0").join("input").is_file());
    assert!(temp_dir.path().join("test-1").join("link").is_file());
    assert!(!temp_dir.path().join("test-0").join("link").exists());
}

#[test]
fn test_fanout_single_queue_writes_input_only() {
    let temp_dir = TempDir::new().unwrap();
    let mut harness = fanout_harness(temp_dir.path(), 1);
    harness.setup(Scenario::LinkFanout).unwrap();

    assert_eq!(harness.state(), DriverState::Linked);
    assert!(temp_dir.path().join("test-0").join("input").is_file());

    let entries: Vec<_> = fs::read_dir(temp_dir.path().join("test-0"))
        .unwrap()
        .filter_map(|e| e.ok())
        .collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn test_rebinding_an_occupied_link_name_fails() {
    use evq_core::{LinkBinder, StorageDriver};

    let temp_dir = TempDir::new().unwrap();
    let mut harness = fanout_harness(temp_dir.path(), 3);
    harness.setup(Scenario::LinkFanout).unwrap();

    let driver: Arc<dyn StorageDriver> =
        Arc::new(FileSystemDriver::new(temp_dir.path().to_path_buf()));
    let binder = LinkBinder::new(driver);

    let input = temp_dir.path().join("test-0").join("input");
    let occupied = temp_dir.path().join("test-1").join("link");
    let result = binder.bind_link(&input, &occupied);

    match result {
        Err(EvqError::DestinationExists(_)) => {}
        other => panic!("Expected DestinationExists, got {:?}", other),
    }
    // The occupied entry still reads through the original identity
    assert_eq!(fs::read(&occupied).unwrap(), b"event text");
}

#[test]
fn test_fanout_rerun_over_existing_queues_fails() {
    let temp_dir = TempDir::new().unwrap();
    let mut first = fanout_harness(temp_dir.path(), 3);
    first.setup(Scenario::LinkFanout).unwrap();

    // Queue creation collides before any link work is attempted; the first
    // run's artifacts are untouched
    let mut second = fanout_harness(temp_dir.path(), 3);
    let result = second.setup(Scenario::LinkFanout);
    assert!(matches!(result, Err(EvqError::AlreadyExists(_))));
    assert_eq!(
        fs::read(temp_dir.path().join("test-1").join("link")).unwrap(),
        b"event text"
    );
}
