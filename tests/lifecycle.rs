use std::fs;

use tempfile::tempdir;
use ynet_logger::{Logger, RotationPolicy};

#[test]
fn close_is_idempotent() {
    let dir = tempdir().expect("tempdir");
    let logger = Logger::init(dir.path().join("logs"), RotationPolicy::Daily).expect("init");
    logger.close();
    logger.close();

    // A clone sharing the same state may close again too.
    let clone = logger.clone();
    clone.close();
}

#[test]
fn logging_after_close_does_not_panic() {
    let dir = tempdir().expect("tempdir");
    let logger = Logger::init(dir.path().join("logs"), RotationPolicy::Daily).expect("init");
    let path = logger.active_path().expect("active file");
    logger.close();

    logger.info("dropped on the floor");
    logger.warn("still no panic");
    assert!(logger.active_path().is_none());

    let text = fs::read_to_string(&path).expect("read closed file");
    assert!(!text.contains("dropped on the floor"));
}

#[test]
fn init_fails_fast_on_unusable_directory() {
    let dir = tempdir().expect("tempdir");
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, b"not a directory").expect("write blocker");

    // `logs` cannot be created below a regular file.
    let err = Logger::init(blocker.join("logs"), RotationPolicy::Daily);
    assert!(err.is_err());
    assert!(
        !blocker.join("logs").exists(),
        "failed init must leave no partial state"
    );
}

#[test]
fn rotate_after_close_is_a_no_op() {
    let dir = tempdir().expect("tempdir");
    let logs = dir.path().join("logs");
    let logger = Logger::init(&logs, RotationPolicy::Daily).expect("init");
    logger.close();

    logger.rotate_now().expect("rotate on closed logger");
    assert!(logger.active_path().is_none());
    let files = fs::read_dir(&logs).expect("read log dir").count();
    assert_eq!(files, 1, "no new file may appear after close");
}
