use std::fs;

use tempfile::tempdir;
use ynet_logger::{Logger, RotationPolicy};

#[test]
fn facade_macros_reach_the_active_file() {
    let dir = tempdir().expect("tempdir");
    let logger = Logger::init(dir.path().join("logs"), RotationPolicy::Daily).expect("init");
    logger.install().expect("install global logger");

    log::info!("via facade {}", 42);
    log::warn!("facade warning");
    log::debug!("filtered out");

    let path = logger.active_path().expect("active file");
    logger.close();

    let text = fs::read_to_string(&path).expect("read active file");
    assert!(text.contains(" INFO via facade 42"), "{text}");
    assert!(text.contains(" WARN facade warning"), "{text}");
    assert!(!text.contains("filtered out"), "{text}");
}
