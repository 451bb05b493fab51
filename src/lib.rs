//! Rotating, gzip-compressing log writer for the y_net server.
//!
//! One process-wide sink receives every leveled line and mirrors it to
//! stderr. A background scheduler periodically retires the backing file,
//! swaps in a freshly timestamped one, and compresses the retired file to
//! a `.gz` sibling. No line is lost or split across a rotation.

pub mod compress;
pub mod error;
pub mod format;
pub mod logger;
pub mod policy;
pub mod sink;

pub use error::{Error, Result};
pub use format::Level;
pub use logger::Logger;
pub use policy::RotationPolicy;
