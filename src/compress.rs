use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;

use crate::error::{Error, Result};

/// Streams `src` through a gzip encoder into a `.gz` sibling.
///
/// The source file is left untouched; deleting it after a successful
/// compression is the caller's decision.
pub fn gzip_file(src: &Path) -> Result<PathBuf> {
    let dst = gz_sibling(src);
    match copy_gzip(src, &dst) {
        Ok(()) => Ok(dst),
        Err(source) => Err(Error::Compress {
            path: src.to_path_buf(),
            source,
        }),
    }
}

fn copy_gzip(src: &Path, dst: &Path) -> io::Result<()> {
    let mut input = File::open(src)?;
    // A pre-existing archive means a naming collision; refuse to clobber
    // compressed history.
    let output = OpenOptions::new().write(true).create_new(true).open(dst)?;
    let mut encoder = GzEncoder::new(output, Compression::default());
    io::copy(&mut input, &mut encoder)?;
    let output = encoder.finish()?;
    output.sync_all()?;
    Ok(())
}

/// The `.gz` path a file compresses into.
pub(crate) fn gz_sibling(src: &Path) -> PathBuf {
    let mut name = src.as_os_str().to_os_string();
    name.push(".gz");
    PathBuf::from(name)
}
