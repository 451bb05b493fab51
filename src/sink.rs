use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use time::OffsetDateTime;

use crate::compress::gz_sibling;
use crate::error::{Error, Result};
use crate::format::file_stamp;

const FILE_PREFIX: &str = "server-";
const FILE_SUFFIX: &str = ".log";

/// The single file currently receiving log writes, plus the path it was
/// opened with. Replaced wholesale during rotation, never reopened.
pub struct ActiveFile {
    file: File,
    path: PathBuf,
}

impl ActiveFile {
    /// Opens a fresh append-mode file named after the current minute.
    ///
    /// The minute-resolution name may already be taken when rotations land
    /// back to back, either by a live file or by the `.gz` archive of a
    /// retired one; a numeric suffix is probed until a fresh path is
    /// found, so no two rotations ever share a path.
    pub fn open(dir: &Path, now: OffsetDateTime) -> Result<Self> {
        let stamp = file_stamp(now);
        let mut attempt = 1u32;
        loop {
            let name = if attempt == 1 {
                format!("{FILE_PREFIX}{stamp}{FILE_SUFFIX}")
            } else {
                format!("{FILE_PREFIX}{stamp}.{attempt}{FILE_SUFFIX}")
            };
            let path = dir.join(name);
            // A retired file may survive only as its compressed sibling;
            // reusing its name would overwrite that archive later.
            if gz_sibling(&path).exists() {
                attempt += 1;
                continue;
            }
            match OpenOptions::new().create_new(true).append(true).open(&path) {
                Ok(file) => return Ok(Self { file, path }),
                Err(err) if err.kind() == io::ErrorKind::AlreadyExists => attempt += 1,
                Err(source) => return Err(Error::OpenLogFile { path, source }),
            }
        }
    }

    /// Appends one rendered line, mirroring it to stderr so operators see
    /// live output across rotations. The mirror is best-effort.
    pub fn write_line(&mut self, line: &[u8]) -> io::Result<()> {
        let _ = io::stderr().write_all(line);
        self.file.write_all(line)
    }

    pub fn sync(&mut self) -> io::Result<()> {
        self.file.sync_all()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Closes the handle and yields the path for compression.
    pub fn into_path(self) -> PathBuf {
        self.path
    }
}
