use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;

use time::OffsetDateTime;

use crate::compress::gzip_file;
use crate::error::{Error, Result};
use crate::format::{render_line, Level};
use crate::policy::RotationPolicy;
use crate::sink::ActiveFile;

const MARKER: &str = "--------------------------------------------------------------------";

/// Process-wide logging handle: one shared sink, one rotation scheduler.
///
/// Cheap to clone; thread a clone into each component instead of keeping
/// an ambient global. Call [`Logger::install`] to additionally register it
/// with the `log` facade.
#[derive(Clone)]
pub struct Logger {
    inner: Arc<Inner>,
}

struct Inner {
    dir: PathBuf,
    policy: RotationPolicy,
    sink: Mutex<Option<ActiveFile>>,
    scheduler: Mutex<Option<SchedulerHandle>>,
    compressors: Mutex<Vec<JoinHandle<()>>>,
}

struct SchedulerHandle {
    stop: Sender<()>,
    thread: JoinHandle<()>,
}

impl Logger {
    /// Creates the log directory if needed, opens the first active file,
    /// emits the startup marker, and starts the rotation scheduler.
    ///
    /// Fails fast if the directory or the first file cannot be created;
    /// nothing is left open on error.
    pub fn init(dir: impl Into<PathBuf>, policy: RotationPolicy) -> Result<Logger> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| Error::LogDir {
            path: dir.clone(),
            source,
        })?;
        let first = ActiveFile::open(&dir, OffsetDateTime::now_utc())?;

        let logger = Logger {
            inner: Arc::new(Inner {
                dir,
                policy,
                sink: Mutex::new(Some(first)),
                scheduler: Mutex::new(None),
                compressors: Mutex::new(Vec::new()),
            }),
        };
        logger.info(MARKER);
        logger.info("logger initialized");
        logger.start_scheduler()?;
        Ok(logger)
    }

    /// Registers this logger as the global `log` facade sink so the rest
    /// of the process can use `log::info!` and friends.
    pub fn install(&self) -> std::result::Result<(), log::SetLoggerError> {
        log::set_boxed_logger(Box::new(self.clone()))?;
        log::set_max_level(log::LevelFilter::Info);
        Ok(())
    }

    pub fn info(&self, message: &str) {
        self.write(Level::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.write(Level::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.write(Level::Error, message);
    }

    /// Writes the line, then terminates the process with exit code 1.
    pub fn fatal(&self, message: &str) -> ! {
        self.write(Level::Fatal, message);
        if let Some(sink) = lock(&self.inner.sink).as_mut() {
            let _ = sink.sync();
        }
        std::process::exit(1);
    }

    /// Path of the file currently receiving writes, if the logger is open.
    pub fn active_path(&self) -> Option<PathBuf> {
        lock(&self.inner.sink)
            .as_ref()
            .map(|sink| sink.path().to_path_buf())
    }

    /// Retires the current active file and swaps in a freshly named one.
    ///
    /// The new file is opened before the old one is given up, so a failed
    /// open leaves the current sink untouched. Compression of the retired
    /// file runs on its own thread; the plaintext is deleted only once the
    /// `.gz` sibling is durably written, and is preserved on failure.
    pub fn rotate_now(&self) -> Result<()> {
        let retired = {
            let mut guard = lock(&self.inner.sink);
            let mut current = match guard.take() {
                Some(current) => current,
                // Already closed; nothing to rotate.
                None => return Ok(()),
            };
            let now = OffsetDateTime::now_utc();
            let next = match ActiveFile::open(&self.inner.dir, now) {
                Ok(next) => next,
                Err(err) => {
                    // Failed open leaves the old sink published.
                    *guard = Some(current);
                    return Err(err);
                }
            };
            let _ = current.write_line(render_line(Level::Info, MARKER, now).as_bytes());
            let _ =
                current.write_line(render_line(Level::Info, "rotating log file", now).as_bytes());
            *guard = Some(next);
            current.into_path()
        };
        self.spawn_compressor(retired);
        Ok(())
    }

    /// Stops and joins the scheduler, waits for in-flight compressions,
    /// and closes the active file. Idempotent; never panics.
    pub fn close(&self) {
        if let Some(handle) = lock(&self.inner.scheduler).take() {
            drop(handle.stop);
            let _ = handle.thread.join();
        }
        let pending: Vec<_> = lock(&self.inner.compressors).drain(..).collect();
        for handle in pending {
            let _ = handle.join();
        }
        // Dropping the handle closes the file.
        lock(&self.inner.sink).take();
    }

    fn write(&self, level: Level, message: &str) {
        let line = render_line(level, message, OffsetDateTime::now_utc());
        let mut guard = lock(&self.inner.sink);
        match guard.as_mut() {
            // Fire-and-forget: a full disk must not crash the caller.
            Some(sink) => {
                let _ = sink.write_line(line.as_bytes());
            }
            // After close only the console mirror remains.
            None => {
                let _ = io::stderr().write_all(line.as_bytes());
            }
        }
    }

    fn start_scheduler(&self) -> Result<()> {
        let (stop, ticks) = mpsc::channel::<()>();
        let period = self.inner.policy.period();
        let worker = self.clone();
        let thread = std::thread::Builder::new()
            .name("log-rotation".to_string())
            .spawn(move || loop {
                match ticks.recv_timeout(period) {
                    Err(RecvTimeoutError::Timeout) => {
                        if let Err(err) = worker.rotate_now() {
                            worker.error(&format!("log rotation failed: {err}"));
                        }
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            })
            .map_err(Error::Scheduler)?;
        *lock(&self.inner.scheduler) = Some(SchedulerHandle { stop, thread });
        Ok(())
    }

    fn spawn_compressor(&self, retired: PathBuf) {
        let worker = self.clone();
        let path = retired.clone();
        let spawned = std::thread::Builder::new()
            .name("log-compress".to_string())
            .spawn(move || worker.compress_retired(&path));
        match spawned {
            Ok(handle) => lock(&self.inner.compressors).push(handle),
            Err(err) => {
                self.error(&format!("could not spawn compressor thread: {err}"));
                // Fall back to compressing inline; rotation has already
                // published the new sink.
                self.compress_retired(&retired);
            }
        }
    }

    fn compress_retired(&self, retired: &Path) {
        match gzip_file(retired) {
            Ok(_) => {
                if let Err(err) = std::fs::remove_file(retired) {
                    self.error(&format!(
                        "could not remove {} after compression: {err}",
                        retired.display()
                    ));
                }
            }
            // The plaintext stays on disk for manual recovery.
            Err(err) => self.error(&err.to_string()),
        }
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::Level::Info
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level = match record.level() {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warn,
            _ => Level::Info,
        };
        self.write(level, &record.args().to_string());
    }

    fn flush(&self) {
        if let Some(sink) = lock(&self.inner.sink).as_mut() {
            let _ = sink.sync();
        }
    }
}

// A panicked lock holder must not poison the sink for everyone else.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
