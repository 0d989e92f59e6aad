//! Lightweight performance instrumentation.
//!
//! Two independent switches: `--perf` prints timing [`Scope`]s to stderr,
//! `--render-debug-log` appends timestamped events (scroll emissions,
//! search queries, layout reflows, frame draws) to a file via
//! [`log_event`]. Every event is also forwarded to `tracing` at TRACE level.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{LazyLock, Mutex};
use std::time::Instant;

static ENABLED: AtomicBool = AtomicBool::new(false);
static EVENT_LOG: LazyLock<Mutex<Option<EventLog>>> = LazyLock::new(|| Mutex::new(None));

#[derive(Debug)]
pub struct Scope {
    name: &'static str,
    start: Instant,
}

impl Drop for Scope {
    fn drop(&mut self) {
        if !is_enabled() {
            return;
        }
        let elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        eprintln!("[perf] {}: {:.2} ms", self.name, elapsed_ms);
    }
}

#[derive(Debug)]
struct EventLog {
    start: Instant,
    writer: BufWriter<File>,
}

impl EventLog {
    fn create(path: &Path) -> std::io::Result<Self> {
        let mut writer = BufWriter::new(File::create(path)?);
        writeln!(writer, "contextsite render debug log start")?;
        writer.flush()?;
        Ok(Self {
            start: Instant::now(),
            writer,
        })
    }

    fn write(&mut self, name: &str, detail: &str) {
        let elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        let _ = writeln!(self.writer, "[{elapsed_ms:>10.3} ms] {name}: {detail}");
        let _ = self.writer.flush();
    }
}

pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn scope(name: &'static str) -> Scope {
    Scope {
        name,
        start: Instant::now(),
    }
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

/// Start writing events to `path`, or stop with `None`.
pub fn set_debug_log_path(path: Option<&Path>) -> std::io::Result<()> {
    let log = path.map(EventLog::create).transpose()?;
    *EVENT_LOG.lock().expect("event log lock poisoned") = log;
    Ok(())
}

pub fn is_debug_log_enabled() -> bool {
    EVENT_LOG.lock().expect("event log lock poisoned").is_some()
}

pub fn log_event(name: &str, detail: impl AsRef<str>) {
    let detail = detail.as_ref();
    tracing::trace!(target: "contextsite::events", event = name, detail);
    if let Some(log) = EVENT_LOG.lock().expect("event log lock poisoned").as_mut() {
        log.write(name, detail);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_set_enabled_toggles_runtime_flag() {
        set_enabled(true);
        assert!(is_enabled());

        set_enabled(false);
        assert!(!is_enabled());
    }

    #[test]
    fn test_debug_log_path_enables_logging_and_writes() {
        let temp_file = NamedTempFile::new().unwrap();
        set_debug_log_path(Some(temp_file.path())).unwrap();
        assert!(is_debug_log_enabled());
        log_event("test.event", "hello world");
        set_debug_log_path(None).unwrap();
        assert!(!is_debug_log_enabled());

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.contains("contextsite render debug log start"));
        assert!(content.contains("test.event: hello world"));
    }

    #[test]
    fn test_unwritable_log_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-such-dir").join("render.log");
        assert!(set_debug_log_path(Some(&missing)).is_err());
    }
}
