// src/log.rs
//
// Parsers never touch the disk themselves: log lines go to whatever sink the
// host process installed. No sink → every macro is a cheap no-op.
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

type Sink = Box<dyn Fn(&str) + Send + Sync>;

static SINK: OnceLock<Sink> = OnceLock::new();
static LOG_LOCK: Mutex<()> = Mutex::new(());
static START: OnceLock<Instant> = OnceLock::new();
static MIN_LEVEL: AtomicU8 = AtomicU8::new(Level::Debug as u8);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Level {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }
}

fn start() -> Instant {
    *START.get_or_init(Instant::now)
}

fn fmt_elapsed(ms: u128) -> String {
    let total_ms = ms as u64;
    let h = total_ms / 3_600_000;
    let m = (total_ms % 3_600_000) / 60_000;
    let s = (total_ms % 60_000) / 1_000;
    let ms = total_ms % 1_000;
    format!("{h:02}:{m:02}:{s:02}.{ms:03}")
}

/// Install the process-wide sink. Only the first call wins; returns `false`
/// if a sink was already in place.
pub fn install_sink<F>(sink: F) -> bool
where
    F: Fn(&str) + Send + Sync + 'static,
{
    start();
    SINK.set(Box::new(sink)).is_ok()
}

/// Append log lines to `path` (created if missing).
pub fn log_to_file<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref().to_path_buf();
    install_sink(move |line| {
        if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&path) {
            let _ = file.write_all(line.as_bytes());
        }
    })
}

pub fn log_to_stderr() -> bool {
    install_sink(|line| eprint!("{line}"))
}

pub fn set_level(level: Level) {
    MIN_LEVEL.store(level as u8, Ordering::Relaxed);
}

pub fn enabled(level: Level) -> bool {
    SINK.get().is_some() && level as u8 >= MIN_LEVEL.load(Ordering::Relaxed)
}

/// Internal logging function
pub fn write_log(level: Level, msg: &str) {
    let Some(sink) = SINK.get() else { return };
    if (level as u8) < MIN_LEVEL.load(Ordering::Relaxed) {
        return;
    }
    let elapsed = fmt_elapsed(start().elapsed().as_millis());
    let line = format!("[{elapsed}][{}] {msg}\n", level.as_str());

    if let Ok(_guard) = LOG_LOCK.lock() {
        sink(&line);
    }
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        if $crate::log::enabled($crate::log::Level::Debug) {
            $crate::log::write_log($crate::log::Level::Debug, &format!($($arg)*))
        }
    };
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        if $crate::log::enabled($crate::log::Level::Info) {
            $crate::log::write_log($crate::log::Level::Info, &format!($($arg)*))
        }
    };
}

/// Warn-level logging
#[macro_export]
macro_rules! logw {
    ($($arg:tt)*) => {
        if $crate::log::enabled($crate::log::Level::Warn) {
            $crate::log::write_log($crate::log::Level::Warn, &format!($($arg)*))
        }
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        if $crate::log::enabled($crate::log::Level::Error) {
            $crate::log::write_log($crate::log::Level::Error, &format!($($arg)*))
        }
    };
}
