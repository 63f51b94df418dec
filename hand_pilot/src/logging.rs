//! Console logger behind the `log` facade.
//!
//! Log lines go to stderr so the banner and mode lines on stdout stay
//! readable.  Each line carries the time since the logger was installed,
//! which is what matters when reading frame-by-frame warnings:
//!
//! ```text
//! [   12.345] WARN  hand_pilot::app - Ignoring empty camera frame.
//! ```

use std::io::Write;
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use log::{Level, LevelFilter, Log, Metadata, Record};

pub struct ConsoleLogger {
    started: OnceLock<Instant>,
}

impl ConsoleLogger {
    fn elapsed(&self) -> Duration {
        self.started.get_or_init(Instant::now).elapsed()
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(self.elapsed(), record.level(), record.target(), &record.args().to_string());
        let mut err = std::io::stderr().lock();
        let _ = writeln!(err, "{}", line);
    }

    fn flush(&self) {
        std::io::stderr().flush().ok();
    }
}

/// Install [`ConsoleLogger`] as the global logger and start its clock.
///
/// Only the first call takes effect; later calls are silently ignored.
pub fn init_logger(level: LevelFilter) {
    static LOGGER: ConsoleLogger = ConsoleLogger { started: OnceLock::new() };
    if log::set_logger(&LOGGER).is_ok() {
        LOGGER.started.get_or_init(Instant::now);
        log::set_max_level(level);
    }
}

fn format_line(elapsed: Duration, level: Level, target: &str, message: &str) -> String {
    format!(
        "[{:>5}.{:03}] {:<5} {} - {}",
        elapsed.as_secs(),
        elapsed.subsec_millis(),
        level,
        target,
        message
    )
}
