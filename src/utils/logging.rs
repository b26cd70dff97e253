// Mon Aug 03 2026 - Alex

use colored::*;
use log::{Level, LevelFilter, Log, Metadata, Record};

struct ColoredLogger {
    level: LevelFilter,
}

impl ColoredLogger {
    fn new(level: LevelFilter) -> Self {
        Self { level }
    }

    fn format_level(&self, level: Level) -> ColoredString {
        match level {
            Level::Error => "ERROR".red().bold(),
            Level::Warn => "WARN ".yellow().bold(),
            Level::Info => "INFO ".green().bold(),
            Level::Debug => "DEBUG".blue().bold(),
            Level::Trace => "TRACE".magenta().bold(),
        }
    }
}

impl Log for ColoredLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let target = if !record.target().is_empty() {
                format!("[{}]", record.target())
            } else {
                String::new()
            };

            eprintln!(
                "{} {} {}",
                self.format_level(record.level()),
                target.dimmed(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

pub fn init_logger(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    log::set_boxed_logger(Box::new(ColoredLogger::new(level))).ok();
    log::set_max_level(level);
}

pub fn init_from_env() {
    env_logger::init();
}

pub fn level_from_verbosity(verbosity: usize) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

pub struct ScopedTimer {
    name: String,
    start: std::time::Instant,
}

impl ScopedTimer {
    pub fn new(name: &str) -> Self {
        log::debug!("[TIMER] {} started", name);
        Self {
            name: name.to_string(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        log::debug!(
            "[TIMER] {} took {:.2}ms",
            self.name,
            elapsed.as_secs_f64() * 1000.0
        );
    }
}

pub fn scoped_timer(name: &str) -> ScopedTimer {
    ScopedTimer::new(name)
}
