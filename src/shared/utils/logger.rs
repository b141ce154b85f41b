use log::{debug, error, info, warn};
use std::sync::Once;
use std::time::Instant;

static INIT: Once = Once::new();

/// Install the `env_logger` backend once per process.
/// `RUST_LOG` overrides the default levels; a logger installed earlier
/// (a test harness, an embedding binary) is left in place.
pub fn init_logger() {
    INIT.call_once(|| {
        let result = env_logger::Builder::new()
            .filter_level(log::LevelFilter::Info)
            .filter_module("restaurant_catalog_lib", log::LevelFilter::Debug)
            .filter_module("diesel", log::LevelFilter::Warn)
            .filter_module("r2d2", log::LevelFilter::Warn)
            .filter_module("tokio", log::LevelFilter::Warn)
            .parse_default_env()
            .format_timestamp_secs()
            .format_target(false)
            .format_module_path(false)
            .try_init();

        match result {
            Ok(()) => info!("Catalog logging initialized"),
            Err(e) => debug!("Logger already installed: {}", e),
        }
    });
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        log::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        log::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        log::error!($($arg)*)
    };
}

/// Writes slower than this are logged at warn level
pub const SLOW_WRITE_MS: u64 = 500;

/// Log lines shared by the store and the repositories
pub struct LogContext;

impl LogContext {
    /// A finished write against one table
    pub fn db_write(operation: &str, table: &str, rows: u64, duration_ms: u64) {
        if duration_ms >= SLOW_WRITE_MS {
            warn!(
                "DB: {} on {} touched {} rows in {}ms (slow)",
                operation, table, rows, duration_ms
            );
        } else {
            debug!(
                "DB: {} on {} touched {} rows in {}ms",
                operation, table, rows, duration_ms
            );
        }
    }

    /// `results` is `None` when the search is starting
    pub fn search_operation(mode: &str, query: &str, results: Option<usize>) {
        match results {
            Some(found) => info!("Search ({}): '{}' matched {} restaurants", mode, query, found),
            None => debug!("Search ({}): '{}'", mode, query),
        }
    }

    pub fn error_with_context(error: &dyn std::error::Error, context: &str) {
        error!("{}: {}", context, error);
    }

    pub fn performance_metric(operation: &str, duration_ms: u64, detail: Option<&str>) {
        match detail {
            Some(detail) => info!("Timing: {} took {}ms ({})", operation, duration_ms, detail),
            None => info!("Timing: {} took {}ms", operation, duration_ms),
        }
    }
}

/// Wall-clock timer for one operation; finishing it logs the duration
pub struct TimedOperation {
    start: Instant,
    operation: String,
}

impl TimedOperation {
    pub fn new(operation: &str) -> Self {
        debug!("Starting: {}", operation);
        Self {
            start: Instant::now(),
            operation: operation.to_string(),
        }
    }

    fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    pub fn finish(self) -> u64 {
        let duration = self.elapsed_ms();
        LogContext::performance_metric(&self.operation, duration, None);
        duration
    }

    pub fn finish_with_info(self, info: &str) -> u64 {
        let duration = self.elapsed_ms();
        LogContext::performance_metric(&self.operation, duration, Some(info));
        duration
    }

    /// Finish a write, logging the affected row count for `table`
    pub fn finish_write(self, table: &str, rows: u64) -> u64 {
        let duration = self.elapsed_ms();
        LogContext::db_write(&self.operation, table, rows, duration);
        duration
    }
}
