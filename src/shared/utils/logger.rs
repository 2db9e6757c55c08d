use log::{debug, error, info};
use std::sync::Once;

static INIT: Once = Once::new();

/// Install the env_logger backend once; later calls are no-ops.
/// `RUST_LOG` overrides the per-module defaults.
pub fn init_logger() {
    INIT.call_once(|| {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Info) // Default level
            .filter_module("tipdesk_lib", log::LevelFilter::Debug) // More verbose for our code
            .filter_module("reqwest", log::LevelFilter::Warn) // Reduce HTTP noise
            .filter_module("hyper", log::LevelFilter::Warn)
            .parse_default_env()
            .format_timestamp_secs()
            .format_target(false)
            .format_module_path(false)
            .init();

        info!("Logging system initialized");
    });
}

/// Macro for structured logging with context
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

/// Structured logging helpers for common patterns
pub struct LogContext;

impl LogContext {
    /// Log backend store operations
    pub fn store_operation(operation: &str, table: &str, duration_ms: Option<u64>) {
        match duration_ms {
            Some(duration) => info!(
                "Store: {} on {} completed in {}ms",
                operation, table, duration
            ),
            None => debug!("Store: Starting {} on {}", operation, table),
        }
    }

    /// Log import operations
    pub fn import_progress(current: usize, total: usize, label: &str) {
        info!("Import: [{}/{}] Saving '{}'", current, total, label);
    }

    /// Log errors with context
    pub fn error_with_context(error: &dyn std::error::Error, context: &str) {
        error!("{}: {}", context, error);
    }
}

/// Wall-clock timer for one store or import step; reports when finished
pub struct TimedOperation {
    start: std::time::Instant,
    operation: String,
}

impl TimedOperation {
    pub fn new(operation: &str) -> Self {
        debug!("Starting: {}", operation);
        Self {
            start: std::time::Instant::now(),
            operation: operation.to_string(),
        }
    }

    pub fn finish(self) -> u64 {
        self.report(None)
    }

    /// Finish with a short outcome note such as a row count or status
    pub fn finish_with_info(self, outcome: &str) -> u64 {
        self.report(Some(outcome))
    }

    fn report(self, outcome: Option<&str>) -> u64 {
        let elapsed_ms = self.start.elapsed().as_millis() as u64;
        match outcome {
            Some(outcome) => info!("{} took {}ms ({})", self.operation, elapsed_ms, outcome),
            None => info!("{} took {}ms", self.operation, elapsed_ms),
        }
        elapsed_ms
    }
}
