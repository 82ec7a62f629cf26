//! Bridge between the `log` facade used inside the SDK and a logger supplied by the host app.

use std::sync::{Arc, OnceLock};

/// Receives log records emitted while resolving customer actions.
///
/// Implemented by the host application and registered once with [`set_logger`].
///
/// # Examples
///
/// ```rust
/// use actionkit_core::logger::{LogLevel, Logger};
///
/// struct ConsoleLogger;
///
/// impl Logger for ConsoleLogger {
///     fn log(&self, level: LogLevel, message: String) {
///         println!("[{level:?}] {message}");
///     }
/// }
/// ```
///
/// ## Swift
///
/// ```swift
/// final class ActionKitLoggerBridge: ActionKit.Logger {
///     func log(level: ActionKit.LogLevel, message: String) {
///         os_log("%{public}@", message)
///     }
/// }
///
/// ActionKit.setLogger(logger: ActionKitLoggerBridge(), minimumLevel: .info)
/// ```
#[uniffi::export(with_foreign)]
pub trait Logger: Sync + Send {
    /// Logs a message at the specified level.
    fn log(&self, level: LogLevel, message: String);
}

/// Severity of a log record, ordered from the most verbose to the most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, uniffi::Enum)]
pub enum LogLevel {
    /// Very detailed tracing of the resolution steps.
    Trace,
    /// Debugging information such as the dispatched action kind.
    Debug,
    /// Progress of a resolution.
    Info,
    /// Recoverable situations, e.g. a fingerprint timeout converted into a token.
    Warn,
    /// Failures surfaced to the caller.
    Error,
}

impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Self::Error,
            log::Level::Warn => Self::Warn,
            log::Level::Info => Self::Info,
            log::Level::Debug => Self::Debug,
            log::Level::Trace => Self::Trace,
        }
    }
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Self::Trace,
            LogLevel::Debug => Self::Debug,
            LogLevel::Info => Self::Info,
            LogLevel::Warn => Self::Warn,
            LogLevel::Error => Self::Error,
        }
    }
}

/// Forwards `log` records to the registered foreign [`Logger`].
struct ForeignLogger;

impl log::Log for ForeignLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        // Verbose records from dependencies are noise for the host.
        let is_verbose = metadata.level() >= log::Level::Debug;
        !is_verbose || metadata.target().starts_with("actionkit")
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Some(logger) = LOGGER_INSTANCE.get() {
            logger.log(record.level().into(), format!("{}", record.args()));
        }
    }

    fn flush(&self) {}
}

static LOGGER_INSTANCE: OnceLock<Arc<dyn Logger>> = OnceLock::new();

/// Registers the host logger and sets the most verbose level that is forwarded.
///
/// Only the first registration takes effect; later calls just adjust the level.
#[uniffi::export]
pub fn set_logger(logger: Arc<dyn Logger>, minimum_level: LogLevel) {
    if LOGGER_INSTANCE.set(logger).is_err() {
        log::warn!("Logger already set, ignoring the new instance.");
    }

    if let Err(e) = init_logger() {
        eprintln!("Failed to set logger: {e}");
    }
    log::set_max_level(minimum_level.into());
}

/// Installs the bridge as the `log` implementation.
///
/// # Errors
/// Fails if another `log` implementation is already installed.
fn init_logger() -> Result<(), log::SetLoggerError> {
    static LOGGER: ForeignLogger = ForeignLogger;
    log::set_logger(&LOGGER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_map_both_ways() {
        assert_eq!(LogLevel::from(log::Level::Warn), LogLevel::Warn);
        assert_eq!(log::LevelFilter::from(LogLevel::Debug), log::LevelFilter::Debug);
        assert!(LogLevel::Error > LogLevel::Info);
    }

    #[test]
    fn test_verbose_records_from_dependencies_are_filtered() {
        use log::Log;

        let foreign = log::MetadataBuilder::new()
            .level(log::Level::Debug)
            .target("hyper::client")
            .build();
        assert!(!ForeignLogger.enabled(&foreign));

        let own = log::MetadataBuilder::new()
            .level(log::Level::Debug)
            .target("actionkit_core::resolver")
            .build();
        assert!(ForeignLogger.enabled(&own));

        let warning = log::MetadataBuilder::new()
            .level(log::Level::Warn)
            .target("hyper::client")
            .build();
        assert!(ForeignLogger.enabled(&warning));
    }

    #[test]
    fn test_bridge_is_installed_once() {
        // The first call may already fail if the bridge was installed elsewhere in this process.
        let _ = init_logger();
        assert!(init_logger().is_err());
    }
}
