//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`, and they stamp
//! the emitting module, function, file and line onto the event.
//!
//! # Examples
//!
//! ```
//! use correlog::prelude::*;
//! use correlog::info;
//!
//! let logger = StructuredLogger::new("demo", &LoggerConfig::default()).unwrap();
//!
//! // Basic logging
//! info!(logger, "Suite started");
//!
//! // With format arguments
//! let case = "checkout";
//! info!(logger, "Running case: {}", case);
//! ```

/// Resolve the name of the enclosing function.
#[doc(hidden)]
#[macro_export]
macro_rules! __function_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        name.strip_suffix("::f").unwrap_or(name)
    }};
}

/// Log a message with automatic formatting and source-location capture.
///
/// # Examples
///
/// ```
/// # use correlog::prelude::*;
/// # let logger = StructuredLogger::new("demo", &LoggerConfig::default()).unwrap();
/// use correlog::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log_located(
            $level,
            format!($($arg)+),
            $crate::core::SourceLocation::new(
                module_path!(),
                $crate::__function_name!(),
                file!(),
                line!(),
            ),
        )
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use correlog::prelude::*;
/// # let logger = StructuredLogger::new("demo", &LoggerConfig::default()).unwrap();
/// use correlog::info;
/// info!(logger, "Fixtures loaded");
/// info!(logger, "Processing {} cases", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a critical-level message.
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Critical, $($arg)+)
    };
}
