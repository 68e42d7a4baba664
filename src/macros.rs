//! Convenience macros over [`Logger`](crate::Logger)
//!
//! Two forms each:
//! - `log_info!(logger, "created {} in {}s", name, secs)` formats like `format!`
//! - `log_info!(logger; "created ", name)` concatenates `Display` values

#[macro_export]
macro_rules! log_debug {
    ($logger:expr; $($part:expr),+ $(,)?) => {{
        use $crate::Logger as _;
        $logger.debug(&$crate::logging::sprint(&[$(&$part as &dyn ::std::fmt::Display),+]))
    }};
    ($logger:expr, $($arg:tt)+) => {{
        use $crate::Logger as _;
        $logger.debugf(::std::format_args!($($arg)+))
    }};
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr; $($part:expr),+ $(,)?) => {{
        use $crate::Logger as _;
        $logger.info(&$crate::logging::sprint(&[$(&$part as &dyn ::std::fmt::Display),+]))
    }};
    ($logger:expr, $($arg:tt)+) => {{
        use $crate::Logger as _;
        $logger.infof(::std::format_args!($($arg)+))
    }};
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr; $($part:expr),+ $(,)?) => {{
        use $crate::Logger as _;
        $logger.warn(&$crate::logging::sprint(&[$(&$part as &dyn ::std::fmt::Display),+]))
    }};
    ($logger:expr, $($arg:tt)+) => {{
        use $crate::Logger as _;
        $logger.warnf(::std::format_args!($($arg)+))
    }};
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr; $($part:expr),+ $(,)?) => {{
        use $crate::Logger as _;
        $logger.error(&$crate::logging::sprint(&[$(&$part as &dyn ::std::fmt::Display),+]))
    }};
    ($logger:expr, $($arg:tt)+) => {{
        use $crate::Logger as _;
        $logger.errorf(::std::format_args!($($arg)+))
    }};
}

/// Logs at Fatal level and terminates the process
#[macro_export]
macro_rules! log_fatal {
    ($logger:expr; $($part:expr),+ $(,)?) => {{
        use $crate::Logger as _;
        $logger.fatal(&$crate::logging::sprint(&[$(&$part as &dyn ::std::fmt::Display),+]))
    }};
    ($logger:expr, $($arg:tt)+) => {{
        use $crate::Logger as _;
        $logger.fatalf(::std::format_args!($($arg)+))
    }};
}

/// Logs at Panic level and panics
#[macro_export]
macro_rules! log_panic {
    ($logger:expr; $($part:expr),+ $(,)?) => {{
        use $crate::Logger as _;
        $logger.panic(&$crate::logging::sprint(&[$(&$part as &dyn ::std::fmt::Display),+]))
    }};
    ($logger:expr, $($arg:tt)+) => {{
        use $crate::Logger as _;
        $logger.panicf(::std::format_args!($($arg)+))
    }};
}
