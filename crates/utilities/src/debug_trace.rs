//! Trace logging that is compiled away unless the `regaut_debug-trace` feature is enabled.

/// Prints trace information only when the `regaut_debug-trace` feature is
/// enabled, in which case it delegates to [`log::trace!`].
///
/// # Examples
///
/// ```
/// use regaut_utilities::debug_trace;
///
/// let state = 3;
/// debug_trace!("Visiting state {state}");
/// ```
#[macro_export]
#[cfg(feature = "regaut_debug-trace")]
macro_rules! debug_trace {
    ($($arg:tt)*) => {
        {
            log::trace!($($arg)*);
        }
    };
}

#[macro_export]
#[cfg(not(feature = "regaut_debug-trace"))]
macro_rules! debug_trace {
    ($($arg:tt)*) => {{
        // No-op when regaut_debug-trace is not enabled
    }};
}
