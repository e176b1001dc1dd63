//! Logging macros.
//!
//! Forward to `defmt` when the `defmt` feature is enabled and compile to nothing
//! otherwise. Format strings use defmt syntax. Never call these per encoder tick.

#[cfg(feature = "defmt")]
macro_rules! log_debug {
    ($($arg:tt)+) => {
        defmt::debug!($($arg)+)
    };
}

#[cfg(not(feature = "defmt"))]
macro_rules! log_debug {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        $( let _ = &$arg; )*
    }};
}

#[cfg(feature = "defmt")]
macro_rules! log_info {
    ($($arg:tt)+) => {
        defmt::info!($($arg)+)
    };
}

#[cfg(not(feature = "defmt"))]
macro_rules! log_info {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        $( let _ = &$arg; )*
    }};
}

#[cfg(feature = "defmt")]
macro_rules! log_warn {
    ($($arg:tt)+) => {
        defmt::warn!($($arg)+)
    };
}

#[cfg(not(feature = "defmt"))]
macro_rules! log_warn {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        $( let _ = &$arg; )*
    }};
}

#[allow(unused_imports)]
pub(crate) use {log_debug, log_info, log_warn};
