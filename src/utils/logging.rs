//! Logging macros gated on a per-module `ENABLE_LOGS` constant.
//!
//! A module opts in by declaring the flag and importing the macros from the
//! crate root:
//!
//! ```ignore
//! const ENABLE_LOGS: bool = true;
//! use crate::{log_info, log_warn};
//!
//! log_info!("Ledger opened with {} stored members", count);
//! ```
//!
//! Flipping the flag to `false` silences that module without touching
//! `RUST_LOG` for the rest of the crate.

#[doc(hidden)]
#[macro_export]
macro_rules! __log_gated {
    ($level:ident, $($arg:tt)*) => {
        if ENABLE_LOGS {
            log::$level!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::__log_gated!(info, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::__log_gated!(warn, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::__log_gated!(error, $($arg)*)
    };
}
