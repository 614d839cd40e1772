//! zkVM-compatible logging macros for ASM crates.
//!
//! This module provides logging macros that work in both regular and zkVM environments:
//! - In regular builds: Uses the real `tracing` crate for full logging functionality
//! - In zkVM builds: Provides zero-cost no-op macros that validate format strings at compile time

// When NOT building for zkVM, use real tracing macros
#[cfg(not(target_os = "zkvm"))]
pub use tracing::{debug, error, info, trace, warn};

// When building for zkVM, define zero-cost no-op macros
#[cfg(target_os = "zkvm")]
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {{ let _ = format_args!($($arg)*); }}
}

#[cfg(target_os = "zkvm")]
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {{ let _ = format_args!($($arg)*); }}
}

#[cfg(target_os = "zkvm")]
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {{ let _ = format_args!($($arg)*); }}
}

#[cfg(target_os = "zkvm")]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {{ let _ = format_args!($($arg)*); }}
}

#[cfg(target_os = "zkvm")]
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {{ let _ = format_args!($($arg)*); }}
}

// Re-export the macros for zkVM builds so they can be used with the same syntax
#[cfg(target_os = "zkvm")]
pub use crate::{debug, error, info, trace, warn};
