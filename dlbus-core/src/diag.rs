//! Diagnostic logging helpers
//!
//! Library crates in this workspace only log through `defmt`, gated by
//! the `defmt` feature so host tests link without a global logger.
//! These macros compile to nothing when the feature is off.

macro_rules! diag_debug {
    ($($arg:tt)*) => {
        {
            #[cfg(feature = "defmt")]
            defmt::debug!($($arg)*);
        }
    };
}

macro_rules! diag_warn {
    ($($arg:tt)*) => {
        {
            #[cfg(feature = "defmt")]
            defmt::warn!($($arg)*);
        }
    };
}
