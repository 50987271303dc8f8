//! Logging for the parse and layout passes.
//!
//! `debug!` traces the chosen scale and layout parameters; `warn!` reports
//! degenerate trees and viewports too small to draw in. Both are the
//! `tracing` macros when the `tracing` feature is on (the CLI then installs
//! a subscriber filtered by `RUST_LOG`) and expand to nothing otherwise.

#[cfg(feature = "tracing")]
pub use tracing::{debug, warn};

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub use crate::{debug, warn};
