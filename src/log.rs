//! Logging shim for the engine.
//!
//! Call sites use `crate::log::{debug, info, warn}`. Built with the `tracing`
//! feature they are `tracing`'s own macros and take its field syntax
//! (`%display`, `?debug`, `name = value`). Built without it every invocation
//! is dropped at expansion time, arguments included; `lib.rs` silences the
//! unused-binding lint that leaves behind.

#[cfg(feature = "tracing")]
pub use tracing::{debug, info, warn};

#[cfg(not(feature = "tracing"))]
mod disabled {
    #[macro_export]
    #[doc(hidden)]
    macro_rules! __penplot_log_disabled {
        ($($arg:tt)*) => {};
    }

    pub use crate::__penplot_log_disabled as debug;
    pub use crate::__penplot_log_disabled as info;
    pub use crate::__penplot_log_disabled as warn;
}

#[cfg(not(feature = "tracing"))]
pub use disabled::{debug, info, warn};
