#![forbid(unsafe_code)]

//! Opt-in stderr tracing for the playback loop.
//!
//! Set `SORTVIZ_DEBUG_TRACE=1` to print timestamped lines for ticker and
//! controller activity without installing a `tracing` subscriber. The flag is
//! read once; afterwards each check is a single bool load.
//!
//! ```ignore
//! use sortviz_runtime::debug_trace;
//! debug_trace!("tick {} of {}", index, total);
//! ```

use std::sync::LazyLock;
use std::time::Instant;

static DEBUG_TRACE_ENABLED: LazyLock<bool> = LazyLock::new(|| {
    std::env::var("SORTVIZ_DEBUG_TRACE")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
});

static START_TIME: LazyLock<Instant> = LazyLock::new(Instant::now);

#[inline]
pub fn is_enabled() -> bool {
    *DEBUG_TRACE_ENABLED
}

/// Milliseconds since the first trace call, for correlating threads.
#[inline]
pub fn elapsed_ms() -> u64 {
    START_TIME.elapsed().as_millis() as u64
}

/// Print a timestamped line to stderr when `SORTVIZ_DEBUG_TRACE` is set.
#[macro_export]
macro_rules! debug_trace {
    ($($arg:tt)*) => {
        if $crate::debug_trace::is_enabled() {
            eprintln!(
                "[SORTVIZ {:>8}ms] {}",
                $crate::debug_trace::elapsed_ms(),
                format_args!($($arg)*)
            );
        }
    };
}
