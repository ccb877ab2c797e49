#![forbid(unsafe_code)]

//! SortViz public facade crate.
//!
//! Re-exports the step engines from `sortviz-core` and, with the default
//! `runtime` feature, the playback controller from `sortviz-runtime`.

use std::fmt;

// --- Engine re-exports -----------------------------------------------------

pub use sortviz_core::comparison::{
    ComparisonElement, ComparisonPhase, ComparisonStep, ElementStatus, SortAlgorithm,
};
pub use sortviz_core::radix::{Bucket, BucketKey, RadixElement, RadixMode, RadixPhase, RadixStep};
pub use sortviz_core::{
    ElementId, InputError, SortOrder, SortValue, TraceStep, fingerprint, fingerprint_hex,
};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "runtime")]
pub use sortviz_runtime::{
    ComparisonController, PlaybackConfig, PlaybackController, PlaybackError, PlaybackMsg,
    PlaybackState, RadixController, StepSource,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for SortViz sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Input outside an engine's domain.
    Input(InputError),
    /// Rejected playback command or configuration.
    #[cfg(feature = "runtime")]
    Playback(PlaybackError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input(err) => write!(f, "{err}"),
            #[cfg(feature = "runtime")]
            Self::Playback(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<InputError> for Error {
    fn from(err: InputError) -> Self {
        Self::Input(err)
    }
}

#[cfg(feature = "runtime")]
impl From<PlaybackError> for Error {
    fn from(err: PlaybackError) -> Self {
        match err {
            PlaybackError::Input(inner) => Self::Input(inner),
            other => Self::Playback(other),
        }
    }
}

/// Standard result type for SortViz APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{ComparisonStep, Error, RadixStep, Result, SortAlgorithm, SortOrder, SortValue};

    #[cfg(feature = "runtime")]
    pub use crate::{ComparisonController, PlaybackConfig, PlaybackState, RadixController};

    pub use crate::{comparison, core, radix};

    #[cfg(feature = "runtime")]
    pub use crate::runtime;
}

pub use sortviz_core as core;
pub use sortviz_core::{comparison, radix};
#[cfg(feature = "runtime")]
pub use sortviz_runtime as runtime;
