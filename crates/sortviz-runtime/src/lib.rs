#![forbid(unsafe_code)]

//! Playback runtime for the SortViz step engines.
//!
//! A [`PlaybackController`] materializes a step list once and then exposes
//! index-based navigation plus timed autoplay on a background [`Ticker`].
//! [`ComparisonController`] and [`RadixController`] are the two engine
//! instantiations.
//!
//! # Example
//!
//! ```
//! use sortviz_core::{SortAlgorithm, SortValue};
//! use sortviz_runtime::{ComparisonController, PlaybackConfig, PlaybackState};
//!
//! let input = vec![SortValue::Int(3), SortValue::Int(1), SortValue::Int(2)];
//! let config = PlaybackConfig::comparison().with_algorithm(SortAlgorithm::Insertion);
//! let mut controller = ComparisonController::new(input, config)?;
//!
//! while controller.can_go_next() {
//!     controller.next();
//! }
//! assert_eq!(controller.state(), PlaybackState::Finished);
//! # Ok::<(), sortviz_runtime::PlaybackError>(())
//! ```

pub mod config;
pub mod controller;
pub mod debug_trace;
pub mod error;
pub mod source;
pub mod ticker;

pub use config::PlaybackConfig;
pub use controller::{
    ComparisonController, PlaybackController, PlaybackMsg, PlaybackState, RadixController,
};
pub use error::PlaybackError;
pub use source::{ComparisonEngine, RadixEngine, StepSource};
pub use ticker::{StopSignal, Ticker};
