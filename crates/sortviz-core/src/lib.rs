#![forbid(unsafe_code)]

//! Step-generation engines for an educational sorting visualizer.
//!
//! Given an input sequence, an algorithm and a [`SortOrder`], the engines
//! return a complete, deterministic list of immutable snapshots. Replaying
//! the list reconstructs the algorithm's execution without re-running it.
//!
//! - [`comparison`]: bubble, selection, insertion, merge and quick sort.
//! - [`radix`]: LSD radix sort over decimal digits or characters.
//! - [`trace`]: fingerprints and JSONL export of a finished trace.
//!
//! # Features
//!
//! - `tracing`: emit spans and events through the `tracing` crate.
//! - `serde`: derive `Serialize`/`Deserialize` for every step type.

pub mod comparison;
pub mod error;
pub mod logging;
pub mod radix;
pub mod trace;
pub mod value;

pub use comparison::{
    ComparisonElement, ComparisonPhase, ComparisonStep, ElementStatus, SortAlgorithm,
};
pub use error::InputError;
pub use radix::{Bucket, BucketKey, RadixElement, RadixMode, RadixPhase, RadixStep};
pub use trace::{TraceStep, fingerprint, fingerprint_hex};
pub use value::{ElementId, SortOrder, SortValue};

#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace};
