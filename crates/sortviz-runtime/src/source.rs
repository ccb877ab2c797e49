#![forbid(unsafe_code)]

//! The seam between the controller and a step generator.

use std::fmt;

use sortviz_core::comparison::{self, ComparisonStep, SortAlgorithm};
use sortviz_core::radix::{self, RadixStep};
use sortviz_core::{InputError, SortOrder, SortValue, TraceStep};

/// A step generator the controller can drive.
pub trait StepSource {
    type Step: TraceStep + Clone + fmt::Debug;
    /// Algorithm selector; `()` for single-algorithm engines.
    type Algorithm: Copy + PartialEq + fmt::Debug + Send + 'static;

    /// Short engine name for logs.
    const NAME: &'static str;

    fn validate(values: &[SortValue]) -> Result<(), InputError>;

    fn generate(
        values: &[SortValue],
        algorithm: Self::Algorithm,
        order: SortOrder,
    ) -> Vec<Self::Step>;
}

/// Bubble, selection, insertion, merge and quick sort.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComparisonEngine;

impl StepSource for ComparisonEngine {
    type Step = ComparisonStep;
    type Algorithm = SortAlgorithm;

    const NAME: &'static str = "comparison";

    fn validate(values: &[SortValue]) -> Result<(), InputError> {
        comparison::validate(values)
    }

    fn generate(
        values: &[SortValue],
        algorithm: SortAlgorithm,
        order: SortOrder,
    ) -> Vec<ComparisonStep> {
        comparison::generate(values, algorithm, order)
    }
}

/// LSD radix sort.
#[derive(Debug, Clone, Copy, Default)]
pub struct RadixEngine;

impl StepSource for RadixEngine {
    type Step = RadixStep;
    type Algorithm = ();

    const NAME: &'static str = "radix";

    fn validate(values: &[SortValue]) -> Result<(), InputError> {
        radix::validate(values)
    }

    fn generate(values: &[SortValue], _algorithm: (), order: SortOrder) -> Vec<RadixStep> {
        radix::generate(values, order)
    }
}
