#![forbid(unsafe_code)]

//! Step generator for the comparison sorts.
//!
//! [`generate`] runs one of five instrumented algorithms over a private copy
//! of the input and returns every observable sub-step as a self-contained
//! [`ComparisonStep`]. The first step is always [`ComparisonPhase::Initial`]
//! and the last is always [`ComparisonPhase::Complete`].
//!
//! # Emission rules
//!
//! - Every comparison emits exactly one `Compare` step before the algorithm
//!   acts on its outcome.
//! - A `Swap` step is emitted only when the working array actually changes;
//!   placements that leave an element where it is emit `Overwrite` instead.
//! - Element ids follow their element through every swap.
//!
//! # Example
//!
//! ```
//! use sortviz_core::comparison::{self, ComparisonPhase, SortAlgorithm};
//! use sortviz_core::{SortOrder, SortValue};
//!
//! let input = [SortValue::Int(3), SortValue::Int(1), SortValue::Int(2)];
//! let steps = comparison::generate(&input, SortAlgorithm::Bubble, SortOrder::Asc);
//! assert_eq!(steps[0].phase, ComparisonPhase::Initial);
//! let sorted = steps.last().map(|s| s.values()).unwrap_or_default();
//! assert_eq!(sorted, [SortValue::Int(1), SortValue::Int(2), SortValue::Int(3)]);
//! ```

mod bubble;
mod insertion;
mod merge;
mod quick;
mod recorder;
mod selection;

use std::fmt;

use crate::error::{InputError, check_homogeneous};
use crate::value::{ElementId, SortOrder, SortValue};
use recorder::{Recorder, Slot};

/// The comparison algorithms the engine can trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SortAlgorithm {
    #[default]
    Bubble,
    Selection,
    Insertion,
    Merge,
    Quick,
}

impl SortAlgorithm {
    pub const ALL: [Self; 5] = [
        Self::Bubble,
        Self::Selection,
        Self::Insertion,
        Self::Merge,
        Self::Quick,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bubble => "bubble",
            Self::Selection => "selection",
            Self::Insertion => "insertion",
            Self::Merge => "merge",
            Self::Quick => "quick",
        }
    }

    /// Human-readable name, e.g. "Bubble Sort".
    pub fn title(self) -> &'static str {
        match self {
            Self::Bubble => "Bubble Sort",
            Self::Selection => "Selection Sort",
            Self::Insertion => "Insertion Sort",
            Self::Merge => "Merge Sort",
            Self::Quick => "Quick Sort",
        }
    }

    /// Parses the lowercase name, with or without a `sort` suffix.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_ascii_lowercase();
        let name = s
            .strip_suffix("sort")
            .map(|n| n.trim_end_matches(['_', '-', ' ']))
            .unwrap_or(s.as_str());
        Self::ALL.into_iter().find(|a| a.as_str() == name)
    }
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display status of one element within one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ElementStatus {
    #[default]
    Default,
    Comparing,
    Swapping,
    Sorted,
    Pivot,
    Merged,
}

/// One element of a comparison-sort snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComparisonElement {
    pub value: SortValue,
    pub id: ElementId,
    pub status: ElementStatus,
}

impl ComparisonElement {
    /// A fresh element with the default status.
    pub fn new(value: SortValue, id: ElementId) -> Self {
        Self {
            value,
            id,
            status: ElementStatus::Default,
        }
    }
}

/// What kind of action produced a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ComparisonPhase {
    /// Untouched input. Only ever step 0.
    Initial,
    /// A range is being divided (merge) or focused (quick).
    Split,
    /// A merge of two sorted halves begins.
    Merge,
    /// A pivot was chosen.
    Partition,
    /// A candidate was selected: running extreme or insertion key.
    Select,
    Compare,
    Swap,
    /// An element was placed without moving.
    Overwrite,
    /// A position became final.
    Sorted,
    /// Bubble sort stopped after a pass without swaps.
    EarlyExit,
    /// Everything is sorted. Only ever the last step.
    Complete,
}

impl ComparisonPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::Split => "split",
            Self::Merge => "merge",
            Self::Partition => "partition",
            Self::Select => "select",
            Self::Compare => "compare",
            Self::Swap => "swap",
            Self::Overwrite => "overwrite",
            Self::Sorted => "sorted",
            Self::EarlyExit => "early-exit",
            Self::Complete => "complete",
        }
    }
}

/// One immutable snapshot of a comparison sort's progress.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ComparisonStep {
    pub phase: ComparisonPhase,
    /// Full copy of the working array at this step.
    pub array: Vec<ComparisonElement>,
    /// Positions involved in the action.
    pub indices: Vec<usize>,
    pub explanation: String,
    pub detailed_explanation: String,
}

impl ComparisonStep {
    /// Values in array order.
    pub fn values(&self) -> Vec<SortValue> {
        self.array.iter().map(|e| e.value.clone()).collect()
    }

    /// Ids in array order.
    pub fn ids(&self) -> Vec<ElementId> {
        self.array.iter().map(|e| e.id).collect()
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.phase == ComparisonPhase::Complete
    }
}

/// Comparison engines accept any homogeneous sequence.
pub fn validate(values: &[SortValue]) -> Result<(), InputError> {
    check_homogeneous(values)
}

/// Build elements with ids taken from input positions.
pub fn elements_from_values(values: &[SortValue]) -> Vec<ComparisonElement> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| ComparisonElement::new(v.clone(), ElementId::from_index(i)))
        .collect()
}

/// Generate the full step trace for `values`.
pub fn generate(
    values: &[SortValue],
    algorithm: SortAlgorithm,
    order: SortOrder,
) -> Vec<ComparisonStep> {
    generate_from_elements(&elements_from_values(values), algorithm, order)
}

/// Generate the trace for elements that already carry ids.
///
/// Incoming statuses are ignored; the caller's slice is never modified.
pub fn generate_from_elements(
    elements: &[ComparisonElement],
    algorithm: SortAlgorithm,
    order: SortOrder,
) -> Vec<ComparisonStep> {
    let span = crate::debug_span!(
        "comparison.generate",
        algorithm = algorithm.as_str(),
        order = order.as_str(),
        n = elements.len()
    );
    let _guard = span.enter();

    let slots = elements
        .iter()
        .map(|e| Slot {
            id: e.id,
            value: e.value.clone(),
        })
        .collect();
    let mut rec = Recorder::begin(slots, &format!("Starting {}", algorithm.title()));

    if rec.len() > 1 {
        match algorithm {
            SortAlgorithm::Bubble => bubble::run(&mut rec, order),
            SortAlgorithm::Selection => selection::run(&mut rec, order),
            SortAlgorithm::Insertion => insertion::run(&mut rec, order),
            SortAlgorithm::Merge => merge::run(&mut rec, order),
            SortAlgorithm::Quick => quick::run(&mut rec, order),
        }
    }

    let steps = rec.finish();
    crate::debug!(steps = steps.len(), "comparison trace generated");
    steps
}
