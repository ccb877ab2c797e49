#![forbid(unsafe_code)]

//! Working array plus snapshot emission for the comparison engines.
//!
//! Statuses are never stored on the working elements. Each emitted step
//! derives them from the positional sorted-mask and the step's highlights,
//! so every snapshot is an independent copy.

use super::{ComparisonElement, ComparisonPhase, ComparisonStep, ElementStatus};
use crate::value::{ElementId, SortValue};

#[derive(Debug, Clone)]
pub(crate) struct Slot {
    pub(crate) id: ElementId,
    pub(crate) value: SortValue,
}

pub(crate) struct Recorder {
    slots: Vec<Slot>,
    sorted: Vec<bool>,
    steps: Vec<ComparisonStep>,
}

impl Recorder {
    /// Start a trace with the untouched input as step 0.
    pub(crate) fn begin(slots: Vec<Slot>, title: &str) -> Self {
        let n = slots.len();
        let mut rec = Self {
            sorted: vec![false; n],
            steps: Vec::with_capacity(n * n + 2),
            slots,
        };
        rec.emit(
            ComparisonPhase::Initial,
            Vec::new(),
            &[],
            title.to_owned(),
            format!("We have {n} elements to sort."),
        );
        rec
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) fn value(&self, index: usize) -> &SortValue {
        &self.slots[index].value
    }

    pub(crate) fn slots(&self, range: std::ops::RangeInclusive<usize>) -> Vec<Slot> {
        self.slots[range].to_vec()
    }

    /// Current position of `id`, searched within `range`.
    pub(crate) fn position_of(
        &self,
        id: ElementId,
        range: std::ops::RangeInclusive<usize>,
    ) -> Option<usize> {
        range.into_iter().find(|&p| self.slots[p].id == id)
    }

    #[inline]
    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.slots.swap(a, b);
    }

    #[inline]
    pub(crate) fn mark_sorted(&mut self, index: usize) {
        self.sorted[index] = true;
    }

    /// Mark positions `0..end` sorted.
    pub(crate) fn mark_prefix_sorted(&mut self, end: usize) {
        self.sorted[..end].fill(true);
    }

    pub(crate) fn mark_all_sorted(&mut self) {
        self.sorted.fill(true);
    }

    /// Emit a step that gives every index in `indices` the same status.
    pub(crate) fn step(
        &mut self,
        phase: ComparisonPhase,
        indices: Vec<usize>,
        status: ElementStatus,
        explanation: String,
        detailed: String,
    ) {
        let highlights: Vec<(usize, ElementStatus)> =
            indices.iter().map(|&i| (i, status)).collect();
        self.emit(phase, indices, &highlights, explanation, detailed);
    }

    /// Emit a step with per-position highlights. Later highlights win.
    pub(crate) fn emit(
        &mut self,
        phase: ComparisonPhase,
        indices: Vec<usize>,
        highlights: &[(usize, ElementStatus)],
        explanation: String,
        detailed_explanation: String,
    ) {
        let mut array: Vec<ComparisonElement> = self
            .slots
            .iter()
            .zip(&self.sorted)
            .map(|(slot, &sorted)| ComparisonElement {
                value: slot.value.clone(),
                id: slot.id,
                status: if sorted {
                    ElementStatus::Sorted
                } else {
                    ElementStatus::Default
                },
            })
            .collect();
        for &(index, status) in highlights {
            array[index].status = status;
        }
        crate::trace!(
            phase = phase.as_str(),
            step = self.steps.len(),
            "comparison step"
        );
        self.steps.push(ComparisonStep {
            phase,
            array,
            indices,
            explanation,
            detailed_explanation,
        });
    }

    /// Emit the terminal step and hand back the trace.
    pub(crate) fn finish(mut self) -> Vec<ComparisonStep> {
        self.mark_all_sorted();
        self.emit(
            ComparisonPhase::Complete,
            Vec::new(),
            &[],
            "Sort Complete!".to_owned(),
            "All elements are sorted.".to_owned(),
        );
        self.steps
    }
}
