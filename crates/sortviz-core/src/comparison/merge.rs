#![forbid(unsafe_code)]

//! Top-down merge sort.
//!
//! Each merge reads its halves from a copy taken before the merge starts and
//! brings the chosen element to the write cursor with a swap, so the working
//! array stays a permutation of the input at every snapshot.

use super::recorder::{Recorder, Slot};
use super::{ComparisonPhase, ElementStatus};
use crate::value::SortOrder;

pub(super) fn run(rec: &mut Recorder, order: SortOrder) {
    let n = rec.len();
    sort_range(rec, 0, n - 1, order);
}

fn sort_range(rec: &mut Recorder, start: usize, end: usize, order: SortOrder) {
    if start >= end {
        return;
    }
    let mid = start + (end - start) / 2;
    rec.step(
        ComparisonPhase::Split,
        (start..=end).collect(),
        ElementStatus::Comparing,
        format!("Dividing range indexes [{start}-{end}]"),
        format!(
            "Splitting the array into two halves: [{start}-{mid}] and [{}-{end}]. Recursively sorting them.",
            mid + 1
        ),
    );
    sort_range(rec, start, mid, order);
    sort_range(rec, mid + 1, end, order);
    merge(rec, start, mid, end, order);
}

#[derive(Clone, Copy)]
enum Source {
    Left,
    Right,
}

impl Source {
    fn label(self) -> &'static str {
        match self {
            Self::Left => "Left",
            Self::Right => "Right",
        }
    }
}

fn merge(rec: &mut Recorder, start: usize, mid: usize, end: usize, order: SortOrder) {
    let left = rec.slots(start..=mid);
    let right = rec.slots(mid + 1..=end);

    rec.step(
        ComparisonPhase::Merge,
        (start..=end).collect(),
        ElementStatus::Comparing,
        format!("Merging range [{start}-{mid}] and [{}-{end}]", mid + 1),
        "Comparing elements from two sorted subarrays to merge them.".to_owned(),
    );

    let (mut i, mut j, mut k) = (0, 0, start);
    while i < left.len() && j < right.len() {
        let (l, r) = (&left[i], &right[j]);
        let l_pos = locate(rec, l, k, end);
        let r_pos = locate(rec, r, k, end);
        let mut highlights = merged_prefix(start, k);
        highlights.push((l_pos, ElementStatus::Comparing));
        highlights.push((r_pos, ElementStatus::Comparing));
        rec.emit(
            ComparisonPhase::Compare,
            vec![l_pos, r_pos],
            &highlights,
            format!("Comparing {} (Left) and {} (Right)", l.value, r.value),
            format!(
                "We check which value is {} to place it next in the merged sequence.",
                order.extreme_adjective()
            ),
        );

        // Ties take the left element, which keeps the merge stable.
        if order.should_place_later(&l.value, &r.value) {
            place(rec, r, k, start, end, None);
            j += 1;
        } else {
            place(rec, l, k, start, end, None);
            i += 1;
        }
        k += 1;
    }

    for slot in &left[i..] {
        place(rec, slot, k, start, end, Some(Source::Left));
        k += 1;
    }
    for slot in &right[j..] {
        place(rec, slot, k, start, end, Some(Source::Right));
        k += 1;
    }
}

fn locate(rec: &Recorder, slot: &Slot, from: usize, end: usize) -> usize {
    rec.position_of(slot.id, from..=end)
        .expect("merge element must stay inside the unplaced part of its range")
}

/// Positions of the current merge that are already placed.
fn merged_prefix(start: usize, k: usize) -> Vec<(usize, ElementStatus)> {
    (start..k).map(|p| (p, ElementStatus::Merged)).collect()
}

/// Bring `slot` to position `k`; `flush` names the half being drained once
/// the other half is exhausted.
fn place(
    rec: &mut Recorder,
    slot: &Slot,
    k: usize,
    start: usize,
    end: usize,
    flush: Option<Source>,
) {
    let from = locate(rec, slot, k, end);
    let mut highlights = merged_prefix(start, k);

    if from != k {
        rec.swap(k, from);
        highlights.push((k, ElementStatus::Swapping));
        highlights.push((from, ElementStatus::Swapping));
        let (explanation, detail) = match flush {
            Some(source) => (
                format!(
                    "Moving remaining {}: {} to position {k}",
                    source.label(),
                    slot.value
                ),
                format!(
                    "Flushing remaining elements from the {} subarray.",
                    source.label().to_ascii_lowercase()
                ),
            ),
            None => (
                format!("Moving {} to position {k}", slot.value),
                "Placing the next sorted element into its correct position.".to_owned(),
            ),
        };
        rec.emit(
            ComparisonPhase::Swap,
            vec![k, from],
            &highlights,
            explanation,
            detail,
        );
    } else {
        highlights.push((k, ElementStatus::Swapping));
        rec.emit(
            ComparisonPhase::Overwrite,
            vec![k],
            &highlights,
            format!("Placed {} at position {k}", slot.value),
            "Element was already in correct position.".to_owned(),
        );
    }
}
