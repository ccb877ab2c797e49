#![forbid(unsafe_code)]

//! Lomuto quicksort; the pivot is always the last element of the range.

use super::recorder::Recorder;
use super::{ComparisonPhase, ElementStatus};
use crate::value::SortOrder;

pub(super) fn run(rec: &mut Recorder, order: SortOrder) {
    let n = rec.len();
    sort_range(rec, 0, n, order);
}

/// Sort the half-open range `low..high`.
fn sort_range(rec: &mut Recorder, low: usize, high: usize, order: SortOrder) {
    match high.saturating_sub(low) {
        0 => {}
        1 => {
            rec.mark_sorted(low);
            rec.step(
                ComparisonPhase::Sorted,
                vec![low],
                ElementStatus::Sorted,
                format!("Position {low} is sorted"),
                "Single element range is already sorted.".to_owned(),
            );
        }
        _ => {
            let last = high - 1;
            rec.step(
                ComparisonPhase::Split,
                (low..high).collect(),
                ElementStatus::Comparing,
                format!("Processing Range [{low}-{last}]"),
                format!(
                    "Recursively sorting the sub-array from index {low} to {last}. First, we partition."
                ),
            );
            let pivot_at = partition(rec, low, last, order);
            sort_range(rec, low, pivot_at, order);
            sort_range(rec, pivot_at + 1, high, order);
        }
    }
}

/// Partition `low..=high` around the value at `high`; returns where the
/// pivot lands.
fn partition(rec: &mut Recorder, low: usize, high: usize, order: SortOrder) -> usize {
    let pivot = rec.value(high).clone();
    let symbol = match order {
        SortOrder::Asc => '<',
        SortOrder::Desc => '>',
    };
    rec.step(
        ComparisonPhase::Partition,
        vec![high],
        ElementStatus::Pivot,
        format!("Chosen pivot: {pivot}"),
        format!(
            "Everything {} than pivot will move to left.",
            order.extreme_adjective()
        ),
    );

    // Next free slot of the "before pivot" zone.
    let mut store = low;
    for j in low..high {
        let current = rec.value(j).clone();
        let before = order.precedes(&current, &pivot);
        rec.emit(
            ComparisonPhase::Compare,
            vec![j, high],
            &[(j, ElementStatus::Comparing), (high, ElementStatus::Pivot)],
            format!("Comparing {current} with pivot {pivot}"),
            format!(
                "Is {current} {symbol} {pivot}? {}.",
                if before { "Yes" } else { "No" }
            ),
        );
        if before {
            if store != j {
                rec.swap(store, j);
                rec.emit(
                    ComparisonPhase::Swap,
                    vec![store, j],
                    &[
                        (store, ElementStatus::Swapping),
                        (j, ElementStatus::Swapping),
                        (high, ElementStatus::Pivot),
                    ],
                    format!(
                        "Swapping {} (idx {store}) and {} (idx {j})",
                        rec.value(store),
                        rec.value(j)
                    ),
                    format!(
                        "Since the condition was met, we move {current} to the '{}' partition (left side).",
                        order.extreme_adjective()
                    ),
                );
            }
            store += 1;
        }
    }

    rec.mark_sorted(store);
    if store != high {
        rec.swap(store, high);
        rec.emit(
            ComparisonPhase::Swap,
            vec![store, high],
            &[(high, ElementStatus::Swapping), (store, ElementStatus::Sorted)],
            format!("Placing Pivot {pivot} at correct index {store}"),
            "Pivot now sits between the partition that sorts before it and the one that sorts after it. It is sorted."
                .to_owned(),
        );
    } else {
        rec.step(
            ComparisonPhase::Overwrite,
            vec![store],
            ElementStatus::Sorted,
            format!("Pivot {pivot} stays at index {store}"),
            "Nothing is on the pivot's right side, so it is already in its sorted position."
                .to_owned(),
        );
    }
    store
}
