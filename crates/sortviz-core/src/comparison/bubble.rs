#![forbid(unsafe_code)]

use super::recorder::Recorder;
use super::{ComparisonPhase, ElementStatus};
use crate::value::SortOrder;

pub(super) fn run(rec: &mut Recorder, order: SortOrder) {
    let n = rec.len();
    for pass in 0..n - 1 {
        let mut swapped = false;
        for j in 0..n - pass - 1 {
            let (a, b) = (rec.value(j).clone(), rec.value(j + 1).clone());
            rec.step(
                ComparisonPhase::Compare,
                vec![j, j + 1],
                ElementStatus::Comparing,
                format!("Comparing {a} and {b}"),
                format!("Checking if {a} should come after {b}."),
            );
            if order.should_place_later(&a, &b) {
                rec.swap(j, j + 1);
                swapped = true;
                let relation = match order {
                    SortOrder::Asc => "greater",
                    SortOrder::Desc => "smaller",
                };
                rec.step(
                    ComparisonPhase::Swap,
                    vec![j, j + 1],
                    ElementStatus::Swapping,
                    format!("Swapping {a} and {b}"),
                    format!("{a} is {relation} than {b}, so we swap them."),
                );
            }
        }

        let fixed = n - 1 - pass;
        rec.mark_sorted(fixed);
        let extreme = match order {
            SortOrder::Asc => "largest",
            SortOrder::Desc => "smallest",
        };
        rec.step(
            ComparisonPhase::Sorted,
            vec![fixed],
            ElementStatus::Sorted,
            format!("{} is now sorted", rec.value(fixed)),
            format!("The {extreme} remaining element has bubbled up to its correct position."),
        );

        if !swapped {
            rec.mark_all_sorted();
            rec.step(
                ComparisonPhase::EarlyExit,
                Vec::new(),
                ElementStatus::Sorted,
                "Optimization triggered".to_owned(),
                "No swaps occurred in this pass, so the array is already sorted.".to_owned(),
            );
            break;
        }
    }
}
