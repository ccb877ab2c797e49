#![forbid(unsafe_code)]

use super::recorder::Recorder;
use super::{ComparisonPhase, ElementStatus};
use crate::value::SortOrder;

pub(super) fn run(rec: &mut Recorder, order: SortOrder) {
    let n = rec.len();
    let relation = match order {
        SortOrder::Asc => "larger",
        SortOrder::Desc => "smaller",
    };
    rec.mark_sorted(0);

    for i in 1..n {
        let key = rec.value(i).clone();
        rec.step(
            ComparisonPhase::Select,
            vec![i],
            ElementStatus::Pivot,
            format!("Selected {key} to insert"),
            "Taking the next unsorted element to place it in the sorted portion.".to_owned(),
        );

        // `pos` tracks where the key currently sits while it walks left.
        let mut pos = i;
        while pos > 0 {
            let left = rec.value(pos - 1).clone();
            let shift = order.should_place_later(&left, &key);
            let detail = if shift {
                format!("{left} is {relation} than {key}, so we shift it.")
            } else {
                format!("{left} is not {relation} than {key}, so {key} stays here.")
            };
            rec.step(
                ComparisonPhase::Compare,
                vec![pos - 1, pos],
                ElementStatus::Comparing,
                format!("Comparing {left} with key {key}"),
                detail,
            );
            if !shift {
                break;
            }
            rec.swap(pos - 1, pos);
            rec.step(
                ComparisonPhase::Swap,
                vec![pos - 1, pos],
                ElementStatus::Swapping,
                format!("Shifting {left} right"),
                "Moving sorted element to make space.".to_owned(),
            );
            pos -= 1;
        }

        rec.mark_prefix_sorted(i + 1);
        rec.step(
            ComparisonPhase::Overwrite,
            vec![pos],
            ElementStatus::Sorted,
            format!("Inserted {key} at position {pos}"),
            "Element is now in its correct sorted position.".to_owned(),
        );
    }
}
