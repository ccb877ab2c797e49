#![forbid(unsafe_code)]

use super::recorder::Recorder;
use super::{ComparisonPhase, ElementStatus};
use crate::value::SortOrder;

pub(super) fn run(rec: &mut Recorder, order: SortOrder) {
    let n = rec.len();
    let noun = order.extreme_noun();
    for i in 0..n {
        let mut best = i;
        rec.step(
            ComparisonPhase::Select,
            vec![i],
            ElementStatus::Pivot,
            format!("Current {noun}: {}", rec.value(i)),
            format!("Assume the first unsorted element is the {noun}."),
        );

        for j in i + 1..n {
            rec.emit(
                ComparisonPhase::Compare,
                vec![best, j],
                &[(best, ElementStatus::Pivot), (j, ElementStatus::Comparing)],
                format!(
                    "Comparing {} with current {noun} {}",
                    rec.value(j),
                    rec.value(best)
                ),
                format!(
                    "Looking for a value {} than {}.",
                    order.extreme_adjective(),
                    rec.value(best)
                ),
            );

            if order.precedes(rec.value(j), rec.value(best)) {
                best = j;
                let superlative = match order {
                    SortOrder::Asc => "smallest",
                    SortOrder::Desc => "largest",
                };
                rec.step(
                    ComparisonPhase::Select,
                    vec![best],
                    ElementStatus::Pivot,
                    format!("Found new {noun}: {}", rec.value(best)),
                    format!("Updating our record of the {superlative} element found so far."),
                );
            }
        }

        if best != i {
            rec.swap(i, best);
            rec.step(
                ComparisonPhase::Swap,
                vec![i, best],
                ElementStatus::Swapping,
                format!("Swapping {} with {}", rec.value(i), rec.value(best)),
                format!("Moving the {noun} of the unsorted part to position {i}."),
            );
        }

        rec.mark_sorted(i);
    }
}
