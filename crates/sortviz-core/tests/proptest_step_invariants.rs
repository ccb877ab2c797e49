//! Property-based invariant tests for both step generators.
//!
//! 1. The last comparison step holds the input sorted in the requested order.
//! 2. The first step is `Initial` with the untouched input; `Initial` and
//!    `Complete` never appear anywhere else.
//! 3. Every snapshot is a permutation of the input ids.
//! 4. Compare-step counts stay within each algorithm's bound.
//! 5. Merge sort keeps equal values in input order.
//! 6. Radix sort matches a stable reference sort, ids included.
//! 7. Generation is deterministic.

use proptest::prelude::*;
use sortviz_core::comparison::{self, ComparisonPhase, ElementStatus, SortAlgorithm};
use sortviz_core::radix::{self, RadixPhase};
use sortviz_core::{ElementId, SortOrder, SortValue, fingerprint};

// ── Helpers ─────────────────────────────────────────────────────────────

fn int_values() -> impl Strategy<Value = Vec<SortValue>> {
    prop::collection::vec(-50i64..50, 0..16)
        .prop_map(|v| v.into_iter().map(SortValue::Int).collect())
}

fn radix_ints() -> impl Strategy<Value = Vec<SortValue>> {
    prop::collection::vec(0i64..2000, 0..14)
        .prop_map(|v| v.into_iter().map(SortValue::Int).collect())
}

fn radix_texts() -> impl Strategy<Value = Vec<SortValue>> {
    prop::collection::vec("[a-c]{0,3}", 0..10)
        .prop_map(|v| v.into_iter().map(SortValue::Text).collect())
}

fn algorithm() -> impl Strategy<Value = SortAlgorithm> {
    prop::sample::select(SortAlgorithm::ALL.to_vec())
}

fn order() -> impl Strategy<Value = SortOrder> {
    prop_oneof![Just(SortOrder::Asc), Just(SortOrder::Desc)]
}

fn sorted(values: &[SortValue], order: SortOrder) -> Vec<SortValue> {
    let mut out = values.to_vec();
    out.sort();
    if order == SortOrder::Desc {
        out.reverse();
    }
    out
}

/// Input positions stably sorted by `key`, reversed key order for `Desc`.
fn stable_reference<K: Ord>(
    values: &[SortValue],
    order: SortOrder,
    key: impl Fn(&SortValue) -> K,
) -> Vec<ElementId> {
    let mut idx: Vec<usize> = (0..values.len()).collect();
    idx.sort_by(|&a, &b| {
        let ord = key(&values[a]).cmp(&key(&values[b]));
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
    idx.into_iter().map(ElementId).collect()
}

fn right_aligned_key(value: &SortValue) -> (usize, String) {
    let label = value.label();
    (label.chars().count(), label)
}

fn id_set(n: usize) -> Vec<ElementId> {
    (0..n).map(ElementId).collect()
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Comparison sorts end sorted
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn comparison_final_step_is_sorted(
        values in int_values(),
        algorithm in algorithm(),
        order in order(),
    ) {
        let steps = comparison::generate(&values, algorithm, order);
        let last = steps.last().unwrap();
        prop_assert_eq!(last.phase, ComparisonPhase::Complete);
        prop_assert_eq!(last.values(), sorted(&values, order), "{} {}", algorithm, order);
        prop_assert!(last.array.iter().all(|e| e.status == ElementStatus::Sorted));
    }

    #[test]
    fn comparison_sorts_text(
        values in prop::collection::vec("[a-d]{0,3}", 0..10),
        algorithm in algorithm(),
        order in order(),
    ) {
        let values: Vec<SortValue> = values.into_iter().map(SortValue::Text).collect();
        let steps = comparison::generate(&values, algorithm, order);
        prop_assert_eq!(steps.last().unwrap().values(), sorted(&values, order));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Initial and Complete bracket the trace
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn comparison_trace_is_bracketed(
        values in int_values(),
        algorithm in algorithm(),
        order in order(),
    ) {
        let steps = comparison::generate(&values, algorithm, order);
        prop_assert!(steps.len() >= 2);
        prop_assert_eq!(steps[0].phase, ComparisonPhase::Initial);
        prop_assert_eq!(steps[0].values(), values.clone());
        prop_assert!(steps[0].array.iter().all(|e| e.status == ElementStatus::Default));
        prop_assert!(steps[0].indices.is_empty());

        let inner = &steps[1..steps.len() - 1];
        let bracketed_once = inner
            .iter()
            .all(|s| s.phase != ComparisonPhase::Initial && s.phase != ComparisonPhase::Complete);
        prop_assert!(bracketed_once);
        if values.len() <= 1 {
            prop_assert_eq!(steps.len(), 2);
        }
    }

    #[test]
    fn radix_trace_is_bracketed(values in radix_ints(), order in order()) {
        let steps = radix::generate(&values, order);
        prop_assert_eq!(steps[0].phase, RadixPhase::Initial);
        prop_assert_eq!(steps[0].values(), values.clone());
        prop_assert!(steps[0].array.iter().all(|e| !e.is_active));
        let last = steps.last().unwrap();
        prop_assert_eq!(last.phase, RadixPhase::Complete);
        prop_assert!(last.buckets.is_empty());

        let passes = if values.is_empty() { 0 } else { radix::max_positions(&values) };
        prop_assert_eq!(steps.len(), 2 + passes * (values.len() + 1));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Snapshots are permutations
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn comparison_snapshots_are_permutations(
        values in int_values(),
        algorithm in algorithm(),
        order in order(),
    ) {
        let n = values.len();
        for step in comparison::generate(&values, algorithm, order) {
            let mut ids = step.ids();
            ids.sort();
            prop_assert_eq!(ids, id_set(n));
            prop_assert!(step.indices.iter().all(|&i| i < n), "{:?}", step.indices);
        }
    }

    #[test]
    fn radix_snapshots_are_permutations(values in radix_ints(), order in order()) {
        let n = values.len();
        for step in radix::generate(&values, order) {
            let mut ids = step.ids();
            ids.sort();
            prop_assert_eq!(ids, id_set(n));
            if step.phase == RadixPhase::Distribute {
                let active = step.array.iter().filter(|e| e.is_active).count();
                prop_assert_eq!(active, 1);
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Compare-step bounds
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn compare_counts_are_bounded(
        values in int_values(),
        algorithm in algorithm(),
        order in order(),
    ) {
        let n = values.len();
        let steps = comparison::generate(&values, algorithm, order);
        let compares = steps.iter().filter(|s| s.phase == ComparisonPhase::Compare).count();
        let quadratic = n * n.saturating_sub(1) / 2;
        let bound = match algorithm {
            SortAlgorithm::Merge => {
                let depth = if n <= 1 { 0 } else { (n - 1).ilog2() as usize + 1 };
                n * depth
            }
            _ => quadratic,
        };
        prop_assert!(compares <= bound, "{} compares for n={} with {}", compares, n, algorithm);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Merge stability
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn merge_keeps_equal_values_in_input_order(
        values in prop::collection::vec(0i64..4, 0..14),
        order in order(),
    ) {
        let values: Vec<SortValue> = values.into_iter().map(SortValue::Int).collect();
        let steps = comparison::generate(&values, SortAlgorithm::Merge, order);
        let expected = stable_reference(&values, order, SortValue::clone);
        prop_assert_eq!(steps.last().unwrap().ids(), expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Radix matches a stable reference
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn radix_numeric_matches_stable_sort(values in radix_ints(), order in order()) {
        let steps = radix::generate(&values, order);
        let last = steps.last().unwrap();
        prop_assert_eq!(last.values(), sorted(&values, order));
        prop_assert_eq!(last.ids(), stable_reference(&values, order, SortValue::clone));
    }

    #[test]
    fn radix_text_matches_right_aligned_order(values in radix_texts(), order in order()) {
        let steps = radix::generate(&values, order);
        prop_assert_eq!(
            steps.last().unwrap().ids(),
            stable_reference(&values, order, right_aligned_key)
        );
    }

    #[test]
    fn radix_collect_feeds_next_pass(values in radix_ints(), order in order()) {
        let steps = radix::generate(&values, order);
        for pair in steps.windows(2) {
            if pair[0].phase == RadixPhase::Collect {
                prop_assert_eq!(pair[1].ids(), pair[0].ids());
                prop_assert!(pair[0].buckets.iter().all(|b| b.elements.is_empty()));
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Determinism
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn generation_is_deterministic(
        values in int_values(),
        algorithm in algorithm(),
        order in order(),
    ) {
        let a = comparison::generate(&values, algorithm, order);
        let b = comparison::generate(&values, algorithm, order);
        prop_assert_eq!(fingerprint(&a), fingerprint(&b));
        prop_assert_eq!(a, b);
    }

    #[test]
    fn radix_digit_generation_is_deterministic(values in radix_ints(), order in order()) {
        let a = radix::generate(&values, order);
        let b = radix::generate(&values, order);
        prop_assert_eq!(fingerprint(&a), fingerprint(&b));
        prop_assert_eq!(a, b);
    }

    #[test]
    fn radix_character_generation_is_deterministic(values in radix_texts(), order in order()) {
        let a = radix::generate(&values, order);
        let b = radix::generate(&values, order);
        prop_assert_eq!(fingerprint(&a), fingerprint(&b));
        prop_assert_eq!(a, b);
    }

    #[test]
    fn input_is_never_modified(values in int_values(), algorithm in algorithm()) {
        let before = values.clone();
        let _ = comparison::generate(&values, algorithm, SortOrder::Desc);
        let _ = radix::generate(&values, SortOrder::Desc);
        prop_assert_eq!(values, before);
    }
}
