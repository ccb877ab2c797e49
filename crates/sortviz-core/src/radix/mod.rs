#![forbid(unsafe_code)]

//! Step generator for LSD radix sort.
//!
//! Positions are processed from least significant upward. Each pass
//! distributes the current sequence into buckets one element at a time and
//! then collects the buckets back into a flat sequence that feeds the next
//! pass. Appending to the end of a bucket keeps equal keys in their previous
//! relative order, which is what makes the passes compose.
//!
//! Numbers use a fixed `0..=9` bucket row. Strings use the sorted set of
//! distinct characters present at the current position, with
//! [`BucketKey::Empty`] for strings that are too short.
//!
//! Descending order reads the buckets back to front during collection; key
//! comparison itself is never inverted.

mod key;

pub use key::{BucketKey, RadixMode, detect_mode, key_at, max_positions, position_name};

use crate::error::{InputError, check_homogeneous};
use crate::value::{ElementId, SortOrder, SortValue};

/// One element of a radix-sort snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RadixElement {
    pub value: SortValue,
    pub id: ElementId,
    pub is_active: bool,
    /// Key extracted for the current position, while the element is active.
    pub current_digit: Option<BucketKey>,
}

impl RadixElement {
    pub fn new(value: SortValue, id: ElementId) -> Self {
        Self {
            value,
            id,
            is_active: false,
            current_digit: None,
        }
    }

    fn activated(&self, key: BucketKey) -> Self {
        Self {
            is_active: true,
            current_digit: Some(key),
            ..self.clone()
        }
    }

    fn settled(&self) -> Self {
        Self {
            is_active: false,
            current_digit: None,
            ..self.clone()
        }
    }
}

/// A distribution target for one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bucket {
    pub key: BucketKey,
    pub label: String,
    pub elements: Vec<RadixElement>,
}

impl Bucket {
    fn new(key: BucketKey) -> Self {
        Self {
            key,
            label: key.label(),
            elements: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RadixPhase {
    Initial,
    Distribute,
    Collect,
    Complete,
}

impl RadixPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::Distribute => "distribute",
            Self::Collect => "collect",
            Self::Complete => "complete",
        }
    }
}

/// One immutable snapshot of a radix sort's progress.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RadixStep {
    pub phase: RadixPhase,
    /// 0 = least significant position.
    pub digit_position: usize,
    pub digit_name: String,
    pub array: Vec<RadixElement>,
    pub buckets: Vec<Bucket>,
    /// Element being distributed, for `Distribute` steps.
    pub current_element_index: Option<usize>,
    pub explanation: String,
    pub detailed_explanation: String,
}

impl RadixStep {
    pub fn values(&self) -> Vec<SortValue> {
        self.array.iter().map(|e| e.value.clone()).collect()
    }

    pub fn ids(&self) -> Vec<ElementId> {
        self.array.iter().map(|e| e.id).collect()
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.phase == RadixPhase::Complete
    }
}

/// Radix input must be homogeneous, and numbers must be non-negative.
pub fn validate(values: &[SortValue]) -> Result<(), InputError> {
    check_homogeneous(values)?;
    if detect_mode(values) == RadixMode::Digits {
        for (index, value) in values.iter().enumerate() {
            if let SortValue::Int(n) = value
                && *n < 0
            {
                return Err(InputError::NegativeValue { index, value: *n });
            }
        }
    }
    Ok(())
}

/// Generate the full radix trace for `values`.
///
/// Ids come from input positions and stay attached to their element across
/// passes. Negative numbers are outside the digit domain (see [`validate`]);
/// their keys are taken from the magnitude.
pub fn generate(values: &[SortValue], order: SortOrder) -> Vec<RadixStep> {
    let mode = detect_mode(values);
    let positions = max_positions(values);
    let span = crate::debug_span!(
        "radix.generate",
        mode = ?mode,
        order = order.as_str(),
        n = values.len(),
        positions
    );
    let _guard = span.enter();

    let n = values.len();
    let mut current: Vec<RadixElement> = values
        .iter()
        .enumerate()
        .map(|(i, v)| RadixElement::new(v.clone(), ElementId::from_index(i)))
        .collect();
    let mut steps = Vec::with_capacity(2 + positions * (n + 1));

    steps.push(RadixStep {
        phase: RadixPhase::Initial,
        digit_position: 0,
        digit_name: position_name(0, mode),
        array: current.clone(),
        buckets: Vec::new(),
        current_element_index: None,
        explanation: "Initial array ready for sorting".to_owned(),
        detailed_explanation: initial_detail(mode, n, positions),
    });

    if !current.is_empty() {
        for position in 0..positions {
            current = run_pass(&mut steps, current, position, positions, mode, order);
        }
    }

    steps.push(RadixStep {
        phase: RadixPhase::Complete,
        digit_position: positions - 1,
        digit_name: "complete".to_owned(),
        array: current.iter().map(RadixElement::settled).collect(),
        buckets: Vec::new(),
        current_element_index: None,
        explanation: "Sorting complete!".to_owned(),
        detailed_explanation: format!(
            "The array is now fully sorted! We processed {positions} position(s). \
             Radix Sort's time complexity is O(d × n) where d is the number of positions \
             and n is the number of elements."
        ),
    });

    crate::debug!(steps = steps.len(), "radix trace generated");
    steps
}

/// Distribute `current` by the key at `position`, then collect. Returns the
/// collected sequence.
fn run_pass(
    steps: &mut Vec<RadixStep>,
    current: Vec<RadixElement>,
    position: usize,
    positions: usize,
    mode: RadixMode,
    order: SortOrder,
) -> Vec<RadixElement> {
    let name = position_name(position, mode);
    let keys: Vec<BucketKey> = current
        .iter()
        .map(|e| key_at(&e.value, position, mode))
        .collect();
    let mut buckets = bucket_row(mode, &keys);
    crate::trace!(position, buckets = buckets.len(), "radix pass");

    for (index, (element, &key)) in current.iter().zip(&keys).enumerate() {
        let slot = match buckets.binary_search_by_key(&key, |b| b.key) {
            Ok(slot) => slot,
            Err(slot) => {
                buckets.insert(slot, Bucket::new(key));
                slot
            }
        };
        buckets[slot].elements.push(element.activated(key));

        let array = current
            .iter()
            .enumerate()
            .map(|(i, e)| if i == index { e.activated(key) } else { e.settled() })
            .collect();
        let label = buckets[slot].label.clone();
        steps.push(RadixStep {
            phase: RadixPhase::Distribute,
            digit_position: position,
            digit_name: name.clone(),
            array,
            buckets: buckets.clone(),
            current_element_index: Some(index),
            explanation: format!("Moving {} to bucket {label}", element.value),
            detailed_explanation: distribute_detail(&element.value, key, &name, mode),
        });
    }

    let collected: Vec<RadixElement> = match order {
        SortOrder::Asc => buckets
            .iter()
            .flat_map(|b| &b.elements)
            .map(RadixElement::settled)
            .collect(),
        SortOrder::Desc => buckets
            .iter()
            .rev()
            .flat_map(|b| &b.elements)
            .map(RadixElement::settled)
            .collect(),
    };

    let next = if position + 1 < positions {
        format!("Next, we'll process the {}.", position_name(position + 1, mode))
    } else {
        "This was the last position!".to_owned()
    };
    let direction = match order {
        SortOrder::Asc => "in order",
        SortOrder::Desc => "in reverse order",
    };
    steps.push(RadixStep {
        phase: RadixPhase::Collect,
        digit_position: position,
        digit_name: name.clone(),
        array: collected.clone(),
        buckets: buckets.iter().map(|b| Bucket::new(b.key)).collect(),
        current_element_index: None,
        explanation: format!("Collected all elements from buckets ({name} pass complete)"),
        detailed_explanation: format!(
            "We've now collected all elements from the buckets {direction}. After processing the \
             {name}, the array is partially sorted. {next}"
        ),
    });

    collected
}

/// Bucket row for one pass, in ascending key order.
fn bucket_row(mode: RadixMode, keys: &[BucketKey]) -> Vec<Bucket> {
    match mode {
        RadixMode::Digits => (0..=9u8).map(|d| Bucket::new(BucketKey::Digit(d))).collect(),
        RadixMode::Characters => {
            let mut present = keys.to_vec();
            present.sort_unstable();
            present.dedup();
            present.into_iter().map(Bucket::new).collect()
        }
    }
}

fn initial_detail(mode: RadixMode, n: usize, positions: usize) -> String {
    match mode {
        RadixMode::Digits => format!(
            "We have {n} numbers to sort. The largest number has {positions} digit(s), so we'll \
             process {positions} digit position(s) from right to left (units → tens → hundreds...)."
        ),
        RadixMode::Characters => format!(
            "We have {n} strings to sort. The longest string has {positions} character(s), so \
             we'll process {positions} position(s) from the last character to the first. Strings \
             too short for a position go into the Empty bucket."
        ),
    }
}

fn distribute_detail(value: &SortValue, key: BucketKey, name: &str, mode: RadixMode) -> String {
    let label = key.label();
    let observed = match (mode, key) {
        (RadixMode::Digits, _) => {
            format!("Looking at the {name} digit of {value}: the digit is {label}")
        }
        (RadixMode::Characters, BucketKey::Empty) => format!("{value} has no {name}"),
        (RadixMode::Characters, _) => format!("Looking at the {name} of {value}: it is {key}"),
    };
    format!(
        "{observed}, so we place {value} into bucket {label}. This maintains the relative order \
         from previous passes (stability)."
    )
}
