#![forbid(unsafe_code)]

//! Whole-trace utilities shared by both step types.
//!
//! [`fingerprint`] is a stable FNV-1a checksum over the observable content of
//! a step list, suitable for golden comparisons and determinism checks.

use crate::comparison::ComparisonStep;
use crate::radix::RadixStep;
use crate::value::{ElementId, SortValue};

/// The parts of a step that identify it in a trace.
pub trait TraceStep {
    /// Stable lowercase phase name.
    fn phase_name(&self) -> &'static str;
    /// Positions the step focuses on.
    fn focus(&self) -> Vec<usize>;
    fn values(&self) -> Vec<SortValue>;
    fn ids(&self) -> Vec<ElementId>;
    fn explanation(&self) -> &str;
}

impl TraceStep for ComparisonStep {
    fn phase_name(&self) -> &'static str {
        self.phase.as_str()
    }

    fn focus(&self) -> Vec<usize> {
        self.indices.clone()
    }

    fn values(&self) -> Vec<SortValue> {
        ComparisonStep::values(self)
    }

    fn ids(&self) -> Vec<ElementId> {
        ComparisonStep::ids(self)
    }

    fn explanation(&self) -> &str {
        &self.explanation
    }
}

impl TraceStep for RadixStep {
    fn phase_name(&self) -> &'static str {
        self.phase.as_str()
    }

    fn focus(&self) -> Vec<usize> {
        self.current_element_index.into_iter().collect()
    }

    fn values(&self) -> Vec<SortValue> {
        RadixStep::values(self)
    }

    fn ids(&self) -> Vec<ElementId> {
        RadixStep::ids(self)
    }

    fn explanation(&self) -> &str {
        &self.explanation
    }
}

const FNV_OFFSET: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

struct Fnv(u64);

impl Fnv {
    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.0 ^= u64::from(byte);
            self.0 = self.0.wrapping_mul(FNV_PRIME);
        }
    }

    fn write_usize(&mut self, n: usize) {
        self.write(&(n as u64).to_le_bytes());
    }

    fn write_str(&mut self, s: &str) {
        self.write_usize(s.len());
        self.write(s.as_bytes());
    }

    fn write_value(&mut self, value: &SortValue) {
        match value {
            SortValue::Int(n) => {
                self.write(&[0]);
                self.write(&n.to_le_bytes());
            }
            SortValue::Text(s) => {
                self.write(&[1]);
                self.write_str(s);
            }
        }
    }
}

/// FNV-1a checksum of a trace.
///
/// Covers each step's phase, focus positions, values, ids and explanation.
/// Stable across platforms.
#[must_use]
pub fn fingerprint<S: TraceStep>(steps: &[S]) -> u64 {
    let mut hash = Fnv(FNV_OFFSET);
    hash.write_usize(steps.len());
    for step in steps {
        hash.write_str(step.phase_name());

        let focus = step.focus();
        hash.write_usize(focus.len());
        for index in focus {
            hash.write_usize(index);
        }

        let values = step.values();
        hash.write_usize(values.len());
        for value in &values {
            hash.write_value(value);
        }
        for id in step.ids() {
            hash.write_usize(id.0);
        }

        hash.write_str(step.explanation());
    }
    hash.0
}

/// [`fingerprint`] as a fixed-width hex string.
#[must_use]
pub fn fingerprint_hex<S: TraceStep>(steps: &[S]) -> String {
    format!("{:016x}", fingerprint(steps))
}

/// Export a trace as JSON lines, one step per line.
#[cfg(feature = "serde")]
pub fn to_jsonl<S: serde::Serialize>(steps: &[S]) -> Result<String, serde_json::Error> {
    let lines = steps
        .iter()
        .map(serde_json::to_string)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(lines.join("\n"))
}
