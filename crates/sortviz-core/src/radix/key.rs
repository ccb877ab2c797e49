#![forbid(unsafe_code)]

//! Bucket keys and per-position key extraction.

use std::fmt;

use crate::value::SortValue;

/// Which key space a run distributes over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RadixMode {
    /// Decimal digits of non-negative integers.
    Digits,
    /// Characters counted from the end of each string.
    Characters,
}

/// Key of one bucket.
///
/// The derived order puts [`BucketKey::Empty`] below every real key, so
/// strings that are too short for a position sort first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", content = "key", rename_all = "lowercase"))]
pub enum BucketKey {
    /// Padding for strings shorter than the current position.
    Empty,
    Digit(u8),
    Char(char),
}

impl BucketKey {
    /// Display label for the bucket row.
    pub fn label(self) -> String {
        match self {
            Self::Empty => "Empty".to_owned(),
            Self::Digit(d) => d.to_string(),
            Self::Char(c) => c.to_string(),
        }
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Digit(d) => write!(f, "{d}"),
            Self::Char(c) => write!(f, "'{c}'"),
        }
    }
}

/// Any text value switches the whole run to character mode.
pub fn detect_mode(values: &[SortValue]) -> RadixMode {
    if values.iter().any(SortValue::is_text) {
        RadixMode::Characters
    } else {
        RadixMode::Digits
    }
}

/// Number of positions the run processes; never less than 1.
pub fn max_positions(values: &[SortValue]) -> usize {
    match detect_mode(values) {
        RadixMode::Digits => {
            let max = values
                .iter()
                .map(|v| match v {
                    SortValue::Int(n) => n.unsigned_abs(),
                    SortValue::Text(_) => 0,
                })
                .max()
                .unwrap_or(0);
            digit_count(max)
        }
        RadixMode::Characters => values
            .iter()
            .map(char_len)
            .max()
            .unwrap_or(0)
            .max(1),
    }
}

/// Decimal digits in `n`, with 0 counted as one digit.
fn digit_count(n: u64) -> usize {
    match n.checked_ilog10() {
        Some(log) => log as usize + 1,
        None => 1,
    }
}

fn char_len(value: &SortValue) -> usize {
    match value {
        SortValue::Text(s) => s.chars().count(),
        SortValue::Int(n) => n.to_string().chars().count(),
    }
}

/// Key of `value` at `position` (0 = least significant).
pub fn key_at(value: &SortValue, position: usize, mode: RadixMode) -> BucketKey {
    match mode {
        RadixMode::Digits => {
            let n = match value {
                SortValue::Int(n) => n.unsigned_abs(),
                SortValue::Text(_) => 0,
            };
            let shifted = u32::try_from(position)
                .ok()
                .and_then(|p| 10u64.checked_pow(p))
                .map_or(0, |scale| n / scale);
            BucketKey::Digit((shifted % 10) as u8)
        }
        RadixMode::Characters => {
            let label = value.label();
            label
                .chars()
                .rev()
                .nth(position)
                .map_or(BucketKey::Empty, BucketKey::Char)
        }
    }
}

/// Name of a position as shown in explanations.
pub fn position_name(position: usize, mode: RadixMode) -> String {
    const DIGIT_NAMES: [&str; 5] = ["units", "tens", "hundreds", "thousands", "ten-thousands"];
    match mode {
        RadixMode::Digits => DIGIT_NAMES
            .get(position)
            .map_or_else(|| format!("10^{position}"), |name| (*name).to_owned()),
        RadixMode::Characters => format!("character {} from the right", position + 1),
    }
}
