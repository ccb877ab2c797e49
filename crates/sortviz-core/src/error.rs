#![forbid(unsafe_code)]

//! Input contract errors.
//!
//! The generators themselves are total; these errors are reported by the
//! `validate` functions callers run before handing values to an engine.

use std::fmt;

/// Why an input sequence falls outside an engine's domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// The sequence mixes integers and text.
    MixedTypes {
        /// Position of the first value whose type differs from the first value.
        index: usize,
    },
    /// Digit-mode radix sort only handles non-negative integers.
    NegativeValue { index: usize, value: i64 },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MixedTypes { index } => write!(
                f,
                "value at position {index} has a different type than the first value"
            ),
            Self::NegativeValue { index, value } => write!(
                f,
                "value {value} at position {index} is negative; radix digits must be non-negative"
            ),
        }
    }
}

impl std::error::Error for InputError {}

/// Checks that every value has the same variant as the first one.
pub fn check_homogeneous(values: &[crate::SortValue]) -> Result<(), InputError> {
    let Some(first) = values.first() else {
        return Ok(());
    };
    match values.iter().position(|v| v.is_text() != first.is_text()) {
        Some(index) => Err(InputError::MixedTypes { index }),
        None => Ok(()),
    }
}
