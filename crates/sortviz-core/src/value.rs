#![forbid(unsafe_code)]

//! Values, sort order, and element identity shared by both engines.

use std::cmp::Ordering;
use std::fmt;

/// One value of the working sequence.
///
/// A run is homogeneous: either every value is an integer or every value is
/// text. Integers compare by magnitude, text by codepoint order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum SortValue {
    Int(i64),
    Text(String),
}

impl SortValue {
    /// Returns `true` for the text variant.
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// The value without explanation quoting.
    pub fn label(&self) -> String {
        match self {
            Self::Int(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

/// Formats the value the way explanations quote it: integers bare, text in
/// double quotes.
impl fmt::Display for SortValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "\"{s}\""),
        }
    }
}

impl From<i64> for SortValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for SortValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for SortValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for SortValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Requested sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Returns `true` when `a` is out of order relative to `b`, i.e. `a` must
    /// be placed after `b`.
    #[inline]
    pub fn should_place_later(self, a: &SortValue, b: &SortValue) -> bool {
        match self {
            Self::Asc => a > b,
            Self::Desc => a < b,
        }
    }

    /// Strict "belongs before" test used by selection and quick sort.
    #[inline]
    pub fn precedes(self, a: &SortValue, b: &SortValue) -> bool {
        self.should_place_later(b, a)
    }

    /// Orders two values under this direction.
    #[inline]
    pub fn compare(self, a: &SortValue, b: &SortValue) -> Ordering {
        match self {
            Self::Asc => a.cmp(b),
            Self::Desc => b.cmp(a),
        }
    }

    /// "smaller" for ascending, "larger" for descending.
    pub fn extreme_adjective(self) -> &'static str {
        match self {
            Self::Asc => "smaller",
            Self::Desc => "larger",
        }
    }

    /// "minimum" for ascending, "maximum" for descending.
    pub fn extreme_noun(self) -> &'static str {
        match self {
            Self::Asc => "minimum",
            Self::Desc => "maximum",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Parses `asc`/`ascending`/`desc`/`descending`, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(Self::Asc),
            "desc" | "descending" => Some(Self::Desc),
            _ => None,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable identity of one logical element.
///
/// Assigned from the input position when a run is created and carried with
/// the element through every reorder, so a renderer can follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementId(pub usize);

impl ElementId {
    /// Id for the element created from input position `index`.
    #[inline]
    pub fn from_index(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
