#![forbid(unsafe_code)]

use std::fmt;

use sortviz_core::InputError;

/// Errors reported at the controller boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    /// Autoplay speed must be a positive number of milliseconds.
    InvalidSpeed { speed_ms: u64 },
    /// The input is outside the engine's domain.
    Input(InputError),
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSpeed { speed_ms } => {
                write!(f, "invalid autoplay speed {speed_ms}ms: must be positive")
            }
            Self::Input(err) => write!(f, "invalid input: {err}"),
        }
    }
}

impl std::error::Error for PlaybackError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Input(err) => Some(err),
            Self::InvalidSpeed { .. } => None,
        }
    }
}

impl From<InputError> for PlaybackError {
    fn from(err: InputError) -> Self {
        Self::Input(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn display_messages() {
        let err = PlaybackError::InvalidSpeed { speed_ms: 0 };
        assert_eq!(err.to_string(), "invalid autoplay speed 0ms: must be positive");

        let err = PlaybackError::from(InputError::MixedTypes { index: 2 });
        assert!(err.to_string().starts_with("invalid input: "));
        assert!(err.source().is_some());
    }
}
