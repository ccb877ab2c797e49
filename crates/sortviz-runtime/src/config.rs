#![forbid(unsafe_code)]

//! Playback configuration.
//!
//! Each engine has its own defaults: comparison sorts tick every 500 ms,
//! radix sort every 1000 ms. Environment overrides:
//!
//! | Variable | Meaning |
//! |---|---|
//! | `SORTVIZ_SPEED_MS` | autoplay interval in milliseconds (positive) |
//! | `SORTVIZ_ORDER` | `asc` or `desc` |
//!
//! Unparseable overrides are logged and ignored.

use std::time::Duration;

use sortviz_core::{SortAlgorithm, SortOrder};

use crate::error::PlaybackError;

pub const COMPARISON_SPEED_MS: u64 = 500;
pub const RADIX_SPEED_MS: u64 = 1000;

/// Speed, order and algorithm for one controller.
///
/// `A` is the engine's algorithm selector: [`SortAlgorithm`] for comparison
/// sorts and `()` for radix sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackConfig<A> {
    pub speed_ms: u64,
    pub order: SortOrder,
    pub algorithm: A,
}

impl PlaybackConfig<SortAlgorithm> {
    pub fn comparison() -> Self {
        Self {
            speed_ms: COMPARISON_SPEED_MS,
            order: SortOrder::Asc,
            algorithm: SortAlgorithm::default(),
        }
    }
}

impl PlaybackConfig<()> {
    pub fn radix() -> Self {
        Self {
            speed_ms: RADIX_SPEED_MS,
            order: SortOrder::Asc,
            algorithm: (),
        }
    }
}

impl Default for PlaybackConfig<SortAlgorithm> {
    fn default() -> Self {
        Self::comparison()
    }
}

impl Default for PlaybackConfig<()> {
    fn default() -> Self {
        Self::radix()
    }
}

impl<A> PlaybackConfig<A> {
    #[must_use]
    pub fn with_speed_ms(mut self, speed_ms: u64) -> Self {
        self.speed_ms = speed_ms;
        self
    }

    #[must_use]
    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub fn with_algorithm(mut self, algorithm: A) -> Self {
        self.algorithm = algorithm;
        self
    }

    #[inline]
    pub fn speed(&self) -> Duration {
        Duration::from_millis(self.speed_ms)
    }

    pub fn validate(&self) -> Result<(), PlaybackError> {
        check_speed(self.speed_ms)
    }

    /// Apply `SORTVIZ_*` overrides from the process environment.
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup.
    #[must_use]
    pub fn with_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(raw) = lookup("SORTVIZ_SPEED_MS") {
            match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => self.speed_ms = ms,
                _ => tracing::warn!(value = %raw, "ignoring invalid SORTVIZ_SPEED_MS"),
            }
        }
        if let Some(raw) = lookup("SORTVIZ_ORDER") {
            match SortOrder::parse(&raw) {
                Some(order) => self.order = order,
                None => tracing::warn!(value = %raw, "ignoring invalid SORTVIZ_ORDER"),
            }
        }
        self
    }
}

impl<A> PlaybackConfig<A>
where
    Self: Default,
{
    /// Engine defaults with environment overrides applied.
    pub fn from_env() -> Self {
        Self::default().with_env()
    }
}

pub(crate) fn check_speed(speed_ms: u64) -> Result<(), PlaybackError> {
    if speed_ms == 0 {
        return Err(PlaybackError::InvalidSpeed { speed_ms });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn engine_defaults() {
        let c = PlaybackConfig::comparison();
        assert_eq!(c.speed(), Duration::from_millis(500));
        assert_eq!(c.algorithm, SortAlgorithm::Bubble);
        assert_eq!(c.order, SortOrder::Asc);

        let r = PlaybackConfig::radix();
        assert_eq!(r.speed_ms, 1000);
        assert_eq!(PlaybackConfig::<()>::default(), r);
    }

    #[test]
    fn builders_chain() {
        let c = PlaybackConfig::comparison()
            .with_speed_ms(50)
            .with_order(SortOrder::Desc)
            .with_algorithm(SortAlgorithm::Merge);
        assert_eq!(c.speed_ms, 50);
        assert_eq!(c.order, SortOrder::Desc);
        assert_eq!(c.algorithm, SortAlgorithm::Merge);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn zero_speed_is_rejected() {
        let c = PlaybackConfig::radix().with_speed_ms(0);
        assert_eq!(c.validate(), Err(PlaybackError::InvalidSpeed { speed_ms: 0 }));
    }

    #[test]
    fn env_overrides_apply() {
        let c = PlaybackConfig::comparison()
            .with_env_from(lookup(&[("SORTVIZ_SPEED_MS", "120"), ("SORTVIZ_ORDER", "DESC")]));
        assert_eq!(c.speed_ms, 120);
        assert_eq!(c.order, SortOrder::Desc);
    }

    #[test]
    fn invalid_env_values_are_ignored() {
        let c = PlaybackConfig::radix().with_env_from(lookup(&[
            ("SORTVIZ_SPEED_MS", "0"),
            ("SORTVIZ_ORDER", "sideways"),
        ]));
        assert_eq!(c, PlaybackConfig::radix());

        let c = PlaybackConfig::radix().with_env_from(lookup(&[("SORTVIZ_SPEED_MS", "fast")]));
        assert_eq!(c.speed_ms, RADIX_SPEED_MS);
    }

    #[test]
    fn missing_env_keeps_defaults() {
        let c = PlaybackConfig::comparison().with_env_from(|_| None);
        assert_eq!(c, PlaybackConfig::comparison());
    }
}
