#![forbid(unsafe_code)]

//! Playback over a materialized step list.
//!
//! The controller owns the input, the generated steps and a cursor into
//! them. Navigation only moves the cursor; the sorting logic runs once per
//! change of input, algorithm or order.
//!
//! # States
//!
//! ```text
//!            start / next              reaching last step
//!   Idle ───────────────────▶ Ready ─────────────────────▶ Finished
//!    ▲                         │  ▲                           │
//!    │ reset / set_*    toggle │  │ toggle                    │ toggle (rewind)
//!    │                         ▼  │                           ▼
//!    └──────────────────────── Playing ◀──────────────────────┘
//! ```
//!
//! Autoplay ticks arrive over a channel from a background [`Ticker`]. The
//! embedding loop picks them up with [`PlaybackController::pump`] (or
//! [`PlaybackController::pump_timeout`]), the same way it would feed any
//! other message into [`PlaybackController::update`].

use std::fmt;
use std::marker::PhantomData;
use std::sync::mpsc;
use std::time::Duration;

use sortviz_core::{SortOrder, SortValue};

use crate::config::{PlaybackConfig, check_speed};
use crate::error::PlaybackError;
use crate::source::{ComparisonEngine, RadixEngine, StepSource};
use crate::ticker::{RunningTicker, Ticker};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlaybackState {
    /// No step is shown yet.
    #[default]
    Idle,
    /// A step is shown and autoplay is off.
    Ready,
    Playing,
    /// The last step is shown.
    Finished,
}

impl PlaybackState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Ready => "ready",
            Self::Playing => "playing",
            Self::Finished => "finished",
        }
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every operation the controller accepts, as a message.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackMsg<A> {
    SetInput(Vec<SortValue>),
    SetAlgorithm(A),
    SetOrder(SortOrder),
    Start,
    Next,
    Prev,
    ToggleAutoplay,
    /// Sent by the autoplay ticker.
    Tick,
    Reset,
    SetSpeed(u64),
}

/// Session state for one engine.
pub struct PlaybackController<S: StepSource> {
    input: Vec<SortValue>,
    algorithm: S::Algorithm,
    order: SortOrder,
    speed_ms: u64,
    steps: Vec<S::Step>,
    index: Option<usize>,
    state: PlaybackState,
    ticker: Option<RunningTicker>,
    sender: mpsc::SyncSender<PlaybackMsg<S::Algorithm>>,
    receiver: mpsc::Receiver<PlaybackMsg<S::Algorithm>>,
    _source: PhantomData<fn() -> S>,
}

pub type ComparisonController = PlaybackController<ComparisonEngine>;
pub type RadixController = PlaybackController<RadixEngine>;

impl<S: StepSource> PlaybackController<S> {
    /// Validate `input` and `config` and generate the steps.
    pub fn new(
        input: Vec<SortValue>,
        config: PlaybackConfig<S::Algorithm>,
    ) -> Result<Self, PlaybackError> {
        config.validate()?;
        S::validate(&input)?;
        let steps = S::generate(&input, config.algorithm, config.order);
        tracing::debug!(
            engine = S::NAME,
            n = input.len(),
            steps = steps.len(),
            speed_ms = config.speed_ms,
            "playback controller created"
        );
        // One slot: a late pump sees a single tick, never a backlog.
        let (sender, receiver) = mpsc::sync_channel(1);
        Ok(Self {
            input,
            algorithm: config.algorithm,
            order: config.order,
            speed_ms: config.speed_ms,
            steps,
            index: None,
            state: PlaybackState::Idle,
            ticker: None,
            sender,
            receiver,
            _source: PhantomData,
        })
    }

    /// [`Self::new`] with the engine's default configuration.
    pub fn with_defaults(input: Vec<SortValue>) -> Result<Self, PlaybackError>
    where
        PlaybackConfig<S::Algorithm>: Default,
    {
        Self::new(input, PlaybackConfig::default())
    }

    // ── Queries ─────────────────────────────────────────────────────────

    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// The shown step; `None` before playback starts.
    pub fn current_step(&self) -> Option<&S::Step> {
        self.index.and_then(|i| self.steps.get(i))
    }

    #[inline]
    pub fn current_index(&self) -> Option<usize> {
        self.index
    }

    #[inline]
    pub fn steps(&self) -> &[S::Step] {
        &self.steps
    }

    pub fn is_complete(&self) -> bool {
        self.state == PlaybackState::Finished
    }

    #[inline]
    pub fn has_started(&self) -> bool {
        self.index.is_some()
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn can_go_next(&self) -> bool {
        match self.index {
            None => !self.steps.is_empty(),
            Some(i) => i < self.last_index(),
        }
    }

    pub fn can_go_prev(&self) -> bool {
        self.index.is_some_and(|i| i > 0)
    }

    #[inline]
    pub fn speed(&self) -> Duration {
        Duration::from_millis(self.speed_ms)
    }

    #[inline]
    pub fn speed_ms(&self) -> u64 {
        self.speed_ms
    }

    #[inline]
    pub fn order(&self) -> SortOrder {
        self.order
    }

    #[inline]
    pub fn algorithm(&self) -> S::Algorithm {
        self.algorithm
    }

    #[inline]
    pub fn input(&self) -> &[SortValue] {
        &self.input
    }

    /// Fingerprint of the materialized trace.
    pub fn fingerprint(&self) -> u64 {
        sortviz_core::fingerprint(&self.steps)
    }

    // ── Commands ────────────────────────────────────────────────────────

    /// Apply one message.
    pub fn update(&mut self, msg: PlaybackMsg<S::Algorithm>) -> Result<(), PlaybackError> {
        match msg {
            PlaybackMsg::SetInput(values) => self.set_input(values)?,
            PlaybackMsg::SetAlgorithm(algorithm) => self.set_algorithm(algorithm),
            PlaybackMsg::SetOrder(order) => self.set_order(order),
            PlaybackMsg::Start => self.start(),
            PlaybackMsg::Next => self.next(),
            PlaybackMsg::Prev => self.prev(),
            PlaybackMsg::ToggleAutoplay => self.toggle_autoplay(),
            PlaybackMsg::Tick => self.tick(),
            PlaybackMsg::Reset => self.reset(),
            PlaybackMsg::SetSpeed(ms) => self.set_speed(ms)?,
        }
        Ok(())
    }

    /// Replace the input. Rejected input leaves the controller untouched.
    pub fn set_input(&mut self, values: Vec<SortValue>) -> Result<(), PlaybackError> {
        if let Err(err) = S::validate(&values) {
            tracing::debug!(engine = S::NAME, %err, "input rejected");
            return Err(err.into());
        }
        self.input = values;
        self.regenerate("input");
        Ok(())
    }

    pub fn set_algorithm(&mut self, algorithm: S::Algorithm) {
        self.algorithm = algorithm;
        self.regenerate("algorithm");
    }

    pub fn set_order(&mut self, order: SortOrder) {
        self.order = order;
        self.regenerate("order");
    }

    /// Show step 0.
    pub fn start(&mut self) {
        self.stop_ticker();
        self.index = Some(0);
        self.transition(PlaybackState::Ready);
    }

    pub fn next(&mut self) {
        match self.state {
            PlaybackState::Idle => self.start(),
            PlaybackState::Finished => {}
            PlaybackState::Ready | PlaybackState::Playing => self.advance(),
        }
    }

    pub fn prev(&mut self) {
        let Some(i) = self.index else {
            return;
        };
        self.index = Some(i.saturating_sub(1));
        if self.state == PlaybackState::Finished {
            self.transition(PlaybackState::Ready);
        }
    }

    pub fn toggle_autoplay(&mut self) {
        match self.state {
            PlaybackState::Idle => {
                self.start();
                self.play();
            }
            PlaybackState::Ready => self.play(),
            PlaybackState::Playing => {
                self.stop_ticker();
                self.transition(PlaybackState::Ready);
            }
            PlaybackState::Finished => {
                self.index = Some(0);
                self.play();
            }
        }
    }

    /// Autoplay advance. Ignored unless playing.
    pub fn tick(&mut self) {
        if self.state == PlaybackState::Playing {
            self.advance();
        }
    }

    /// Back to "not started". The generated steps are kept.
    pub fn reset(&mut self) {
        self.stop_ticker();
        self.index = None;
        self.transition(PlaybackState::Idle);
    }

    /// Change the autoplay interval; a running ticker picks it up at once.
    pub fn set_speed(&mut self, speed_ms: u64) -> Result<(), PlaybackError> {
        check_speed(speed_ms)?;
        self.speed_ms = speed_ms;
        if self.state == PlaybackState::Playing {
            self.spawn_ticker();
        }
        Ok(())
    }

    /// Apply the pending ticker message, if any. Returns how many were
    /// applied (0 or 1); ticks missed between pumps are merged into one.
    pub fn pump(&mut self) -> usize {
        match self.receiver.try_recv() {
            Ok(msg) => {
                self.apply_queued(msg);
                1
            }
            Err(_) => 0,
        }
    }

    /// Wait up to `timeout` for a ticker message and apply it.
    pub fn pump_timeout(&mut self, timeout: Duration) -> usize {
        match self.receiver.recv_timeout(timeout) {
            Ok(msg) => {
                self.apply_queued(msg);
                1
            }
            Err(_) => 0,
        }
    }

    // ── Internals ───────────────────────────────────────────────────────

    #[inline]
    fn last_index(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    fn advance(&mut self) {
        let last = self.last_index();
        let next = self.index.map_or(0, |i| i + 1).min(last);
        self.index = Some(next);
        crate::debug_trace!("{} step {}/{}", S::NAME, next, last);
        if next == last {
            self.stop_ticker();
            self.transition(PlaybackState::Finished);
        }
    }

    fn play(&mut self) {
        self.spawn_ticker();
        self.transition(PlaybackState::Playing);
    }

    fn regenerate(&mut self, cause: &'static str) {
        self.stop_ticker();
        self.steps = S::generate(&self.input, self.algorithm, self.order);
        self.index = None;
        tracing::debug!(
            engine = S::NAME,
            cause,
            n = self.input.len(),
            steps = self.steps.len(),
            "steps regenerated"
        );
        self.transition(PlaybackState::Idle);
    }

    fn apply_queued(&mut self, msg: PlaybackMsg<S::Algorithm>) {
        if let Err(err) = self.update(msg) {
            tracing::warn!(engine = S::NAME, %err, "queued playback message rejected");
        }
    }

    fn spawn_ticker(&mut self) {
        self.stop_ticker();
        let ticker = Ticker::new(self.speed(), || PlaybackMsg::Tick);
        self.ticker = Some(ticker.spawn(self.sender.clone()));
        tracing::trace!(engine = S::NAME, speed_ms = self.speed_ms, "autoplay ticker started");
    }

    fn stop_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            let interval = ticker.interval();
            ticker.stop();
            // The thread is joined, so nothing can arrive after this drain.
            let stale = self.receiver.try_iter().count();
            tracing::trace!(
                engine = S::NAME,
                interval_ms = interval.as_millis() as u64,
                stale,
                "autoplay ticker stopped"
            );
        }
    }

    fn transition(&mut self, next: PlaybackState) {
        if self.state == next {
            return;
        }
        tracing::debug!(
            engine = S::NAME,
            from = self.state.as_str(),
            to = next.as_str(),
            index = ?self.index,
            "playback transition"
        );
        crate::debug_trace!("{}: {} -> {}", S::NAME, self.state, next);
        self.state = next;
    }
}

impl<S: StepSource> Drop for PlaybackController<S> {
    fn drop(&mut self) {
        self.stop_ticker();
    }
}

impl<S: StepSource> fmt::Debug for PlaybackController<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackController")
            .field("engine", &S::NAME)
            .field("state", &self.state)
            .field("index", &self.index)
            .field("steps", &self.steps.len())
            .field("algorithm", &self.algorithm)
            .field("order", &self.order)
            .field("speed_ms", &self.speed_ms)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortviz_core::comparison::{ComparisonPhase, SortAlgorithm};
    use sortviz_core::radix::RadixPhase;
    use sortviz_core::InputError;

    /// Long enough that the ticker never fires during a test.
    const IDLE_SPEED_MS: u64 = 60_000;

    fn ints(values: &[i64]) -> Vec<SortValue> {
        values.iter().copied().map(SortValue::Int).collect()
    }

    fn comparison(values: &[i64]) -> ComparisonController {
        let config = PlaybackConfig::comparison().with_speed_ms(IDLE_SPEED_MS);
        ComparisonController::new(ints(values), config).unwrap()
    }

    #[test]
    fn new_controller_is_idle() {
        let c = comparison(&[3, 1, 2]);
        assert_eq!(c.state(), PlaybackState::Idle);
        assert!(c.current_step().is_none());
        assert!(!c.has_started());
        assert!(c.can_go_next());
        assert!(!c.can_go_prev());
        assert!(c.steps().len() > 1);
    }

    #[test]
    fn zero_speed_config_is_rejected() {
        let config = PlaybackConfig::comparison().with_speed_ms(0);
        let err = ComparisonController::new(ints(&[1]), config).unwrap_err();
        assert_eq!(err, PlaybackError::InvalidSpeed { speed_ms: 0 });
    }

    #[test]
    fn mixed_input_is_rejected() {
        let values = vec![SortValue::Int(1), SortValue::from("a")];
        let err = ComparisonController::with_defaults(values).unwrap_err();
        assert_eq!(err, PlaybackError::Input(InputError::MixedTypes { index: 1 }));
    }

    #[test]
    fn next_from_idle_starts() {
        let mut c = comparison(&[3, 1, 2]);
        c.next();
        assert_eq!(c.state(), PlaybackState::Ready);
        assert_eq!(c.current_index(), Some(0));
        assert_eq!(c.current_step().map(|s| s.phase), Some(ComparisonPhase::Initial));
    }

    #[test]
    fn stepping_to_the_end_finishes() {
        let mut c = comparison(&[3, 1, 2]);
        let last = c.steps().len() - 1;
        c.start();
        for _ in 0..last {
            assert!(c.can_go_next());
            c.next();
        }
        assert_eq!(c.state(), PlaybackState::Finished);
        assert!(c.is_complete());
        assert_eq!(c.current_index(), Some(last));
        assert!(!c.can_go_next());

        c.next();
        assert_eq!(c.current_index(), Some(last));
        assert_eq!(c.current_step().unwrap().values(), ints(&[1, 2, 3]));
    }

    #[test]
    fn prev_from_finished_is_ready() {
        let mut c = comparison(&[2, 1]);
        c.start();
        while !c.is_complete() {
            c.next();
        }
        let last = c.current_index().unwrap();
        c.prev();
        assert_eq!(c.state(), PlaybackState::Ready);
        assert_eq!(c.current_index(), Some(last - 1));
    }

    #[test]
    fn prev_is_clamped_and_ignored_when_idle() {
        let mut c = comparison(&[2, 1]);
        c.prev();
        assert_eq!(c.state(), PlaybackState::Idle);
        assert_eq!(c.current_index(), None);

        c.start();
        c.prev();
        assert_eq!(c.current_index(), Some(0));
        assert!(!c.can_go_prev());
    }

    #[test]
    fn reset_keeps_steps() {
        let mut c = comparison(&[4, 2, 3]);
        let before = c.fingerprint();
        c.start();
        c.next();
        c.reset();
        assert_eq!(c.state(), PlaybackState::Idle);
        assert_eq!(c.current_index(), None);
        assert_eq!(c.fingerprint(), before);
    }

    #[test]
    fn set_input_regenerates() {
        let mut c = comparison(&[2, 1]);
        c.start();
        c.set_input(ints(&[9, 8, 7])).unwrap();
        assert_eq!(c.state(), PlaybackState::Idle);
        assert_eq!(c.input(), ints(&[9, 8, 7]).as_slice());
        assert_eq!(c.steps()[0].values(), ints(&[9, 8, 7]));
    }

    #[test]
    fn rejected_input_leaves_session_alone() {
        let mut c = comparison(&[2, 1]);
        c.start();
        c.next();
        let err = c.set_input(vec![SortValue::from("x"), SortValue::Int(1)]);
        assert!(matches!(err, Err(PlaybackError::Input(InputError::MixedTypes { .. }))));
        assert_eq!(c.state(), PlaybackState::Ready);
        assert_eq!(c.current_index(), Some(1));
        assert_eq!(c.input(), ints(&[2, 1]).as_slice());
    }

    #[test]
    fn order_and_algorithm_changes_regenerate() {
        let mut c = comparison(&[1, 3, 2]);
        c.start();
        c.set_order(SortOrder::Desc);
        assert_eq!(c.state(), PlaybackState::Idle);
        assert_eq!(c.steps().last().unwrap().values(), ints(&[3, 2, 1]));

        let bubble = c.fingerprint();
        c.set_algorithm(SortAlgorithm::Merge);
        assert_eq!(c.algorithm(), SortAlgorithm::Merge);
        assert_ne!(c.fingerprint(), bubble);
        assert!(c.steps()[0].explanation.contains("Merge Sort"));
    }

    #[test]
    fn set_speed_validates() {
        let mut c = comparison(&[1]);
        assert_eq!(
            c.set_speed(0),
            Err(PlaybackError::InvalidSpeed { speed_ms: 0 })
        );
        assert_eq!(c.speed_ms(), IDLE_SPEED_MS);
        c.set_speed(250).unwrap();
        assert_eq!(c.speed(), Duration::from_millis(250));
    }

    #[test]
    fn toggle_cycles_between_ready_and_playing() {
        let mut c = comparison(&[3, 1, 2]);
        c.toggle_autoplay();
        assert_eq!(c.state(), PlaybackState::Playing);
        assert_eq!(c.current_index(), Some(0));
        c.toggle_autoplay();
        assert_eq!(c.state(), PlaybackState::Ready);
        c.toggle_autoplay();
        assert!(c.is_playing());
        c.reset();
        assert_eq!(c.state(), PlaybackState::Idle);
    }

    #[test]
    fn tick_only_advances_while_playing() {
        let mut c = comparison(&[3, 1, 2]);
        c.start();
        c.tick();
        assert_eq!(c.current_index(), Some(0));

        c.toggle_autoplay();
        c.tick();
        assert_eq!(c.current_index(), Some(1));
    }

    #[test]
    fn ticks_run_to_finished_and_stop() {
        let mut c = comparison(&[3, 1, 2]);
        c.toggle_autoplay();
        let last = c.steps().len() - 1;
        for _ in 0..last {
            c.tick();
        }
        assert_eq!(c.state(), PlaybackState::Finished);
        assert_eq!(c.current_index(), Some(last));
        c.tick();
        assert_eq!(c.current_index(), Some(last));
    }

    #[test]
    fn toggle_from_finished_rewinds() {
        let mut c = comparison(&[2, 1]);
        c.start();
        while !c.is_complete() {
            c.next();
        }
        c.toggle_autoplay();
        assert_eq!(c.state(), PlaybackState::Playing);
        assert_eq!(c.current_index(), Some(0));
    }

    #[test]
    fn update_dispatches_messages() {
        let mut c = comparison(&[2, 1]);
        c.update(PlaybackMsg::Next).unwrap();
        c.update(PlaybackMsg::Next).unwrap();
        assert_eq!(c.current_index(), Some(1));
        c.update(PlaybackMsg::Prev).unwrap();
        assert_eq!(c.current_index(), Some(0));
        c.update(PlaybackMsg::SetOrder(SortOrder::Desc)).unwrap();
        assert_eq!(c.order(), SortOrder::Desc);
        assert_eq!(c.state(), PlaybackState::Idle);
        assert!(c.update(PlaybackMsg::SetSpeed(0)).is_err());
        c.update(PlaybackMsg::SetInput(ints(&[5]))).unwrap();
        assert_eq!(c.steps().len(), 2);
    }

    #[test]
    fn radix_controller_uses_radix_defaults() {
        let mut c = RadixController::with_defaults(ints(&[170, 45, 75])).unwrap();
        assert_eq!(c.speed_ms(), 1000);
        c.start();
        assert_eq!(c.current_step().map(|s| s.phase), Some(RadixPhase::Initial));
        assert_eq!(
            c.set_input(ints(&[1, -2])),
            Err(PlaybackError::Input(InputError::NegativeValue { index: 1, value: -2 }))
        );
    }

    #[test]
    fn pump_without_ticker_is_empty() {
        let mut c = comparison(&[1, 2]);
        assert_eq!(c.pump(), 0);
        assert_eq!(c.pump_timeout(Duration::from_millis(5)), 0);
    }
}
