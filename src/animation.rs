use crate::Timestamp;

use std::{fmt::Debug, time::Duration};

/// A timer-driven widget state.
///
/// Animations advance one step per tick of their own [`interval`] and expose
/// a renderable [`Frame`] of their current state. Stepping and rendering are
/// separate so a driver can run one tick to completion before publishing.
///
/// [`interval`]: Animation::interval
/// [`Frame`]: Animation::Frame
///
/// # Example
///
/// ```
/// use ticker_sim::{Animation, DashboardWave};
/// use std::time::Duration;
///
/// let mut wave = DashboardWave::default();
/// assert_eq!(wave.interval(), Duration::from_millis(120));
///
/// let before = wave.frame();
/// wave.advance(0);
/// assert_ne!(before, wave.frame());
/// ```
pub trait Animation {
    /// Renderable snapshot of the animation state.
    type Frame: Clone + Debug;

    /// Time between steps.
    fn interval(&self) -> Duration;

    /// Runs one step; `now` is the wall-clock time of the tick.
    fn advance(&mut self, now: Timestamp);

    /// Snapshot of the current state.
    fn frame(&self) -> Self::Frame;
}
