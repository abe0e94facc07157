use crate::{Animation, Point, Polyline, Timestamp, Viewport};

use std::{fmt::Display, time::Duration};

const SAMPLES: usize = 60;
const BASELINE: f64 = 40.0;
const FAST_AMPLITUDE: f64 = 20.0;
const FAST_FREQUENCY: f64 = 0.15;
const SLOW_AMPLITUDE: f64 = 8.0;
const SLOW_FREQUENCY: f64 = 0.05;

/// Scrolling two-tone wave for the metrics dashboard.
///
/// Sample `i` at frame `t` has height
/// `40 + 20 sin((i + t) 0.15) + 8 cos((i + t) 0.05)` and is drawn at
/// `(i * width / 59, height - y)`. Each step shifts the wave one sample to
/// the left.
#[derive(Clone, Debug)]
pub struct DashboardWave {
    frame: u64,
    viewport: Viewport,
    interval: Duration,
}

impl DashboardWave {
    #[must_use]
    pub fn new(viewport: Viewport, interval: Duration) -> Self {
        Self {
            frame: 0,
            viewport,
            interval,
        }
    }

    /// Steps taken so far.
    #[must_use]
    pub fn frame_index(&self) -> u64 {
        self.frame
    }

    /// Wave heights for the current frame.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn series(&self) -> Vec<f64> {
        (0..SAMPLES)
            .map(|i| {
                let phase = (i as u64).wrapping_add(self.frame) as f64;
                BASELINE
                    + FAST_AMPLITUDE * (phase * FAST_FREQUENCY).sin()
                    + SLOW_AMPLITUDE * (phase * SLOW_FREQUENCY).cos()
            })
            .collect()
    }

    /// Current wave scaled into the viewport.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn polyline(&self) -> Polyline {
        let step = self.viewport.width / (SAMPLES - 1) as f64;

        self.series()
            .into_iter()
            .enumerate()
            .map(|(i, y)| Point::new(i as f64 * step, self.viewport.height - y))
            .collect::<Vec<_>>()
            .into()
    }
}

impl Default for DashboardWave {
    fn default() -> Self {
        Self::new(Viewport::new(400.0, 80.0), Duration::from_millis(120))
    }
}

impl Animation for DashboardWave {
    type Frame = Polyline;

    fn interval(&self) -> Duration {
        self.interval
    }

    fn advance(&mut self, _now: Timestamp) {
        self.frame = self.frame.wrapping_add(1);
    }

    fn frame(&self) -> Polyline {
        self.polyline()
    }
}

impl Display for DashboardWave {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DashboardWave({}, {})", self.viewport, self.frame)
    }
}
