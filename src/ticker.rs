use crate::{
    Animation, ChartGeometry, MarketTrend, Price, PriceHistory, PricePoint, RandomWalk, Timestamp,
    DisplayOptions, Viewport, WalkConfig, render,
};

use rand::{Rng, SeedableRng, rngs::StdRng};
use std::{fmt::Display, num::NonZero, time::Duration};
use tracing::debug;

/// Configuration for a [`StockTicker`].
///
/// # Example
///
/// ```rust
/// use ticker_sim::TickerConfig;
/// use std::time::Duration;
///
/// let config = TickerConfig::builder().initial_price(400.0).build();
/// assert_eq!(config.initial_price(), 400.0);
/// assert_eq!(config.capacity(), 60);
/// assert_eq!(config.tick_interval(), Duration::from_millis(500));
/// ```
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct TickerConfig {
    initial_price: Price,
    capacity: NonZero<usize>,
    seed_points: usize,
    seed_spacing: Duration,
    tick_interval: Duration,
    viewport: Viewport,
    walk: WalkConfig,
}

impl TickerConfig {
    /// Returns a new builder with default values.
    #[must_use]
    pub fn builder() -> TickerConfigBuilder {
        TickerConfigBuilder::new()
    }

    /// First price the series walks away from.
    #[inline]
    #[must_use]
    pub fn initial_price(&self) -> Price {
        self.initial_price
    }

    /// Number of samples retained.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Number of synthetic samples generated by [`StockTicker::seed`].
    #[inline]
    #[must_use]
    pub fn seed_points(&self) -> usize {
        self.seed_points
    }

    /// Spacing between seeded samples.
    #[inline]
    #[must_use]
    pub fn seed_spacing(&self) -> Duration {
        self.seed_spacing
    }

    /// Period of live ticks.
    #[inline]
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    #[inline]
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    #[must_use]
    pub fn walk(&self) -> &WalkConfig {
        &self.walk
    }
}

impl Default for TickerConfig {
    fn default() -> Self {
        TickerConfigBuilder::new().build()
    }
}

impl Display for TickerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TickerConfig({}, {}, {:?})",
            self.initial_price, self.capacity, self.tick_interval
        )
    }
}

/// Builder for [`TickerConfig`].
///
/// Defaults: initial price 383.45, 60 samples, 30 seed samples 500 ms apart,
/// 500 ms ticks, 400x160 viewport, default [`WalkConfig`].
pub struct TickerConfigBuilder {
    initial_price: Price,
    capacity: NonZero<usize>,
    seed_points: usize,
    seed_spacing: Duration,
    tick_interval: Duration,
    viewport: Viewport,
    walk: WalkConfig,
}

impl TickerConfigBuilder {
    fn new() -> Self {
        Self {
            initial_price: 383.45,
            capacity: crate::history::DEFAULT_CAPACITY,
            seed_points: 30,
            seed_spacing: Duration::from_millis(500),
            tick_interval: Duration::from_millis(500),
            viewport: Viewport::default(),
            walk: WalkConfig::default(),
        }
    }

    #[must_use]
    pub fn initial_price(mut self, price: Price) -> Self {
        self.initial_price = price;
        self
    }

    #[must_use]
    pub fn capacity(mut self, capacity: NonZero<usize>) -> Self {
        self.capacity = capacity;
        self
    }

    #[must_use]
    pub fn seed(mut self, points: usize, spacing: Duration) -> Self {
        self.seed_points = points;
        self.seed_spacing = spacing;
        self
    }

    #[must_use]
    pub fn tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    #[must_use]
    pub fn viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    /// Takes the chart size from the widget's display options. Only the
    /// viewport affects the ticker; the cosmetic fields are left to the view.
    #[must_use]
    pub fn display(mut self, options: &DisplayOptions) -> Self {
        self.viewport = options.viewport;
        self
    }

    #[must_use]
    pub fn walk(mut self, walk: WalkConfig) -> Self {
        self.walk = walk;
        self
    }

    /// Builds the config. Panics if the tick interval is zero.
    #[must_use]
    pub fn build(self) -> TickerConfig {
        assert!(!self.tick_interval.is_zero(), "tick interval must be non-zero");

        TickerConfig {
            initial_price: self.initial_price,
            capacity: self.capacity,
            seed_points: self.seed_points,
            seed_spacing: self.seed_spacing,
            tick_interval: self.tick_interval,
            viewport: self.viewport,
            walk: self.walk,
        }
    }
}

/// Simulated live stock price.
///
/// Owns a bounded [`PriceHistory`] fed by a [`RandomWalk`]. Every
/// [`tick`](Self::tick) draws one new sample from the current price, appends
/// it and evicts the oldest once the history is full. Chart geometry is
/// derived on demand with [`geometry`](Self::geometry).
///
/// Each instance owns its history, trend and random source; instances never
/// share state.
///
/// # Example
///
/// ```rust
/// use ticker_sim::{StockTicker, TickerConfig};
/// use rand::{SeedableRng, rngs::StdRng};
///
/// let mut ticker = StockTicker::with_rng(TickerConfig::default(), StdRng::seed_from_u64(3));
/// ticker.seed(1_700_000_000_000);
/// assert_eq!(ticker.history().len(), 30);
///
/// let point = ticker.tick(1_700_000_000_500);
/// assert_eq!(ticker.current_price(), point.price);
/// assert!((300.0..=450.0).contains(&point.price));
///
/// let geometry = ticker.geometry();
/// assert_eq!(geometry.line.len(), 31);
/// ```
#[derive(Clone, Debug)]
pub struct StockTicker<R = StdRng> {
    config: TickerConfig,
    walk: RandomWalk,
    history: PriceHistory,
    current_price: Price,
    rng: R,
}

impl StockTicker<StdRng> {
    /// Creates an empty ticker drawing from an entropy-seeded generator.
    #[must_use]
    pub fn new(config: TickerConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<R: Rng> StockTicker<R> {
    /// Creates an empty ticker drawing from `rng`.
    pub fn with_rng(config: TickerConfig, rng: R) -> Self {
        Self {
            walk: RandomWalk::new(config.walk),
            history: PriceHistory::new(config.capacity),
            current_price: config.initial_price,
            config,
            rng,
        }
    }

    /// Back-fills the history with the configured number of synthetic
    /// samples, continuing from the current price. Timestamps step forward
    /// by the seed spacing and end one spacing before `now`.
    pub fn seed(&mut self, now: Timestamp) {
        let spacing = duration_millis(self.config.seed_spacing);
        let count = self.config.seed_points;

        for i in 0..count {
            let steps_back = (count - i) as u64;
            self.tick(now.saturating_sub(steps_back.saturating_mul(spacing)));
        }

        debug!(
            samples = count,
            price = self.current_price,
            "seeded price history"
        );
    }

    /// Draws the next sample, stamped with `now`, and appends it.
    pub fn tick(&mut self, now: Timestamp) -> PricePoint {
        let previous = self.current_price;
        let next = self.walk.next_price(previous, &mut self.rng);
        let point = PricePoint::new(next, now, next > previous);

        self.history.push(point);
        self.current_price = next;

        point
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &TickerConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn history(&self) -> &PriceHistory {
        &self.history
    }

    /// Latest price; the initial price until the first tick.
    #[inline]
    #[must_use]
    pub fn current_price(&self) -> Price {
        self.current_price
    }

    #[inline]
    #[must_use]
    pub fn trend(&self) -> MarketTrend {
        self.walk.trend()
    }

    /// Change between the two newest samples; `0` before there are two.
    #[must_use]
    pub fn price_change(&self) -> Price {
        self.history.change()
    }

    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.price_change() >= 0.0
    }

    /// Chart geometry for the current history in the configured viewport.
    #[must_use]
    pub fn geometry(&self) -> ChartGeometry {
        render(&self.history, self.config.viewport)
    }
}

impl<R: Rng> Animation for StockTicker<R> {
    type Frame = ChartGeometry;

    fn interval(&self) -> Duration {
        self.config.tick_interval
    }

    fn advance(&mut self, now: Timestamp) {
        self.tick(now);
    }

    fn frame(&self) -> ChartGeometry {
        self.geometry()
    }
}

impl<R> Display for StockTicker<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "StockTicker({}, {})", self.current_price, self.walk.trend())
    }
}

fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
