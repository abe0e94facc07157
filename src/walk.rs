use crate::Price;

use rand::Rng;
use std::fmt::Display;
use tracing::debug;

/// Parameters of the [`RandomWalk`] price process.
///
/// All rates are fractions of the previous price, probabilities are in
/// `[0, 1]`. Configs are value types: cheap to copy and compare.
///
/// # Example
///
/// ```rust
/// use ticker_sim::WalkConfig;
///
/// let config = WalkConfig::builder().momentum(0.0).build();
/// assert_eq!(config.momentum(), 0.0);
/// assert_eq!(config.floor(), 300.0);
/// ```
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct WalkConfig {
    volatility: f64,
    large_move_probability: f64,
    large_move_multiplier: f64,
    momentum: f64,
    reversal_probability: f64,
    floor: Price,
    ceiling: Price,
}

impl WalkConfig {
    /// Returns a new builder with default values.
    #[must_use]
    pub fn builder() -> WalkConfigBuilder {
        WalkConfigBuilder::new()
    }

    /// Base volatility as a fraction of the previous price.
    #[inline]
    #[must_use]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Chance that a tick is a large move.
    #[inline]
    #[must_use]
    pub fn large_move_probability(&self) -> f64 {
        self.large_move_probability
    }

    /// Volatility multiplier applied on a large move.
    #[inline]
    #[must_use]
    pub fn large_move_multiplier(&self) -> f64 {
        self.large_move_multiplier
    }

    /// Per-tick drift as a fraction of the previous price.
    #[inline]
    #[must_use]
    pub fn momentum(&self) -> f64 {
        self.momentum
    }

    /// Chance per tick that the market trend reverses.
    #[inline]
    #[must_use]
    pub fn reversal_probability(&self) -> f64 {
        self.reversal_probability
    }

    /// Lowest price the walk can reach.
    #[inline]
    #[must_use]
    pub fn floor(&self) -> Price {
        self.floor
    }

    /// Highest price the walk can reach.
    #[inline]
    #[must_use]
    pub fn ceiling(&self) -> Price {
        self.ceiling
    }
}

impl Default for WalkConfig {
    fn default() -> Self {
        WalkConfigBuilder::new().build()
    }
}

impl Display for WalkConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "WalkConfig({}, {}, {}..={})",
            self.volatility, self.momentum, self.floor, self.ceiling
        )
    }
}

/// Builder for [`WalkConfig`].
///
/// Defaults: volatility 0.2%, 20% large moves at 3x, momentum 0.05%,
/// 5% reversal chance, bounds `300..=450`.
pub struct WalkConfigBuilder {
    volatility: f64,
    large_move_probability: f64,
    large_move_multiplier: f64,
    momentum: f64,
    reversal_probability: f64,
    floor: Price,
    ceiling: Price,
}

impl WalkConfigBuilder {
    fn new() -> Self {
        Self {
            volatility: 0.002,
            large_move_probability: 0.2,
            large_move_multiplier: 3.0,
            momentum: 0.0005,
            reversal_probability: 0.05,
            floor: 300.0,
            ceiling: 450.0,
        }
    }

    #[must_use]
    pub fn volatility(mut self, volatility: f64) -> Self {
        self.volatility = volatility;
        self
    }

    #[must_use]
    pub fn large_move(mut self, probability: f64, multiplier: f64) -> Self {
        self.large_move_probability = probability;
        self.large_move_multiplier = multiplier;
        self
    }

    #[must_use]
    pub fn momentum(mut self, momentum: f64) -> Self {
        self.momentum = momentum;
        self
    }

    #[must_use]
    pub fn reversal_probability(mut self, probability: f64) -> Self {
        self.reversal_probability = probability;
        self
    }

    #[must_use]
    pub fn bounds(mut self, floor: Price, ceiling: Price) -> Self {
        self.floor = floor;
        self.ceiling = ceiling;
        self
    }

    /// Builds the config. Panics if the bounds are inverted or not finite.
    #[must_use]
    pub fn build(self) -> WalkConfig {
        assert!(
            self.floor.is_finite() && self.ceiling.is_finite() && self.floor <= self.ceiling,
            "floor must not exceed ceiling"
        );

        WalkConfig {
            volatility: self.volatility,
            large_move_probability: self.large_move_probability,
            large_move_multiplier: self.large_move_multiplier,
            momentum: self.momentum,
            reversal_probability: self.reversal_probability,
            floor: self.floor,
            ceiling: self.ceiling,
        }
    }
}

/// Ambient drift direction of the simulated market.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug)]
pub enum MarketTrend {
    #[default]
    Up,
    Down,
}

impl MarketTrend {
    #[must_use]
    pub fn flip(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    #[must_use]
    pub fn is_up(self) -> bool {
        self == Self::Up
    }

    /// `1.0` for an up market, `-1.0` for a down market.
    #[must_use]
    pub fn momentum_sign(self) -> f64 {
        match self {
            Self::Up => 1.0,
            Self::Down => -1.0,
        }
    }
}

impl Display for MarketTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Bounded random walk with momentum.
///
/// Each step adds a uniform perturbation scaled by the previous price (three
/// times larger on an occasional "large move") plus a drift in the direction
/// of the current [`MarketTrend`], then clamps into the configured bounds.
/// The trend reverses at random, independently of the move just made.
///
/// Drift is applied before clamping, so a trend pushing into a bound is
/// absorbed there until it reverses.
///
/// # Example
///
/// ```rust
/// use ticker_sim::{RandomWalk, WalkConfig};
/// use rand::{SeedableRng, rngs::StdRng};
///
/// let mut walk = RandomWalk::new(WalkConfig::default());
/// let mut rng = StdRng::seed_from_u64(7);
///
/// let mut price = 383.45;
/// for _ in 0..1_000 {
///     price = walk.next_price(price, &mut rng);
///     assert!((300.0..=450.0).contains(&price));
/// }
/// ```
#[derive(Clone, Debug)]
pub struct RandomWalk {
    config: WalkConfig,
    trend: MarketTrend,
}

impl RandomWalk {
    #[must_use]
    pub fn new(config: WalkConfig) -> Self {
        Self {
            config,
            trend: MarketTrend::default(),
        }
    }

    #[must_use]
    pub fn with_trend(mut self, trend: MarketTrend) -> Self {
        self.trend = trend;
        self
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &WalkConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn trend(&self) -> MarketTrend {
        self.trend
    }

    /// Draws the price that follows `previous`.
    ///
    /// Consumes three uniform draws from `rng`, in order: the large-move
    /// roll, the move itself, and the trend-reversal roll.
    pub fn next_price<R: Rng + ?Sized>(&mut self, previous: Price, rng: &mut R) -> Price {
        let base_volatility = previous * self.config.volatility;

        let multiplier = if unit(rng) < self.config.large_move_probability {
            self.config.large_move_multiplier
        } else {
            1.0
        };

        let random_move = (unit(rng) - 0.5) * base_volatility * multiplier;
        let momentum = self.trend.momentum_sign() * self.config.momentum * previous;

        if unit(rng) < self.config.reversal_probability {
            self.trend = self.trend.flip();
            debug!(trend = %self.trend, "market trend reversed");
        }

        (previous + random_move + momentum).clamp(self.config.floor, self.config.ceiling)
    }
}

impl Display for RandomWalk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RandomWalk({}, {})", self.config, self.trend)
    }
}

#[inline]
fn unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(0.0..1.0)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::test_util::{assert_near, constant_rng, half_rng, zero_rng};
    use rand::{SeedableRng, rngs::StdRng};

    fn walk() -> RandomWalk {
        RandomWalk::new(WalkConfig::default())
    }

    mod step {
        use super::*;

        #[test]
        fn neutral_draw_without_momentum_keeps_price() {
            let mut walk = RandomWalk::new(WalkConfig::builder().momentum(0.0).build());
            let next = walk.next_price(400.0, &mut half_rng());
            assert_eq!(next, 400.0);
            assert_eq!(walk.trend(), MarketTrend::Up);
        }

        #[test]
        fn neutral_draw_applies_upward_momentum() {
            let mut walk = walk();
            // 400 + 0 + 400 * 0.0005
            assert_near(walk.next_price(400.0, &mut half_rng()), 400.2, 1e-9);
        }

        #[test]
        fn neutral_draw_applies_downward_momentum() {
            let mut walk = walk().with_trend(MarketTrend::Down);
            assert_near(walk.next_price(400.0, &mut half_rng()), 399.8, 1e-9);
        }

        #[test]
        fn low_draw_is_large_downward_move_and_reverses() {
            let mut walk = walk();
            // move = -0.5 * (400 * 0.002) * 3 = -1.2, momentum = +0.2
            assert_near(walk.next_price(400.0, &mut zero_rng()), 399.0, 1e-9);
            assert_eq!(walk.trend(), MarketTrend::Down);
        }

        #[test]
        fn momentum_uses_trend_before_reversal() {
            let mut walk = RandomWalk::new(
                WalkConfig::builder()
                    .volatility(0.0)
                    .reversal_probability(1.0)
                    .build(),
            );
            assert_near(walk.next_price(400.0, &mut half_rng()), 400.2, 1e-9);
            assert_eq!(walk.trend(), MarketTrend::Down);
            assert_near(walk.next_price(400.0, &mut half_rng()), 399.8, 1e-9);
            assert_eq!(walk.trend(), MarketTrend::Up);
        }

        #[test]
        fn high_draw_moves_up_without_large_move() {
            let mut walk = RandomWalk::new(WalkConfig::builder().momentum(0.0).build());
            // u = 0.75 -> move = 0.25 * 0.8 = 0.2
            let next = walk.next_price(400.0, &mut constant_rng(0.75));
            assert_near(next, 400.2, 1e-9);
            assert_eq!(walk.trend(), MarketTrend::Up);
        }
    }

    mod bounds {
        use super::*;

        #[test]
        fn clamps_at_ceiling() {
            let mut walk = walk();
            assert_eq!(walk.next_price(450.0, &mut half_rng()), 450.0);
        }

        #[test]
        fn clamps_at_floor() {
            let mut walk = walk().with_trend(MarketTrend::Down);
            assert_eq!(walk.next_price(300.0, &mut half_rng()), 300.0);
        }

        #[test]
        fn sustained_drift_is_absorbed_at_bound() {
            let mut walk = RandomWalk::new(
                WalkConfig::builder()
                    .volatility(0.0)
                    .momentum(0.05)
                    .reversal_probability(0.0)
                    .build(),
            );
            let mut price = 440.0;
            for _ in 0..10 {
                price = walk.next_price(price, &mut half_rng());
            }
            assert_eq!(price, 450.0);
        }

        #[test]
        fn seeded_walk_stays_in_range() {
            let mut walk = RandomWalk::new(WalkConfig::builder().volatility(0.05).build());
            let mut rng = StdRng::seed_from_u64(42);
            let mut price = 383.45;
            let mut touched = (false, false);
            for _ in 0..20_000 {
                price = walk.next_price(price, &mut rng);
                assert!((300.0..=450.0).contains(&price), "escaped: {price}");
                touched.0 |= price == 300.0;
                touched.1 |= price == 450.0;
            }
            assert!(touched.0 && touched.1);
        }
    }

    mod trend {
        use super::*;

        #[test]
        fn flip_alternates() {
            assert_eq!(MarketTrend::Up.flip(), MarketTrend::Down);
            assert_eq!(MarketTrend::Down.flip(), MarketTrend::Up);
            assert!(MarketTrend::default().is_up());
        }

        #[test]
        fn seeded_walk_reverses_sometimes() {
            let mut walk = walk();
            let mut rng = StdRng::seed_from_u64(1);
            let mut flips = 0;
            let mut last = walk.trend();
            for _ in 0..2_000 {
                walk.next_price(380.0, &mut rng);
                if walk.trend() != last {
                    flips += 1;
                    last = walk.trend();
                }
            }
            // ~5% of 2000
            assert!((40..=160).contains(&flips), "flips: {flips}");
        }
    }

    mod config {
        use super::*;

        #[test]
        fn defaults() {
            let config = WalkConfig::default();
            assert_eq!(config.volatility(), 0.002);
            assert_eq!(config.large_move_probability(), 0.2);
            assert_eq!(config.large_move_multiplier(), 3.0);
            assert_eq!(config.momentum(), 0.0005);
            assert_eq!(config.reversal_probability(), 0.05);
            assert_eq!((config.floor(), config.ceiling()), (300.0, 450.0));
        }

        #[test]
        #[should_panic(expected = "floor must not exceed ceiling")]
        fn panics_on_inverted_bounds() {
            let _ = WalkConfig::builder().bounds(500.0, 400.0).build();
        }

        #[test]
        fn display_config() {
            assert_eq!(
                WalkConfig::default().to_string(),
                "WalkConfig(0.002, 0.0005, 300..=450)"
            );
        }

        #[test]
        fn display_walk() {
            assert_eq!(
                walk().to_string(),
                "RandomWalk(WalkConfig(0.002, 0.0005, 300..=450), Up)"
            );
        }
    }
}
