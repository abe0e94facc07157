// src/test_util.rs

use crate::{PriceHistory, PricePoint};

use rand::rngs::mock::StepRng;

/// Asserts that two `f64` values are within an absolute `tolerance`.
pub fn assert_near(actual: f64, expected: f64, tolerance: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "assert_near failed: actual={actual}, expected={expected}, diff={diff:e}"
    );
}

/// Rng whose every uniform `[0, 1)` draw returns `u`.
///
/// Float sampling keeps the top 52 bits of each `u64`, so the mantissa of
/// `1 + u` shifted into those bits reproduces `u` exactly.
pub fn constant_rng(u: f64) -> StepRng {
    let mantissa = (1.0 + u).to_bits() & ((1 << 52) - 1);
    StepRng::new(mantissa << 12, 0)
}

/// Every draw is 0.5: no large move, zero random move, no reversal.
pub fn half_rng() -> StepRng {
    constant_rng(0.5)
}

/// Every draw is 0.0: large move, maximal downward move, trend reversal.
pub fn zero_rng() -> StepRng {
    constant_rng(0.0)
}

/// History holding `prices` in order, one second apart.
pub fn history_of(prices: &[f64]) -> PriceHistory {
    let mut history = PriceHistory::default();
    let mut previous: Option<f64> = None;
    for (i, &price) in prices.iter().enumerate() {
        let is_up = previous.is_some_and(|p| price > p);
        history.push(PricePoint::new(price, i as u64 * 1_000, is_up));
        previous = Some(price);
    }
    history
}
