use serde::{Deserialize, Serialize};

use std::time::{SystemTime, UNIX_EPOCH};

/// A price value.
///
/// Semantic alias for [`f64`]. Documents intent in function signatures
/// without introducing newtype construction overhead.
pub type Price = f64;

/// Sample timestamp in milliseconds since the Unix epoch.
pub type Timestamp = u64;

/// A single sample of the simulated price series.
///
/// Points are plain values: once produced by a tick they are never mutated.
/// `is_up` records whether the sample closed above the one before it
/// (strictly greater, so an unchanged price is not "up").
///
/// # Example
///
/// ```
/// use ticker_sim::PricePoint;
///
/// let point = PricePoint::new(383.45, 1_700_000_000_000, true);
/// assert_eq!(point.price, 383.45);
/// assert!(point.is_up);
/// ```
#[derive(PartialEq, Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    /// Sampled price.
    pub price: Price,
    /// Sample time, epoch millis.
    pub timestamp: Timestamp,
    /// Whether `price` is strictly above the previous sample.
    pub is_up: bool,
}

impl PricePoint {
    #[must_use]
    pub const fn new(price: Price, timestamp: Timestamp, is_up: bool) -> Self {
        Self {
            price,
            timestamp,
            is_up,
        }
    }
}

/// Current wall-clock time as epoch millis.
///
/// A clock set before the epoch reads as `0`.
#[must_use]
pub fn now_millis() -> Timestamp {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| Timestamp::try_from(elapsed.as_millis()).unwrap_or(Timestamp::MAX))
        .unwrap_or_default()
}
