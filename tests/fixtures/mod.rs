#![allow(dead_code)]

use serde::{Deserialize, de::DeserializeOwned};
use ticker_sim::{Point, PriceHistory, PricePoint};

/// Recorded tick from a simulated session.
#[derive(Debug, Clone, Deserialize)]
pub struct RefTick {
    pub timestamp: u64,
    pub price: f64,
    pub is_up: bool,
}

impl From<&RefTick> for PricePoint {
    fn from(tick: &RefTick) -> Self {
        PricePoint::new(tick.price, tick.timestamp, tick.is_up)
    }
}

/// Expected chart vertex for the sample stamped `timestamp`.
#[derive(Debug, Deserialize)]
pub struct RefVertex {
    pub timestamp: u64,
    pub x: f64,
    pub y: f64,
}

impl RefVertex {
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

const TICKS_PATH: &str = "tests/fixtures/data/prices.csv";
const RENDER_PATH: &str = "tests/fixtures/data/render-400x160.csv";

/// Load the recorded tick session (75 ticks, 500 ms apart).
pub fn load_reference_ticks() -> Vec<RefTick> {
    load_records(TICKS_PATH, "invalid tick record")
}

/// Load the expected geometry of the last 60 ticks in a 400x160 viewport.
pub fn load_reference_render() -> Vec<RefVertex> {
    load_records(RENDER_PATH, "invalid vertex record")
}

/// Feed every recorded tick into a default (60 sample) history.
pub fn reference_history() -> PriceHistory {
    let mut history = PriceHistory::default();
    for tick in &load_reference_ticks() {
        history.push(tick.into());
    }
    history
}

/// Assert two f64 values are within tolerance.
pub fn assert_near(actual: f64, expected: f64, tolerance: f64, context: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{context}: expected {expected:.10}, got {actual:.10}, diff {diff:.2e} > tolerance {tolerance:.2e}"
    );
}

/// Parse `M x,y L x,y ...` path data back into vertices.
pub fn parse_path(path: &str) -> Vec<Point> {
    let tokens: Vec<&str> = path.split_whitespace().collect();
    tokens
        .chunks(2)
        .map(|pair| {
            assert!(matches!(pair[0], "M" | "L"), "unexpected command {}", pair[0]);
            let (x, y) = pair[1]
                .split_once(',')
                .unwrap_or_else(|| panic!("bad coordinate {}", pair[1]));
            Point::new(x.parse().unwrap(), y.parse().unwrap())
        })
        .collect()
}

fn load_records<D>(path: &str, expect_msg: &str) -> Vec<D>
where
    D: DeserializeOwned,
{
    let mut rdr =
        csv::Reader::from_path(path).unwrap_or_else(|e| panic!("failed to open {path}: {e}"));

    rdr.deserialize().map(|r| r.expect(expect_msg)).collect()
}
