//! Simulated live price ticker and the widgets around it.
//!
//! A [`StockTicker`] grows a bounded [`PriceHistory`] one sample per tick
//! from a [`RandomWalk`] with momentum, clamped into a fixed band. The pure
//! [`render`] function scales any history into chart geometry: an SVG-ready
//! [`Polyline`] plus the live point marking the newest sample.
//!
//! Anything implementing [`Animation`], including the ticker and the
//! [`DashboardWave`], can be driven on a timer with [`LiveTicker`], which
//! owns the background task and stops it when dropped.
//!
//! [`ContactForm`] validation and [`format`] helpers cover the rest of the
//! widget surface.

mod animation;
mod contact;
mod dashboard;
mod display;
pub mod format;
mod history;
mod live;
mod price_point;
mod render;
mod ticker;
mod walk;

pub use crate::animation::Animation;
pub use crate::history::{DEFAULT_CAPACITY, Iter, PriceHistory};
pub use crate::live::LiveTicker;
pub use crate::price_point::{Price, PricePoint, Timestamp, now_millis};
pub use crate::render::{ChartGeometry, Point, Polyline, Viewport, render};

pub use crate::contact::{
    ContactForm, Field, FieldError, MIN_MESSAGE_LEN, ValidationErrors, is_valid_email,
};
pub use crate::dashboard::DashboardWave;
pub use crate::display::DisplayOptions;
pub use crate::ticker::{StockTicker, TickerConfig, TickerConfigBuilder};
pub use crate::walk::{MarketTrend, RandomWalk, WalkConfig, WalkConfigBuilder};

#[cfg(test)]
mod test_util;

#[cfg(test)]
mod end_to_end {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn ticker_frame_formats_like_header() {
        let mut ticker = StockTicker::with_rng(TickerConfig::default(), StdRng::seed_from_u64(99));
        ticker.seed(1_700_000_000_000);
        let frame = ticker.frame();

        let price = frame.current_price.unwrap();
        let header = format::format_usd(price);
        assert!(header.starts_with('$'));
        assert_eq!(header.len(), "$383.45".len());

        let change = format::format_signed_usd(frame.price_change);
        let percent = format::change_percent(price, frame.price_change);
        assert!(percent < 1.0, "{change} ({percent})");
    }

    #[test]
    fn area_path_extends_line_path() {
        let mut ticker = StockTicker::with_rng(TickerConfig::default(), StdRng::seed_from_u64(5));
        ticker.seed(0);
        let geometry = ticker.geometry();
        let area = geometry.line.area_path(ticker.config().viewport());
        assert!(area.starts_with(&geometry.path()));
        assert!(area.ends_with(" L 400,160 L 0,160 Z"));
    }
}
