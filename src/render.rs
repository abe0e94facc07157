use crate::{Price, PriceHistory};

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Fraction of the price range added above and below the chart.
const RANGE_PADDING: f64 = 0.1;

/// Drawing area the chart is scaled into.
///
/// The origin is the top-left corner; `y` grows downwards.
#[derive(PartialEq, Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Where the live point sits when there is nothing to plot: the
    /// vertical middle of the left edge.
    #[must_use]
    pub fn anchor(&self) -> Point {
        Point::new(0.0, self.height / 2.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(400.0, 160.0)
    }
}

impl Display for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(PartialEq, Clone, Copy, Default, Debug, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Ordered chart vertices.
///
/// Formats as an SVG path: `M x0,y0 L x1,y1 ...`, or an empty string when
/// there are no points. Coordinates use the shortest representation that
/// round-trips, so equal geometry always yields byte-identical paths.
#[derive(PartialEq, Clone, Default, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polyline {
    points: Vec<Point>,
}

impl Polyline {
    #[must_use]
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    #[inline]
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// SVG path data for the line.
    #[must_use]
    pub fn to_path(&self) -> String {
        self.to_string()
    }

    /// SVG path data for the area under the line, closed along the bottom
    /// edge of `viewport`.
    #[must_use]
    pub fn area_path(&self, viewport: Viewport) -> String {
        if self.is_empty() {
            return String::new();
        }

        format!(
            "{self} L {w},{h} L 0,{h} Z",
            w = viewport.width,
            h = viewport.height
        )
    }
}

impl From<Vec<Point>> for Polyline {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}

impl Display for Polyline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, point) in self.points.iter().enumerate() {
            if i == 0 {
                write!(f, "M {},{}", point.x, point.y)?;
            } else {
                write!(f, " L {},{}", point.x, point.y)?;
            }
        }

        Ok(())
    }
}

/// Everything needed to draw one frame of the ticker chart.
#[derive(PartialEq, Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartGeometry {
    /// Scaled price line, oldest sample on the left.
    pub line: Polyline,
    /// Marker for the newest sample. Always the line's last vertex when the
    /// line is drawn, otherwise [`Viewport::anchor`].
    pub live_point: Point,
    /// Newest price, if any.
    pub current_price: Option<Price>,
    /// Newest price minus the one before it; `0` with fewer than two samples.
    pub price_change: Price,
    /// `price_change >= 0`.
    pub is_positive: bool,
}

impl ChartGeometry {
    /// SVG path data for the price line.
    #[must_use]
    pub fn path(&self) -> String {
        self.line.to_path()
    }
}

/// Scales `history` into `viewport`.
///
/// The vertical axis spans the observed price range padded by 10% on each
/// side; a flat series (zero range) is treated as having range 1, which
/// centers it vertically. Samples are spread evenly across the full width.
///
/// With fewer than two samples the line is empty and the live point falls
/// back to [`Viewport::anchor`].
///
/// Pure: the same history and viewport always produce the same geometry.
///
/// # Example
///
/// ```
/// use ticker_sim::{PriceHistory, PricePoint, Viewport, render};
///
/// let mut history = PriceHistory::default();
/// history.push(PricePoint::new(310.0, 0, false));
/// history.push(PricePoint::new(320.0, 500, true));
///
/// let geometry = render(&history, Viewport::default());
/// assert_eq!(geometry.line.len(), 2);
/// assert_eq!(geometry.live_point, geometry.line.last().unwrap());
/// assert_eq!(geometry.price_change, 10.0);
/// ```
#[must_use]
pub fn render(history: &PriceHistory, viewport: Viewport) -> ChartGeometry {
    let current_price = history.last().map(|p| p.price);
    let price_change = history.change();

    let line = match history.price_range() {
        Some((min, max)) if history.len() >= 2 => scale(history, viewport, min, max),
        _ => Polyline::default(),
    };

    ChartGeometry {
        live_point: line.last().unwrap_or_else(|| viewport.anchor()),
        line,
        current_price,
        price_change,
        is_positive: price_change >= 0.0,
    }
}

#[allow(clippy::cast_precision_loss)]
fn scale(history: &PriceHistory, viewport: Viewport, min: Price, max: Price) -> Polyline {
    let range = max - min;
    let range = if range > 0.0 { range } else { 1.0 };

    let padded_min = min - range * RANGE_PADDING;
    let padded_max = max + range * RANGE_PADDING;
    let padded_range = padded_max - padded_min;

    let step_x = viewport.width / (history.len() - 1) as f64;

    history
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let x = i as f64 * step_x;
            let y = viewport.height - ((point.price - padded_min) / padded_range) * viewport.height;
            Point::new(x, y)
        })
        .collect::<Vec<_>>()
        .into()
}
