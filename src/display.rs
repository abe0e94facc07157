use crate::Viewport;

use serde::{Deserialize, Serialize};

/// Cosmetic settings of the ticker widget.
///
/// None of these influence the simulated prices; they only describe how a
/// frame is presented. Every field has a default, so partial JSON is
/// accepted.
///
/// # Example
///
/// ```
/// use ticker_sim::DisplayOptions;
///
/// let options: DisplayOptions =
///     serde_json::from_str(r#"{ "showGrid": false, "tickerSymbol": "ACME" }"#).unwrap();
/// assert!(!options.show_grid);
/// assert!(options.show_controls);
/// assert_eq!(options.ticker_symbol, "ACME");
/// ```
#[derive(PartialEq, Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DisplayOptions {
    #[serde(flatten)]
    pub viewport: Viewport,
    pub show_controls: bool,
    pub show_live_indicator: bool,
    pub show_grid: bool,
    pub line_color: String,
    pub area_color: String,
    pub grid_color: String,
    pub ticker_symbol: String,
    pub ticker_name: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            show_controls: true,
            show_live_indicator: true,
            show_grid: true,
            line_color: "url(#stockLineGradient)".into(),
            area_color: "url(#areaFillGradient)".into(),
            grid_color: "rgba(255, 255, 255, 0.1)".into(),
            ticker_symbol: "STOCK".into(),
            ticker_name: "Stock Ticker".into(),
        }
    }
}
