//! View configuration. Each view takes its config as a component prop; the
//! defaults reproduce the published page.

/// Graph document, fetched relative to the page.
pub const GRAPH_DATA_URL: &str = "genre_influence_graph.json";
/// Artist document for the bar chart, fetched relative to the page.
pub const CHART_DATA_URL: &str = "simplified_graph.json";

/// Settings for the influence graph view.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphConfig {
	pub width: f64,
	pub height: f64,
	/// Circle radius for the smallest and the largest artist count.
	pub radius_range: (f64, f64),
	pub title: String,
	pub label_font_px: f64,
}

impl Default for GraphConfig {
	fn default() -> Self {
		Self {
			width: 1200.0,
			height: 700.0,
			radius_range: (10.0, 45.0),
			title: "Influenced By Network".into(),
			label_font_px: 13.0,
		}
	}
}

/// Space kept around the plot area of the bar chart for axes and titles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margin {
	pub top: f64,
	pub right: f64,
	pub bottom: f64,
	pub left: f64,
}

/// Settings for the top artists bar chart.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartConfig {
	pub width: f64,
	pub height: f64,
	pub margin: Margin,
	/// Maximum number of bars drawn.
	pub top_n: usize,
	pub band_padding: f64,
	/// Bars grow in over this many milliseconds; `None` places them at once.
	pub entrance_ms: Option<f64>,
}

impl Default for ChartConfig {
	fn default() -> Self {
		Self {
			width: 1100.0,
			height: 550.0,
			margin: Margin {
				top: 70.0,
				right: 20.0,
				bottom: 150.0,
				left: 90.0,
			},
			top_n: 15,
			band_padding: 0.25,
			entrance_ms: Some(900.0),
		}
	}
}
