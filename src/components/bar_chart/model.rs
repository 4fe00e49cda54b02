//! Record selection and chart geometry for the top artists bar chart.

use std::collections::BTreeSet;
use std::fmt;

use super::types::{ArtistNode, BarDatum};
use crate::components::scale::{BandScale, LinearScale, OrdinalScale};
use crate::components::tooltip::TooltipContent;
use crate::config::ChartConfig;

/// Dropdown value meaning "no genre filter".
pub const ALL_GENRES: &str = "All";
/// Heading shown above the chart's genre dropdown.
pub const SELECT_TITLE: &str = "Select artist";
const PERSON: &str = "Person";
const UNKNOWN_GENRE: &str = "Unknown";
const Y_TICK_COUNT: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenreFilter {
	All,
	Genre(String),
}

impl GenreFilter {
	pub fn from_value(value: &str) -> Self {
		if value == ALL_GENRES {
			Self::All
		} else {
			Self::Genre(value.to_owned())
		}
	}

	pub fn value(&self) -> &str {
		match self {
			Self::All => ALL_GENRES,
			Self::Genre(genre) => genre,
		}
	}

	fn matches(&self, genre: &str) -> bool {
		match self {
			Self::All => true,
			Self::Genre(g) => g == genre,
		}
	}
}

impl fmt::Display for GenreFilter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.value())
	}
}

/// People with a positive influence and a known genre, in document order.
pub fn qualifying(nodes: &[ArtistNode]) -> Vec<BarDatum> {
	nodes
		.iter()
		.filter(|n| n.node_type.as_deref() == Some(PERSON))
		.filter_map(|n| {
			let influence = n.influence.filter(|&v| v > 0.0)?;
			let genre = n
				.principal_genre
				.as_deref()
				.filter(|g| !g.is_empty() && *g != UNKNOWN_GENRE)?;
			Some(BarDatum {
				name: n.name.clone().unwrap_or_default(),
				influence,
				genre: genre.to_owned(),
			})
		})
		.collect()
}

/// Sorted distinct genres of the records.
pub fn genres(records: &[BarDatum]) -> Vec<String> {
	records
		.iter()
		.map(|r| r.genre.clone())
		.collect::<BTreeSet<_>>()
		.into_iter()
		.collect()
}

/// The `n` most influential records matching `filter`. Equal influences keep
/// their document order.
pub fn top_records<'a>(records: &'a [BarDatum], filter: &GenreFilter, n: usize) -> Vec<&'a BarDatum> {
	let mut selected: Vec<&BarDatum> = records.iter().filter(|r| filter.matches(&r.genre)).collect();
	selected.sort_by(|a, b| b.influence.total_cmp(&a.influence));
	selected.truncate(n);
	selected
}

/// A bar at its final size.
#[derive(Clone, Debug, PartialEq)]
pub struct Bar {
	pub datum: BarDatum,
	pub x: f64,
	pub width: f64,
	pub y: f64,
	pub height: f64,
	pub color: &'static str,
}

impl Bar {
	/// `(y, height)` when the entrance animation is at eased progress `t`;
	/// bars grow upwards from `baseline`.
	pub fn grown(&self, baseline: f64, t: f64) -> (f64, f64) {
		(baseline + (self.y - baseline) * t, self.height * t)
	}

	pub fn tooltip(&self) -> TooltipContent {
		TooltipContent {
			heading: self.datum.name.clone(),
			lines: vec![
				format!("Successful songs influenced: {}", self.datum.influence),
				format!("Genre: {}", self.datum.genre),
			],
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
	pub label: String,
	pub pos: f64,
}

/// Everything needed to draw one state of the chart.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartLayout {
	pub bars: Vec<Bar>,
	/// Artist names at band centers.
	pub x_ticks: Vec<Tick>,
	pub y_ticks: Vec<Tick>,
	/// Pixel row of influence zero.
	pub baseline: f64,
	pub title: String,
}

/// Formats an axis value with thousands separators for whole numbers.
pub fn format_tick(value: f64) -> String {
	if value.fract() != 0.0 {
		return value.to_string();
	}
	let digits = (value.abs() as u64).to_string();
	let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
	if value < 0.0 {
		out.push('-');
	}
	for (i, c) in digits.chars().enumerate() {
		if i > 0 && (digits.len() - i) % 3 == 0 {
			out.push(',');
		}
		out.push(c);
	}
	out
}

pub fn layout(
	records: &[BarDatum],
	filter: &GenreFilter,
	config: &ChartConfig,
	palette: &mut OrdinalScale,
) -> ChartLayout {
	let top = top_records(records, filter, config.top_n);
	let m = config.margin;

	let x = BandScale::new(
		top.iter().map(|r| r.name.as_str()),
		(m.left, config.width - m.right),
		config.band_padding,
	);
	let max = top.iter().map(|r| r.influence).fold(0.0, f64::max);
	let y = LinearScale::new((0.0, max), (config.height - m.bottom, m.top)).nice(Y_TICK_COUNT);
	let baseline = y.scale(0.0);

	let bars = top
		.iter()
		.map(|r| {
			let top_y = y.scale(r.influence);
			Bar {
				datum: (*r).clone(),
				x: x.position(&r.name).unwrap_or(m.left),
				width: x.bandwidth(),
				y: top_y,
				height: baseline - top_y,
				color: palette.color(&r.genre),
			}
		})
		.collect();

	let x_ticks = x
		.keys()
		.iter()
		.filter_map(|name| {
			x.position(name).map(|pos| Tick {
				label: name.clone(),
				pos: pos + x.bandwidth() / 2.0,
			})
		})
		.collect();
	let y_ticks = y
		.ticks(Y_TICK_COUNT)
		.into_iter()
		.map(|v| Tick {
			label: format_tick(v),
			pos: y.scale(v),
		})
		.collect();

	ChartLayout {
		bars,
		x_ticks,
		y_ticks,
		baseline,
		title: format!(
			"Top {} Successful Songs Influenced By An Artist — {}",
			config.top_n, filter
		),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn person(name: &str, influence: f64, genre: &str) -> ArtistNode {
		ArtistNode {
			name: Some(name.into()),
			node_type: Some(PERSON.into()),
			influence: Some(influence),
			principal_genre: Some(genre.into()),
		}
	}

	fn datum(name: &str, influence: f64, genre: &str) -> BarDatum {
		BarDatum {
			name: name.into(),
			influence,
			genre: genre.into(),
		}
	}

	fn names(records: &[&BarDatum]) -> Vec<String> {
		records.iter().map(|r| r.name.clone()).collect()
	}

	#[test]
	fn dropdown_heading_and_sentinel() {
		assert_eq!(SELECT_TITLE, "Select artist");
		assert_eq!(GenreFilter::from_value(ALL_GENRES), GenreFilter::All);
	}

	#[test]
	fn qualifying_keeps_known_people_with_influence() {
		let mut song = person("S", 5.0, "Rock");
		song.node_type = Some("Song".into());
		let mut no_genre = person("N", 5.0, "Rock");
		no_genre.principal_genre = None;
		let nodes = vec![
			person("A", 3.0, "Rock"),
			song,
			person("Z", 0.0, "Rock"),
			person("U", 9.0, UNKNOWN_GENRE),
			no_genre,
			person("E", 2.0, ""),
			person("B", 1.0, "Jazz"),
		];
		let records = qualifying(&nodes);
		assert_eq!(records, vec![datum("A", 3.0, "Rock"), datum("B", 1.0, "Jazz")]);
		assert_eq!(genres(&records), vec!["Jazz".to_string(), "Rock".to_string()]);
	}

	#[test]
	fn genre_filter_sorts_descending() {
		let records = vec![datum("X", 10.0, "Rock"), datum("Y", 30.0, "Rock")];
		let top = top_records(&records, &GenreFilter::from_value("Rock"), 15);
		assert_eq!(names(&top), vec!["Y", "X"]);
	}

	#[test]
	fn bar_count_is_capped() {
		let records: Vec<BarDatum> = (0..40)
			.map(|i| datum(&format!("a{i}"), i as f64 + 1.0, if i % 2 == 0 { "Rock" } else { "Jazz" }))
			.collect();
		for (filter, expected) in [
			(GenreFilter::All, 15),
			(GenreFilter::Genre("Rock".into()), 15),
			(GenreFilter::Genre("Pop".into()), 0),
		] {
			let top = top_records(&records, &filter, 15);
			assert_eq!(top.len(), expected, "{filter}");
			assert!(top.windows(2).all(|w| w[0].influence >= w[1].influence));
		}
		let few = &records[..4];
		assert_eq!(top_records(few, &GenreFilter::All, 15).len(), 4);
	}

	#[test]
	fn all_filter_includes_every_record() {
		let records = vec![
			datum("a", 1.0, "Rock"),
			datum("b", 3.0, "Jazz"),
			datum("c", 2.0, "Pop"),
		];
		let top = top_records(&records, &GenreFilter::from_value(ALL_GENRES), 15);
		assert_eq!(names(&top), vec!["b", "c", "a"]);
	}

	#[test]
	fn ties_keep_document_order() {
		let records = vec![
			datum("first", 5.0, "Rock"),
			datum("big", 9.0, "Rock"),
			datum("second", 5.0, "Rock"),
		];
		let top = top_records(&records, &GenreFilter::All, 15);
		assert_eq!(names(&top), vec!["big", "first", "second"]);
	}

	#[test]
	fn layout_places_bars_on_a_nice_axis() {
		let config = ChartConfig::default();
		let records = vec![datum("X", 10.0, "Rock"), datum("Y", 30.0, "Rock")];
		let mut palette = OrdinalScale::default();
		let chart = layout(&records, &GenreFilter::Genre("Rock".into()), &config, &mut palette);

		assert_eq!(chart.baseline, config.height - config.margin.bottom);
		assert_eq!(chart.bars.len(), 2);
		assert_eq!(chart.bars[0].datum.name, "Y");
		// 30 is already a nice maximum, so Y spans the full plot height
		assert!((chart.bars[0].y - config.margin.top).abs() < 1e-9);
		assert!((chart.bars[1].height * 3.0 - chart.bars[0].height).abs() < 1e-9);
		assert!(chart.bars[0].x < chart.bars[1].x);
		assert_eq!(chart.bars[0].color, chart.bars[1].color);
		assert_eq!(chart.x_ticks.len(), 2);
		assert_eq!(chart.y_ticks.first().map(|t| t.label.as_str()), Some("0"));
		assert_eq!(chart.y_ticks.last().map(|t| t.label.as_str()), Some("30"));
		assert_eq!(
			chart.title,
			"Top 15 Successful Songs Influenced By An Artist — Rock"
		);
	}

	#[test]
	fn empty_selection_draws_no_bars() {
		let config = ChartConfig::default();
		let mut palette = OrdinalScale::default();
		let chart = layout(&[], &GenreFilter::All, &config, &mut palette);
		assert!(chart.bars.is_empty());
		assert!(chart.x_ticks.is_empty());
		assert_eq!(chart.y_ticks.len(), 1);
		assert!(chart.title.ends_with("— All"));
	}

	#[test]
	fn bars_grow_from_baseline() {
		let bar = Bar {
			datum: datum("X", 10.0, "Rock"),
			x: 0.0,
			width: 10.0,
			y: 100.0,
			height: 300.0,
			color: "#fff",
		};
		assert_eq!(bar.grown(400.0, 0.0), (400.0, 0.0));
		assert_eq!(bar.grown(400.0, 1.0), (100.0, 300.0));
		assert_eq!(bar.grown(400.0, 0.5), (250.0, 150.0));
	}

	#[test]
	fn tooltip_shows_name_influence_and_genre() {
		let bar = Bar {
			datum: datum("X", 12.0, "Rock"),
			x: 0.0,
			width: 1.0,
			y: 0.0,
			height: 1.0,
			color: "#fff",
		};
		let tip = bar.tooltip();
		assert_eq!(tip.heading, "X");
		assert_eq!(tip.lines, vec!["Successful songs influenced: 12", "Genre: Rock"]);
	}

	#[test]
	fn ticks_use_thousands_separators() {
		assert_eq!(format_tick(0.0), "0");
		assert_eq!(format_tick(950.0), "950");
		assert_eq!(format_tick(1000.0), "1,000");
		assert_eq!(format_tick(1234567.0), "1,234,567");
		assert_eq!(format_tick(0.5), "0.5");
	}
}
