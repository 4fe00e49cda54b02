//! Small numeric and categorical scales used by both views.
//!
//! The semantics follow the d3 scales the charts were first drawn with, so
//! tick placement and band geometry line up with what readers of the original
//! charts expect.

/// Color palette shared by the graph and the bar chart.
pub const PALETTE: &[&str] = &[
	"#FF6B6B", "#6BCB77", "#4D96FF", "#FFD93D", "#6A4C93", "#F06595", "#2EC4B6", "#E36414",
	"#9B5DE5", "#00BBF9", "#F15BB5", "#00F5D4", "#A7C957", "#FF9F1C", "#5E60CE", "#48BFE3",
	"#56CFE1", "#64DFDF", "#80FFDB", "#FF5D8F", "#F4A261", "#E76F51", "#2A9D8F", "#8AB17D",
	"#B56576", "#6D597A", "#355070", "#588157", "#43AA8B", "#FFBD00", "#E63946", "#1D3557",
];

/// Maps `t` in `[0, 1]` of the domain onto the range. A degenerate domain maps
/// to the middle of the range.
fn interpolate(t: Option<f64>, range: (f64, f64)) -> f64 {
	let t = t.unwrap_or(0.5);
	range.0 + t * (range.1 - range.0)
}

fn normalize(x: f64, a: f64, b: f64) -> Option<f64> {
	let span = b - a;
	if span == 0.0 || !span.is_finite() {
		None
	} else {
		Some((x - a) / span)
	}
}

/// Returns `(min, max)` of the values, or `None` for an empty iterator.
pub fn extent<I: IntoIterator<Item = f64>>(values: I) -> Option<(f64, f64)> {
	values.into_iter().fold(None, |acc, v| match acc {
		None => Some((v, v)),
		Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
	})
}

/// Square-root scale, used for circle radii so area tracks the value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SqrtScale {
	domain: (f64, f64),
	range: (f64, f64),
}

impl SqrtScale {
	pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
		Self { domain, range }
	}

	pub fn scale(&self, x: f64) -> f64 {
		let sqrt = |v: f64| v.signum() * v.abs().sqrt();
		interpolate(
			normalize(sqrt(x), sqrt(self.domain.0), sqrt(self.domain.1)),
			self.range,
		)
	}
}

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Returns `(i1, i2, inc)` such that ticks are `i * inc` for a positive
/// increment, or `i / -inc` for a negative one.
fn tick_spec(start: f64, stop: f64, count: f64) -> Option<(f64, f64, f64)> {
	let step = (stop - start) / count.max(0.0);
	if step <= 0.0 || !step.is_finite() {
		return None;
	}
	let power = step.log10().floor();
	let error = step / 10f64.powf(power);
	let factor = if error >= E10 {
		10.0
	} else if error >= E5 {
		5.0
	} else if error >= E2 {
		2.0
	} else {
		1.0
	};

	let (mut i1, mut i2, inc);
	if power < 0.0 {
		let inv = 10f64.powf(-power) / factor;
		i1 = (start * inv).round();
		i2 = (stop * inv).round();
		if i1 / inv < start {
			i1 += 1.0;
		}
		if i2 / inv > stop {
			i2 -= 1.0;
		}
		inc = -inv;
	} else {
		inc = 10f64.powf(power) * factor;
		i1 = (start / inc).round();
		i2 = (stop / inc).round();
		if i1 * inc < start {
			i1 += 1.0;
		}
		if i2 * inc > stop {
			i2 -= 1.0;
		}
	}
	if i2 < i1 && (0.5..2.0).contains(&count) {
		return tick_spec(start, stop, count * 2.0);
	}
	Some((i1, i2, inc))
}

fn tick_increment(start: f64, stop: f64, count: f64) -> Option<f64> {
	tick_spec(start, stop, count).map(|(_, _, inc)| inc)
}

/// Continuous linear scale with d3-style `nice` and `ticks`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
	domain: (f64, f64),
	range: (f64, f64),
}

impl LinearScale {
	pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
		Self { domain, range }
	}

	pub fn domain(&self) -> (f64, f64) {
		self.domain
	}

	pub fn scale(&self, x: f64) -> f64 {
		interpolate(normalize(x, self.domain.0, self.domain.1), self.range)
	}

	/// Extends the domain so both ends fall on round tick values.
	pub fn nice(mut self, count: usize) -> Self {
		let reversed = self.domain.1 < self.domain.0;
		let (mut start, mut stop) = if reversed {
			(self.domain.1, self.domain.0)
		} else {
			self.domain
		};
		let mut prestep = None;

		for _ in 0..10 {
			let Some(step) = tick_increment(start, stop, count as f64) else {
				break;
			};
			if prestep == Some(step) {
				break;
			}
			if step > 0.0 {
				start = (start / step).floor() * step;
				stop = (stop / step).ceil() * step;
			} else {
				start = (start * step).ceil() / step;
				stop = (stop * step).floor() / step;
			}
			prestep = Some(step);
		}

		self.domain = if reversed { (stop, start) } else { (start, stop) };
		self
	}

	/// Round values spanning the domain, roughly `count` of them.
	pub fn ticks(&self, count: usize) -> Vec<f64> {
		let (d0, d1) = self.domain;
		if count == 0 {
			return Vec::new();
		}
		if d0 == d1 {
			return vec![d0];
		}
		let reversed = d1 < d0;
		let (start, stop) = if reversed { (d1, d0) } else { (d0, d1) };
		let Some((i1, i2, inc)) = tick_spec(start, stop, count as f64) else {
			return Vec::new();
		};
		if i2 < i1 {
			return Vec::new();
		}
		let n = (i2 - i1 + 1.0) as usize;
		let mut ticks: Vec<f64> = (0..n)
			.map(|i| {
				let i = i1 + i as f64;
				if inc < 0.0 { i / -inc } else { i * inc }
			})
			.collect();
		if reversed {
			ticks.reverse();
		}
		ticks
	}
}

/// Categorical band scale: one equal-width band per distinct key.
#[derive(Clone, Debug, PartialEq)]
pub struct BandScale {
	keys: Vec<String>,
	start: f64,
	step: f64,
	bandwidth: f64,
}

impl BandScale {
	/// `padding` is used for both the inner and the outer padding, as a
	/// fraction of the step. Repeated keys share the band of their first
	/// occurrence.
	pub fn new<I, S>(domain: I, range: (f64, f64), padding: f64) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let mut keys: Vec<String> = Vec::new();
		for key in domain {
			let key = key.into();
			if !keys.contains(&key) {
				keys.push(key);
			}
		}

		let n = keys.len() as f64;
		let (r0, r1) = if range.1 < range.0 {
			(range.1, range.0)
		} else {
			range
		};
		let step = (r1 - r0) / (n - padding + padding * 2.0).max(1.0);
		let start = r0 + (r1 - r0 - step * (n - padding)) * 0.5;

		Self {
			keys,
			start,
			step,
			bandwidth: step * (1.0 - padding),
		}
	}

	pub fn bandwidth(&self) -> f64 {
		self.bandwidth
	}

	/// Left edge of the band for `key`.
	pub fn position(&self, key: &str) -> Option<f64> {
		self.keys
			.iter()
			.position(|k| k == key)
			.map(|i| self.start + self.step * i as f64)
	}

	pub fn keys(&self) -> &[String] {
		&self.keys
	}
}

/// Ordinal color scale with an implicit domain: keys receive palette entries
/// in the order they are first asked for.
#[derive(Clone, Debug)]
pub struct OrdinalScale {
	palette: &'static [&'static str],
	keys: Vec<String>,
}

impl OrdinalScale {
	pub fn new(palette: &'static [&'static str]) -> Self {
		Self {
			palette,
			keys: Vec::new(),
		}
	}

	pub fn color(&mut self, key: &str) -> &'static str {
		let i = match self.keys.iter().position(|k| k == key) {
			Some(i) => i,
			None => {
				self.keys.push(key.to_owned());
				self.keys.len() - 1
			}
		};
		self.palette[i % self.palette.len()]
	}
}

impl Default for OrdinalScale {
	fn default() -> Self {
		Self::new(PALETTE)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn approx(a: f64, b: f64) -> bool {
		(a - b).abs() < 1e-9
	}

	#[test]
	fn sqrt_scale_maps_extent_onto_range() {
		let s = SqrtScale::new((1.0, 100.0), (10.0, 45.0));
		assert!(approx(s.scale(1.0), 10.0));
		assert!(approx(s.scale(100.0), 45.0));
		// sqrt(25) = 5 sits 4/9 of the way from sqrt(1) to sqrt(100)
		assert!(approx(s.scale(25.0), 10.0 + 35.0 * 4.0 / 9.0));
	}

	#[test]
	fn sqrt_scale_with_single_value_uses_midpoint() {
		let s = SqrtScale::new((7.0, 7.0), (10.0, 45.0));
		assert!(approx(s.scale(7.0), 27.5));
	}

	#[test]
	fn extent_of_empty_is_none() {
		assert_eq!(extent(Vec::<f64>::new()), None);
		assert_eq!(extent([3.0, -1.0, 8.0]), Some((-1.0, 8.0)));
	}

	#[test]
	fn nice_rounds_to_tick_step() {
		assert_eq!(LinearScale::new((0.0, 30.0), (0.0, 1.0)).nice(10).domain(), (0.0, 30.0));
		assert_eq!(LinearScale::new((0.0, 37.0), (0.0, 1.0)).nice(10).domain(), (0.0, 40.0));
		assert_eq!(LinearScale::new((0.0, 0.93), (0.0, 1.0)).nice(10).domain(), (0.0, 1.0));
	}

	#[test]
	fn nice_leaves_degenerate_domain_alone() {
		assert_eq!(LinearScale::new((0.0, 0.0), (0.0, 1.0)).nice(10).domain(), (0.0, 0.0));
	}

	#[test]
	fn ticks_follow_one_two_five_steps() {
		let s = LinearScale::new((0.0, 30.0), (0.0, 1.0));
		let ticks = s.ticks(10);
		assert_eq!(ticks.len(), 16);
		assert_eq!(ticks.first(), Some(&0.0));
		assert_eq!(ticks.last(), Some(&30.0));

		let s = LinearScale::new((0.0, 1.0), (0.0, 1.0));
		let ticks = s.ticks(5);
		assert_eq!(ticks, vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
	}

	#[test]
	fn linear_scale_inverts_range() {
		let s = LinearScale::new((0.0, 40.0), (400.0, 70.0));
		assert!(approx(s.scale(0.0), 400.0));
		assert!(approx(s.scale(40.0), 70.0));
		assert!(approx(s.scale(20.0), 235.0));
	}

	#[test]
	fn band_scale_matches_d3_geometry() {
		// n = 2, padding 0.25: step = 100 / 2.25
		let s = BandScale::new(["a", "b"], (0.0, 100.0), 0.25);
		let step = 100.0 / 2.25;
		assert!(approx(s.bandwidth(), step * 0.75));
		let a = s.position("a").unwrap();
		let b = s.position("b").unwrap();
		assert!(approx(b - a, step));
		assert!(approx(a, step * 0.25));
		assert_eq!(s.position("c"), None);
	}

	#[test]
	fn band_scale_collapses_repeated_keys() {
		let s = BandScale::new(["a", "b", "a"], (0.0, 90.0), 0.0);
		assert_eq!(s.keys(), ["a".to_string(), "b".to_string()]);
		assert!(approx(s.bandwidth(), 45.0));
	}

	#[test]
	fn ordinal_scale_assigns_in_first_seen_order() {
		let mut s = OrdinalScale::default();
		assert_eq!(s.color("Rock"), PALETTE[0]);
		assert_eq!(s.color("Jazz"), PALETTE[1]);
		assert_eq!(s.color("Rock"), PALETTE[0]);
	}

	#[test]
	fn ordinal_scale_cycles_palette() {
		let mut s = OrdinalScale::default();
		for i in 0..PALETTE.len() {
			s.color(&format!("g{i}"));
		}
		assert_eq!(s.color("overflow"), PALETTE[0]);
	}
}
