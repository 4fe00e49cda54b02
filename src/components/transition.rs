//! Easing curves and time-based tweens driven by animation frame timestamps.

/// Cubic ease-out: fast start, gentle landing.
pub fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

/// Symmetric cubic ease, the default curve for style transitions.
pub fn ease_cubic_in_out(t: f64) -> f64 {
	let t = t * 2.0;
	if t <= 1.0 {
		t * t * t / 2.0
	} else {
		let t = t - 2.0;
		(t * t * t + 2.0) / 2.0
	}
}

/// A value animated from `from` to `to` over `duration_ms`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
	from: f64,
	to: f64,
	start_ms: f64,
	duration_ms: f64,
}

impl Tween {
	pub fn fixed(value: f64) -> Self {
		Self {
			from: value,
			to: value,
			start_ms: 0.0,
			duration_ms: 0.0,
		}
	}

	/// Eased progress in `[0, 1]` at `now_ms`.
	fn progress(&self, now_ms: f64) -> f64 {
		if self.duration_ms <= 0.0 {
			return 1.0;
		}
		ease_cubic_in_out(((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0))
	}

	pub fn value_at(&self, now_ms: f64) -> f64 {
		let t = self.progress(now_ms);
		if t >= 1.0 {
			return self.to;
		}
		self.from + (self.to - self.from) * t
	}

	/// Starts a new transition from wherever the current one is at `now_ms`.
	pub fn retarget(&mut self, to: f64, now_ms: f64, duration_ms: f64) {
		self.from = self.value_at(now_ms);
		self.to = to;
		self.start_ms = now_ms;
		self.duration_ms = duration_ms;
	}

	/// Jumps straight to `value`, cancelling any running transition.
	pub fn set(&mut self, value: f64) {
		*self = Self::fixed(value);
	}

	#[cfg(test)]
	pub fn is_done(&self, now_ms: f64) -> bool {
		now_ms >= self.start_ms + self.duration_ms
	}
}
