//! Simulation "temperature": how much the layout is still allowed to move.
//!
//! The layout runs hot after loading and cools down to rest. Dragging a node
//! reheats it to a low simmer so the neighbours follow, and lets it cool again
//! once the last drag ends.

/// Temperature the layout is held at while a node is being dragged.
pub const DRAG_ALPHA_TARGET: f64 = 0.2;

const ALPHA_MIN: f64 = 0.001;

#[derive(Clone, Debug)]
pub struct Temperature {
	alpha: f64,
	alpha_target: f64,
	alpha_decay: f64,
	active_drags: u32,
}

impl Default for Temperature {
	fn default() -> Self {
		Self {
			alpha: 1.0,
			alpha_target: 0.0,
			// cools from 1 to ALPHA_MIN in 300 ticks
			alpha_decay: 1.0 - ALPHA_MIN.powf(1.0 / 300.0),
			active_drags: 0,
		}
	}
}

impl Temperature {
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	pub fn alpha_target(&self) -> f64 {
		self.alpha_target
	}

	pub fn is_dragging(&self) -> bool {
		self.active_drags > 0
	}

	pub fn is_running(&self) -> bool {
		self.is_dragging() || self.alpha >= ALPHA_MIN
	}

	/// Reheats the layout when the first concurrent drag starts.
	pub fn begin_drag(&mut self) {
		if self.active_drags == 0 {
			self.alpha_target = DRAG_ALPHA_TARGET;
		}
		self.active_drags += 1;
	}

	/// Lets the layout cool once no drag remains.
	pub fn end_drag(&mut self) {
		self.active_drags = self.active_drags.saturating_sub(1);
		if self.active_drags == 0 {
			self.alpha_target = 0.0;
		}
	}

	/// Advances one tick and returns the alpha to scale this step by.
	pub fn tick(&mut self) -> f64 {
		self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;
		self.alpha
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn cools_to_rest_after_about_three_hundred_ticks() {
		let mut t = Temperature::default();
		assert!(t.is_running());
		for _ in 0..299 {
			t.tick();
		}
		assert!(t.is_running());
		for _ in 0..2 {
			t.tick();
		}
		assert!(!t.is_running());
	}

	#[test]
	fn drag_reheats_and_holds_target() {
		let mut t = Temperature::default();
		for _ in 0..400 {
			t.tick();
		}
		assert!(!t.is_running());

		t.begin_drag();
		assert_eq!(t.alpha_target(), DRAG_ALPHA_TARGET);
		assert!(t.is_running());
		for _ in 0..1000 {
			t.tick();
		}
		assert!((t.alpha() - DRAG_ALPHA_TARGET).abs() < 1e-6);

		t.end_drag();
		assert_eq!(t.alpha_target(), 0.0);
		for _ in 0..400 {
			t.tick();
		}
		assert!(!t.is_running());
	}

	#[test]
	fn overlapping_drags_keep_heat_until_last_ends() {
		let mut t = Temperature::default();
		t.begin_drag();
		t.begin_drag();
		t.end_drag();
		assert_eq!(t.alpha_target(), DRAG_ALPHA_TARGET);
		assert!(t.is_dragging());
		t.end_drag();
		assert_eq!(t.alpha_target(), 0.0);
		assert!(!t.is_dragging());
	}

	#[test]
	fn unmatched_end_drag_is_harmless() {
		let mut t = Temperature::default();
		t.end_drag();
		assert!(!t.is_dragging());
		assert_eq!(t.alpha_target(), 0.0);
	}
}
