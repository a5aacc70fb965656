//! Randomizable play-count ranges for frame sequences.

use std::fmt::Display;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::INFINITE_PLAY_COUNT;

/// An integer range resolved to a concrete play count each time playback
/// enters a frame sequence.
///
/// The maximum is considered unset when it resolves below the minimum (the
/// authored default of `max_value` 0 with an inclusive minimum of 1 plays
/// the sequence exactly once). Resolved values at or above
/// [`INFINITE_PLAY_COUNT`] mean "loop forever".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayCountRange {
	/// Lower bound of the range.
	pub min_value: u32,
	/// Upper bound of the range; unset when it resolves below the minimum.
	pub max_value: u32,
	/// Whether `min_value` itself is a permitted play count.
	pub min_inclusive: bool,
	/// Whether `max_value` itself is a permitted play count.
	pub max_inclusive: bool,
}

impl Default for PlayCountRange {
	fn default() -> Self {
		Self::exactly(1)
	}
}

impl PlayCountRange {
	/// A fixed play count with no randomization.
	pub const fn exactly(count: u32) -> Self {
		Self {
			min_value: count,
			max_value: 0,
			min_inclusive: true,
			max_inclusive: false,
		}
	}

	/// An inclusive random range.
	pub const fn between(min: u32, max: u32) -> Self {
		Self {
			min_value: min,
			max_value: max,
			min_inclusive: true,
			max_inclusive: true,
		}
	}

	/// A play count at the infinite sentinel: the sequence loops forever.
	pub const fn infinite() -> Self {
		Self::exactly(INFINITE_PLAY_COUNT)
	}

	/// The smallest play count this range can resolve to.
	pub fn min_resolved(&self) -> u32 {
		if self.min_inclusive {
			self.min_value
		} else {
			self.min_value + 1
		}
	}

	/// The largest play count this range can resolve to.
	pub fn max_resolved(&self) -> u32 {
		let max = if self.max_inclusive {
			self.max_value
		} else {
			self.max_value.saturating_sub(1)
		};
		max.max(self.min_resolved())
	}

	/// Resolves the range to a concrete play count.
	pub fn random_value<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
		let lo = self.min_resolved();
		let hi = self.max_resolved();
		if lo == hi {
			lo
		} else {
			rng.random_range(lo..=hi)
		}
	}

	/// Returns true if this range can resolve to a play count of 1 or more.
	pub fn is_playable(&self) -> bool {
		self.max_resolved() >= 1
	}

	/// Returns true if this range can resolve to the infinite sentinel.
	pub fn may_loop_forever(&self) -> bool {
		self.max_resolved() >= INFINITE_PLAY_COUNT
	}
}

impl Display for PlayCountRange {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let lo = self.min_resolved();
		let hi = self.max_resolved();
		if lo == hi {
			write!(f, "plays {lo}")
		} else {
			write!(f, "plays {lo}..={hi}")
		}
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;

	#[test]
	fn default_plays_once() {
		let range = PlayCountRange::default();
		let mut rng = SmallRng::seed_from_u64(0);
		assert_eq!(range.random_value(&mut rng), 1);
		assert!(range.is_playable());
	}

	#[test]
	fn fixed_count_never_randomizes() {
		let range = PlayCountRange::exactly(3);
		let mut rng = SmallRng::seed_from_u64(7);
		for _ in 0..16 {
			assert_eq!(range.random_value(&mut rng), 3);
		}
	}

	#[test]
	fn random_value_stays_in_range() {
		let range = PlayCountRange::between(2, 5);
		let mut rng = SmallRng::seed_from_u64(42);
		for _ in 0..64 {
			let v = range.random_value(&mut rng);
			assert!((2..=5).contains(&v), "resolved {v}");
		}
	}

	#[test]
	fn exclusive_bounds_narrow_the_range() {
		let range = PlayCountRange {
			min_value: 1,
			max_value: 4,
			min_inclusive: false,
			max_inclusive: false,
		};
		assert_eq!(range.min_resolved(), 2);
		assert_eq!(range.max_resolved(), 3);
	}

	#[test]
	fn zero_count_is_unplayable() {
		let range = PlayCountRange::exactly(0);
		assert!(!range.is_playable());
	}

	#[test]
	fn sentinel_loops_forever() {
		assert!(PlayCountRange::infinite().may_loop_forever());
		assert!(!PlayCountRange::exactly(99).may_loop_forever());
	}
}
