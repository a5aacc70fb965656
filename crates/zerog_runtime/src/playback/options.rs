/// Overrides the loop decisions an animation's own data would make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopMode {
	/// Follow the animation's authored loop settings.
	#[default]
	Authored,
	/// Loop the whole animation regardless of its authored settings.
	LoopAnimationOn,
	/// Never loop the whole animation; sequences still follow their counts.
	LoopAnimationOff,
	/// Replay the current sequence forever.
	LoopSequence,
	/// Loop nothing; every sequence plays once and the animation never loops.
	LoopNothing,
}

/// Per-state playback configuration.
#[derive(Debug, Clone, Default)]
pub struct PlaybackOptions {
	/// Loop behavior override. Defaults to the animation's authored settings.
	pub loop_mode: LoopMode,
	/// When a sequence's play count resolves to the infinite threshold or
	/// above, play it this many times instead. 0 retains the infinite loop.
	pub infinite_loop_replacement: u32,
	/// Seed for resolving randomized play counts. `None` seeds from the OS.
	pub rng_seed: Option<u64>,
}

impl PlaybackOptions {
	/// Options that follow the animation's authored behavior exactly.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the loop behavior override.
	pub fn with_loop_mode(mut self, loop_mode: LoopMode) -> Self {
		self.loop_mode = loop_mode;
		self
	}

	/// Caps infinite play counts at `count` plays. 0 keeps them infinite.
	pub fn with_infinite_loop_replacement(mut self, count: u32) -> Self {
		self.infinite_loop_replacement = count;
		self
	}

	/// Makes randomized play counts deterministic.
	pub fn with_rng_seed(mut self, seed: u64) -> Self {
		self.rng_seed = Some(seed);
		self
	}
}
