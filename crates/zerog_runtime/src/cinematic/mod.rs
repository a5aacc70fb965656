//! Cinematic sequencing.
//!
//! A [`CinematicSequence`] is an authored list of [`CinematicAction`]s
//! executed strictly one at a time. The [`CinematicDirector`] runs any
//! number of sequences concurrently as resumable cursors: the host ticks
//! the director once per frame with the cinematic thread's delta time, and
//! each run is either starting its next action, waiting out a timer, or
//! suspended on a [`CompletionSignal`] the host completes when its side of
//! the action finishes.
//!
//! Suspension is strictly cooperative: a pending wait or signal is checked
//! exactly once per tick. Actions that complete within a tick cascade, so
//! a run of instant actions finishes in a single tick.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::time::approx_zero;

/// What a cinematic action does. The director owns the timing commands;
/// everything else is begun by the host.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CinematicCommand {
	/// Do nothing.
	#[default]
	None,
	/// Pan the camera; instant from the director's point of view.
	CameraPanTo,
	/// Zoom the camera; completes via the host's signal.
	CameraZoomTo,
	/// Play a character animation to its end; completes via the host's
	/// signal.
	CharacterAnimate,
	/// Walk a character to a position; completes via the host's signal.
	CharacterMoveTo,
	/// Teleport a character; instant.
	CharacterWarpTo,
	/// Run a dialogue flowchart; completes via the host's signal.
	Flowchart,
	/// Wait for `float1` seconds of cinematic-thread time.
	Wait,
}

/// One step of a cinematic sequence.
///
/// The float and string payloads are interpreted per command: a position
/// for the move/warp commands, seconds for `Wait`, an animation or
/// flowchart name in `string1`.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct CinematicAction {
	/// What this action does.
	pub command: CinematicCommand,
	/// Character identifier for the character commands.
	pub character: i32,
	/// First float payload.
	pub float1: f32,
	/// Second float payload.
	pub float2: f32,
	/// Third float payload.
	pub float3: f32,
	/// String payload.
	pub string1: String,
}

impl CinematicAction {
	/// An action with the given command and zeroed payloads.
	pub fn new(command: CinematicCommand) -> Self {
		Self {
			command,
			..Self::default()
		}
	}

	/// A `Wait` action for the given number of seconds.
	pub fn wait(seconds: f32) -> Self {
		Self {
			command: CinematicCommand::Wait,
			float1: seconds,
			..Self::default()
		}
	}
}

/// An authored, strictly sequential list of cinematic actions.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct CinematicSequence {
	/// Asset name, for events and logs.
	pub name: String,
	/// The actions, executed in order, one at a time.
	pub actions: Vec<CinematicAction>,
}

impl CinematicSequence {
	/// Creates an empty sequence.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			actions: Vec::new(),
		}
	}

	/// Appends an action, builder style.
	#[must_use]
	pub fn with_action(mut self, action: CinematicAction) -> Self {
		self.actions.push(action);
		self
	}
}

/// Shared completion flag for a host-executed action.
///
/// The director hands a clone to the host when it begins an action; the
/// run stays suspended until the host calls
/// [`complete`](CompletionSignal::complete). Completing inside
/// `begin_action` itself is fine and lets the next action start in the
/// same tick.
#[derive(Debug, Clone)]
pub struct CompletionSignal(Rc<Cell<bool>>);

impl CompletionSignal {
	fn new() -> Self {
		Self(Rc::new(Cell::new(false)))
	}

	/// Marks the host's side of the action as finished.
	pub fn complete(&self) {
		self.0.set(true);
	}

	/// Returns true once [`complete`](CompletionSignal::complete) has been
	/// called.
	pub fn is_complete(&self) -> bool {
		self.0.get()
	}
}

/// Executes the non-timing commands on behalf of the director.
pub trait CinematicHost {
	/// Begins executing `action`. For the instant commands the signal may
	/// be ignored; for the rest the host must eventually complete it.
	fn begin_action(&mut self, action: &CinematicAction, done: CompletionSignal);
}

/// Sequence lifecycle transitions, queued for the host to drain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectorEvent {
	/// A sequence was accepted by
	/// [`run_sequence`](CinematicDirector::run_sequence).
	SequenceStarted {
		/// The sequence's asset name.
		name: String,
	},
	/// A sequence executed its last action.
	SequenceStopped {
		/// The sequence's asset name.
		name: String,
	},
}

#[derive(Debug)]
enum WaitState {
	/// Start the next action on the next tick.
	Ready,
	/// A `Wait` timer; decremented by delta time once per tick.
	Elapsed { remaining: f32 },
	/// Suspended on the host; polled once per tick.
	Signal(CompletionSignal),
}

#[derive(Debug)]
struct SequenceRun {
	sequence: CinematicSequence,
	action_index: usize,
	wait: WaitState,
}

/// Runs cinematic sequences against a host, one action at a time per
/// sequence.
#[derive(Debug, Default)]
pub struct CinematicDirector {
	runs: Vec<SequenceRun>,
	events: VecDeque<DirectorEvent>,
}

impl CinematicDirector {
	/// Creates a director with no sequences in flight.
	pub fn new() -> Self {
		Self::default()
	}

	/// Starts running a sequence. Its first action begins on the next
	/// tick; independent sequences run concurrently with no cross-sequence
	/// ordering.
	pub fn run_sequence(&mut self, sequence: CinematicSequence) {
		self.events.push_back(DirectorEvent::SequenceStarted {
			name: sequence.name.clone(),
		});
		self.runs.push(SequenceRun {
			sequence,
			action_index: 0,
			wait: WaitState::Ready,
		});
	}

	/// Number of sequences still in flight.
	pub fn active_sequence_count(&self) -> usize {
		self.runs.len()
	}

	/// Drains the queued sequence events in order.
	pub fn drain_events(&mut self) -> impl Iterator<Item = DirectorEvent> + '_ {
		self.events.drain(..)
	}

	/// Advances every in-flight sequence by one tick of cinematic-thread
	/// time.
	///
	/// Each run checks its pending wait or signal exactly once; completed
	/// actions cascade into the next within the same tick.
	pub fn tick(&mut self, delta_time: f32, host: &mut dyn CinematicHost) {
		let mut finished = Vec::new();
		for (slot, run) in self.runs.iter_mut().enumerate() {
			let mut delta_time = delta_time;
			loop {
				match &mut run.wait {
					WaitState::Ready => {
						let Some(action) = run.sequence.actions.get(run.action_index) else {
							self.events.push_back(DirectorEvent::SequenceStopped {
								name: run.sequence.name.clone(),
							});
							finished.push(slot);
							break;
						};
						match action.command {
							CinematicCommand::None => {
								run.action_index += 1;
							}
							CinematicCommand::Wait => {
								if action.float1 > 0.0 {
									run.wait = WaitState::Elapsed {
										remaining: action.float1,
									};
									// First check happens next tick.
									break;
								}
								run.action_index += 1;
							}
							CinematicCommand::CameraPanTo | CinematicCommand::CharacterWarpTo => {
								host.begin_action(action, CompletionSignal::new());
								run.action_index += 1;
							}
							_ => {
								let signal = CompletionSignal::new();
								host.begin_action(action, signal.clone());
								if signal.is_complete() {
									run.action_index += 1;
								} else {
									run.wait = WaitState::Signal(signal);
									break;
								}
							}
						}
					}
					WaitState::Elapsed { remaining } => {
						*remaining -= delta_time;
						// A cascade of waits consumes the tick's delta once.
						delta_time = 0.0;
						if *remaining < 0.0 || approx_zero(*remaining) {
							run.action_index += 1;
							run.wait = WaitState::Ready;
						} else {
							break;
						}
					}
					WaitState::Signal(signal) => {
						if signal.is_complete() {
							run.action_index += 1;
							run.wait = WaitState::Ready;
						} else {
							break;
						}
					}
				}
			}
		}
		for slot in finished.into_iter().rev() {
			self.runs.remove(slot);
		}
	}
}
