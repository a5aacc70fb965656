//! This crate provides the runtime engine for the `zerog-rs` project:
//! animation playback, the virtualized clock, and cinematic sequencing.
//!
//! # Components
//!
//! - **`playback`**: the [`RasterAnimationState`](playback::RasterAnimationState)
//!   state machine driving a raster animation frame by frame
//! - **`time`**: [`TimeThread`](time::TimeThread) virtual clocks with
//!   reference-counted pause keys, freezes, and scheduled
//!   [`TimeTrigger`](time::TimeTrigger)s
//! - **`cinematic`**: the [`CinematicDirector`](cinematic::CinematicDirector)
//!   running authored action sequences one action at a time
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```
//! use std::rc::Rc;
//! use zerog_runtime::prelude::*;
//! use zerog_types::anim::{FrameSequence, RasterAnimation};
//!
//! let mut anim = RasterAnimation::new("Walk_RasterAnimation", 64, 64, 0.05)
//! 	.with_sequence(FrameSequence::new("walk", "1-4"));
//! anim.validate();
//!
//! let mut state =
//! 	RasterAnimationState::new(Rc::new(anim), PlaybackOptions::new()).unwrap();
//! assert_eq!(state.current_frame_number(), 1);
//! assert_eq!(state.advance_frame(), Some(2));
//! ```

pub mod cinematic;
pub mod playback;
pub mod time;

/// `use zerog_runtime::prelude::*;` to import commonly used items.
pub mod prelude;
