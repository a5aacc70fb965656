//! This crate provides the core data types for the `zerog-rs` project.
//!
//! # Modules
//!
//! - **anim**: Raster animation assets - frame sequences, the frame-spec
//!   mini-language compiler, play-count ranges and audio triggers
//! - **elanic**: The ELANIC lossless delta-compression codec for animation
//!   frame images
//! - **graphics**: Pixel-level primitives shared by the animation and codec
//!   modules
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```
//! use zerog_types::prelude::*;
//!
//! // Compile a frame-spec string into a frame list
//! let compiled = compile_frame_spec("1-3x2-1");
//! assert_eq!(compiled.frames(), &[1, 2, 3, 1, 2, 3, 1]);
//! ```
//!
//! Or use explicit paths:
//!
//! ```
//! use zerog_types::anim::FrameSequence;
//!
//! let mut seq = FrameSequence::new("walk", "1-8");
//! seq.validate();
//! ```

pub mod anim;
pub mod elanic;
pub mod graphics;

/// `use zerog_types::prelude::*;` to import commonly used items.
pub mod prelude;
