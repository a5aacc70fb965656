//! This crate ties the `zerog-rs` member crates together for the facade crate, and should not be used directly.

/// `use zerog::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export the member crates for convenience
pub use zerog_runtime;
pub use zerog_types;

// Re-export commonly used types at crate root
pub use zerog_runtime::playback::{PlaybackOptions, RasterAnimationState};
pub use zerog_runtime::time::{TimeKeeper, TimeThread};
pub use zerog_types::anim::{FrameSequence, RasterAnimation, compile_frame_spec};
pub use zerog_types::elanic::{ElanicData, ElanicError};
