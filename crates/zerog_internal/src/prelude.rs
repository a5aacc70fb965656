//! Prelude module for `zerog_internal`.
//!
//! This module provides a convenient way to import commonly used types.
//!
//! # Examples
//!
//! ```
//! use zerog_internal::prelude::*;
//!
//! let compiled = compile_frame_spec("1-3x2");
//! assert_eq!(compiled.frames(), &[1, 2, 3, 1, 2, 3]);
//!
//! let mut keeper = TimeKeeper::new();
//! keeper.fixed_update(1.0 / 60.0);
//! ```

// Re-export everything from the member preludes
#[doc(inline)]
pub use zerog_runtime::prelude::*;
#[doc(inline)]
pub use zerog_types::prelude::*;

// Re-export the member crates for advanced usage
#[doc(inline)]
pub use zerog_runtime;
#[doc(inline)]
pub use zerog_types;
