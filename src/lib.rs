#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `zerog-rs` is a project that aims to revive the 0G Legacy 2D action game framework and bring it to modern platforms using Rust.
//!
pub use zerog_internal::*;
