//! regform-rs
//! ==========
//!
//! Umbrella crate for the workspace. It re-exports [`regform_core`] so the
//! demos under `demos/` can use a single import path.

pub use regform_core::*;
