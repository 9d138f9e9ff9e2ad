//! Garrison Core - Foundational types for the Garrison spawn-point editor
//!
//! This crate provides the types all other Garrison crates depend on:
//! - `Vec3` - coordinates, offsets and rotation triples
//! - `Color` - categorical display colors
//! - Error types and Result alias

mod error;
mod types;

pub use error::{GarrisonError, Result};
pub use types::{Color, Vec3};
