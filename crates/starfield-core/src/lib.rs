//! Core types shared by the starfield crates.
//!
//! Geometry lives in [`geometry`]; the tunables that shape a particle field
//! live in [`StarfieldConfig`], which is passed to the engine explicitly so
//! that several engines (or tests) can run with independent settings.

mod config;
mod geometry;

pub use config::StarfieldConfig;
pub use geometry::{Point, Rect, Size};
