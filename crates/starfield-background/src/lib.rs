//! Twinkling starfield background.
//!
//! [`StarfieldEngine`] owns a field of stars sized to the viewport area and
//! paints one frame at a time onto any [`DrawSurface`]: a dark blue sky
//! gradient, a few faint nebula blobs, then every star with its twinkle and,
//! for the rare drifting star, a fading trail. [`Animation`] wraps an engine
//! and its surface in an explicit mount/frame/resize/unmount lifecycle driven
//! by a [`FrameHost`]. [`PixelCanvas`] and [`StarfieldView`] put the result
//! on a terminal.

mod color;
mod engine;
mod lifecycle;
pub mod nebula;
pub mod particle;
mod raster;
mod surface;
pub mod testing;
mod widget;

pub use color::{Rgba, hsl_to_rgb, hsla};
pub use engine::StarfieldEngine;
pub use lifecycle::{Animation, FrameHost, FrameId, ListenerId, ManualHost};
pub use raster::PixelCanvas;
pub use surface::{DrawCall, DrawSurface, LinearGradient, Paint, RadialGradient, RecordingSurface};
pub use widget::StarfieldView;
