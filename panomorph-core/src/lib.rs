//! Panomorph converts panoramic images between spherical projection formats.
//!
//! Supported projections are the 4x3 cross cubemap, the 2:1 equirectangular
//! unwrap and the hemispherical (fisheye) projection with a configurable
//! field of view. Conversion maps every output pixel through a canonical
//! sphere direction back to a source pixel, optionally rotating the sampled
//! direction in 3D.
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: `ConvertRequest + input dimensions -> RenderSettings`
//!    (projection auto-detection, output size derivation)
//! 2. **Sample**: output pixel -> normalized [`Point`] -> [`Direction`] ->
//!    optional [`Rotation`] -> input [`Point`] -> source pixel
//! 3. **Render**: full-frame loop over the output raster, sequential or
//!    row-parallel ([`RenderThreading`])
//! 4. **Plan** (optional): precompute every output pixel's source coordinate
//!    once ([`SamplePlan`]) and reuse it across an image sequence
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Pure per-pixel math**: projections are immutable after construction
//!   and direction algebra never mutates in place, so the sampling loop is
//!   embarrassingly parallel.
//! - **No IO in the sampler**: pixel reads and writes go through the narrow
//!   [`PixelSource`] / [`PixelSink`] capabilities injected by the caller.
#![forbid(unsafe_code)]

mod assets;
mod compile;
mod foundation;
mod projection;
mod render;
mod sampler;
mod settings;
mod sphere;

pub use assets::decode::{ImageSource, decode_image};
pub use compile::plan::SamplePlan;
pub use foundation::core::{Canvas, FrameRgb, Point, Rgb8};
pub use foundation::error::{PanomorphError, PanomorphResult};
pub use projection::Projection;
pub use projection::cubemap::{CubemapProjection, Face, FaceCoordinates};
pub use projection::equirectangular::EquirectangularProjection;
pub use projection::hemispherical::HemisphericalProjection;
pub use projection::registry::{
    ProjectionKind, ProjectionParams, create_projection, detect_projection,
};
pub use render::pipeline::{RenderThreading, render_frame, render_into};
pub use sampler::{PixelSink, PixelSource, Sampler};
pub use settings::{ConvertRequest, RenderSettings};
pub use sphere::direction::{Angles, Direction, Vec3};
pub use sphere::rotation::Rotation;
