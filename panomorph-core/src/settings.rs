//! Resolution of a user-facing conversion request into concrete render
//! settings.

use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::{PanomorphError, PanomorphResult};
use crate::projection::Projection;
use crate::projection::registry::{
    ProjectionKind, ProjectionParams, create_projection, detect_projection,
};
use crate::sphere::rotation::Rotation;

/// A conversion as the user describes it, before the input image has been
/// seen. `None` fields are filled in by [`RenderSettings::resolve`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ConvertRequest {
    /// Input projection; `None` means detect it from the input aspect ratio.
    pub in_projection: Option<ProjectionKind>,
    pub out_projection: ProjectionKind,
    /// Output width in pixels; derived from the output aspect ratio when
    /// omitted.
    pub width: Option<u32>,
    /// Output height in pixels; derived from the output aspect ratio when
    /// omitted.
    pub height: Option<u32>,
    /// Rotation applied to every sampled direction.
    pub rotation: Option<Rotation>,
    /// Supersampling factor; `n` squared samples per output pixel. Must be
    /// at least 1.
    pub samples: u32,
    pub projection_params: ProjectionParams,
}

impl ConvertRequest {
    /// Request with every optional knob at its default.
    pub fn new(out_projection: ProjectionKind) -> Self {
        Self {
            in_projection: None,
            out_projection,
            width: None,
            height: None,
            rotation: None,
            samples: 1,
            projection_params: ProjectionParams::default(),
        }
    }
}

/// A conversion resolved against a concrete input image: projections are
/// constructed, output dimensions are known. Immutable for the duration of
/// a render and shared read-only by all workers.
pub struct RenderSettings {
    pub input_projection: Box<dyn Projection>,
    pub output_projection: Box<dyn Projection>,
    pub in_size: Canvas,
    pub out_size: Canvas,
    pub rotation: Option<Rotation>,
    pub samples: u32,
}

impl std::fmt::Debug for RenderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderSettings")
            .field("in_size", &self.in_size)
            .field("out_size", &self.out_size)
            .field("rotation", &self.rotation)
            .field("samples", &self.samples)
            .finish_non_exhaustive()
    }
}

impl RenderSettings {
    /// Resolve `request` against the dimensions of the decoded input image.
    pub fn resolve(request: &ConvertRequest, in_size: Canvas) -> PanomorphResult<Self> {
        if request.samples == 0 {
            return Err(PanomorphError::validation("samples must be >= 1"));
        }

        let in_kind = match request.in_projection {
            Some(kind) => kind,
            None => detect_projection(in_size).ok_or_else(|| {
                PanomorphError::validation(format!(
                    "input projection not recognizable from a {}x{} image; name it explicitly",
                    in_size.width, in_size.height
                ))
            })?,
        };

        let input_projection = create_projection(in_kind, &request.projection_params)?;
        let output_projection =
            create_projection(request.out_projection, &request.projection_params)?;
        let out_size = resolve_out_size(
            request.width,
            request.height,
            in_size,
            output_projection.aspect_ratio(),
        )?;

        tracing::debug!(
            input = %in_kind,
            output = %request.out_projection,
            out_w = out_size.width,
            out_h = out_size.height,
            samples = request.samples,
            "resolved conversion settings"
        );

        Ok(Self {
            input_projection,
            output_projection,
            in_size,
            out_size,
            rotation: request.rotation,
            samples: request.samples,
        })
    }

    /// Map one normalized output point to the input pixel it samples,
    /// crossing output projection, optional rotation and input projection.
    /// `None` means the point fell into a projection gap on either side.
    pub fn source_coordinate(&self, point: Point) -> Option<(u32, u32)> {
        let direction = self.output_projection.point_to_direction(point)?;
        let direction = match self.rotation {
            Some(rotation) => direction.rotated(rotation),
            None => direction,
        };
        let input = self.input_projection.direction_to_point(direction)?;

        // Nearest neighbor, truncating toward zero. The cast saturates, so
        // the stray sub-zero coordinate from the center-column azimuth
        // fallback clamps to the first column instead of wrapping.
        let x = (input.x * f64::from(self.in_size.width - 1)) as u32;
        let y = (input.y * f64::from(self.in_size.height - 1)) as u32;
        Some((x, y))
    }
}

fn resolve_out_size(
    width: Option<u32>,
    height: Option<u32>,
    in_size: Canvas,
    aspect: f64,
) -> PanomorphResult<Canvas> {
    let (w, h) = match (width, height) {
        (Some(w), Some(h)) => (w, h),
        (Some(w), None) => (w, (f64::from(w) / aspect) as u32),
        (None, Some(h)) => ((f64::from(h) * aspect) as u32, h),
        (None, None) => {
            let w = in_size.width;
            (w, (f64::from(w) / aspect) as u32)
        }
    };
    Canvas::new(w, h)
}
