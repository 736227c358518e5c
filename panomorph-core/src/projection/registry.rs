use std::fmt;
use std::str::FromStr;

use crate::foundation::core::Canvas;
use crate::foundation::error::{PanomorphError, PanomorphResult};
use crate::projection::Projection;
use crate::projection::cubemap::CubemapProjection;
use crate::projection::equirectangular::EquirectangularProjection;
use crate::projection::hemispherical::HemisphericalProjection;

/// Name of one of the built-in projections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionKind {
    Cubemap,
    Equirectangular,
    Hemispherical,
}

impl ProjectionKind {
    pub const ALL: [Self; 3] = [Self::Cubemap, Self::Equirectangular, Self::Hemispherical];

    pub fn name(self) -> &'static str {
        match self {
            Self::Cubemap => "cubemap",
            Self::Equirectangular => "equirectangular",
            Self::Hemispherical => "hemispherical",
        }
    }

    /// Width-to-height ratio of the ideal image for this projection,
    /// without constructing one. Used for input auto-detection and output
    /// size derivation.
    pub fn aspect_ratio(self) -> f64 {
        match self {
            Self::Cubemap => 4.0 / 3.0,
            Self::Equirectangular => 2.0,
            Self::Hemispherical => 1.0,
        }
    }
}

impl fmt::Display for ProjectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProjectionKind {
    type Err = PanomorphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| {
                PanomorphError::validation(format!(
                    "unknown projection '{s}' (expected cubemap, equirectangular or hemispherical)"
                ))
            })
    }
}

/// Construction parameters that are not part of the projection name itself.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProjectionParams {
    /// Horizontal field of view of the hemispherical projection, degrees.
    pub hemi_fov_x_deg: f64,
    /// Vertical field of view of the hemispherical projection, degrees.
    pub hemi_fov_y_deg: f64,
}

impl Default for ProjectionParams {
    fn default() -> Self {
        Self {
            hemi_fov_x_deg: HemisphericalProjection::DEFAULT_FOV_DEG,
            hemi_fov_y_deg: HemisphericalProjection::DEFAULT_FOV_DEG,
        }
    }
}

/// Instantiate a projection by name.
pub fn create_projection(
    kind: ProjectionKind,
    params: &ProjectionParams,
) -> PanomorphResult<Box<dyn Projection>> {
    Ok(match kind {
        ProjectionKind::Cubemap => Box::new(CubemapProjection),
        ProjectionKind::Equirectangular => Box::new(EquirectangularProjection),
        ProjectionKind::Hemispherical => Box::new(HemisphericalProjection::new(
            params.hemi_fov_x_deg,
            params.hemi_fov_y_deg,
        )?),
    })
}

/// Detect the projection of an input image from its aspect ratio.
///
/// Only exact ratio matches count (2:1, 4:3, 1:1 with integer-multiple
/// dimensions); anything else returns `None` and the caller must ask the
/// user to name the projection.
pub fn detect_projection(size: Canvas) -> Option<ProjectionKind> {
    let aspect = size.aspect_ratio();
    ProjectionKind::ALL
        .into_iter()
        .find(|kind| kind.aspect_ratio() == aspect)
}
