use crate::foundation::core::Point;
use crate::projection::Projection;
use crate::sphere::direction::{Direction, Vec3};

/// One of the six cube faces enclosing the viewer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Face {
    NegX,
    PosX,
    NegY,
    PosY,
    NegZ,
    PosZ,
}

impl Face {
    /// Grid cell this face occupies in the 4x3 cross layout.
    pub fn cell(self) -> (u32, u32) {
        match self {
            Self::NegX => (1, 1),
            Self::PosX => (3, 1),
            Self::NegY => (1, 0),
            Self::PosY => (1, 2),
            Self::NegZ => (2, 1),
            Self::PosZ => (0, 1),
        }
    }

    /// Face occupying the given grid cell, if any. The 6 unused cells of
    /// the 4x3 grid have no face.
    pub fn from_cell(x: i64, y: i64) -> Option<Self> {
        match (x, y) {
            (1, 1) => Some(Self::NegX),
            (3, 1) => Some(Self::PosX),
            (1, 0) => Some(Self::NegY),
            (1, 2) => Some(Self::PosY),
            (2, 1) => Some(Self::NegZ),
            (0, 1) => Some(Self::PosZ),
            _ => None,
        }
    }
}

/// Position within a single cube face, both components in `[0,1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceCoordinates {
    pub face: Face,
    pub x: f64,
    pub y: f64,
}

/// Cubemap with its 6 faces tiled into a 4x3 cross:
///
/// ```text
/// .  -y  .  .
/// +z -x -z +x
/// .  +y  .  .
/// ```
///
/// The ideal image has a 4:3 aspect ratio. Projection goes through an
/// intermediate face + face-local UV representation in both directions.
#[derive(Clone, Copy, Debug, Default)]
pub struct CubemapProjection;

impl CubemapProjection {
    /// Split a normalized image point into its grid cell and face-local
    /// offset. Points in unused grid cells have no face coordinates.
    pub fn face_coordinates_from_point(point: Point) -> Option<FaceCoordinates> {
        let cell_x = (point.x * 4.0).floor();
        let cell_y = (point.y * 3.0).floor();
        let face = Face::from_cell(cell_x as i64, cell_y as i64)?;
        Some(FaceCoordinates {
            face,
            x: point.x * 4.0 - cell_x,
            y: point.y * 3.0 - cell_y,
        })
    }

    /// Place face-local coordinates back into the 4x3 image grid.
    pub fn point_from_face_coordinates(fc: FaceCoordinates) -> Point {
        let (cell_x, cell_y) = fc.face.cell();
        Point::new(
            (fc.x + f64::from(cell_x)) / 4.0,
            (fc.y + f64::from(cell_y)) / 3.0,
        )
    }

    /// Direction through a face-local position. One vector component is
    /// pinned at +-1 by the face, the other two sweep its surface. The
    /// signs here and in [`Self::face_coordinates_from_direction`] are two
    /// halves of the same table and must stay in lockstep.
    pub fn direction_from_face_coordinates(fc: FaceCoordinates) -> Vec3 {
        let u = fc.x;
        let v = fc.y;
        match fc.face {
            Face::NegX => Vec3::new(-1.0, 2.0 * v - 1.0, -(2.0 * u - 1.0)),
            Face::PosX => Vec3::new(1.0, 2.0 * v - 1.0, 2.0 * u - 1.0),
            Face::NegY => Vec3::new(-(2.0 * v - 1.0), -1.0, -(2.0 * u - 1.0)),
            Face::PosY => Vec3::new(2.0 * v - 1.0, 1.0, -(2.0 * u - 1.0)),
            Face::NegZ => Vec3::new(2.0 * u - 1.0, 2.0 * v - 1.0, -1.0),
            Face::PosZ => Vec3::new(-(2.0 * u - 1.0), 2.0 * v - 1.0, 1.0),
        }
    }

    /// Face and face-local position a direction lands on.
    ///
    /// Scaling by the largest component magnitude pushes exactly one axis
    /// to +-1 (ties go to the first axis checked), which selects the face.
    ///
    /// # Panics
    ///
    /// Panics if no component reaches +-1 after scaling. That can only
    /// happen for a null or non-finite vector, which no projection
    /// produces; reaching it means the surrounding algebra is broken and
    /// must not be papered over with a wrong color.
    pub fn face_coordinates_from_direction(direction: Direction) -> FaceCoordinates {
        let v = direction.to_vector();
        let max = v.x.abs().max(v.y.abs()).max(v.z.abs());
        let (x, y, z) = (v.x / max, v.y / max, v.z / max);

        let to_uv = |component: f64| (component + 1.0) / 2.0;

        if x == -1.0 {
            FaceCoordinates {
                face: Face::NegX,
                x: to_uv(-z),
                y: to_uv(y),
            }
        } else if x == 1.0 {
            FaceCoordinates {
                face: Face::PosX,
                x: to_uv(z),
                y: to_uv(y),
            }
        } else if y == -1.0 {
            FaceCoordinates {
                face: Face::NegY,
                x: to_uv(-z),
                y: to_uv(-x),
            }
        } else if y == 1.0 {
            FaceCoordinates {
                face: Face::PosY,
                x: to_uv(-z),
                y: to_uv(x),
            }
        } else if z == -1.0 {
            FaceCoordinates {
                face: Face::NegZ,
                x: to_uv(x),
                y: to_uv(y),
            }
        } else if z == 1.0 {
            FaceCoordinates {
                face: Face::PosZ,
                x: to_uv(-x),
                y: to_uv(y),
            }
        } else {
            unreachable!("no cube face selected for direction ({x}, {y}, {z})")
        }
    }
}

impl Projection for CubemapProjection {
    fn aspect_ratio(&self) -> f64 {
        4.0 / 3.0
    }

    fn point_to_direction(&self, point: Point) -> Option<Direction> {
        let fc = Self::face_coordinates_from_point(point)?;
        Some(Direction::Vector(Self::direction_from_face_coordinates(fc)))
    }

    fn direction_to_point(&self, direction: Direction) -> Option<Point> {
        let fc = Self::face_coordinates_from_direction(direction);
        Some(Self::point_from_face_coordinates(fc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn populated_and_empty_cells_partition_the_grid() {
        let mut populated = 0;
        for cell_y in 0..3 {
            for cell_x in 0..4 {
                let center = Point::new(
                    (f64::from(cell_x) + 0.5) / 4.0,
                    (f64::from(cell_y) + 0.5) / 3.0,
                );
                let mapped = CubemapProjection.point_to_direction(center).is_some();
                assert_eq!(mapped, Face::from_cell(cell_x.into(), cell_y.into()).is_some());
                if mapped {
                    populated += 1;
                }
            }
        }
        assert_eq!(populated, 6);
    }

    #[test]
    fn every_face_occupies_a_distinct_cell() {
        let faces = [
            Face::NegX,
            Face::PosX,
            Face::NegY,
            Face::PosY,
            Face::NegZ,
            Face::PosZ,
        ];
        for face in faces {
            let (x, y) = face.cell();
            assert_eq!(Face::from_cell(x.into(), y.into()), Some(face));
        }
    }

    #[test]
    fn axis_directions_land_on_their_face_centers() {
        let cases = [
            (Vec3::new(-2.0, 0.0, 0.0), Face::NegX),
            (Vec3::new(2.0, 0.0, 0.0), Face::PosX),
            (Vec3::new(0.0, -2.0, 0.0), Face::NegY),
            (Vec3::new(0.0, 2.0, 0.0), Face::PosY),
            (Vec3::new(0.0, 0.0, -2.0), Face::NegZ),
            (Vec3::new(0.0, 0.0, 2.0), Face::PosZ),
        ];
        for (v, face) in cases {
            let fc = CubemapProjection::face_coordinates_from_direction(Direction::Vector(v));
            assert_eq!(fc.face, face);
            assert_eq!(fc.x, 0.5);
            assert_eq!(fc.y, 0.5);
        }
    }

    #[test]
    fn point_roundtrip_inside_every_populated_cell() {
        let proj = CubemapProjection;
        for cell_y in 0..3i64 {
            for cell_x in 0..4i64 {
                if Face::from_cell(cell_x, cell_y).is_none() {
                    continue;
                }
                for ui in 0..8 {
                    for vi in 0..8 {
                        let p = Point::new(
                            (cell_x as f64 + (f64::from(ui) + 0.5) / 8.0) / 4.0,
                            (cell_y as f64 + (f64::from(vi) + 0.5) / 8.0) / 3.0,
                        );
                        let back = proj
                            .direction_to_point(proj.point_to_direction(p).unwrap())
                            .unwrap();
                        assert!(
                            (back.x - p.x).abs() < 1e-12 && (back.y - p.y).abs() < 1e-12,
                            "roundtrip drifted for {p:?} -> {back:?}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn edge_of_the_image_is_a_gap() {
        assert!(
            CubemapProjection
                .point_to_direction(Point::new(1.0, 0.5))
                .is_none()
        );
    }
}
