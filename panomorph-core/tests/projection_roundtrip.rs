//! Cross-projection properties exercised through the public API.

use std::f64::consts::{PI, TAU};

use panomorph::{
    Angles, CubemapProjection, Direction, EquirectangularProjection, Face,
    HemisphericalProjection, Point, Projection,
};

fn assert_same_direction(a: Direction, b: Direction) {
    let va = a.to_vector();
    let vb = b.to_vector();
    let na = va.x.abs().max(va.y.abs()).max(va.z.abs());
    let nb = vb.x.abs().max(vb.y.abs()).max(vb.z.abs());
    for (ca, cb) in [(va.x / na, vb.x / nb), (va.y / na, vb.y / nb), (va.z / na, vb.z / nb)] {
        assert!((ca - cb).abs() < 1e-9, "directions diverge: {va:?} vs {vb:?}");
    }
}

/// A 10-degree grid over the sphere that avoids the exact poles and the
/// exact cube edges (which sit on 45-degree diagonals).
fn sphere_grid() -> Vec<Angles> {
    let mut grid = Vec::new();
    for az_step in 0..36 {
        for alt_step in 1..18 {
            grid.push(Angles::new(
                f64::from(az_step) / 36.0 * TAU,
                (f64::from(alt_step) / 18.0 - 0.5) * PI,
            ));
        }
    }
    grid
}

#[test]
fn cubemap_assigns_every_direction_to_a_populated_cell() {
    let proj = CubemapProjection;
    for angles in sphere_grid() {
        let d = Direction::Angles(angles);
        let p = proj.direction_to_point(d).unwrap();
        assert!(
            (0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y),
            "point off the image for {angles:?}: {p:?}"
        );

        let cell_x = (p.x * 4.0).floor() as i64;
        let cell_y = (p.y * 3.0).floor() as i64;
        assert!(
            Face::from_cell(cell_x, cell_y).is_some(),
            "direction {angles:?} landed in empty cell ({cell_x}, {cell_y})"
        );

        let back = proj.point_to_direction(p).unwrap();
        assert_same_direction(d, back);
    }
}

#[test]
fn equirectangular_covers_the_whole_sphere() {
    let proj = EquirectangularProjection;
    for angles in sphere_grid() {
        let p = proj.direction_to_point(Direction::Angles(angles)).unwrap();
        assert!((0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y));
        let back = proj.point_to_direction(p).unwrap();
        assert_same_direction(Direction::Angles(angles), back);
    }
}

#[test]
fn hemispherical_field_has_a_sharp_boundary() {
    let proj = HemisphericalProjection::default();

    // Just inside and just outside the field along the azimuth-zero edge.
    let inside = Direction::Angles(Angles::new(0.0, 0.01));
    assert!(proj.direction_to_point(inside).is_some());

    let outside = Direction::Angles(Angles::new(0.0, -0.01));
    assert!(proj.direction_to_point(outside).is_none());
}

#[test]
fn hemispherical_roundtrip_through_other_projections() {
    // Directions visible to the hemisphere survive a detour through its
    // image plane.
    let hemi = HemisphericalProjection::default();
    for angles in sphere_grid() {
        let d = Direction::Angles(angles);
        let Some(p) = hemi.direction_to_point(d) else {
            continue;
        };
        let back = hemi.point_to_direction(p).unwrap();
        assert_same_direction(d, back);
    }
}

#[test]
fn cross_shape_leaves_exactly_six_gaps() {
    let proj = CubemapProjection;
    let mut gaps = 0;
    for cell_y in 0..3 {
        for cell_x in 0..4 {
            let center = Point::new(
                (f64::from(cell_x) + 0.5) / 4.0,
                (f64::from(cell_y) + 0.5) / 3.0,
            );
            if proj.point_to_direction(center).is_none() {
                gaps += 1;
            }
        }
    }
    assert_eq!(gaps, 6);
}
