//! View-frustum culling.
//!
//! The six clip planes are pulled straight out of a combined view-projection
//! matrix (Gribb/Hartmann), so any projection the camera produces can be
//! culled against without knowing its parameters.

use cgmath::{InnerSpace, Matrix, Matrix4, Point3, Vector4};

/// Planes shorter than this are left as they are.
const MIN_PLANE_LENGTH: f32 = 1e-8;

/// Index of each plane inside [`Frustum::planes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrustumPlane {
    /// `x >= -w`
    Left = 0,
    /// `x <= w`
    Right = 1,
    /// `y >= -w`
    Bottom = 2,
    /// `y <= w`
    Top = 3,
    /// `z >= -w`
    Near = 4,
    /// `z <= w`
    Far = 5,
}

/// Six clip planes stored as `(nx, ny, nz, d)`.
///
/// A point `p` is on the visible side of a plane when `n · p + d >= 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    planes: [Vector4<f32>; 6],
}

impl Frustum {
    /// Extracts the frustum of a view-projection matrix with clip-space depth
    /// in `[-w, w]`.
    ///
    /// Each plane is normalized by the length of its normal. A degenerate
    /// matrix can yield planes with no length at all; those are kept
    /// unnormalized.
    pub fn from_view_projection(view_projection: Matrix4<f32>) -> Self {
        let r0 = view_projection.row(0);
        let r1 = view_projection.row(1);
        let r2 = view_projection.row(2);
        let r3 = view_projection.row(3);

        let planes = [r3 + r0, r3 - r0, r3 + r1, r3 - r1, r3 + r2, r3 - r2].map(normalize_plane);

        Self { planes }
    }

    /// The planes in [`FrustumPlane`] order.
    pub fn planes(&self) -> &[Vector4<f32>; 6] {
        &self.planes
    }

    /// A single plane.
    pub fn plane(&self, plane: FrustumPlane) -> Vector4<f32> {
        self.planes[plane as usize]
    }

    /// Whether the point lies inside or on every plane.
    pub fn contains_point(&self, point: Point3<f32>) -> bool {
        self.planes
            .iter()
            .all(|plane| signed_distance(plane, point) >= 0.0)
    }

    /// Conservative box test.
    ///
    /// For every plane only the box corner furthest along the plane normal is
    /// checked. If that corner is behind any plane the whole box is outside.
    /// A box that touches the frustum is never rejected; a box just outside
    /// near a frustum edge may still be reported visible.
    pub fn intersects_aabb(&self, min: Point3<f32>, max: Point3<f32>) -> bool {
        self.planes.iter().all(|plane| {
            let positive = Point3::new(
                if plane.x >= 0.0 { max.x } else { min.x },
                if plane.y >= 0.0 { max.y } else { min.y },
                if plane.z >= 0.0 { max.z } else { min.z },
            );
            signed_distance(plane, positive) >= 0.0
        })
    }
}

#[inline]
fn signed_distance(plane: &Vector4<f32>, point: Point3<f32>) -> f32 {
    plane.x * point.x + plane.y * point.y + plane.z * point.z + plane.w
}

fn normalize_plane(plane: Vector4<f32>) -> Vector4<f32> {
    let length = plane.truncate().magnitude();
    if length > MIN_PLANE_LENGTH {
        plane / length
    } else {
        plane
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cgmath::{perspective, Deg, SquareMatrix, Vector3, Zero};
    use test_case::test_case;

    fn camera_looking_down_negative_z() -> Frustum {
        let projection = perspective(Deg(70.0), 1.0, 0.1, 100.0);
        let view = Matrix4::look_at_rh(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, -1.0),
            Vector3::unit_y(),
        );
        Frustum::from_view_projection(projection * view)
    }

    #[test]
    fn identity_keeps_the_unit_box() {
        let frustum = Frustum::from_view_projection(Matrix4::identity());
        assert!(frustum.intersects_aabb(Point3::new(-0.5, -0.5, -0.5), Point3::new(0.5, 0.5, 0.5)));
        assert!(frustum.contains_point(Point3::new(0.0, 0.0, 0.0)));
    }

    #[test_case([10.0, 0.0, 0.0] ; "right")]
    #[test_case([-11.0, 0.0, 0.0] ; "left")]
    #[test_case([0.0, 10.0, 0.0] ; "above")]
    #[test_case([0.0, 0.0, -11.0] ; "past near")]
    fn identity_rejects_boxes_outside_one_plane(min: [f32; 3]) {
        let frustum = Frustum::from_view_projection(Matrix4::identity());
        let min = Point3::from(min);
        let max = min + Vector3::new(1.0, 1.0, 1.0);
        assert!(!frustum.intersects_aabb(min, max));
    }

    #[test]
    fn box_straddling_a_plane_is_kept() {
        let frustum = Frustum::from_view_projection(Matrix4::identity());
        assert!(frustum.intersects_aabb(Point3::new(0.5, -0.5, -0.5), Point3::new(3.0, 0.5, 0.5)));
    }

    #[test]
    fn identity_planes_are_unit_length() {
        let frustum = Frustum::from_view_projection(Matrix4::identity());
        assert_eq!(frustum.plane(FrustumPlane::Left), Vector4::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(frustum.plane(FrustumPlane::Far), Vector4::new(0.0, 0.0, -1.0, 1.0));
    }

    #[test]
    fn perspective_planes_are_normalized() {
        for plane in camera_looking_down_negative_z().planes() {
            assert_relative_eq!(plane.truncate().magnitude(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn perspective_culls_behind_and_beyond() {
        let frustum = camera_looking_down_negative_z();
        let unit = Vector3::new(1.0, 1.0, 1.0);

        let ahead = Point3::new(-0.5, -0.5, -10.0);
        assert!(frustum.intersects_aabb(ahead, ahead + unit));

        let behind = Point3::new(-0.5, -0.5, 5.0);
        assert!(!frustum.intersects_aabb(behind, behind + unit));

        let too_far = Point3::new(-0.5, -0.5, -150.0);
        assert!(!frustum.intersects_aabb(too_far, too_far + unit));

        let off_side = Point3::new(50.0, -0.5, -10.0);
        assert!(!frustum.intersects_aabb(off_side, off_side + unit));
    }

    #[test]
    fn near_plane_distance_matches_projection() {
        let near = camera_looking_down_negative_z().plane(FrustumPlane::Near);
        // Visible side is -z, and the plane sits at z = -0.1.
        assert_relative_eq!(near.z, -1.0, epsilon = 1e-5);
        assert_relative_eq!(near.w, -0.1, epsilon = 1e-4);
    }

    #[test]
    fn degenerate_matrix_is_not_normalized() {
        let frustum = Frustum::from_view_projection(Matrix4::zero());
        assert!(frustum.planes().iter().all(|p| *p == Vector4::zero()));
        // Every point satisfies 0 >= 0, so nothing is culled.
        assert!(frustum.intersects_aabb(Point3::new(100.0, 100.0, 100.0), Point3::new(101.0, 101.0, 101.0)));
    }
}
