//! Corner nodes and the local plane of a plate element

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::{PlateError, PlateResult};
use crate::math::Mat24;

/// A plate corner in the element's local planar coordinate system
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CornerNode {
    /// Local x coordinate
    pub x: f64,
    /// Local y coordinate
    pub y: f64,
}

impl CornerNode {
    /// Create a new corner at the given local coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Get the coordinates as an array
    pub fn coords(&self) -> [f64; 2] {
        [self.x, self.y]
    }

    /// Distance to another corner
    pub fn distance_to(&self, other: &CornerNode) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Local coordinate system of a plate whose corners live in 3D space
///
/// The local x axis runs from the midpoint of side 4-1 to the midpoint of
/// side 2-3, the z axis is normal to the plate, and y completes the
/// right-handed triad. Corners are projected onto the x-y plane; a small
/// out-of-plane warp is flattened.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LocalPlane {
    pub origin: [f64; 3],
    pub x_axis: [f64; 3],
    pub y_axis: [f64; 3],
    pub z_axis: [f64; 3],
}

impl LocalPlane {
    /// Build the local plane from four 3D corners ordered CCW when viewed
    /// from the +z side.
    pub fn from_corners(corners: &[[f64; 3]; 4], element: &str) -> PlateResult<Self> {
        let p: Vec<Vector3<f64>> = corners.iter().map(|c| Vector3::from_row_slice(c)).collect();

        let mid_41 = (p[3] + p[0]) / 2.0;
        let mid_23 = (p[1] + p[2]) / 2.0;
        let mid_12 = (p[0] + p[1]) / 2.0;
        let mid_34 = (p[2] + p[3]) / 2.0;

        let x_raw = mid_23 - mid_41;
        let v_raw = mid_34 - mid_12;

        let x_norm = x_raw.norm();
        if x_norm < f64::EPSILON {
            return Err(PlateError::degenerate(element, "opposite side midpoints coincide"));
        }
        let x_axis = x_raw / x_norm;

        let z_raw = x_axis.cross(&v_raw);
        let z_norm = z_raw.norm();
        if z_norm < f64::EPSILON {
            return Err(PlateError::degenerate(element, "corners do not span a plane"));
        }
        let z_axis = z_raw / z_norm;
        let y_axis = z_axis.cross(&x_axis);

        Ok(Self {
            origin: corners[0],
            x_axis: x_axis.into(),
            y_axis: y_axis.into(),
            z_axis: z_axis.into(),
        })
    }

    /// Project a 3D point onto the local x-y plane.
    pub fn project(&self, point: &[f64; 3]) -> CornerNode {
        let d = Vector3::new(
            point[0] - self.origin[0],
            point[1] - self.origin[1],
            point[2] - self.origin[2],
        );
        CornerNode::new(
            d.dot(&Vector3::from_row_slice(&self.x_axis)),
            d.dot(&Vector3::from_row_slice(&self.y_axis)),
        )
    }

    /// 24x24 global-to-local transformation matrix: eight diagonal 3x3
    /// direction-cosine blocks, one per translation/rotation triple.
    pub fn transformation(&self) -> Mat24 {
        let mut t = Mat24::zeros();
        let dir = [self.x_axis, self.y_axis, self.z_axis];
        for block in 0..8 {
            let offset = block * 3;
            for (row, axis) in dir.iter().enumerate() {
                for col in 0..3 {
                    t[(offset + row, offset + col)] = axis[col];
                }
            }
        }
        t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn corner_distance() {
        let a = CornerNode::new(0.0, 0.0);
        let b = CornerNode::new(3.0, 4.0);
        assert_relative_eq!(a.distance_to(&b), 5.0, epsilon = 1e-14);
    }

    #[test]
    fn plane_in_xy_is_identity() {
        let corners = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ];
        let plane = LocalPlane::from_corners(&corners, "P1").unwrap();
        assert_relative_eq!(plane.x_axis[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(plane.y_axis[1], 1.0, epsilon = 1e-12);
        assert_relative_eq!(plane.z_axis[2], 1.0, epsilon = 1e-12);

        let c = plane.project(&[0.25, 0.75, 0.0]);
        assert_relative_eq!(c.x, 0.25, epsilon = 1e-12);
        assert_relative_eq!(c.y, 0.75, epsilon = 1e-12);
    }

    #[test]
    fn projection_preserves_in_plane_distances_for_tilted_plate() {
        // Unit square tilted 45° about the x axis
        let h = 1.0 / 2.0_f64.sqrt();
        let corners = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, h, h],
            [0.0, h, h],
        ];
        let plane = LocalPlane::from_corners(&corners, "P1").unwrap();
        let locals: Vec<CornerNode> = corners.iter().map(|c| plane.project(c)).collect();
        assert_relative_eq!(locals[0].distance_to(&locals[1]), 1.0, epsilon = 1e-12);
        assert_relative_eq!(locals[1].distance_to(&locals[2]), 1.0, epsilon = 1e-12);
        assert_relative_eq!(locals[0].distance_to(&locals[2]), 2.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn transformation_blocks_are_orthonormal() {
        let corners = [
            [0.0, 0.0, 0.0],
            [2.0, 0.0, 1.0],
            [2.0, 2.0, 1.0],
            [0.0, 2.0, 0.0],
        ];
        let plane = LocalPlane::from_corners(&corners, "P1").unwrap();
        let t = plane.transformation();
        let ident = t * t.transpose();
        for i in 0..24 {
            for j in 0..24 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(ident[(i, j)], expected, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn collapsed_corners_are_rejected() {
        let corners = [[0.0, 0.0, 0.0]; 4];
        let err = LocalPlane::from_corners(&corners, "flat").unwrap_err();
        assert!(matches!(err, PlateError::DegenerateGeometry { .. }));
    }
}
