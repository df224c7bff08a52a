//! Isoparametric geometry of the bilinear quadrilateral
//!
//! The Jacobian of the bilinear map has the closed form
//!
//! ```text
//! x,r = (Ax + s·Bx)/4    x,s = (Cx + r·Bx)/4
//! y,r = (Ay + s·By)/4    y,s = (Cy + r·By)/4
//! ```
//!
//! with the geometry constants built once from signed sums of the corner
//! coordinates. The determinant is affine in (r, s), so checking it at the
//! four corners of the natural domain bounds it over the whole element.

use crate::error::{PlateError, PlateResult};
use crate::math::shape::shape_n;
use crate::math::Mat2;

/// Relative tolerance on the Jacobian determinant, scaled by the squared
/// characteristic length of the element.
const DET_REL_TOL: f64 = 1e-10;

/// Planar corner coordinates of a quadrilateral plus the precomputed
/// geometry constants of its bilinear map.
#[derive(Debug, Clone)]
pub struct QuadGeometry {
    pub x: [f64; 4],
    pub y: [f64; 4],
    ax: f64,
    bx: f64,
    cx: f64,
    ay: f64,
    by: f64,
    cy: f64,
    det_tol: f64,
}

impl QuadGeometry {
    /// Build the geometry constants from corner coordinates ordered CCW.
    pub fn new(x: [f64; 4], y: [f64; 4]) -> Self {
        let ax = -x[0] + x[1] + x[2] - x[3];
        let bx = x[0] - x[1] + x[2] - x[3];
        let cx = -x[0] - x[1] + x[2] + x[3];
        let ay = -y[0] + y[1] + y[2] - y[3];
        let by = y[0] - y[1] + y[2] - y[3];
        let cy = -y[0] - y[1] + y[2] + y[3];

        // Characteristic length²: longest corner-to-corner distance²
        let mut l2_max = 0.0_f64;
        for i in 0..4 {
            for j in (i + 1)..4 {
                let d2 = (x[j] - x[i]).powi(2) + (y[j] - y[i]).powi(2);
                l2_max = l2_max.max(d2);
            }
        }

        Self {
            x,
            y,
            ax,
            bx,
            cx,
            ay,
            by,
            cy,
            det_tol: DET_REL_TOL * l2_max,
        }
    }

    /// The 2x2 Jacobian [[x,r  y,r], [x,s  y,s]] at (r, s).
    pub fn jacobian(&self, r: f64, s: f64) -> Mat2 {
        Mat2::new(
            (self.ax + s * self.bx) / 4.0,
            (self.ay + s * self.by) / 4.0,
            (self.cx + r * self.bx) / 4.0,
            (self.cy + r * self.by) / 4.0,
        )
    }

    /// Jacobian determinant at (r, s); the area scale dA = |J| dr ds.
    pub fn det(&self, r: f64, s: f64) -> f64 {
        let j = self.jacobian(r, s);
        j[(0, 0)] * j[(1, 1)] - j[(0, 1)] * j[(1, 0)]
    }

    /// Inverse Jacobian and determinant at (r, s).
    ///
    /// Fails if the determinant is non-positive or below tolerance, which
    /// would make the natural-to-physical derivative mapping meaningless.
    pub fn inverse_at(&self, r: f64, s: f64, element: &str) -> PlateResult<(Mat2, f64)> {
        let j = self.jacobian(r, s);
        let det = j[(0, 0)] * j[(1, 1)] - j[(0, 1)] * j[(1, 0)];
        if !(det > self.det_tol) {
            return Err(PlateError::degenerate(
                element,
                format!("Jacobian determinant {det:.3e} at (r={r:.3}, s={s:.3})"),
            ));
        }
        let inv = Mat2::new(j[(1, 1)], -j[(0, 1)], -j[(1, 0)], j[(0, 0)]) / det;
        Ok((inv, det))
    }

    /// Check the Jacobian determinant over the whole natural domain.
    ///
    /// |J| is affine in (r, s), so strict positivity at the four corners is
    /// equivalent to strict positivity everywhere, Gauss points included.
    pub fn validate(&self, element: &str) -> PlateResult<()> {
        for &(r, s) in &[(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let det = self.det(r, s);
            if !(det > self.det_tol) {
                return Err(PlateError::degenerate(
                    element,
                    format!(
                        "Jacobian determinant {det:.3e} at corner (r={r:.0}, s={s:.0}); \
                         corners must be ordered counter-clockwise and non-collinear"
                    ),
                ));
            }
        }
        Ok(())
    }

    /// Physical point mapped from (r, s).
    pub fn point(&self, r: f64, s: f64) -> (f64, f64) {
        let n = shape_n(r, s);
        let x = (0..4).map(|i| n[i] * self.x[i]).sum();
        let y = (0..4).map(|i| n[i] * self.y[i]).sum();
        (x, y)
    }

    /// Element area, integrated with the 2x2 rule (exact: |J| is affine).
    pub fn area(&self) -> f64 {
        crate::math::shape::gauss_2x2()
            .iter()
            .map(|gp| gp.weight * self.det(gp.r, gp.s))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square() -> QuadGeometry {
        QuadGeometry::new([0.0, 1.0, 1.0, 0.0], [0.0, 0.0, 1.0, 1.0])
    }

    #[test]
    fn unit_square_jacobian_is_constant() {
        let geom = unit_square();
        for &(r, s) in &[(0.0, 0.0), (0.5, -0.3), (-1.0, 1.0)] {
            let j = geom.jacobian(r, s);
            assert_relative_eq!(j[(0, 0)], 0.5, epsilon = 1e-14);
            assert_relative_eq!(j[(0, 1)], 0.0, epsilon = 1e-14);
            assert_relative_eq!(j[(1, 0)], 0.0, epsilon = 1e-14);
            assert_relative_eq!(j[(1, 1)], 0.5, epsilon = 1e-14);
            assert_relative_eq!(geom.det(r, s), 0.25, epsilon = 1e-14);
        }
        assert_relative_eq!(geom.area(), 1.0, epsilon = 1e-13);
    }

    #[test]
    fn distorted_quad_area_matches_shoelace() {
        let x = [0.0, 2.2, 2.0, -0.3];
        let y = [0.0, 0.1, 1.8, 1.5];
        let geom = QuadGeometry::new(x, y);
        geom.validate("Q1").unwrap();

        let mut shoelace = 0.0;
        for i in 0..4 {
            let j = (i + 1) % 4;
            shoelace += x[i] * y[j] - x[j] * y[i];
        }
        shoelace *= 0.5;
        assert_relative_eq!(geom.area(), shoelace, epsilon = 1e-12);
    }

    #[test]
    fn inverse_round_trips() {
        let geom = QuadGeometry::new([0.0, 2.0, 2.5, 0.4], [0.0, 0.2, 1.9, 1.6]);
        let (inv, det) = geom.inverse_at(0.3, -0.4, "Q1").unwrap();
        let j = geom.jacobian(0.3, -0.4);
        let ident = inv * j;
        assert_relative_eq!(ident[(0, 0)], 1.0, epsilon = 1e-12);
        assert_relative_eq!(ident[(1, 1)], 1.0, epsilon = 1e-12);
        assert_relative_eq!(ident[(0, 1)], 0.0, epsilon = 1e-12);
        assert_relative_eq!(ident[(1, 0)], 0.0, epsilon = 1e-12);
        assert!(det > 0.0);
    }

    #[test]
    fn collinear_corners_are_rejected() {
        // Corners 1, 2, 3 on a line: |J| hits zero at a corner
        let geom = QuadGeometry::new([0.0, 1.0, 2.0, 0.0], [0.0, 0.0, 0.0, 1.0]);
        let err = geom.validate("bad").unwrap_err();
        assert!(matches!(err, PlateError::DegenerateGeometry { .. }));
    }

    #[test]
    fn clockwise_winding_is_rejected() {
        let geom = QuadGeometry::new([0.0, 0.0, 1.0, 1.0], [0.0, 1.0, 1.0, 0.0]);
        let err = geom.validate("cw").unwrap_err();
        assert!(matches!(err, PlateError::DegenerateGeometry { .. }));
    }

    #[test]
    fn midpoint_maps_to_centroid_of_parallelogram() {
        let geom = QuadGeometry::new([0.0, 2.0, 3.0, 1.0], [0.0, 0.5, 2.5, 2.0]);
        let (x, y) = geom.point(0.0, 0.0);
        assert_relative_eq!(x, 1.5, epsilon = 1e-14);
        assert_relative_eq!(y, 1.25, epsilon = 1e-14);
    }
}
