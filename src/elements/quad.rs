//! DKMQ quadrilateral plate element
//!
//! A 4-node plate-bending element with 3 DOFs per node (w, θx, θy) built on
//! the discrete Kirchhoff-Mindlin formulation: valid for thick and thin
//! plates and free of shear locking on general quadrilaterals. Membrane
//! behavior is tracked on its own 8-DOF (u, v) block and both combine into
//! the 24-DOF local shell matrix.

use serde::{Deserialize, Serialize};

use crate::elements::material::Material;
use crate::elements::node::{CornerNode, LocalPlane};
use crate::error::{PlateError, PlateResult};
use crate::math::dkmq::{edge_geometry, EdgeGeometry};
use crate::math::geometry::QuadGeometry;
use crate::math::{stiffness, Mat12, Mat24, Mat8, Vec12, Vec2, Vec24, Vec3, Vec8};

/// A DKMQ plate element: four CCW corners in the local plane, a thickness
/// and a material. Pure value type; every compute call is a pure function
/// of this data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DkmqPlate {
    /// Element name, attached to every error for diagnostics
    pub name: String,
    /// Corners ordered counter-clockwise
    pub nodes: [CornerNode; 4],
    /// Plate thickness
    pub thickness: f64,
    /// Elastic material
    pub material: Material,
}

/// Resultants recovered at a point of the plate mid-surface
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlateStressState {
    /// Bending moment about the local y axis (per unit width)
    pub mx: f64,
    /// Bending moment about the local x axis (per unit width)
    pub my: f64,
    /// Twisting moment (per unit width)
    pub mxy: f64,
    /// Transverse shear force in the x-z plane
    pub qx: f64,
    /// Transverse shear force in the y-z plane
    pub qy: f64,
    /// Membrane stress in x
    pub sx: f64,
    /// Membrane stress in y
    pub sy: f64,
    /// Membrane shear stress
    pub txy: f64,
}

impl PlateStressState {
    /// Von Mises stress of the membrane (plane stress) state
    pub fn von_mises(&self) -> f64 {
        (self.sx.powi(2) - self.sx * self.sy + self.sy.powi(2) + 3.0 * self.txy.powi(2)).sqrt()
    }
}

impl DkmqPlate {
    /// Create a new element from corners already expressed in the local
    /// plane, ordered counter-clockwise.
    pub fn new(name: &str, nodes: [CornerNode; 4], thickness: f64, material: Material) -> Self {
        Self {
            name: name.to_string(),
            nodes,
            thickness,
            material,
        }
    }

    /// Create an element from four 3D corner points, projecting them onto
    /// the plate's own plane. Returns the element together with the local
    /// plane, whose `transformation()` maps the 24-DOF shell matrix to
    /// global coordinates.
    pub fn from_points_3d(
        name: &str,
        corners: &[[f64; 3]; 4],
        thickness: f64,
        material: Material,
    ) -> PlateResult<(Self, LocalPlane)> {
        let plane = LocalPlane::from_corners(corners, name)?;
        let nodes = [
            plane.project(&corners[0]),
            plane.project(&corners[1]),
            plane.project(&corners[2]),
            plane.project(&corners[3]),
        ];
        Ok((Self::new(name, nodes, thickness, material), plane))
    }

    /// Validate material, thickness and geometry without computing anything.
    pub fn validate(&self) -> PlateResult<()> {
        self.operators().map(|_| ())
    }

    /// Element area
    pub fn area(&self) -> f64 {
        self.geometry().area()
    }

    /// 12x12 plate stiffness: bending + transverse shear over the DOFs
    /// `[w1, θx1, θy1, ..., w4, θx4, θy4]`.
    pub fn plate_stiffness(&self) -> PlateResult<Mat12> {
        let (geom, edges) = self.operators()?;
        stiffness::plate_stiffness(
            &geom,
            &edges,
            &self.material.bending_rigidity(self.thickness),
            &self.material.shear_rigidity(self.thickness),
            &self.name,
        )
    }

    /// Bending contribution `k_b` alone (12x12).
    pub fn bending_stiffness(&self) -> PlateResult<Mat12> {
        let (geom, edges) = self.operators()?;
        stiffness::bending_stiffness(
            &geom,
            &edges,
            &self.material.bending_rigidity(self.thickness),
            &self.name,
        )
    }

    /// Transverse shear contribution `k_s` alone (12x12).
    pub fn shear_stiffness(&self) -> PlateResult<Mat12> {
        let (geom, edges) = self.operators()?;
        stiffness::shear_stiffness(
            &geom,
            &edges,
            &self.material.shear_rigidity(self.thickness),
            &self.name,
        )
    }

    /// 8x8 membrane stiffness over the DOFs `[u1, v1, ..., u4, v4]`.
    pub fn membrane_stiffness(&self) -> PlateResult<Mat8> {
        let (geom, _) = self.operators()?;
        stiffness::membrane_stiffness(
            &geom,
            &self.material.plane_stress(),
            self.thickness,
            &self.name,
        )
    }

    /// 24x24 local shell stiffness: plate + membrane + weak drilling
    /// springs, DOFs `[DX, DY, DZ, RX, RY, RZ]` per node.
    pub fn shell_stiffness(&self) -> PlateResult<Mat24> {
        let kp = self.plate_stiffness()?;
        let km = self.membrane_stiffness()?;
        Ok(stiffness::shell_stiffness(&kp, &km))
    }

    /// Consistent nodal loads for a uniform pressure normal to the plate
    /// (12-vector, deflection DOFs only).
    pub fn pressure_load(&self, p: f64) -> PlateResult<Vec12> {
        let (geom, _) = self.operators()?;
        stiffness::pressure_load(&geom, p, &self.name)
    }

    /// Pressure loads in the 24-DOF shell ordering.
    pub fn shell_pressure_load(&self, p: f64) -> PlateResult<Vec24> {
        let (geom, _) = self.operators()?;
        stiffness::shell_pressure_load(&geom, p, &self.name)
    }

    /// Moment resultants `[Mx, My, Mxy]` at natural coordinates (r, s) for
    /// a plate displacement vector.
    pub fn moments(&self, r: f64, s: f64, d: &Vec12) -> PlateResult<Vec3> {
        let (geom, edges) = self.operators()?;
        stiffness::bending_moments(
            &geom,
            &edges,
            &self.material.bending_rigidity(self.thickness),
            r,
            s,
            d,
            &self.name,
        )
    }

    /// Transverse shear resultants `[Qx, Qy]` at (r, s).
    pub fn shear_forces(&self, r: f64, s: f64, d: &Vec12) -> PlateResult<Vec2> {
        let (geom, edges) = self.operators()?;
        stiffness::transverse_shears(
            &geom,
            &edges,
            &self.material.shear_rigidity(self.thickness),
            r,
            s,
            d,
            &self.name,
        )
    }

    /// Membrane stresses `[σx, σy, τxy]` at (r, s) for a membrane
    /// displacement vector.
    pub fn membrane_stress_at(&self, r: f64, s: f64, d: &Vec8) -> PlateResult<Vec3> {
        let (geom, _) = self.operators()?;
        stiffness::membrane_stresses(&geom, &self.material.plane_stress(), r, s, d, &self.name)
    }

    /// Full resultant state at (r, s) given plate and membrane displacement
    /// vectors.
    pub fn stress_state(
        &self,
        r: f64,
        s: f64,
        d_plate: &Vec12,
        d_membrane: &Vec8,
    ) -> PlateResult<PlateStressState> {
        let m = self.moments(r, s, d_plate)?;
        let q = self.shear_forces(r, s, d_plate)?;
        let sig = self.membrane_stress_at(r, s, d_membrane)?;
        Ok(PlateStressState {
            mx: m[0],
            my: m[1],
            mxy: m[2],
            qx: q[0],
            qy: q[1],
            sx: sig[0],
            sy: sig[1],
            txy: sig[2],
        })
    }

    fn geometry(&self) -> QuadGeometry {
        QuadGeometry::new(
            [self.nodes[0].x, self.nodes[1].x, self.nodes[2].x, self.nodes[3].x],
            [self.nodes[0].y, self.nodes[1].y, self.nodes[2].y, self.nodes[3].y],
        )
    }

    /// Validate the element and build its geometric operators.
    fn operators(&self) -> PlateResult<(QuadGeometry, [EdgeGeometry; 4])> {
        self.material.validate(&self.name)?;
        if !(self.thickness.is_finite() && self.thickness > 0.0) {
            return Err(PlateError::material(
                &self.name,
                format!("thickness must be positive, got {}", self.thickness),
            ));
        }
        let geom = self.geometry();
        geom.validate(&self.name)?;
        let edges = edge_geometry(
            &geom,
            self.thickness,
            self.material.e,
            self.material.g,
            self.material.nu,
            self.material.shear_correction,
            &self.name,
        )?;
        Ok((geom, edges))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square(t: f64) -> DkmqPlate {
        DkmqPlate::new(
            "P1",
            [
                CornerNode::new(0.0, 0.0),
                CornerNode::new(1.0, 0.0),
                CornerNode::new(1.0, 1.0),
                CornerNode::new(0.0, 1.0),
            ],
            t,
            Material::isotropic(200e9, 0.3),
        )
    }

    #[test]
    fn valid_element_passes_validation() {
        unit_square(0.01).validate().unwrap();
    }

    #[test]
    fn zero_thickness_is_invalid_material() {
        let mut plate = unit_square(0.01);
        plate.thickness = 0.0;
        assert!(matches!(
            plate.validate().unwrap_err(),
            PlateError::InvalidMaterial { .. }
        ));
    }

    #[test]
    fn incompressible_poisson_is_invalid_material() {
        let mut plate = unit_square(0.01);
        plate.material = Material::new(200e9, 77e9, 0.5);
        let err = plate.plate_stiffness().unwrap_err();
        assert!(matches!(err, PlateError::InvalidMaterial { element, .. } if element == "P1"));
    }

    #[test]
    fn collinear_corners_are_degenerate() {
        let plate = DkmqPlate::new(
            "bad",
            [
                CornerNode::new(0.0, 0.0),
                CornerNode::new(1.0, 0.0),
                CornerNode::new(2.0, 0.0),
                CornerNode::new(0.0, 1.0),
            ],
            0.01,
            Material::steel(),
        );
        let err = plate.plate_stiffness().unwrap_err();
        assert!(matches!(err, PlateError::DegenerateGeometry { element, .. } if element == "bad"));
    }

    #[test]
    fn error_carries_element_name() {
        let mut plate = unit_square(0.01);
        plate.name = "wall-042".to_string();
        plate.material.e = -5.0;
        let err = plate.shell_stiffness().unwrap_err();
        assert!(err.to_string().contains("wall-042"));
    }

    #[test]
    fn plate_stiffness_splits_into_bending_and_shear() {
        let plate = unit_square(0.05);
        let kp = plate.plate_stiffness().unwrap();
        let kb = plate.bending_stiffness().unwrap();
        let ks = plate.shear_stiffness().unwrap();
        for i in 0..12 {
            for j in 0..12 {
                assert_relative_eq!(
                    kp[(i, j)],
                    kb[(i, j)] + ks[(i, j)],
                    max_relative = 1e-12,
                    epsilon = 1e-9
                );
            }
        }
    }

    #[test]
    fn element_from_tilted_3d_corners_matches_flat_element() {
        // Same square, one flat and one tilted 45° about x: identical local
        // geometry must yield identical plate stiffness
        let flat = unit_square(0.02);
        let h = 1.0 / 2.0_f64.sqrt();
        let (tilted, plane) = DkmqPlate::from_points_3d(
            "P1",
            &[
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [1.0, h, h],
                [0.0, h, h],
            ],
            0.02,
            Material::isotropic(200e9, 0.3),
        )
        .unwrap();

        let kf = flat.plate_stiffness().unwrap();
        let kt = tilted.plate_stiffness().unwrap();
        for i in 0..12 {
            for j in 0..12 {
                assert_relative_eq!(kf[(i, j)], kt[(i, j)], max_relative = 1e-9, epsilon = 1e-4);
            }
        }

        // local z must be normal to the tilted plate
        assert_relative_eq!(plane.z_axis[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(plane.z_axis[1], -h, epsilon = 1e-12);
        assert_relative_eq!(plane.z_axis[2], h, epsilon = 1e-12);
    }

    #[test]
    fn pressure_load_distributes_quarter_per_corner_on_square() {
        let plate = unit_square(0.01);
        let f = plate.pressure_load(1000.0).unwrap();
        for i in 0..4 {
            assert_relative_eq!(f[3 * i], 250.0, max_relative = 1e-12);
        }
    }

    #[test]
    fn von_mises_of_uniaxial_stress() {
        let state = PlateStressState {
            sx: 100.0,
            ..Default::default()
        };
        assert_relative_eq!(state.von_mises(), 100.0, epsilon = 1e-12);
    }
}
