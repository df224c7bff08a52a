//! Material properties and plate constitutive matrices

use serde::{Deserialize, Serialize};

use crate::error::{PlateError, PlateResult};
use crate::math::{Mat2, Mat3};

/// Isotropic elastic material for plate analysis
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Material {
    /// Modulus of elasticity (Young's modulus) in Pa
    pub e: f64,
    /// Shear modulus in Pa
    pub g: f64,
    /// Poisson's ratio
    pub nu: f64,
    /// Transverse shear correction factor
    pub shear_correction: f64,
}

/// Conventional shear correction factor for a homogeneous cross-section
pub const DEFAULT_SHEAR_CORRECTION: f64 = 5.0 / 6.0;

impl Material {
    /// Create a new material with given properties
    pub fn new(e: f64, g: f64, nu: f64) -> Self {
        Self {
            e,
            g,
            nu,
            shear_correction: DEFAULT_SHEAR_CORRECTION,
        }
    }

    /// Create an isotropic material from E and nu.
    /// G is calculated as E / (2 * (1 + nu))
    pub fn isotropic(e: f64, nu: f64) -> Self {
        Self::new(e, e / (2.0 * (1.0 + nu)), nu)
    }

    /// Override the transverse shear correction factor
    pub fn with_shear_correction(mut self, shear_correction: f64) -> Self {
        self.shear_correction = shear_correction;
        self
    }

    /// Standard structural steel
    pub fn steel() -> Self {
        Self::new(200e9, 77e9, 0.3)
    }

    /// Concrete from compressive strength fc (Pa), E per the ACI estimate
    pub fn concrete(fc: f64) -> Self {
        let fc_mpa = fc / 1e6;
        let e = 4700.0 * fc_mpa.sqrt() * 1e6;
        Self::isotropic(e, 0.2)
    }

    /// Aluminum (6061-T6)
    pub fn aluminum() -> Self {
        Self::new(68.9e9, 26e9, 0.33)
    }

    /// Reject out-of-range constants before any integration begins.
    pub fn validate(&self, element: &str) -> PlateResult<()> {
        if !(self.e.is_finite() && self.e > 0.0) {
            return Err(PlateError::material(
                element,
                format!("elastic modulus must be positive, got {}", self.e),
            ));
        }
        if !(self.g.is_finite() && self.g > 0.0) {
            return Err(PlateError::material(
                element,
                format!("shear modulus must be positive, got {}", self.g),
            ));
        }
        if !(self.nu > -1.0 && self.nu < 0.5) {
            return Err(PlateError::material(
                element,
                format!("Poisson ratio must lie in (-1, 0.5), got {}", self.nu),
            ));
        }
        if !(self.shear_correction.is_finite() && self.shear_correction > 0.0) {
            return Err(PlateError::material(
                element,
                format!(
                    "shear correction factor must be positive, got {}",
                    self.shear_correction
                ),
            ));
        }
        Ok(())
    }

    /// Plane-stress elasticity matrix (no thickness scale); relates strain
    /// to stress and feeds both the membrane and bending laws.
    pub fn plane_stress(&self) -> Mat3 {
        let c = self.e / (1.0 - self.nu * self.nu);
        Mat3::new(
            c, self.nu * c, 0.0,
            self.nu * c, c, 0.0,
            0.0, 0.0, self.g,
        )
    }

    /// Bending constitutive matrix `D_b`: plane stress scaled by t³/12,
    /// mapping curvatures to moment resultants.
    pub fn bending_rigidity(&self, t: f64) -> Mat3 {
        self.plane_stress() * (t.powi(3) / 12.0)
    }

    /// Transverse shear constitutive matrix `D_s = κ·G·t·I`, mapping shear
    /// strains to shear force resultants.
    pub fn shear_rigidity(&self, t: f64) -> Mat2 {
        let c = self.shear_correction * self.g * t;
        Mat2::new(c, 0.0, 0.0, c)
    }

    /// Isotropic plate flexural rigidity `D = E·t³ / (12·(1-ν²))`.
    pub fn flexural_rigidity(&self, t: f64) -> f64 {
        self.e * t.powi(3) / (12.0 * (1.0 - self.nu * self.nu))
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::steel()
    }
}
