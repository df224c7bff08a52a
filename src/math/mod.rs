//! Mathematical building blocks for the DKMQ element

pub mod dkmq;
pub mod geometry;
pub mod shape;
pub mod stiffness;

use nalgebra::{Matrix2, Matrix3, SMatrix, SVector, Vector2, Vector3};

pub type Mat2 = Matrix2<f64>;
pub type Mat3 = Matrix3<f64>;
pub type Vec2 = Vector2<f64>;
pub type Vec3 = Vector3<f64>;

/// 8x8 matrix for membrane stiffness (u, v at each node)
pub type Mat8 = SMatrix<f64, 8, 8>;
/// 8-element vector for membrane displacements
pub type Vec8 = SVector<f64, 8>;
/// 12x12 matrix for plate stiffness (w, θx, θy at each node)
pub type Mat12 = SMatrix<f64, 12, 12>;
/// 12-element vector for plate forces/displacements
pub type Vec12 = SVector<f64, 12>;
/// 24x24 matrix for shell stiffness (6 DOF at each node)
pub type Mat24 = SMatrix<f64, 24, 24>;
/// 24-element vector for shell forces/displacements
pub type Vec24 = SVector<f64, 24>;

/// 3x12 bending strain-displacement matrix
pub type B3x12 = SMatrix<f64, 3, 12>;
/// 2x12 transverse shear strain-displacement matrix
pub type B2x12 = SMatrix<f64, 2, 12>;
/// 3x8 membrane strain-displacement matrix
pub type B3x8 = SMatrix<f64, 3, 8>;

pub use geometry::QuadGeometry;
pub use shape::{gauss_2x2, GaussPoint};
pub use stiffness::{
    bending_moments, bending_stiffness, membrane_stiffness, membrane_stresses, plate_stiffness,
    pressure_load, shear_stiffness, shell_pressure_load, shell_stiffness, transverse_shears,
};
