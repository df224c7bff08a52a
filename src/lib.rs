//! dkmq-plate - DKMQ quadrilateral plate element stiffness evaluator
//!
//! A leaf numerical library computing the elastic stiffness matrix of the
//! DKMQ (Discrete Kirchhoff-Mindlin Quadrilateral) plate-bending element:
//! 4 corner nodes, 3 DOFs per node (transverse deflection `w`, rotations
//! `θx`, `θy`), valid for thick and thin plates and free of shear locking
//! on general quadrilaterals. In-plane (membrane) behavior is tracked on
//! its own 8-DOF block, and both combine into the 24-DOF local shell
//! stiffness a 3D assembler would scatter into a global system.
//!
//! The evaluator is a pure function of the element data: no shared mutable
//! state, safe to call concurrently for independent elements. Mesh
//! management, global assembly, boundary conditions and solving are the
//! caller's concern.
//!
//! ## Example
//! ```rust
//! use dkmq_plate::prelude::*;
//!
//! let plate = DkmqPlate::new(
//!     "P1",
//!     [
//!         CornerNode::new(0.0, 0.0),
//!         CornerNode::new(1.0, 0.0),
//!         CornerNode::new(1.0, 1.0),
//!         CornerNode::new(0.0, 1.0),
//!     ],
//!     0.01,
//!     Material::isotropic(200e9, 0.3),
//! );
//!
//! // 12x12 plate stiffness, DOFs [w1, θx1, θy1, ..., w4, θx4, θy4]
//! let k = plate.plate_stiffness().unwrap();
//! assert_eq!((k.nrows(), k.ncols()), (12, 12));
//!
//! // 24x24 local shell stiffness including the membrane block
//! let k_shell = plate.shell_stiffness().unwrap();
//! assert_eq!((k_shell.nrows(), k_shell.ncols()), (24, 24));
//! ```

pub mod elements;
pub mod error;
pub mod math;

// Re-export common types
pub mod prelude {
    pub use crate::elements::{
        CornerNode, DkmqPlate, LocalPlane, Material, PlateStressState, DEFAULT_SHEAR_CORRECTION,
    };
    pub use crate::error::{PlateError, PlateResult};
    pub use crate::math::{Mat12, Mat2, Mat24, Mat3, Mat8, Vec12, Vec2, Vec24, Vec3, Vec8};
}
