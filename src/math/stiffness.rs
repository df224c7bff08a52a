//! Quadrature driver and element matrix assembly
//!
//! Integrates `[k] = Σ w·BᵀDB·|J|` over the fixed 2x2 Gauss rule, separately
//! for the bending, shear and membrane contributions, and provides the DOF
//! expansion to the 24x24 local shell matrix along with consistent pressure
//! loads and stress recovery.

use log::debug;

use crate::error::PlateResult;
use crate::math::dkmq::{
    b_bending, b_membrane, b_shear, edge_shear_rows, rotation_increment_rows, EdgeGeometry,
};
use crate::math::geometry::QuadGeometry;
use crate::math::shape::{gauss_2x2, shape_n};
use crate::math::{Mat12, Mat2, Mat24, Mat3, Mat8, Vec12, Vec2, Vec24, Vec3, Vec8};

/// Bending stiffness contribution `k_b` (12x12).
pub fn bending_stiffness(
    geom: &QuadGeometry,
    edges: &[EdgeGeometry; 4],
    db: &Mat3,
    element: &str,
) -> PlateResult<Mat12> {
    let inc_rows = rotation_increment_rows(edges);
    let mut k = Mat12::zeros();
    for gp in gauss_2x2() {
        let (j_inv, det) = geom.inverse_at(gp.r, gp.s, element)?;
        let b = b_bending(&j_inv, gp.r, gp.s, edges, &inc_rows);
        k += b.transpose() * db * b * (gp.weight * det);
    }
    Ok(k)
}

/// Transverse shear stiffness contribution `k_s` (12x12).
pub fn shear_stiffness(
    geom: &QuadGeometry,
    edges: &[EdgeGeometry; 4],
    ds: &Mat2,
    element: &str,
) -> PlateResult<Mat12> {
    let shear_rows = edge_shear_rows(edges);
    let mut k = Mat12::zeros();
    for gp in gauss_2x2() {
        let (j_inv, det) = geom.inverse_at(gp.r, gp.s, element)?;
        let b = b_shear(&j_inv, gp.r, gp.s, edges, &shear_rows);
        k += b.transpose() * ds * b * (gp.weight * det);
    }
    Ok(k)
}

/// Plate stiffness `k_p = k_b + k_s` (12x12), one pass over the Gauss rule.
pub fn plate_stiffness(
    geom: &QuadGeometry,
    edges: &[EdgeGeometry; 4],
    db: &Mat3,
    ds: &Mat2,
    element: &str,
) -> PlateResult<Mat12> {
    let inc_rows = rotation_increment_rows(edges);
    let shear_rows = edge_shear_rows(edges);
    let mut k = Mat12::zeros();
    for gp in gauss_2x2() {
        let (j_inv, det) = geom.inverse_at(gp.r, gp.s, element)?;
        let bb = b_bending(&j_inv, gp.r, gp.s, edges, &inc_rows);
        let bs = b_shear(&j_inv, gp.r, gp.s, edges, &shear_rows);
        k += bb.transpose() * db * bb * (gp.weight * det);
        k += bs.transpose() * ds * bs * (gp.weight * det);
    }
    debug!("element '{element}': 12x12 plate stiffness assembled over 4 Gauss points");
    Ok(k)
}

/// Membrane stiffness `k_m` (8x8) for plane stress, scaled by thickness.
pub fn membrane_stiffness(
    geom: &QuadGeometry,
    dm: &Mat3,
    t: f64,
    element: &str,
) -> PlateResult<Mat8> {
    let mut k = Mat8::zeros();
    for gp in gauss_2x2() {
        let (j_inv, det) = geom.inverse_at(gp.r, gp.s, element)?;
        let b = b_membrane(&j_inv, gp.r, gp.s);
        k += b.transpose() * dm * b * (t * gp.weight * det);
    }
    Ok(k)
}

/// Combine plate and membrane parts into the 24x24 local shell stiffness.
///
/// DOF order is `[DX, DY, DZ, RX, RY, RZ]` per node: membrane lands on
/// (DX, DY), the plate on (DZ, RX, RY), and the drilling rotation RZ gets a
/// weak spring sized from the smallest rotational diagonal so the shell
/// matrix is non-singular once assembled in 3D.
pub fn shell_stiffness(kp: &Mat12, km: &Mat8) -> Mat24 {
    let mut k = Mat24::zeros();

    let plate_map = plate_dof_map();
    for (i, &mi) in plate_map.iter().enumerate() {
        for (j, &mj) in plate_map.iter().enumerate() {
            k[(mi, mj)] = kp[(i, j)];
        }
    }

    let membrane_map = membrane_dof_map();
    for (i, &mi) in membrane_map.iter().enumerate() {
        for (j, &mj) in membrane_map.iter().enumerate() {
            k[(mi, mj)] = km[(i, j)];
        }
    }

    // Weak drilling spring: smallest rotational diagonal / 1000
    let mut min_rot = f64::MAX;
    for i in 0..4 {
        for off in [1, 2] {
            let d = kp[(3 * i + off, 3 * i + off)].abs();
            if d > 1e-10 && d < min_rot {
                min_rot = d;
            }
        }
    }
    if min_rot == f64::MAX {
        let mut max_mem = 0.0_f64;
        for i in 0..8 {
            max_mem = max_mem.max(km[(i, i)].abs());
        }
        min_rot = max_mem / 100.0;
    }
    let k_rz = min_rot / 1000.0;
    for i in 0..4 {
        k[(6 * i + 5, 6 * i + 5)] = k_rz;
    }

    debug!("24x24 shell stiffness assembled, drilling spring {k_rz:.3e}");
    k
}

/// Consistent nodal loads (12-vector) for a uniform pressure normal to the
/// plate: `f_wi = ∫ N_i·p·|J| dr ds`, landing on the deflection DOFs only.
pub fn pressure_load(geom: &QuadGeometry, p: f64, element: &str) -> PlateResult<Vec12> {
    let mut f = Vec12::zeros();
    for gp in gauss_2x2() {
        let (_, det) = geom.inverse_at(gp.r, gp.s, element)?;
        let n = shape_n(gp.r, gp.s);
        for i in 0..4 {
            f[3 * i] += n[i] * p * gp.weight * det;
        }
    }
    Ok(f)
}

/// Pressure loads expanded to the 24-DOF shell ordering.
pub fn shell_pressure_load(geom: &QuadGeometry, p: f64, element: &str) -> PlateResult<Vec24> {
    let f12 = pressure_load(geom, p, element)?;
    let mut f = Vec24::zeros();
    for (i, &mi) in plate_dof_map().iter().enumerate() {
        f[mi] = f12[i];
    }
    Ok(f)
}

/// Bending moment resultants `[Mx, My, Mxy] = D_b·B_b·d` at (r, s).
pub fn bending_moments(
    geom: &QuadGeometry,
    edges: &[EdgeGeometry; 4],
    db: &Mat3,
    r: f64,
    s: f64,
    d: &Vec12,
    element: &str,
) -> PlateResult<Vec3> {
    let inc_rows = rotation_increment_rows(edges);
    let (j_inv, _) = geom.inverse_at(r, s, element)?;
    let kappa = b_bending(&j_inv, r, s, edges, &inc_rows) * d;
    Ok(db * kappa)
}

/// Transverse shear resultants `[Qx, Qy] = D_s·B_s·d` at (r, s).
pub fn transverse_shears(
    geom: &QuadGeometry,
    edges: &[EdgeGeometry; 4],
    ds: &Mat2,
    r: f64,
    s: f64,
    d: &Vec12,
    element: &str,
) -> PlateResult<Vec2> {
    let shear_rows = edge_shear_rows(edges);
    let (j_inv, _) = geom.inverse_at(r, s, element)?;
    let gamma = b_shear(&j_inv, r, s, edges, &shear_rows) * d;
    Ok(ds * gamma)
}

/// In-plane stresses `[σx, σy, τxy] = D_m·B_m·d` at (r, s).
pub fn membrane_stresses(
    geom: &QuadGeometry,
    dm: &Mat3,
    r: f64,
    s: f64,
    d: &Vec8,
    element: &str,
) -> PlateResult<Vec3> {
    let (j_inv, _) = geom.inverse_at(r, s, element)?;
    let eps = b_membrane(&j_inv, r, s) * d;
    Ok(dm * eps)
}

/// Plate DOF (w, θx, θy) positions inside the 24-DOF shell ordering.
fn plate_dof_map() -> [usize; 12] {
    [2, 3, 4, 8, 9, 10, 14, 15, 16, 20, 21, 22]
}

/// Membrane DOF (u, v) positions inside the 24-DOF shell ordering.
fn membrane_dof_map() -> [usize; 8] {
    [0, 1, 6, 7, 12, 13, 18, 19]
}
