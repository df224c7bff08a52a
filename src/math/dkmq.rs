//! Strain-displacement operators for the DKMQ plate element
//!
//! References:
//! - Katili, "A new discrete Kirchhoff-Mindlin element based on
//!   Mindlin-Reissner plate theory and assumed shear strain fields",
//!   Part II, IJNME 36 (1993)
//! - Katili, Batoz, Maknun et al., "A comparative formulation of DKMQ, DSQ
//!   and MITC4 quadrilateral plate elements" (2015)
//!
//! Plate DOFs are node-major `[w, θx, θy]` with right-hand-rule rotations
//! about the local x and y axes. Internally the formulation works with the
//! Mindlin normal-rotation components (`u = z·βx`, `v = z·βy`), related by
//! `βx = θy` and `βy = -θx`; the mapping is folded into the operator columns
//! so callers only ever see `[w, θx, θy]`.
//!
//! Each edge k spanning nodes (i, j) carries a quadratic tangential rotation
//! increment Δβ_k and a constant tangential shear γ̄_sk. Eliminating the
//! increment through the discrete Kirchhoff-Mindlin constraint gives
//!
//! ```text
//! Δβ_k  = -3/(2·L_k·(1+φ_k)) · [(w_j - w_i) + (L_k/2)·(β_si + β_sj)]
//! γ̄_sk =  φ_k/(1+φ_k) · [(w_j - w_i)/L_k + (β_si + β_sj)/2]
//! ```
//!
//! with the edge influence factor `φ_k = 12·D/(κ·G·t·L_k²)`. In the thin
//! limit (φ→0) the increments reduce to the discrete Kirchhoff constraints
//! and the tied shear vanishes; in the thick limit the increments vanish and
//! the tied shear becomes the mean Mindlin shear of the edge.

use nalgebra::{RowSVector, Vector3};

use crate::error::{PlateError, PlateResult};
use crate::math::geometry::QuadGeometry;
use crate::math::shape::{shape_n_deriv, shape_p_deriv};
use crate::math::{B2x12, B3x12, B3x8, Mat2};

/// Per-edge geometry and shear influence data, edges ordered
/// (1-2), (2-3), (3-4), (4-1).
#[derive(Debug, Clone, Copy)]
pub struct EdgeGeometry {
    /// Edge length
    pub length: f64,
    /// Direction cosine of the edge tangent
    pub cos: f64,
    /// Direction sine of the edge tangent
    pub sin: f64,
    /// Shear influence factor φ_k
    pub phi: f64,
}

/// Build the four edge records for a quadrilateral.
///
/// `phi_k = 12·D/(κ·G·t·L_k²)` with `D = E·t³/(12·(1-ν²))` the plate
/// rigidity. A zero-length edge would make the rotation-constraint operator
/// singular and is rejected here.
pub fn edge_geometry(
    geom: &QuadGeometry,
    t: f64,
    e: f64,
    g: f64,
    nu: f64,
    shear_correction: f64,
    element: &str,
) -> PlateResult<[EdgeGeometry; 4]> {
    let d_bend = e * t.powi(3) / (12.0 * (1.0 - nu * nu));

    let mut lengths = [0.0_f64; 4];
    for k in 0..4 {
        let j = (k + 1) % 4;
        lengths[k] = ((geom.x[j] - geom.x[k]).powi(2) + (geom.y[j] - geom.y[k]).powi(2)).sqrt();
    }
    let l_max = lengths.iter().fold(0.0_f64, |m, &l| m.max(l));

    let mut edges = [EdgeGeometry { length: 0.0, cos: 0.0, sin: 0.0, phi: 0.0 }; 4];
    for k in 0..4 {
        let j = (k + 1) % 4;
        let length = lengths[k];
        if !(length > 1e-12 * l_max) {
            return Err(PlateError::singular(
                element,
                format!("edge {}-{} has zero length", k + 1, j + 1),
            ));
        }
        edges[k] = EdgeGeometry {
            length,
            cos: (geom.x[j] - geom.x[k]) / length,
            sin: (geom.y[j] - geom.y[k]) / length,
            phi: 12.0 * d_bend / (shear_correction * g * t * length * length),
        };
    }

    Ok(edges)
}

/// Rows of the edge rotation increments: `Δβ = A_n · [w1 θx1 θy1 ... θy4]ᵀ`.
///
/// This is the `[A_Δ]⁻¹[A_u]` product of the formulation, written out in
/// closed form since `[A_Δ]` is diagonal with entries `(2/3)·L_k·(1+φ_k)`.
pub fn rotation_increment_rows(edges: &[EdgeGeometry; 4]) -> [RowSVector<f64, 12>; 4] {
    let mut rows = [RowSVector::<f64, 12>::zeros(); 4];
    for (k, edge) in edges.iter().enumerate() {
        let i = k;
        let j = (k + 1) % 4;
        let c = 3.0 / (2.0 * edge.length * (1.0 + edge.phi));
        let row = &mut rows[k];
        // tangential rotation β_s = C·βx + S·βy = C·θy - S·θx
        row[3 * i] = c;
        row[3 * j] = -c;
        row[3 * i + 1] = 0.5 * c * edge.length * edge.sin;
        row[3 * j + 1] = 0.5 * c * edge.length * edge.sin;
        row[3 * i + 2] = -0.5 * c * edge.length * edge.cos;
        row[3 * j + 2] = -0.5 * c * edge.length * edge.cos;
    }
    rows
}

/// Rows of the tied constant edge shears: `γ̄_s = A_γ · [w1 θx1 θy1 ...]ᵀ`.
pub fn edge_shear_rows(edges: &[EdgeGeometry; 4]) -> [RowSVector<f64, 12>; 4] {
    let mut rows = [RowSVector::<f64, 12>::zeros(); 4];
    for (k, edge) in edges.iter().enumerate() {
        let i = k;
        let j = (k + 1) % 4;
        let f = edge.phi / (1.0 + edge.phi);
        let row = &mut rows[k];
        row[3 * i] = -f / edge.length;
        row[3 * j] = f / edge.length;
        row[3 * i + 1] = -0.5 * f * edge.sin;
        row[3 * j + 1] = -0.5 * f * edge.sin;
        row[3 * i + 2] = 0.5 * f * edge.cos;
        row[3 * j + 2] = 0.5 * f * edge.cos;
    }
    rows
}

/// Physical derivatives of a 4-lane natural-derivative table.
fn physical_derivs(j_inv: &Mat2, d_dr: &[f64; 4], d_ds: &[f64; 4]) -> ([f64; 4], [f64; 4]) {
    let mut d_dx = [0.0; 4];
    let mut d_dy = [0.0; 4];
    for i in 0..4 {
        d_dx[i] = j_inv[(0, 0)] * d_dr[i] + j_inv[(0, 1)] * d_ds[i];
        d_dy[i] = j_inv[(1, 0)] * d_dr[i] + j_inv[(1, 1)] * d_ds[i];
    }
    (d_dx, d_dy)
}

/// Bending strain-displacement matrix `B_b` (3x12) at (r, s).
///
/// Composite DKMQ operator: the basic bilinear curvature operator plus the
/// mid-edge increment operator contracted with the constraint rows, relating
/// `[w θx θy]` per node to curvatures `[κxx, κyy, κxy]`.
pub fn b_bending(
    j_inv: &Mat2,
    r: f64,
    s: f64,
    edges: &[EdgeGeometry; 4],
    increment_rows: &[RowSVector<f64, 12>; 4],
) -> B3x12 {
    let (dn_dr, dn_ds) = shape_n_deriv(r, s);
    let (dn_dx, dn_dy) = physical_derivs(j_inv, &dn_dr, &dn_ds);

    let mut b = B3x12::zeros();
    for i in 0..4 {
        // κxx = βx,x with βx = θy; κyy = βy,y with βy = -θx
        b[(0, 3 * i + 2)] = dn_dx[i];
        b[(1, 3 * i + 1)] = -dn_dy[i];
        b[(2, 3 * i + 1)] = -dn_dx[i];
        b[(2, 3 * i + 2)] = dn_dy[i];
    }

    let (dp_dr, dp_ds) = shape_p_deriv(r, s);
    let (dp_dx, dp_dy) = physical_derivs(j_inv, &dp_dr, &dp_ds);
    for (k, edge) in edges.iter().enumerate() {
        // β += P_k·(C_k, S_k)·Δβ_k
        let col = Vector3::new(
            dp_dx[k] * edge.cos,
            dp_dy[k] * edge.sin,
            dp_dy[k] * edge.cos + dp_dx[k] * edge.sin,
        );
        b += col * increment_rows[k];
    }

    b
}

/// Transverse shear strain-displacement matrix `B_s` (2x12) at (r, s).
///
/// The tied edge shears are interpolated between opposite edge midpoints as
/// covariant components (γ_r linear in s, γ_s linear in r) and mapped to
/// physical `[γxz, γyz]` through the inverse Jacobian. The covariant value
/// at a tying point is `±(L_k/2)·γ̄_sk`; the minus applies on edges 3-4 and
/// 4-1 whose tangents run against the +r/+s directions.
pub fn b_shear(
    j_inv: &Mat2,
    r: f64,
    s: f64,
    edges: &[EdgeGeometry; 4],
    shear_rows: &[RowSVector<f64, 12>; 4],
) -> B2x12 {
    let row_r = shear_rows[0] * (0.25 * (1.0 - s) * edges[0].length)
        - shear_rows[2] * (0.25 * (1.0 + s) * edges[2].length);
    let row_s = shear_rows[1] * (0.25 * (1.0 + r) * edges[1].length)
        - shear_rows[3] * (0.25 * (1.0 - r) * edges[3].length);

    let mut nat = B2x12::zeros();
    nat.row_mut(0).copy_from(&row_r);
    nat.row_mut(1).copy_from(&row_s);
    j_inv * nat
}

/// Membrane strain-displacement matrix `B_m` (3x8) at (r, s).
///
/// Standard isoparametric plane-stress operator over `[u, v]` per node,
/// relating nodal displacements to `[εxx, εyy, γxy]`. Shares the physical
/// derivative computation with the bending operator.
pub fn b_membrane(j_inv: &Mat2, r: f64, s: f64) -> B3x8 {
    let (dn_dr, dn_ds) = shape_n_deriv(r, s);
    let (dn_dx, dn_dy) = physical_derivs(j_inv, &dn_dr, &dn_ds);

    let mut b = B3x8::zeros();
    for i in 0..4 {
        b[(0, 2 * i)] = dn_dx[i];
        b[(1, 2 * i + 1)] = dn_dy[i];
        b[(2, 2 * i)] = dn_dy[i];
        b[(2, 2 * i + 1)] = dn_dx[i];
    }
    b
}
