//! Closed-form shape functions on the natural domain (r, s) ∈ [-1, 1]²
//!
//! Two families are used by the DKMQ element:
//! - bilinear corner functions N1..N4 interpolating geometry, deflection and
//!   corner rotations,
//! - quadratic mid-edge "bubble" functions P5..P8 carrying the tangential
//!   rotation increments, each peaking at 1 at its edge midpoint and
//!   vanishing on the other three edges.
//!
//! All derivatives are hand-transcribed polynomials; nothing is
//! differentiated at runtime.

/// A 2D Gauss integration point with its weight.
#[derive(Debug, Clone, Copy)]
pub struct GaussPoint {
    pub r: f64,
    pub s: f64,
    pub weight: f64,
}

/// Standard 2x2 Gauss-Legendre rule on [-1,1]², weights 1.
///
/// This is the rule the DKMQ formulation prescribes for bending, shear and
/// membrane alike; no reduced integration is needed.
pub fn gauss_2x2() -> [GaussPoint; 4] {
    let gp = 1.0 / 3.0_f64.sqrt();
    [
        GaussPoint { r: -gp, s: -gp, weight: 1.0 },
        GaussPoint { r: gp, s: -gp, weight: 1.0 },
        GaussPoint { r: gp, s: gp, weight: 1.0 },
        GaussPoint { r: -gp, s: gp, weight: 1.0 },
    ]
}

/// Bilinear corner shape functions N1..N4 at (r, s).
pub fn shape_n(r: f64, s: f64) -> [f64; 4] {
    [
        0.25 * (1.0 - r) * (1.0 - s),
        0.25 * (1.0 + r) * (1.0 - s),
        0.25 * (1.0 + r) * (1.0 + s),
        0.25 * (1.0 - r) * (1.0 + s),
    ]
}

/// Partials of N1..N4 with respect to r and s.
pub fn shape_n_deriv(r: f64, s: f64) -> ([f64; 4], [f64; 4]) {
    let dn_dr = [
        0.25 * (s - 1.0),
        -0.25 * (s - 1.0),
        0.25 * (s + 1.0),
        -0.25 * (s + 1.0),
    ];
    let dn_ds = [
        0.25 * (r - 1.0),
        -0.25 * (r + 1.0),
        0.25 * (r + 1.0),
        -0.25 * (r - 1.0),
    ];
    (dn_dr, dn_ds)
}

/// Quadratic mid-edge shape functions P5..P8 at (r, s).
///
/// Indexing follows the edge order (1-2), (2-3), (3-4), (4-1).
pub fn shape_p(r: f64, s: f64) -> [f64; 4] {
    [
        0.5 * (1.0 - r * r) * (1.0 - s),
        0.5 * (1.0 + r) * (1.0 - s * s),
        0.5 * (1.0 - r * r) * (1.0 + s),
        0.5 * (1.0 - r) * (1.0 - s * s),
    ]
}

/// Partials of P5..P8 with respect to r and s.
pub fn shape_p_deriv(r: f64, s: f64) -> ([f64; 4], [f64; 4]) {
    let dp_dr = [
        -r * (1.0 - s),
        0.5 * (1.0 - s * s),
        -r * (1.0 + s),
        -0.5 * (1.0 - s * s),
    ];
    let dp_ds = [
        -0.5 * (1.0 - r * r),
        -s * (1.0 + r),
        0.5 * (1.0 - r * r),
        -s * (1.0 - r),
    ];
    (dp_dr, dp_ds)
}
