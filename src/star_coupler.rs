//! Passive star coupler transfer matrices.
//!
//! A star coupler mixes M input fibres into M output fibres. Three
//! algebraic forms are supported; every form is scaled by 1/√M and only
//! its real part enters the simulation.
//!
//! | Variant    | Entry B[j,k]                    |
//! |------------|---------------------------------|
//! | `phase`    | exp(+2πi·jk/M) / √M             |
//! | `gamma`    | γ^(jk) / √M,  γ = exp(-2πi/M)   |
//! | `hadamard` | H_M[j,k] / √M  (Sylvester)      |

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use log::debug;
use nalgebra::DMatrix;
use num_complex::Complex64;

use crate::error::{QcdmaError, QcdmaResult};

/// Star coupler construction method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StarCouplerType {
    /// Phase-gradient matrix.
    Phase,
    /// DFT-like matrix built from powers of γ = exp(-2πi/M).
    Gamma,
    /// Walsh–Hadamard matrix; size must be a power of two.
    Hadamard,
}

impl StarCouplerType {
    pub const ALL: [StarCouplerType; 3] = [
        StarCouplerType::Phase,
        StarCouplerType::Gamma,
        StarCouplerType::Hadamard,
    ];

    /// Name used to select this variant.
    pub fn label(&self) -> &'static str {
        match self {
            StarCouplerType::Phase => "phase",
            StarCouplerType::Gamma => "gamma",
            StarCouplerType::Hadamard => "hadamard",
        }
    }
}

impl fmt::Display for StarCouplerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StarCouplerType {
    type Err = QcdmaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StarCouplerType::ALL
            .iter()
            .copied()
            .find(|method| method.label() == s)
            .ok_or_else(|| QcdmaError::UnknownCouplerMethod(s.to_string()))
    }
}

/// Build the complex coupler matrix of order `m`.
pub fn build_complex(method: StarCouplerType, m: usize) -> QcdmaResult<DMatrix<Complex64>> {
    if m == 0 {
        return Err(QcdmaError::NoUsers);
    }
    let scale = 1.0 / (m as f64).sqrt();
    let matrix = match method {
        StarCouplerType::Phase => DMatrix::from_fn(m, m, |j, k| {
            Complex64::from_polar(scale, 2.0 * PI * ((j * k) % m) as f64 / m as f64)
        }),
        StarCouplerType::Gamma => {
            // γ^(jk) with the exponent reduced mod M; γ^M = 1.
            DMatrix::from_fn(m, m, |j, k| {
                Complex64::from_polar(scale, -2.0 * PI * ((j * k) % m) as f64 / m as f64)
            })
        }
        StarCouplerType::Hadamard => {
            if !m.is_power_of_two() {
                return Err(QcdmaError::NotPowerOfTwo(m));
            }
            sylvester(m).map(|h| Complex64::new(h * scale, 0.0))
        }
    };
    Ok(matrix)
}

/// Build the real coupler matrix of order `m` used by the simulator.
pub fn build(method: StarCouplerType, m: usize) -> QcdmaResult<DMatrix<f64>> {
    let matrix = build_complex(method, m)?.map(|c| c.re);
    debug!("built {} star coupler of order {}", method, m);
    Ok(matrix)
}

/// Parse `method` and build the real coupler matrix.
pub fn build_by_name(method: &str, m: usize) -> QcdmaResult<DMatrix<f64>> {
    build(method.parse()?, m)
}

/// Unnormalised Sylvester–Hadamard matrix: H₁ = [1], H₂ₙ = [[Hₙ, Hₙ], [Hₙ, -Hₙ]].
///
/// `n` must be a power of two.
fn sylvester(n: usize) -> DMatrix<f64> {
    if n == 1 {
        return DMatrix::from_element(1, 1, 1.0);
    }
    let half = n / 2;
    let h = sylvester(half);
    DMatrix::from_fn(n, n, |r, c| {
        let entry = h[(r % half, c % half)];
        if r >= half && c >= half {
            -entry
        } else {
            entry
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_identity(m: &DMatrix<f64>) {
        for i in 0..m.nrows() {
            for j in 0..m.ncols() {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!(
                    (m[(i, j)] - expected).abs() < 1e-10,
                    "entry ({}, {}) = {}",
                    i,
                    j,
                    m[(i, j)]
                );
            }
        }
    }

    #[test]
    fn hadamard_is_orthogonal() {
        for m in [1, 2, 4, 8, 16] {
            let h = build(StarCouplerType::Hadamard, m).unwrap();
            assert_identity(&(&h * h.transpose()));
        }
    }

    #[test]
    fn hadamard_order_two_entries() {
        let h = build(StarCouplerType::Hadamard, 2).unwrap();
        let s = 1.0 / 2.0_f64.sqrt();
        assert!((h[(0, 0)] - s).abs() < 1e-12);
        assert!((h[(0, 1)] - s).abs() < 1e-12);
        assert!((h[(1, 0)] - s).abs() < 1e-12);
        assert!((h[(1, 1)] + s).abs() < 1e-12);
    }

    #[test]
    fn hadamard_rejects_non_power_of_two() {
        assert_eq!(
            build(StarCouplerType::Hadamard, 3),
            Err(QcdmaError::NotPowerOfTwo(3))
        );
        assert!(build(StarCouplerType::Hadamard, 6).is_err());
    }

    #[test]
    fn unknown_method_is_rejected() {
        assert_eq!(
            build_by_name("unknown", 4),
            Err(QcdmaError::UnknownCouplerMethod("unknown".to_string()))
        );
    }

    #[test]
    fn every_variant_is_square() {
        for method in StarCouplerType::ALL {
            let b = build(method, 4).unwrap();
            assert_eq!(b.shape(), (4, 4), "{} coupler", method);
        }
    }

    #[test]
    fn phase_entries_are_cosines() {
        let m = 5;
        let b = build(StarCouplerType::Phase, m).unwrap();
        for j in 0..m {
            for k in 0..m {
                let expected =
                    (2.0 * PI * (j * k) as f64 / m as f64).cos() / (m as f64).sqrt();
                assert!((b[(j, k)] - expected).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn gamma_entries_are_cosines() {
        let m = 5;
        let b = build(StarCouplerType::Gamma, m).unwrap();
        for j in 0..m {
            for k in 0..m {
                let expected =
                    (-2.0 * PI * (j * k) as f64 / m as f64).cos() / (m as f64).sqrt();
                assert!(
                    (b[(j, k)] - expected).abs() < 1e-12,
                    "entry ({}, {}) = {}, expected {}",
                    j,
                    k,
                    b[(j, k)],
                    expected
                );
            }
        }
    }

    #[test]
    fn gamma_complex_form_is_unitary() {
        let g = build_complex(StarCouplerType::Gamma, 6).unwrap();
        let product = &g * g.adjoint();
        for i in 0..6 {
            for j in 0..6 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((product[(i, j)] - Complex64::new(expected, 0.0)).norm() < 1e-10);
            }
        }
    }

    #[test]
    fn phase_and_gamma_are_conjugates() {
        let p = build_complex(StarCouplerType::Phase, 4).unwrap();
        let g = build_complex(StarCouplerType::Gamma, 4).unwrap();
        for (a, b) in p.iter().zip(g.iter()) {
            assert!((a - b.conj()).norm() < 1e-12);
        }
        let real_p = build(StarCouplerType::Phase, 4).unwrap();
        let real_g = build(StarCouplerType::Gamma, 4).unwrap();
        assert!((real_p - real_g).amax() < 1e-12);
    }

    #[test]
    fn zero_size_is_rejected() {
        assert_eq!(build(StarCouplerType::Phase, 0), Err(QcdmaError::NoUsers));
    }

    #[test]
    fn method_names_round_trip() {
        for method in StarCouplerType::ALL {
            assert_eq!(method.label().parse::<StarCouplerType>(), Ok(method));
        }
    }
}
