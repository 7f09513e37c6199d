//! Truncated Fock-space states.
//!
//! A coherent state |α⟩ is represented by its first N amplitudes in the
//! number basis:
//!
//! ```text
//! ⟨n|α⟩ = exp(-|α|²/2) · αⁿ / √(n!)     n = 0..N-1
//! ```
//!
//! Amplitudes are evaluated in log-magnitude form so that neither αⁿ nor n!
//! is ever materialised; this keeps larger truncations finite.

use num_complex::Complex64;
use num_traits::{One, Zero};

use crate::error::{QcdmaError, QcdmaResult};

/// A state vector in an N-dimensional truncated Hilbert space.
pub type StateVector = Vec<Complex64>;

/// Build the coherent state |α⟩ truncated to `dimension` amplitudes.
///
/// `α = 0` yields the vacuum: all amplitude at index 0 (`0⁰ = 1`).
pub fn coherent(dimension: usize, alpha: Complex64) -> QcdmaResult<StateVector> {
    if dimension == 0 {
        return Err(QcdmaError::InvalidDimension(dimension));
    }

    let mut state = vec![Complex64::zero(); dimension];
    if alpha.is_zero() {
        state[0] = Complex64::one();
        return Ok(state);
    }

    let (r, theta) = alpha.to_polar();
    let ln_r = r.ln();
    let mut ln_factorial = 0.0;
    for (n, amplitude) in state.iter_mut().enumerate() {
        if n > 0 {
            ln_factorial += (n as f64).ln();
        }
        let ln_magnitude = -r * r / 2.0 + n as f64 * ln_r - ln_factorial / 2.0;
        *amplitude = Complex64::from_polar(ln_magnitude.exp(), n as f64 * theta);
    }
    Ok(state)
}

/// Number state |idx⟩: a real one-hot vector of length `dimension`.
pub fn fock(dimension: usize, idx: usize) -> QcdmaResult<Vec<f64>> {
    if idx >= dimension {
        return Err(QcdmaError::IndexOutOfRange {
            index: idx,
            dimension,
        });
    }
    let mut state = vec![0.0; dimension];
    state[idx] = 1.0;
    Ok(state)
}

/// Inner product ⟨a|b⟩, conjugate-linear in the first argument.
///
/// Both vectors must have the same length.
pub fn inner_product(a: &[Complex64], b: &[Complex64]) -> Complex64 {
    debug_assert_eq!(a.len(), b.len(), "State vectors must have equal length");
    a.iter().zip(b.iter()).map(|(ai, bi)| ai.conj() * bi).sum()
}

/// Squared norm ⟨ψ|ψ⟩.
pub fn norm_sqr(state: &[Complex64]) -> f64 {
    state.iter().map(|c| c.norm_sqr()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vacuum_is_first_basis_vector() {
        let state = coherent(10, Complex64::zero()).unwrap();
        assert_eq!(state.len(), 10);
        assert_eq!(state[0], Complex64::one());
        assert!(state[1..].iter().all(|c| c.is_zero()));
    }

    #[test]
    fn coherent_state_is_normalized() {
        for &alpha in &[0.0, 0.5, 1.0, 1.5] {
            let state = coherent(15, Complex64::new(alpha, 0.0)).unwrap();
            let norm = norm_sqr(&state);
            assert!((norm - 1.0).abs() < 1e-6, "alpha={} norm={}", alpha, norm);
        }
    }

    #[test]
    fn complex_alpha_is_normalized() {
        let state = coherent(20, Complex64::new(0.7, -0.9)).unwrap();
        assert!((norm_sqr(&state) - 1.0).abs() < 1e-8);
    }

    #[test]
    fn amplitudes_match_closed_form() {
        let state = coherent(4, Complex64::new(1.0, 0.0)).unwrap();
        let prefactor = (-0.5_f64).exp();
        let expected = [
            prefactor,
            prefactor,
            prefactor / 2.0_f64.sqrt(),
            prefactor / 6.0_f64.sqrt(),
        ];
        for (amp, exp) in state.iter().zip(expected.iter()) {
            assert!((amp.re - exp).abs() < 1e-12);
            assert!(amp.im.abs() < 1e-12);
        }
    }

    #[test]
    fn imaginary_alpha_rotates_amplitudes() {
        // α = i: ⟨1|α⟩ = e^{-1/2}·i, ⟨2|α⟩ = -e^{-1/2}/√2
        let state = coherent(3, Complex64::new(0.0, 1.0)).unwrap();
        let prefactor = (-0.5_f64).exp();
        assert!((state[1] - Complex64::new(0.0, prefactor)).norm() < 1e-12);
        assert!((state[2] - Complex64::new(-prefactor / 2.0_f64.sqrt(), 0.0)).norm() < 1e-12);
    }

    #[test]
    fn large_truncation_stays_finite() {
        let state = coherent(200, Complex64::new(5.0, 0.0)).unwrap();
        assert!(state.iter().all(|c| c.re.is_finite() && c.im.is_finite()));
        assert!((norm_sqr(&state) - 1.0).abs() < 1e-8);
    }

    #[test]
    fn zero_dimension_is_rejected() {
        assert_eq!(
            coherent(0, Complex64::one()),
            Err(QcdmaError::InvalidDimension(0))
        );
    }

    #[test]
    fn fock_is_one_hot() {
        let state = fock(5, 2).unwrap();
        assert_eq!(state, vec![0.0, 0.0, 1.0, 0.0, 0.0]);
        assert!(fock(5, 5).is_err());
    }

    #[test]
    fn inner_product_conjugates_first_argument() {
        let a = vec![Complex64::new(0.0, 1.0)];
        let b = vec![Complex64::new(1.0, 0.0)];
        assert!((inner_product(&a, &b) - Complex64::new(0.0, -1.0)).norm() < 1e-12);
        assert!((inner_product(&b, &a) - Complex64::new(0.0, 1.0)).norm() < 1e-12);
    }
}
