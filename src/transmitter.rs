//! Coherent-state on-off transmitter.
//!
//! Each user encodes a bit as either the vacuum (bit 0) or the coherent
//! state |α⟩ rotated by the user's signature phase (bit 1).

use num_complex::Complex64;

use crate::error::{QcdmaError, QcdmaResult};
use crate::state::{coherent, StateVector};

/// Per-user transmitter holding precomputed reference states.
#[derive(Debug, Clone, PartialEq)]
pub struct Transmitter {
    phase: f64,
    alpha: Complex64,
    zero_state: StateVector,
    one_state: StateVector,
}

impl Transmitter {
    /// Create a transmitter with signature `phase` (radians), truncation
    /// `dimension` and coherent amplitude `alpha`.
    pub fn new(phase: f64, dimension: usize, alpha: Complex64) -> QcdmaResult<Self> {
        Ok(Self {
            phase,
            alpha,
            zero_state: coherent(dimension, Complex64::new(0.0, 0.0))?,
            one_state: coherent(dimension, alpha)?,
        })
    }

    /// Encode a single bit.
    ///
    /// Bit 1 gives `one_state · e^{iφ}`; bit 0 gives `zero_state` with a
    /// phase multiplier of exactly 1.
    pub fn send(&self, bit: u8) -> QcdmaResult<StateVector> {
        match bit {
            0 => Ok(self.zero_state.clone()),
            1 => {
                let rotation = Complex64::from_polar(1.0, self.phase);
                Ok(self.one_state.iter().map(|c| c * rotation).collect())
            }
            value => Err(QcdmaError::InvalidBitValue(value)),
        }
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn alpha(&self) -> Complex64 {
        self.alpha
    }

    /// Truncation dimension of both reference states.
    pub fn dimension(&self) -> usize {
        self.one_state.len()
    }

    /// Reference state for bit 0 (vacuum).
    pub fn zero_state(&self) -> &[Complex64] {
        &self.zero_state
    }

    /// Reference state for bit 1 (unrotated |α⟩).
    pub fn one_state(&self) -> &[Complex64] {
        &self.one_state
    }
}
