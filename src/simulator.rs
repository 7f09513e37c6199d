//! End-to-end QCDMA link simulation.
//!
//! The pipeline for one frame of user bits:
//! 1. Encode: each transmitter maps its bit to a coherent state (ψ_e)
//! 2. Couple: the star coupler mixes all channels, φ_e = Bᵀ·ψ_e
//! 3. Phase-correct: receiver i removes its own signature phase (φ_d)
//! 4. Detect: intensity |φ_d|² per Fock component
//! 5. Decode: pick the reference state with the larger correlation
//!
//! Signature phases are drawn once at construction and reused for every
//! frame, so repeated calls on one instance are deterministic.

use std::f64::consts::PI;

use log::{debug, trace};
use nalgebra::DMatrix;
use num_complex::Complex64;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{QcdmaError, QcdmaResult};
use crate::star_coupler::{self, StarCouplerType};
use crate::state::{inner_product, StateVector};
use crate::transmitter::Transmitter;

/// Shared transmitter and receiver parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatorConfig {
    /// Decision threshold. Stored for callers; the correlation decoder
    /// does not consult it.
    pub threshold: f64,
    /// Fock-space truncation of every transmitted state.
    pub dimension: usize,
    /// Coherent amplitude α used for bit 1.
    pub alpha: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            threshold: 0.2,
            dimension: 10,
            alpha: 1.0,
        }
    }
}

/// Every intermediate artifact of one `simulate` call.
///
/// Matrices are `[n_users, dimension]`, one row per user.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationRecord {
    /// Input bits.
    pub data: Vec<u8>,
    /// Encoded transmitter states.
    pub psi_e: DMatrix<Complex64>,
    /// States after the star coupler.
    pub phi_e: DMatrix<Complex64>,
    /// States after per-user phase correction.
    pub phi_d: DMatrix<Complex64>,
    /// Detected intensities |φ_d|².
    pub intensity: DMatrix<f64>,
    /// Bits recovered by the correlation decoder.
    pub decoded_bits: Vec<u8>,
}

impl SimulationRecord {
    /// Number of users whose decoded bit differs from the input.
    pub fn bit_errors(&self) -> usize {
        self.data
            .iter()
            .zip(self.decoded_bits.iter())
            .filter(|(sent, received)| sent != received)
            .count()
    }
}

/// QCDMA simulator for a fixed set of users.
///
/// All fields are fixed after construction; `simulate` only reads them.
#[derive(Debug, Clone)]
pub struct Simulator {
    config: SimulatorConfig,
    coupler: DMatrix<f64>,
    phases: Vec<f64>,
    transmitters: Vec<Transmitter>,
    expected_states_0: DMatrix<Complex64>,
    expected_states_1: DMatrix<Complex64>,
}

impl Simulator {
    /// Create a simulator with phases drawn from an entropy-seeded generator.
    pub fn new(
        n_users: usize,
        method: StarCouplerType,
        config: SimulatorConfig,
    ) -> QcdmaResult<Self> {
        let mut rng = StdRng::from_entropy();
        Self::with_rng(n_users, method, config, &mut rng)
    }

    /// Create a simulator drawing the signature phases from `rng`.
    ///
    /// Phases are uniform on [0, 2π), one per user.
    pub fn with_rng<R: Rng + ?Sized>(
        n_users: usize,
        method: StarCouplerType,
        config: SimulatorConfig,
        rng: &mut R,
    ) -> QcdmaResult<Self> {
        if n_users == 0 {
            return Err(QcdmaError::NoUsers);
        }
        let coupler = star_coupler::build(method, n_users)?;
        let phase_dist = Uniform::new(0.0, 2.0 * PI);
        let phases: Vec<f64> = (0..n_users).map(|_| phase_dist.sample(&mut *rng)).collect();
        debug!(
            "simulator: {} users, {} coupler, dimension={}, alpha={}",
            n_users, method, config.dimension, config.alpha
        );
        Self::from_parts(coupler, phases, config)
    }

    /// Create a simulator from an explicit coupler matrix and phase list.
    ///
    /// The coupler must be square with one row per phase.
    pub fn from_parts(
        coupler: DMatrix<f64>,
        phases: Vec<f64>,
        config: SimulatorConfig,
    ) -> QcdmaResult<Self> {
        let n_users = phases.len();
        if n_users == 0 {
            return Err(QcdmaError::NoUsers);
        }
        if coupler.shape() != (n_users, n_users) {
            return Err(QcdmaError::CouplerShape {
                expected: n_users,
                rows: coupler.nrows(),
                cols: coupler.ncols(),
            });
        }

        let alpha = Complex64::new(config.alpha, 0.0);
        let transmitters = phases
            .iter()
            .map(|&phase| Transmitter::new(phase, config.dimension, alpha))
            .collect::<QcdmaResult<Vec<_>>>()?;

        let dim = config.dimension;
        let expected_states_0 =
            DMatrix::from_fn(n_users, dim, |i, n| transmitters[i].zero_state()[n]);
        let expected_states_1 =
            DMatrix::from_fn(n_users, dim, |i, n| transmitters[i].one_state()[n]);

        Ok(Self {
            config,
            coupler,
            phases,
            transmitters,
            expected_states_0,
            expected_states_1,
        })
    }

    /// Run one frame through the full pipeline.
    pub fn simulate(&self, data: &[u8]) -> QcdmaResult<SimulationRecord> {
        let psi_e = self.psi_e(data)?;
        let phi_e = self.couple(&psi_e)?;
        let phi_d = self.phi_d(&phi_e)?;
        let intensity = self.intensity(&phi_d);
        let decoded_bits = self.decode(&intensity)?;
        trace!("simulate: sent {:?}, decoded {:?}", data, decoded_bits);

        Ok(SimulationRecord {
            data: data.to_vec(),
            psi_e,
            phi_e,
            phi_d,
            intensity,
            decoded_bits,
        })
    }

    /// Encode one bit per user, stacked row-wise.
    pub fn psi_e(&self, data: &[u8]) -> QcdmaResult<DMatrix<Complex64>> {
        self.validate(data)?;
        let rows = self
            .transmitters
            .iter()
            .zip(data.iter())
            .map(|(tx, &bit)| tx.send(bit))
            .collect::<QcdmaResult<Vec<_>>>()?;
        Ok(DMatrix::from_fn(self.n_users(), self.config.dimension, |i, n| {
            rows[i][n]
        }))
    }

    /// Mix all channels through the star coupler: Bᵀ·ψ_e.
    pub fn couple(&self, psi_e: &DMatrix<Complex64>) -> QcdmaResult<DMatrix<Complex64>> {
        self.check_shape(psi_e.shape())?;
        let coupler = self.coupler.map(|b| Complex64::new(b, 0.0));
        Ok(coupler.transpose() * psi_e)
    }

    /// Remove each user's signature phase from its row.
    pub fn phi_d(&self, phi_e: &DMatrix<Complex64>) -> QcdmaResult<DMatrix<Complex64>> {
        self.check_shape(phi_e.shape())?;
        Ok(DMatrix::from_fn(phi_e.nrows(), phi_e.ncols(), |i, n| {
            phi_e[(i, n)] * Complex64::from_polar(1.0, -self.phases[i])
        }))
    }

    /// Element-wise detected intensity |φ_d|².
    pub fn intensity(&self, phi_d: &DMatrix<Complex64>) -> DMatrix<f64> {
        phi_d.map(|c| c.norm_sqr())
    }

    /// Correlation decoder.
    ///
    /// Row i is correlated against row i of the stacked bit-1 and bit-0
    /// reference states; the bit is 1 only when |corr₁| strictly exceeds
    /// |corr₀|.
    pub fn decode(&self, received: &DMatrix<f64>) -> QcdmaResult<Vec<u8>> {
        self.check_shape(received.shape())?;
        let bits = (0..self.n_users())
            .map(|i| {
                let row: StateVector = received
                    .row(i)
                    .iter()
                    .map(|&x| Complex64::new(x, 0.0))
                    .collect();
                let reference_1: StateVector =
                    self.expected_states_1.row(i).iter().copied().collect();
                let reference_0: StateVector =
                    self.expected_states_0.row(i).iter().copied().collect();
                let corr_1 = inner_product(&row, &reference_1);
                let corr_0 = inner_product(&row, &reference_0);
                if corr_1.norm() > corr_0.norm() {
                    1
                } else {
                    0
                }
            })
            .collect();
        Ok(bits)
    }

    fn check_shape(&self, (rows, cols): (usize, usize)) -> QcdmaResult<()> {
        let expected = (self.n_users(), self.config.dimension);
        if (rows, cols) != expected {
            return Err(QcdmaError::StateShape {
                expected_rows: expected.0,
                expected_cols: expected.1,
                rows,
                cols,
            });
        }
        Ok(())
    }

    fn validate(&self, data: &[u8]) -> QcdmaResult<()> {
        if data.len() != self.n_users() {
            return Err(QcdmaError::LengthMismatch {
                expected: self.n_users(),
                actual: data.len(),
            });
        }
        match data.iter().position(|&bit| bit > 1) {
            Some(index) => Err(QcdmaError::InvalidBit {
                index,
                value: data[index],
            }),
            None => Ok(()),
        }
    }

    pub fn n_users(&self) -> usize {
        self.phases.len()
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Configured decision threshold (not used by `decode`).
    pub fn threshold(&self) -> f64 {
        self.config.threshold
    }

    /// Real star coupler matrix B.
    pub fn coupler(&self) -> &DMatrix<f64> {
        &self.coupler
    }

    /// Signature phase of each user, in radians.
    pub fn phases(&self) -> &[f64] {
        &self.phases
    }

    pub fn transmitters(&self) -> &[Transmitter] {
        &self.transmitters
    }

    /// Stacked bit-0 reference states, `[n_users, dimension]`.
    pub fn expected_states_0(&self) -> &DMatrix<Complex64> {
        &self.expected_states_0
    }

    /// Stacked bit-1 reference states, `[n_users, dimension]`.
    pub fn expected_states_1(&self) -> &DMatrix<Complex64> {
        &self.expected_states_1
    }
}
