//! Error types for the QCDMA simulation.

use thiserror::Error;

/// Result type for simulation operations
pub type QcdmaResult<T> = Result<T, QcdmaError>;

/// Errors raised while configuring or running a simulation.
///
/// Configuration errors surface at construction time; call errors surface
/// before any computation takes place, so no partial record is ever produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QcdmaError {
    /// A simulator needs at least one user
    #[error("number of users must be positive")]
    NoUsers,

    /// Hilbert-space truncation must be at least 1
    #[error("invalid state dimension: {0}")]
    InvalidDimension(usize),

    /// Coupler method name not recognised
    #[error("{0} is not one of [\"phase\", \"gamma\", \"hadamard\"]")]
    UnknownCouplerMethod(String),

    /// Hadamard coupler requested for a size that is not a power of two
    #[error("hadamard star coupler requires a power-of-two size, got {0}")]
    NotPowerOfTwo(usize),

    /// Injected coupler matrix does not match the user count
    #[error("star coupler must be {expected}x{expected}, got {rows}x{cols}")]
    CouplerShape {
        expected: usize,
        rows: usize,
        cols: usize,
    },

    /// Input sequence length differs from the number of users
    #[error("expected {expected} entries, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Bit value other than 0 or 1 within a frame
    #[error("bit at position {index} must be 0 or 1, got {value}")]
    InvalidBit { index: usize, value: u8 },

    /// Bit value other than 0 or 1 handed to a single transmitter
    #[error("bit must be 0 or 1, got {0}")]
    InvalidBitValue(u8),

    /// Stage input is not `[n_users, dimension]`
    #[error("expected a {expected_rows}x{expected_cols} state matrix, got {rows}x{cols}")]
    StateShape {
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
        cols: usize,
    },

    /// Basis index outside the truncated Hilbert space
    #[error("basis index {index} out of range for dimension {dimension}")]
    IndexOutOfRange { index: usize, dimension: usize },
}
