//! # qcdma-sim
//!
//! Simulation of optical code-division multiple access (OCDMA) with
//! quantum coherent-state transmitters and a passive star coupler.
//!
//! ## Model
//!
//! - Each of M users sends on-off keyed coherent states |α⟩ truncated to
//!   N Fock components, rotated by a user-specific signature phase.
//! - A passive M×M star coupler (phase, gamma or Hadamard form) mixes
//!   every input channel into every output channel.
//! - Receiver i removes its own signature phase, detects intensity per
//!   Fock component, and decides the bit by correlation against the
//!   vacuum and |α⟩ reference states.
//!
//! ## Usage
//!
//! ```no_run
//! use qcdma_sim::prelude::*;
//!
//! let sim = Simulator::new(4, StarCouplerType::Hadamard, SimulatorConfig::default())?;
//! let record = sim.simulate(&[1, 0, 1, 1])?;
//! println!("decoded: {:?}", record.decoded_bits);
//! # Ok::<(), QcdmaError>(())
//! ```

pub mod error;
pub mod simulator;
pub mod star_coupler;
pub mod state;
pub mod transmitter;

pub use error::{QcdmaError, QcdmaResult};
pub use simulator::{SimulationRecord, Simulator, SimulatorConfig};
pub use star_coupler::StarCouplerType;
pub use transmitter::Transmitter;

pub mod prelude {
    pub use crate::error::*;
    pub use crate::simulator::*;
    pub use crate::star_coupler::StarCouplerType;
    pub use crate::state::*;
    pub use crate::transmitter::*;
}
