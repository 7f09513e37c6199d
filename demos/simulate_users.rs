//! One QCDMA frame for four users over a Hadamard star coupler.
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example simulate_users

use qcdma_sim::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<(), QcdmaError> {
    env_logger::init();

    let n_users = 4;
    let config = SimulatorConfig {
        alpha: 2.0,
        ..SimulatorConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(42);
    let sim = Simulator::with_rng(n_users, StarCouplerType::Hadamard, config, &mut rng)?;

    let bits: [u8; 4] = [1, 0, 1, 1];
    let record = sim.simulate(&bits)?;

    println!(
        "QCDMA frame (users={}, N={}, alpha={})",
        n_users, config.dimension, config.alpha
    );
    println!("{:-<60}", "");
    println!("{:<6} {:>10} {:>6} {:>14} {:>8}", "User", "Phase", "Sent", "Intensity[0]", "Decoded");
    println!("{:-<60}", "");
    for i in 0..n_users {
        println!(
            "{:<6} {:>10.4} {:>6} {:>14.6} {:>8}",
            i,
            sim.phases()[i],
            record.data[i],
            record.intensity[(i, 0)],
            record.decoded_bits[i]
        );
    }
    println!("{:-<60}", "");
    println!("Bit errors: {}/{}", record.bit_errors(), n_users);

    Ok(())
}
