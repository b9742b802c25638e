//! qrollup Local Statevector Simulator
//!
//! This crate provides the simulation backend the dapp measures its circuits
//! on. It keeps the full statevector, so it is exact but limited to small
//! registers (the dapp runs with five qubits by default).
//!
//! # Features
//!
//! - **Shot-by-shot execution**: every shot replays the circuit from |0…0⟩
//! - **Mid-circuit measurement**: measurement collapses the state and writes
//!   the classical register
//! - **Feed-forward**: gates carrying a [`ClassicalCondition`] fire only when
//!   the tested classical bit matches
//! - **Reproducible sampling**: [`SimulatorBackend::with_seed`]
//!
//! # Performance
//!
//! | Qubits | Memory | Simulation Speed |
//! |--------|--------|------------------|
//! | 5 | ~512 B | Instant |
//! | 10 | ~16 KB | Instant |
//! | 15 | ~512 KB | Fast |
//! | 20 | ~16 MB | Slow at 1024 shots |
//!
//! # Example
//!
//! ```ignore
//! use qrollup_adapter_sim::SimulatorBackend;
//! use qrollup_hal::Backend;
//! use qrollup_ir::Circuit;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = SimulatorBackend::new();
//!
//!     let circuit = Circuit::bell()?;
//!     let job_id = backend.submit(&circuit, 1024).await?;
//!     let result = backend.wait(&job_id).await?;
//!
//!     // Expect ~50% |00⟩ and ~50% |11⟩
//!     println!("Results: {:?}", result.counts);
//!
//!     Ok(())
//! }
//! ```
//!
//! [`ClassicalCondition`]: qrollup_ir::ClassicalCondition

mod simulator;
mod statevector;

pub use simulator::{DEFAULT_MAX_QUBITS, SimulatorBackend};
pub use statevector::Statevector;
