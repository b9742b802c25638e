//! qrollup Backend Abstraction
//!
//! This crate is the seam between the dapp and whatever executes its
//! circuits. The dapp only ever talks to a [`Backend`]; the local
//! statevector simulator in `qrollup-adapter-sim` is one implementation.
//!
//! # Overview
//!
//! - A common [`Backend`] trait for job submission and retrieval
//! - [`Capabilities`] describing register limits and the gate set
//! - Unified result handling via [`ExecutionResult`] and [`Counts`]
//!
//! # Example: Running a Circuit
//!
//! ```ignore
//! use qrollup_hal::Backend;
//! use qrollup_adapter_sim::SimulatorBackend;
//! use qrollup_ir::Circuit;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let circuit = Circuit::bell()?;
//!     let backend = SimulatorBackend::new();
//!
//!     let job_id = backend.submit(&circuit, 1024).await?;
//!     let result = backend.wait(&job_id).await?;
//!
//!     if let Some((bitstring, count)) = result.counts.most_frequent() {
//!         println!("Most frequent: {} ({} times)", bitstring, count);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod capability;
pub mod error;
pub mod job;
pub mod result;

pub use backend::{Backend, ValidationResult};
pub use capability::{Capabilities, GateSet};
pub use error::{HalError, HalResult};
pub use job::{Job, JobId, JobStatus};
pub use result::{Counts, ExecutionResult};
