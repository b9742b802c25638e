//! qrollup dapp
//!
//! A rollup application that keeps a small quantum register and applies the
//! gate commands it receives as advance inputs. Each input is a
//! `0x`-prefixed hex string of a JSON command:
//!
//! ```json
//! {"gate": "CX", "target": 0, "control": 1}
//! ```
//!
//! Accepted commands produce a notice: the gate history while the circuit
//! is open, or the measured outcome distribution after `MeasAll`. Rejected
//! commands produce a report describing the error.
//!
//! # Architecture
//!
//! ```text
//!   coordinator ──/finish──→ App ──→ handler ──→ codec ──→ Command
//!        ↑                                                    │
//!        │                                                    ↓
//!        └──/notice, /report── report ←── Dispatcher ←── GateOp
//!                                              │
//!                                              ↓
//!                                     CircuitState + Backend
//! ```
//!
//! # Example
//!
//! ```ignore
//! use qrollup_adapter_sim::SimulatorBackend;
//! use qrollup_dapp::{Command, Dispatcher, Outcome};
//!
//! let mut dispatcher = Dispatcher::new(SimulatorBackend::new(), 2);
//! dispatcher.dispatch(Command::new("H", 0)).await?;
//! dispatcher.dispatch(Command::with_control("CX", 0, 1)).await?;
//! if let Outcome::Measured(dist) = dispatcher.dispatch(Command::measure_all()).await? {
//!     // Only "00" and "11", about half each
//!     println!("{:?}", dist);
//! }
//! ```

pub mod app;
pub mod codec;
pub mod command;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod handler;
pub mod report;
pub mod rollup;
pub mod state;

pub use app::App;
pub use codec::{CodecError, hex_to_str, str_to_hex};
pub use command::{Command, GateOp, GateRecord, SingleQubitGate, TwoQubitGate};
pub use config::Config;
pub use dispatch::{DEFAULT_SHOTS, Dispatcher, Outcome};
pub use error::{DappError, DappResult};
pub use handler::{handle_advance, handle_inspect};
pub use report::Distribution;
pub use rollup::{
    AdvanceData, InspectData, Metadata, RequestType, Rollup, RollupClient, RollupError,
    RollupRequest, RollupResult, Status,
};
pub use state::CircuitState;
