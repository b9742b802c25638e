//! Gate commands.
//!
//! A [`Command`] is the raw JSON object carried by an advance request. It is
//! turned into the closed [`GateOp`] enum before anything touches the
//! circuit, so an unknown tag is rejected at parse time.
//!
//! | Tag | Operands | Operation |
//! |-----|----------|-----------|
//! | `MeasAll` | none | measure every qubit, then reset |
//! | `Meas` | `target` | measure one qubit |
//! | `CX`, `CY`, `CZ`, `SWAP` | `target`, `control` | two-qubit gate |
//! | `TEL` | `target`, `control` | teleport `target` onto `control` |
//! | `H`, `X`, `Y`, `Z`, `S`, `T`, `Sdg`, `Tdg`, `I` | `target` | single-qubit gate |

use std::fmt;
use std::str::FromStr;

use qrollup_ir::StandardGate;
use serde::{Deserialize, Serialize};

use crate::error::DappError;

/// Raw command object: `{"gate": .., "target": .., "control": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Gate tag.
    pub gate: String,
    /// Target qubit index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<i64>,
    /// Control qubit index; its presence selects the two-qubit path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control: Option<i64>,
}

impl Command {
    /// Single-qubit or measurement command.
    pub fn new(gate: impl Into<String>, target: i64) -> Self {
        Self {
            gate: gate.into(),
            target: Some(target),
            control: None,
        }
    }

    /// Two-qubit command.
    pub fn with_control(gate: impl Into<String>, target: i64, control: i64) -> Self {
        Self {
            control: Some(control),
            ..Self::new(gate, target)
        }
    }

    /// The `MeasAll` command.
    pub fn measure_all() -> Self {
        Self {
            gate: "MeasAll".into(),
            target: None,
            control: None,
        }
    }
}

/// Single-qubit gate tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SingleQubitGate {
    H,
    X,
    Y,
    Z,
    S,
    T,
    Sdg,
    Tdg,
    I,
}

impl SingleQubitGate {
    /// Wire tag.
    pub fn tag(self) -> &'static str {
        match self {
            SingleQubitGate::H => "H",
            SingleQubitGate::X => "X",
            SingleQubitGate::Y => "Y",
            SingleQubitGate::Z => "Z",
            SingleQubitGate::S => "S",
            SingleQubitGate::T => "T",
            SingleQubitGate::Sdg => "Sdg",
            SingleQubitGate::Tdg => "Tdg",
            SingleQubitGate::I => "I",
        }
    }

    /// Circuit gate this tag lowers to.
    pub fn standard(self) -> StandardGate {
        match self {
            SingleQubitGate::H => StandardGate::H,
            SingleQubitGate::X => StandardGate::X,
            SingleQubitGate::Y => StandardGate::Y,
            SingleQubitGate::Z => StandardGate::Z,
            SingleQubitGate::S => StandardGate::S,
            SingleQubitGate::T => StandardGate::T,
            SingleQubitGate::Sdg => StandardGate::Sdg,
            SingleQubitGate::Tdg => StandardGate::Tdg,
            SingleQubitGate::I => StandardGate::I,
        }
    }
}

impl FromStr for SingleQubitGate {
    type Err = DappError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "H" => SingleQubitGate::H,
            "X" => SingleQubitGate::X,
            "Y" => SingleQubitGate::Y,
            "Z" => SingleQubitGate::Z,
            "S" => SingleQubitGate::S,
            "T" => SingleQubitGate::T,
            "Sdg" => SingleQubitGate::Sdg,
            "Tdg" => SingleQubitGate::Tdg,
            "I" => SingleQubitGate::I,
            other => {
                return Err(DappError::InvalidGate(format!(
                    "'{other}' is not a single-qubit gate"
                )));
            }
        })
    }
}

/// Two-qubit gate tags, excluding teleport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TwoQubitGate {
    CX,
    CY,
    CZ,
    Swap,
}

impl TwoQubitGate {
    /// Wire tag.
    pub fn tag(self) -> &'static str {
        match self {
            TwoQubitGate::CX => "CX",
            TwoQubitGate::CY => "CY",
            TwoQubitGate::CZ => "CZ",
            TwoQubitGate::Swap => "SWAP",
        }
    }

    /// Circuit gate this tag lowers to.
    pub fn standard(self) -> StandardGate {
        match self {
            TwoQubitGate::CX => StandardGate::CX,
            TwoQubitGate::CY => StandardGate::CY,
            TwoQubitGate::CZ => StandardGate::CZ,
            TwoQubitGate::Swap => StandardGate::Swap,
        }
    }
}

/// A validated gate operation.
///
/// Indices are still raw here; the dispatcher checks them against the
/// register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOp {
    /// Single-qubit gate on `target`.
    Single { gate: SingleQubitGate, target: i64 },
    /// Two-qubit gate; for the controlled gates `target` is the control role.
    Two {
        gate: TwoQubitGate,
        target: i64,
        control: i64,
    },
    /// Teleport the state of `from` onto `to`.
    Teleport { from: i64, to: i64 },
    /// Measure one qubit into its classical bit.
    Measure { target: i64 },
    /// Measure the whole register and start over.
    MeasureAll,
}

impl GateOp {
    /// Wire tag of this operation.
    pub fn tag(&self) -> &'static str {
        match self {
            GateOp::Single { gate, .. } => gate.tag(),
            GateOp::Two { gate, .. } => gate.tag(),
            GateOp::Teleport { .. } => "TEL",
            GateOp::Measure { .. } => "Meas",
            GateOp::MeasureAll => "MeasAll",
        }
    }

    /// Raw qubit indices in operand order.
    pub fn indices(&self) -> Vec<i64> {
        match *self {
            GateOp::Single { target, .. } | GateOp::Measure { target } => vec![target],
            GateOp::Two {
                target, control, ..
            } => vec![target, control],
            GateOp::Teleport { from, to } => vec![from, to],
            GateOp::MeasureAll => vec![],
        }
    }

    /// History record for this operation.
    pub fn record(&self) -> GateRecord {
        let (target, control) = match *self {
            GateOp::Single { target, .. } | GateOp::Measure { target } => (Some(target), None),
            GateOp::Two {
                target, control, ..
            } => (Some(target), Some(control)),
            GateOp::Teleport { from, to } => (Some(from), Some(to)),
            GateOp::MeasureAll => (None, None),
        };
        GateRecord {
            gate: self.tag().to_string(),
            target,
            control,
        }
    }
}

impl TryFrom<Command> for GateOp {
    type Error = DappError;

    fn try_from(command: Command) -> Result<Self, Self::Error> {
        let Command {
            gate,
            target,
            control,
        } = command;

        if gate == "MeasAll" {
            return Ok(GateOp::MeasureAll);
        }

        let target = target
            .ok_or_else(|| DappError::InvalidGate(format!("'{gate}' is missing field 'target'")))?;

        if gate == "Meas" {
            return Ok(GateOp::Measure { target });
        }

        if let Some(control) = control {
            let gate = match gate.as_str() {
                "CX" => TwoQubitGate::CX,
                "CY" => TwoQubitGate::CY,
                "CZ" => TwoQubitGate::CZ,
                "SWAP" => TwoQubitGate::Swap,
                "TEL" => {
                    return Ok(GateOp::Teleport {
                        from: target,
                        to: control,
                    });
                }
                other => {
                    return Err(DappError::InvalidGate(format!(
                        "'{other}' is not a two-qubit gate"
                    )));
                }
            };
            return Ok(GateOp::Two {
                gate,
                target,
                control,
            });
        }

        Ok(GateOp::Single {
            gate: gate.parse()?,
            target,
        })
    }
}

/// One entry of the gate history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateRecord {
    /// Canonical gate tag.
    pub gate: String,
    /// Target index, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<i64>,
    /// Control index, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control: Option<i64>,
}

impl fmt::Display for GateRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.gate)?;
        match (self.target, self.control) {
            (Some(t), Some(c)) => write!(f, "({t}, {c})"),
            (Some(t), None) => write!(f, "({t})"),
            _ => Ok(()),
        }
    }
}
