//! Measurement distributions and notice payloads.

use std::collections::BTreeMap;

use qrollup_hal::Counts;
use serde::{Deserialize, Serialize};

use crate::codec::str_to_hex;
use crate::command::GateRecord;
use crate::error::DappResult;

/// Empirical outcome probabilities keyed by bitstring, qubit 0 first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Distribution(BTreeMap<String, f64>);

impl Distribution {
    /// Build from backend counts.
    ///
    /// Backend bitstrings put the highest classical bit first; keys here are
    /// reversed so the first character is classical bit 0.
    pub fn from_counts(counts: &Counts, shots: u32) -> Self {
        let shots = f64::from(shots.max(1));
        Self(
            counts
                .iter()
                .map(|(bits, count)| (bits.chars().rev().collect(), count as f64 / shots))
                .collect(),
        )
    }

    /// Probability of an outcome, 0 if never observed.
    pub fn get(&self, bits: &str) -> f64 {
        self.0.get(bits).copied().unwrap_or(0.0)
    }

    /// Sum of all probabilities.
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing was observed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over outcomes in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

/// Hex payload for a measurement notice.
pub fn measurement_payload(distribution: &Distribution) -> DappResult<String> {
    Ok(str_to_hex(&serde_json::to_string(distribution)?))
}

/// Hex payload for a history notice.
pub fn history_payload(history: &[GateRecord]) -> DappResult<String> {
    Ok(str_to_hex(&serde_json::to_string(history)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::hex_to_str;

    #[test]
    fn test_keys_are_reversed() {
        let mut counts = Counts::new();
        counts.insert("001", 3);
        counts.insert("110", 1);

        let dist = Distribution::from_counts(&counts, 4);
        assert_eq!(dist.get("100"), 0.75);
        assert_eq!(dist.get("011"), 0.25);
        assert_eq!(dist.get("001"), 0.0);
        assert!((dist.total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_measurement_payload_is_hex_json() {
        let mut counts = Counts::new();
        counts.insert("00", 512);
        counts.insert("11", 512);
        let dist = Distribution::from_counts(&counts, 1024);

        let payload = measurement_payload(&dist).unwrap();
        assert!(payload.starts_with("0x"));
        assert_eq!(hex_to_str(&payload).unwrap(), r#"{"00":0.5,"11":0.5}"#);
    }

    #[test]
    fn test_history_payload() {
        let history = vec![
            GateRecord {
                gate: "H".into(),
                target: Some(0),
                control: None,
            },
            GateRecord {
                gate: "CX".into(),
                target: Some(0),
                control: Some(1),
            },
        ];
        let json = hex_to_str(&history_payload(&history).unwrap()).unwrap();
        assert_eq!(
            json,
            r#"[{"gate":"H","target":0},{"gate":"CX","target":0,"control":1}]"#
        );
    }
}
