//! Backend trait.
//!
//! ```text
//!   capabilities() ──→ validate() ──→ submit() ──→ status() ──→ result()
//!    (sync, &ref)       (async)       (async)      (async)      (async)
//! ```
//!
//! `wait()` is provided on top of `status()` and `result()`.

use std::time::Duration;

use async_trait::async_trait;
use qrollup_ir::{Circuit, InstructionKind};
use tracing::{debug, warn};

use crate::capability::Capabilities;
use crate::error::{HalError, HalResult};
use crate::job::{JobId, JobStatus};
use crate::result::ExecutionResult;

/// Trait for anything that can execute a [`Circuit`].
///
/// # Contract
///
/// - `capabilities()` is synchronous and infallible; implementations cache
///   it at construction time.
/// - `submit()` returns a `JobId` whose status starts at `Queued` or later.
/// - `result()` is only meaningful once `status()` is `Completed`.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Get the capabilities of this backend.
    fn capabilities(&self) -> &Capabilities;

    /// Validate a circuit against backend constraints.
    ///
    /// The default checks the register size, the gate set, and that
    /// mid-circuit measurement, reset and conditional gates are only sent to
    /// backends advertising `dynamic_circuits`.
    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
        let caps = self.capabilities();
        let mut reasons = vec![];

        if circuit.num_qubits() > caps.num_qubits as usize {
            reasons.push(format!(
                "Circuit has {} qubits but {} supports {}",
                circuit.num_qubits(),
                self.name(),
                caps.num_qubits
            ));
        }

        if circuit.has_dynamic_ops() && !caps.has_feature("dynamic_circuits") {
            reasons.push(format!("{} does not run dynamic circuits", self.name()));
        }

        for inst in circuit.instructions() {
            if let InstructionKind::Gate(gate) = &inst.kind {
                if !caps.gate_set.contains(gate.name()) {
                    reasons.push(format!("Unsupported gate '{}'", gate.name()));
                }
            }
        }

        if reasons.is_empty() {
            Ok(ValidationResult::Valid)
        } else {
            Ok(ValidationResult::Invalid { reasons })
        }
    }

    /// Submit a circuit for execution.
    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId>;

    /// Get the status of a job.
    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus>;

    /// Get the result of a completed job.
    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult>;

    /// Wait for a job to complete and return its result.
    ///
    /// Polls every 100ms for up to one minute.
    async fn wait(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let poll_interval = Duration::from_millis(100);
        let max_polls: u32 = 600;

        for _ in 0..max_polls {
            match self.status(job_id).await? {
                JobStatus::Completed => return self.result(job_id).await,
                JobStatus::Failed(msg) => return Err(HalError::JobFailed(msg)),
                JobStatus::Cancelled => return Err(HalError::JobCancelled(job_id.to_string())),
                status @ (JobStatus::Queued | JobStatus::Running) => {
                    debug!("Job {} is {}, polling again", job_id, status);
                    tokio::time::sleep(poll_interval).await;
                }
            }
        }

        warn!("Gave up waiting for job {}", job_id);
        Err(HalError::Timeout {
            job: job_id.to_string(),
            polls: max_polls,
        })
    }
}

/// Result of circuit validation against backend constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Circuit can be submitted as-is.
    Valid,
    /// Circuit cannot run on this backend.
    Invalid {
        /// Reasons the circuit is invalid.
        reasons: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::Counts;
    use std::sync::Mutex;

    /// Backend that reports `Running` a fixed number of times before completing.
    struct SlowBackend {
        caps: Capabilities,
        pending_polls: Mutex<u32>,
    }

    #[async_trait]
    impl Backend for SlowBackend {
        fn name(&self) -> &str {
            "slow"
        }

        fn capabilities(&self) -> &Capabilities {
            &self.caps
        }

        async fn submit(&self, _circuit: &Circuit, _shots: u32) -> HalResult<JobId> {
            Ok(JobId::from("slow-1"))
        }

        async fn status(&self, _job_id: &JobId) -> HalResult<JobStatus> {
            let mut pending = self.pending_polls.lock().unwrap();
            if *pending == 0 {
                Ok(JobStatus::Completed)
            } else {
                *pending -= 1;
                Ok(JobStatus::Running)
            }
        }

        async fn result(&self, _job_id: &JobId) -> HalResult<ExecutionResult> {
            let mut counts = Counts::new();
            counts.insert("0", 4);
            Ok(ExecutionResult::new(counts, 4))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_polls_until_completed() {
        let backend = SlowBackend {
            caps: Capabilities::simulator(2),
            pending_polls: Mutex::new(3),
        };
        let job = backend.submit(&Circuit::bell().unwrap(), 4).await.unwrap();
        let result = backend.wait(&job).await.unwrap();
        assert_eq!(result.counts.get("0"), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_times_out() {
        let backend = SlowBackend {
            caps: Capabilities::simulator(2),
            pending_polls: Mutex::new(u32::MAX),
        };
        let job = JobId::from("slow-1");
        assert!(matches!(
            backend.wait(&job).await,
            Err(HalError::Timeout { polls: 600, .. })
        ));
    }

    #[tokio::test]
    async fn test_default_validate_checks_size() {
        let backend = SlowBackend {
            caps: Capabilities::simulator(1),
            pending_polls: Mutex::new(0),
        };
        let circuit = Circuit::bell().unwrap();
        match backend.validate(&circuit).await.unwrap() {
            ValidationResult::Invalid { reasons } => assert_eq!(reasons.len(), 1),
            ValidationResult::Valid => panic!("Expected Invalid"),
        }
    }

    #[tokio::test]
    async fn test_default_validate_checks_dynamic_support() {
        let mut caps = Capabilities::simulator(2);
        caps.features.clear();
        let backend = SlowBackend {
            caps,
            pending_polls: Mutex::new(0),
        };

        let mut circuit = Circuit::with_size("reset", 2, 2);
        circuit.reset(qrollup_ir::QubitId(0)).unwrap();
        let result = backend.validate(&circuit).await.unwrap();
        assert!(
            matches!(result, ValidationResult::Invalid { ref reasons } if reasons[0].contains("dynamic"))
        );

        let static_circuit = Circuit::bell().unwrap();
        assert_eq!(
            backend.validate(&static_circuit).await.unwrap(),
            ValidationResult::Valid
        );
    }
}
