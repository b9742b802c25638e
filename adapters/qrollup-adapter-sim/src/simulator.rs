//! Simulator backend implementation.

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rustc_hash::FxHashMap;
use std::sync::Mutex;
use std::time::Instant;
use tracing::{debug, instrument};
use uuid::Uuid;

use qrollup_hal::{
    Backend, Capabilities, Counts, ExecutionResult, HalError, HalResult, Job, JobId, JobStatus,
};
use qrollup_ir::Circuit;

use crate::statevector::{Statevector, clbits_to_bitstring};

/// Default register limit.
pub const DEFAULT_MAX_QUBITS: u32 = 20;

/// A finished job waiting to be collected.
struct SimJob {
    job: Job,
    result: ExecutionResult,
}

/// Local simulator backend.
///
/// Every shot re-runs the whole circuit on a fresh statevector, so mid-circuit
/// measurement, reset and classically conditioned gates behave as they would
/// on hardware. Counts are keyed by the classical register, highest bit first.
///
/// A job is dropped from the table once its result has been collected, so a
/// second `result()` or `status()` for the same id is `JobNotFound`.
pub struct SimulatorBackend {
    /// Cached capabilities.
    capabilities: Capabilities,
    /// Completed jobs.
    jobs: Mutex<FxHashMap<String, SimJob>>,
    /// Shot sampler.
    rng: Mutex<StdRng>,
}

impl SimulatorBackend {
    /// Create a new simulator backend with default settings.
    pub fn new() -> Self {
        Self::with_max_qubits(DEFAULT_MAX_QUBITS)
    }

    /// Create a simulator with custom max qubits.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self {
            capabilities: Capabilities::simulator(max_qubits),
            jobs: Mutex::new(FxHashMap::default()),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Create a simulator whose sampling is reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            ..Self::new()
        }
    }

    /// Run simulation synchronously.
    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    fn run_simulation(&self, circuit: &Circuit, shots: u32) -> ExecutionResult {
        let start = Instant::now();

        let num_qubits = circuit.num_qubits();
        debug!(
            "Starting simulation: {} qubits, {} instructions, {} shots",
            num_qubits,
            circuit.len(),
            shots
        );

        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut counts = Counts::new();

        for _ in 0..shots {
            let mut sv = Statevector::new(num_qubits);
            let mut clbits = vec![false; circuit.num_clbits()];

            for inst in circuit.instructions() {
                sv.apply(inst, &mut clbits, &mut *rng);
            }

            counts.insert(clbits_to_bitstring(&clbits), 1);
        }

        let elapsed = start.elapsed();
        debug!("Simulation completed in {:?}", elapsed);

        ExecutionResult::new(counts, shots).with_execution_time(elapsed.as_millis() as u64)
    }

    fn jobs(&self) -> std::sync::MutexGuard<'_, FxHashMap<String, SimJob>> {
        self.jobs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.capabilities.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    #[instrument(skip(self, circuit))]
    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId> {
        let max_qubits = self.capabilities.num_qubits;
        if circuit.num_qubits() > max_qubits as usize {
            return Err(HalError::CircuitTooLarge {
                qubits: circuit.num_qubits(),
                max: max_qubits,
            });
        }
        if shots == 0 || shots > self.capabilities.max_shots {
            return Err(HalError::InvalidShots {
                shots,
                max: self.capabilities.max_shots,
            });
        }

        let job_id = JobId::new(Uuid::new_v4().to_string());
        let mut job = Job::new(job_id.clone(), shots).with_backend(self.name());
        debug!("Submitted job: {}", job_id);

        // Local simulation finishes before submit returns.
        let result = self.run_simulation(circuit, shots);
        job.transition(JobStatus::Completed);

        self.jobs().insert(
            job_id.0.clone(),
            SimJob { job, result },
        );

        Ok(job_id)
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        self.jobs()
            .get(job_id.as_str())
            .map(|j| j.job.status.clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.to_string()))
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let sim_job = self
            .jobs()
            .remove(job_id.as_str())
            .ok_or_else(|| HalError::JobNotFound(job_id.to_string()))?;
        debug!("Collected job {} ({})", job_id, sim_job.job.status);
        Ok(sim_job.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrollup_ir::{ClassicalCondition, ClbitId, QubitId, StandardGate};

    #[tokio::test]
    async fn test_simulator_capabilities() {
        let backend = SimulatorBackend::new();
        let caps = backend.capabilities();

        assert!(caps.is_simulator);
        assert_eq!(caps.num_qubits, 20);
    }

    #[tokio::test]
    async fn test_simulator_bell_state() {
        let backend = SimulatorBackend::with_seed(1);

        let circuit = Circuit::bell().unwrap();
        let job_id = backend.submit(&circuit, 1000).await.unwrap();

        let status = backend.status(&job_id).await.unwrap();
        assert!(status.is_success());

        let result = backend.result(&job_id).await.unwrap();
        assert_eq!(result.shots, 1000);

        // Bell state should produce only 00 and 11
        let counts = &result.counts;
        assert_eq!(counts.get("00") + counts.get("11"), 1000);
        assert!(counts.get("00") > 0 && counts.get("11") > 0);
    }

    #[tokio::test]
    async fn test_simulator_ghz_state() {
        let backend = SimulatorBackend::with_seed(2);

        let circuit = Circuit::ghz(3).unwrap();
        let job_id = backend.submit(&circuit, 1000).await.unwrap();
        let result = backend.wait(&job_id).await.unwrap();

        let counts = &result.counts;
        assert_eq!(counts.get("000") + counts.get("111"), 1000);
    }

    #[tokio::test]
    async fn test_bitstring_order_is_highest_clbit_first() {
        let backend = SimulatorBackend::with_seed(3);

        let mut circuit = Circuit::with_size("x0", 3, 3);
        circuit.x(QubitId(0)).unwrap().measure_all().unwrap();

        let job_id = backend.submit(&circuit, 10).await.unwrap();
        let result = backend.result(&job_id).await.unwrap();
        assert_eq!(result.counts.get("001"), 10);
    }

    #[tokio::test]
    async fn test_feed_forward_correction() {
        // Copy a random bit from q0 onto q1 through the classical register.
        let backend = SimulatorBackend::with_seed(4);

        let mut circuit = Circuit::with_size("ff", 2, 2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .measure(QubitId(0), ClbitId(0))
            .unwrap()
            .conditional(
                StandardGate::X,
                [QubitId(1)],
                ClassicalCondition::is_set(ClbitId(0)),
            )
            .unwrap()
            .measure_all()
            .unwrap();

        let job_id = backend.submit(&circuit, 500).await.unwrap();
        let counts = backend.result(&job_id).await.unwrap().counts;
        assert_eq!(counts.get("00") + counts.get("11"), 500);
    }

    #[tokio::test]
    async fn test_simulator_too_many_qubits() {
        let backend = SimulatorBackend::with_max_qubits(5);

        let circuit = Circuit::with_size("test", 10, 0);
        let result = backend.submit(&circuit, 100).await;

        assert!(matches!(
            result,
            Err(HalError::CircuitTooLarge { qubits: 10, max: 5 })
        ));
    }

    #[tokio::test]
    async fn test_zero_shots_rejected() {
        let backend = SimulatorBackend::new();
        let circuit = Circuit::bell().unwrap();
        assert!(matches!(
            backend.submit(&circuit, 0).await,
            Err(HalError::InvalidShots { shots: 0, .. })
        ));
    }

    #[tokio::test]
    async fn test_unknown_job() {
        let backend = SimulatorBackend::new();
        let missing = JobId::from("nope");
        assert!(matches!(
            backend.status(&missing).await,
            Err(HalError::JobNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_collected_jobs_are_dropped() {
        let backend = SimulatorBackend::with_seed(5);
        let mut circuit = Circuit::with_size("meas_all", 2, 2);
        circuit.h(QubitId(0)).unwrap().measure_all().unwrap();

        for _ in 0..50 {
            let job_id = backend.submit(&circuit, 1024).await.unwrap();
            let result = backend.wait(&job_id).await.unwrap();
            assert_eq!(result.counts.total(), 1024);
        }
        assert_eq!(backend.jobs().len(), 0);
    }

    #[tokio::test]
    async fn test_result_is_collected_once() {
        let backend = SimulatorBackend::with_seed(6);
        let job_id = backend.submit(&Circuit::bell().unwrap(), 8).await.unwrap();

        assert!(backend.result(&job_id).await.is_ok());
        assert!(matches!(
            backend.result(&job_id).await,
            Err(HalError::JobNotFound(_))
        ));
    }
}
