//! The request loop.

use std::time::Duration;

use qrollup_hal::Backend;
use tracing::{error, info, warn};

use crate::dispatch::Dispatcher;
use crate::handler::{handle_advance, handle_inspect};
use crate::rollup::{Rollup, RollupError, RollupRequest, RollupResult, Status};

/// Default pause after a failed `/finish` call.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(1000);

/// Polls the coordinator and hands each request to exactly one handler.
pub struct App<R, B> {
    rollup: R,
    dispatcher: Dispatcher<B>,
    status: Status,
    rollup_address: Option<String>,
    retry_delay: Duration,
}

impl<R: Rollup, B: Backend> App<R, B> {
    /// Create the loop. The first `/finish` reports `accept`.
    pub fn new(rollup: R, dispatcher: Dispatcher<B>) -> Self {
        Self {
            rollup,
            dispatcher,
            status: Status::Accept,
            rollup_address: None,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }

    /// Pause between retries of a failed `/finish`.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Status sent with the next `/finish`.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Sender of the very first input, once seen.
    pub fn rollup_address(&self) -> Option<&str> {
        self.rollup_address.as_deref()
    }

    /// The dispatcher.
    pub fn dispatcher(&self) -> &Dispatcher<B> {
        &self.dispatcher
    }

    /// The coordinator.
    pub fn rollup(&self) -> &R {
        &self.rollup
    }

    /// One round: finish with the current status, then handle the returned
    /// request, if any.
    ///
    /// Returns the handler's status, or `None` when nothing was pending. A
    /// request that cannot be parsed is dropped and the next `/finish`
    /// reports `reject`.
    pub async fn step(&mut self) -> RollupResult<Option<Status>> {
        info!("Sending finish");
        let request = match self.rollup.finish(self.status).await {
            Ok(Some(request)) => request,
            Ok(None) => {
                info!("No pending rollup request, trying again");
                return Ok(None);
            }
            Err(e @ RollupError::Deserialize(_)) => {
                self.status = Status::Reject;
                return Err(e);
            }
            Err(e) => return Err(e),
        };

        let status = match &request {
            RollupRequest::AdvanceState(data) => {
                if self.rollup_address.is_none() {
                    if let Some(meta) = &data.metadata {
                        if meta.epoch_index == 0 && meta.input_index == 0 {
                            info!("Captured rollup address: {}", meta.msg_sender);
                            self.rollup_address = Some(meta.msg_sender.clone());
                        }
                    }
                }
                handle_advance(&self.rollup, &mut self.dispatcher, data).await
            }
            RollupRequest::InspectState(data) => handle_inspect(&self.rollup, data).await,
        };

        self.status = status;
        Ok(Some(status))
    }

    /// Poll forever.
    pub async fn run(&mut self) {
        loop {
            match self.step().await {
                Ok(_) => {}
                Err(e @ RollupError::Deserialize(_)) => {
                    error!("Dropping malformed request: {}", e);
                }
                Err(e) => {
                    warn!("Finish failed, retrying in {:?}: {}", self.retry_delay, e);
                    tokio::time::sleep(self.retry_delay).await;
                }
            }
        }
    }
}
