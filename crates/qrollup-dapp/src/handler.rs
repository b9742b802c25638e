//! Advance and inspect handlers.

use qrollup_hal::Backend;
use tracing::{debug, error, info, warn};

use crate::codec::{hex_to_str, str_to_hex};
use crate::command::Command;
use crate::dispatch::Dispatcher;
use crate::error::{DappError, DappResult};
use crate::rollup::{AdvanceData, InspectData, Rollup, Status};

/// Apply the command carried by an advance request.
///
/// On success a notice with the history or the measured distribution is
/// posted. On failure a report describing the error is posted instead and
/// the request is rejected.
pub async fn handle_advance<R, B>(
    rollup: &R,
    dispatcher: &mut Dispatcher<B>,
    data: &AdvanceData,
) -> Status
where
    R: Rollup + ?Sized,
    B: Backend,
{
    info!("Received advance request data {:?}", data);

    match process_advance(rollup, dispatcher, data).await {
        Ok(()) => Status::Accept,
        Err(e) => {
            error!("{}", e.trace());
            let body = serde_json::to_string(data).unwrap_or_else(|_| data.payload.clone());
            let message = format!("Error processing data {body}\n{}", e.trace());
            if let Err(report_err) = rollup.report(&str_to_hex(&message)).await {
                warn!("Failed to post error report: {}", report_err);
            }
            Status::Reject
        }
    }
}

async fn process_advance<R, B>(
    rollup: &R,
    dispatcher: &mut Dispatcher<B>,
    data: &AdvanceData,
) -> DappResult<()>
where
    R: Rollup + ?Sized,
    B: Backend,
{
    let input = hex_to_str(&data.payload)?;
    info!("Received input: {}", input);

    let command: Command = serde_json::from_str(&input)?;
    let outcome = dispatcher.dispatch(command).await?;
    debug!(
        "Circuit now has {} instructions",
        dispatcher.state().circuit().len()
    );

    let payload = outcome.notice_payload()?;
    rollup.notice(&payload).await.map_err(DappError::from)
}

/// Echo the inspect payload back as a report.
pub async fn handle_inspect<R>(rollup: &R, data: &InspectData) -> Status
where
    R: Rollup + ?Sized,
{
    info!("Received inspect request data {:?}", data);

    match rollup.report(&data.payload).await {
        Ok(()) => Status::Accept,
        Err(e) => {
            error!("Failed to post inspect report: {}", e);
            Status::Reject
        }
    }
}
