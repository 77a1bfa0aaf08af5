use crate::modules::event_registrations::use_cases::flow_error::FlowError;
use std::future::Future;

/// Runs a flow transition on its own task and waits for it.
///
/// Dropping the returned future (a client hanging up mid-request) leaves the
/// task running, so a flow that started a gateway call always applies its
/// outcome.
pub async fn detach<T, F>(work: F) -> Result<T, FlowError>
where
    F: Future<Output = Result<T, FlowError>> + Send + 'static,
    T: Send + 'static,
{
    match tokio::spawn(work).await {
        Ok(outcome) => outcome,
        Err(error) => {
            tracing::error!(%error, "flow task did not run to completion");
            Err(FlowError::Cancelled)
        }
    }
}
