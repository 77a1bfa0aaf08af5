// Pure decision function for the payment dialog.
//
// Responsibilities
// - Allow one charge at a time and settle it once.
// - Accept only a receipt for the requested amount and the chosen method.
// - Refuse to cancel a payment that already went through.

use crate::modules::event_registrations::core::events::PaymentEvent;
use crate::modules::event_registrations::core::model::PaymentRequest;
use crate::modules::event_registrations::core::state::PaymentState;
use crate::modules::event_registrations::use_cases::pay_for_registration::command::PaymentCommand;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum PaymentDecideError {
    #[error("a payment is already being processed")]
    AlreadyProcessing,

    #[error("payment has already succeeded")]
    AlreadySettled,

    #[error("no payment is being processed")]
    NotProcessing,

    #[error("receipt does not match the payment being processed")]
    ReceiptMismatch,
}

pub fn decide_payment(
    state: &PaymentState,
    request: &PaymentRequest,
    command: PaymentCommand,
) -> Result<Vec<PaymentEvent>, PaymentDecideError> {
    match (state, command) {
        (PaymentState::Idle, PaymentCommand::Choose { method }) => {
            Ok(vec![PaymentEvent::ProcessingStarted { method }])
        }
        (PaymentState::Processing { .. }, PaymentCommand::Choose { .. }) => {
            Err(PaymentDecideError::AlreadyProcessing)
        }
        (PaymentState::Processing { method }, PaymentCommand::Complete { receipt }) => {
            if receipt.method != *method || receipt.amount != request.amount {
                return Err(PaymentDecideError::ReceiptMismatch);
            }
            Ok(vec![PaymentEvent::PaymentSucceeded { receipt }])
        }
        (PaymentState::Processing { .. }, PaymentCommand::Fail { reason }) => {
            Ok(vec![PaymentEvent::PaymentFailed { reason }])
        }
        (PaymentState::Processing { .. }, PaymentCommand::Cancel) => {
            Ok(vec![PaymentEvent::ProcessingCancelled])
        }
        (PaymentState::Idle, PaymentCommand::Cancel) => Ok(vec![]),
        (PaymentState::Succeeded { .. }, _) => Err(PaymentDecideError::AlreadySettled),
        (PaymentState::Idle, PaymentCommand::Complete { .. } | PaymentCommand::Fail { .. }) => {
            Err(PaymentDecideError::NotProcessing)
        }
    }
}
