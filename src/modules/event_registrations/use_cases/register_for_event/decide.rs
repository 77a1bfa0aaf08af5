// Pure decision function for the registration form.
//
// Responsibilities
// - Validate the draft on submit and route priced events to payment, free events straight to submission.
// - Only produce a paid submission from a confirmed payment of the requested amount.
// - Keep a confirmed payment across a failed submission, so it is never charged twice.
// - Never perform input or output.

use crate::modules::event_registrations::core::events::RegistrationEvent;
use crate::modules::event_registrations::core::model::{
    EventReference, PaymentRequest, PaymentStatus,
};
use crate::modules::event_registrations::core::state::RegistrationState;
use crate::modules::event_registrations::core::validation::{ValidationError, validate};
use crate::modules::event_registrations::use_cases::register_for_event::command::RegistrationCommand;
use crate::shared::core::primitives::Amount;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum RegistrationDecideError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("registration form is not editable")]
    NotEditable,

    #[error("no payment is pending")]
    NoPaymentPending,

    #[error("paid {paid} but {requested} was requested")]
    AmountMismatch { requested: Amount, paid: Amount },

    #[error("registration is not being submitted")]
    NotSubmitting,

    #[error("record does not match the submission in progress")]
    RecordMismatch,

    #[error("registration dialog is closed")]
    Closed,
}

pub fn decide_registration(
    state: &RegistrationState,
    event: &EventReference,
    command: RegistrationCommand,
) -> Result<Vec<RegistrationEvent>, RegistrationDecideError> {
    if state.is_closed() {
        return match command {
            RegistrationCommand::Dismiss => Ok(vec![]),
            _ => Err(RegistrationDecideError::Closed),
        };
    }

    match command {
        RegistrationCommand::EditDraft { draft } => match state {
            RegistrationState::Editing { .. } => Ok(vec![RegistrationEvent::DraftEdited { draft }]),
            _ => Err(RegistrationDecideError::NotEditable),
        },
        RegistrationCommand::Submit => {
            let RegistrationState::Editing { draft, paid } = state else {
                return Err(RegistrationDecideError::NotEditable);
            };
            validate(draft)?;
            if paid.is_some() {
                return Ok(vec![RegistrationEvent::SubmissionStarted { paid: paid.clone() }]);
            }
            match PaymentRequest::for_event(event) {
                Some(request) => Ok(vec![RegistrationEvent::PaymentRequested { request }]),
                None => Ok(vec![RegistrationEvent::SubmissionStarted { paid: None }]),
            }
        }
        RegistrationCommand::ConfirmPayment { receipt } => {
            let RegistrationState::AwaitingPayment { request, .. } = state else {
                return Err(RegistrationDecideError::NoPaymentPending);
            };
            if receipt.amount != request.amount {
                return Err(RegistrationDecideError::AmountMismatch {
                    requested: request.amount,
                    paid: receipt.amount,
                });
            }
            Ok(vec![RegistrationEvent::SubmissionStarted {
                paid: Some(receipt),
            }])
        }
        RegistrationCommand::AbandonPayment => match state {
            RegistrationState::AwaitingPayment { .. } => Ok(vec![RegistrationEvent::PaymentAbandoned]),
            _ => Err(RegistrationDecideError::NoPaymentPending),
        },
        RegistrationCommand::CompleteSubmission { record } => {
            let RegistrationState::Submitting { draft, paid } = state else {
                return Err(RegistrationDecideError::NotSubmitting);
            };
            let matches = record.event_id == event.id
                && record.payment_status == PaymentStatus::of(paid.as_ref())
                && record.full_name == draft.full_name
                && record.college == draft.college
                && record.email == draft.email
                && record.phone == draft.phone;
            if !matches {
                return Err(RegistrationDecideError::RecordMismatch);
            }
            Ok(vec![RegistrationEvent::RegistrationCompleted { record }])
        }
        RegistrationCommand::FailSubmission { reason } => match state {
            RegistrationState::Submitting { .. } => {
                Ok(vec![RegistrationEvent::SubmissionFailed { reason }])
            }
            _ => Err(RegistrationDecideError::NotSubmitting),
        },
        RegistrationCommand::Dismiss => Ok(vec![RegistrationEvent::Dismissed]),
    }
}
