// Commands accepted by the registration form.
//
// Purpose
// - Express what the attendee (or the payment dialog) asks the form to do.
//
// Responsibilities
// - Carry input data for the decider. Independent of HTTP or any other transport.

use crate::modules::event_registrations::core::model::{
    PaymentReceipt, RegistrationInput, RegistrationRecord,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationCommand {
    EditDraft { draft: RegistrationInput },
    Submit,
    ConfirmPayment { receipt: PaymentReceipt },
    AbandonPayment,
    CompleteSubmission { record: RegistrationRecord },
    FailSubmission { reason: String },
    Dismiss,
}
