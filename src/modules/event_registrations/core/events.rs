use crate::modules::event_registrations::core::model::{
    PaymentMethod, PaymentReceipt, PaymentRequest, RegistrationInput, RegistrationRecord,
};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum RegistrationEvent {
    DraftEdited { draft: RegistrationInput },
    PaymentRequested { request: PaymentRequest },
    SubmissionStarted { paid: Option<PaymentReceipt> },
    PaymentAbandoned,
    SubmissionFailed { reason: String },
    RegistrationCompleted { record: RegistrationRecord },
    Dismissed,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum PaymentEvent {
    ProcessingStarted { method: PaymentMethod },
    PaymentSucceeded { receipt: PaymentReceipt },
    PaymentFailed { reason: String },
    ProcessingCancelled,
}
