use crate::modules::event_registrations::core::ports::GatewayError;
use crate::modules::event_registrations::core::validation::ValidationError;
use crate::modules::event_registrations::use_cases::pay_for_registration::decide::PaymentDecideError;
use crate::modules::event_registrations::use_cases::register_for_event::decide::RegistrationDecideError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FlowError {
    #[error(transparent)]
    Registration(#[from] RegistrationDecideError),

    #[error(transparent)]
    Payment(#[from] PaymentDecideError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("cancelled before completion")]
    Cancelled,
}

impl FlowError {
    pub fn validation(&self) -> Option<ValidationError> {
        match self {
            FlowError::Registration(RegistrationDecideError::Invalid(reason)) => Some(*reason),
            _ => None,
        }
    }
}
