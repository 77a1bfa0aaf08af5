// Ports define what the flows need from the outside world, without implementing it.
//
// Purpose
// - Describe the two network calls the flows make: finalizing a registration and charging a payment.
//
// Boundaries
// - No concrete input or output here. The simulated adapters live in adapters/outbound.

use crate::modules::event_registrations::core::model::{
    PaymentMethod, PaymentReceipt, PaymentRequest, RegistrationRecord,
};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    #[error("network error: {0}")]
    Network(String),

    #[error("payment declined: {0}")]
    Declined(String),
}

#[async_trait]
pub trait RegistrationGateway: Send + Sync {
    async fn submit(&self, record: &RegistrationRecord) -> Result<(), GatewayError>;
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn charge(
        &self,
        request: &PaymentRequest,
        method: PaymentMethod,
    ) -> Result<PaymentReceipt, GatewayError>;
}
