use crate::modules::event_registrations::core::model::{
    PaymentMethod, PaymentReceipt, PaymentRequest, RegistrationRecord,
};
use crate::modules::event_registrations::core::ports::{
    GatewayError, PaymentGateway, RegistrationGateway,
};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use uuid::Uuid;

/// Waits a fixed delay and accepts every record, unless switched offline.
#[derive(Debug, Default)]
pub struct SimulatedRegistrationGateway {
    delay: Duration,
    offline: AtomicBool,
}

impl SimulatedRegistrationGateway {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            offline: AtomicBool::new(false),
        }
    }

    pub fn toggle_offline(&self) {
        self.offline.fetch_xor(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl RegistrationGateway for SimulatedRegistrationGateway {
    async fn submit(&self, record: &RegistrationRecord) -> Result<(), GatewayError> {
        tokio::time::sleep(self.delay).await;
        if self.offline.load(Ordering::SeqCst) {
            return Err(GatewayError::Network("registration service offline".into()));
        }
        tracing::debug!(event_id = %record.event_id, "registration accepted");
        Ok(())
    }
}

/// Waits a fixed delay and charges nothing. Succeeds unless told to decline.
#[derive(Debug, Default)]
pub struct SimulatedPaymentGateway {
    delay: Duration,
    declining: AtomicBool,
}

impl SimulatedPaymentGateway {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            declining: AtomicBool::new(false),
        }
    }

    pub fn toggle_declining(&self) {
        self.declining.fetch_xor(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl PaymentGateway for SimulatedPaymentGateway {
    async fn charge(
        &self,
        request: &PaymentRequest,
        method: PaymentMethod,
    ) -> Result<PaymentReceipt, GatewayError> {
        tokio::time::sleep(self.delay).await;
        if self.declining.load(Ordering::SeqCst) {
            return Err(GatewayError::Declined(format!("{method} was declined")));
        }
        Ok(PaymentReceipt {
            reference: Uuid::now_v7(),
            amount: request.amount,
            method,
            paid_at: Utc::now(),
        })
    }
}
