use crate::modules::event_registrations::core::evolve::evolve_payment;
use crate::modules::event_registrations::core::model::{
    PaymentMethod, PaymentReceipt, PaymentRequest,
};
use crate::modules::event_registrations::core::ports::PaymentGateway;
use crate::modules::event_registrations::core::state::PaymentState;
use crate::modules::event_registrations::use_cases::detach::detach;
use crate::modules::event_registrations::use_cases::flow_error::FlowError;
use crate::modules::event_registrations::use_cases::pay_for_registration::command::PaymentCommand;
use crate::modules::event_registrations::use_cases::pay_for_registration::decide::{
    PaymentDecideError, decide_payment,
};
use crate::shared::infrastructure::notifier::{Notification, Notifier};
use std::sync::Arc;
use tokio::sync::{Mutex, watch};

pub type OnPaymentSuccess = Box<dyn FnOnce(PaymentReceipt) + Send + 'static>;

/// One open payment dialog. The amount is fixed at open time.
///
/// The success callback is consumed on the first successful charge, so it can
/// never fire twice. Cancelling while a charge is in flight drops the charge and
/// leaves the dialog idle. A charge runs on its own task, so it settles even if
/// the caller stops waiting for it.
pub struct PaymentFlow<TGateway, TNotifier>
where
    TGateway: PaymentGateway + 'static,
    TNotifier: Notifier + 'static,
{
    session: Arc<PaymentSession<TGateway, TNotifier>>,
}

struct PaymentSession<TGateway, TNotifier> {
    request: PaymentRequest,
    state: Mutex<PaymentState>,
    gateway: Arc<TGateway>,
    notifier: Arc<TNotifier>,
    on_success: Mutex<Option<OnPaymentSuccess>>,
    cancel_signal: watch::Sender<()>,
}

impl<TGateway, TNotifier> PaymentFlow<TGateway, TNotifier>
where
    TGateway: PaymentGateway + 'static,
    TNotifier: Notifier + 'static,
{
    pub fn open(
        request: PaymentRequest,
        gateway: Arc<TGateway>,
        notifier: Arc<TNotifier>,
        on_success: impl FnOnce(PaymentReceipt) + Send + 'static,
    ) -> Self {
        let (cancel_signal, _) = watch::channel(());
        Self {
            session: Arc::new(PaymentSession {
                request,
                state: Mutex::new(PaymentState::Idle),
                gateway,
                notifier,
                on_success: Mutex::new(Some(Box::new(on_success))),
                cancel_signal,
            }),
        }
    }

    pub fn request(&self) -> &PaymentRequest {
        &self.session.request
    }

    pub fn methods(&self) -> [PaymentMethod; 2] {
        PaymentMethod::ALL
    }

    pub async fn state(&self) -> PaymentState {
        self.session.state.lock().await.clone()
    }

    pub async fn choose(&self, method: PaymentMethod) -> Result<PaymentReceipt, FlowError> {
        let session = self.session.clone();
        detach(async move { session.choose(method).await }).await
    }

    /// Dismisses the dialog. A no-op while idle, refused once the payment went through.
    pub async fn cancel(&self) -> Result<(), FlowError> {
        self.session.cancel().await
    }
}

impl<TGateway, TNotifier> PaymentSession<TGateway, TNotifier>
where
    TGateway: PaymentGateway + 'static,
    TNotifier: Notifier + 'static,
{
    async fn choose(&self, method: PaymentMethod) -> Result<PaymentReceipt, FlowError> {
        let mut cancelled = {
            let mut state = self.state.lock().await;
            let events = decide_payment(&state, &self.request, PaymentCommand::Choose { method })?;
            let current = std::mem::take(&mut *state);
            *state = events.into_iter().fold(current, evolve_payment);
            self.cancel_signal.subscribe()
        };
        tracing::info!(%method, amount = %self.request.amount, "processing payment");

        let outcome = tokio::select! {
            outcome = self.gateway.charge(&self.request, method) => outcome,
            _ = cancelled.changed() => {
                tracing::debug!(%method, "charge abandoned");
                return Err(FlowError::Cancelled);
            }
        };

        match outcome {
            Ok(receipt) => {
                self.settle(PaymentCommand::Complete {
                    receipt: receipt.clone(),
                })
                .await?;
                let on_success = self.on_success.lock().await.take();
                if let Some(on_success) = on_success {
                    on_success(receipt.clone());
                }
                self.notifier
                    .notify(Notification::info(
                        "Payment Successful!",
                        format!("Successfully paid {} via {}", receipt.amount, method),
                    ))
                    .await;
                tracing::info!(%method, reference = %receipt.reference, "payment succeeded");
                Ok(receipt)
            }
            Err(error) => {
                self.settle(PaymentCommand::Fail {
                    reason: error.to_string(),
                })
                .await?;
                self.notifier
                    .notify(Notification::destructive("Payment failed", error.to_string()))
                    .await;
                tracing::warn!(%method, %error, "payment failed");
                Err(error.into())
            }
        }
    }

    async fn cancel(&self) -> Result<(), FlowError> {
        let mut state = self.state.lock().await;
        let events = decide_payment(&state, &self.request, PaymentCommand::Cancel)?;
        if events.is_empty() {
            tracing::debug!("payment dialog closed without a charge in flight");
            return Ok(());
        }
        let current = std::mem::take(&mut *state);
        *state = events.into_iter().fold(current, evolve_payment);
        self.cancel_signal.send_replace(());
        Ok(())
    }

    async fn settle(&self, command: PaymentCommand) -> Result<(), FlowError> {
        let mut state = self.state.lock().await;
        let events = decide_payment(&state, &self.request, command).map_err(|e| match e {
            // Cancelled between the gateway answering and this lock.
            PaymentDecideError::NotProcessing => FlowError::Cancelled,
            other => other.into(),
        })?;
        let current = std::mem::take(&mut *state);
        *state = events.into_iter().fold(current, evolve_payment);
        Ok(())
    }
}

#[cfg(test)]
mod payment_flow_tests {
    use super::*;
    use crate::modules::event_registrations::adapters::outbound::simulated_gateways::SimulatedPaymentGateway;
    use crate::modules::event_registrations::core::ports::GatewayError;
    use crate::shared::core::primitives::Amount;
    use crate::shared::infrastructure::notifier::Severity;
    use crate::shared::infrastructure::notifier::in_memory::InMemoryNotifier;
    use rstest::{fixture, rstest};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    type Flow = PaymentFlow<SimulatedPaymentGateway, InMemoryNotifier>;

    struct BeforeEach {
        flow: Arc<Flow>,
        gateway: Arc<SimulatedPaymentGateway>,
        notifier: Arc<InMemoryNotifier>,
        successes: Arc<AtomicUsize>,
    }

    fn open_with_delay(delay: Duration) -> BeforeEach {
        let gateway = Arc::new(SimulatedPaymentGateway::new(delay));
        let notifier = Arc::new(InMemoryNotifier::new());
        let successes = Arc::new(AtomicUsize::new(0));
        let counter = successes.clone();
        let request = PaymentRequest::new(Amount::new(500), "Registration: Summit").unwrap();
        let flow = Arc::new(PaymentFlow::open(
            request,
            gateway.clone(),
            notifier.clone(),
            move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            },
        ));
        BeforeEach {
            flow,
            gateway,
            notifier,
            successes,
        }
    }

    #[fixture]
    fn before_each() -> BeforeEach {
        open_with_delay(Duration::ZERO)
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_charge_and_confirm_once(before_each: BeforeEach) {
        let receipt = before_each.flow.choose(PaymentMethod::Card).await.unwrap();

        assert_eq!(receipt.amount, Amount::new(500));
        assert_eq!(before_each.successes.load(Ordering::SeqCst), 1);
        assert_eq!(
            before_each.flow.state().await,
            PaymentState::Succeeded { receipt }
        );
        let sent = before_each.notifier.sent.lock().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].title, "Payment Successful!");
        assert_eq!(sent[0].description, "Successfully paid ₹500 via card");
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_not_charge_twice(before_each: BeforeEach) {
        before_each.flow.choose(PaymentMethod::Card).await.unwrap();
        let again = before_each.flow.choose(PaymentMethod::Wallet).await;

        assert_eq!(
            again,
            Err(FlowError::Payment(PaymentDecideError::AlreadySettled))
        );
        assert_eq!(before_each.successes.load(Ordering::SeqCst), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_return_to_idle_when_declined(before_each: BeforeEach) {
        before_each.gateway.toggle_declining();
        let result = before_each.flow.choose(PaymentMethod::Wallet).await;

        assert!(matches!(
            result,
            Err(FlowError::Gateway(GatewayError::Declined(_)))
        ));
        assert_eq!(before_each.flow.state().await, PaymentState::Idle);
        assert_eq!(before_each.successes.load(Ordering::SeqCst), 0);
        let sent = before_each.notifier.sent.lock().await;
        assert_eq!(sent[0].severity, Severity::Destructive);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_allow_another_attempt_after_a_decline(before_each: BeforeEach) {
        before_each.gateway.toggle_declining();
        let _ = before_each.flow.choose(PaymentMethod::Card).await;
        before_each.gateway.toggle_declining();

        assert!(before_each.flow.choose(PaymentMethod::Card).await.is_ok());
        assert_eq!(before_each.successes.load(Ordering::SeqCst), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_cancel_a_charge_in_flight() {
        let before_each = open_with_delay(Duration::from_secs(60));
        let flow = before_each.flow.clone();
        let pending = tokio::spawn(async move { flow.choose(PaymentMethod::Card).await });

        while before_each.flow.state().await == PaymentState::Idle {
            tokio::task::yield_now().await;
        }
        before_each.flow.cancel().await.unwrap();

        assert_eq!(pending.await.unwrap(), Err(FlowError::Cancelled));
        assert_eq!(before_each.flow.state().await, PaymentState::Idle);
        assert_eq!(before_each.successes.load(Ordering::SeqCst), 0);
        assert!(before_each.notifier.sent.lock().await.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_close_quietly_while_idle(before_each: BeforeEach) {
        before_each.flow.cancel().await.unwrap();

        assert_eq!(before_each.flow.state().await, PaymentState::Idle);
        assert_eq!(before_each.successes.load(Ordering::SeqCst), 0);
        assert_eq!(before_each.flow.methods(), PaymentMethod::ALL);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_settle_a_charge_whose_caller_stopped_waiting() {
        let before_each = open_with_delay(Duration::from_millis(100));
        let flow = before_each.flow.clone();
        let caller = tokio::spawn(async move { flow.choose(PaymentMethod::Card).await });

        tokio::time::sleep(Duration::from_millis(20)).await;
        caller.abort();
        tokio::time::sleep(Duration::from_millis(250)).await;

        assert!(matches!(
            before_each.flow.state().await,
            PaymentState::Succeeded { .. }
        ));
        assert_eq!(before_each.successes.load(Ordering::SeqCst), 1);
    }
}
