use crate::modules::event_registrations::core::events::RegistrationEvent;
use crate::modules::event_registrations::core::evolve::evolve_registration;
use crate::modules::event_registrations::core::model::{
    EventReference, PaymentMethod, PaymentReceipt, PaymentRequest, PaymentStatus,
    RegistrationInput, RegistrationRecord,
};
use crate::modules::event_registrations::core::ports::{PaymentGateway, RegistrationGateway};
use crate::modules::event_registrations::core::state::{PaymentState, RegistrationState};
use crate::modules::event_registrations::use_cases::detach::detach;
use crate::modules::event_registrations::use_cases::flow_error::FlowError;
use crate::modules::event_registrations::use_cases::pay_for_registration::handler::PaymentFlow;
use crate::modules::event_registrations::use_cases::register_for_event::command::RegistrationCommand;
use crate::modules::event_registrations::use_cases::register_for_event::decide::{
    RegistrationDecideError, decide_registration,
};
use crate::shared::core::primitives::{Clock, SystemClock};
use crate::shared::infrastructure::notifier::{Notification, Notifier};
use std::sync::Arc;
use tokio::sync::{Mutex, oneshot, watch};

pub type OnRegister = Box<dyn FnOnce(RegistrationRecord) + Send + 'static>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Registered(RegistrationRecord),
    PaymentRequired(PaymentRequest),
}

struct PendingPayment<TPayments, TNotifier>
where
    TPayments: PaymentGateway + 'static,
    TNotifier: Notifier + 'static,
{
    flow: Arc<PaymentFlow<TPayments, TNotifier>>,
    confirmation: oneshot::Receiver<PaymentReceipt>,
}

/// One open registration dialog for one event.
///
/// `on_register` is handed the record of a successful registration and is
/// consumed when it does, so a dialog registers at most once. Dismissing the
/// dialog cancels whatever is in flight and the callback is never invoked
/// afterwards.
///
/// Operations that wait on a gateway run on their own task. A caller that
/// stops waiting does not leave the dialog stuck in `Submitting`.
pub struct RegistrationFlow<TRegistrations, TPayments, TNotifier>
where
    TRegistrations: RegistrationGateway + 'static,
    TPayments: PaymentGateway + 'static,
    TNotifier: Notifier + 'static,
{
    session: Arc<RegistrationSession<TRegistrations, TPayments, TNotifier>>,
    clock: Arc<dyn Clock>,
}

struct RegistrationSession<TRegistrations, TPayments, TNotifier>
where
    TRegistrations: RegistrationGateway + 'static,
    TPayments: PaymentGateway + 'static,
    TNotifier: Notifier + 'static,
{
    event: EventReference,
    state: Mutex<RegistrationState>,
    payment: Mutex<Option<PendingPayment<TPayments, TNotifier>>>,
    registrations: Arc<TRegistrations>,
    payments: Arc<TPayments>,
    notifier: Arc<TNotifier>,
    on_register: Mutex<Option<OnRegister>>,
    dismiss_signal: watch::Sender<()>,
}

impl<TRegistrations, TPayments, TNotifier> RegistrationFlow<TRegistrations, TPayments, TNotifier>
where
    TRegistrations: RegistrationGateway + 'static,
    TPayments: PaymentGateway + 'static,
    TNotifier: Notifier + 'static,
{
    pub fn open(
        event: EventReference,
        registrations: Arc<TRegistrations>,
        payments: Arc<TPayments>,
        notifier: Arc<TNotifier>,
        on_register: impl FnOnce(RegistrationRecord) + Send + 'static,
    ) -> Self {
        let (dismiss_signal, _) = watch::channel(());
        Self {
            session: Arc::new(RegistrationSession {
                event,
                state: Mutex::new(RegistrationState::default()),
                payment: Mutex::new(None),
                registrations,
                payments,
                notifier,
                on_register: Mutex::new(Some(Box::new(on_register))),
                dismiss_signal,
            }),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn event(&self) -> &EventReference {
        &self.session.event
    }

    pub async fn state(&self) -> RegistrationState {
        self.session.state.lock().await.clone()
    }

    pub async fn is_open(&self) -> bool {
        !self.session.state.lock().await.is_closed()
    }

    pub async fn payment_request(&self) -> Option<PaymentRequest> {
        let payment = self.session.payment.lock().await;
        payment.as_ref().map(|pending| pending.flow.request().clone())
    }

    pub async fn payment_state(&self) -> Option<PaymentState> {
        let payment = self.session.payment.lock().await;
        match payment.as_ref() {
            Some(pending) => Some(pending.flow.state().await),
            None => None,
        }
    }

    pub async fn edit(&self, draft: RegistrationInput) -> Result<(), FlowError> {
        self.session
            .apply(RegistrationCommand::EditDraft { draft })
            .await?;
        Ok(())
    }

    pub async fn submit(&self) -> Result<SubmitOutcome, FlowError> {
        let session = self.session.clone();
        let clock = self.clock.clone();
        detach(async move { session.submit(clock.as_ref()).await }).await
    }

    pub async fn choose_payment(&self, method: PaymentMethod) -> Result<RegistrationRecord, FlowError> {
        let session = self.session.clone();
        let clock = self.clock.clone();
        detach(async move { session.choose_payment(method, clock.as_ref()).await }).await
    }

    /// Closes the payment dialog and returns to editing with the draft intact.
    pub async fn cancel_payment(&self) -> Result<(), FlowError> {
        let session = self.session.clone();
        detach(async move { session.cancel_payment().await }).await
    }

    pub async fn dismiss(&self) -> Result<(), FlowError> {
        let session = self.session.clone();
        detach(async move { session.dismiss().await }).await
    }
}

impl<TRegistrations, TPayments, TNotifier> RegistrationSession<TRegistrations, TPayments, TNotifier>
where
    TRegistrations: RegistrationGateway + 'static,
    TPayments: PaymentGateway + 'static,
    TNotifier: Notifier + 'static,
{
    async fn submit(&self, clock: &dyn Clock) -> Result<SubmitOutcome, FlowError> {
        let decided = {
            let mut state = self.state.lock().await;
            match decide_registration(&state, &self.event, RegistrationCommand::Submit) {
                Ok(events) => {
                    let current = std::mem::take(&mut *state);
                    *state = events.into_iter().fold(current, evolve_registration);
                    if let RegistrationState::AwaitingPayment { request, .. } = &*state {
                        *self.payment.lock().await = Some(self.open_payment(request.clone()));
                    }
                    Ok(state.clone())
                }
                Err(error) => Err(error),
            }
        };

        match decided {
            Ok(RegistrationState::AwaitingPayment { request, .. }) => {
                tracing::info!(
                    event_id = %self.event.id,
                    amount = %request.amount,
                    "payment requested"
                );
                Ok(SubmitOutcome::PaymentRequired(request))
            }
            Ok(_) => self.finalize(clock).await.map(SubmitOutcome::Registered),
            Err(error) => {
                if let RegistrationDecideError::Invalid(reason) = &error {
                    tracing::warn!(event_id = %self.event.id, %reason, "registration rejected");
                    self.notifier.notify(reason.notification()).await;
                }
                Err(error.into())
            }
        }
    }

    async fn choose_payment(
        &self,
        method: PaymentMethod,
        clock: &dyn Clock,
    ) -> Result<RegistrationRecord, FlowError> {
        let flow = {
            let payment = self.payment.lock().await;
            match payment.as_ref() {
                Some(pending) => pending.flow.clone(),
                None => return Err(RegistrationDecideError::NoPaymentPending.into()),
            }
        };
        flow.choose(method).await?;

        let pending = self.payment.lock().await.take();
        let Some(mut pending) = pending else {
            // Dismissed while the charge was settling.
            return Err(FlowError::Cancelled);
        };
        let receipt = pending
            .confirmation
            .try_recv()
            .map_err(|_| FlowError::Cancelled)?;
        self.apply(RegistrationCommand::ConfirmPayment { receipt })
            .await
            .map_err(closed_as_cancelled)?;
        self.finalize(clock).await
    }

    async fn cancel_payment(&self) -> Result<(), FlowError> {
        let mut payment = self.payment.lock().await;
        let Some(pending) = payment.as_ref() else {
            return Err(RegistrationDecideError::NoPaymentPending.into());
        };
        pending.flow.cancel().await?;
        *payment = None;
        drop(payment);
        self.apply(RegistrationCommand::AbandonPayment).await?;
        tracing::debug!(event_id = %self.event.id, "payment abandoned");
        Ok(())
    }

    async fn dismiss(&self) -> Result<(), FlowError> {
        let events = self.apply(RegistrationCommand::Dismiss).await?;
        if events.is_empty() {
            return Ok(());
        }
        let pending = self.payment.lock().await.take();
        if let Some(pending) = pending {
            if let Err(error) = pending.flow.cancel().await {
                tracing::debug!(%error, "payment already settled at dismissal");
            }
        }
        self.dismiss_signal.send_replace(());
        tracing::debug!(event_id = %self.event.id, "registration dialog dismissed");
        Ok(())
    }

    fn open_payment(&self, request: PaymentRequest) -> PendingPayment<TPayments, TNotifier> {
        let (confirm, confirmation) = oneshot::channel();
        let flow = PaymentFlow::open(
            request,
            self.payments.clone(),
            self.notifier.clone(),
            move |receipt| {
                let _ = confirm.send(receipt);
            },
        );
        PendingPayment {
            flow: Arc::new(flow),
            confirmation,
        }
    }

    async fn finalize(&self, clock: &dyn Clock) -> Result<RegistrationRecord, FlowError> {
        let (record, mut dismissed) = {
            let state = self.state.lock().await;
            let RegistrationState::Submitting { draft, paid } = &*state else {
                return Err(RegistrationDecideError::NotSubmitting.into());
            };
            let record = RegistrationRecord::new(
                draft.clone(),
                self.event.id.clone(),
                PaymentStatus::of(paid.as_ref()),
                clock.now(),
            );
            (record, self.dismiss_signal.subscribe())
        };

        let submitted = tokio::select! {
            submitted = self.registrations.submit(&record) => submitted,
            _ = dismissed.changed() => {
                tracing::debug!(event_id = %self.event.id, "submission abandoned");
                return Err(FlowError::Cancelled);
            }
        };

        if let Err(error) = submitted {
            self.apply(RegistrationCommand::FailSubmission {
                reason: error.to_string(),
            })
            .await
            .map_err(closed_as_cancelled)?;
            self.notifier
                .notify(Notification::destructive("Registration failed", error.to_string()))
                .await;
            tracing::warn!(event_id = %self.event.id, %error, "registration failed");
            return Err(error.into());
        }

        self.apply(RegistrationCommand::CompleteSubmission {
            record: record.clone(),
        })
        .await
        .map_err(closed_as_cancelled)?;
        let on_register = self.on_register.lock().await.take();
        if let Some(on_register) = on_register {
            on_register(record.clone());
        }
        tracing::info!(
            event_id = %record.event_id,
            payment_status = ?record.payment_status,
            "registration completed"
        );
        Ok(record)
    }

    async fn apply(&self, command: RegistrationCommand) -> Result<Vec<RegistrationEvent>, FlowError> {
        let mut state = self.state.lock().await;
        let events = decide_registration(&state, &self.event, command)?;
        let current = std::mem::take(&mut *state);
        *state = events.iter().cloned().fold(current, evolve_registration);
        Ok(events)
    }
}

fn closed_as_cancelled(error: FlowError) -> FlowError {
    match error {
        FlowError::Registration(RegistrationDecideError::Closed) => FlowError::Cancelled,
        other => other,
    }
}
