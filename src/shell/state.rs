use crate::modules::event_registrations::adapters::outbound::dialogs_in_memory::InMemoryDialogs;
use crate::modules::event_registrations::adapters::outbound::registrations_in_memory::InMemoryRegistrations;
use crate::modules::event_registrations::adapters::outbound::simulated_gateways::{
    SimulatedPaymentGateway, SimulatedRegistrationGateway,
};
use crate::modules::event_registrations::use_cases::list_registrations::queries_port::RegistrationQueries;
use crate::modules::event_registrations::use_cases::register_for_event::handler::RegistrationFlow;
use crate::shared::infrastructure::notifier::tracing_notifier::TracingNotifier;
use crate::shell::config::AppConfig;
use std::sync::Arc;

pub type Dialog =
    RegistrationFlow<SimulatedRegistrationGateway, SimulatedPaymentGateway, TracingNotifier>;

#[derive(Clone)]
pub struct AppState {
    pub dialogs: Arc<InMemoryDialogs<Dialog>>,
    pub registrations: Arc<InMemoryRegistrations>,
    pub queries: Arc<dyn RegistrationQueries + Send + Sync>,
    pub registration_gateway: Arc<SimulatedRegistrationGateway>,
    pub payment_gateway: Arc<SimulatedPaymentGateway>,
    pub notifier: Arc<TracingNotifier>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        let registrations = Arc::new(InMemoryRegistrations::new());
        Self {
            dialogs: Arc::new(InMemoryDialogs::new()),
            queries: registrations.clone(),
            registrations,
            registration_gateway: Arc::new(SimulatedRegistrationGateway::new(config.submit_delay)),
            payment_gateway: Arc::new(SimulatedPaymentGateway::new(config.payment_delay)),
            notifier: Arc::new(TracingNotifier),
        }
    }
}
