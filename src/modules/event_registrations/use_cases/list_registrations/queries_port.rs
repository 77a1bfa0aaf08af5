use crate::modules::event_registrations::core::model::RegistrationRecord;
use async_trait::async_trait;

#[async_trait]
pub trait RegistrationQueries: Send + Sync {
    /// Oldest first. `event_id` of `None` lists every event.
    async fn list_registrations(
        &self,
        event_id: Option<&str>,
        offset: u64,
        limit: u64,
    ) -> anyhow::Result<Vec<RegistrationRecord>>;
}
