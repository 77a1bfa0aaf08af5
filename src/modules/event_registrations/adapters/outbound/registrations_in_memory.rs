use crate::modules::event_registrations::core::model::RegistrationRecord;
use crate::modules::event_registrations::use_cases::list_registrations::queries_port::RegistrationQueries;
use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};

/// Where the shell's `on_register` callbacks land. Written from synchronous
/// callbacks, hence the blocking mutex.
#[derive(Default)]
pub struct InMemoryRegistrations {
    records: Mutex<Vec<RegistrationRecord>>,
}

impl InMemoryRegistrations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, record: RegistrationRecord) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
    }
}

#[async_trait]
impl RegistrationQueries for InMemoryRegistrations {
    async fn list_registrations(
        &self,
        event_id: Option<&str>,
        offset: u64,
        limit: u64,
    ) -> anyhow::Result<Vec<RegistrationRecord>> {
        let records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        let offset = usize::try_from(offset)?;
        let limit = usize::try_from(limit)?;
        Ok(records
            .iter()
            .filter(|record| event_id.is_none_or(|id| record.event_id == id))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }
}
