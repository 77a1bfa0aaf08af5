use crate::shared::infrastructure::notifier::{Notification, Notifier};
use tokio::sync::Mutex;

#[derive(Default)]
pub struct InMemoryNotifier {
    pub sent: Mutex<Vec<Notification>>,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn titles(&self) -> Vec<String> {
        self.sent
            .lock()
            .await
            .iter()
            .map(|n| n.title.clone())
            .collect()
    }
}

#[async_trait::async_trait]
impl Notifier for InMemoryNotifier {
    async fn notify(&self, notification: Notification) {
        self.sent.lock().await.push(notification);
    }
}
