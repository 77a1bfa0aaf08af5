use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Open dialogs by id. Each dialog is an independent flow instance.
pub struct InMemoryDialogs<TDialog> {
    dialogs: Mutex<HashMap<Uuid, Arc<TDialog>>>,
}

impl<TDialog> Default for InMemoryDialogs<TDialog> {
    fn default() -> Self {
        Self {
            dialogs: Mutex::new(HashMap::new()),
        }
    }
}

impl<TDialog> InMemoryDialogs<TDialog> {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, dialog: Arc<TDialog>) -> Uuid {
        let id = Uuid::now_v7();
        self.dialogs.lock().await.insert(id, dialog);
        id
    }

    pub async fn get(&self, id: Uuid) -> Option<Arc<TDialog>> {
        self.dialogs.lock().await.get(&id).cloned()
    }

    pub async fn remove(&self, id: Uuid) -> Option<Arc<TDialog>> {
        self.dialogs.lock().await.remove(&id)
    }
}

#[cfg(test)]
mod in_memory_dialogs_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn it_should_hand_back_the_same_dialog_until_removed() {
        let dialogs = InMemoryDialogs::new();
        let id = dialogs.insert(Arc::new("dialog")).await;

        assert_eq!(dialogs.get(id).await.as_deref(), Some(&"dialog"));
        assert!(dialogs.remove(id).await.is_some());
        assert!(dialogs.get(id).await.is_none());
    }
}
