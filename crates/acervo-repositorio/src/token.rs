use tokio::sync::Mutex;

/// Single-slot bearer token cache.
///
/// Shared by every in-flight request; populated lazily by the client and
/// cleared when the service rejects a token. A request racing against an
/// invalidation may still read the stale token, which is fine: the client's
/// retry-once logic recovers on its next call.
#[derive(Debug, Default)]
pub struct TokenCache {
    slot: Mutex<Option<String>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self) -> Option<String> {
        self.slot.lock().await.clone()
    }

    pub async fn set(&self, token: String) {
        *self.slot.lock().await = Some(token);
    }

    pub async fn invalidate(&self) {
        *self.slot.lock().await = None;
    }
}
