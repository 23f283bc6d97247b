//! Per-room mutual exclusion for booking admission.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, Weak};

use tokio::sync::OwnedMutexGuard;

use hotelhub_domain::id::RoomId;

/// A registry of async mutexes, one per room currently being written.
///
/// Entries are held weakly, so a room's mutex is dropped once the last guard
/// and waiter are gone.
#[derive(Default)]
pub struct RoomLocks {
    inner: Mutex<HashMap<RoomId, Weak<tokio::sync::Mutex<()>>>>,
}

impl RoomLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `room_id`. Access lasts as long as the
    /// returned guard.
    pub async fn acquire(&self, room_id: RoomId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            map.retain(|_, weak| weak.strong_count() > 0);
            if let Some(existing) = map.get(&room_id).and_then(Weak::upgrade) {
                existing
            } else {
                let fresh = Arc::new(tokio::sync::Mutex::new(()));
                map.insert(room_id, Arc::downgrade(&fresh));
                fresh
            }
        };
        lock.lock_owned().await
    }

    /// Number of rooms with a live mutex.
    #[must_use]
    pub fn len(&self) -> usize {
        let map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        map.values().filter(|weak| weak.strong_count() > 0).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
