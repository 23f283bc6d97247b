//! Simulated door locks.

use std::collections::HashSet;
use std::future::Future;
use std::time::Duration;

use tokio::sync::Mutex;

use hotelhub_app::ports::DoorActuator;
use hotelhub_domain::error::HotelError;
use hotelhub_domain::id::RoomId;
use hotelhub_domain::time::{Timestamp, now};

/// Failures a simulated lock can report.
#[derive(Debug, thiserror::Error)]
pub enum DoorError {
    #[error("door of room {0} is jammed")]
    Jammed(RoomId),
}

impl From<DoorError> for HotelError {
    fn from(err: DoorError) -> Self {
        Self::Actuator(Box::new(err))
    }
}

/// One accepted unlock command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnlockRecord {
    pub room_id: RoomId,
    pub at: Timestamp,
}

/// Door actuator that keeps an in-memory log instead of driving hardware.
#[derive(Default)]
pub struct VirtualDoorLock {
    log: Mutex<Vec<UnlockRecord>>,
    jammed: HashSet<RoomId>,
    latency: Option<Duration>,
}

impl VirtualDoorLock {
    /// Make the lock of `room_id` fail every command.
    #[must_use]
    pub fn with_jammed(mut self, room_id: RoomId) -> Self {
        self.jammed.insert(room_id);
        self
    }

    /// Delay every command, as a radio round-trip would.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Unlocks accepted so far, oldest first.
    pub async fn history(&self) -> Vec<UnlockRecord> {
        self.log.lock().await.clone()
    }
}

impl DoorActuator for VirtualDoorLock {
    fn unlock(&self, room_id: RoomId) -> impl Future<Output = Result<(), HotelError>> + Send {
        async move {
            if let Some(latency) = self.latency {
                tokio::time::sleep(latency).await;
            }
            if self.jammed.contains(&room_id) {
                tracing::warn!(room_id = %room_id, "virtual door jammed");
                return Err(DoorError::Jammed(room_id).into());
            }
            self.log.lock().await.push(UnlockRecord {
                room_id,
                at: now(),
            });
            tracing::info!(room_id = %room_id, "virtual door unlocked");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_record_unlocks_in_order() {
        let lock = VirtualDoorLock::default();
        let first = RoomId::new();
        let second = RoomId::new();

        lock.unlock(first).await.unwrap();
        lock.unlock(second).await.unwrap();

        let rooms: Vec<RoomId> = lock.history().await.iter().map(|r| r.room_id).collect();
        assert_eq!(rooms, vec![first, second]);
    }

    #[tokio::test]
    async fn should_fail_jammed_door_with_actuator_error() {
        let room_id = RoomId::new();
        let lock = VirtualDoorLock::default().with_jammed(room_id);

        let result = lock.unlock(room_id).await;
        assert!(matches!(result, Err(HotelError::Actuator(_))));
        assert!(lock.history().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn should_wait_for_configured_latency() {
        let lock = VirtualDoorLock::default().with_latency(Duration::from_millis(250));
        let started = tokio::time::Instant::now();

        lock.unlock(RoomId::new()).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(250));
    }
}
