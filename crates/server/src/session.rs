//! Session management
//!
//! Holds one [`Engagement`] per session id. The manager map uses a
//! parking_lot RwLock for cheap lookups; each entry guards its engagement
//! behind a tokio Mutex so a single session's state is never mutated by
//! two concurrent requests. The core assumes exclusive sequential access,
//! and this is where that contract is enforced.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tokio::sync::{watch, Mutex, MutexGuard};

use honeypot_agent::Engagement;

use crate::ServerError;

/// One live session
pub struct SessionEntry {
    /// Session id
    pub id: String,
    engagement: Mutex<Engagement>,
    created_at: Instant,
    last_activity: RwLock<Instant>,
}

impl SessionEntry {
    fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            engagement: Mutex::new(Engagement::new(&id)),
            id,
            created_at: Instant::now(),
            last_activity: RwLock::new(Instant::now()),
        }
    }

    /// Acquire exclusive access to the engagement state. Requests for the
    /// same session queue here.
    pub async fn engagement(&self) -> MutexGuard<'_, Engagement> {
        self.engagement.lock().await
    }

    /// Update last activity
    pub fn touch(&self) {
        *self.last_activity.write() = Instant::now();
    }

    /// Whether the session has been idle past the timeout
    pub fn is_expired(&self, timeout: Duration) -> bool {
        self.last_activity.read().elapsed() > timeout
    }

    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }
}

/// Session registry with capacity and idle-expiry policy
pub struct SessionManager {
    sessions: RwLock<HashMap<String, Arc<SessionEntry>>>,
    max_sessions: usize,
    session_timeout: Duration,
    cleanup_interval: Duration,
}

impl SessionManager {
    pub fn new(max_sessions: usize) -> Self {
        Self::with_config(
            max_sessions,
            Duration::from_secs(3600),
            Duration::from_secs(300),
        )
    }

    pub fn with_config(
        max_sessions: usize,
        session_timeout: Duration,
        cleanup_interval: Duration,
    ) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            max_sessions,
            session_timeout,
            cleanup_interval,
        }
    }

    /// Fetch an existing session or create a fresh one for this id.
    ///
    /// A session and its ledger are born together on first contact.
    pub fn get_or_create(&self, id: &str) -> Result<Arc<SessionEntry>, ServerError> {
        if let Some(entry) = self.sessions.read().get(id) {
            return Ok(entry.clone());
        }

        let mut sessions = self.sessions.write();
        // Re-check under the write lock: another request may have won
        if let Some(entry) = sessions.get(id) {
            return Ok(entry.clone());
        }

        if sessions.len() >= self.max_sessions {
            self.cleanup_expired_internal(&mut sessions);
            if sessions.len() >= self.max_sessions {
                return Err(ServerError::Capacity("max sessions reached".to_string()));
            }
        }

        let entry = Arc::new(SessionEntry::new(id));
        sessions.insert(id.to_string(), entry.clone());
        tracing::info!(session_id = %id, "created session");

        Ok(entry)
    }

    /// Get a session by id
    pub fn get(&self, id: &str) -> Option<Arc<SessionEntry>> {
        self.sessions.read().get(id).cloned()
    }

    /// Remove a session
    pub fn remove(&self, id: &str) {
        if self.sessions.write().remove(id).is_some() {
            tracing::info!(session_id = %id, "removed session");
        }
    }

    /// Active session count
    pub fn count(&self) -> usize {
        self.sessions.read().len()
    }

    /// List all session ids
    pub fn list(&self) -> Vec<String> {
        self.sessions.read().keys().cloned().collect()
    }

    /// Drop sessions idle past the timeout
    pub fn cleanup_expired(&self) {
        let mut sessions = self.sessions.write();
        self.cleanup_expired_internal(&mut sessions);
    }

    fn cleanup_expired_internal(&self, sessions: &mut HashMap<String, Arc<SessionEntry>>) {
        let timeout = self.session_timeout;
        let expired: Vec<String> = sessions
            .iter()
            .filter(|(_, entry)| entry.is_expired(timeout))
            .map(|(id, _)| id.clone())
            .collect();

        for id in expired {
            sessions.remove(&id);
            tracing::info!(session_id = %id, "expired session");
        }
    }

    /// Start a background task that sweeps expired sessions.
    ///
    /// Returns a shutdown sender that stops the task.
    pub fn start_cleanup_task(self: &Arc<Self>) -> watch::Sender<bool> {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let manager = Arc::clone(self);
        let interval = manager.cleanup_interval;

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let before = manager.count();
                        manager.cleanup_expired();
                        let after = manager.count();
                        if before != after {
                            tracing::info!(
                                removed = before - after,
                                remaining = after,
                                "session cleanup sweep"
                            );
                        }
                    }
                    _ = shutdown_rx.changed() => {
                        if *shutdown_rx.borrow() {
                            tracing::info!("session cleanup task shutting down");
                            break;
                        }
                    }
                }
            }
        });

        shutdown_tx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_create_is_stable_per_id() {
        let manager = SessionManager::new(10);
        let first = manager.get_or_create("s-1").unwrap();
        let second = manager.get_or_create("s-1").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(manager.count(), 1);
    }

    #[test]
    fn test_capacity_limit() {
        let manager = SessionManager::new(2);
        manager.get_or_create("a").unwrap();
        manager.get_or_create("b").unwrap();

        assert!(manager.get_or_create("c").is_err());
        // Existing ids still resolve at capacity
        assert!(manager.get_or_create("a").is_ok());
    }

    #[test]
    fn test_remove() {
        let manager = SessionManager::new(10);
        manager.get_or_create("s-1").unwrap();
        manager.remove("s-1");
        assert!(manager.get("s-1").is_none());
    }

    #[test]
    fn test_expiry_sweep() {
        let manager =
            SessionManager::with_config(10, Duration::from_millis(0), Duration::from_secs(1));
        manager.get_or_create("s-1").unwrap();

        std::thread::sleep(Duration::from_millis(5));
        manager.cleanup_expired();
        assert_eq!(manager.count(), 0);
    }

    #[tokio::test]
    async fn test_engagement_guard_serializes_access() {
        let manager = SessionManager::new(10);
        let entry = manager.get_or_create("s-1").unwrap();

        let guard = entry.engagement().await;
        assert!(entry.engagement.try_lock().is_err());
        drop(guard);
        assert!(entry.engagement.try_lock().is_ok());
    }
}
