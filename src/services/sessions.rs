use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::BookingError;

struct Entry<T> {
    state: T,
    touched: Instant,
}

/// In-memory wizard sessions. Each session exclusively owns its state;
/// nothing outlives the process.
pub struct SessionStore<T> {
    inner: Arc<RwLock<HashMap<Uuid, Entry<T>>>>,
}

impl<T> Clone for SessionStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Default for SessionStore<T> {
    fn default() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<T: Clone> SessionStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self, state: T) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.write().await.insert(
            id,
            Entry {
                state,
                touched: Instant::now(),
            },
        );
        id
    }

    /// Reads a session. Polling counts as activity and keeps it alive.
    pub async fn get(&self, id: Uuid) -> Option<T> {
        let mut sessions = self.inner.write().await;
        let entry = sessions.get_mut(&id)?;
        entry.touched = Instant::now();
        Some(entry.state.clone())
    }

    /// Runs a transition under the write lock. The stored state is replaced
    /// only when `transition` succeeds.
    pub async fn apply<F>(&self, id: Uuid, transition: F) -> Result<T, BookingError>
    where
        F: FnOnce(&T) -> Result<T, BookingError>,
    {
        let mut sessions = self.inner.write().await;
        let entry = sessions.get_mut(&id).ok_or(BookingError::SessionNotFound(id))?;
        entry.touched = Instant::now();

        let next = transition(&entry.state)?;
        entry.state = next.clone();
        Ok(next)
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        self.inner.write().await.remove(&id).is_some()
    }

    /// Drops sessions untouched for at least `ttl`, returns how many went away.
    pub async fn purge_idle(&self, ttl: Duration) -> usize {
        let mut sessions = self.inner.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| entry.touched.elapsed() < ttl);
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}
