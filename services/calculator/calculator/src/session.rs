use std::collections::HashMap;
use std::time::Duration;

use log::debug;
use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::time::Instant;

use expression::Session;
use rocket_util::SessionKey;

/// Limits for the in-memory session table
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SessionConfig {
    /// Sessions untouched for this long are dropped
    pub idle_secs: u64,
    /// Upper bound on live sessions, the least recently used goes first
    pub capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> SessionConfig {
        SessionConfig {
            idle_secs: 30 * 60,
            capacity: 10_000,
        }
    }
}

struct Entry {
    session: Session,
    last_used: Instant,
}

/// Keypad sessions keyed by the client supplied session id
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Entry>>,
    idle: Duration,
    capacity: usize,
}

impl SessionStore {
    pub fn new(config: &SessionConfig) -> SessionStore {
        SessionStore {
            sessions: Mutex::new(HashMap::new()),
            idle: Duration::from_secs(config.idle_secs),
            capacity: config.capacity.max(1),
        }
    }

    /// Runs `f` against the session for `key`, creating it if needed
    pub async fn with<F, T>(&self, key: &SessionKey, f: F) -> T
    where
        F: FnOnce(&mut Session) -> T,
    {
        let now = Instant::now();
        let mut sessions = self.sessions.lock().await;

        if !sessions.contains_key(&key.0) {
            self.make_room(&mut sessions, now);
        }

        let idle = self.idle;
        let entry = sessions.entry(key.0.clone()).or_insert_with(|| Entry {
            session: Session::new(),
            last_used: now,
        });
        if now.duration_since(entry.last_used) >= idle {
            entry.session = Session::new();
        }
        entry.last_used = now;

        f(&mut entry.session)
    }

    /// Runs `f` against the session for `key` without creating or touching it.
    ///
    /// Unknown and expired keys see an empty session.
    pub async fn view<F, T>(&self, key: &SessionKey, f: F) -> T
    where
        F: FnOnce(&Session) -> T,
    {
        let now = Instant::now();
        let sessions = self.sessions.lock().await;

        match sessions.get(&key.0) {
            Some(entry) if now.duration_since(entry.last_used) < self.idle => f(&entry.session),
            _ => f(&Session::new()),
        }
    }

    pub async fn remove(&self, key: &SessionKey) {
        self.sessions.lock().await.remove(&key.0);
    }

    fn make_room(&self, sessions: &mut HashMap<String, Entry>, now: Instant) {
        let idle = self.idle;
        let before = sessions.len();
        sessions.retain(|_, entry| now.duration_since(entry.last_used) < idle);
        if sessions.len() < before {
            debug!("Expired {} idle sessions", before - sessions.len());
        }

        while sessions.len() >= self.capacity {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(key, _)| key.clone());

            match oldest {
                Some(key) => {
                    debug!("Evicting session {}", key);
                    sessions.remove(&key);
                }
                None => break,
            }
        }
    }

    #[cfg(test)]
    pub(crate) async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }
}
