// src/cart/session.rs
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::http::HeaderMap;
use tracing::debug;
use uuid::Uuid;

use crate::cart::store::CartStore;
use crate::checkout::CheckoutFlow;
use crate::cookies;

/// Everything a shopper accumulates while browsing.
#[derive(Debug, Default)]
pub struct ShopperSession {
    pub cart: CartStore,
    pub checkout: CheckoutFlow,
}

pub type SessionHandle = Arc<tokio::sync::Mutex<ShopperSession>>;

struct Entry {
    session: SessionHandle,
    last_seen: Instant,
}

/// Shopper sessions keyed by the `cart_session` cookie. Sessions idle for longer than
/// `idle` are dropped the next time any session is resolved.
#[derive(Clone)]
pub struct ShopperSessions {
    entries: Arc<Mutex<HashMap<Uuid, Entry>>>,
    idle: Duration,
}

impl ShopperSessions {
    pub fn new(idle: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            idle,
        }
    }

    fn live_entries(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, Entry>> {
        let mut entries = self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let now = Instant::now();
        let idle = self.idle;
        entries.retain(|_, e| now.duration_since(e.last_seen) <= idle);
        entries
    }

    fn touch(entries: &mut HashMap<Uuid, Entry>, headers: &HeaderMap) -> Option<(Uuid, SessionHandle)> {
        let id = cookies::read(headers, cookies::CART_SESSION)
            .and_then(|raw| Uuid::parse_str(&raw).ok())?;
        let entry = entries.get_mut(&id)?;
        entry.last_seen = Instant::now();
        Some((id, entry.session.clone()))
    }

    /// Existing session named by the request cookie. Never opens a new one, so read-only
    /// browsing leaves no state behind.
    pub fn peek(&self, headers: &HeaderMap) -> Option<(Uuid, SessionHandle)> {
        Self::touch(&mut self.live_entries(), headers)
    }

    /// Session named by the request cookie, or a fresh one when it is absent or unknown.
    pub fn resolve(&self, headers: &HeaderMap) -> (Uuid, SessionHandle) {
        let mut entries = self.live_entries();
        if let Some(found) = Self::touch(&mut entries, headers) {
            return found;
        }

        let id = Uuid::new_v4();
        debug!(session = %id, "Opening shopper session");
        let session = SessionHandle::default();
        entries.insert(id, Entry { session: session.clone(), last_seen: Instant::now() });
        (id, session)
    }

    pub fn cookie(&self, id: Uuid) -> String {
        cookies::set(cookies::CART_SESSION, &id.to_string(), self.idle.as_secs())
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }
}
