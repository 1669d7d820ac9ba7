/// Local storage key holding the current session identifier.
pub const SESSION_KEY: &str = "chatSessionId";

/// Persistence for the session identifier between page loads.
pub trait SessionStore {
    fn load(&self) -> Option<String>;
    fn save(&self, session_id: &str);
    fn clear(&self);
}

/// Browser `localStorage`. Every call looks the storage up again so the store
/// itself holds no JS handles and can live inside a Leptos signal.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalSessionStore;

impl LocalSessionStore {
    fn storage() -> Option<web_sys::Storage> {
        match web_sys::window().map(|w| w.local_storage()) {
            Some(Ok(Some(storage))) => Some(storage),
            Some(Err(e)) => {
                log::warn!("localStorage unavailable: {e:?}");
                None
            }
            _ => None,
        }
    }
}

impl SessionStore for LocalSessionStore {
    fn load(&self) -> Option<String> {
        let storage = Self::storage()?;
        match storage.get_item(SESSION_KEY) {
            Ok(value) => value.filter(|id| !id.is_empty()),
            Err(e) => {
                log::warn!("Failed to read {SESSION_KEY}: {e:?}");
                None
            }
        }
    }

    fn save(&self, session_id: &str) {
        if session_id.is_empty() {
            return;
        }
        if let Some(storage) = Self::storage() {
            if let Err(e) = storage.set_item(SESSION_KEY, session_id) {
                log::warn!("Failed to persist {SESSION_KEY}: {e:?}");
            }
        }
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            if let Err(e) = storage.remove_item(SESSION_KEY) {
                log::warn!("Failed to remove {SESSION_KEY}: {e:?}");
            }
        }
    }
}

/// In-memory store. Clones share the same slot.
#[cfg(test)]
#[derive(Clone, Debug, Default)]
pub struct MemorySessionStore {
    slot: std::sync::Arc<std::sync::Mutex<Option<String>>>,
}

#[cfg(test)]
impl MemorySessionStore {
    pub fn with_session(session_id: &str) -> Self {
        let store = Self::default();
        store.save(session_id);
        store
    }
}

#[cfg(test)]
impl SessionStore for MemorySessionStore {
    fn load(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }

    fn save(&self, session_id: &str) {
        if session_id.is_empty() {
            return;
        }
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(session_id.to_string());
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
    }
}
