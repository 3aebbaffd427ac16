//! Process-lifetime register of the active persona.
//!
//! Holds the canonical key of the persona consulted by the answer pipeline.
//! Constructed once at startup and shared via `Arc` across tool invocations;
//! deliberately not persisted, so every server process starts with no active
//! persona. The register is independent of the content store — a pointer to a
//! persona with no stored content is a valid, detectable state.

use std::sync::Mutex;

/// The active-persona register. Last writer wins under concurrent activation;
/// there is exactly one logical current persona per process.
#[derive(Debug, Default)]
pub struct ActivePersona {
    current: Mutex<Option<String>>,
}

impl ActivePersona {
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate a persona by canonical key.
    pub fn set(&self, key: &str) {
        *self.current.lock().expect("active persona lock poisoned") = Some(key.to_string());
    }

    /// Canonical key of the active persona, if any.
    pub fn current(&self) -> Option<String> {
        self.current
            .lock()
            .expect("active persona lock poisoned")
            .clone()
    }

    pub fn is_set(&self) -> bool {
        self.current().is_some()
    }

    /// Deactivate whatever persona is current.
    pub fn clear(&self) {
        *self.current.lock().expect("active persona lock poisoned") = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let state = ActivePersona::new();
        assert!(!state.is_set());
        assert_eq!(state.current(), None);
    }

    #[test]
    fn set_and_read_back() {
        let state = ActivePersona::new();
        state.set("ada_lovelace");
        assert!(state.is_set());
        assert_eq!(state.current(), Some("ada_lovelace".to_string()));
    }

    #[test]
    fn last_writer_wins() {
        let state = ActivePersona::new();
        state.set("ada_lovelace");
        state.set("grace_hopper");
        assert_eq!(state.current(), Some("grace_hopper".to_string()));
    }

    #[test]
    fn clear_resets() {
        let state = ActivePersona::new();
        state.set("ada_lovelace");
        state.clear();
        assert!(!state.is_set());
    }
}
