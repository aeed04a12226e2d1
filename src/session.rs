//! CSRF and session token helpers.
//!
//! Token generation uses the OS RNG; validation is constant-time so the
//! comparison cannot leak a prefix through timing. Real session validation
//! lives in the session store; this layer only checks shape and triggers
//! invalidation.

use std::sync::Arc;

use rand::rngs::OsRng;
use rand::RngCore;
use subtle::ConstantTimeEq;

/// Token length in raw bytes; hex doubles it on the wire.
const TOKEN_BYTES: usize = 32;

fn random_hex() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Generate a CSRF token: 32 random bytes, hex encoded.
pub fn generate_token() -> String {
    random_hex()
}

/// Compare a submitted token against the expected one in constant time.
pub fn validate_token(candidate: &str, expected: &str) -> bool {
    // ct_eq on slices already folds a length mismatch into the result.
    candidate.as_bytes().ct_eq(expected.as_bytes()).into()
}

/// External session store collaborator. The real lookup and revocation
/// lives behind this seam.
pub trait SessionStore: Send + Sync + 'static {
    fn invalidate(&self, session_id: &str);
}

/// Session id generation and invalidation triggers.
pub struct SessionSecurity {
    store: Option<Arc<dyn SessionStore>>,
}

impl SessionSecurity {
    pub fn new() -> Self {
        Self { store: None }
    }

    pub fn with_store(store: Arc<dyn SessionStore>) -> Self {
        Self { store: Some(store) }
    }

    /// Generate a session id: 32 random bytes, hex encoded.
    pub fn generate_session_id(&self) -> String {
        random_hex()
    }

    /// Presence check only; ownership and liveness are the store's job.
    pub fn validate_session(&self, session_id: &str, user_id: &str) -> bool {
        !session_id.is_empty() && !user_id.is_empty()
    }

    /// Ask the session store to drop the session.
    pub fn invalidate_session(&self, session_id: &str) {
        if let Some(store) = &self.store {
            store.invalidate(session_id);
        }
    }
}

impl Default for SessionSecurity {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn tokens_are_64_hex_chars_and_unique() {
        let a = generate_token();
        let b = generate_token();
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn validate_token_agrees_with_equality() {
        let token = generate_token();
        assert!(validate_token(&token, &token));
        assert!(!validate_token(&token, &generate_token()));
        assert!(!validate_token("short", &token));
        assert!(!validate_token("", &token));
        assert!(validate_token("", ""));
    }

    #[test]
    fn session_ids_have_token_shape() {
        let session = SessionSecurity::new();
        let id = session.generate_session_id();
        assert_eq!(id.len(), 64);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn validate_session_is_a_presence_check() {
        let session = SessionSecurity::new();
        assert!(session.validate_session("sid", "uid"));
        assert!(!session.validate_session("", "uid"));
        assert!(!session.validate_session("sid", ""));
    }

    #[test]
    fn invalidate_delegates_to_the_store() {
        struct Recorder(Mutex<Vec<String>>);
        impl SessionStore for Recorder {
            fn invalidate(&self, session_id: &str) {
                self.0.lock().unwrap().push(session_id.to_string());
            }
        }

        let store = Arc::new(Recorder(Mutex::new(Vec::new())));
        let session = SessionSecurity::with_store(store.clone());
        session.invalidate_session("sid-1");
        assert_eq!(*store.0.lock().unwrap(), vec!["sid-1".to_string()]);

        // No store attached: a no-op, not a panic.
        SessionSecurity::new().invalidate_session("sid-2");
    }
}
