//! Session store.
//!
//! Persists the logged-in user, the access token, and the optional host-link
//! gate under `~/.local/share/meetdash/session.json`. This is the analogue
//! of the browser's storage keys: written on login, removed on logout.
//!
//! # The host gate is not a security boundary
//!
//! The gate blob is the host password XORed with a SHA-256 keystream whose
//! key is a constant embedded in this source file. Anyone with the binary
//! can derive the keystream, so this is obfuscation for a local
//! convenience PIN, not encryption in any meaningful sense and not access
//! control: the service serves host URLs regardless. The gate only keeps a
//! shared terminal from displaying host links on a stray keystroke.

use std::path::{Path, PathBuf};

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use meetdash_core::User;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Embedded keystream key. Ships in the binary; see the module docs.
const GATE_KEY: &[u8] = b"meetdash-host-gate-v1";

const NONCE_LEN: usize = 16;

/// A persisted login session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The authenticated user record.
    pub user: User,
    /// Bearer token for the service.
    pub access_token: String,
    /// Optional host-link gate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_gate: Option<HostGate>,
}

/// Reads and writes the session file.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Creates a store over a specific file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store over the default session path.
    pub fn default_location() -> Self {
        Self::new(ClientConfig::default_data_dir().join("session.json"))
    }

    /// The file path this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored session, if one exists.
    ///
    /// A missing file means logged out and returns `None`; an unreadable or
    /// undecodable file is an error, not a silent logout.
    pub fn load(&self) -> ClientResult<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        let session = serde_json::from_str(&content).map_err(|e| {
            ClientError::Session(format!(
                "unreadable session file {}: {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(Some(session))
    }

    /// Loads the stored session or fails if logged out.
    pub fn require(&self) -> ClientResult<Session> {
        self.load()?.ok_or_else(|| {
            ClientError::Session("not logged in. Run: meetdash login --email <EMAIL>".to_string())
        })
    }

    /// Writes the session, creating parent directories as needed.
    pub fn save(&self, session: &Session) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(session)
            .map_err(|e| ClientError::Session(format!("failed to encode session: {}", e)))?;
        std::fs::write(&self.path, content)?;
        debug!(path = %self.path.display(), "session written");
        Ok(())
    }

    /// Removes the session file, if present.
    pub fn clear(&self) -> ClientResult<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
            debug!(path = %self.path.display(), "session removed");
        }
        Ok(())
    }
}

/// The obfuscated host-link gate blob.
///
/// See the module docs: this is a local convenience PIN, not authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostGate {
    /// Random nonce, base64.
    nonce: String,
    /// Password XORed with the keystream, base64.
    blob: String,
}

impl HostGate {
    /// Seals a gate password into an obfuscated blob.
    pub fn seal(password: &str) -> Self {
        let mut nonce = [0u8; NONCE_LEN];
        rand::rng().fill_bytes(&mut nonce);

        let mut blob = password.as_bytes().to_vec();
        apply_keystream(&mut blob, &nonce);

        Self {
            nonce: BASE64.encode(nonce),
            blob: BASE64.encode(blob),
        }
    }

    /// Checks a candidate password against the sealed one.
    pub fn verify(&self, candidate: &str) -> bool {
        self.open()
            .is_some_and(|sealed| sealed.as_bytes() == candidate.as_bytes())
    }

    fn open(&self) -> Option<String> {
        let nonce = BASE64.decode(&self.nonce).ok()?;
        let mut blob = BASE64.decode(&self.blob).ok()?;
        apply_keystream(&mut blob, &nonce);
        String::from_utf8(blob).ok()
    }
}

/// XORs `data` in place with a SHA-256 counter keystream.
fn apply_keystream(data: &mut [u8], nonce: &[u8]) {
    for (block_index, chunk) in data.chunks_mut(Sha256::output_size()).enumerate() {
        let mut hasher = Sha256::new();
        hasher.update(GATE_KEY);
        hasher.update(nonce);
        hasher.update((block_index as u64).to_le_bytes());
        let block = hasher.finalize();
        for (byte, key) in chunk.iter_mut().zip(block.iter()) {
            *byte ^= key;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_session() -> Session {
        Session {
            user: User {
                id: 7,
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                email: "jane@example.com".to_string(),
                mobile_number: None,
                country_id: Some(1),
                state_id: Some(10),
            },
            access_token: "tok-123".to_string(),
            host_gate: None,
        }
    }

    mod store {
        use super::*;

        #[test]
        fn missing_file_is_logged_out() {
            let dir = TempDir::new().unwrap();
            let store = SessionStore::new(dir.path().join("session.json"));
            assert!(store.load().unwrap().is_none());
            assert!(store.require().is_err());
        }

        #[test]
        fn save_load_roundtrip() {
            let dir = TempDir::new().unwrap();
            let store = SessionStore::new(dir.path().join("nested/session.json"));

            let session = sample_session();
            store.save(&session).unwrap();

            let loaded = store.require().unwrap();
            assert_eq!(loaded, session);
        }

        #[test]
        fn clear_removes_file() {
            let dir = TempDir::new().unwrap();
            let store = SessionStore::new(dir.path().join("session.json"));

            store.save(&sample_session()).unwrap();
            store.clear().unwrap();
            assert!(store.load().unwrap().is_none());

            // Clearing twice is fine.
            store.clear().unwrap();
        }

        #[test]
        fn corrupt_file_is_an_error_not_a_logout() {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("session.json");
            std::fs::write(&path, "{not json").unwrap();

            let store = SessionStore::new(path);
            assert!(store.load().is_err());
        }
    }

    mod host_gate {
        use super::*;

        #[test]
        fn seal_verify_roundtrip() {
            let gate = HostGate::seal("my-pin-1234");
            assert!(gate.verify("my-pin-1234"));
            assert!(!gate.verify("wrong"));
            assert!(!gate.verify(""));
        }

        #[test]
        fn blob_does_not_contain_plaintext() {
            let gate = HostGate::seal("super-secret-pin");
            let json = serde_json::to_string(&gate).unwrap();
            assert!(!json.contains("super-secret-pin"));
        }

        #[test]
        fn nonce_randomizes_blobs() {
            let a = HostGate::seal("same-pin");
            let b = HostGate::seal("same-pin");
            assert_ne!(a, b);
            assert!(a.verify("same-pin"));
            assert!(b.verify("same-pin"));
        }

        #[test]
        fn long_password_spans_keystream_blocks() {
            let long = "p".repeat(100);
            let gate = HostGate::seal(&long);
            assert!(gate.verify(&long));
        }

        #[test]
        fn survives_session_roundtrip() {
            let dir = TempDir::new().unwrap();
            let store = SessionStore::new(dir.path().join("session.json"));

            let mut session = sample_session();
            session.host_gate = Some(HostGate::seal("pin"));
            store.save(&session).unwrap();

            let loaded = store.require().unwrap();
            assert!(loaded.host_gate.unwrap().verify("pin"));
        }
    }
}
