use once_cell::sync::OnceCell;
use reqwest::Identity;
use std::{fs, path::Path};

use crate::{config::DownstreamConfig, error::RelayError};

static SHARED: OnceCell<TlsContext> = OnceCell::new();

/// Client identity for the mutually-authenticated provider connection.
///
/// Immutable once built and shared by every request. Decoding the keystore
/// touches the filesystem and runs key parsing, so [`TlsContext::shared`]
/// performs it at most once per process.
#[derive(Debug, Clone)]
pub struct TlsContext {
    identity: Identity,
}

impl TlsContext {
    /// Decode a PKCS#12 keystore into a client identity.
    pub fn from_pkcs12(keystore: &[u8], password: &str) -> Result<Self, RelayError> {
        let identity = Identity::from_pkcs12_der(keystore, password).map_err(|err| {
            RelayError::Configuration(format!("client keystore rejected: {err}"))
        })?;

        Ok(Self { identity })
    }

    /// Read the keystore file and decode it.
    pub fn load(path: &Path, password: &str) -> Result<Self, RelayError> {
        let bytes = fs::read(path).map_err(|err| {
            RelayError::Configuration(format!("failed to read keystore {}: {err}", path.display()))
        })?;

        Self::from_pkcs12(&bytes, password)
    }

    /// Process-lifetime context. Concurrent first callers are serialized by
    /// the cell; every later call returns the already-built context.
    pub fn shared(config: &DownstreamConfig) -> Result<&'static TlsContext, RelayError> {
        SHARED.get_or_try_init(|| Self::load(&config.keystore_path, &config.keystore_password))
    }

    pub(crate) fn identity(&self) -> Identity {
        self.identity.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const KEYSTORE: &[u8] = include_bytes!("../testdata/client.p12");
    const PASSWORD: &str = "relay-test";

    fn config() -> DownstreamConfig {
        DownstreamConfig {
            host: "weatherapi-com.p.rapidapi.com".to_string(),
            api_key: "KEY".to_string(),
            keystore_path: PathBuf::from(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/testdata/client.p12"
            )),
            keystore_password: PASSWORD.to_string(),
            connect_timeout_secs: 10,
            timeout_secs: 30,
        }
    }

    #[test]
    fn valid_keystore_and_password_builds_a_context() {
        let context = TlsContext::from_pkcs12(KEYSTORE, PASSWORD);
        assert!(context.is_ok());
    }

    #[test]
    fn wrong_password_is_a_configuration_error() {
        let err = TlsContext::from_pkcs12(KEYSTORE, "wrong-password").unwrap_err();
        assert!(matches!(err, RelayError::Configuration(_)));
    }

    #[test]
    fn garbage_keystore_bytes_are_a_configuration_error() {
        let err = TlsContext::from_pkcs12(b"not a keystore", PASSWORD).unwrap_err();
        assert!(matches!(err, RelayError::Configuration(_)));
    }

    #[test]
    fn missing_keystore_file_is_a_configuration_error() {
        let err = TlsContext::load(Path::new("/nonexistent/client.p12"), PASSWORD).unwrap_err();
        assert!(matches!(err, RelayError::Configuration(_)));
    }

    #[test]
    fn shared_context_is_built_once() {
        let cfg = config();

        let first = TlsContext::shared(&cfg).expect("shared context must build");
        let second = TlsContext::shared(&cfg).expect("shared context must be reused");

        assert!(std::ptr::eq(first, second));
    }
}
