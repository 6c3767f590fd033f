//! Unencrypted JSON key files as found under `<wallet>/hotkeys/<name>`.
//!
//! ## Key File Format
//!
//! ```json
//! {
//!     "accountId": "0x<hex public key>",
//!     "publicKey": "0x<hex public key>",
//!     "privateKey": "0x<hex secret key>",
//!     "ss58Address": "5..."
//! }
//! ```
//!
//! Every field is optional on read: the scanner only needs `ss58Address` and
//! the loader only needs `privateKey`.

use crate::wallet::keypair::{Keypair, KeypairError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use zeroize::Zeroize;

/// Errors that can occur while reading or writing key files.
#[derive(Debug, Error)]
pub enum KeyfileError {
    #[error("Key file not found: {0}")]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No private key found in key file")]
    MissingPrivateKey,

    #[error("Invalid key file format: {0}")]
    InvalidFormat(String),

    #[error("Private key is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("Keypair error: {0}")]
    Keypair(#[from] KeypairError),

    #[error("Key file already exists and overwrite is not enabled")]
    AlreadyExists,
}

/// Serialized form of an unencrypted key file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct KeyfileJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ss58_address: Option<String>,
}

impl KeyfileJson {
    /// Build the on-disk representation of a keypair.
    pub fn from_keypair(keypair: &Keypair) -> Self {
        let public_hex = format!("0x{}", hex::encode(keypair.public_key()));
        let mut secret = keypair.to_full_bytes();
        let private_hex = format!("0x{}", hex::encode(&secret));
        secret.zeroize();

        Self {
            account_id: Some(public_hex.clone()),
            public_key: Some(public_hex),
            private_key: Some(private_hex),
            ss58_address: Some(keypair.ss58_address().to_string()),
        }
    }
}

/// Normalize a hex private key to canonical form: no `0x` prefix, lowercase.
///
/// # Example
/// ```
/// use bittensor_dash::wallet::normalize_private_key;
/// assert_eq!(normalize_private_key("0xAABB").unwrap(), "aabb");
/// assert_eq!(normalize_private_key("aabb").unwrap(), "aabb");
/// ```
pub fn normalize_private_key(raw: &str) -> Result<String, KeyfileError> {
    let stripped = raw.strip_prefix("0x").unwrap_or(raw);
    let mut bytes = hex::decode(stripped)?;
    let canonical = hex::encode(&bytes);
    bytes.zeroize();
    Ok(canonical)
}

/// Extract the private key string from a parsed key file document.
fn private_key_field(document: &serde_json::Value) -> Result<&str, KeyfileError> {
    match document.get("privateKey") {
        None | Some(serde_json::Value::Null) => Err(KeyfileError::MissingPrivateKey),
        Some(serde_json::Value::String(s)) if s.is_empty() => Err(KeyfileError::MissingPrivateKey),
        Some(serde_json::Value::String(s)) => Ok(s),
        Some(other) => Err(KeyfileError::InvalidFormat(format!(
            "privateKey must be a hex string, found {}",
            json_type_name(other)
        ))),
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Load a keypair from a wallet key file.
///
/// Fails with [`KeyfileError::NotFound`] when the path does not exist and with
/// [`KeyfileError::MissingPrivateKey`] when the document has no `privateKey`.
pub fn load_keypair_from_file(path: impl AsRef<Path>) -> Result<Keypair, KeyfileError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(KeyfileError::NotFound(path.to_path_buf()));
    }

    let contents = fs::read_to_string(path)?;
    let document: serde_json::Value = serde_json::from_str(&contents)?;
    if !document.is_object() {
        return Err(KeyfileError::InvalidFormat(format!(
            "expected a JSON object, found {}",
            json_type_name(&document)
        )));
    }

    let mut canonical = normalize_private_key(private_key_field(&document)?)?;
    let keypair = Keypair::from_private_key_hex(&canonical);
    canonical.zeroize();

    let keypair = keypair?;
    tracing::debug!(path = %path.display(), ss58 = %keypair.ss58_address(), "Loaded keypair");
    Ok(keypair)
}

/// Write a keypair to `path` as an unencrypted key file.
///
/// The file is written to a temporary sibling first and renamed into place.
/// On Unix it is created with mode 0600.
pub fn save_keyfile(
    path: impl AsRef<Path>,
    keypair: &Keypair,
    overwrite: bool,
) -> Result<(), KeyfileError> {
    let path = path.as_ref();
    if path.exists() && !overwrite {
        return Err(KeyfileError::AlreadyExists);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    tracing::warn!(
        path = %path.display(),
        "Storing key file without encryption"
    );
    let mut content = serde_json::to_vec_pretty(&KeyfileJson::from_keypair(keypair))?;

    let temp_path = temp_path_for(path);
    let written = write_private(&temp_path, &content);
    content.zeroize();
    written?;
    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Hidden sibling `.<name>.tmp`, which the hotkey scanner never lists.
fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", name))
}

fn write_private(path: &Path, content: &[u8]) -> Result<(), KeyfileError> {
    #[cfg(unix)]
    let mut file = {
        use std::os::unix::fs::OpenOptionsExt;
        fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)?
    };
    #[cfg(not(unix))]
    let mut file = fs::File::create(path)?;

    file.write_all(content)?;
    file.sync_all()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn test_keypair() -> Keypair {
        Keypair::from_seed(&[5u8; 32]).unwrap()
    }

    #[test]
    fn test_normalize_strips_prefix_and_lowercases() {
        assert_eq!(normalize_private_key("0xAABB").unwrap(), "aabb");
        assert_eq!(normalize_private_key("aabb").unwrap(), "aabb");
        assert_eq!(normalize_private_key("AaBb").unwrap(), "aabb");
    }

    #[test]
    fn test_normalize_rejects_invalid_hex() {
        assert!(matches!(
            normalize_private_key("0xnothex"),
            Err(KeyfileError::InvalidHex(_))
        ));
        // Odd length
        assert!(normalize_private_key("abc").is_err());
    }

    #[test]
    fn test_private_key_field_variants() {
        let missing = serde_json::json!({"ss58Address": "5abc"});
        assert!(matches!(
            private_key_field(&missing),
            Err(KeyfileError::MissingPrivateKey)
        ));

        let empty = serde_json::json!({"privateKey": ""});
        assert!(matches!(
            private_key_field(&empty),
            Err(KeyfileError::MissingPrivateKey)
        ));

        let number = serde_json::json!({"privateKey": 12});
        assert!(matches!(
            private_key_field(&number),
            Err(KeyfileError::InvalidFormat(_))
        ));

        let ok = serde_json::json!({"privateKey": "0xaa"});
        assert_eq!(private_key_field(&ok).unwrap(), "0xaa");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hotkeys").join("default");

        let keypair = test_keypair();
        save_keyfile(&path, &keypair, false).unwrap();

        let loaded = load_keypair_from_file(&path).unwrap();
        assert_eq!(loaded.public_key(), keypair.public_key());

        let json: KeyfileJson =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json.ss58_address.as_deref(), Some(keypair.ss58_address()));
        assert!(json.private_key.unwrap().starts_with("0x"));
    }

    #[test]
    fn test_temp_path_is_hidden_sibling() {
        let path = Path::new("/wallets/alice/hotkeys/miner");
        assert_eq!(
            temp_path_for(path),
            PathBuf::from("/wallets/alice/hotkeys/.miner.tmp")
        );
    }

    #[test]
    fn test_save_leaves_only_the_key_file() {
        let dir = tempdir().unwrap();
        save_keyfile(dir.path().join("miner"), &test_keypair(), false).unwrap();

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["miner"]);
    }

    #[test]
    fn test_save_refuses_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("default");

        save_keyfile(&path, &test_keypair(), false).unwrap();
        assert!(matches!(
            save_keyfile(&path, &test_keypair(), false),
            Err(KeyfileError::AlreadyExists)
        ));
        save_keyfile(&path, &test_keypair(), true).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_save_sets_private_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("default");
        save_keyfile(&path, &test_keypair(), false).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
