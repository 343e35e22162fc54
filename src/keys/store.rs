//! Named key persistence
//!
//! The composer and validator never read from a store. Applications look keys
//! up here and pass the resulting [`SigningKey`] into each call.

use crate::error::{Error, Result};
use crate::keys::generate::{GeneratedKeyPair, GeneratedSecret};
use crate::keys::SigningKey;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const FILE_PREFIX: &str = "saved-key-";
const FILE_SUFFIX: &str = ".json";

/// A key as persisted by a [`KeyStore`]
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredKey {
    /// Display name as entered by the user
    pub name: String,
    #[serde(flatten)]
    pub material: StoredMaterial,
    /// Creation time, seconds since the Unix epoch
    pub created_at: i64,
}

/// Persisted key material, tagged by key type
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StoredMaterial {
    #[serde(rename = "HMAC")]
    Hmac { secret: String },

    #[serde(rename = "RSA", rename_all = "camelCase")]
    Rsa {
        private_key: String,
        public_key: String,
        kid: String,
        key_size: usize,
    },
}

impl StoredKey {
    pub fn from_secret(name: impl Into<String>, secret: &GeneratedSecret, created_at: i64) -> Self {
        Self {
            name: name.into(),
            material: StoredMaterial::Hmac {
                secret: secret.secret.clone(),
            },
            created_at,
        }
    }

    pub fn from_key_pair(
        name: impl Into<String>,
        pair: &GeneratedKeyPair,
        created_at: i64,
    ) -> Self {
        Self {
            name: name.into(),
            material: StoredMaterial::Rsa {
                private_key: pair.private_key_pem.clone(),
                public_key: pair.public_key_pem.clone(),
                kid: pair.kid.clone(),
                key_size: pair.key_size,
            },
            created_at,
        }
    }

    /// Key material ready for the composer or validator
    pub fn signing_key(&self) -> SigningKey {
        match &self.material {
            StoredMaterial::Hmac { secret } => SigningKey::hmac(secret.as_str()),
            StoredMaterial::Rsa {
                private_key,
                public_key,
                ..
            } => SigningKey::rsa_pair(private_key.clone(), public_key.clone()),
        }
    }
}

impl std::fmt::Debug for StoredMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoredMaterial::Hmac { .. } => f.debug_struct("Hmac").finish_non_exhaustive(),
            StoredMaterial::Rsa { kid, key_size, .. } => f
                .debug_struct("Rsa")
                .field("kid", kid)
                .field("key_size", key_size)
                .finish_non_exhaustive(),
        }
    }
}

impl std::fmt::Debug for StoredKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match &self.material {
            StoredMaterial::Hmac { .. } => "HMAC",
            StoredMaterial::Rsa { .. } => "RSA",
        };
        f.debug_struct("StoredKey")
            .field("name", &self.name)
            .field("type", &kind)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

/// Storage for named keys
pub trait KeyStore: Send + Sync {
    /// Look up a key by name
    fn get(&self, name: &str) -> Result<Option<StoredKey>>;

    /// Insert or replace a key under the given name
    fn set(&self, name: &str, key: StoredKey) -> Result<()>;

    /// Delete a key; returns whether it existed
    fn remove(&self, name: &str) -> Result<bool>;

    /// Sanitized names of all stored keys, sorted
    fn list(&self) -> Result<Vec<String>>;
}

/// Map a user-entered name to a storage identifier
///
/// Surrounding whitespace is dropped and every character outside
/// `[A-Za-z0-9_-]` becomes `_`.
pub fn sanitize_key_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidKeyName(name.to_string()));
    }

    Ok(trimmed
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect())
}

/// In-process key store
#[derive(Debug, Default)]
pub struct MemoryKeyStore {
    keys: DashMap<String, StoredKey>,
}

impl MemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyStore for MemoryKeyStore {
    fn get(&self, name: &str) -> Result<Option<StoredKey>> {
        let id = sanitize_key_name(name)?;
        Ok(self.keys.get(&id).map(|entry| entry.value().clone()))
    }

    fn set(&self, name: &str, key: StoredKey) -> Result<()> {
        let id = sanitize_key_name(name)?;
        tracing::debug!(key = %id, "storing key in memory");
        self.keys.insert(id, key);
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<bool> {
        let id = sanitize_key_name(name)?;
        Ok(self.keys.remove(&id).is_some())
    }

    fn list(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.keys.iter().map(|entry| entry.key().clone()).collect();
        names.sort();
        Ok(names)
    }
}

/// Directory-backed key store, one JSON document per key
///
/// Files are named `saved-key-<name>.json`.
#[derive(Debug, Clone)]
pub struct FileKeyStore {
    dir: PathBuf,
}

impl FileKeyStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| store_error(&dir, e))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> Result<PathBuf> {
        let id = sanitize_key_name(name)?;
        Ok(self.dir.join(format!("{FILE_PREFIX}{id}{FILE_SUFFIX}")))
    }
}

impl KeyStore for FileKeyStore {
    fn get(&self, name: &str) -> Result<Option<StoredKey>> {
        let path = self.path_for(name)?;
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(store_error(&path, e)),
        };

        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|e| store_error(&path, e))
    }

    fn set(&self, name: &str, key: StoredKey) -> Result<()> {
        let path = self.path_for(name)?;
        let json = serde_json::to_string_pretty(&key).map_err(|e| store_error(&path, e))?;

        // Write then rename so readers never see a partial document
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| store_error(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| store_error(&path, e))?;

        tracing::debug!(path = %path.display(), "stored key");
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<bool> {
        let path = self.path_for(name)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(store_error(&path, e)),
        }
    }

    fn list(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.dir).map_err(|e| store_error(&self.dir, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| store_error(&self.dir, e))?;
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            if let Some(id) = file_name
                .strip_prefix(FILE_PREFIX)
                .and_then(|rest| rest.strip_suffix(FILE_SUFFIX))
            {
                names.push(id.to_string());
            }
        }

        names.sort();
        Ok(names)
    }
}

fn store_error(path: &Path, err: impl std::fmt::Display) -> Error {
    Error::KeyStore(format!("{}: {err}", path.display()))
}
