// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

use super::{validate_key, KeyValueStore, StoreError, WriteDurability};

/// File-backed store: each key is persisted as `<key>.json` under the root.
///
/// Writes land in a temp file and are renamed into place, so an interrupted write leaves either
/// the old contents or the new ones, never a torn file. Symlinked targets are refused.
#[derive(Debug, Clone)]
pub struct StoreFolder {
    root: PathBuf,
    durability: WriteDurability,
}

impl StoreFolder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            durability: WriteDurability::default(),
        }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn durability(&self) -> WriteDurability {
        self.durability
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    fn write_atomic(&self, key: &str, contents: &[u8]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root).map_err(|source| StoreError::Io {
            path: self.root.clone(),
            source,
        })?;

        let path = self.entry_path(key);
        match fs::symlink_metadata(&path) {
            Ok(md) if md.file_type().is_symlink() => {
                return Err(StoreError::SymlinkRefused { path });
            }
            Ok(_) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(source) => return Err(StoreError::Io { path, source }),
        }

        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let tmp_path = self.root.join(format!(".noema.tmp.{key}.json.{nanos}"));

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)
            .map_err(|source| StoreError::Io {
                path: tmp_path.clone(),
                source,
            })?;

        file.write_all(contents).map_err(|source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        })?;

        if self.durability == WriteDurability::Durable {
            file.sync_all().map_err(|source| StoreError::Io {
                path: tmp_path.clone(),
                source,
            })?;
        }
        drop(file);

        if let Err(source) = rename_overwrite(&tmp_path, &path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(StoreError::Io { path, source });
        }

        if self.durability == WriteDurability::Durable {
            #[cfg(unix)]
            {
                let dir = fs::File::open(&self.root).map_err(|source| StoreError::Io {
                    path: self.root.clone(),
                    source,
                })?;
                dir.sync_all().map_err(|source| StoreError::Io {
                    path: self.root.clone(),
                    source,
                })?;
            }
        }

        Ok(())
    }
}

impl KeyValueStore for StoreFolder {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        validate_key(key)?;
        let path = self.entry_path(key);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        let value =
            serde_json::from_str(&text).map_err(|source| StoreError::Json { path, source })?;
        Ok(Some(value))
    }

    fn set(&mut self, key: &str, value: &Value) -> Result<(), StoreError> {
        validate_key(key)?;
        let json = serde_json::to_string_pretty(value).map_err(|source| StoreError::Json {
            path: self.entry_path(key),
            source,
        })?;
        self.write_atomic(key, format!("{json}\n").as_bytes())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        let path = self.entry_path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}

fn rename_overwrite(from: &Path, to: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
                ) =>
            {
                let _ = fs::remove_file(to);
                fs::rename(from, to)
            }
            Err(err) => Err(err),
        }
    }

    #[cfg(not(windows))]
    {
        fs::rename(from, to)
    }
}

#[cfg(test)]
mod tests;
