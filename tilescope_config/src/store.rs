// Copyright 2025 the TileScope Authors
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::ini::{IniDocument, IniError};
use crate::settings::Settings;

/// Errors reading or writing the settings file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read or written.
    #[error("{}: {source}", path.display())]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// The file is not valid INI.
    #[error("{}: {source}", path.display())]
    Parse {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: IniError,
    },
}

/// How [`ConfigFile::load_or_create`] found the file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    /// The file did not exist and was written with defaults.
    Created,
    /// The file was read, completed with missing keys and rewritten.
    Loaded,
    /// The file could not be used; defaults are in effect.
    Defaults,
}

/// The settings file on disk, its parsed document and typed settings.
#[derive(Clone, Debug)]
pub struct ConfigFile {
    path: PathBuf,
    document: IniDocument,
    settings: Settings,
    status: LoadStatus,
}

impl ConfigFile {
    /// Loads `path`, creating it with documented defaults when missing.
    ///
    /// Known keys from an existing file are kept, missing keys are added and
    /// unknown keys are dropped; the result is written back. This never
    /// fails: unreadable or malformed files leave defaults in effect (with a
    /// warning), and write failures are logged as errors.
    pub fn load_or_create(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (document, status) = match read_document(&path) {
            Ok(Some(user)) => (merge_known(&user), LoadStatus::Loaded),
            Ok(None) => (Settings::default_document(), LoadStatus::Created),
            Err(err) => {
                log::warn!("{err}; using default settings");
                let settings = Settings::default();
                return Self {
                    path,
                    document: Settings::default_document(),
                    settings,
                    status: LoadStatus::Defaults,
                };
            }
        };

        let settings = Settings::from_document(&document);
        let file = Self {
            path,
            document,
            settings,
            status,
        };
        match file.write() {
            Ok(()) if status == LoadStatus::Created => {
                log::info!("created config file {} with defaults", file.path.display());
            }
            Ok(()) => log::debug!("loaded config file {}", file.path.display()),
            Err(err) => log::error!("could not write config file: {err}"),
        }
        file
    }

    /// Path of the settings file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// How the file was found at load time.
    #[must_use]
    pub fn status(&self) -> LoadStatus {
        self.status
    }

    /// Typed settings.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Mutable typed settings; changes are persisted by [`ConfigFile::save`].
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Writes the current settings back to the file.
    ///
    /// Values that did not change keep their original formatting.
    pub fn save(&mut self) -> Result<(), ConfigError> {
        self.settings.write_to(&mut self.document);
        self.write()?;
        log::debug!("saved settings to {}", self.path.display());
        Ok(())
    }

    fn write(&self) -> Result<(), ConfigError> {
        fs::write(&self.path, self.document.to_string()).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// Reads and parses `path`; `Ok(None)` when it does not exist.
fn read_document(path: &Path) -> Result<Option<IniDocument>, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_owned(),
                source,
            });
        }
    };
    IniDocument::parse(&text)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
}

/// Default document with every known key present in `user` taken from it.
fn merge_known(user: &IniDocument) -> IniDocument {
    let mut doc = Settings::default_document();
    for section in user.sections() {
        for entry in section.entries() {
            if doc.entry(section.name(), &entry.key).is_some() {
                doc.set(section.name(), &entry.key, entry.value.clone());
            } else {
                log::debug!("dropping unknown setting [{}] {}", section.name(), entry.key);
            }
        }
    }
    doc
}
