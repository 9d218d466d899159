//! Reading and writing config files.
//!
//! The whole file is encoded in memory and written in one call, and read in
//! one call before decoding.  File handles never outlive the function that
//! opened them, so a decode failure leaves nothing open behind it.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::domain::Config;
use crate::format::{
    decode_config, encode_config, CodecTrace, EncodeError, FormatError, TracingTrace,
};

/// Error type for config file operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config holds a name or value the text format cannot represent.
    /// Nothing was written.
    #[error("cannot save config to {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: EncodeError,
    },

    /// The file was read but its content is not valid.
    #[error("failed to decode config at {path}: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: FormatError,
    },
}

impl StorageError {
    /// Returns the decoding error, if this is one.
    pub fn format_error(&self) -> Option<&FormatError> {
        match self {
            StorageError::Format { source, .. } => Some(source),
            StorageError::Io { .. } | StorageError::Encode { .. } => None,
        }
    }
}

/// Writes `config` to `path`, replacing any existing file.
///
/// Creates the parent directory if it does not exist.
///
/// # Errors
///
/// Returns [`StorageError::Encode`] without touching the file if the config
/// cannot be represented, and [`StorageError::Io`] for file-system failures.
pub fn save_config(config: &Config, path: &Path, trace: &dyn CodecTrace) -> Result<(), StorageError> {
    let content = encode_config(config, trace).map_err(|source| StorageError::Encode {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|source| StorageError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    std::fs::write(path, content).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        path = %path.display(),
        groups = config.len(),
        entries = config.entry_count(),
        "saved config"
    );
    Ok(())
}

/// Reads and decodes the config stored at `path`.
///
/// # Errors
///
/// Returns [`StorageError::Io`] if the file cannot be read (including when
/// it is not valid UTF-8) and [`StorageError::Format`] if decoding fails.
pub fn load_config(path: &Path, trace: &dyn CodecTrace) -> Result<Config, StorageError> {
    let content = std::fs::read_to_string(path).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let config = decode_config(&content, trace).map_err(|source| StorageError::Format {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        path = %path.display(),
        groups = config.len(),
        entries = config.entry_count(),
        "loaded config"
    );
    Ok(config)
}

impl Config {
    /// Saves this config to `path`, tracing progress through `tracing`.
    ///
    /// # Errors
    ///
    /// See [`save_config`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StorageError> {
        save_config(self, path.as_ref(), &TracingTrace)
    }

    /// Saves this config to `path`, reporting progress to `trace`.
    ///
    /// # Errors
    ///
    /// See [`save_config`].
    pub fn save_with(&self, path: impl AsRef<Path>, trace: &dyn CodecTrace) -> Result<(), StorageError> {
        save_config(self, path.as_ref(), trace)
    }

    /// Loads a config from `path`, tracing progress through `tracing`.
    ///
    /// # Errors
    ///
    /// See [`load_config`].
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use scfg_core::Config;
    ///
    /// let config = Config::load("app.scfg")?;
    /// let port: u32 = config.entry("net", "port")?.get()?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load(path: impl AsRef<Path>) -> Result<Config, StorageError> {
        load_config(path.as_ref(), &TracingTrace)
    }

    /// Loads a config from `path`, reporting progress to `trace`.
    ///
    /// # Errors
    ///
    /// See [`load_config`].
    pub fn load_with(path: impl AsRef<Path>, trace: &dyn CodecTrace) -> Result<Config, StorageError> {
        load_config(path.as_ref(), trace)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
