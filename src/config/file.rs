//
//  crud-sdk
//  config/file.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/14.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Configuration File I/O
//!
//! Low-level file operations for configuration management: reading, writing,
//! and checking the existence of the configuration file. Write operations
//! create missing parent directories, so a fresh machine needs no setup step
//! before saving.
//!
//! These helpers are used internally by [`Config`](super::Config) but can be
//! used directly for custom configuration locations.

use std::path::Path;

use anyhow::Result;

/// Reads the contents of a configuration file.
///
/// # Errors
///
/// Returns an error if the file does not exist, cannot be opened, or
/// contains invalid UTF-8.
pub fn read_config_file(path: &Path) -> Result<String> {
    Ok(std::fs::read_to_string(path)?)
}

/// Writes content to a configuration file.
///
/// Creates any missing parent directories before writing.
///
/// # Errors
///
/// Returns an error if the parent directories cannot be created or the file
/// cannot be written.
pub fn write_config_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

/// Checks whether a configuration file exists.
pub fn config_exists(path: &Path) -> bool {
    path.exists()
}
