// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/package.rs - Install usb.ids and its JSON rendering into a prefix.
 *  Copyright (C) 2026  Forest Crossman <cyrozap@gmail.com>
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  You should have received a copy of the GNU General Public License
 *  along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

/*!
 * # `package` Module
 *
 * Packaging step run from a build recipe. It copies the `usb.ids` registry
 * from the recipe directory into `<prefix>/share/usb-ids/` and writes a
 * bzip2-compressed JSON rendering next to it.
 *
 * ## Usage Example
 *
 * ```no_run
 * use usb_ids::package::{PackageConfig, package};
 *
 * fn main() -> Result<(), Box<dyn std::error::Error>> {
 *     let config = PackageConfig::from_env()?;
 *     let output = package(&config)?;
 *     println!("Installed {}", output.json.display());
 *     Ok(())
 * }
 * ```
 */

use std::fs;
use std::path::PathBuf;

use log::{debug, info};

use crate::encoder::{Compression, Output, write_registry};
use crate::error::{Error, Result};
use crate::parser::Registry;

/// Name of the registry file, both in the recipe directory and once installed.
pub const INPUT_FILENAME: &str = "usb.ids";
/// Name of the compressed JSON file written next to the installed registry.
pub const JSON_FILENAME: &str = "usb-ids.json.bz2";

/// Directory holding the build recipe and its `usb.ids`.
pub const RECIPE_DIR_VAR: &str = "RECIPE_DIR";
/// Installation prefix everywhere except Windows.
pub const PREFIX_VAR: &str = "PREFIX";
/// Unix-style packages go under this prefix on Windows.
pub const LIBRARY_PREFIX_VAR: &str = "LIBRARY_PREFIX";

/// Locations the packaging step works with, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageConfig {
    /// Directory holding the input `usb.ids` file.
    pub recipe_dir: PathBuf,
    /// Installation prefix.
    pub prefix: PathBuf,
}

impl PackageConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var_os(key), cfg!(windows))
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// # Arguments
    ///
    /// * `lookup` - Returns the value of a variable, if set.
    /// * `windows` - Whether to take the prefix from `LIBRARY_PREFIX` instead
    ///   of `PREFIX`.
    pub fn from_lookup<F, V>(lookup: F, windows: bool) -> Result<Self>
    where
        F: Fn(&str) -> Option<V>,
        V: Into<PathBuf>,
    {
        let require = |key: &'static str| -> Result<PathBuf> {
            lookup(key).map(Into::into).ok_or(Error::MissingEnv(key))
        };

        let recipe_dir = require(RECIPE_DIR_VAR)?;
        let prefix = require(if windows { LIBRARY_PREFIX_VAR } else { PREFIX_VAR })?;

        Ok(Self { recipe_dir, prefix })
    }

    /// The `usb.ids` file to install.
    pub fn input_file(&self) -> PathBuf {
        self.recipe_dir.join(INPUT_FILENAME)
    }

    /// `<prefix>/share/usb-ids`, where both artifacts are written.
    pub fn output_dir(&self) -> PathBuf {
        self.prefix.join("share").join("usb-ids")
    }
}

/// Paths written by [package].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageOutput {
    /// Verbatim copy of the input registry.
    pub registry: PathBuf,
    /// Compressed JSON rendering of the registry.
    pub json: PathBuf,
}

/// Installs the registry and its JSON rendering under the configured prefix.
///
/// # Arguments
///
/// * `config` - The resolved packaging locations.
///
/// # Returns
///
/// A `Result` containing the paths of both installed files, or the first I/O
/// error encountered.
pub fn package(config: &PackageConfig) -> Result<PackageOutput> {
    let input_file = config.input_file();
    let output_dir = config.output_dir();
    debug!("Packaging {} into {}", input_file.display(), output_dir.display());

    let registry = Registry::from_filename(&input_file)?;

    fs::create_dir_all(&output_dir).map_err(|e| Error::io(&output_dir, e))?;

    let registry_copy = output_dir.join(INPUT_FILENAME);
    fs::copy(&input_file, &registry_copy).map_err(|e| Error::io(&registry_copy, e))?;
    info!("Copied {} to {}", input_file.display(), registry_copy.display());

    let json = output_dir.join(JSON_FILENAME);
    write_registry(
        &registry,
        &Output::File {
            path: json.clone(),
            compression: Compression::Bzip2,
        },
    )?;

    Ok(PackageOutput {
        registry: registry_copy,
        json,
    })
}
