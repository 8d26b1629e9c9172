// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/encoder.rs - JSON encoder and output compression for usb.ids data.
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

use std::fs::File;
use std::io;
use std::io::prelude::*;
use std::path::{Path, PathBuf};

use bzip2::write::BzEncoder;
use log::info;

use crate::error::{Error, Result};
use crate::parser::Registry;

/// Placeholder output path meaning "standard output".
pub const STDOUT_PATH: &str = "-";

/// How the JSON text is compressed before it is written to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    /// Written as-is.
    #[default]
    Plain,
    /// bzip2 at the highest compression level.
    Bzip2,
}

impl Compression {
    /// Picks bzip2 for paths ending in `.bz2` (in any letter case), plain
    /// output for everything else.
    pub fn from_path(path: &Path) -> Self {
        if path.to_string_lossy().to_lowercase().ends_with(".bz2") {
            Compression::Bzip2
        } else {
            Compression::Plain
        }
    }

    pub fn compress(self, data: &[u8]) -> io::Result<Vec<u8>> {
        match self {
            Compression::Plain => Ok(data.to_vec()),
            Compression::Bzip2 => {
                let mut encoder = BzEncoder::new(Vec::new(), bzip2::Compression::best());
                encoder.write_all(data)?;
                encoder.finish()
            }
        }
    }
}

/// Where the rendered registry goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Stdout,
    File {
        path: PathBuf,
        compression: Compression,
    },
}

impl Output {
    /// Builds an output target from a command-line path.
    ///
    /// # Arguments
    ///
    /// * `path` - The output path, or [STDOUT_PATH].
    /// * `force_bzip2` - Compress with bzip2 regardless of the file name.
    pub fn from_arg(path: &str, force_bzip2: bool) -> Self {
        if path == STDOUT_PATH {
            return Output::Stdout;
        }

        let path = PathBuf::from(path);
        let compression = if force_bzip2 {
            Compression::Bzip2
        } else {
            Compression::from_path(&path)
        };
        Output::File { path, compression }
    }

    /// Writes already-rendered JSON text to this target.
    ///
    /// Standard output gets the text plus a trailing newline and is never
    /// compressed. Files get exactly the (possibly compressed) bytes.
    pub fn write(&self, json: &str) -> Result<()> {
        match self {
            Output::Stdout => {
                let mut stdout = io::stdout().lock();
                writeln!(stdout, "{}", json)
                    .and_then(|_| stdout.flush())
                    .map_err(|e| Error::io(STDOUT_PATH, e))
            }
            Output::File { path, compression } => {
                let bytes = compression
                    .compress(json.as_bytes())
                    .map_err(|e| Error::io(path, e))?;
                let mut file = File::create(path).map_err(|e| Error::io(path, e))?;
                file.write_all(&bytes).map_err(|e| Error::io(path, e))?;
                info!(
                    "Wrote {} bytes ({:?}) to {}",
                    bytes.len(),
                    compression,
                    path.display()
                );
                Ok(())
            }
        }
    }
}

/// Renders a registry as JSON with 2-space indentation.
pub fn to_json(registry: &Registry) -> Result<String> {
    Ok(serde_json::to_string_pretty(registry)?)
}

/// Renders a registry and writes it to `output`.
pub fn write_registry(registry: &Registry, output: &Output) -> Result<()> {
    let json = to_json(registry)?;
    output.write(&json)
}
