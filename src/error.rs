// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/error.rs - Error type for the usb-ids library.
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

use std::io;
use std::path::{Path, PathBuf};

/// Errors produced while reading, converting, or writing a registry.
///
/// Parsing itself never fails; every variant here comes from the
/// surroundings (files, serialization, or the build environment).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A file could not be read, created, or written.
    #[error("{}: {source}", .path.display())]
    Io {
        /// The path being accessed.
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The registry could not be rendered as JSON.
    #[error("failed to serialize registry: {0}")]
    Json(#[from] serde_json::Error),

    /// A required environment variable is not set.
    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),
}

impl Error {
    pub(crate) fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
