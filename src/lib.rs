// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/lib.rs - Parser and JSON converter for the usb.ids registry.
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
 * # `usb_ids` Crate
 *
 * A library for turning the [`usb.ids`](http://www.linux-usb.org/usb.ids)
 * vendor/product registry into a JSON lookup table.
 *
 * The pipeline has two steps:
 *
 * 1. [parser]: Converts the registry text into a [parser::Registry].
 * 2. [encoder]: Renders the registry as JSON and optionally compresses it.
 *
 * The [package] module strings both together for build recipes.
 *
 * ## Usage Example
 *
 * ```no_run
 * use usb_ids::encoder::{Output, write_registry};
 * use usb_ids::parser::Registry;
 *
 * fn main() -> Result<(), Box<dyn std::error::Error>> {
 *     // Parse the registry
 *     let registry = Registry::from_filename("usb.ids")?;
 *
 *     // Look up a vendor
 *     if let Some(vendor) = registry.get("1d6b") {
 *         println!("Vendor: {}", vendor.name);
 *     }
 *
 *     // Write compressed JSON
 *     write_registry(&registry, &Output::from_arg("usb-ids.json.bz2", false))?;
 *
 *     Ok(())
 * }
 * ```
 */

pub mod encoder;
pub mod error;
pub mod package;
pub mod parser;

pub use error::{Error, Result};
