// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/parser.rs - Parser for the usb.ids vendor/product registry.
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
 * # `parser` Module
 *
 * This module parses the text of a `usb.ids` registry into a two-level
 * vendor/product mapping.
 *
 * Only two kinds of lines are understood:
 *
 * - Vendor lines: a hex ID at the start of the line, whitespace, then a name.
 * - Product lines: leading whitespace, a hex ID, whitespace, then a name.
 *
 * Everything else (comments, blank lines, section headers) is skipped without
 * error. Products belong to the last vendor seen before them.
 *
 * ## Usage Example
 *
 * ```
 * use usb_ids::parser::Registry;
 *
 * let registry = Registry::parse("1d6b  Linux Foundation\n\t0002  2.0 root hub\n");
 *
 * let vendor = registry.get("1d6b").unwrap();
 * assert_eq!(vendor.name, "Linux Foundation");
 * assert_eq!(vendor.product("0002").unwrap().name, "2.0 root hub");
 * ```
 */

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use log::{debug, trace};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

static PATTERNS: LazyLock<LinePatterns> = LazyLock::new(LinePatterns::new);

struct LinePatterns {
    vendor: Regex,
    product: Regex,
}

impl LinePatterns {
    fn new() -> Self {
        Self {
            vendor: Regex::new(r"^([0-9A-Fa-f]+)\s+(.*)$").expect("valid vendor pattern"),
            product: Regex::new(r"^\s+([0-9A-Fa-f]+)\s+(.*)$").expect("valid product pattern"),
        }
    }
}

/// The shape of a single registry line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// An unindented `<hex id> <name>` line.
    Vendor { id: &'a str, name: &'a str },
    /// An indented `<hex id> <name>` line.
    Product { id: &'a str, name: &'a str },
    /// Anything else.
    Other,
}

impl<'a> Line<'a> {
    /// Classifies one line of registry text. IDs are returned exactly as
    /// written, without case normalization.
    pub fn classify(line: &'a str) -> Self {
        if let Some(caps) = PATTERNS.vendor.captures(line) {
            let (_, [id, name]) = caps.extract();
            return Line::Vendor { id, name };
        }
        if let Some(caps) = PATTERNS.product.captures(line) {
            let (_, [id, name]) = caps.extract();
            return Line::Product { id, name };
        }
        Line::Other
    }
}

/// Line boundaries recognized when splitting registry text: `\n`, `\r`, and
/// the rarer vertical-tab, form-feed, separator, NEL and Unicode line and
/// paragraph separators. A `\r\n` pair yields an extra empty line, which
/// classifies as [Line::Other] and so has no effect.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c'..='\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// A product entry, unique within its vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// The human-readable product name.
    pub name: String,
}

/// A vendor entry and the products listed under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vendor {
    /// The human-readable vendor name.
    pub name: String,
    /// Products keyed by product ID. `None` until the first product is seen,
    /// in which case the `products` key is left out of the JSON entirely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<BTreeMap<String, Product>>,
}

impl Vendor {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            products: None,
        }
    }

    /// Looks up a product by its ID, as written in the source.
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.as_ref()?.get(id)
    }

    /// Number of products attached to this vendor.
    pub fn product_count(&self) -> usize {
        self.products.as_ref().map_or(0, BTreeMap::len)
    }
}

/// A parsed `usb.ids` registry, keyed by vendor ID.
///
/// Serializes as a plain JSON object, with keys in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registry {
    vendors: BTreeMap<String, Vendor>,
}

impl Registry {
    /// Parses the full text of a registry.
    ///
    /// This never fails: lines that are neither vendor nor product lines are
    /// dropped, as are product lines that appear before any vendor.
    ///
    /// A vendor ID that shows up twice replaces the earlier entry wholesale,
    /// so products listed under the first occurrence are lost.
    pub fn parse(text: &str) -> Self {
        let mut vendors: BTreeMap<String, Vendor> = BTreeMap::new();
        let mut current: Option<&str> = None;

        for line in text.trim().split(is_line_break) {
            match Line::classify(line) {
                Line::Vendor { id, name } => {
                    if vendors.insert(id.to_string(), Vendor::new(name)).is_some() {
                        debug!("Vendor {} listed again, replacing earlier entry", id);
                    }
                    current = Some(id);
                }
                Line::Product { id, name } => {
                    let Some(vendor) = current.and_then(|vid| vendors.get_mut(vid)) else {
                        trace!("Dropping product {} with no vendor", id);
                        continue;
                    };
                    vendor
                        .products
                        .get_or_insert_with(BTreeMap::new)
                        .insert(id.to_string(), Product {
                            name: name.to_string(),
                        });
                }
                Line::Other => (),
            }
        }

        Self { vendors }
    }

    /// Reads and parses a registry file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to a `usb.ids` text file.
    ///
    /// # Returns
    ///
    /// A `Result` containing the parsed `Registry`, or an error if the file
    /// could not be read as UTF-8 text.
    pub fn from_filename(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let registry = Self::parse(&text);
        debug!(
            "Parsed {} vendors and {} products from {}",
            registry.len(),
            registry.product_count(),
            path.display()
        );
        Ok(registry)
    }

    /// Looks up a vendor by its ID, as written in the source.
    pub fn get(&self, id: &str) -> Option<&Vendor> {
        self.vendors.get(id)
    }

    /// Iterates over `(vendor ID, vendor)` pairs in ID order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Vendor)> {
        self.vendors.iter().map(|(id, vendor)| (id.as_str(), vendor))
    }

    /// Number of vendors.
    pub fn len(&self) -> usize {
        self.vendors.len()
    }

    /// Whether no vendor lines were found.
    pub fn is_empty(&self) -> bool {
        self.vendors.is_empty()
    }

    /// Total number of products across all vendors.
    pub fn product_count(&self) -> usize {
        self.vendors.values().map(Vendor::product_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_vendor_line() {
        assert_eq!(
            Line::classify("1d6b  Linux Foundation"),
            Line::Vendor {
                id: "1d6b",
                name: "Linux Foundation"
            }
        );
    }

    #[test]
    fn classify_product_line() {
        assert_eq!(
            Line::classify("\t0002  2.0 root hub"),
            Line::Product {
                id: "0002",
                name: "2.0 root hub"
            }
        );
        assert_eq!(
            Line::classify("    ABCD Widget"),
            Line::Product {
                id: "ABCD",
                name: "Widget"
            }
        );
    }

    #[test]
    fn classify_other_lines() {
        assert_eq!(Line::classify(""), Line::Other);
        assert_eq!(Line::classify("# Vendors, devices and interfaces."), Line::Other);
        assert_eq!(Line::classify("1d6b"), Line::Other);
        assert_eq!(Line::classify("\t"), Line::Other);
        assert_eq!(Line::classify("xyz  Not hex"), Line::Other);
    }

    #[test]
    fn vendor_with_product() {
        let registry = Registry::parse("1d6b  Linux Foundation\n\t0002  2.0 root hub\n");

        assert_eq!(registry.len(), 1);
        let vendor = registry.get("1d6b").unwrap();
        assert_eq!(vendor.name, "Linux Foundation");
        assert_eq!(vendor.product_count(), 1);
        assert_eq!(vendor.product("0002").unwrap().name, "2.0 root hub");
    }

    #[test]
    fn vendor_without_products_has_no_product_map() {
        let registry = Registry::parse("0001  Fry's Electronics\n");
        let vendor = registry.get("0001").unwrap();
        assert_eq!(vendor.products, None);
        assert_eq!(vendor.product_count(), 0);
    }

    #[test]
    fn products_attach_to_most_recent_vendor() {
        let registry = Registry::parse(
            "03e7  Intel\n\
             \t2150  Myriad VPU [Movidius Neural Compute Stick]\n\
             03e8  EndPoints, Inc.\n\
             \t0004  SE401 Webcam\n\
             \t0008  Ethernet\n",
        );

        assert_eq!(registry.get("03e7").unwrap().product_count(), 1);
        let endpoints = registry.get("03e8").unwrap();
        assert_eq!(endpoints.product_count(), 2);
        assert_eq!(endpoints.product("0008").unwrap().name, "Ethernet");
        assert_eq!(registry.product_count(), 3);
    }

    #[test]
    fn product_before_any_vendor_is_dropped() {
        let registry = Registry::parse("# header\n\t0002  orphan\n1d6b  Linux Foundation\n");
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("1d6b").unwrap().products, None);
    }

    #[test]
    fn leading_whitespace_of_document_is_stripped() {
        // The first line loses its indentation before classification.
        let registry = Registry::parse("\n\t1d6b  Linux Foundation\n");
        assert_eq!(registry.get("1d6b").unwrap().name, "Linux Foundation");
    }

    #[test]
    fn ignored_lines_keep_current_vendor() {
        let registry = Registry::parse(
            "1d6b  Linux Foundation\n\
             \n\
             # interrupting comment\n\
             \t0003  3.0 root hub\n",
        );
        assert_eq!(
            registry.get("1d6b").unwrap().product("0003").unwrap().name,
            "3.0 root hub"
        );
    }

    #[test]
    fn duplicate_vendor_replaces_entry_and_drops_products() {
        let registry = Registry::parse(
            "abcd  First Name\n\
             \t0001  first product\n\
             abcd  Second Name\n\
             \t0002  second product\n",
        );

        assert_eq!(registry.len(), 1);
        let vendor = registry.get("abcd").unwrap();
        assert_eq!(vendor.name, "Second Name");
        assert!(vendor.product("0001").is_none());
        assert_eq!(vendor.product("0002").unwrap().name, "second product");
    }

    #[test]
    fn ids_keep_their_case() {
        let registry = Registry::parse("ABcd  Mixed Case\n\tFfFf  Product\n");
        assert!(registry.get("abcd").is_none());
        let vendor = registry.get("ABcd").unwrap();
        assert!(vendor.product("FfFf").is_some());
        assert!(vendor.product("ffff").is_none());
    }

    #[test]
    fn comments_and_blank_lines_only() {
        let registry = Registry::parse("\n# comment\n");
        assert!(registry.is_empty());
        assert_eq!(serde_json::to_string(&registry).unwrap(), "{}");
    }

    #[test]
    fn serializes_to_nested_object() {
        let registry = Registry::parse("1d6b  Linux Foundation\n\t0002  2.0 root hub\n");
        assert_eq!(
            serde_json::to_value(&registry).unwrap(),
            serde_json::json!({
                "1d6b": {
                    "name": "Linux Foundation",
                    "products": {"0002": {"name": "2.0 root hub"}}
                }
            })
        );
    }

    #[test]
    fn iterates_in_id_order() {
        let registry = Registry::parse("ffff  Last\n0000  First\n8086  Intel Corp.\n");
        let ids: Vec<&str> = registry.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, ["0000", "8086", "ffff"]);
    }

    #[test]
    fn lone_carriage_returns_split_lines() {
        let registry = Registry::parse("1d6b  Linux Foundation\r\t0002  2.0 root hub");
        let vendor = registry.get("1d6b").unwrap();
        assert_eq!(vendor.name, "Linux Foundation");
        assert_eq!(vendor.product("0002").unwrap().name, "2.0 root hub");
    }

    #[test]
    fn crlf_and_unicode_separators_split_lines() {
        let registry = Registry::parse(
            "1d6b  Linux Foundation\r\n\t0001  1.1 root hub\u{2028}\t0002  2.0 root hub\x0c03e7  Intel",
        );
        let vendor = registry.get("1d6b").unwrap();
        assert_eq!(vendor.name, "Linux Foundation");
        assert_eq!(vendor.product("0001").unwrap().name, "1.1 root hub");
        assert_eq!(vendor.product("0002").unwrap().name, "2.0 root hub");
        assert_eq!(registry.get("03e7").unwrap().name, "Intel");
    }

    #[test]
    fn non_ascii_names_are_written_as_utf8() {
        let registry = Registry::parse("0c45  Microdia\n\t6300  PC Microscope camera \u{b5}\n");
        let json = serde_json::to_string(&registry).unwrap();
        assert!(json.contains("PC Microscope camera \u{b5}"));
        assert!(!json.contains("\\u00b5"));
    }

    #[test]
    fn reads_back_rendered_json() {
        let registry = Registry::parse(
            "03e7  Intel\n\t2150  Myriad VPU\n0001  Fry's Electronics\n",
        );
        let json = serde_json::to_string_pretty(&registry).unwrap();
        let loaded: Registry = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, registry);
        assert_eq!(loaded.get("0001").unwrap().products, None);
    }

    #[test]
    fn parsing_is_deterministic() {
        let text = "0b05  ASUSTek Computer, Inc.\n\
                    \t1101  Mass Storage Device\n\
                    046d  Logitech, Inc.\n\
                    \tc52b  Unifying Receiver\n";
        let first = serde_json::to_string_pretty(&Registry::parse(text)).unwrap();
        let second = serde_json::to_string_pretty(&Registry::parse(text)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn from_filename_reports_missing_file() {
        let err = Registry::from_filename("/nonexistent/usb.ids").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
