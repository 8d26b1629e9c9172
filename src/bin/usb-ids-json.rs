// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  usb-ids-json.rs - Convert a usb.ids registry to JSON.
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

use std::process::ExitCode;

use clap::Parser;
use log::info;

use usb_ids::encoder::*;
use usb_ids::parser::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Text file containing USB vendor/product IDs in the usb.ids format.
    input_file: String,

    /// Output path for JSON ("-" for stdout).
    #[arg(default_value = STDOUT_PATH)]
    output_file: String,

    /// Compress output with bzip2. Implied by a ".bz2" output path.
    #[arg(short = 'z', long)]
    compress: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let registry = match Registry::from_filename(&args.input_file) {
        Ok(registry) => registry,
        Err(error) => {
            eprintln!("Error reading file {:?}: {}", &args.input_file, error);
            return ExitCode::FAILURE;
        }
    };
    info!(
        "Parsed {} vendors, {} products",
        registry.len(),
        registry.product_count()
    );

    let output = Output::from_arg(&args.output_file, args.compress);
    if let Err(error) = write_registry(&registry, &output) {
        eprintln!("Error writing {:?}: {}", &args.output_file, error);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
