// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  usb-ids-package.rs - Install usb.ids and usb-ids.json.bz2 from a recipe.
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

use usb_ids::package::*;

/// Reads RECIPE_DIR and PREFIX (LIBRARY_PREFIX on Windows) from the
/// environment and installs the registry under <prefix>/share/usb-ids.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let _args = Args::parse();

    let config = match PackageConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("Error: {}", error);
            return ExitCode::FAILURE;
        }
    };

    match package(&config) {
        Ok(output) => {
            println!("{}", output.registry.display());
            println!("{}", output.json.display());
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("Error packaging {:?}: {}", config.input_file(), error);
            ExitCode::FAILURE
        }
    }
}
