// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::rc::Rc;

use billed::config::ClientConfig;
use billed::session::{FileStorage, default_storage_path};
use billed::utils::Env;
use billed::{cli, commands, logging};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    logging::init(matches.get_flag("verbose"))?;

    let env = Env {
        config: ClientConfig::load()?,
        storage: Rc::new(FileStorage::open(default_storage_path()?)?),
    };

    match matches.subcommand() {
        Some(("bills", sub)) => commands::bills::handle(&env, sub)?,
        Some(("navigate", sub)) => commands::navigate::handle(&env, sub)?,
        Some(("session", sub)) => commands::session::handle(&env, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
