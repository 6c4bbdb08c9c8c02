// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::ClientConfig;
use crate::format::DateStyle;
use crate::session::{FileStorage, Storage, read_token, read_user};
use crate::store::{BillsStore, HttpStore, MemoryStore};
use anyhow::{Context, Result};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use std::fs;
use std::rc::Rc;

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // Arrays stream one element per line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

/// Everything a command needs from the environment.
pub struct Env {
    pub config: ClientConfig,
    pub storage: Rc<FileStorage>,
}

impl Env {
    pub fn date_style(&self, m: &clap::ArgMatches) -> Result<DateStyle> {
        match m.get_one::<String>("date_style") {
            Some(s) => s.parse::<DateStyle>().map_err(anyhow::Error::msg),
            None => Ok(self.config.date_style),
        }
    }

    /// A file-backed store when `--from` is given, the HTTP API otherwise.
    pub fn store(&self, m: &clap::ArgMatches) -> Result<Rc<dyn BillsStore>> {
        if let Some(path) = m.get_one::<String>("from") {
            let raw = fs::read_to_string(path).with_context(|| format!("Read bills from {}", path))?;
            let email = read_user(self.storage.as_ref()).ok().and_then(|u| u.email);
            let store = MemoryStore::from_json(&raw)
                .with_context(|| format!("Invalid bills file {}", path))?
                .scoped_to(email);
            return Ok(Rc::new(store));
        }
        let storage: &dyn Storage = self.storage.as_ref();
        let store = HttpStore::new(&self.config.api_url, self.config.timeout())?
            .with_token(read_token(storage));
        Ok(Rc::new(store))
    }
}
