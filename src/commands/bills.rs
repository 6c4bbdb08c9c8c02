// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::overlay::ModalOverlay;
use crate::pipeline::{Bills, BillsContext, FetchOutcome};
use crate::session::Storage;
use crate::utils::{Env, maybe_print_json, pretty_table};
use crate::view;
use anyhow::{Result, anyhow};
use std::rc::Rc;

pub fn handle(env: &Env, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(env, sub)?,
        Some(("render", sub)) => render(env, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn container(env: &Env, m: &clap::ArgMatches) -> Result<Bills> {
    let storage: Rc<dyn Storage> = env.storage.clone();
    let ctx = BillsContext::new(Rc::new(|_: &str| {}), Rc::new(ModalOverlay::new()))
        .with_store(Some(env.store(m)?))
        .with_storage(Some(storage))
        .with_date_style(env.date_style(m)?);
    Ok(Bills::new(ctx))
}

fn list(env: &Env, sub: &clap::ArgMatches) -> Result<()> {
    let bills = match container(env, sub)?.load() {
        FetchOutcome::Success(b) => b,
        FetchOutcome::TransportError(e) => return Err(anyhow!(e)),
    };
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(bills.len());
    let bills = &bills[..limit.min(bills.len())];

    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &bills)? {
        let rows: Vec<Vec<String>> = bills
            .iter()
            .map(|b| {
                vec![
                    b.date.clone(),
                    b.r#type.clone(),
                    b.name.clone(),
                    format!("{} €", b.amount),
                    b.status.clone(),
                    b.file_name.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Type", "Name", "Amount", "Status", "Receipt"], rows)
        );
    }
    Ok(())
}

fn render(env: &Env, sub: &clap::ArgMatches) -> Result<()> {
    let outcome = container(env, sub)?.load();
    println!("{}", view::bills_page(&outcome).into_string());
    Ok(())
}
