// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::overlay::ModalOverlay;
use crate::router::{AppContext, Router};
use crate::session::Storage;
use crate::utils::Env;
use anyhow::Result;
use std::rc::Rc;

pub fn handle(env: &Env, m: &clap::ArgMatches) -> Result<()> {
    let path = m.get_one::<String>("path").map(String::as_str).unwrap_or("/");
    let storage: Rc<dyn Storage> = env.storage.clone();
    let router = Router::new(AppContext {
        store: Some(env.store(m)?),
        storage: Some(storage),
        overlay: Rc::new(ModalOverlay::new()),
        date_style: env.date_style(m)?,
    });
    router.on_navigate(path);

    let state = router.state();
    eprintln!(
        "route: {} (active icon: {})",
        state.current.map(|r| r.as_str()).unwrap_or("-"),
        state.active_icon.map(|i| i.test_id()).unwrap_or("-"),
    );
    println!("{}", state.root);
    Ok(())
}
