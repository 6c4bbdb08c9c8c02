// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::SessionError;
use crate::models::{UserSession, UserType};
use crate::session::{Storage, TOKEN_KEY, USER_KEY, read_token, read_user, write_user};
use crate::utils::{Env, pretty_table};
use anyhow::Result;
use serde_json::json;

pub fn handle(env: &Env, m: &clap::ArgMatches) -> Result<()> {
    let storage: &dyn Storage = env.storage.as_ref();
    match m.subcommand() {
        Some(("set", sub)) => {
            let email = sub.get_one::<String>("email").unwrap().trim().to_string();
            let kind = sub.get_one::<String>("type").unwrap();
            let user: UserSession = serde_json::from_value(json!({
                "type": kind.trim(),
                "email": email,
            }))?;
            write_user(storage, &user)?;
            if let Some(jwt) = sub.get_one::<String>("jwt") {
                storage.set_item(TOKEN_KEY, jwt.trim())?;
            }
            println!("Session saved to {}", env.storage.path().display());
        }
        Some(("show", _)) => match read_user(storage) {
            Ok(user) => {
                let kind = match &user.r#type {
                    UserType::Employee => "Employee".to_string(),
                    UserType::Admin => "Admin".to_string(),
                    UserType::Other(s) => s.clone(),
                };
                let token = if read_token(storage).is_some() { "yes" } else { "no" };
                let rows = vec![vec![kind, user.email.unwrap_or_default(), token.to_string()]];
                println!("{}", pretty_table(&["Type", "Email", "Token"], rows));
            }
            Err(SessionError::Missing) => println!("No session stored."),
            Err(e) => return Err(e.into()),
        },
        Some(("clear", _)) => {
            storage.remove_item(USER_KEY)?;
            storage.remove_item(TOKEN_KEY)?;
            println!("Session cleared");
        }
        _ => {}
    }
    Ok(())
}
