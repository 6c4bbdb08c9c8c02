// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, command, value_parser};

fn from_arg() -> Arg {
    Arg::new("from")
        .long("from")
        .value_name("FILE")
        .help("Read bills from a JSON file instead of the API")
}

pub fn build_cli() -> Command {
    command!()
        .about("Employee expense-report client")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Debug logging"),
        )
        .arg(
            Arg::new("date_style")
                .long("date-style")
                .global(true)
                .value_name("STYLE")
                .help("Date display: iso | french-short"),
        )
        .subcommand(
            Command::new("bills")
                .about("List and render bills")
                .subcommand(
                    Command::new("list")
                        .about("Fetch bills, newest first")
                        .arg(from_arg())
                        .arg(
                            Arg::new("json")
                                .long("json")
                                .action(ArgAction::SetTrue)
                                .conflicts_with("jsonl"),
                        )
                        .arg(Arg::new("jsonl").long("jsonl").action(ArgAction::SetTrue))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                )
                .subcommand(
                    Command::new("render")
                        .about("Print the Bills page markup")
                        .arg(from_arg()),
                ),
        )
        .subcommand(
            Command::new("navigate")
                .about("Navigate to a route and print the mounted markup")
                .arg(Arg::new("path").required(true).value_name("PATH"))
                .arg(from_arg()),
        )
        .subcommand(
            Command::new("session")
                .about("Manage the stored user session")
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("email").long("email").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .default_value("Employee")
                                .help("Employee | Admin"),
                        )
                        .arg(Arg::new("jwt").long("jwt")),
                )
                .subcommand(Command::new("show"))
                .subcommand(Command::new("clear")),
        )
}
