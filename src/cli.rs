// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, ArgGroup, Command, value_parser};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print JSON Lines"),
    )
}

fn text(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).help(help)
}

fn required(name: &'static str, help: &'static str) -> Arg {
    text(name, help).required(true)
}

fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .value_parser(value_parser!(i64))
        .help("Record id")
}

pub fn build_cli() -> Command {
    Command::new("salonbook")
        .about("Appointments, advances and worker settlements for a small salon")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("worker")
                .about("Manage staff")
                .subcommand(
                    Command::new("add")
                        .arg(required("name", "Display name"))
                        .arg(text("email", "Contact email"))
                        .arg(
                            text("role", "admin|worker")
                                .default_value("worker")
                                .value_parser(["admin", "worker"]),
                        ),
                )
                .subcommand(json_args(Command::new("list")))
                .subcommand(Command::new("rm").arg(required("name", "Worker name"))),
        )
        .subcommand(
            Command::new("service")
                .about("Manage the service catalog")
                .subcommand(
                    Command::new("add")
                        .arg(required("name", "Service name"))
                        .arg(required("price", "Default price")),
                )
                .subcommand(json_args(Command::new("list")))
                .subcommand(Command::new("rm").arg(required("name", "Service name"))),
        )
        .subcommand(
            Command::new("appt")
                .about("Schedule and close appointments")
                .subcommand(
                    Command::new("add")
                        .arg(required("worker", "Worker name"))
                        .arg(required("client", "Client name"))
                        .arg(text("phone", "Client phone"))
                        .arg(required("service", "Service name"))
                        .arg(text("price", "Price; defaults to the catalog price"))
                        .arg(required("date", "YYYY-MM-DD"))
                        .arg(required("time", "HH:MM")),
                )
                .subcommand(
                    Command::new("complete")
                        .arg(id_arg())
                        .arg(
                            required("method", "cash|transfer")
                                .value_parser(["cash", "transfer"]),
                        )
                        .arg(text("proof", "Reference to the transfer receipt")),
                )
                .subcommand(Command::new("cancel").arg(id_arg()))
                .subcommand(json_args(
                    Command::new("list")
                        .arg(text("worker", "Only this worker"))
                        .arg(text("date", "Only this day (YYYY-MM-DD)")),
                )),
        )
        .subcommand(
            Command::new("loan")
                .about("Record cash advances")
                .subcommand(
                    Command::new("add")
                        .arg(required("worker", "Worker name"))
                        .arg(required("amount", "Amount advanced"))
                        .arg(text("note", "Observation"))
                        .arg(text("date", "YYYY-MM-DD; defaults to now")),
                )
                .subcommand(json_args(
                    Command::new("list").arg(text("worker", "Only this worker")),
                ))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("report")
                .about("Settlements and cash summaries")
                .subcommand(json_args(
                    Command::new("settle")
                        .arg(text("worker", "Only this worker"))
                        .arg(text("from", "Start date (YYYY-MM-DD)"))
                        .arg(text("to", "End date (YYYY-MM-DD)"))
                        .arg(
                            Arg::new("week")
                                .long("week")
                                .action(ArgAction::SetTrue)
                                .help("Current Sunday-to-Saturday week"),
                        )
                        .arg(text("month", "Calendar month (YYYY-MM)"))
                        .group(
                            ArgGroup::new("period")
                                .args(["from", "week", "month"])
                                .multiple(false),
                        )
                        .group(
                            ArgGroup::new("period_end")
                                .args(["to", "week", "month"])
                                .multiple(false),
                        ),
                ))
                .subcommand(json_args(
                    Command::new("daily").arg(text("date", "Day (YYYY-MM-DD); defaults to today")),
                ))
                .subcommand(json_args(Command::new("weekly")))
                .subcommand(json_args(Command::new("history"))),
        )
        .subcommand(
            Command::new("export")
                .about("Write reports to a file")
                .subcommand(
                    Command::new("settlements")
                        .arg(required("format", "csv|json"))
                        .arg(required("out", "Output path"))
                        .arg(text("from", "Start date (YYYY-MM-DD)"))
                        .arg(text("to", "End date (YYYY-MM-DD)")),
                )
                .subcommand(
                    Command::new("history")
                        .arg(required("format", "csv|json"))
                        .arg(required("out", "Output path")),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Business settings")
                .subcommand(json_args(Command::new("show")))
                .subcommand(
                    Command::new("set-timezone").arg(required("tz", "IANA zone, e.g. America/Bogota")),
                )
                .subcommand(
                    Command::new("set-split").arg(required("split", "Worker fraction, e.g. 0.5")),
                ),
        )
        .subcommand(Command::new("doctor").about("List records the reports had to skip"))
}
