// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn filter_args(cmd: Command) -> Command {
    cmd.arg(Arg::new("from").long("from").help("First date, YYYY-MM-DD (inclusive)"))
        .arg(Arg::new("to").long("to").help("Last date, YYYY-MM-DD (inclusive)"))
        .arg(Arg::new("category").long("category").help("Only this category"))
        .arg(Arg::new("min").long("min").help("Minimum amount (inclusive)"))
        .arg(Arg::new("max").long("max").help("Maximum amount (inclusive)"))
        .arg(
            Arg::new("through")
                .long("through")
                .help("Materialize recurring charges up to this date (default: today)"),
        )
}

fn currency_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("base")
            .long("base")
            .action(ArgAction::SetTrue)
            .help("Convert amounts to the base currency first"),
    )
    .arg(
        Arg::new("currency")
            .long("currency")
            .conflicts_with("base")
            .help("Convert amounts to this currency first"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .value_parser(value_parser!(i64))
}

pub fn build_cli() -> Command {
    Command::new("spendwise")
        .about("Personal expense ledger: expenses, income, recurring charges, splits, debts, budgets")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("user")
                .long("user")
                .global(true)
                .help("Ledger owner (default: $SPENDWISE_USER or 'default')"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("user")
                .about("User accounts")
                .subcommand(
                    Command::new("register")
                        .arg(Arg::new("username").long("username").required(true))
                        .arg(Arg::new("password").long("password").required(true))
                        .arg(Arg::new("email").long("email")),
                )
                .subcommand(
                    Command::new("login")
                        .arg(Arg::new("username").long("username").required(true))
                        .arg(Arg::new("password").long("password").required(true)),
                ),
        )
        .subcommand(
            Command::new("expense")
                .about("Expenses")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("currency").long("currency"))
                        .arg(
                            Arg::new("every")
                                .long("every")
                                .help("Repeat Daily|Weekly|Monthly|Yearly from --date"),
                        )
                        .arg(
                            Arg::new("until")
                                .long("until")
                                .requires("every")
                                .help("Last date a repeat may fall on"),
                        ),
                )
                .subcommand(filter_args(json_args(
                    Command::new("list").arg(
                        Arg::new("limit")
                            .long("limit")
                            .value_parser(value_parser!(usize)),
                    ),
                )))
                .subcommand(
                    Command::new("edit")
                        .arg(id_arg())
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("currency").long("currency")),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("income")
                .about("Income")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("source").long("source").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("currency").long("currency")),
                )
                .subcommand(json_args(Command::new("list")))
                .subcommand(
                    Command::new("edit")
                        .arg(id_arg())
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("source").long("source"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("currency").long("currency")),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("recurring")
                .about("Recurring expense rules")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("start").long("start").required(true))
                        .arg(Arg::new("end").long("end"))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("frequency")
                                .long("frequency")
                                .required(true)
                                .help("Daily|Weekly|Monthly|Yearly"),
                        )
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("currency").long("currency")),
                )
                .subcommand(json_args(Command::new("list")))
                .subcommand(
                    Command::new("edit")
                        .arg(id_arg())
                        .arg(Arg::new("start").long("start"))
                        .arg(Arg::new("end").long("end"))
                        .arg(
                            Arg::new("no-end")
                                .long("no-end")
                                .action(ArgAction::SetTrue)
                                .conflicts_with("end")
                                .help("Let the rule repeat indefinitely"),
                        )
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("frequency").long("frequency"))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("currency").long("currency")),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("split")
                .about("Split an expense evenly between people")
                .subcommand(
                    Command::new("add")
                        .arg(
                            Arg::new("expense")
                                .long("expense")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(
                            Arg::new("person")
                                .long("person")
                                .required(true)
                                .action(ArgAction::Append),
                        )
                        .arg(
                            Arg::new("total")
                                .long("total")
                                .help("Amount to split (default: the expense amount)"),
                        ),
                )
                .subcommand(json_args(Command::new("list").arg(
                    Arg::new("expense")
                        .long("expense")
                        .value_parser(value_parser!(i64)),
                )))
                .subcommand(Command::new("rm").about("Remove one share").arg(id_arg())),
        )
        .subcommand(
            Command::new("debt")
                .about("Debts and loans")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("person").long("person").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("Debt (you owe) or Loan (you are owed)"),
                        )
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(json_args(Command::new("list")))
                .subcommand(json_args(Command::new("balance")))
                .subcommand(
                    Command::new("edit")
                        .arg(id_arg())
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("person").long("person"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("type").long("type"))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("report")
                .about("Spending views")
                .subcommand(currency_args(filter_args(json_args(Command::new("daily")))))
                .subcommand(currency_args(filter_args(json_args(Command::new("monthly")))))
                .subcommand(currency_args(filter_args(json_args(Command::new("category")))))
                .subcommand(json_args(
                    Command::new("cashflow")
                        .about("Income against spend per month, in one currency")
                        .arg(
                            Arg::new("months")
                                .long("months")
                                .value_parser(value_parser!(usize)),
                        )
                        .arg(
                            Arg::new("currency")
                                .long("currency")
                                .help("Report in this currency (default: the base currency)"),
                        ),
                )),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly budget")
                .subcommand(Command::new("set").arg(Arg::new("amount").long("amount").required(true)))
                .subcommand(json_args(
                    Command::new("check")
                        .arg(Arg::new("month").long("month").help("YYYY-MM (default: this month)"))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .help("Budget to check against instead of the stored one"),
                        )
                        .arg(
                            Arg::new("email")
                                .long("email")
                                .help("Send an alert here when the budget is exceeded"),
                        ),
                )),
        )
        .subcommand(
            Command::new("categorize")
                .about("Guess a category from a description")
                .arg(
                    Arg::new("text")
                        .long("text")
                        .required(true)
                        .action(ArgAction::Append)
                        .help("Description to classify; repeat for several"),
                ),
        )
        .subcommand(
            Command::new("export").about("Export data").subcommand(
                Command::new("expenses")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv")
                            .help("csv|json"),
                    )
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
        .subcommand(
            Command::new("fx")
                .about("Currency rates")
                .subcommand(
                    Command::new("set-base").arg(Arg::new("currency").long("currency").required(true)),
                )
                .subcommand(
                    Command::new("fetch").arg(
                        Arg::new("days")
                            .long("days")
                            .value_parser(value_parser!(usize)),
                    ),
                )
                .subcommand(Command::new("list"))
                .subcommand(
                    Command::new("convert")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("from").long("from").required(true))
                        .arg(Arg::new("to").long("to").required(true)),
                ),
        )
}
