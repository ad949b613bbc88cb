// Copyright 2022 Jeremy Wall
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
mod cli;

use std::io::{self, BufWriter, Write};

use clap::{crate_authors, crate_version, value_parser, Arg, ArgAction, ArgMatches, Command};
use recipes::{Catalog, Message, StateMachine};
use tracing::{error, info, Level};

fn filter_args<'a>(cmd: Command<'a>) -> Command<'a> {
    cmd.arg(
        Arg::new("ingredient")
            .short('i')
            .long("ingredient")
            .takes_value(true)
            .value_parser(value_parser!(String))
            .action(ArgAction::Append)
            .help("Only recipes containing this ingredient. May be repeated."),
    )
    .arg(
        Arg::new("max-time")
            .short('t')
            .long("max-time")
            .takes_value(true)
            .value_parser(value_parser!(String))
            .help("Maximum cook time in minutes."),
    )
    .arg(
        Arg::new("name")
            .short('n')
            .long("name")
            .takes_value(true)
            .value_parser(value_parser!(String))
            .help("Only recipes whose name contains this text."),
    )
}

fn create_app() -> Command<'static> {
    Command::new("kitchen")
        .version(crate_version!())
        .author(crate_authors!())
        .about("Recipe Browser CLI")
        .arg(
            Arg::new("catalog")
                .long("catalog")
                .value_name("FILE")
                .takes_value(true)
                .global(true)
                .value_parser(value_parser!(String))
                .help("JSON catalog of recipes to browse instead of the built in one."),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Increase logging output. May be repeated."),
        )
        .subcommand(Command::new("ingredients").about("list every ingredient in the catalog"))
        .subcommand(filter_args(
            Command::new("search").about("print the recipes that match a set of filters"),
        ))
        .subcommand(
            Command::new("show")
                .about("print the details for a single recipe")
                .arg(
                    Arg::new("ID")
                        .required(true)
                        .value_parser(value_parser!(String))
                        .help("Id of the recipe to show"),
                ),
        )
        .subcommand(
            filter_args(Command::new("page").about("render the browser page as html"))
                .arg(
                    Arg::new("save")
                        .long("save")
                        .takes_value(true)
                        .value_parser(value_parser!(String))
                        .action(ArgAction::Append)
                        .help("Mark a recipe id as saved. May be repeated."),
                )
                .arg(
                    Arg::new("details")
                        .long("details")
                        .takes_value(true)
                        .value_parser(value_parser!(String))
                        .help("Render with the detail view open for this recipe id."),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("FILE")
                        .takes_value(true)
                        .value_parser(value_parser!(String))
                        .help("Write the page here instead of stdout."),
                ),
        )
        .subcommand(Command::new("browse").about("browse the catalog interactively from stdin"))
        .subcommand_required(true)
        .arg_required_else_help(true)
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn run(name: &str, matches: &ArgMatches) -> anyhow::Result<()> {
    let catalog: Catalog = cli::load_catalog(matches.get_one::<String>("catalog"))?;
    let machine = StateMachine::new(&catalog);
    info!(recipes = catalog.len(), command = name, "Starting kitchen");
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    match name {
        "ingredients" => {
            cli::output_ingredients(&mut out, &catalog, &machine.initial_state())?;
        }
        "search" => {
            let state = cli::state_from_filters(
                &machine,
                matches.get_many::<String>("ingredient").into_iter().flatten(),
                matches.get_one::<String>("max-time"),
                matches.get_one::<String>("name"),
            )?;
            cli::output_results(&mut out, &machine, &state)?;
        }
        "show" => {
            // The ID argument is required so if we made it here it has a value.
            let id = matches
                .get_one::<String>("ID")
                .map(String::as_str)
                .unwrap_or_default();
            match catalog.get(id) {
                Some(recipe) => cli::output_recipe_info(&mut out, recipe)?,
                None => anyhow::bail!("No recipe with id `{}`", id),
            }
        }
        "page" => {
            let mut state = cli::state_from_filters(
                &machine,
                matches.get_many::<String>("ingredient").into_iter().flatten(),
                matches.get_one::<String>("max-time"),
                matches.get_one::<String>("name"),
            )?;
            for id in matches.get_many::<String>("save").into_iter().flatten() {
                machine.map(Message::ToggleSaved(id.clone()), &mut state);
            }
            if let Some(id) = matches.get_one::<String>("details") {
                machine.map(Message::ShowDetails(id.clone()), &mut state);
            }
            cli::write_page(&mut out, &machine, &state, matches.get_one::<String>("output"))?;
        }
        "browse" => {
            let stdin = io::stdin();
            cli::browse(&machine, stdin.lock(), &mut out)?;
        }
        _ => unreachable!("clap only accepts known subcommands"),
    }
    out.flush()?;
    Ok(())
}

fn main() {
    let matches = create_app().get_matches();
    if let Some((name, sub_matches)) = matches.subcommand() {
        init_logging(sub_matches.get_count("verbose"));
        if let Err(err) = run(name, sub_matches) {
            error!(?err, "kitchen failed");
            eprintln!("Error: {:#}", err);
            std::process::exit(1);
        }
    }
}
