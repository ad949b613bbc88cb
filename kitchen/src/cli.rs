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
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use recipes::view::{self, capitalize, results_count_label, timing_badge};
use recipes::{AppState, Catalog, CatalogError, Key, Message, Recipe, Render, StateMachine};
use tracing::{debug, info, instrument};

pub fn load_catalog(path: Option<&String>) -> Result<Catalog, CatalogError> {
    match path {
        Some(path) => Catalog::from_path(path),
        None => {
            debug!("Using the built in catalog");
            Ok(Catalog::sample())
        }
    }
}

/// Build a state the same way a user would: toggle each ingredient chip,
/// fill in the inputs and then hit search. Ingredients outside the catalog's
/// vocabulary are an error rather than silently dropped.
pub fn state_from_filters<'a, Iter>(
    machine: &StateMachine,
    ingredients: Iter,
    max_time: Option<&String>,
    name: Option<&String>,
) -> anyhow::Result<AppState>
where
    Iter: IntoIterator<Item = &'a String>,
{
    let mut state = machine.initial_state();
    for i in ingredients {
        let ingredient = i.to_lowercase();
        if !machine.catalog().knows_ingredient(&ingredient) {
            anyhow::bail!("Unknown ingredient `{}`", i);
        }
        machine.map(Message::ToggleIngredient(ingredient), &mut state);
    }
    if let Some(max_time) = max_time {
        machine.map(Message::EditMaxTime(max_time.clone()), &mut state);
    }
    if let Some(name) = name {
        machine.map(Message::EditName(name.clone()), &mut state);
    }
    machine.map(Message::Search, &mut state);
    Ok(state)
}

pub fn output_ingredients<W: Write>(
    w: &mut W,
    catalog: &Catalog,
    state: &AppState,
) -> std::io::Result<()> {
    for i in catalog.vocabulary() {
        output_chip(w, i, state.is_selected(i))?;
    }
    Ok(())
}

fn output_chip<W: Write>(w: &mut W, ingredient: &str, selected: bool) -> std::io::Result<()> {
    let mark = if selected { "x" } else { " " };
    writeln!(w, "[{}] {}", mark, capitalize(ingredient))
}

fn save_label(saved: bool) -> &'static str {
    if saved {
        "Saved"
    } else {
        "Save"
    }
}

pub fn output_recipe_card<W: Write>(
    w: &mut W,
    recipe: &Recipe,
    saved: bool,
) -> std::io::Result<()> {
    let nutrition = &recipe.nutrition;
    writeln!(w, "{} [{}] ({})", recipe.name, recipe.id, save_label(saved))?;
    writeln!(w, "  {}", timing_badge(recipe))?;
    writeln!(
        w,
        "  🧬 {} ingredients • 🔥 {} kcal • Protein: {}g • Carbs: {}g • Fat: {}g",
        recipe.ingredients.len(),
        nutrition.calories,
        nutrition.protein,
        nutrition.carbs,
        nutrition.fats
    )?;
    if !recipe.tags.is_empty() {
        writeln!(w, "  Tags: {}", recipe.tags.join(", "))?;
    }
    Ok(())
}

pub fn output_results<W: Write>(
    w: &mut W,
    machine: &StateMachine,
    state: &AppState,
) -> std::io::Result<()> {
    let results = machine.results(state);
    writeln!(w, "{}", results_count_label(results.len()))?;
    if results.is_empty() {
        writeln!(w, "No recipes match those filters.")?;
    }
    for recipe in results {
        output_recipe_card(w, recipe, state.is_saved(&recipe.id))?;
    }
    Ok(())
}

pub fn output_recipe_info<W: Write>(w: &mut W, recipe: &Recipe) -> std::io::Result<()> {
    let nutrition = &recipe.nutrition;
    writeln!(w, "{}", recipe.name)?;
    writeln!(w, "{}", timing_badge(recipe))?;
    writeln!(
        w,
        "🔥 {} kcal • Protein: {}g • Carbs: {}g • Fat: {}g",
        nutrition.calories, nutrition.protein, nutrition.carbs, nutrition.fats
    )?;
    writeln!(w)?;
    writeln!(w, "Ingredients")?;
    for i in &recipe.ingredients {
        writeln!(w, "  - {}", i)?;
    }
    writeln!(w)?;
    writeln!(w, "Instructions")?;
    writeln!(w, "  {}", recipe.instructions)
}

/// Render the page into `output` if given, otherwise onto `w`.
#[instrument(skip_all, fields(output=?output))]
pub fn write_page<W: Write>(
    w: &mut W,
    machine: &StateMachine,
    state: &AppState,
    output: Option<&String>,
) -> anyhow::Result<()> {
    let markup = view::page(machine, state).into_string();
    match output {
        Some(path) => {
            let file = File::create(Path::new(path))
                .with_context(|| format!("Unable to create {}", path))?;
            let mut file = BufWriter::new(file);
            file.write_all(markup.as_bytes())?;
            file.flush()?;
            info!(bytes = markup.len(), "Wrote page");
        }
        None => writeln!(w, "{}", markup)?,
    }
    Ok(())
}

#[derive(Debug, PartialEq)]
pub enum BrowseCommand {
    Dispatch(Message),
    Chips,
    List,
    Page(Option<String>),
    Help,
    Quit,
}

const BROWSE_HELP: &'static str = "\
Commands:
  chips                 show the ingredient chips
  toggle <ingredient>   select or deselect an ingredient
  time <minutes>        type into the max time input
  name <text>           type into the name input
  search | enter        apply the filters
  clear                 clear every filter
  save <id>             save or unsave a recipe
  details <id>          open the detail view for a recipe
  close | backdrop | escape
                        close the detail view
  list                  show the current results
  page [file]           render the page as html
  quit";

fn required(arg: &str) -> Option<String> {
    if arg.is_empty() {
        None
    } else {
        Some(arg.to_owned())
    }
}

/// Turn one line of browse input into a command. Blank or unknown lines
/// are `None`.
pub fn parse_command(line: &str) -> Option<BrowseCommand> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let cmd = match word.to_lowercase().as_str() {
        "chips" | "ingredients" => BrowseCommand::Chips,
        "toggle" | "chip" => {
            BrowseCommand::Dispatch(Message::ToggleIngredient(required(rest)?.to_lowercase()))
        }
        "time" => BrowseCommand::Dispatch(Message::EditMaxTime(rest.to_owned())),
        "name" => BrowseCommand::Dispatch(Message::EditName(rest.to_owned())),
        "search" => BrowseCommand::Dispatch(Message::Search),
        "enter" => BrowseCommand::Dispatch(Message::KeyPressed(Key::Enter)),
        "escape" | "esc" => BrowseCommand::Dispatch(Message::KeyPressed(Key::Escape)),
        "clear" => BrowseCommand::Dispatch(Message::ClearFilters),
        "save" => BrowseCommand::Dispatch(Message::ToggleSaved(required(rest)?)),
        "details" | "open" => BrowseCommand::Dispatch(Message::ShowDetails(required(rest)?)),
        "close" => BrowseCommand::Dispatch(Message::CloseModal),
        "backdrop" => BrowseCommand::Dispatch(Message::BackdropClicked),
        "list" => BrowseCommand::List,
        "page" => BrowseCommand::Page(required(rest)),
        "help" | "?" => BrowseCommand::Help,
        "quit" | "exit" => BrowseCommand::Quit,
        _ => return None,
    };
    Some(cmd)
}

fn output_render<W: Write>(
    w: &mut W,
    machine: &StateMachine,
    state: &AppState,
    render: Render,
) -> std::io::Result<()> {
    match render {
        Render::Nothing => Ok(()),
        Render::Chip(ingredient) => output_chip(w, &ingredient, state.is_selected(&ingredient)),
        Render::Results => output_results(w, machine, state),
        Render::SaveButton(id) => writeln!(w, "{}: {}", id, save_label(state.is_saved(&id))),
        Render::Modal => match machine.modal_recipe(state) {
            Some(recipe) => output_recipe_info(w, recipe),
            None => writeln!(w, "Details closed"),
        },
        Render::All => {
            output_ingredients(w, machine.catalog(), state)?;
            output_results(w, machine, state)
        }
    }
}

/// Run an interactive session. Every line read is dispatched and whatever
/// part of the view it changed is written back out.
#[instrument(skip_all)]
pub fn browse<R: BufRead, W: Write>(
    machine: &StateMachine,
    input: R,
    w: &mut W,
) -> anyhow::Result<AppState> {
    let mut state = machine.initial_state();
    output_results(w, machine, &state)?;
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line) {
            Some(BrowseCommand::Dispatch(Message::ToggleIngredient(ingredient)))
                if !machine.catalog().knows_ingredient(&ingredient) =>
            {
                writeln!(w, "Unknown ingredient `{}`", ingredient)?
            }
            Some(BrowseCommand::Dispatch(msg)) => {
                let render = machine.map(msg, &mut state);
                output_render(w, machine, &state, render)?;
            }
            Some(BrowseCommand::Chips) => output_ingredients(w, machine.catalog(), &state)?,
            Some(BrowseCommand::List) => output_results(w, machine, &state)?,
            Some(BrowseCommand::Page(output)) => write_page(w, machine, &state, output.as_ref())?,
            Some(BrowseCommand::Help) => writeln!(w, "{}", BROWSE_HELP)?,
            Some(BrowseCommand::Quit) => break,
            None => writeln!(w, "Unrecognized command `{}`. Try `help`.", line.trim())?,
        }
        w.flush()?;
    }
    Ok(state)
}

#[cfg(test)]
mod test {
    use super::*;

    fn run_session(input: &str) -> (AppState, String) {
        let catalog = Catalog::sample();
        let machine = StateMachine::new(&catalog);
        let mut out = Vec::new();
        let state = browse(&machine, input.as_bytes(), &mut out).expect("session should run");
        (state, String::from_utf8(out).expect("output is utf8"))
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(
            parse_command("toggle Soy Sauce"),
            Some(BrowseCommand::Dispatch(Message::ToggleIngredient(
                "soy sauce".to_owned()
            )))
        );
        assert_eq!(
            parse_command("  time 30 "),
            Some(BrowseCommand::Dispatch(Message::EditMaxTime("30".to_owned())))
        );
        assert_eq!(
            parse_command("time"),
            Some(BrowseCommand::Dispatch(Message::EditMaxTime(String::new())))
        );
        assert_eq!(
            parse_command("ESC"),
            Some(BrowseCommand::Dispatch(Message::KeyPressed(Key::Escape)))
        );
        assert_eq!(parse_command("page"), Some(BrowseCommand::Page(None)));
        assert_eq!(parse_command("save"), None);
        assert_eq!(parse_command("bake r1"), None);
    }

    #[test]
    fn test_browse_scenario() {
        let (state, out) = run_session(
            "toggle garlic\nsearch\ntime 30\nenter\nname Curry\nsearch\nsave r1\nquit\nsearch\n",
        );
        assert_eq!(state.results, vec!["r1".to_owned()]);
        assert!(state.is_saved("r1"));
        assert!(out.starts_with("5 recipes found\n"));
        assert!(out.contains("[x] Garlic\n"));
        assert!(out.contains("4 recipes found\n"));
        assert!(out.contains("3 recipes found\n"));
        assert!(out.contains("1 recipe found\n"));
        assert!(out.contains("r1: Saved\n"));
    }

    #[test]
    fn test_browse_modal_and_clear() {
        let (state, out) = run_session("details r2\nescape\nescape\nbake\ntoggle egg\nclear\n");
        assert!(out.contains("Creamy Mushroom Pasta\n⏱ 25 min • 🍽 2 servings\n"));
        assert_eq!(out.matches("Details closed").count(), 1);
        assert!(out.contains("Unrecognized command `bake`"));
        assert!(out.contains("[ ] Egg\n"));
        assert!(state.selected_ingredients.is_empty());
        assert_eq!(state.results.len(), 5);
    }

    #[test]
    fn test_state_from_filters() {
        let catalog = Catalog::sample();
        let machine = StateMachine::new(&catalog);
        let ingredients = vec!["Garlic".to_owned()];
        let max_time = "30".to_owned();
        let state = state_from_filters(&machine, &ingredients, Some(&max_time), None)
            .expect("garlic is in the catalog");
        assert_eq!(state.results, vec!["r1", "r2", "r5"]);
        let mut out = Vec::new();
        output_results(&mut out, &machine, &state).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("3 recipes found\n"));
        assert!(out.contains("Spicy Chickpea Curry [r1] (Save)\n"));
    }

    #[test]
    fn test_state_from_filters_rejects_unknown_ingredients() {
        let catalog = Catalog::sample();
        let machine = StateMachine::new(&catalog);
        let ingredients = vec!["garlik".to_owned()];
        let err = state_from_filters(&machine, &ingredients, None, None)
            .expect_err("garlik is not an ingredient");
        assert!(format!("{}", err).contains("garlik"));
    }

    #[test]
    fn test_browse_reports_unknown_ingredient() {
        let (state, out) = run_session("toggle tofu\n");
        assert!(out.contains("Unknown ingredient `tofu`\n"));
        assert!(state.selected_ingredients.is_empty());
    }

    #[test]
    fn test_browse_page_writes_to_session_output() {
        let (_, out) = run_session("name pasta\nsearch\npage\n");
        assert!(out.contains("<!DOCTYPE html>"));
        assert!(out.contains("1 recipe found"));
        assert!(out.contains(r#"value="pasta""#));
    }

    #[test]
    fn test_browse_page_writes_to_file() {
        let path = std::env::temp_dir()
            .join(format!("kitchen-browse-{}.html", std::process::id()));
        let (_, out) = run_session(&format!("save r3\npage {}\n", path.display()));
        assert!(!out.contains("<!DOCTYPE html>"));
        let html = std::fs::read_to_string(&path).expect("page file was written");
        std::fs::remove_file(&path).expect("page file can be removed");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(
            r#"<button class="btn-save saved" data-action="save">Saved</button>"#
        ));
    }
}
