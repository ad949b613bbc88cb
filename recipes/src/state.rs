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
use std::collections::BTreeSet;

use tracing::{debug, instrument, warn};

use crate::{filter, Catalog, FilterCriteria, ModalState, Recipe};

/// Everything a browsing session can change. The catalog itself is owned
/// elsewhere and never changes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub selected_ingredients: BTreeSet<String>,
    pub criteria: FilterCriteria,
    /// Raw max time input text, only parsed on search.
    pub max_time_input: String,
    /// Raw name input text, only applied on search.
    pub name_input: String,
    pub saved_recipes: BTreeSet<String>,
    pub modal: ModalState,
    /// Ids of the recipes that passed the filters the last time they were
    /// applied, in catalog order.
    pub results: Vec<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip `ingredient` in the selection. Returns true if it is now selected.
    pub fn toggle_ingredient(&mut self, ingredient: &str) -> bool {
        if self.selected_ingredients.remove(ingredient) {
            false
        } else {
            self.selected_ingredients.insert(ingredient.to_owned());
            true
        }
    }

    pub fn set_filters(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
    }

    /// Reset the selection, the criteria and the inputs. Saved recipes are
    /// kept.
    pub fn clear_all(&mut self) {
        self.selected_ingredients.clear();
        self.criteria = FilterCriteria::default();
        self.max_time_input.clear();
        self.name_input.clear();
    }

    /// Flip `recipe_id` in the saved set. Returns true if it is now saved.
    pub fn toggle_saved(&mut self, recipe_id: &str) -> bool {
        if self.saved_recipes.remove(recipe_id) {
            false
        } else {
            self.saved_recipes.insert(recipe_id.to_owned());
            true
        }
    }

    pub fn is_selected(&self, ingredient: &str) -> bool {
        self.selected_ingredients.contains(ingredient)
    }

    pub fn is_saved(&self, recipe_id: &str) -> bool {
        self.saved_recipes.contains(recipe_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Enter pressed inside one of the filter inputs.
    Enter,
    Escape,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    ToggleIngredient(String),
    EditMaxTime(String),
    EditName(String),
    Search,
    KeyPressed(Key),
    ClearFilters,
    ToggleSaved(String),
    ShowDetails(String),
    CloseModal,
    BackdropClicked,
}

/// The part of the view a message invalidated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Render {
    Nothing,
    /// The selected style of one ingredient chip.
    Chip(String),
    /// Results grid, count label and empty state indicator.
    Results,
    /// The save button on one recipe card.
    SaveButton(String),
    Modal,
    /// Chips, inputs and results after a clear.
    All,
}

pub struct StateMachine<'c>(&'c Catalog);

impl<'c> StateMachine<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self(catalog)
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.0
    }

    /// A fresh state with the filters applied once, so every recipe shows.
    pub fn initial_state(&self) -> AppState {
        let mut state = AppState::new();
        self.apply(&mut state);
        state
    }

    /// Recompute the results from the current selection and criteria.
    pub fn apply(&self, state: &mut AppState) {
        state.results = filter(
            self.0.recipes(),
            &state.selected_ingredients,
            &state.criteria,
        )
        .into_iter()
        .map(|r| r.id.clone())
        .collect();
        debug!(count = state.results.len(), "Applied filters");
    }

    /// The recipes from the last apply, in catalog order.
    pub fn results(&self, state: &AppState) -> Vec<&'c Recipe> {
        state
            .results
            .iter()
            .filter_map(|id| self.0.get(id))
            .collect()
    }

    /// The recipe the detail modal is showing, if any.
    pub fn modal_recipe(&self, state: &AppState) -> Option<&'c Recipe> {
        state.modal.recipe_id().and_then(|id| self.0.get(id))
    }

    fn search(&self, state: &mut AppState) -> Render {
        let criteria = FilterCriteria::from_inputs(&state.max_time_input, &state.name_input);
        state.set_filters(criteria);
        self.apply(state);
        Render::Results
    }

    fn close_modal(&self, state: &mut AppState) -> Render {
        if state.modal.close() {
            Render::Modal
        } else {
            Render::Nothing
        }
    }

    #[instrument(skip_all, fields(?msg))]
    pub fn map(&self, msg: Message, state: &mut AppState) -> Render {
        match msg {
            Message::ToggleIngredient(ingredient) => {
                if !self.0.knows_ingredient(&ingredient) {
                    warn!(%ingredient, "Ignoring unknown ingredient");
                    return Render::Nothing;
                }
                state.toggle_ingredient(&ingredient);
                Render::Chip(ingredient)
            }
            Message::EditMaxTime(text) => {
                state.max_time_input = text;
                Render::Nothing
            }
            Message::EditName(text) => {
                state.name_input = text;
                Render::Nothing
            }
            Message::Search | Message::KeyPressed(Key::Enter) => self.search(state),
            Message::ClearFilters => {
                state.clear_all();
                self.apply(state);
                Render::All
            }
            Message::ToggleSaved(id) => {
                if self.0.get(&id).is_none() {
                    debug!(%id, "No such recipe to save");
                    return Render::Nothing;
                }
                state.toggle_saved(&id);
                Render::SaveButton(id)
            }
            Message::ShowDetails(id) => {
                if self.0.get(&id).is_none() {
                    debug!(%id, "No such recipe to show");
                    return Render::Nothing;
                }
                state.modal.open(id);
                Render::Modal
            }
            Message::CloseModal | Message::BackdropClicked | Message::KeyPressed(Key::Escape) => {
                self.close_modal(state)
            }
        }
    }
}
