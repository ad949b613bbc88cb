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
use inflector::Inflector;
use maud::{html, Markup, DOCTYPE};

use crate::{AppState, Recipe, StateMachine};

/// Upper-case the first character, leaving the rest alone.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn results_count_label(count: usize) -> String {
    let noun = if count == 1 {
        "recipe".to_owned()
    } else {
        "recipe".to_plural()
    };
    format!("{} {} found", count, noun)
}

pub fn timing_badge(recipe: &Recipe) -> String {
    format!(
        "⏱ {} min • 🍽 {} servings",
        recipe.cook_time_minutes, recipe.servings
    )
}

pub fn chip(ingredient: &str, selected: bool) -> Markup {
    html! {
        button.chip.selected[selected] type="button" data-ingredient=(ingredient) {
            (capitalize(ingredient))
        }
    }
}

pub fn ingredient_chips(vocabulary: &[String], state: &AppState) -> Markup {
    html! {
        div #ingredient-chips {
            @for ingredient in vocabulary {
                (chip(ingredient, state.is_selected(ingredient)))
            }
        }
    }
}

pub fn save_button(saved: bool) -> Markup {
    html! {
        button.btn-save.saved[saved] data-action="save" {
            @if saved { "Saved" } @else { "Save" }
        }
    }
}

pub fn recipe_card(recipe: &Recipe, saved: bool) -> Markup {
    let nutrition = &recipe.nutrition;
    html! {
        article.recipe-card data-id=(recipe.id) {
            div.recipe-image-wrapper {
                img.recipe-image src=(recipe.image) alt=(recipe.name) loading="lazy";
                div.recipe-badge { (timing_badge(recipe)) }
            }
            div.recipe-body {
                h3.recipe-title { (recipe.name) }
                div.recipe-meta {
                    span { "🧬 " (recipe.ingredients.len()) " ingredients" }
                    span { "🔥 " (nutrition.calories) " kcal" }
                }
                div.recipe-tags {
                    @for tag in &recipe.tags {
                        span.recipe-tag { (tag) }
                    }
                }
                div.recipe-nutrition {
                    span { "Protein: " (nutrition.protein) "g" }
                    span { "Carbs: " (nutrition.carbs) "g" }
                    span { "Fat: " (nutrition.fats) "g" }
                }
                div.recipe-footer {
                    button.btn-details data-action="details" { "View details" }
                    (save_button(saved))
                }
            }
        }
    }
}

/// The results region. It is replaced wholesale every time filters apply.
pub fn results(recipes: &[&Recipe], state: &AppState) -> Markup {
    let is_empty = recipes.is_empty();
    html! {
        section #results {
            p #results-count { (results_count_label(recipes.len())) }
            div #empty-state.hidden[!is_empty] {
                "No recipes match those filters."
            }
            div #recipes-grid {
                @for recipe in recipes {
                    (recipe_card(recipe, state.is_saved(&recipe.id)))
                }
            }
        }
    }
}

pub fn recipe_details(recipe: &Recipe) -> Markup {
    let nutrition = &recipe.nutrition;
    html! {
        h2.modal-title { (recipe.name) }
        p.modal-subtle { (timing_badge(recipe)) }
        div.modal-meta {
            span { "🔥 " (nutrition.calories) " kcal" }
            span { "Protein: " (nutrition.protein) "g" }
            span { "Carbs: " (nutrition.carbs) "g" }
            span { "Fat: " (nutrition.fats) "g" }
        }
        h3.modal-section-title { "Ingredients" }
        ul.modal-list {
            @for ingredient in &recipe.ingredients {
                li { (ingredient) }
            }
        }
        h3.modal-section-title { "Instructions" }
        p.modal-instructions { (recipe.instructions) }
    }
}

/// The detail overlay. Hidden when no recipe is given.
pub fn modal(recipe: Option<&Recipe>) -> Markup {
    html! {
        div #recipe-modal.modal.hidden[recipe.is_none()] {
            div #modal-backdrop.modal-backdrop {}
            div.modal-panel {
                button #modal-close-btn.modal-close type="button" { "×" }
                div #modal-content {
                    @if let Some(recipe) = recipe {
                        (recipe_details(recipe))
                    }
                }
            }
        }
    }
}

pub fn filter_panel(vocabulary: &[String], state: &AppState) -> Markup {
    html! {
        section #filters {
            (ingredient_chips(vocabulary, state))
            input #max-time-input type="number" min="1" placeholder="Max cook time (min)"
                value=(state.max_time_input);
            input #name-search-input type="text" placeholder="Search by name"
                value=(state.name_input);
            button #search-btn type="button" { "Search" }
            button #clear-filters-btn type="button" { "Clear filters" }
        }
    }
}

/// A complete document for the current state.
pub fn page(machine: &StateMachine, state: &AppState) -> Markup {
    let catalog = machine.catalog();
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "Kitchen" }
            }
            body {
                main.app {
                    (filter_panel(catalog.vocabulary(), state))
                    (results(&machine.results(state), state))
                }
                (modal(machine.modal_recipe(state)))
            }
        }
    }
}
