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
pub mod catalog;
pub mod error;
pub mod filter;
pub mod modal;
pub mod state;
pub mod view;

use serde::{Deserialize, Serialize};

pub use catalog::Catalog;
pub use error::CatalogError;
pub use filter::{filter, FilterCriteria};
pub use modal::ModalState;
pub use state::{AppState, Key, Message, Render, StateMachine};

/// Nutrition facts for a single serving.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

impl Nutrition {
    pub fn new(calories: f64, protein: f64, carbs: f64, fats: f64) -> Self {
        Self {
            calories,
            protein,
            carbs,
            fats,
        }
    }

    fn values(&self) -> [f64; 4] {
        [self.calories, self.protein, self.carbs, self.fats]
    }

    /// True when every value is a finite, non-negative number.
    pub fn is_valid(&self) -> bool {
        self.values().iter().all(|v| v.is_finite() && *v >= 0.0)
    }
}

/// A Recipe in the catalog. Recipes are built once when the catalog is
/// assembled and never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: String,
    pub cook_time_minutes: u32,
    pub servings: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub nutrition: Nutrition,
}

impl Recipe {
    pub fn new<IS: Into<String>, NS: Into<String>>(
        id: IS,
        name: NS,
        cook_time_minutes: u32,
        servings: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image: String::new(),
            ingredients: Vec::new(),
            instructions: String::new(),
            cook_time_minutes,
            servings,
            tags: Vec::new(),
            nutrition: Nutrition::default(),
        }
    }

    pub fn with_image<S: Into<String>>(mut self, image: S) -> Self {
        self.image = image.into();
        self
    }

    /// Ingredient names are stored lowercase.
    pub fn with_ingredients<Iter, S>(mut self, ingredients: Iter) -> Self
    where
        Iter: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ingredients
            .extend(ingredients.into_iter().map(|i| Into::<String>::into(i).to_lowercase()));
        self
    }

    pub fn with_instructions<S: Into<String>>(mut self, instructions: S) -> Self {
        self.instructions = instructions.into();
        self
    }

    pub fn with_tags<Iter, S>(mut self, tags: Iter) -> Self
    where
        Iter: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(|t| t.into()));
        self
    }

    pub fn with_nutrition(mut self, nutrition: Nutrition) -> Self {
        self.nutrition = nutrition;
        self
    }

    pub fn recipe_id(&self) -> &str {
        self.id.as_str()
    }

    /// Ingredients are matched as a set, duplicates in the list don't matter.
    pub fn has_ingredient(&self, ingredient: &str) -> bool {
        self.ingredients.iter().any(|i| i == ingredient)
    }
}
