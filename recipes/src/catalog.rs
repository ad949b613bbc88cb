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
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::{debug, info, instrument};

use crate::{CatalogError, Nutrition, Recipe};

/// The fixed set of recipes a session browses along with the sorted,
/// de-duplicated vocabulary of every ingredient they use.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    recipes: Vec<Recipe>,
    vocabulary: Vec<String>,
}

impl Catalog {
    /// Ingredient names are lowercased before the vocabulary is derived.
    pub fn new(mut recipes: Vec<Recipe>) -> Self {
        for i in recipes.iter_mut().flat_map(|r| r.ingredients.iter_mut()) {
            *i = i.to_lowercase();
        }
        let vocabulary = recipes
            .iter()
            .flat_map(|r| r.ingredients.iter().cloned())
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect();
        Self {
            recipes,
            vocabulary,
        }
    }

    /// Construct a catalog after checking the recipes are well formed.
    pub fn try_new(recipes: Vec<Recipe>) -> Result<Self, CatalogError> {
        let mut seen = BTreeSet::new();
        for r in recipes.iter() {
            if r.id.is_empty() {
                return Err(CatalogError::Invalid(format!(
                    "recipe `{}` has an empty id",
                    r.name
                )));
            }
            if !seen.insert(r.id.clone()) {
                return Err(CatalogError::Invalid(format!("duplicate recipe id `{}`", r.id)));
            }
            if r.cook_time_minutes == 0 {
                return Err(CatalogError::Invalid(format!(
                    "recipe `{}` must have a positive cook time",
                    r.id
                )));
            }
            if r.servings == 0 {
                return Err(CatalogError::Invalid(format!(
                    "recipe `{}` must serve at least one",
                    r.id
                )));
            }
            if !r.nutrition.is_valid() {
                return Err(CatalogError::Invalid(format!(
                    "recipe `{}` has negative or non-numeric nutrition values",
                    r.id
                )));
            }
        }
        Ok(Self::new(recipes))
    }

    #[instrument(skip_all)]
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let recipes: Vec<Recipe> = serde_json::from_str(text)?;
        debug!(count = recipes.len(), "Decoded catalog entries");
        Self::try_new(recipes)
    }

    #[instrument(fields(path=?path.as_ref()), skip_all)]
    pub fn from_path<P>(path: P) -> Result<Self, CatalogError>
    where
        P: AsRef<Path>,
    {
        let mut br = BufReader::new(File::open(path)?);
        let mut buf = String::new();
        br.read_to_string(&mut buf)?;
        let catalog = Self::from_json(&buf)?;
        info!(
            recipes = catalog.len(),
            ingredients = catalog.vocabulary().len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    /// The built in catalog.
    pub fn sample() -> Self {
        Self::new(sample_recipes())
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.recipe_id() == id)
    }

    pub fn knows_ingredient(&self, ingredient: &str) -> bool {
        self.vocabulary
            .binary_search_by(|i| i.as_str().cmp(ingredient))
            .is_ok()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

fn sample_recipes() -> Vec<Recipe> {
    vec![
        Recipe::new("r1", "Spicy Chickpea Curry", 30, 2)
            .with_image("https://images.pexels.com/photos/1117862/pexels-photo-1117862.jpeg?auto=compress&cs=tinysrgb&w=800")
            .with_ingredients(["chickpeas", "onion", "garlic", "tomato", "curry powder"])
            .with_instructions("Saute onions and garlic, add spices and tomatoes, then simmer with chickpeas until thick and fragrant.")
            .with_tags(["vegan", "high-protein", "one-pot"])
            .with_nutrition(Nutrition::new(420.0, 18.0, 55.0, 12.0)),
        Recipe::new("r2", "Creamy Mushroom Pasta", 25, 2)
            .with_image("https://images.pexels.com/photos/1279330/pexels-photo-1279330.jpeg?auto=compress&cs=tinysrgb&w=800")
            .with_ingredients(["pasta", "mushroom", "garlic", "cream", "parmesan"])
            .with_instructions("Cook pasta, saute mushrooms with garlic, then add cream and cheese and toss with pasta.")
            .with_tags(["comfort", "quick"])
            .with_nutrition(Nutrition::new(650.0, 22.0, 70.0, 26.0)),
        Recipe::new("r3", "Mediterranean Quinoa Salad", 20, 3)
            .with_image("https://images.pexels.com/photos/1437267/pexels-photo-1437267.jpeg?auto=compress&cs=tinysrgb&w=800")
            .with_ingredients(["quinoa", "cucumber", "tomato", "feta", "olive oil"])
            .with_instructions("Cook quinoa, cool it, then toss with chopped veggies, feta, and olive oil dressing.")
            .with_tags(["salad", "light", "meal-prep"])
            .with_nutrition(Nutrition::new(350.0, 14.0, 45.0, 14.0)),
        Recipe::new("r4", "Grilled Chicken Bowl", 35, 1)
            .with_image("https://images.pexels.com/photos/4106483/pexels-photo-4106483.jpeg?auto=compress&cs=tinysrgb&w=800")
            .with_ingredients(["chicken", "rice", "broccoli", "soy sauce", "garlic"])
            .with_instructions("Marinate chicken, grill it, and serve over rice with steamed broccoli and soy-garlic drizzle.")
            .with_tags(["high-protein", "meal-prep"])
            .with_nutrition(Nutrition::new(520.0, 40.0, 55.0, 12.0)),
        Recipe::new("r5", "Avocado Toast with Egg", 10, 1)
            .with_image("https://images.pexels.com/photos/5665662/pexels-photo-5665662.jpeg?auto=compress&cs=tinysrgb&w=800")
            .with_ingredients(["bread", "avocado", "egg", "lemon", "chili flakes", "garlic"])
            .with_instructions("Toast bread and rub it with garlic, mash avocado with lemon, spread, then top with fried or poached egg.")
            .with_tags(["breakfast", "quick"])
            .with_nutrition(Nutrition::new(320.0, 12.0, 28.0, 18.0)),
    ]
}
