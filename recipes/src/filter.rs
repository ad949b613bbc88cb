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

use crate::Recipe;

/// The (max time, name query) pair applied on an explicit search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    /// Upper bound on cook time in minutes. `None` is unbounded.
    pub max_time: Option<i64>,
    /// Name substring to look for. Empty means no constraint.
    pub name_query: String,
}

impl FilterCriteria {
    pub fn new<S: Into<String>>(max_time: Option<i64>, name_query: S) -> Self {
        Self {
            max_time,
            name_query: name_query.into(),
        }
    }

    /// Build criteria from the raw text of the max time and name inputs.
    pub fn from_inputs(max_time: &str, name_query: &str) -> Self {
        Self {
            max_time: parse_max_time(max_time),
            name_query: name_query.trim().to_owned(),
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        self.max_time.is_none() && self.name_query.is_empty()
    }
}

/// Parse the max time input leniently. Leading digits are read and anything
/// after them ignored, so `"25min"` is 25 and `"3.7"` is 3. Input without
/// leading digits is no bound at all.
pub fn parse_max_time(input: &str) -> Option<i64> {
    let trimmed = input.trim();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digit_count = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digit_count == 0 {
        return None;
    }
    // Only overflow can fail here so saturate.
    let value = rest[..digit_count].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

fn has_all_ingredients(recipe: &Recipe, selected: &BTreeSet<String>) -> bool {
    selected.iter().all(|i| recipe.has_ingredient(i))
}

fn within_time(recipe: &Recipe, max_time: Option<i64>) -> bool {
    match max_time {
        Some(max) => i64::from(recipe.cook_time_minutes) <= max,
        None => true,
    }
}

fn name_matches(recipe: &Recipe, lowered_query: &str) -> bool {
    lowered_query.is_empty() || recipe.name.to_lowercase().contains(lowered_query)
}

/// Select the recipes that contain every selected ingredient, cook within the
/// max time and whose name contains the query ignoring case. The result keeps
/// the order of `recipes`.
pub fn filter<'r>(
    recipes: &'r [Recipe],
    selected: &BTreeSet<String>,
    criteria: &FilterCriteria,
) -> Vec<&'r Recipe> {
    let lowered_query = criteria.name_query.to_lowercase();
    recipes
        .iter()
        .filter(|r| {
            has_all_ingredients(r, selected)
                && within_time(r, criteria.max_time)
                && name_matches(r, &lowered_query)
        })
        .collect()
}
