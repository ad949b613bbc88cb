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
/// The recipe detail overlay. At most one recipe is shown at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open(String),
}

impl ModalState {
    /// Show `recipe_id`, replacing whatever recipe was showing.
    pub fn open<S: Into<String>>(&mut self, recipe_id: S) {
        *self = ModalState::Open(recipe_id.into());
    }

    /// Hide the overlay. Returns false if it was already closed.
    pub fn close(&mut self) -> bool {
        match self {
            ModalState::Closed => false,
            ModalState::Open(_) => {
                *self = ModalState::Closed;
                true
            }
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, ModalState::Open(_))
    }

    pub fn recipe_id(&self) -> Option<&str> {
        match self {
            ModalState::Open(id) => Some(id.as_str()),
            ModalState::Closed => None,
        }
    }
}
