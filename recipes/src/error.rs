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
use std::fmt;

use tracing::error;

/// Errors raised while loading a catalog from outside the binary.
#[derive(Debug)]
pub enum CatalogError {
    IO(std::io::Error),
    Malformed(String),
    Invalid(String),
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::IO(err)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            error!(?err, "IO failure while decoding catalog");
        }
        CatalogError::Malformed(format!("{}", err))
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, w: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::IO(err) => write!(w, "Unable to read catalog: {}", err),
            CatalogError::Malformed(msg) => write!(w, "Malformed catalog: {}", msg),
            CatalogError::Invalid(msg) => write!(w, "Invalid catalog: {}", msg),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::IO(err) => Some(err),
            _ => None,
        }
    }
}
