// Copyright 2018 Chris Pearce
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::itemset::ItemSet;
use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MiningError>;

#[derive(Debug, Error)]
pub enum MiningError {
    /// The support index has no count for a subset of one of its own
    /// itemsets, e.g. because it was mined with a size cutoff.
    #[error("no support recorded for subset {subset:?} of itemset {itemset:?}")]
    MissingSubsetSupport { itemset: ItemSet, subset: ItemSet },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
