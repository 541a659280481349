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

use crate::apriori::apriori;
use crate::corpus::Corpus;
use crate::error::MiningError;
use crate::fptree;
use crate::index::SupportIndex;
use std::fmt;
use std::str::FromStr;
use tracing::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    Apriori,
    FpGrowth,
}

impl FromStr for Algorithm {
    type Err = MiningError;
    fn from_str(s: &str) -> Result<Algorithm, MiningError> {
        match s.to_ascii_lowercase().as_str() {
            "apriori" => Ok(Algorithm::Apriori),
            "fpgrowth" | "fp-growth" => Ok(Algorithm::FpGrowth),
            _ => Err(MiningError::InvalidArgument(format!(
                "unknown algorithm '{}', expected apriori or fpgrowth",
                s
            ))),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Algorithm::Apriori => write!(f, "apriori"),
            Algorithm::FpGrowth => write!(f, "fpgrowth"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct MiningOptions {
    // Absolute transaction count.
    pub min_support: u32,
    pub algorithm: Algorithm,
    pub max_itemset_size: Option<usize>,
}

/// Finds every itemset in the corpus with support >= min_support. FPGrowth
/// can't stop at a size limit, so a max itemset size always runs Apriori.
pub fn mine(corpus: &Corpus, options: &MiningOptions) -> SupportIndex {
    match (options.algorithm, options.max_itemset_size) {
        (Algorithm::FpGrowth, None) => fptree::mine(corpus, options.min_support),
        (algorithm, max_size) => {
            if algorithm == Algorithm::FpGrowth {
                info!(
                    max_itemset_size = ?max_size,
                    "max itemset size set, mining with apriori instead of fpgrowth"
                );
            }
            apriori(corpus, options.min_support, max_size)
        }
    }
}
