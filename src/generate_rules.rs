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

use crate::error::{MiningError, Result};
use crate::index::SupportIndex;
use crate::itemset::ItemSet;
use crate::rule::Rule;
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use tracing::warn;

/// What to do when an itemset's subset has no support in the index, as
/// happens when the index was mined with a maximum itemset size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MissingSupportPolicy {
    // Log and drop the rule.
    Skip,
    Fail,
}

impl Default for MissingSupportPolicy {
    fn default() -> Self {
        MissingSupportPolicy::Skip
    }
}

fn rules_for_itemset(
    itemset: &ItemSet,
    support: u32,
    index: &SupportIndex,
    min_confidence: f64,
    policy: MissingSupportPolicy,
) -> Result<Vec<Rule>> {
    let mut rules = vec![];
    for antecedent in itemset.proper_subsets() {
        match Rule::make(itemset, support, antecedent, index, min_confidence) {
            Ok(Some(rule)) => rules.push(rule),
            Ok(None) => {}
            Err(MiningError::MissingSubsetSupport { itemset, subset })
                if policy == MissingSupportPolicy::Skip =>
            {
                warn!(?itemset, ?subset, "skipping rule, subset has no support");
            }
            Err(err) => return Err(err),
        }
    }
    Ok(rules)
}

/// Derives every rule `A => I - A` for each itemset I of two or more items
/// in the index and each proper non-empty subset A of I, keeping those with
/// confidence support(I) / support(A) >= min_confidence.
///
/// Rules are returned sorted by ascending confidence, then by antecedent
/// and consequent. A threshold outside [0,1], NaN included, is rejected.
pub fn generate_rules(
    index: &SupportIndex,
    min_confidence: f64,
    policy: MissingSupportPolicy,
) -> Result<Vec<Rule>> {
    if !(0.0..=1.0).contains(&min_confidence) {
        return Err(MiningError::InvalidArgument(format!(
            "minimum confidence {} is not in range [0,1]",
            min_confidence
        )));
    }
    let mut itemsets: Vec<(&ItemSet, u32)> =
        index.iter().filter(|&(itemset, _)| itemset.len() > 1).collect();
    itemsets.sort();

    let per_itemset: Vec<Vec<Rule>> = itemsets
        .par_iter()
        .map(|&(itemset, support)| {
            rules_for_itemset(itemset, support, index, min_confidence, policy)
        })
        .collect::<Result<Vec<Vec<Rule>>>>()?;

    let mut rules: Vec<Rule> = per_itemset.into_iter().flatten().collect();
    rules.sort_by(|a, b| {
        OrderedFloat(a.confidence)
            .cmp(&OrderedFloat(b.confidence))
            .then_with(|| a.antecedent.cmp(&b.antecedent))
            .then_with(|| a.consequent.cmp(&b.consequent))
    });
    Ok(rules)
}
