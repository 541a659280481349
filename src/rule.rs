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
use crate::item::Item;
use crate::itemizer::Itemizer;
use crate::itemset::ItemSet;
use itertools::Itertools;
use std::hash::{Hash, Hasher};

#[derive(Clone, Debug)]
pub struct Rule {
    pub antecedent: ItemSet,
    pub consequent: ItemSet,
    pub confidence: f64,
}

// Can't derive Eq as f64 doesn't satisfy Eq. A rule is identified by its
// antecedent and consequent.
impl Eq for Rule {}

impl Hash for Rule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.antecedent.hash(state);
        self.consequent.hash(state);
    }
}

impl PartialEq for Rule {
    fn eq(&self, other: &Rule) -> bool {
        self.antecedent == other.antecedent && self.consequent == other.consequent
    }
}

impl Rule {
    // Creates the rule antecedent => (itemset - antecedent) if it would be
    // above the min_confidence threshold. Fails if the antecedent's support
    // isn't in the index.
    pub fn make(
        itemset: &ItemSet,
        itemset_support: u32,
        antecedent: ItemSet,
        itemset_support_index: &SupportIndex,
        min_confidence: f64,
    ) -> Result<Option<Rule>> {
        let consequent = itemset.difference(&antecedent);
        if antecedent.is_empty() || consequent.is_empty() {
            return Ok(None);
        }

        let a_sup = match itemset_support_index.get(&antecedent) {
            Some(support) => support,
            None => {
                return Err(MiningError::MissingSubsetSupport {
                    itemset: itemset.clone(),
                    subset: antecedent,
                })
            }
        };
        if a_sup == 0 {
            return Ok(None);
        }

        let confidence = itemset_support as f64 / a_sup as f64;
        if confidence < min_confidence {
            return Ok(None);
        }

        Ok(Some(Rule {
            antecedent,
            consequent,
            confidence,
        }))
    }

    pub fn to_string(&self, itemizer: &Itemizer) -> String {
        format!(
            "{} => {}",
            Item::item_names(self.antecedent.items(), itemizer).iter().join(" "),
            Item::item_names(self.consequent.items(), itemizer).iter().join(" ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Rule;
    use crate::error::MiningError;
    use crate::index::SupportIndex;
    use crate::itemizer::Itemizer;

    #[test]
    fn test_make() {
        let mut itemizer = Itemizer::new();
        let a = itemizer.itemset_of(&["A"]);
        let b = itemizer.itemset_of(&["B"]);
        let ab = itemizer.itemset_of(&["A", "B"]);
        let mut index = SupportIndex::new();
        index.insert(a.clone(), 4);
        index.insert(b.clone(), 2);
        index.insert(ab.clone(), 2);

        let rule = Rule::make(&ab, 2, a.clone(), &index, 0.5).unwrap().unwrap();
        assert_eq!(rule.antecedent, a);
        assert_eq!(rule.consequent, b);
        assert_eq!(rule.confidence, 0.5);
        assert_eq!(rule.to_string(&itemizer), "A => B");

        let rule = Rule::make(&ab, 2, b.clone(), &index, 0.5).unwrap().unwrap();
        assert_eq!(rule.confidence, 1.0);

        assert!(Rule::make(&ab, 2, a.clone(), &index, 0.6).unwrap().is_none());
        // The whole itemset has no consequent.
        assert!(Rule::make(&ab, 2, ab.clone(), &index, 0.0).unwrap().is_none());
    }

    #[test]
    fn test_make_missing_support() {
        let mut itemizer = Itemizer::new();
        let ab = itemizer.itemset_of(&["A", "B"]);
        let mut index = SupportIndex::new();
        index.insert(ab.clone(), 2);
        match Rule::make(&ab, 2, itemizer.itemset_of(&["A"]), &index, 0.0) {
            Err(MiningError::MissingSubsetSupport { itemset, subset }) => {
                assert_eq!(itemset, ab);
                assert_eq!(subset, itemizer.itemset_of(&["A"]));
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_rule_identity_ignores_confidence() {
        let mut itemizer = Itemizer::new();
        let a = itemizer.itemset_of(&["A"]);
        let b = itemizer.itemset_of(&["B"]);
        let x = Rule {
            antecedent: a.clone(),
            consequent: b.clone(),
            confidence: 0.5,
        };
        let y = Rule {
            antecedent: a,
            consequent: b,
            confidence: 0.9,
        };
        assert_eq!(x, y);
    }
}
