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

//! Recommends items to users from association rules: a user holding every
//! item of a rule's antecedent is recommended the rule's consequent items.
//!
//! Users file, one per line: `<uid>,<item>|<item>|...`
//! Output, one per line:
//!     `<uid>,<item>:<confidence>:<reason items joined by '&'>|...`

use crate::error::{MiningError, Result};
use crate::item::Item;
use crate::itemizer::Itemizer;
use crate::itemset::ItemSet;
use crate::rule::Rule;
use fnv::FnvHashMap;
use itertools::Itertools;
use ordered_float::OrderedFloat;
use std::io::{self, BufRead, Write};

#[derive(Clone, Debug, PartialEq)]
pub struct Recommendation {
    pub item: Item,
    pub confidence: f64,
    // Antecedent of the rule that made the recommendation.
    pub reason: ItemSet,
}

/// Recommends the items the user doesn't hold yet, each with the highest
/// confidence of any matching rule. Highest confidence first.
pub fn recommend(owned: &ItemSet, rules: &[Rule]) -> Vec<Recommendation> {
    let mut best: FnvHashMap<Item, (f64, &ItemSet)> = FnvHashMap::default();
    for rule in rules.iter().filter(|r| r.antecedent.is_subset_of(owned)) {
        for &item in rule.consequent.items() {
            if owned.contains(item) {
                continue;
            }
            let entry = best.entry(item).or_insert((rule.confidence, &rule.antecedent));
            if rule.confidence > entry.0 {
                *entry = (rule.confidence, &rule.antecedent);
            }
        }
    }

    let mut recommendations: Vec<Recommendation> = best
        .into_iter()
        .map(|(item, (confidence, reason))| Recommendation {
            item,
            confidence,
            reason: reason.clone(),
        })
        .collect();
    recommendations.sort_by(|a, b| {
        OrderedFloat(b.confidence)
            .cmp(&OrderedFloat(a.confidence))
            .then_with(|| a.item.cmp(&b.item))
    });
    recommendations
}

/// Reads each user's items. Items the itemizer has never seen can't appear
/// in any rule, so they are dropped.
pub fn read_users<R: BufRead>(input: R, itemizer: &Itemizer) -> Result<Vec<(String, ItemSet)>> {
    let mut users = vec![];
    for (i, line) in input.lines().enumerate() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }
        let mut fields = line.splitn(2, ',');
        let uid = fields.next().unwrap_or("");
        let items = match fields.next() {
            Some(items) => items,
            None => {
                return Err(MiningError::Parse {
                    line: i + 1,
                    message: format!("user '{}' has no item field", uid),
                })
            }
        };
        let items: Vec<Item> = items
            .split('|')
            .filter_map(|item| itemizer.get(item))
            .collect();
        users.push((uid.to_owned(), ItemSet::new(items)));
    }
    Ok(users)
}

pub fn write_recommendations<W: Write>(
    output: &mut W,
    uid: &str,
    recommendations: &[Recommendation],
    itemizer: &Itemizer,
) -> io::Result<()> {
    let entries = recommendations.iter().map(|r| {
        format!(
            "{}:{:.2}:{}",
            itemizer.str_of(r.item),
            r.confidence,
            Item::item_names(r.reason.items(), itemizer).iter().join("&")
        )
    });
    writeln!(output, "{},{}", uid, entries.format("|"))
}

#[cfg(test)]
mod tests {
    use super::{read_users, recommend, write_recommendations};
    use crate::itemizer::Itemizer;
    use crate::rule::Rule;
    use std::io::Cursor;

    fn rule(
        itemizer: &mut Itemizer,
        antecedent: &[&str],
        consequent: &[&str],
        confidence: f64,
    ) -> Rule {
        Rule {
            antecedent: itemizer.itemset_of(antecedent),
            consequent: itemizer.itemset_of(consequent),
            confidence,
        }
    }

    #[test]
    fn test_recommend() {
        let mut itemizer = Itemizer::new();
        let rules = vec![
            rule(&mut itemizer, &["a"], &["b"], 0.5),
            rule(&mut itemizer, &["a", "c"], &["b", "d"], 0.75),
            rule(&mut itemizer, &["c"], &["a"], 0.9),
            rule(&mut itemizer, &["e"], &["f"], 1.0),
        ];
        let owned = itemizer.itemset_of(&["a", "c"]);
        let recommendations = recommend(&owned, &rules);

        // "a" is already held and "e" isn't, so only b and d are recommended.
        assert_eq!(recommendations.len(), 2);
        assert_eq!(recommendations[0].item, itemizer.get("b").unwrap());
        assert_eq!(recommendations[0].confidence, 0.75);
        assert_eq!(recommendations[0].reason, itemizer.itemset_of(&["a", "c"]));
        assert_eq!(recommendations[1].item, itemizer.get("d").unwrap());

        let mut output: Vec<u8> = vec![];
        write_recommendations(&mut output, "u1", &recommendations, &itemizer).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "u1,b:0.75:a&c|d:0.75:a&c\n"
        );
    }

    #[test]
    fn test_no_matching_rules() {
        let mut itemizer = Itemizer::new();
        let rules = vec![rule(&mut itemizer, &["a"], &["b"], 0.5)];
        let owned = itemizer.itemset_of(&["z"]);
        let recommendations = recommend(&owned, &rules);
        assert!(recommendations.is_empty());

        let mut output: Vec<u8> = vec![];
        write_recommendations(&mut output, "u2", &recommendations, &itemizer).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "u2,\n");
    }

    #[test]
    fn test_read_users() {
        let mut itemizer = Itemizer::new();
        let ab = itemizer.itemset_of(&["a", "b"]);
        let c = itemizer.itemset_of(&["c"]);
        let input = "u1,a|b\n\nu2,c|unseen\nu3,\n";
        let users = read_users(Cursor::new(input), &itemizer).unwrap();
        assert_eq!(users.len(), 3);
        assert_eq!(users[0].0, "u1");
        assert_eq!(users[0].1, ab);
        assert_eq!(users[1].1, c);
        assert!(users[2].1.is_empty());
        assert_eq!(itemizer.get("unseen"), None);

        assert!(read_users(Cursor::new("u4\n"), &itemizer).is_err());
    }
}
