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

//! Text formats for mined itemsets and rules.
//!
//! Itemsets, one per line, ascending by support:
//!     <support>,<item>,<item>,...
//! Rules, one per line, ascending by confidence:
//!     <confidence>,<antecedent items joined by '|'>,<consequent items joined by '|'>
//!
//! Items are written unescaped, so an item containing a separator of the
//! file it goes to can't be read back and is refused on write.

use crate::error::{MiningError, Result};
use crate::index::SupportIndex;
use crate::item::Item;
use crate::itemizer::Itemizer;
use crate::itemset::ItemSet;
use crate::rule::Rule;
use itertools::Itertools;
use ordered_float::OrderedFloat;
use std::io::{self, BufRead, Write};

// Fails if an item name contains ',' or `separator`.
fn joined(itemset: &ItemSet, itemizer: &Itemizer, separator: &str) -> Result<String> {
    let names = Item::item_names(itemset.items(), itemizer);
    if let Some(name) = names
        .iter()
        .find(|name| name.contains(',') || name.contains(separator))
    {
        return Err(MiningError::InvalidArgument(format!(
            "item '{}' contains a field separator and can't be written",
            name
        )));
    }
    Ok(names.iter().join(separator))
}

pub fn write_itemsets<W: Write>(
    output: &mut W,
    index: &SupportIndex,
    itemizer: &Itemizer,
) -> Result<()> {
    for (itemset, support) in index.sorted_by_support() {
        writeln!(output, "{},{}", support, joined(itemset, itemizer, ",")?)?;
    }
    Ok(())
}

pub fn write_rules<W: Write>(output: &mut W, rules: &[Rule], itemizer: &Itemizer) -> Result<()> {
    let mut sorted: Vec<&Rule> = rules.iter().collect();
    sorted.sort_by_key(|rule| OrderedFloat(rule.confidence));
    for rule in sorted {
        writeln!(
            output,
            "{},{},{}",
            rule.confidence,
            joined(&rule.antecedent, itemizer, "|")?,
            joined(&rule.consequent, itemizer, "|")?
        )?;
    }
    Ok(())
}

// Yields (line number, line) for each non-blank line, line endings removed.
fn numbered_lines<R: BufRead>(input: R) -> impl Iterator<Item = (usize, io::Result<String>)> {
    input
        .lines()
        .enumerate()
        .map(|(i, line)| {
            let line = line.map(|l| l.trim_end_matches('\r').to_owned());
            (i + 1, line)
        })
        .filter(|(_, line)| match line {
            Ok(l) => !l.is_empty(),
            Err(_) => true,
        })
}

fn parse_error(line: usize, message: String) -> MiningError {
    MiningError::Parse { line, message }
}

/// Reads a support index back from the itemset format, so rules can be
/// generated without mining again.
pub fn read_support_index<R: BufRead>(input: R, itemizer: &mut Itemizer) -> Result<SupportIndex> {
    let mut index = SupportIndex::new();
    for (number, line) in numbered_lines(input) {
        let line = line?;
        let mut fields = line.split(',');
        let support = fields.next().unwrap_or("");
        let support: u32 = support
            .parse()
            .map_err(|_| parse_error(number, format!("invalid support count '{}'", support)))?;
        if support == 0 {
            return Err(parse_error(number, "support count must be positive".to_owned()));
        }
        let items: Vec<Item> = fields.map(|item| itemizer.id_of(item)).collect();
        if items.is_empty() {
            return Err(parse_error(number, "itemset has no items".to_owned()));
        }
        index.insert(ItemSet::new(items), support);
    }
    Ok(index)
}

pub fn read_rules<R: BufRead>(input: R, itemizer: &mut Itemizer) -> Result<Vec<Rule>> {
    let mut rules = vec![];
    for (number, line) in numbered_lines(input) {
        let line = line?;
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != 3 {
            return Err(parse_error(
                number,
                format!("expected 3 fields, found {}", fields.len()),
            ));
        }
        let confidence: f64 = fields[0]
            .parse()
            .map_err(|_| parse_error(number, format!("invalid confidence '{}'", fields[0])))?;
        let mut itemset_of = |field: &str| {
            ItemSet::new(field.split('|').map(|item| itemizer.id_of(item)).collect())
        };
        let antecedent = itemset_of(fields[1]);
        let consequent = itemset_of(fields[2]);
        rules.push(Rule {
            antecedent,
            consequent,
            confidence,
        });
    }
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::{read_rules, read_support_index, write_itemsets, write_rules};
    use crate::error::MiningError;
    use crate::generate_rules::{generate_rules, MissingSupportPolicy};
    use crate::index::SupportIndex;
    use crate::itemizer::Itemizer;
    use std::io::Cursor;

    fn small_index(itemizer: &mut Itemizer) -> SupportIndex {
        let mut index = SupportIndex::new();
        index.insert(itemizer.itemset_of(&["A"]), 4);
        index.insert(itemizer.itemset_of(&["B"]), 2);
        index.insert(itemizer.itemset_of(&["A", "B"]), 2);
        index
    }

    #[test]
    fn test_write_itemsets() {
        let mut itemizer = Itemizer::new();
        let index = small_index(&mut itemizer);
        let mut output: Vec<u8> = vec![];
        write_itemsets(&mut output, &index, &itemizer).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "2,B\n2,A,B\n4,A\n");
    }

    #[test]
    fn test_write_rules() {
        let mut itemizer = Itemizer::new();
        let index = small_index(&mut itemizer);
        let rules = generate_rules(&index, 0.0, MissingSupportPolicy::Fail).unwrap();
        let mut output: Vec<u8> = vec![];
        write_rules(&mut output, &rules, &itemizer).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "0.5,A,B\n1,B,A\n");
    }

    #[test]
    fn test_separators_in_item_names_are_refused() {
        let mut itemizer = Itemizer::new();
        let mut index = SupportIndex::new();
        index.insert(itemizer.itemset_of(&["x,y"]), 2);
        let mut output: Vec<u8> = vec![];
        match write_itemsets(&mut output, &index, &itemizer) {
            Err(MiningError::InvalidArgument(_)) => {}
            other => panic!("unexpected result {:?}", other),
        }

        // '|' is only a separator in the rules file.
        let mut index = SupportIndex::new();
        index.insert(itemizer.itemset_of(&["p|q"]), 2);
        index.insert(itemizer.itemset_of(&["r"]), 2);
        index.insert(itemizer.itemset_of(&["p|q", "r"]), 2);
        let mut output: Vec<u8> = vec![];
        write_itemsets(&mut output, &index, &itemizer).unwrap();
        let rules = generate_rules(&index, 0.0, MissingSupportPolicy::Fail).unwrap();
        let mut output: Vec<u8> = vec![];
        match write_rules(&mut output, &rules, &itemizer) {
            Err(MiningError::InvalidArgument(_)) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_reload_support_index() {
        let mut itemizer = Itemizer::new();
        let index = small_index(&mut itemizer);
        let mut output: Vec<u8> = vec![];
        write_itemsets(&mut output, &index, &itemizer).unwrap();

        let mut reloaded_itemizer = Itemizer::new();
        let reloaded = read_support_index(Cursor::new(output), &mut reloaded_itemizer).unwrap();
        assert_eq!(reloaded.len(), 3);
        assert_eq!(
            reloaded.get(&reloaded_itemizer.itemset_of(&["A", "B"])),
            Some(2)
        );
        assert_eq!(reloaded.get(&reloaded_itemizer.itemset_of(&["A"])), Some(4));
    }

    #[test]
    fn test_read_support_index_errors() {
        let mut itemizer = Itemizer::new();
        match read_support_index(Cursor::new("3,a\n\nx,b\n"), &mut itemizer) {
            Err(MiningError::Parse { line, .. }) => assert_eq!(line, 3),
            other => panic!("unexpected result {:?}", other),
        }
        match read_support_index(Cursor::new("3\n"), &mut itemizer) {
            Err(MiningError::Parse { line, .. }) => assert_eq!(line, 1),
            other => panic!("unexpected result {:?}", other),
        }
        assert!(read_support_index(Cursor::new(""), &mut itemizer)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_read_rules() {
        let mut itemizer = Itemizer::new();
        let rules = read_rules(Cursor::new("0.5,a|b,c\r\n1,c,a\n"), &mut itemizer).unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].antecedent, itemizer.itemset_of(&["b", "a"]));
        assert_eq!(rules[0].consequent, itemizer.itemset_of(&["c"]));
        assert_eq!(rules[0].confidence, 0.5);
        assert_eq!(rules[1].confidence, 1.0);

        assert!(read_rules(Cursor::new("0.5,a\n"), &mut itemizer).is_err());
        assert!(read_rules(Cursor::new("high,a,b\n"), &mut itemizer).is_err());
    }
}
