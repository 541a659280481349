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

use crate::item::Item;
use crate::vec_sets::{difference, is_subset, union};
use itertools::Itertools;
use std::cmp;

/// An unordered, duplicate free set of items. The items are kept sorted by
/// id so that two sets holding the same items compare and hash equal.
#[derive(Clone, Hash, PartialEq, Eq, Debug)]
pub struct ItemSet {
    items: Vec<Item>,
}

impl Ord for ItemSet {
    fn cmp(&self, other: &ItemSet) -> cmp::Ordering {
        self.len()
            .cmp(&other.len())
            .then_with(|| self.items.cmp(&other.items))
    }
}

impl PartialOrd for ItemSet {
    fn partial_cmp(&self, other: &ItemSet) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl ItemSet {
    pub fn new(items: Vec<Item>) -> ItemSet {
        let mut items = items;
        items.sort();
        items.dedup();
        ItemSet { items }
    }

    // Caller guarantees items are sorted and unique.
    fn from_sorted(items: Vec<Item>) -> ItemSet {
        debug_assert!(items.windows(2).all(|w| w[0] < w[1]));
        ItemSet { items }
    }

    pub fn singleton(item: Item) -> ItemSet {
        ItemSet { items: vec![item] }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, item: Item) -> bool {
        self.items.binary_search(&item).is_ok()
    }

    pub fn is_subset_of(&self, other: &ItemSet) -> bool {
        is_subset(&self.items, &other.items)
    }

    pub fn union(&self, other: &ItemSet) -> ItemSet {
        ItemSet::from_sorted(union(&self.items, &other.items))
    }

    pub fn difference(&self, other: &ItemSet) -> ItemSet {
        ItemSet::from_sorted(difference(&self.items, &other.items))
    }

    pub fn with_item(&self, item: Item) -> ItemSet {
        ItemSet::from_sorted(union(&self.items, &[item]))
    }

    pub fn subsets_of_size<'a>(&'a self, size: usize) -> impl Iterator<Item = ItemSet> + 'a {
        self.items
            .iter()
            .cloned()
            .combinations(size)
            .map(ItemSet::from_sorted)
    }

    /// Every subset other than the empty set and the set itself, smallest
    /// first. A set of k items has 2^k - 2 of them.
    pub fn proper_subsets<'a>(&'a self) -> impl Iterator<Item = ItemSet> + 'a {
        (1..self.len()).flat_map(move |size| self.subsets_of_size(size))
    }
}
