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
use fnv::FnvHashMap;

/// Maps each frequent itemset to the number of transactions containing it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SupportIndex {
    supports: FnvHashMap<ItemSet, u32>,
}

impl SupportIndex {
    pub fn new() -> SupportIndex {
        SupportIndex {
            supports: FnvHashMap::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.supports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.supports.is_empty()
    }

    pub fn get(&self, itemset: &ItemSet) -> Option<u32> {
        self.supports.get(itemset).cloned()
    }

    pub fn insert(&mut self, itemset: ItemSet, support: u32) {
        self.supports.insert(itemset, support);
    }

    // Accumulates onto any count already recorded for the itemset.
    pub fn add(&mut self, itemset: ItemSet, support: u32) {
        *self.supports.entry(itemset).or_insert(0) += support;
    }

    pub fn merge(&mut self, other: SupportIndex) {
        for (itemset, support) in other {
            self.add(itemset, support);
        }
    }

    pub fn iter<'a>(&'a self) -> impl Iterator<Item = (&'a ItemSet, u32)> + 'a {
        self.supports.iter().map(|(itemset, support)| (itemset, *support))
    }

    /// Ascending by support; equal supports in itemset order.
    pub fn sorted_by_support(&self) -> Vec<(&ItemSet, u32)> {
        let mut sorted: Vec<(&ItemSet, u32)> = self.iter().collect();
        sorted.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
        sorted
    }

    pub fn max_itemset_len(&self) -> usize {
        self.supports.keys().map(|s| s.len()).max().unwrap_or(0)
    }
}

impl IntoIterator for SupportIndex {
    type Item = (ItemSet, u32);
    type IntoIter = ::std::collections::hash_map::IntoIter<ItemSet, u32>;
    fn into_iter(self) -> Self::IntoIter {
        self.supports.into_iter()
    }
}
