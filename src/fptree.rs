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

use crate::corpus::Corpus;
use crate::index::SupportIndex;
use crate::item::Item;
use crate::item_counter::ItemCounter;
use crate::itemset::ItemSet;
use fnv::FnvHashMap;
use std::cmp;
use std::collections::hash_map::Entry;
use tracing::debug;

// Nodes live in the tree's arena and refer to each other by index.
#[derive(Debug)]
struct FPNode {
    item: Item,
    count: u32,
    parent: Option<usize>,
    children: FnvHashMap<Item, usize>,
    // Next node in the tree holding the same item.
    next: Option<usize>,
}

impl FPNode {
    fn new(item: Item, count: u32, parent: Option<usize>) -> FPNode {
        FPNode {
            item,
            count,
            parent,
            children: FnvHashMap::default(),
            next: None,
        }
    }

    fn is_root(&self) -> bool {
        self.item.is_null()
    }
}

// Total count of an item in the tree, and the ends of its node chain.
#[derive(Debug)]
struct HeaderEntry {
    count: u32,
    head: usize,
    tail: usize,
}

static ROOT: usize = 0;

pub struct FPTree {
    nodes: Vec<FPNode>,
    header: FnvHashMap<Item, HeaderEntry>,
    // Frequent items, most frequent first.
    order: Vec<Item>,
}

impl FPTree {
    /// Builds a tree from weighted transactions, keeping only items whose
    /// total weight is at least `min_support`. Returns None when no item
    /// is frequent; there is then nothing to mine.
    pub fn build<'a, I>(transactions: I, min_support: u32) -> Option<FPTree>
    where
        I: IntoIterator<Item = (&'a ItemSet, u32)>,
        I::IntoIter: Clone,
    {
        let min_support = cmp::max(min_support, 1);
        let transactions = transactions.into_iter();

        // First pass counts item frequencies, so that the second pass can
        // insert each transaction with its items sorted by frequency.
        let mut item_count = ItemCounter::new();
        for (transaction, count) in transactions.clone() {
            for item in transaction.items() {
                item_count.add(item, count);
            }
        }
        let mut order = item_count.items_with_count_at_least(min_support);
        if order.is_empty() {
            return None;
        }
        item_count.sort_descending(&mut order);
        let rank: FnvHashMap<Item, usize> = order
            .iter()
            .enumerate()
            .map(|(rank, &item)| (item, rank))
            .collect();

        let mut tree = FPTree {
            nodes: vec![FPNode::new(Item::null(), 1, None)],
            header: FnvHashMap::default(),
            order,
        };
        let mut path: Vec<Item> = vec![];
        for (transaction, count) in transactions {
            path.clear();
            path.extend(
                transaction
                    .items()
                    .iter()
                    .filter(|&item| rank.contains_key(item)),
            );
            if path.is_empty() {
                continue;
            }
            path.sort_by_key(|item| rank[item]);
            tree.insert(&path, count);
        }
        Some(tree)
    }

    fn add_node(&mut self, parent: usize, item: Item) -> usize {
        let id = self.nodes.len();
        self.nodes.push(FPNode::new(item, 0, Some(parent)));
        self.nodes[parent].children.insert(item, id);
        // Thread the new node onto the end of its item's chain.
        match self.header.entry(item) {
            Entry::Occupied(mut entry) => {
                let tail = entry.get().tail;
                self.nodes[tail].next = Some(id);
                entry.get_mut().tail = id;
            }
            Entry::Vacant(entry) => {
                entry.insert(HeaderEntry {
                    count: 0,
                    head: id,
                    tail: id,
                });
            }
        }
        id
    }

    fn insert_child(&mut self, id: usize, item: Item, count: u32) -> usize {
        let existing = self.nodes[id].children.get(&item).cloned();
        let child_id = match existing {
            Some(child_id) => child_id,
            None => self.add_node(id, item),
        };
        self.nodes[child_id].count += count;
        child_id
    }

    // Items must already be in tree order.
    fn insert(&mut self, transaction: &[Item], count: u32) {
        // Start iterating at the root node.
        let mut id = ROOT;
        for &item in transaction {
            id = self.insert_child(id, item, count);
            if let Some(entry) = self.header.get_mut(&item) {
                entry.count += count;
            }
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn items(&self) -> &[Item] {
        &self.order
    }

    pub fn item_count(&self, item: Item) -> u32 {
        self.header.get(&item).map_or(0, |entry| entry.count)
    }

    fn path_from_root_to_excluding(&self, node_id: usize) -> Vec<Item> {
        let mut path = vec![];
        let mut parent = self.nodes[node_id].parent;
        while let Some(id) = parent {
            let node = &self.nodes[id];
            if node.is_root() {
                break;
            }
            path.push(node.item);
            parent = node.parent;
        }
        path.reverse();
        path
    }

    /// Walks the chain of nodes holding `item` and collects the path of
    /// ancestors above each, weighted by that node's count. Also returns the
    /// item's total count over the chain.
    pub fn conditional_pattern_base(&self, item: Item) -> (FnvHashMap<ItemSet, u32>, u32) {
        let mut paths: FnvHashMap<ItemSet, u32> = FnvHashMap::default();
        let mut total = 0;
        let mut next = self.header.get(&item).map(|entry| entry.head);
        while let Some(id) = next {
            let node = &self.nodes[id];
            let path = self.path_from_root_to_excluding(id);
            if !path.is_empty() {
                *paths.entry(ItemSet::new(path)).or_insert(0) += node.count;
            }
            total += node.count;
            next = node.next;
        }
        debug_assert_eq!(total, self.item_count(item));
        (paths, total)
    }
}

/// Mines every itemset with support >= min_support from the tree. A None
/// tree, i.e. one in which nothing was frequent, yields an empty index.
pub fn fp_growth(fptree: Option<&FPTree>, min_support: u32) -> SupportIndex {
    let mut index = SupportIndex::new();
    let fptree = match fptree {
        Some(fptree) => fptree,
        None => return index,
    };

    for &item in fptree.items() {
        let (pattern_base, item_count) = fptree.conditional_pattern_base(item);
        index.add(ItemSet::singleton(item), item_count);

        // Every frequent itemset in the conditional tree is frequent
        // together with this item, with the same count.
        let conditional_tree = FPTree::build(
            pattern_base.iter().map(|(path, &count)| (path, count)),
            min_support,
        );
        for (itemset, count) in fp_growth(conditional_tree.as_ref(), min_support) {
            index.add(itemset.with_item(item), count);
        }
    }
    index
}

pub fn mine(corpus: &Corpus, min_support: u32) -> SupportIndex {
    let fptree = FPTree::build(corpus.iter(), min_support);
    if let Some(ref fptree) = fptree {
        debug!(
            nodes = fptree.num_nodes(),
            items = fptree.items().len(),
            "built fptree"
        );
    }
    fp_growth(fptree.as_ref(), min_support)
}

#[cfg(test)]
impl FPTree {
    // Root to leaf paths with the leaf's count.
    fn leaf_paths(&self) -> Vec<(Vec<Item>, u32)> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|&(_, node)| node.children.is_empty() && !node.is_root())
            .map(|(id, node)| {
                let mut path = self.path_from_root_to_excluding(id);
                path.push(node.item);
                (path, node.count)
            })
            .collect()
    }

    fn chain(&self, item: Item) -> Vec<usize> {
        let mut ids = vec![];
        let mut next = self.header.get(&item).map(|entry| entry.head);
        while let Some(id) = next {
            ids.push(id);
            next = self.nodes[id].next;
        }
        ids
    }
}
