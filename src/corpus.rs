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
use std::io;

/// A multiset of transactions. Identical transactions share one entry
/// carrying the number of times they were observed.
pub struct Corpus {
    transactions: Vec<(ItemSet, u32)>,
    position: FnvHashMap<ItemSet, usize>,
    num_transactions: u64,
}

impl Corpus {
    pub fn new() -> Corpus {
        Corpus {
            transactions: vec![],
            position: FnvHashMap::default(),
            num_transactions: 0,
        }
    }

    pub fn from_reader<I>(reader: I) -> io::Result<Corpus>
    where
        I: IntoIterator<Item = io::Result<ItemSet>>,
    {
        let mut corpus = Corpus::new();
        for transaction in reader {
            corpus.add(transaction?);
        }
        Ok(corpus)
    }

    pub fn add(&mut self, transaction: ItemSet) {
        self.add_weighted(transaction, 1);
    }

    pub fn add_weighted(&mut self, transaction: ItemSet, count: u32) {
        if count == 0 {
            return;
        }
        self.num_transactions += count as u64;
        if let Some(&index) = self.position.get(&transaction) {
            self.transactions[index].1 += count;
            return;
        }
        self.position
            .insert(transaction.clone(), self.transactions.len());
        self.transactions.push((transaction, count));
    }

    /// Distinct transactions with their occurrence counts, in the order
    /// they were first added.
    pub fn iter<'a>(&'a self) -> impl Iterator<Item = (&'a ItemSet, u32)> + Clone + 'a {
        self.transactions.iter().map(|(t, count)| (t, *count))
    }

    // Number of distinct transactions.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    // Number of transactions, counting repeats.
    pub fn num_transactions(&self) -> u64 {
        self.num_transactions
    }
}
