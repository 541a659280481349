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

//! Level-wise frequent itemset mining. Each generation of candidates of
//! size k+1 is joined from the itemsets of size k that were frequent, and
//! a candidate is only counted if all of its size k subsets were frequent.
//! Simple to audit, but candidate counts can blow up on wide item
//! universes; FPGrowth is the faster path for those.

use crate::corpus::Corpus;
use crate::counter::Counter;
use crate::index::SupportIndex;
use crate::itemset::ItemSet;
use fnv::FnvHashSet;
use std::cmp;
use tracing::debug;

/// Every distinct single item observed in the corpus.
pub fn seed(corpus: &Corpus) -> Vec<ItemSet> {
    let mut items = FnvHashSet::default();
    for (transaction, _) in corpus.iter() {
        items.extend(transaction.items().iter().cloned());
    }
    let mut seeds: Vec<ItemSet> = items.into_iter().map(ItemSet::singleton).collect();
    seeds.sort();
    seeds
}

/// Counts the transactions containing each candidate, weighted by
/// occurrence count, and keeps the candidates with count >= min_support.
/// Counts are only returned for the candidates that were kept.
pub fn count_and_filter(
    candidates: &[ItemSet],
    corpus: &Corpus,
    min_support: u32,
) -> (Vec<ItemSet>, SupportIndex) {
    let mut counter: Counter<ItemSet> = Counter::new();
    for (transaction, count) in corpus.iter() {
        for candidate in candidates {
            if candidate.is_subset_of(transaction) {
                counter.add(candidate, count);
            }
        }
    }

    let mut frequent = counter.items_with_count_at_least(min_support);
    frequent.sort();
    let mut counts = SupportIndex::new();
    for itemset in &frequent {
        counts.insert(itemset.clone(), counter.get(itemset));
    }
    (frequent, counts)
}

/// Unions pairs of the previous generation's frequent itemsets into
/// candidates of `target_size` items. A union is dropped unless every one
/// of its subsets of size `target_size - 1` is in `itemsets`.
pub fn join(itemsets: &[ItemSet], target_size: usize) -> Vec<ItemSet> {
    let previous: FnvHashSet<&ItemSet> = itemsets.iter().collect();
    let mut seen: FnvHashSet<ItemSet> = FnvHashSet::default();
    let mut candidates = vec![];
    for (i, a) in itemsets.iter().enumerate() {
        for b in &itemsets[i + 1..] {
            let candidate = a.union(b);
            if candidate.len() != target_size || seen.contains(&candidate) {
                continue;
            }
            let pruned = candidate
                .subsets_of_size(target_size - 1)
                .any(|subset| !previous.contains(&subset));
            if !pruned {
                candidates.push(candidate.clone());
            }
            seen.insert(candidate);
        }
    }
    candidates.sort();
    candidates
}

/// Mines every itemset with support >= min_support. When `max_size` is set
/// no itemset larger than it is generated.
pub fn apriori(corpus: &Corpus, min_support: u32, max_size: Option<usize>) -> SupportIndex {
    let min_support = cmp::max(min_support, 1);
    let mut index = SupportIndex::new();
    if max_size == Some(0) {
        return index;
    }

    let (mut frequent, counts) = count_and_filter(&seed(corpus), corpus, min_support);
    debug!(size = 1, frequent = frequent.len(), "apriori level");
    index.merge(counts);

    let mut size = 1;
    while !frequent.is_empty() {
        size += 1;
        if max_size.map_or(false, |max| size > max) {
            break;
        }
        let candidates = join(&frequent, size);
        let (survivors, counts) = count_and_filter(&candidates, corpus, min_support);
        debug!(
            size,
            candidates = candidates.len(),
            frequent = survivors.len(),
            "apriori level"
        );
        index.merge(counts);
        frequent = survivors;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::{apriori, count_and_filter, join, seed};
    use crate::corpus::Corpus;
    use crate::itemizer::Itemizer;

    fn corpus_of(itemizer: &mut Itemizer, transactions: &[&[&str]]) -> Corpus {
        let mut corpus = Corpus::new();
        for t in transactions {
            corpus.add(itemizer.itemset_of(t));
        }
        corpus
    }

    #[test]
    fn test_small_corpus() {
        let mut itemizer = Itemizer::new();
        let corpus = corpus_of(
            &mut itemizer,
            &[&["A", "B"], &["A", "B"], &["A", "C"], &["A"]],
        );
        let index = apriori(&corpus, 2, None);
        assert_eq!(index.len(), 3);
        assert_eq!(index.get(&itemizer.itemset_of(&["A"])), Some(4));
        assert_eq!(index.get(&itemizer.itemset_of(&["B"])), Some(2));
        assert_eq!(index.get(&itemizer.itemset_of(&["A", "B"])), Some(2));
        assert_eq!(index.get(&itemizer.itemset_of(&["C"])), None);
    }

    #[test]
    fn test_weighted_transactions() {
        let mut itemizer = Itemizer::new();
        let mut corpus = Corpus::new();
        corpus.add_weighted(itemizer.itemset_of(&["x", "y"]), 3);
        corpus.add(itemizer.itemset_of(&["y"]));
        let index = apriori(&corpus, 3, None);
        assert_eq!(index.get(&itemizer.itemset_of(&["x"])), Some(3));
        assert_eq!(index.get(&itemizer.itemset_of(&["y"])), Some(4));
        assert_eq!(index.get(&itemizer.itemset_of(&["x", "y"])), Some(3));
    }

    #[test]
    fn test_tid_dataset() {
        let mut itemizer = Itemizer::new();
        let corpus = corpus_of(
            &mut itemizer,
            &[
                &["a", "b", "c", "d", "e", "f"],
                &["g", "h", "i", "j", "k", "l"],
                &["z", "x"],
                &["z", "x"],
                &["z", "x", "y"],
                &["z", "x", "y", "i"],
            ],
        );
        let index = apriori(&corpus, 2, None);
        let expected: Vec<(&[&str], u32)> = vec![
            (&["i"][..], 2),
            (&["x"][..], 4),
            (&["y"][..], 2),
            (&["z"][..], 4),
            (&["x", "z"][..], 4),
            (&["x", "y"][..], 2),
            (&["y", "z"][..], 2),
            (&["x", "y", "z"][..], 2),
        ];
        assert_eq!(index.len(), expected.len());
        for (items, support) in expected {
            assert_eq!(index.get(&itemizer.itemset_of(items)), Some(support));
        }
    }

    #[test]
    fn test_seed_and_filter() {
        let mut itemizer = Itemizer::new();
        let corpus = corpus_of(&mut itemizer, &[&["a", "b"], &["b", "c"]]);
        let seeds = seed(&corpus);
        assert_eq!(seeds.len(), 3);

        let (frequent, counts) = count_and_filter(&seeds, &corpus, 2);
        assert_eq!(frequent, vec![itemizer.itemset_of(&["b"])]);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts.get(&itemizer.itemset_of(&["b"])), Some(2));
    }

    #[test]
    fn test_join_prunes_infrequent_subsets() {
        let mut itemizer = Itemizer::new();
        let level: Vec<_> = [&["a", "b"][..], &["a", "c"][..], &["b", "c"][..], &["b", "d"][..]]
            .iter()
            .map(|s| itemizer.itemset_of(s))
            .collect();
        // {a,b,d} and {b,c,d} lack {a,d} and {c,d}; only {a,b,c} survives.
        let candidates = join(&level, 3);
        assert_eq!(candidates, vec![itemizer.itemset_of(&["a", "b", "c"])]);

        // Unions of the wrong size are not candidates.
        assert!(join(&level, 4).is_empty());
    }

    #[test]
    fn test_max_size() {
        let mut itemizer = Itemizer::new();
        let corpus = corpus_of(&mut itemizer, &[&["a", "b", "c"], &["a", "b", "c"]]);
        assert_eq!(apriori(&corpus, 1, None).len(), 7);
        let capped = apriori(&corpus, 1, Some(2));
        assert_eq!(capped.len(), 6);
        assert_eq!(capped.max_itemset_len(), 2);
        assert!(apriori(&corpus, 1, Some(0)).is_empty());
    }

    #[test]
    fn test_empty_results() {
        assert!(apriori(&Corpus::new(), 1, None).is_empty());

        let mut itemizer = Itemizer::new();
        let corpus = corpus_of(&mut itemizer, &[&["a"], &["b"]]);
        assert!(apriori(&corpus, 3, None).is_empty());
    }
}
