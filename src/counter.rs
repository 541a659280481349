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

use fnv::FnvHashMap;
use std::cmp;
use std::hash::Hash;

pub struct Counter<T> {
    counter: FnvHashMap<T, u32>,
}

impl<T> Counter<T>
where
    T: cmp::Eq,
    T: Hash,
    T: Clone,
{
    pub fn new() -> Counter<T> {
        Counter {
            counter: FnvHashMap::default(),
        }
    }
    pub fn add(&mut self, item: &T, count: u32) {
        if let Some(total) = self.counter.get_mut(item) {
            *total += count;
            return;
        }
        self.counter.insert(item.clone(), count);
    }
    pub fn get(&self, item: &T) -> u32 {
        match self.counter.get(item) {
            Some(count) => *count,
            None => 0,
        }
    }
    // Order is unspecified.
    pub fn items_with_count_at_least(&self, min_count: u32) -> Vec<T> {
        self.counter
            .iter()
            .filter(|&(_, &count)| count >= min_count)
            .map(|(item, _)| item.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Counter;

    #[test]
    fn test_counter() {
        let mut counter: Counter<String> = Counter::new();
        counter.add(&"x".to_owned(), 2);
        counter.add(&"y".to_owned(), 1);
        counter.add(&"x".to_owned(), 3);
        assert_eq!(counter.get(&"x".to_owned()), 5);
        assert_eq!(counter.get(&"z".to_owned()), 0);

        let mut frequent = counter.items_with_count_at_least(1);
        frequent.sort();
        assert_eq!(frequent, vec!["x".to_owned(), "y".to_owned()]);
        assert_eq!(counter.items_with_count_at_least(5), vec!["x".to_owned()]);
        assert!(counter.items_with_count_at_least(6).is_empty());
    }
}
