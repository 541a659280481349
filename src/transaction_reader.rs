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

use crate::itemizer::Itemizer;
use crate::itemset::ItemSet;
use std::fs::File;
use std::io;
use std::io::prelude::*;
use std::io::BufReader;

/// Reads one transaction per line, items separated by commas.
pub struct TransactionReader<'a, R> {
    reader: R,
    itemizer: &'a mut Itemizer,
    line: String,
}

impl<'a> TransactionReader<'a, BufReader<File>> {
    pub fn open(path: &str, itemizer: &'a mut Itemizer) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(TransactionReader::new(BufReader::new(file), itemizer))
    }
}

impl<'a, R: BufRead> TransactionReader<'a, R> {
    pub fn new(reader: R, itemizer: &'a mut Itemizer) -> Self {
        TransactionReader {
            reader,
            itemizer,
            line: String::new(),
        }
    }
}

// Surrounding whitespace and any trailing commas are dropped. Fields
// themselves are kept verbatim, so an empty field is an item too.
fn split_line(line: &str) -> Option<Vec<&str>> {
    let line = line.trim().trim_end_matches(',');
    if line.is_empty() {
        return None;
    }
    Some(line.split(',').collect())
}

impl<'a, R: BufRead> Iterator for TransactionReader<'a, R> {
    type Item = io::Result<ItemSet>;
    fn next(&mut self) -> Option<io::Result<ItemSet>> {
        loop {
            self.line.clear();
            match self.reader.read_line(&mut self.line) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(err) => return Some(Err(err)),
            }
            if let Some(fields) = split_line(&self.line) {
                let itemizer = &mut self.itemizer;
                let items = fields.iter().map(|s| itemizer.id_of(s)).collect();
                // Some input files have transactions with duplicate items;
                // ItemSet removes them.
                return Some(Ok(ItemSet::new(items)));
            }
        }
    }
}
