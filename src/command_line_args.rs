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

use crate::generate_rules::MissingSupportPolicy;
use crate::miner::{Algorithm, MiningOptions};
use std::env;
use std::io;
use std::process;

use argparse::{ArgumentParser, Store, StoreOption, StoreTrue};

pub struct Arguments {
    pub input_file_path: Option<String>,
    pub support_index_path: Option<String>,
    pub rules_path: Option<String>,
    pub output_itemsets_path: String,
    pub output_rules_path: String,
    pub min_support: Option<u32>,
    pub min_confidence: Option<f64>,
    pub algorithm: Algorithm,
    pub max_itemset_size: Option<usize>,
    pub itemsets_only: bool,
    pub strict: bool,
    pub users_path: Option<String>,
    pub output_recommendations_path: String,
}

impl Arguments {
    // Only meaningful once validated with --input, which requires --min-support.
    pub fn mining_options(&self) -> MiningOptions {
        MiningOptions {
            min_support: self.min_support.unwrap_or(1),
            algorithm: self.algorithm,
            max_itemset_size: self.max_itemset_size,
        }
    }

    pub fn missing_support_policy(&self) -> MissingSupportPolicy {
        if self.strict {
            MissingSupportPolicy::Fail
        } else {
            MissingSupportPolicy::Skip
        }
    }

    /// Options that were given but have no effect in the selected mode.
    pub fn ignored_options(&self) -> Vec<&'static str> {
        let mut ignored = vec![];
        let mines = self.input_file_path.is_some();
        let makes_rules = self.rules_path.is_none() && !self.itemsets_only;
        if !mines && self.min_support.is_some() {
            ignored.push("--min-support");
        }
        if !mines && self.max_itemset_size.is_some() {
            ignored.push("--max-itemset-size");
        }
        if !makes_rules && self.min_confidence.is_some() {
            ignored.push("--min-confidence");
        }
        if self.rules_path.is_some() && self.strict {
            ignored.push("--strict");
        }
        ignored
    }
}

// Returns a message describing the first invalid argument.
fn validate(args: &Arguments) -> Result<(), String> {
    let sources = [
        &args.input_file_path,
        &args.support_index_path,
        &args.rules_path,
    ]
    .iter()
    .filter(|path| path.is_some())
    .count();
    if sources != 1 {
        return Err("Exactly one of --input, --support-index or --rules is required".to_owned());
    }
    if args.rules_path.is_some() && args.users_path.is_none() {
        return Err("--rules is only used to recommend, so needs --users".to_owned());
    }
    if args.input_file_path.is_some() && args.min_support.is_none() {
        return Err("--min-support is required to mine --input".to_owned());
    }
    let makes_rules = args.rules_path.is_none() && !args.itemsets_only;
    if makes_rules && args.min_confidence.is_none() {
        return Err("--min-confidence is required to generate rules".to_owned());
    }
    if let Some(min_confidence) = args.min_confidence {
        // Rejects NaN too.
        if !(0.0..=1.0).contains(&min_confidence) {
            return Err("Minimum rule confidence threshold must be in range [0,1]".to_owned());
        }
    }
    if args.max_itemset_size == Some(0) {
        return Err("Maximum itemset size must be at least 1".to_owned());
    }
    if args.users_path.is_some() && args.itemsets_only {
        return Err("--users needs rules, so can't be combined with --itemsets-only".to_owned());
    }
    Ok(())
}

pub fn parse_args_or_exit() -> Arguments {
    let mut args: Arguments = Arguments {
        input_file_path: None,
        support_index_path: None,
        rules_path: None,
        output_itemsets_path: String::from("out_large_itemsets.csv"),
        output_rules_path: String::from("out_recom_rules.csv"),
        min_support: None,
        min_confidence: None,
        algorithm: Algorithm::FpGrowth,
        max_itemset_size: None,
        itemsets_only: false,
        strict: false,
        users_path: None,
        output_recommendations_path: String::from("out_user_recom.txt"),
    };

    {
        let mut parser = ArgumentParser::new();
        parser.set_description("Frequent itemset and association rule miner.");

        parser
            .refer(&mut args.input_file_path)
            .add_option(
                &["--input"],
                StoreOption,
                "Input transactions, one per line, items separated by commas.",
            )
            .metavar("file_path");

        parser
            .refer(&mut args.support_index_path)
            .add_option(
                &["--support-index"],
                StoreOption,
                "Previously written itemsets file to generate rules from, \
                 instead of mining --input.",
            )
            .metavar("file_path");

        parser
            .refer(&mut args.rules_path)
            .add_option(
                &["--rules"],
                StoreOption,
                "Previously written rules file to recommend from, \
                 instead of mining --input.",
            )
            .metavar("file_path");

        parser
            .refer(&mut args.output_itemsets_path)
            .add_option(
                &["--output-itemsets"],
                Store,
                "File path in which to store frequent itemsets. \
                 Format: support, item, item, ...",
            )
            .metavar("file_path");

        parser
            .refer(&mut args.output_rules_path)
            .add_option(
                &["--output-rules"],
                Store,
                "File path in which to store rules. \
                 Format: confidence, antecedent, consequent.",
            )
            .metavar("file_path");

        parser
            .refer(&mut args.min_support)
            .add_option(
                &["--min-support"],
                StoreOption,
                "Minimum itemset support, as a count of transactions. \
                 Required with --input.",
            )
            .metavar("count");

        parser
            .refer(&mut args.min_confidence)
            .add_option(
                &["--min-confidence"],
                StoreOption,
                "Minimum rule confidence threshold, in range [0,1]. \
                 Required unless --itemsets-only or --rules.",
            )
            .metavar("threshold");

        parser
            .refer(&mut args.algorithm)
            .add_option(
                &["--algorithm"],
                Store,
                "Mining algorithm, apriori or fpgrowth. Default fpgrowth.",
            )
            .metavar("name");

        parser
            .refer(&mut args.max_itemset_size)
            .add_option(
                &["--max-itemset-size"],
                StoreOption,
                "Largest itemset to mine. Implies apriori.",
            )
            .metavar("size");

        parser.refer(&mut args.itemsets_only).add_option(
            &["--itemsets-only"],
            StoreTrue,
            "Only write frequent itemsets, don't generate rules.",
        );

        parser.refer(&mut args.strict).add_option(
            &["--strict"],
            StoreTrue,
            "Fail instead of skipping a rule whose antecedent has no support.",
        );

        parser
            .refer(&mut args.users_path)
            .add_option(
                &["--users"],
                StoreOption,
                "Users to recommend items to, one per line: uid,item|item|...",
            )
            .metavar("file_path");

        parser
            .refer(&mut args.output_recommendations_path)
            .add_option(
                &["--output-recommendations"],
                Store,
                "File path in which to store recommendations for --users.",
            )
            .metavar("file_path");

        if env::args().count() == 1 {
            // Nothing useful to do if stderr is gone.
            let _ = parser.print_help("Usage:", &mut io::stderr());
            process::exit(1);
        }

        if let Err(err) = parser.parse_args() {
            process::exit(err);
        }
    }

    if let Err(message) = validate(&args) {
        eprintln!("{}", message);
        process::exit(1);
    }

    args
}
