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

mod apriori;
mod command_line_args;
mod corpus;
mod counter;
mod error;
mod fptree;
mod generate_rules;
mod index;
mod item;
mod item_counter;
mod itemizer;
mod itemset;
mod miner;
mod output;
mod recommend;
mod rule;
mod transaction_reader;
mod vec_sets;

use command_line_args::{parse_args_or_exit, Arguments};
use corpus::Corpus;
use error::Result;
use generate_rules::generate_rules;
use index::SupportIndex;
use itemizer::Itemizer;
use rule::Rule;
use transaction_reader::TransactionReader;

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::process;
use std::time::Instant;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

fn mine_input(input: &str, args: &Arguments, itemizer: &mut Itemizer) -> Result<SupportIndex> {
    info!("Mining data set: {}", input);
    let timer = Instant::now();
    let corpus = Corpus::from_reader(TransactionReader::open(input, itemizer)?)?;
    info!(
        "Loaded {} transactions ({} distinct, {} items) in {:.3} seconds.",
        corpus.num_transactions(),
        corpus.len(),
        itemizer.len(),
        timer.elapsed().as_secs_f64()
    );

    let options = args.mining_options();
    let timer = Instant::now();
    let index = miner::mine(&corpus, &options);
    info!(
        "{} generated {} frequent itemsets in {:.3} seconds.",
        options.algorithm,
        index.len(),
        timer.elapsed().as_secs_f64()
    );
    if index.is_empty() {
        info!("No itemset meets minimum support of {}.", options.min_support);
    } else {
        info!("Largest frequent itemset has {} items.", index.max_itemset_len());
    }

    let mut writer = BufWriter::new(File::create(&args.output_itemsets_path)?);
    output::write_itemsets(&mut writer, &index, itemizer)?;
    writer.flush()?;
    info!("Wrote itemsets to {}", args.output_itemsets_path);
    Ok(index)
}

fn load_support_index(path: &str, itemizer: &mut Itemizer) -> Result<SupportIndex> {
    info!("Loading frequent itemsets from {}", path);
    let index = output::read_support_index(BufReader::new(File::open(path)?), itemizer)?;
    info!("Loaded {} frequent itemsets.", index.len());
    Ok(index)
}

fn recommend_users(
    users_path: &str,
    args: &Arguments,
    rules: &[Rule],
    itemizer: &Itemizer,
) -> Result<()> {
    let timer = Instant::now();
    let users = recommend::read_users(BufReader::new(File::open(users_path)?), itemizer)?;
    let mut writer = BufWriter::new(File::create(&args.output_recommendations_path)?);
    for (uid, owned) in &users {
        let recommendations = recommend::recommend(owned, rules);
        recommend::write_recommendations(&mut writer, uid, &recommendations, itemizer)?;
    }
    writer.flush()?;
    info!(
        "Wrote recommendations for {} users to {} in {:.3} seconds.",
        users.len(),
        args.output_recommendations_path,
        timer.elapsed().as_secs_f64()
    );
    Ok(())
}

fn recommend_from_rules(rules_path: &str, users_path: &str, args: &Arguments) -> Result<()> {
    info!("Loading rules from {}", rules_path);
    let mut itemizer = Itemizer::new();
    let rules = output::read_rules(BufReader::new(File::open(rules_path)?), &mut itemizer)?;
    info!("Loaded {} rules.", rules.len());
    recommend_users(users_path, args, &rules, &itemizer)
}

fn run(args: &Arguments) -> Result<()> {
    let start = Instant::now();
    for option in args.ignored_options() {
        info!("{} has no effect in this mode, ignoring it.", option);
    }
    if let (Some(rules_path), Some(users_path)) = (&args.rules_path, &args.users_path) {
        recommend_from_rules(rules_path, users_path, args)?;
        info!("Total runtime: {:.3} seconds", start.elapsed().as_secs_f64());
        return Ok(());
    }

    let mut itemizer = Itemizer::new();

    let index = match (&args.input_file_path, &args.support_index_path) {
        (Some(input), _) => mine_input(input, args, &mut itemizer)?,
        (None, Some(path)) => load_support_index(path, &mut itemizer)?,
        (None, None) => {
            return Err(error::MiningError::InvalidArgument(
                "no input transactions or support index".to_owned(),
            ))
        }
    };

    if args.itemsets_only {
        info!("Total runtime: {:.3} seconds", start.elapsed().as_secs_f64());
        return Ok(());
    }

    info!("Generating rules...");
    let timer = Instant::now();
    let min_confidence = args.min_confidence.unwrap_or(0.0);
    let rules = generate_rules(&index, min_confidence, args.missing_support_policy())?;
    info!(
        "Generated {} rules in {:.3} seconds.",
        rules.len(),
        timer.elapsed().as_secs_f64()
    );
    for rule in rules.iter().rev().take(10) {
        debug!("{} confidence={}", rule.to_string(&itemizer), rule.confidence);
    }
    {
        let mut writer = BufWriter::new(File::create(&args.output_rules_path)?);
        output::write_rules(&mut writer, &rules, &itemizer)?;
        writer.flush()?;
    }
    info!("Wrote rules to {}", args.output_rules_path);

    if let Some(ref users_path) = args.users_path {
        recommend_users(users_path, args, &rules, &itemizer)?;
    }

    info!("Total runtime: {:.3} seconds", start.elapsed().as_secs_f64());
    Ok(())
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let arguments = parse_args_or_exit();

    if let Err(err) = run(&arguments) {
        error!("{}", err);
        process::exit(1);
    }
}
