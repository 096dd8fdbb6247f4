// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categorizer::ModelCache;
use crate::models::Category;
use crate::store::Store;
use anyhow::Result;

/// One guess per `--text`, all from a single model fitted on the owner's expenses.
pub fn predictions(
    store: &Store,
    owner: &str,
    cache: &mut ModelCache,
    m: &clap::ArgMatches,
) -> Result<Vec<(String, Option<Category>)>> {
    let records = store.expenses(owner)?;
    let mut out = Vec::new();
    for text in m.get_many::<String>("text").into_iter().flatten() {
        let guess = cache.get_or_fit(&records).predict(text);
        out.push((text.clone(), guess));
    }
    Ok(out)
}

pub fn handle(store: &Store, owner: &str, m: &clap::ArgMatches) -> Result<()> {
    let mut cache = ModelCache::new();
    for (text, guess) in predictions(store, owner, &mut cache, m)? {
        match guess {
            Some(cat) => println!("{}: Predicted Category: {}", text, cat),
            None => {
                println!("No expenses recorded yet; add some before asking for a guess.");
                break;
            }
        }
    }
    Ok(())
}
