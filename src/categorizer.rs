// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Bag-of-words category guesser.
//!
//! Descriptions are lowercased and split into tokens of two or more word
//! characters; each fitted category gets a multinomial naive Bayes model with
//! add-one smoothing. Words never seen while fitting contribute nothing.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::models::{Category, Expense};

static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("static token regex"));

const ALPHA: f64 = 1.0;

pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TOKEN
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct Categorizer {
    vocabulary: BTreeMap<String, usize>,
    classes: Vec<Category>,
    log_priors: Vec<f64>,
    // [class][feature]
    feature_log_prob: Vec<Vec<f64>>,
}

impl Categorizer {
    pub fn fit<'a, I>(samples: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Category)>,
    {
        let docs: Vec<(Vec<String>, Category)> = samples
            .into_iter()
            .map(|(text, cat)| (tokenize(text), cat))
            .collect();

        let mut vocabulary = BTreeMap::new();
        for (tokens, _) in &docs {
            for t in tokens {
                let next = vocabulary.len();
                vocabulary.entry(t.clone()).or_insert(next);
            }
        }

        let mut per_class: BTreeMap<Category, (usize, Vec<f64>)> = BTreeMap::new();
        for (tokens, cat) in &docs {
            let (n_docs, counts) = per_class
                .entry(*cat)
                .or_insert_with(|| (0, vec![0.0; vocabulary.len()]));
            *n_docs += 1;
            for t in tokens {
                counts[vocabulary[t]] += 1.0;
            }
        }

        let total_docs = docs.len() as f64;
        let n_features = vocabulary.len() as f64;
        let mut classes = Vec::with_capacity(per_class.len());
        let mut log_priors = Vec::with_capacity(per_class.len());
        let mut feature_log_prob = Vec::with_capacity(per_class.len());
        for (cat, (n_docs, counts)) in per_class {
            let denom = counts.iter().sum::<f64>() + ALPHA * n_features;
            classes.push(cat);
            log_priors.push((n_docs as f64 / total_docs).ln());
            feature_log_prob.push(
                counts
                    .iter()
                    .map(|c| ((c + ALPHA) / denom).ln())
                    .collect(),
            );
        }
        debug!(
            documents = docs.len(),
            vocabulary = vocabulary.len(),
            classes = classes.len(),
            "categorizer fitted"
        );

        Categorizer {
            vocabulary,
            classes,
            log_priors,
            feature_log_prob,
        }
    }

    pub fn fit_expenses(records: &[Expense]) -> Self {
        Self::fit(records.iter().map(|e| (e.description.as_str(), e.category)))
    }

    /// Most likely category for `text`; `None` only when fitted on nothing.
    /// Ties go to the earliest category in declaration order.
    pub fn predict(&self, text: &str) -> Option<Category> {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for t in tokenize(text) {
            if let Some(&idx) = self.vocabulary.get(&t) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut best: Option<(Category, f64)> = None;
        for (k, cat) in self.classes.iter().enumerate() {
            let score = self.log_priors[k]
                + counts
                    .iter()
                    .map(|(idx, n)| n * self.feature_log_prob[k][*idx])
                    .sum::<f64>();
            match best {
                Some((_, s)) if s >= score => {}
                _ => best = Some((*cat, score)),
            }
        }
        best.map(|(c, _)| c)
    }

    pub fn classes(&self) -> &[Category] {
        &self.classes
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }
}

/// SHA-256 over the training pairs, in order.
pub fn fingerprint(records: &[Expense]) -> String {
    let mut h = Sha256::new();
    for e in records {
        h.update(e.description.as_bytes());
        h.update([0x1f]);
        h.update(e.category.as_str().as_bytes());
        h.update([0x1e]);
    }
    hex::encode(h.finalize())
}

/// Holds the last fitted model and refits only when the training set changes.
#[derive(Debug, Default)]
pub struct ModelCache {
    key: Option<String>,
    model: Categorizer,
    fits: usize,
}

impl ModelCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_fit(&mut self, records: &[Expense]) -> &Categorizer {
        let key = fingerprint(records);
        if self.key.as_deref() != Some(key.as_str()) {
            self.model = Categorizer::fit_expenses(records);
            self.key = Some(key);
            self.fits += 1;
        }
        &self.model
    }

    /// Number of times a model has actually been fitted.
    pub fn fits(&self) -> usize {
        self.fits
    }
}
