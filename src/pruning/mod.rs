//! Document-frequency based vocabulary pruning.
//!
//! A fit pass records, per feature, the number of documents it occurred in
//! at least once (document frequency, distinct from total occurrence
//! count). Features whose document frequency falls outside the configured
//! `[min_df, max_df]` bounds are removed, and the survivors are assigned
//! new contiguous ids that preserve their original relative order — a
//! prefix sum over the inclusion mask.
//!
//! The frequency table is owned by the fit pass and discarded after
//! pruning; already-emitted rows are not remapped and must be regenerated
//! against the new vocabulary.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{Result, VectorizarError};
use crate::vocabulary::Vocabulary;

/// A document-frequency bound: an absolute document count, or a proportion
/// of the corpus size.
///
/// # Examples
///
/// ```
/// use vectorizar::pruning::DfBound;
///
/// // at most 95% of a 40-document corpus
/// assert_eq!(DfBound::Proportion(0.95).resolve_max(40).unwrap(), 38);
/// // at least 2 documents, regardless of corpus size
/// assert_eq!(DfBound::Count(2).resolve_min(40).unwrap(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DfBound {
    /// Absolute document count.
    Count(usize),
    /// Proportion of the corpus size, in `[0, 1]` for sensible configs.
    Proportion(f64),
}

impl DfBound {
    /// Resolves an upper bound against the corpus size (floor).
    ///
    /// # Errors
    ///
    /// Returns [`VectorizarError::InvalidHyperparameter`] for a negative
    /// proportion.
    pub fn resolve_max(self, n_docs: usize) -> Result<usize> {
        match self {
            DfBound::Count(c) => Ok(c),
            DfBound::Proportion(p) => {
                if p < 0.0 {
                    return Err(VectorizarError::invalid_hyperparameter(
                        "max_df", p, ">= 0",
                    ));
                }
                Ok((p * n_docs as f64).floor() as usize)
            }
        }
    }

    /// Resolves a lower bound against the corpus size (ceiling).
    ///
    /// # Errors
    ///
    /// Returns [`VectorizarError::InvalidHyperparameter`] for a negative
    /// proportion.
    pub fn resolve_min(self, n_docs: usize) -> Result<usize> {
        match self {
            DfBound::Count(c) => Ok(c),
            DfBound::Proportion(p) => {
                if p < 0.0 {
                    return Err(VectorizarError::invalid_hyperparameter(
                        "min_df", p, ">= 0",
                    ));
                }
                Ok((p * n_docs as f64).ceil() as usize)
            }
        }
    }
}

/// Per-feature document frequency accumulator.
#[derive(Debug, Clone, Default)]
pub struct DfTable {
    counts: HashMap<String, usize>,
}

impl DfTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one document's feature names; duplicates within the call
    /// count once.
    pub fn record_document<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        let distinct: HashSet<&str> = names.into_iter().collect();
        for name in distinct {
            *self.counts.entry(name.to_string()).or_insert(0) += 1;
        }
    }

    /// Document frequency of `name` (zero if never seen).
    #[must_use]
    pub fn get(&self, name: &str) -> usize {
        self.counts.get(name).copied().unwrap_or(0)
    }

    /// Number of distinct features recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Removes features whose document frequency falls outside
/// `[min_count, max_count]` (inclusive) and re-indexes the survivors.
///
/// Survivors keep their relative order from `vocab` (by original id
/// ascending) under new contiguous ids starting at 0. Returns the remapped
/// vocabulary and the set of removed feature names.
///
/// # Errors
///
/// - [`VectorizarError::InvalidThreshold`] if `max_count < min_count`.
/// - [`VectorizarError::EmptyVocabulary`] if pruning removes every feature.
pub fn prune_vocabulary(
    vocab: &Vocabulary,
    df: &DfTable,
    min_count: usize,
    max_count: usize,
) -> Result<(Vocabulary, HashSet<String>)> {
    if max_count < min_count {
        return Err(VectorizarError::InvalidThreshold {
            min_count,
            max_count,
        });
    }

    let names = vocab.names_by_id();
    let mask: Vec<bool> = names
        .iter()
        .map(|name| {
            let count = df.get(name);
            count >= min_count && count <= max_count
        })
        .collect();

    // prefix sum over the inclusion mask yields the new ids
    let mut new_ids: HashMap<String, usize> = HashMap::new();
    let mut removed: HashSet<String> = HashSet::new();
    let mut next_id = 0;
    for (name, keep) in names.into_iter().zip(mask) {
        if keep {
            new_ids.insert(name.to_string(), next_id);
            next_id += 1;
        } else {
            removed.insert(name.to_string());
        }
    }

    if new_ids.is_empty() {
        return Err(VectorizarError::EmptyVocabulary);
    }
    let pruned = Vocabulary::from_ids(new_ids)?;
    Ok((pruned, removed))
}

#[cfg(test)]
mod tests;
