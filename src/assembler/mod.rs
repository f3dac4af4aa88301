//! Per-document instance feature assembly.
//!
//! Given one document, an instance generator and a feature set, this module
//! produces one encoded feature sequence per instance, in generator order.
//! For a pair instance the assembly path is: preprocess the document once,
//! extract (and memoize per document) each member's single-unit features,
//! extract pair features, merge product and combination features into the
//! pair map, suffix each member's feature names with its role marker,
//! optionally partition the feature space, then flatten and one-hot encode.
//!
//! The single-unit memoization cache lives for exactly one document and is
//! owned by the assembly call; it is never shared across documents.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::encoding::{FeatureValue, OneHotEncoder};
use crate::error::{Result, VectorizarError};
use crate::traits::{FeatureSet, Instance, InstanceGenerator};

/// Role suffix for features of a pair's first member.
pub const FIRST_SUFFIX: &str = "_first";
/// Role suffix for features of a pair's second member.
pub const SECOND_SUFFIX: &str = "_second";

/// Criterion along which the feature space is partitioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitCriterion {
    /// By attachment direction.
    Direction,
    /// By same/different-sentence membership.
    Sentence,
    /// By both direction and sentence membership.
    DirectionSentence,
}

impl FromStr for SplitCriterion {
    type Err = VectorizarError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "dir" => Ok(SplitCriterion::Direction),
            "sent" => Ok(SplitCriterion::Sentence),
            "dir_sent" => Ok(SplitCriterion::DirectionSentence),
            other => Err(VectorizarError::invalid_hyperparameter(
                "split_feat_space",
                other,
                "one of 'dir', 'sent', 'dir_sent'",
            )),
        }
    }
}

/// Insertion-ordered map of raw feature pairs.
///
/// Keeps the deterministic emission order the vocabulary invariant needs
/// while giving the replace-on-duplicate merge semantics the assembly steps
/// rely on.
#[derive(Debug, Clone, Default)]
pub struct FeatureMap {
    index: HashMap<String, usize>,
    entries: Vec<(String, FeatureValue)>,
}

impl FeatureMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map from raw pairs; later duplicates replace earlier ones
    /// in place.
    #[must_use]
    pub fn from_pairs(pairs: Vec<(String, FeatureValue)>) -> Self {
        let mut map = Self::new();
        map.extend(pairs);
        map
    }

    /// Inserts `value` under `name`, replacing any existing entry without
    /// changing its position.
    pub fn insert(&mut self, name: String, value: FeatureValue) {
        if let Some(&i) = self.index.get(&name) {
            self.entries[i].1 = value;
        } else {
            self.index.insert(name.clone(), self.entries.len());
            self.entries.push((name, value));
        }
    }

    /// Merges `pairs` into the map, replacing on duplicate names.
    pub fn extend(&mut self, pairs: impl IntoIterator<Item = (String, FeatureValue)>) {
        for (name, value) in pairs {
            self.insert(name, value);
        }
    }

    /// Returns the value stored under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.index.get(name).map(|&i| &self.entries[i].1)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the map holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Re-emits every entry with `suffix` appended to its name.
    #[must_use]
    pub fn suffixed(&self, suffix: &str) -> FeatureMap {
        let pairs = self
            .entries
            .iter()
            .map(|(n, v)| (format!("{n}{suffix}"), v.clone()))
            .collect();
        Self::from_pairs(pairs)
    }

    /// Consumes the map into its pairs, in insertion order.
    #[must_use]
    pub fn into_pairs(self) -> Vec<(String, FeatureValue)> {
        self.entries
    }
}

impl IntoIterator for FeatureMap {
    type Item = (String, FeatureValue);
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Produces one encoded feature sequence per instance of `doc`, in
/// generator order.
///
/// # Errors
///
/// Returns [`VectorizarError::CollaboratorContract`] if the generator
/// produces a unit the preprocessor returned no info for.
pub fn assemble_document<G, F>(
    generator: &G,
    features: &F,
    encoder: &OneHotEncoder,
    split: Option<SplitCriterion>,
    doc: &G::Doc,
) -> Result<Vec<Vec<(String, f64)>>>
where
    G: InstanceGenerator,
    F: FeatureSet<Doc = G::Doc, Unit = G::Unit>,
    G::Unit: Clone + Eq + std::hash::Hash,
{
    let unit_info = features.preprocess(doc);
    // single-unit features, memoized for this document only
    let mut cache: HashMap<G::Unit, FeatureMap> = HashMap::new();

    let mut encoded = Vec::new();
    for instance in generator.instances(doc) {
        match instance {
            Instance::Single(unit) => {
                let map = cached_unit_features(features, &unit_info, &mut cache, &unit)?;
                encoded.push(encoder.encode_instance(map));
            }
            Instance::Pair(first_unit, second_unit) => {
                let first = cached_unit_features(features, &unit_info, &mut cache, &first_unit)?;
                let second = cached_unit_features(features, &unit_info, &mut cache, &second_unit)?;
                let info1 = lookup_info::<F>(&unit_info, &first_unit)?;
                let info2 = lookup_info::<F>(&unit_info, &second_unit)?;

                let mut pair = FeatureMap::from_pairs(features.pair_features(info1, info2));
                pair.extend(features.product_features(&first, &second, &pair));
                pair.extend(features.combine_features(&first, &second, &pair));

                // role markers keep identically named features from each
                // side distinguishable after merging
                let mut first = first.suffixed(FIRST_SUFFIX);
                let mut second = second.suffixed(SECOND_SUFFIX);

                if let Some(criterion) = split {
                    (first, second, pair) =
                        features.split_feature_space(first, second, pair, false, criterion);
                }

                let flat = first.into_iter().chain(second).chain(pair);
                encoded.push(encoder.encode_instance(flat));
            }
        }
    }
    Ok(encoded)
}

fn lookup_info<'a, F: FeatureSet>(
    unit_info: &'a HashMap<F::Unit, F::UnitInfo>,
    unit: &F::Unit,
) -> Result<&'a F::UnitInfo> {
    unit_info
        .get(unit)
        .ok_or_else(|| VectorizarError::CollaboratorContract {
            message: "instance generator produced a unit with no preprocessed info".to_string(),
        })
}

fn cached_unit_features<F: FeatureSet>(
    features: &F,
    unit_info: &HashMap<F::Unit, F::UnitInfo>,
    cache: &mut HashMap<F::Unit, FeatureMap>,
    unit: &F::Unit,
) -> Result<FeatureMap> {
    if let Some(map) = cache.get(unit) {
        return Ok(map.clone());
    }
    let info = lookup_info::<F>(unit_info, unit)?;
    let map = FeatureMap::from_pairs(features.unit_features(info));
    cache.insert(unit.clone(), map.clone());
    Ok(map)
}
