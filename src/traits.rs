//! Collaborator contracts for corpus vectorization.
//!
//! The vectorizer core never parses documents itself. It consumes three
//! narrow, caller-supplied contracts: an [`InstanceGenerator`] that
//! enumerates the analysis units of a document, a [`FeatureSet`] that turns
//! units into raw (name, value) feature pairs, and a [`LabelExtractor`] that
//! yields one label string per instance.
//!
//! All three must be deterministic and order-stable across repeated calls on
//! the same document: the fit pass and the transform pass must see the same
//! instances in the same order.

use std::collections::HashMap;
use std::hash::Hash;

use crate::assembler::{FeatureMap, SplitCriterion};
use crate::encoding::FeatureValue;

/// One analysis unit, or an ordered pair of units, to featurize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instance<U> {
    /// A single unit (e.g. one EDU).
    Single(U),
    /// An ordered pair of units (e.g. a candidate attachment).
    Pair(U, U),
}

/// Enumerates the analysis units of a document, in a stable order.
pub trait InstanceGenerator {
    /// Document type this generator understands.
    type Doc;
    /// Analysis unit identity (used as the per-document memoization key).
    type Unit;

    /// The ordered sequence of instances to featurize for `doc`.
    fn instances(&self, doc: &Self::Doc) -> Vec<Instance<Self::Unit>>;
}

/// Supplies raw feature pairs for units and unit pairs of a document.
///
/// `preprocess` runs once per document and produces a per-unit info
/// structure; the extractors then work from that info. `product_features`,
/// `combine_features` and `split_feature_space` have identity defaults so
/// simple feature sets only implement the three required methods.
pub trait FeatureSet {
    /// Document type this feature set understands.
    type Doc;
    /// Analysis unit identity.
    type Unit: Clone + Eq + Hash;
    /// Per-unit info produced by preprocessing.
    type UnitInfo;

    /// Preprocess a document once into per-unit info.
    fn preprocess(&self, doc: &Self::Doc) -> HashMap<Self::Unit, Self::UnitInfo>;

    /// Raw feature pairs for a single unit.
    fn unit_features(&self, info: &Self::UnitInfo) -> Vec<(String, FeatureValue)>;

    /// Raw feature pairs specific to an ordered pair of units.
    fn pair_features(
        &self,
        first: &Self::UnitInfo,
        second: &Self::UnitInfo,
    ) -> Vec<(String, FeatureValue)>;

    /// Features derived from both single-unit feature sets and the pair
    /// features. Merged into the pair feature map.
    fn product_features(
        &self,
        first: &FeatureMap,
        second: &FeatureMap,
        pair: &FeatureMap,
    ) -> Vec<(String, FeatureValue)> {
        let _ = (first, second, pair);
        Vec::new()
    }

    /// Alternate joint encodings of the two sides. Merged into the pair
    /// feature map after `product_features`.
    fn combine_features(
        &self,
        first: &FeatureMap,
        second: &FeatureMap,
        pair: &FeatureMap,
    ) -> Vec<(String, FeatureValue)> {
        let _ = (first, second, pair);
        Vec::new()
    }

    /// Partition the merged feature space by `criterion`.
    ///
    /// The partitioning must be content-preserving: every original feature
    /// appears in exactly one partition, even when `keep_original` is false.
    /// The identity default keeps every feature where it is.
    fn split_feature_space(
        &self,
        first: FeatureMap,
        second: FeatureMap,
        pair: FeatureMap,
        keep_original: bool,
        criterion: SplitCriterion,
    ) -> (FeatureMap, FeatureMap, FeatureMap) {
        let _ = (keep_original, criterion);
        (first, second, pair)
    }
}

/// Extracts one label string per instance of a document.
///
/// Output must align 1:1 with the [`InstanceGenerator`]'s output for the
/// same document.
pub trait LabelExtractor {
    /// Document type this extractor understands.
    type Doc;

    /// The ordered sequence of labels, one per instance.
    fn labels(&self, doc: &Self::Doc) -> Vec<String>;
}
