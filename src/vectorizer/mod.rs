//! Corpus-level fit/transform vectorizers.
//!
//! [`CorpusVectorizer`] ties the assembler, the one-hot encoder, the
//! vocabulary and the document-frequency pruner together for a corpus of
//! documents. Fitting runs one full pass building the raw vocabulary and
//! the frequency table, applies the pruner, and freezes the result; the
//! transform pass then streams sparse rows against the frozen vocabulary,
//! one instance at a time. The two passes must not interleave: row emission
//! depends on final, stable feature ids.
//!
//! [`GroupVectorizer`] is the lighter sibling for pre-encoded feature
//! sequences, and [`LabelEncoder`] the parallel contract for labels.

use std::hash::Hash;

use crate::assembler::{assemble_document, SplitCriterion};
use crate::encoding::OneHotEncoder;
use crate::error::{Result, VectorizarError};
use crate::pruning::{prune_vocabulary, DfBound, DfTable};
use crate::traits::{FeatureSet, InstanceGenerator};
use crate::vocabulary::{VocabBuilder, Vocabulary};

mod group;
mod label;

pub use group::GroupVectorizer;
pub use label::{LabelEncoder, LabelIds, DEFAULT_UNKNOWN_LABEL};

/// One instance's sparse feature row: (feature id, value) pairs.
///
/// Feature ids refer to the vocabulary that produced the row; the pair
/// order carries no meaning. After re-fitting or pruning, previously
/// emitted rows are stale and must be regenerated.
pub type SparseRow = Vec<(usize, f64)>;

/// Fit/transform vectorizer over a corpus of documents.
///
/// Collaborators are supplied at construction: an [`InstanceGenerator`]
/// enumerating the analysis units of each document and a [`FeatureSet`]
/// extracting raw feature pairs for them. Configuration is builder-style
/// and constructor-level; nothing is reconfigurable between passes.
///
/// With no pre-supplied vocabulary, `fit` learns and prunes one; with a
/// fixed vocabulary, pruning is skipped and `fit` only validates that the
/// corpus encodes cleanly. At transform time, features absent from the
/// vocabulary are silently dropped — the designed out-of-vocabulary path
/// at inference time.
pub struct CorpusVectorizer<G, F> {
    generator: G,
    features: F,
    encoder: OneHotEncoder,
    min_df: DfBound,
    max_df: DfBound,
    max_features: Option<usize>,
    split: Option<SplitCriterion>,
    supplied: Option<Vocabulary>,
    fitted: Option<Vocabulary>,
}

impl<G, F> CorpusVectorizer<G, F>
where
    G: InstanceGenerator,
    F: FeatureSet<Doc = G::Doc, Unit = G::Unit>,
    G::Unit: Clone + Eq + Hash,
{
    /// Creates a vectorizer with default bounds (`min_df` = 1 document,
    /// `max_df` = the whole corpus) and the default `=` separator.
    #[must_use]
    pub fn new(generator: G, features: F) -> Self {
        Self {
            generator,
            features,
            encoder: OneHotEncoder::new(),
            min_df: DfBound::Count(1),
            max_df: DfBound::Proportion(1.0),
            max_features: None,
            split: None,
            supplied: None,
            fitted: None,
        }
    }

    /// Sets the minimum document-frequency bound.
    #[must_use]
    pub fn with_min_df(mut self, min_df: DfBound) -> Self {
        self.min_df = min_df;
        self
    }

    /// Sets the maximum document-frequency bound.
    #[must_use]
    pub fn with_max_df(mut self, max_df: DfBound) -> Self {
        self.max_df = max_df;
        self
    }

    /// Caps the vocabulary at the `max_features` most frequent features.
    ///
    /// Frequency-ranked capping is not implemented; a vectorizer configured
    /// with it fails loudly at `fit` rather than silently ignoring the
    /// request.
    #[must_use]
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = Some(max_features);
        self
    }

    /// Sets the one-hot separator token.
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.encoder = self.encoder.with_separator(separator);
        self
    }

    /// Supplies a fixed vocabulary; `fit` will validate instead of learn.
    #[must_use]
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.supplied = Some(vocabulary);
        self
    }

    /// Enables feature-space partitioning along `criterion`.
    #[must_use]
    pub fn with_split_criterion(mut self, criterion: SplitCriterion) -> Self {
        self.split = Some(criterion);
        self
    }

    /// The frozen vocabulary, if fitted or supplied.
    #[must_use]
    pub fn vocabulary(&self) -> Option<&Vocabulary> {
        self.fitted.as_ref().or(self.supplied.as_ref())
    }

    /// Number of features in the frozen vocabulary (0 before fit).
    #[must_use]
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary().map_or(0, Vocabulary::len)
    }

    fn validate_config(&self) -> Result<()> {
        match self.max_features {
            Some(0) => Err(VectorizarError::invalid_hyperparameter(
                "max_features",
                0,
                "a positive count, or unset",
            )),
            Some(_) => Err(VectorizarError::UnsupportedFeature {
                feature: "max_features: frequency-ranked vocabulary capping".to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Learns (or validates) the vocabulary from `docs`.
    ///
    /// # Errors
    ///
    /// - [`VectorizarError::EmptyVocabulary`] if the corpus yields no
    ///   features, or pruning removes all of them.
    /// - [`VectorizarError::InvalidThreshold`] if the resolved `max_df`
    ///   covers fewer documents than `min_df`.
    /// - [`VectorizarError::UnsupportedFeature`] if `max_features` was
    ///   configured.
    pub fn fit(&mut self, docs: &[G::Doc]) -> Result<()> {
        self.validate_config()?;

        if let Some(vocab) = &self.supplied {
            // fixed vocabulary: no growth, no pruning; one validation pass
            // over the corpus encoding
            for doc in docs {
                assemble_document(&self.generator, &self.features, &self.encoder, self.split, doc)?;
            }
            self.fitted = Some(vocab.clone());
            return Ok(());
        }

        let mut builder = VocabBuilder::new();
        let mut df = DfTable::new();
        for doc in docs {
            let instances =
                assemble_document(&self.generator, &self.features, &self.encoder, self.split, doc)?;
            for row in &instances {
                for (name, _) in row {
                    builder.lookup_or_insert(name);
                }
            }
            df.record_document(
                instances
                    .iter()
                    .flat_map(|row| row.iter().map(|(name, _)| name.as_str())),
            );
        }
        let raw = builder.freeze()?;

        let min_count = self.min_df.resolve_min(docs.len())?;
        let max_count = self.max_df.resolve_max(docs.len())?;
        let (vocabulary, _removed) = prune_vocabulary(&raw, &df, min_count, max_count)?;
        self.fitted = Some(vocabulary);
        Ok(())
    }

    /// Streams one sparse row per instance of `docs` against the frozen
    /// vocabulary.
    ///
    /// The returned sequence is lazy per document, finite, and single-pass.
    /// Out-of-vocabulary features are dropped from rows, never an error.
    ///
    /// # Errors
    ///
    /// Returns [`VectorizarError::EmptyVocabulary`] if no vocabulary was
    /// fitted or supplied.
    pub fn transform<'a>(&'a self, docs: &'a [G::Doc]) -> Result<SparseRows<'a, G, F>> {
        let vocabulary = self.vocabulary().ok_or(VectorizarError::EmptyVocabulary)?;
        Ok(SparseRows {
            generator: &self.generator,
            features: &self.features,
            encoder: &self.encoder,
            split: self.split,
            vocabulary,
            docs,
            next_doc: 0,
            pending: Vec::new().into_iter(),
        })
    }

    /// Fits on `docs`, then streams its rows.
    ///
    /// # Errors
    ///
    /// Same conditions as [`CorpusVectorizer::fit`].
    pub fn fit_transform<'a>(&'a mut self, docs: &'a [G::Doc]) -> Result<SparseRows<'a, G, F>> {
        self.fit(docs)?;
        self.transform(docs)
    }
}

/// Lazy sparse-row sequence produced by
/// [`CorpusVectorizer::transform`]/[`fit_transform`](CorpusVectorizer::fit_transform).
///
/// Yields one `Result<SparseRow>` per instance, assembling one document at
/// a time so large corpora never require the full matrix in memory. An
/// assembly error ends the sequence after being yielded.
pub struct SparseRows<'a, G, F>
where
    G: InstanceGenerator,
{
    generator: &'a G,
    features: &'a F,
    encoder: &'a OneHotEncoder,
    split: Option<SplitCriterion>,
    vocabulary: &'a Vocabulary,
    docs: &'a [G::Doc],
    next_doc: usize,
    pending: std::vec::IntoIter<Vec<(String, f64)>>,
}

impl<G, F> Iterator for SparseRows<'_, G, F>
where
    G: InstanceGenerator,
    F: FeatureSet<Doc = G::Doc, Unit = G::Unit>,
    G::Unit: Clone + Eq + Hash,
{
    type Item = Result<SparseRow>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(instance) = self.pending.next() {
                let row: SparseRow = instance
                    .into_iter()
                    .filter_map(|(name, value)| {
                        self.vocabulary.get(&name).map(|id| (id, value))
                    })
                    .collect();
                return Some(Ok(row));
            }
            if self.next_doc >= self.docs.len() {
                return None;
            }
            let doc = &self.docs[self.next_doc];
            self.next_doc += 1;
            match assemble_document(self.generator, self.features, self.encoder, self.split, doc) {
                Ok(instances) => self.pending = instances.into_iter(),
                Err(e) => {
                    self.next_doc = self.docs.len();
                    return Some(Err(e));
                }
            }
        }
    }
}


#[cfg(test)]
mod vectorizer_contract_falsify;
