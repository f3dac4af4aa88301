//! Label encoding, structurally parallel to corpus vectorization.

use crate::error::{Result, VectorizarError};
use crate::traits::LabelExtractor;
use crate::vocabulary::{LabelSet, LabelSetBuilder};

/// Default unknown-label sentinel text.
pub const DEFAULT_UNKNOWN_LABEL: &str = "__UNK__";

/// Fit/transform encoder mapping one label string per instance to an id.
///
/// Growable mode reserves id 0 for the unknown-label sentinel before any
/// document is scanned. Under a fixed label set, unseen labels map to the
/// sentinel id instead of being dropped: every instance always receives
/// exactly one label id, unlike feature rows which may legitimately be
/// empty.
pub struct LabelEncoder<L> {
    extractor: L,
    unknown: String,
    supplied: Option<LabelSet>,
    fitted: Option<LabelSet>,
}

impl<L: LabelExtractor> LabelEncoder<L> {
    /// Creates an encoder with the default `__UNK__` sentinel.
    #[must_use]
    pub fn new(extractor: L) -> Self {
        Self {
            extractor,
            unknown: DEFAULT_UNKNOWN_LABEL.to_string(),
            supplied: None,
            fitted: None,
        }
    }

    /// Sets the unknown-label sentinel text.
    #[must_use]
    pub fn with_unknown_label(mut self, unknown: impl Into<String>) -> Self {
        self.unknown = unknown.into();
        self
    }

    /// Supplies a fixed label set; `fit` will adopt it instead of learning.
    ///
    /// The set must carry the configured sentinel at id 0
    /// ([`LabelSet::from_ids`] enforces this).
    #[must_use]
    pub fn with_labelset(mut self, labelset: LabelSet) -> Self {
        self.supplied = Some(labelset);
        self
    }

    /// The frozen label set, if fitted or supplied.
    #[must_use]
    pub fn labelset(&self) -> Option<&LabelSet> {
        self.fitted.as_ref().or(self.supplied.as_ref())
    }

    /// Learns (or adopts) the label set from `docs`.
    ///
    /// # Errors
    ///
    /// - [`VectorizarError::EmptyLabelSet`] if the corpus yields no labels.
    /// - [`VectorizarError::InvalidHyperparameter`] if a supplied label set
    ///   does not carry the configured sentinel at id 0.
    pub fn fit(&mut self, docs: &[L::Doc]) -> Result<()> {
        if let Some(labelset) = &self.supplied {
            if labelset.get(&self.unknown) != 0 || !labelset.contains(&self.unknown) {
                return Err(VectorizarError::invalid_hyperparameter(
                    "labelset",
                    &self.unknown,
                    "unknown-label sentinel present at id 0",
                ));
            }
            self.fitted = Some(labelset.clone());
            return Ok(());
        }

        let mut builder = LabelSetBuilder::new(self.unknown.clone());
        for doc in docs {
            for label in self.extractor.labels(doc) {
                builder.lookup_or_insert(&label);
            }
        }
        self.fitted = Some(builder.freeze()?);
        Ok(())
    }

    /// Streams one label id per instance of `docs`.
    ///
    /// # Errors
    ///
    /// Returns [`VectorizarError::EmptyLabelSet`] if no label set was
    /// fitted or supplied.
    pub fn transform<'a>(&'a self, docs: &'a [L::Doc]) -> Result<LabelIds<'a, L>> {
        let labelset = self.labelset().ok_or(VectorizarError::EmptyLabelSet)?;
        Ok(LabelIds {
            extractor: &self.extractor,
            labelset,
            docs,
            next_doc: 0,
            pending: Vec::new().into_iter(),
        })
    }

    /// Fits on `docs`, then streams its label ids.
    ///
    /// # Errors
    ///
    /// Same conditions as [`LabelEncoder::fit`].
    pub fn fit_transform<'a>(&'a mut self, docs: &'a [L::Doc]) -> Result<LabelIds<'a, L>> {
        self.fit(docs)?;
        self.transform(docs)
    }
}

/// Lazy label-id sequence, one id per instance.
pub struct LabelIds<'a, L>
where
    L: LabelExtractor,
{
    extractor: &'a L,
    labelset: &'a LabelSet,
    docs: &'a [L::Doc],
    next_doc: usize,
    pending: std::vec::IntoIter<String>,
}

impl<L: LabelExtractor> Iterator for LabelIds<'_, L> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        loop {
            if let Some(label) = self.pending.next() {
                return Some(self.labelset.get(&label));
            }
            if self.next_doc >= self.docs.len() {
                return None;
            }
            let doc = &self.docs[self.next_doc];
            self.next_doc += 1;
            self.pending = self.extractor.labels(doc).into_iter();
        }
    }
}
