//! Vectorization of pre-encoded feature sequences.

use crate::error::{Result, VectorizarError};
use crate::vectorizer::SparseRow;
use crate::vocabulary::{VocabBuilder, Vocabulary};

/// Turns already-encoded instance feature sequences into sparse rows.
///
/// Where [`CorpusVectorizer`](crate::CorpusVectorizer) owns the whole
/// extraction pipeline, this vectorizer takes canonical (name, value) pairs
/// the caller produced elsewhere and only performs the vocabulary mapping:
/// growable during `fit_transform`, frozen during `transform` (unknown
/// features dropped). Rows are accumulated in one flat buffer with
/// row-boundary offsets, then sliced back per instance.
///
/// # Examples
///
/// ```
/// use vectorizar::vectorizer::GroupVectorizer;
///
/// let instances = vec![
///     vec![("len".to_string(), 3.0), ("pos=NN".to_string(), 1.0)],
///     vec![("len".to_string(), 5.0), ("pos=NN".to_string(), 1.0)],
/// ];
///
/// let mut vectorizer = GroupVectorizer::new();
/// let rows = vectorizer.fit_transform(&instances).expect("fit_transform");
///
/// assert_eq!(rows, vec![
///     vec![(0, 3.0), (1, 1.0)],
///     vec![(0, 5.0), (1, 1.0)],
/// ]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GroupVectorizer {
    vocabulary: Option<Vocabulary>,
}

impl GroupVectorizer {
    /// Creates a vectorizer with no vocabulary yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Supplies a fixed vocabulary, making `transform` usable immediately.
    #[must_use]
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = Some(vocabulary);
        self
    }

    /// The current frozen vocabulary, if any.
    #[must_use]
    pub fn vocabulary(&self) -> Option<&Vocabulary> {
        self.vocabulary.as_ref()
    }

    /// Learns the vocabulary from `instances` and returns their rows.
    ///
    /// # Errors
    ///
    /// Returns [`VectorizarError::EmptyVocabulary`] if the instances carry
    /// no features at all.
    pub fn fit_transform(&mut self, instances: &[Vec<(String, f64)>]) -> Result<Vec<SparseRow>> {
        let mut builder = VocabBuilder::new();
        // flat accumulator, sliced back into rows by boundary offsets
        let mut acc: Vec<(usize, f64)> = Vec::new();
        let mut row_ptr = vec![0];
        for instance in instances {
            for (name, value) in instance {
                acc.push((builder.lookup_or_insert(name), *value));
            }
            row_ptr.push(acc.len());
        }
        self.vocabulary = Some(builder.freeze()?);
        Ok(slice_rows(&acc, &row_ptr))
    }

    /// Maps `instances` against the frozen vocabulary, dropping unknown
    /// features.
    ///
    /// # Errors
    ///
    /// Returns [`VectorizarError::EmptyVocabulary`] if no vocabulary was
    /// fitted or supplied.
    pub fn transform(&self, instances: &[Vec<(String, f64)>]) -> Result<Vec<SparseRow>> {
        let vocabulary = self
            .vocabulary
            .as_ref()
            .ok_or(VectorizarError::EmptyVocabulary)?;

        let mut acc: Vec<(usize, f64)> = Vec::new();
        let mut row_ptr = vec![0];
        for instance in instances {
            for (name, value) in instance {
                if let Some(id) = vocabulary.get(name) {
                    acc.push((id, *value));
                }
            }
            row_ptr.push(acc.len());
        }
        Ok(slice_rows(&acc, &row_ptr))
    }
}

fn slice_rows(acc: &[(usize, f64)], row_ptr: &[usize]) -> Vec<SparseRow> {
    row_ptr
        .windows(2)
        .map(|bounds| acc[bounds[0]..bounds[1]].to_vec())
        .collect()
}
