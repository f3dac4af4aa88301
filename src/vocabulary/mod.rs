//! Insertion-ordered name→id mappings, growable or frozen.
//!
//! A [`VocabBuilder`] assigns the next sequential id to every name it has
//! not seen before; freezing it yields an immutable [`Vocabulary`] whose
//! lookups either hit or miss (the caller decides to drop misses). The
//! [`LabelSetBuilder`]/[`LabelSet`] pair is the same machine specialized for
//! label strings, with one reserved entry: the unknown-label sentinel at
//! id 0, so that frozen lookups are total.
//!
//! Ids are always unique and contiguous over `[0, len)`, and assignment
//! order equals first-encounter order. The two modes are separate types, so
//! growable and frozen behaviour can never be mixed within one pass.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VectorizarError};

/// Growable name→id mapping with lazy sequential id assignment.
///
/// # Examples
///
/// ```
/// use vectorizar::vocabulary::VocabBuilder;
///
/// let mut builder = VocabBuilder::new();
/// assert_eq!(builder.lookup_or_insert("len"), 0);
/// assert_eq!(builder.lookup_or_insert("pos=NN"), 1);
/// assert_eq!(builder.lookup_or_insert("len"), 0);
///
/// let vocab = builder.freeze().expect("non-empty");
/// assert_eq!(vocab.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct VocabBuilder {
    ids: HashMap<String, usize>,
    next_id: usize,
}

impl VocabBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ids: HashMap::new(),
            next_id: 0,
        }
    }

    /// Returns the id of `name`, assigning the next sequential id on first
    /// encounter.
    pub fn lookup_or_insert(&mut self, name: &str) -> usize {
        if let Some(&id) = self.ids.get(name) {
            id
        } else {
            let id = self.next_id;
            self.ids.insert(name.to_string(), id);
            self.next_id += 1;
            id
        }
    }

    /// Returns the id of `name` without inserting.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<usize> {
        self.ids.get(name).copied()
    }

    /// Number of names inserted so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True if no name was ever inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Converts to an immutable [`Vocabulary`].
    ///
    /// # Errors
    ///
    /// Returns [`VectorizarError::EmptyVocabulary`] if no entries were ever
    /// inserted. This guards against silently producing degenerate
    /// zero-column matrices.
    pub fn freeze(self) -> Result<Vocabulary> {
        if self.ids.is_empty() {
            return Err(VectorizarError::EmptyVocabulary);
        }
        Ok(Vocabulary { ids: self.ids })
    }
}

/// Frozen, immutable name→id mapping.
///
/// Lookups of unseen names miss (return `None`); the caller drops them.
/// Produced by [`VocabBuilder::freeze`], by [`Vocabulary::from_ids`] for a
/// pre-supplied mapping, or by document-frequency pruning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    ids: HashMap<String, usize>,
}

impl Vocabulary {
    /// Builds a vocabulary from an explicit mapping.
    ///
    /// # Errors
    ///
    /// Returns [`VectorizarError::EmptyVocabulary`] for an empty mapping and
    /// [`VectorizarError::InvalidHyperparameter`] if the ids are not unique
    /// and contiguous over `[0, len)`.
    pub fn from_ids(ids: HashMap<String, usize>) -> Result<Self> {
        if ids.is_empty() {
            return Err(VectorizarError::EmptyVocabulary);
        }
        let mut seen = vec![false; ids.len()];
        for &id in ids.values() {
            if id >= seen.len() || seen[id] {
                return Err(VectorizarError::invalid_hyperparameter(
                    "vocabulary",
                    id,
                    "unique contiguous ids over [0, len)",
                ));
            }
            seen[id] = true;
        }
        Ok(Self { ids })
    }

    /// Returns the id of `name`, or `None` if out of vocabulary.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<usize> {
        self.ids.get(name).copied()
    }

    /// True if `name` is in the vocabulary.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.ids.contains_key(name)
    }

    /// Number of features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Always false: a frozen vocabulary has at least one entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterates over (name, id) entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.ids.iter().map(|(name, &id)| (name.as_str(), id))
    }

    /// Feature names ordered by ascending id.
    #[must_use]
    pub fn names_by_id(&self) -> Vec<&str> {
        let mut names = vec![""; self.ids.len()];
        for (name, &id) in &self.ids {
            names[id] = name.as_str();
        }
        names
    }

    /// Saves the mapping as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialized.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Loads a mapping previously saved with [`Vocabulary::save_json`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails the
    /// contiguity invariant.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let vocab: Vocabulary = serde_json::from_str(&json)?;
        // re-validate: the file may have been edited by hand
        Self::from_ids(vocab.ids)
    }
}

/// Growable label→id mapping with the unknown sentinel reserved at id 0.
#[derive(Debug, Clone)]
pub struct LabelSetBuilder {
    ids: HashMap<String, usize>,
    next_id: usize,
    unknown: String,
}

impl LabelSetBuilder {
    /// Creates a builder with `unknown` reserved at id 0.
    #[must_use]
    pub fn new(unknown: impl Into<String>) -> Self {
        let unknown = unknown.into();
        let mut ids = HashMap::new();
        ids.insert(unknown.clone(), 0);
        Self {
            ids,
            next_id: 1,
            unknown,
        }
    }

    /// Returns the id of `label`, assigning the next sequential id on first
    /// encounter.
    pub fn lookup_or_insert(&mut self, label: &str) -> usize {
        if let Some(&id) = self.ids.get(label) {
            id
        } else {
            let id = self.next_id;
            self.ids.insert(label.to_string(), id);
            self.next_id += 1;
            id
        }
    }

    /// Number of labels, sentinel included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Always false: the sentinel is present from construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Converts to an immutable [`LabelSet`].
    ///
    /// # Errors
    ///
    /// Returns [`VectorizarError::EmptyLabelSet`] if no label beyond the
    /// sentinel was ever seen — a corpus that produced zero labels.
    pub fn freeze(self) -> Result<LabelSet> {
        if self.ids.len() <= 1 {
            return Err(VectorizarError::EmptyLabelSet);
        }
        Ok(LabelSet {
            ids: self.ids,
            unknown: self.unknown,
        })
    }
}

/// Frozen label→id mapping with total lookup.
///
/// Unlike [`Vocabulary`], lookups never miss: an unseen label maps to the
/// unknown sentinel's id instead of being dropped, so every instance always
/// receives exactly one label id.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use vectorizar::vocabulary::LabelSet;
///
/// let ids = HashMap::from([
///     ("__UNK__".to_string(), 0),
///     ("elaboration".to_string(), 1),
/// ]);
/// let labels = LabelSet::from_ids(ids, "__UNK__").expect("valid labelset");
///
/// assert_eq!(labels.get("elaboration"), 1);
/// assert_eq!(labels.get("never-seen"), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSet {
    ids: HashMap<String, usize>,
    unknown: String,
}

impl LabelSet {
    /// Builds a label set from an explicit mapping.
    ///
    /// # Errors
    ///
    /// Returns [`VectorizarError::EmptyLabelSet`] for an empty mapping, and
    /// [`VectorizarError::InvalidHyperparameter`] if the ids are not
    /// contiguous or the mapping does not contain `unknown` at id 0.
    pub fn from_ids(ids: HashMap<String, usize>, unknown: &str) -> Result<Self> {
        if ids.is_empty() {
            return Err(VectorizarError::EmptyLabelSet);
        }
        let mut seen = vec![false; ids.len()];
        for &id in ids.values() {
            if id >= seen.len() || seen[id] {
                return Err(VectorizarError::invalid_hyperparameter(
                    "labelset",
                    id,
                    "unique contiguous ids over [0, len)",
                ));
            }
            seen[id] = true;
        }
        if ids.get(unknown) != Some(&0) {
            return Err(VectorizarError::invalid_hyperparameter(
                "labelset",
                unknown,
                "unknown-label sentinel present at id 0",
            ));
        }
        Ok(Self {
            ids,
            unknown: unknown.to_string(),
        })
    }

    /// Returns the id of `label`, or the sentinel id for unseen labels.
    #[must_use]
    pub fn get(&self, label: &str) -> usize {
        self.ids.get(label).copied().unwrap_or(0)
    }

    /// True if `label` was seen at fit time (the sentinel counts).
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.ids.contains_key(label)
    }

    /// The unknown-label sentinel text.
    #[must_use]
    pub fn unknown_label(&self) -> &str {
        &self.unknown
    }

    /// Number of labels, sentinel included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Always false: a frozen label set has at least the sentinel.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Label names ordered by ascending id. Index 0 is the sentinel.
    #[must_use]
    pub fn names_by_id(&self) -> Vec<&str> {
        let mut names = vec![""; self.ids.len()];
        for (name, &id) in &self.ids {
            names[id] = name.as_str();
        }
        names
    }
}
