//! Vectorizar: incremental vocabulary encoding and sparse feature-row
//! construction for discourse corpora.
//!
//! Vectorizar turns heterogeneous per-instance feature dictionaries
//! (numeric, string, and tuple-valued) into fixed-width sparse numeric
//! feature rows and label vectors, with document-frequency vocabulary
//! pruning and strict fit/transform separation. Feature names are only ever
//! discovered during traversal: a growable vocabulary assigns ids lazily in
//! first-encounter order, is frozen after the fit pass, and gracefully
//! drops unseen features at inference time.
//!
//! # Quick Start
//!
//! ```
//! use vectorizar::prelude::*;
//!
//! // Pre-encoded instance feature sequences, one per analysis unit
//! let instances = vec![
//!     vec![("len".to_string(), 3.0), ("pos=NN".to_string(), 1.0)],
//!     vec![("len".to_string(), 5.0), ("pos=NN".to_string(), 1.0)],
//! ];
//!
//! let mut vectorizer = GroupVectorizer::new();
//! let rows = vectorizer.fit_transform(&instances).unwrap();
//!
//! assert_eq!(rows[0], vec![(0, 3.0), (1, 1.0)]);
//! assert_eq!(vectorizer.vocabulary().unwrap().len(), 2);
//! ```
//!
//! # Modules
//!
//! - [`vocabulary`]: growable / frozen name→id mappings and label sets
//! - [`encoding`]: one-hot encoding of raw (name, value) feature pairs
//! - [`assembler`]: per-document instance feature assembly
//! - [`pruning`]: document-frequency vocabulary pruning
//! - [`vectorizer`]: corpus-level fit/transform vectorizers and the label
//!   encoder
//! - [`traits`]: collaborator contracts (instance generation, feature
//!   extraction, label extraction)

pub mod assembler;
pub mod encoding;
pub mod error;
pub mod prelude;
pub mod pruning;
pub mod traits;
pub mod vectorizer;
pub mod vocabulary;

pub use error::{Result, VectorizarError};
pub use traits::{FeatureSet, Instance, InstanceGenerator, LabelExtractor};
pub use vectorizer::{CorpusVectorizer, GroupVectorizer, LabelEncoder, SparseRow};
pub use vocabulary::{LabelSet, VocabBuilder, Vocabulary};
