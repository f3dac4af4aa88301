//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use vectorizar::prelude::*;
//! ```

pub use crate::assembler::SplitCriterion;
pub use crate::encoding::{FeatureValue, OneHotEncoder};
pub use crate::error::{Result, VectorizarError};
pub use crate::pruning::DfBound;
pub use crate::traits::{FeatureSet, Instance, InstanceGenerator, LabelExtractor};
pub use crate::vectorizer::{
    CorpusVectorizer, GroupVectorizer, LabelEncoder, SparseRow, DEFAULT_UNKNOWN_LABEL,
};
pub use crate::vocabulary::{LabelSet, VocabBuilder, Vocabulary};
