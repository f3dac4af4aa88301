//! One-hot encoding of raw (name, value) feature pairs.
//!
//! Raw feature values come in three kinds: numeric values pass through as
//! counts or weights, while string and tuple values are categorical and get
//! one-hot encoded — the value's text form is folded into the feature name
//! and the value becomes a unit count. Duplicate synthesized names within
//! one instance are summed, so a repeated categorical observation (the same
//! token appearing twice in a context window) contributes a count of 2
//! rather than two indicator columns.

use std::borrow::Cow;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Default token between a feature name and a categorical value.
pub const DEFAULT_SEPARATOR: &str = "=";

/// A raw feature value, before one-hot encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FeatureValue {
    /// Numeric count or weight, emitted unchanged.
    Num(f64),
    /// Categorical string, one-hot encoded.
    Str(String),
    /// Categorical tuple, one-hot encoded using its canonical text form
    /// `(a, b, ...)`.
    Tup(Vec<String>),
}

impl From<f64> for FeatureValue {
    fn from(v: f64) -> Self {
        FeatureValue::Num(v)
    }
}

impl From<&str> for FeatureValue {
    fn from(v: &str) -> Self {
        FeatureValue::Str(v.to_string())
    }
}

impl From<String> for FeatureValue {
    fn from(v: String) -> Self {
        FeatureValue::Str(v)
    }
}

/// Non-ASCII space variant that must compare equal to a plain space.
///
/// CoreNLP-style tokenizers emit non-breaking spaces inside values such as
/// stock-price fractions ("100 3/32"); downstream sparse-format serializers
/// expect ASCII.
fn is_nonbreaking_space(c: char) -> bool {
    matches!(c, '\u{00a0}' | '\u{2007}' | '\u{202f}')
}

/// Folds non-breaking-space variants to plain spaces.
///
/// Borrows when the input needs no change.
///
/// # Examples
///
/// ```
/// use vectorizar::encoding::fold_whitespace;
///
/// assert_eq!(fold_whitespace("100\u{a0}3/32"), "100 3/32");
/// assert_eq!(fold_whitespace("plain"), "plain");
/// ```
#[must_use]
pub fn fold_whitespace(s: &str) -> Cow<'_, str> {
    if s.chars().any(is_nonbreaking_space) {
        Cow::Owned(
            s.chars()
                .map(|c| if is_nonbreaking_space(c) { ' ' } else { c })
                .collect(),
        )
    } else {
        Cow::Borrowed(s)
    }
}

/// Converts raw (name, value) pairs into canonical one-hot (name, count)
/// pairs.
///
/// # Examples
///
/// ```
/// use vectorizar::encoding::{FeatureValue, OneHotEncoder};
///
/// let encoder = OneHotEncoder::new();
///
/// let (name, count) = encoder.encode("pos", &FeatureValue::Str("NN".into()));
/// assert_eq!(name, "pos=NN");
/// assert_eq!(count, 1.0);
///
/// let (name, count) = encoder.encode("len", &FeatureValue::Num(3.0));
/// assert_eq!(name, "len");
/// assert_eq!(count, 3.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneHotEncoder {
    separator: String,
}

impl Default for OneHotEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl OneHotEncoder {
    /// Creates an encoder with the default `=` separator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }

    /// Sets the separator between name and categorical value.
    ///
    /// The token must not collide with characters the downstream sparse
    /// serializer expects in names or values.
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// The configured separator.
    #[must_use]
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Encodes one raw pair into its canonical one-hot form.
    ///
    /// Numeric values pass through under the original name; categorical
    /// values are folded into the name and replaced by a unit count.
    #[must_use]
    pub fn encode(&self, name: &str, value: &FeatureValue) -> (String, f64) {
        match value {
            FeatureValue::Num(v) => (name.to_string(), *v),
            FeatureValue::Str(s) => {
                let text = fold_whitespace(s);
                (format!("{name}{}{text}", self.separator), 1.0)
            }
            FeatureValue::Tup(items) => {
                let text = tuple_text(items);
                (format!("{name}{}{text}", self.separator), 1.0)
            }
        }
    }

    /// Encodes a whole instance feature sequence, summing pairs whose
    /// synthesized names collide.
    ///
    /// The returned pairs keep first-occurrence order so that a fit pass
    /// traversing them assigns vocabulary ids deterministically; consumers
    /// must treat the result as an unordered collection of (name, count)
    /// pairs.
    #[must_use]
    pub fn encode_instance(
        &self,
        pairs: impl IntoIterator<Item = (String, FeatureValue)>,
    ) -> Vec<(String, f64)> {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut encoded: Vec<(String, f64)> = Vec::new();
        for (name, value) in pairs {
            let (name, count) = self.encode(&name, &value);
            if let Some(&i) = index.get(&name) {
                encoded[i].1 += count;
            } else {
                index.insert(name.clone(), encoded.len());
                encoded.push((name, count));
            }
        }
        encoded
    }
}

/// Canonical text form of a tuple value: `(a, b, ...)`.
fn tuple_text(items: &[String]) -> String {
    let folded: Vec<Cow<'_, str>> = items.iter().map(|s| fold_whitespace(s)).collect();
    format!("({})", folded.join(", "))
}
