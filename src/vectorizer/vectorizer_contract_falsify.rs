//! Vectorization Contract Falsification Tests
//!
//! Popperian falsification of the corpus-vectorizer contract:
//!   - after fit, vocabulary ids are exactly {0, .., n-1}
//!   - fit_transform ≡ fit + transform (composition equivalence)
//!   - transform under a frozen vocabulary never emits an unknown id and
//!     never errors on unseen feature names
//!   - every surviving feature after min_df pruning has df >= min_df
//!   - rows compare as unordered (id, value) collections

use super::tests::{collect_rows, example_corpus, instance, raw_vectorizer, RawDoc};
use super::*;
use crate::encoding::FeatureValue;

// ============================================================================
// FALSIFY-CV-001: vocabulary ids contiguous after fit
// Contract: ids form {0, .., n-1} with no gaps or duplicates
// ============================================================================

#[test]
fn falsify_cv_001_ids_contiguous() {
    let corpus = vec![
        vec![instance(&[
            ("a", FeatureValue::Num(1.0)),
            ("b", FeatureValue::Str("x".into())),
            ("c", FeatureValue::Tup(vec!["p".into(), "q".into()])),
        ])],
        vec![instance(&[("d", FeatureValue::Num(4.0))])],
    ];
    let mut vectorizer = raw_vectorizer();
    vectorizer.fit(&corpus).expect("fit");

    let vocab = vectorizer.vocabulary().expect("fitted");
    let mut ids: Vec<usize> = vocab.iter().map(|(_, id)| id).collect();
    ids.sort_unstable();
    assert_eq!(
        ids,
        (0..vocab.len()).collect::<Vec<_>>(),
        "FALSIFIED CV-001: ids not contiguous: {ids:?}"
    );
}

// ============================================================================
// FALSIFY-CV-002: fit_transform ≡ fit + transform
// ============================================================================

#[test]
fn falsify_cv_002_composition_equivalence() {
    let corpus = example_corpus();

    let mut combined = raw_vectorizer();
    let rows_combined = collect_rows(combined.fit_transform(&corpus).expect("fit_transform"));

    let mut separate = raw_vectorizer();
    separate.fit(&corpus).expect("fit");
    let rows_separate = collect_rows(separate.transform(&corpus).expect("transform"));

    assert_eq!(
        rows_combined, rows_separate,
        "FALSIFIED CV-002: fit_transform != fit + transform"
    );
}

// ============================================================================
// FALSIFY-CV-003: frozen transform never emits foreign ids, never errors
// on unseen names
// ============================================================================

#[test]
fn falsify_cv_003_no_foreign_ids() {
    let corpus = example_corpus();
    let mut vectorizer = raw_vectorizer();
    vectorizer.fit(&corpus).expect("fit");
    let vocab_size = vectorizer.vocabulary_size();

    let unseen = vec![vec![instance(&[
        ("len", FeatureValue::Num(1.0)),
        ("entirely_new", FeatureValue::Str("value".into())),
    ])]];
    let rows = collect_rows(vectorizer.transform(&unseen).expect("transform"));
    for row in &rows {
        for &(id, _) in row {
            assert!(
                id < vocab_size,
                "FALSIFIED CV-003: row holds id {id} >= vocab size {vocab_size}"
            );
        }
    }
}

// ============================================================================
// FALSIFY-CV-004: min_df pruning honours the bound
// ============================================================================

#[test]
fn falsify_cv_004_min_df_honoured() {
    let corpus: Vec<RawDoc> = vec![
        vec![instance(&[
            ("common", FeatureValue::Num(1.0)),
            ("rare1", FeatureValue::Num(1.0)),
        ])],
        vec![instance(&[("common", FeatureValue::Num(1.0))])],
        vec![instance(&[
            ("common", FeatureValue::Num(1.0)),
            ("rare2", FeatureValue::Num(1.0)),
        ])],
    ];
    let min_df = 2;
    let mut vectorizer = raw_vectorizer().with_min_df(DfBound::Count(min_df));
    vectorizer.fit(&corpus).expect("fit");

    let vocab = vectorizer.vocabulary().expect("fitted");
    for (name, _) in vocab.iter() {
        let df = corpus
            .iter()
            .filter(|doc| {
                doc.iter()
                    .any(|inst| inst.iter().any(|(n, _)| n == name))
            })
            .count();
        assert!(
            df >= min_df,
            "FALSIFIED CV-004: surviving feature '{name}' has df {df} < {min_df}"
        );
    }
    assert!(vocab.get("rare1").is_none());
    assert!(vocab.get("rare2").is_none());
}

// ============================================================================
// FALSIFY-CV-005: within-instance name collisions sum into one entry
// ============================================================================

#[test]
fn falsify_cv_005_collisions_sum() {
    let corpus = vec![vec![instance(&[
        ("tok", FeatureValue::Str("the".into())),
        ("tok", FeatureValue::Str("the".into())),
        ("tok", FeatureValue::Str("a".into())),
    ])]];
    let mut vectorizer = raw_vectorizer();
    let rows = collect_rows(vectorizer.fit_transform(&corpus).expect("fit_transform"));

    let vocab = vectorizer.vocabulary().expect("fitted");
    let the_id = vocab.get("tok=the").expect("encoded");
    let row = &rows[0];
    let entries: Vec<_> = row.iter().filter(|(id, _)| *id == the_id).collect();
    assert_eq!(
        entries.len(),
        1,
        "FALSIFIED CV-005: colliding names produced {} entries",
        entries.len()
    );
    assert_eq!(entries[0].1, 2.0, "FALSIFIED CV-005: counts not summed");
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_value() -> impl Strategy<Value = FeatureValue> {
        prop_oneof![
            (0.0_f64..10.0).prop_map(FeatureValue::Num),
            prop::sample::select(vec!["x", "y", "z"])
                .prop_map(|s| FeatureValue::Str(s.to_string())),
        ]
    }

    fn arb_corpus() -> impl Strategy<Value = Vec<RawDoc>> {
        let name = prop::sample::select(vec!["a", "b", "c", "d", "e"]);
        let pair = (name, arb_value()).prop_map(|(n, v)| (n.to_string(), v));
        let instance = prop::collection::vec(pair, 1..6);
        let doc = prop::collection::vec(instance, 1..4);
        prop::collection::vec(doc, 1..5)
    }

    proptest! {
        /// Fitting always yields contiguous ids.
        #[test]
        fn prop_fit_ids_contiguous(corpus in arb_corpus()) {
            let mut vectorizer = raw_vectorizer();
            vectorizer.fit(&corpus).expect("fit");
            let vocab = vectorizer.vocabulary().expect("fitted");
            let mut ids: Vec<usize> = vocab.iter().map(|(_, id)| id).collect();
            ids.sort_unstable();
            prop_assert_eq!(ids, (0..vocab.len()).collect::<Vec<_>>());
        }

        /// Transforming the fitting corpus twice gives identical rows.
        #[test]
        fn prop_transform_deterministic(corpus in arb_corpus()) {
            let mut vectorizer = raw_vectorizer();
            let first = collect_rows(vectorizer.fit_transform(&corpus).expect("fit_transform"));
            let second = collect_rows(vectorizer.transform(&corpus).expect("transform"));
            prop_assert_eq!(first, second);
        }

        /// No row ever references an id outside the frozen vocabulary.
        #[test]
        fn prop_rows_within_vocabulary(corpus in arb_corpus()) {
            let mut vectorizer = raw_vectorizer();
            let rows = collect_rows(vectorizer.fit_transform(&corpus).expect("fit_transform"));
            let size = vectorizer.vocabulary_size();
            for row in rows {
                for (id, _) in row {
                    prop_assert!(id < size);
                }
            }
        }
    }
}
