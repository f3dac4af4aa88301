pub(crate) use super::*;
pub(crate) use crate::vocabulary::VocabBuilder;

fn vocab_of(names: &[&str]) -> Vocabulary {
    let mut builder = VocabBuilder::new();
    for name in names {
        builder.lookup_or_insert(name);
    }
    builder.freeze().expect("non-empty")
}

#[test]
fn test_bound_count_resolves_to_itself() {
    assert_eq!(DfBound::Count(3).resolve_min(100).expect("valid"), 3);
    assert_eq!(DfBound::Count(3).resolve_max(100).expect("valid"), 3);
}

#[test]
fn test_bound_proportion_max_floors() {
    assert_eq!(DfBound::Proportion(0.5).resolve_max(3).expect("valid"), 1);
    assert_eq!(DfBound::Proportion(1.0).resolve_max(7).expect("valid"), 7);
}

#[test]
fn test_bound_proportion_min_ceils() {
    assert_eq!(DfBound::Proportion(0.5).resolve_min(3).expect("valid"), 2);
    assert_eq!(DfBound::Proportion(0.0).resolve_min(7).expect("valid"), 0);
}

#[test]
fn test_negative_proportion_rejected() {
    assert!(DfBound::Proportion(-0.1).resolve_min(3).is_err());
    assert!(DfBound::Proportion(-0.1).resolve_max(3).is_err());
}

#[test]
fn test_df_table_counts_documents_not_occurrences() {
    let mut df = DfTable::new();
    // "a" occurs three times in the first document
    df.record_document(vec!["a", "a", "a", "b"]);
    df.record_document(vec!["a"]);
    assert_eq!(df.get("a"), 2);
    assert_eq!(df.get("b"), 1);
    assert_eq!(df.get("never"), 0);
    assert_eq!(df.len(), 2);
}

#[test]
fn test_prune_keeps_relative_order() {
    let vocab = vocab_of(&["a", "b", "c", "d"]);
    let mut df = DfTable::new();
    df.record_document(vec!["a", "b", "c", "d"]);
    df.record_document(vec!["b", "d"]);

    // min_df = 2 removes "a" and "c"
    let (pruned, removed) = prune_vocabulary(&vocab, &df, 2, usize::MAX).expect("prune");
    assert_eq!(pruned.names_by_id(), vec!["b", "d"]);
    assert_eq!(pruned.get("b"), Some(0));
    assert_eq!(pruned.get("d"), Some(1));
    assert_eq!(removed.len(), 2);
    assert!(removed.contains("a"));
    assert!(removed.contains("c"));
}

#[test]
fn test_prune_bounds_inclusive() {
    let vocab = vocab_of(&["low", "mid", "high"]);
    let mut df = DfTable::new();
    df.record_document(vec!["low", "mid", "high"]);
    df.record_document(vec!["mid", "high"]);
    df.record_document(vec!["high"]);
    // df: low=1, mid=2, high=3

    let (pruned, removed) = prune_vocabulary(&vocab, &df, 1, 3).expect("prune");
    assert_eq!(pruned.len(), 3);
    assert!(removed.is_empty());

    let (pruned, removed) = prune_vocabulary(&vocab, &df, 2, 2).expect("prune");
    assert_eq!(pruned.names_by_id(), vec!["mid"]);
    assert_eq!(removed.len(), 2);
}

#[test]
fn test_prune_inverted_bounds_fail() {
    let vocab = vocab_of(&["a"]);
    let df = DfTable::new();
    let result = prune_vocabulary(&vocab, &df, 5, 2);
    assert!(matches!(
        result,
        Err(VectorizarError::InvalidThreshold {
            min_count: 5,
            max_count: 2,
        })
    ));
}

#[test]
fn test_prune_everything_is_empty_vocabulary() {
    let vocab = vocab_of(&["a", "b"]);
    let mut df = DfTable::new();
    df.record_document(vec!["a", "b"]);

    let result = prune_vocabulary(&vocab, &df, 2, usize::MAX);
    assert!(matches!(result, Err(VectorizarError::EmptyVocabulary)));
}

#[test]
fn test_prune_noop_preserves_ids() {
    let vocab = vocab_of(&["x", "y"]);
    let mut df = DfTable::new();
    df.record_document(vec!["x", "y"]);
    df.record_document(vec!["x", "y"]);

    let (pruned, removed) = prune_vocabulary(&vocab, &df, 2, 2).expect("prune");
    assert!(removed.is_empty());
    assert_eq!(pruned, vocab);
}
