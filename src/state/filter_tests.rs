//! Tests for the record filter engine.

use super::*;
use crate::model::RecordId;
use crate::store::RecordStore;

fn ids<'a>(records: &[&'a FlowRecord]) -> Vec<&'a str> {
    records.iter().map(|r| r.id.as_str()).collect()
}

fn bare(id: &str, stage: &str) -> FlowRecord {
    FlowRecord::new(RecordId::new(id).unwrap(), stage)
}

// ===== search_corpus =====

#[test]
fn corpus_joins_present_fields_in_fixed_order() {
    let store = RecordStore::builtin();
    let transport = store.record_by_str("f2").unwrap();
    assert_eq!(
        search_corpus(transport),
        "Transport Lindsay Transport Pty Ltd Farm A (PIC NS123456) \
         JBS Dinmore (PIC QL654321) 2025-08-15 Animal Welfare Temp Log"
    );
}

#[test]
fn corpus_of_bare_record_is_just_stage() {
    assert_eq!(search_corpus(&bare("x", "Farm")), "Farm");
}

#[test]
fn corpus_skips_absent_fields_without_placeholder() {
    let record = bare("x", "DC").with_date("2025-08-17");
    assert_eq!(search_corpus(&record), "DC 2025-08-17");
}

#[test]
fn corpus_skips_empty_strings() {
    let record = bare("x", "DC").with_company("").with_tags(["", "QA"]);
    assert_eq!(search_corpus(&record), "DC QA");
}

#[test]
fn corpus_excludes_refs_and_metrics() {
    let store = RecordStore::builtin();
    let processor = store.record_by_str("f3").unwrap();
    let corpus = search_corpus(processor);
    assert!(!corpus.contains("MSA_Batch"));
    assert!(!corpus.contains("298"));
}

// ===== filter =====

#[test]
fn empty_query_returns_everything_in_order() {
    let store = RecordStore::builtin();
    let result = filter(store.records(), "");
    assert_eq!(ids(&result), vec!["f1", "f2", "f3", "f4", "f5", "f6"]);
}

#[test]
fn whitespace_query_is_not_treated_as_empty() {
    let records = vec![bare("a", "Farm"), bare("b", "DC").with_company("Woolworths DC")];
    let result = filter(&records, " ");
    assert_eq!(ids(&result), vec!["b"]);
}

#[test]
fn msa_matches_only_processor() {
    let store = RecordStore::builtin();
    assert_eq!(ids(&filter(store.records(), "MSA")), vec!["f3"]);
}

#[test]
fn woolworths_matches_dc_then_store() {
    let store = RecordStore::builtin();
    assert_eq!(ids(&filter(store.records(), "Woolworths")), vec!["f5", "f6"]);
}

#[test]
fn filter_is_case_insensitive() {
    let store = RecordStore::builtin();
    let lower = ids(&filter(store.records(), "hilton"));
    let upper = ids(&filter(store.records(), "HILTON"));
    assert_eq!(lower, vec!["f4"]);
    assert_eq!(lower, upper);
}

#[test]
fn pic_number_matches_farm_and_transport() {
    let store = RecordStore::builtin();
    assert_eq!(ids(&filter(store.records(), "NS123456")), vec!["f1", "f2"]);
}

#[test]
fn tag_only_match_selects_record() {
    let store = RecordStore::builtin();
    assert_eq!(ids(&filter(store.records(), "temp log")), vec!["f2"]);
}

#[test]
fn ref_value_does_not_match() {
    let store = RecordStore::builtin();
    assert!(filter(store.records(), "ASN20250816").is_empty());
}

#[test]
fn bare_record_matches_on_stage_and_date() {
    let records = vec![bare("a", "Farm").with_date("2024-01-02")];
    assert_eq!(ids(&filter(&records, "farm")), vec!["a"]);
    assert_eq!(ids(&filter(&records, "2024-01")), vec!["a"]);
    assert!(filter(&records, "store").is_empty());
}

#[test]
fn query_may_span_field_boundary() {
    let records = vec![bare("a", "Farm").with_company("Acme")];
    assert_eq!(ids(&filter(&records, "farm acme")), vec!["a"]);
}

#[test]
fn empty_dataset_yields_empty_result() {
    assert!(filter(&[], "anything").is_empty());
    assert!(filter(&[], "").is_empty());
}

#[test]
fn non_ascii_query_is_lowercased() {
    let records = vec![bare("a", "DC").with_company("Woolworths DC – Minchinbury NSW")];
    assert_eq!(ids(&filter(&records, "– MINCHINBURY")), vec!["a"]);
}

// ===== record_matches =====

#[test]
fn record_matches_agrees_with_filter() {
    let store = RecordStore::builtin();
    for query in ["", "msa", "Woolworths", "2025-08-16", "zzz"] {
        let via_filter = ids(&filter(store.records(), query));
        let via_predicate: Vec<&str> = store
            .records()
            .iter()
            .filter(|r| record_matches(r, query))
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(via_filter, via_predicate, "query {:?}", query);
    }
}
