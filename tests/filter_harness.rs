//! Filterable list integration harness.
//!
//! # What this covers
//!
//! - **Worked examples**: the two-invoice collection filtered by phone,
//!   cost and name, and the segment split of a phone number.
//! - **Property: empty query is identity**: `filter(C, "") == C`, same order.
//! - **Property: results ⊆ collection**: filtering never fabricates records
//!   and keeps the original relative order.
//! - **Property: every result matches**: some configured field of every
//!   result contains the query case-insensitively.
//! - **Property: idempotence**: filtering a filtered result by the same query
//!   changes nothing.
//! - **Property: case insensitivity**: upper- and lower-cased queries select
//!   the same records.
//! - **Property: highlight reconstructs the value**: concatenating segment
//!   texts yields the original value, for any value and query.
//! - **Property: included records highlight**: every record the filter keeps
//!   yields at least one matched segment.
//!
//! # Running
//!
//! ```sh
//! cargo test --test filter_harness
//! ```

mod common;
use common::*;

use atrium_core::filter::{filter, matches};
use atrium_core::{highlight, FilterableList, Record, Segment};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn fields() -> Vec<String> {
    INVOICE_FIELDS.iter().map(|f| f.to_string()).collect()
}

// ---------------------------------------------------------------------------
// Worked examples
// ---------------------------------------------------------------------------

#[test]
fn phone_prefix_selects_first_invoice() {
    let records = two_invoices();
    assert_eq!(ids(filter(&records, &fields(), "555-10")), ["1"]);
}

#[test]
fn phone_prefix_segments() {
    assert_eq!(
        highlight("555-1000", "555-10"),
        vec![Segment::hit("555-10"), Segment::plain("00")]
    );
}

#[test]
fn cost_is_searched_as_text() {
    let records = two_invoices();
    assert_eq!(ids(filter(&records, &fields(), "120")), ["1"]);
    // 99.0 displays as "99"
    assert_eq!(ids(filter(&records, &fields(), "99")), ["2"]);
    assert!(filter(&records, &fields(), "99.0").is_empty());
}

#[test]
fn empty_query_keeps_everything_and_highlights_nothing() {
    let list = FilterableList::new(two_invoices(), INVOICE_FIELDS);
    assert_eq!(list.len(), 2);
    for record in list.filtered() {
        for (_, segments) in list.highlight_record(record) {
            assert_eq!(segments.len(), 1);
            assert!(!segments[0].matched);
        }
    }
}

#[test]
fn id_is_not_searched() {
    let records = two_invoices();
    assert_eq!(ids(filter(&records, &fields(), "x.com")), ["1", "2"]);
    let by_id_only = vec![RecordBuilder::new(42).name("Nobody").build()];
    assert!(filter(&by_id_only, &fields(), "42").is_empty());
}

#[test]
fn list_tracks_query_changes() {
    let mut list = FilterableList::new(two_invoices(), INVOICE_FIELDS);
    list.set_query("JONES");
    assert_eq!(ids(list.filtered()), ["2"]);
    assert_eq!(list.source_index(0), Some(1));
    list.set_query("");
    assert_eq!(ids(list.filtered()), ["1", "2"]);
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn lower(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).collect()
}

fn arb_record() -> impl Strategy<Value = Record> {
    (
        0i64..1000,
        "[A-Za-zÀ-ÿ ]{0,12}",
        "[0-9-]{0,9}",
        "[a-z.@]{0,10}",
        0.0f64..1000.0,
    )
        .prop_map(|(id, name, phone, email, cost)| {
            RecordBuilder::new(id)
                .name(&name)
                .phone(&phone)
                .email(&email)
                .cost((cost * 100.0).round() / 100.0)
                .build()
        })
}

fn arb_collection() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(arb_record(), 0..20)
}

fn arb_query() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-zA-Z]{1,3}",
        "[0-9.-]{1,3}",
        "[A-Za-zÀ-ÿ ]{0,4}",
    ]
}

proptest! {
    #[test]
    fn empty_query_is_identity(records in arb_collection()) {
        let out = filter(&records, &fields(), "");
        prop_assert_eq!(out.len(), records.len());
        for (a, b) in out.iter().zip(records.iter()) {
            prop_assert!(std::ptr::eq(*a, b));
        }
    }

    #[test]
    fn results_are_an_ordered_subset(records in arb_collection(), q in arb_query()) {
        let out = filter(&records, &fields(), &q);
        let mut last = None;
        for r in &out {
            let pos = records.iter().position(|s| std::ptr::eq(*r, s));
            prop_assert!(pos.is_some());
            prop_assert!(pos > last);
            last = pos;
        }
    }

    #[test]
    fn every_result_matches(records in arb_collection(), q in arb_query()) {
        let needle = lower(&q);
        for record in filter(&records, &fields(), &q) {
            let hit = INVOICE_FIELDS.iter().any(|f| {
                record
                    .text(f)
                    .is_some_and(|v| lower(&v).contains(&needle))
            });
            prop_assert!(hit);
            prop_assert!(matches(record, &fields(), &q));
        }
    }

    #[test]
    fn filtering_is_idempotent(records in arb_collection(), q in arb_query()) {
        let once: Vec<Record> = filter(&records, &fields(), &q).into_iter().cloned().collect();
        let twice = filter(&once, &fields(), &q);
        prop_assert_eq!(ids(twice), ids(&once));
    }

    #[test]
    fn filtering_ignores_ascii_case(records in arb_collection(), q in "[a-z]{1,3}") {
        let lower = ids(filter(&records, &fields(), &q));
        let upper = ids(filter(&records, &fields(), &q.to_uppercase()));
        prop_assert_eq!(lower, upper);
    }

    #[test]
    fn highlight_reconstructs_value(value in "\\PC{0,24}", q in "\\PC{0,4}") {
        let joined: String = highlight(value.as_str(), &q).into_iter().map(|s| s.text).collect();
        prop_assert_eq!(joined, value);
    }

    #[test]
    fn included_records_have_a_matched_segment(records in arb_collection(), q in "[a-z0-9]{1,2}") {
        let mut list = FilterableList::new(records, INVOICE_FIELDS);
        list.set_query(q.clone());
        for record in list.filtered() {
            let any_hit = list
                .highlight_record(record)
                .iter()
                .any(|(_, segs)| segs.iter().any(|s| s.matched));
            prop_assert!(any_hit, "record {:?} kept without a highlighted span for {:?}", record, q);
        }
    }
}
