//! Filter layer — case-insensitive substring search and match highlighting
//! over an in-memory [`Record`] collection.
//!
//! A record matches when any configured field's string form contains the
//! query, compared character-by-character in lower case. The source
//! collection is never mutated: [`FilterableList`] keeps a derived list of
//! visible indices that is rebuilt from scratch on every query change.
//!
//! # Highlighting
//!
//! [`highlight`] splits a value into alternating unmatched / matched
//! [`Segment`]s. Occurrences are found left to right without overlap, so
//! `highlight("aaaa", "aa")` yields two adjacent matched segments. Segments
//! always cover whole characters of the original value; concatenating their
//! text gives the value back unchanged.

use std::fmt;

use crate::types::{FieldValue, Record, Segment};

// ---------------------------------------------------------------------------
// Case folding
// ---------------------------------------------------------------------------

/// Lower-cased copy of a string that remembers where each byte came from.
///
/// `spans[i]` is the byte range, in the original string, of the character
/// whose lower-case expansion produced folded byte `i`. Needed because
/// lower-casing may change byte lengths (`'İ'` expands to two characters).
struct Folded {
    text: String,
    spans: Vec<(usize, usize)>,
}

impl Folded {
    fn new(original: &str) -> Self {
        let mut text = String::with_capacity(original.len());
        let mut spans = Vec::with_capacity(original.len());
        for (start, ch) in original.char_indices() {
            let end = start + ch.len_utf8();
            for lower in ch.to_lowercase() {
                text.push(lower);
                spans.extend(std::iter::repeat((start, end)).take(lower.len_utf8()));
            }
        }
        Self { text, spans }
    }
}

fn fold(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).collect()
}

// ---------------------------------------------------------------------------
// Pure functions
// ---------------------------------------------------------------------------

/// True if any of `fields` in `record` contains `query`, ignoring case.
///
/// An empty query matches every record. Fields missing from the record are
/// skipped.
pub fn matches(record: &Record, fields: &[String], query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    matches_folded(record, fields, &fold(query))
}

fn matches_folded(record: &Record, fields: &[String], folded_query: &str) -> bool {
    fields.iter().any(|name| {
        record
            .get(name)
            .is_some_and(|value| fold(&value.to_string()).contains(folded_query))
    })
}

/// The records of `records` matching `query`, in their original order.
pub fn filter<'a>(records: &'a [Record], fields: &[String], query: &str) -> Vec<&'a Record> {
    if query.is_empty() {
        return records.iter().collect();
    }
    let folded = fold(query);
    records
        .iter()
        .filter(|r| matches_folded(r, fields, &folded))
        .collect()
}

/// Split the string form of `value` into unmatched / matched segments.
///
/// An empty query, an empty value, or a value with no occurrence yields a
/// single unmatched segment holding the whole value.
pub fn highlight<T: fmt::Display + ?Sized>(value: &T, query: &str) -> Vec<Segment> {
    let original = value.to_string();
    if query.is_empty() || original.is_empty() {
        return vec![Segment::plain(original)];
    }

    let folded_query = fold(query);
    let folded = Folded::new(&original);

    let mut segments = Vec::new();
    // Byte offset in `original` up to which segments have been emitted.
    let mut emitted = 0;
    let mut from = 0;

    while let Some(pos) = folded.text[from..].find(&folded_query) {
        let lo = from + pos;
        let hi = lo + folded_query.len();
        let start = folded.spans[lo].0.max(emitted);
        let end = folded.spans[hi - 1].1;
        from = hi;

        if start >= end {
            continue;
        }
        if start > emitted {
            segments.push(Segment::plain(&original[emitted..start]));
        }
        segments.push(Segment::hit(&original[start..end]));
        emitted = end;
    }

    if emitted < original.len() {
        segments.push(Segment::plain(&original[emitted..]));
    }
    segments
}

// ---------------------------------------------------------------------------
// FilterableList
// ---------------------------------------------------------------------------

/// A record collection with an active query and its derived filtered view.
///
/// The view is recomputed synchronously by [`set_query`](Self::set_query) and
/// [`replace_records`](Self::replace_records); reads never recompute.
#[derive(Debug, Clone)]
pub struct FilterableList {
    records: Vec<Record>,
    fields: Vec<String>,
    query: String,
    /// Indices into `records` of the entries matching `query`, ascending.
    visible: Vec<usize>,
}

impl FilterableList {
    /// Build a list over `records`, searching the named `fields`.
    pub fn new<I, S>(records: Vec<Record>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let visible = (0..records.len()).collect();
        Self {
            records,
            fields: fields.into_iter().map(Into::into).collect(),
            query: String::new(),
            visible,
        }
    }

    /// An empty list, used while a collection is still loading.
    pub fn empty<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Vec::new(), fields)
    }

    /// Set the active query and rebuild the filtered view. Whitespace is
    /// significant; the query is never trimmed.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.refilter();
        tracing::debug!(
            query = %self.query,
            matched = self.visible.len(),
            total = self.records.len(),
            "filter: query set"
        );
    }

    /// Swap in a new source collection, keeping the active query.
    pub fn replace_records(&mut self, records: Vec<Record>) {
        self.records = records;
        self.refilter();
        tracing::debug!(
            total = self.records.len(),
            matched = self.visible.len(),
            "filter: records replaced"
        );
    }

    fn refilter(&mut self) {
        if self.query.is_empty() {
            self.visible = (0..self.records.len()).collect();
            return;
        }
        let folded = fold(&self.query);
        self.visible = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| matches_folded(r, &self.fields, &folded))
            .map(|(i, _)| i)
            .collect();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// The configured searchable field names.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// The full source collection, unfiltered.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Records matching the active query, in source order.
    pub fn filtered(&self) -> Vec<&Record> {
        self.visible.iter().map(|&i| &self.records[i]).collect()
    }

    /// The `n`th record of the filtered view.
    pub fn nth(&self, n: usize) -> Option<&Record> {
        self.visible.get(n).map(|&i| &self.records[i])
    }

    /// Position in the source collection of the `n`th filtered record.
    pub fn source_index(&self, n: usize) -> Option<usize> {
        self.visible.get(n).copied()
    }

    /// Number of records in the filtered view.
    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// Highlight one value against the active query.
    pub fn highlight_value(&self, value: &FieldValue) -> Vec<Segment> {
        highlight(value, &self.query)
    }

    /// Highlight every configured field of `record`. Fields absent from the
    /// record are omitted.
    pub fn highlight_record(&self, record: &Record) -> Vec<(String, Vec<Segment>)> {
        self.fields
            .iter()
            .filter_map(|name| {
                record
                    .get(name)
                    .map(|v| (name.clone(), highlight(v, &self.query)))
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
