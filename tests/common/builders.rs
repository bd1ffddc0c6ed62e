//! Test builders — ergonomic constructors for `Record` collections.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use atrium_core::{FieldValue, Record};

// ---------------------------------------------------------------------------
// RecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for invoice-shaped [`Record`] fixtures.
///
/// # Example
///
/// ```rust
/// let record = RecordBuilder::new(1)
///     .name("Alice Smith")
///     .phone("555-1000")
///     .cost(120.5)
///     .build();
/// ```
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    pub fn new(id: i64) -> Self {
        Self {
            record: Record::new().with("id", id),
        }
    }

    pub fn name(self, name: &str) -> Self {
        self.field("name", name)
    }

    pub fn phone(self, phone: &str) -> Self {
        self.field("phone", phone)
    }

    pub fn email(self, email: &str) -> Self {
        self.field("email", email)
    }

    pub fn cost(self, cost: f64) -> Self {
        self.field("cost", cost)
    }

    pub fn field(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        self.record.insert(name, value);
        self
    }

    pub fn build(self) -> Record {
        self.record
    }
}

/// Ids of `records`, as displayed.
pub fn ids<'a>(records: impl IntoIterator<Item = &'a Record>) -> Vec<String> {
    records
        .into_iter()
        .map(|r| r.text("id").unwrap_or_default())
        .collect()
}
