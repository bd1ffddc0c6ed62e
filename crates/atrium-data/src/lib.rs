//! atrium-data — collection sources for the atrium views.
//!
//! Every view's collection comes from one of two places: a static dataset
//! compiled into the binary ([`mock`]) or the one-shot invoices request
//! ([`invoices`]). Either way the result is a `Vec<Record>` handed to an
//! [`atrium_core::FilterableList`] and never written back.

pub mod invoices;
pub mod mock;

use atrium_core::{FilterableList, Record};

/// The statically bundled collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    Team,
    Contacts,
    Faq,
    /// Stand-in for the invoices endpoint in offline mode.
    Invoices,
}

impl Dataset {
    pub fn records(self) -> Vec<Record> {
        match self {
            Dataset::Team => mock::team(),
            Dataset::Contacts => mock::contacts(),
            Dataset::Faq => mock::faq(),
            Dataset::Invoices => mock::invoices(),
        }
    }

    /// Fields the view's search box looks at.
    pub fn search_fields(self) -> &'static [&'static str] {
        match self {
            Dataset::Team => &["name", "email", "phone", "access"],
            Dataset::Contacts => &["name", "email", "phone", "address", "city"],
            Dataset::Faq => &["question"],
            Dataset::Invoices => &invoices::SEARCH_FIELDS,
        }
    }

    /// A [`FilterableList`] over this dataset with no active query.
    pub fn list(self) -> FilterableList {
        FilterableList::new(self.records(), self.search_fields().iter().copied())
    }
}
