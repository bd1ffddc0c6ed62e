//! Static collections and response bodies used across harnesses.

use super::builders::RecordBuilder;
use atrium_core::Record;

/// Searchable fields of an invoice collection.
pub const INVOICE_FIELDS: [&str; 4] = ["name", "email", "phone", "cost"];

/// The two-record invoice collection used throughout the filter examples.
pub fn two_invoices() -> Vec<Record> {
    vec![
        RecordBuilder::new(1)
            .name("Alice Smith")
            .phone("555-1000")
            .email("a@x.com")
            .cost(120.5)
            .build(),
        RecordBuilder::new(2)
            .name("Bob Jones")
            .phone("555-2000")
            .email("b@x.com")
            .cost(99.0)
            .build(),
    ]
}

/// A users page in the shape the invoices endpoint returns.
pub const USERS_BODY: &str = r#"{
    "users": [
        {"id": 1, "firstName": "Emily", "lastName": "Johnson", "maidenName": "Smith",
         "age": 28, "phone": "+81 965-431-3024", "email": "emily.johnson@x.dummyjson.com"},
        {"id": 2, "firstName": "Michael", "lastName": "Williams", "maidenName": "",
         "age": 35, "phone": "+49 258-627-6644", "email": "michael.williams@x.dummyjson.com"},
        {"id": 3, "firstName": "Sophia", "lastName": "Brown", "maidenName": "",
         "age": 42, "phone": "+81 210-652-2785", "email": "sophia.brown@x.dummyjson.com"}
    ],
    "total": 208,
    "skip": 0,
    "limit": 3
}"#;

/// Valid JSON without the `users` key.
pub const WRONG_SHAPE_BODY: &str = r#"{"products": []}"#;

/// Not JSON at all.
pub const GARBAGE_BODY: &str = "<html>upstream unavailable</html>";
