//! Invoices source — one unauthenticated GET against a demo users endpoint.
//!
//! The endpoint returns `{"users": [...]}`; each user becomes an invoice row
//! `{id, name, phone, email, cost}`. The endpoint has no notion of cost, so
//! it is generated locally: a random amount below 1000 with two decimals.
//!
//! There is exactly one attempt. No retry, no timeout, no cancellation: the
//! caller gets either the rows or a [`FetchError`] and keeps it for the
//! lifetime of the view.

use atrium_core::Record;
use rand::Rng;
use serde::Deserialize;
use thiserror::Error;
use tokio::{runtime::Handle, sync::oneshot};

/// Fields the invoices search box looks at. `id` is deliberately excluded.
pub const SEARCH_FIELDS: [&str; 4] = ["name", "email", "phone", "cost"];

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("failed to fetch invoices (HTTP {0})")]
    Status(reqwest::StatusCode),
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// One entry of the endpoint's `users` array. Unknown keys are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUser {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
struct UsersPage {
    users: Vec<RawUser>,
}

/// A random cost in `[0, 1000)` rounded to cents.
pub fn random_cost<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let raw: f64 = rng.random_range(0.0..1000.0);
    (raw * 100.0).round() / 100.0
}

/// Map endpoint users to invoice records, drawing costs from `rng`.
pub fn map_users<R: Rng + ?Sized>(users: Vec<RawUser>, rng: &mut R) -> Vec<Record> {
    users
        .into_iter()
        .map(|u| {
            Record::new()
                .with("id", u.id)
                .with("name", format!("{} {}", u.first_name, u.last_name))
                .with("phone", u.phone)
                .with("email", u.email)
                .with("cost", random_cost(rng))
        })
        .collect()
}

/// Parse a response body into invoice records.
pub fn parse_users<R: Rng + ?Sized>(body: &str, rng: &mut R) -> Result<Vec<Record>, FetchError> {
    let page: UsersPage = serde_json::from_str(body)?;
    Ok(map_users(page.users, rng))
}

/// Fetch and map the invoices collection. A single attempt.
pub async fn fetch_invoices(client: &reqwest::Client, url: &str) -> Result<Vec<Record>, FetchError> {
    tracing::debug!(url, "invoices: fetching");
    let resp = client.get(url).send().await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::Status(status));
    }
    let body = resp.text().await?;
    parse_users(&body, &mut rand::rng())
}

/// Run [`fetch_invoices`] on `handle` and deliver its single result through
/// the returned receiver. If the receiver is gone by then the result is
/// dropped.
pub fn spawn_fetch(handle: &Handle, url: String) -> oneshot::Receiver<Result<Vec<Record>, FetchError>> {
    let (tx, rx) = oneshot::channel();
    handle.spawn(async move {
        let result = match reqwest::Client::builder()
            .user_agent(concat!("atrium/", env!("CARGO_PKG_VERSION")))
            .build()
        {
            Ok(client) => fetch_invoices(&client, &url).await,
            Err(e) => Err(FetchError::Transport(e)),
        };

        match &result {
            Ok(rows) => tracing::info!(rows = rows.len(), "invoices: loaded"),
            Err(e) => tracing::warn!(error = %e, "invoices: fetch failed"),
        }

        if tx.send(result).is_err() {
            tracing::debug!("invoices: receiver dropped before fetch completed");
        }
    });
    rx
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use atrium_core::FieldValue;
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, SeedableRng};

    const BODY: &str = r#"{
        "users": [
            {"id": 1, "firstName": "Emily", "lastName": "Johnson", "phone": "+81 965-431-3024",
             "email": "emily.johnson@x.dummyjson.com", "age": 28},
            {"id": 2, "firstName": "Michael", "lastName": "Williams", "phone": "+49 258-627-6644",
             "email": "michael.williams@x.dummyjson.com"}
        ],
        "total": 208, "skip": 0, "limit": 30
    }"#;

    #[test]
    fn users_map_to_invoice_rows() {
        let mut rng = StdRng::seed_from_u64(7);
        let rows = parse_users(BODY, &mut rng).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].text("name").as_deref(), Some("Emily Johnson"));
        assert_eq!(rows[1].get("id"), Some(&FieldValue::Int(2)));
        assert_eq!(
            rows[0].field_names().collect::<Vec<_>>(),
            ["id", "name", "phone", "email", "cost"]
        );
    }

    #[test]
    fn cost_is_in_range_with_two_decimals() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let c = random_cost(&mut rng);
            assert!((0.0..=1000.0).contains(&c));
            assert!(((c * 100.0).round() - c * 100.0).abs() < 1e-6);
        }
    }

    #[test]
    fn missing_users_key_is_decode_error() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = parse_users(r#"{"items": []}"#, &mut rng).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn empty_users_is_not_an_error() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(parse_users(r#"{"users": []}"#, &mut rng).unwrap().is_empty());
    }
}
