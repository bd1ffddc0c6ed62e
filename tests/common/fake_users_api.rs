//! Fake users API server for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Serves:
//! - `GET /users`: the configured body with the configured status
//!
//! # Example
//!
//! ```rust,no_run
//! use common::fake_users_api::FakeUsersApi;
//!
//! let api = FakeUsersApi::start(StatusCode::OK, USERS_BODY).await.unwrap();
//! let url = api.users_url();
//! ```

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

struct Reply {
    status: StatusCode,
    body: String,
}

/// Handle to the running fake users API server.
pub struct FakeUsersApi {
    addr: SocketAddr,
}

impl FakeUsersApi {
    /// Start the server on a random port. Returns once the server is
    /// listening.
    pub async fn start(status: StatusCode, body: &str) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let reply = Arc::new(Reply {
            status,
            body: body.to_string(),
        });

        let app = Router::new().route("/users", get(users)).with_state(reply);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr })
    }

    /// Full URL of the users endpoint.
    pub fn users_url(&self) -> String {
        format!("http://{}/users", self.addr)
    }

    /// A URL on the same server that nothing is routed to.
    pub fn missing_url(&self) -> String {
        format!("http://{}/nope", self.addr)
    }
}

async fn users(State(reply): State<Arc<Reply>>) -> impl IntoResponse {
    (
        reply.status,
        [("content-type", "application/json")],
        reply.body.clone(),
    )
}
