use std::{fmt, time::Duration};

use mongodb::{
    Client, Collection, Database,
    bson::{Document, doc},
    options::ClientOptions,
};
use tracing::{debug, info};

use super::with_deadline;
use crate::error::{BookstoreError, Result};

pub const DEFAULT_DATABASE: &str = "Bookstore";
pub const BOOKS_COLLECTION: &str = "Books";

const APP_NAME: &str = "bookstore-server";

/// Process-wide handle to the document database.
///
/// A `StoreClient` only exists after [`StoreClient::connect`] succeeded, so
/// collection lookups never race connection setup. Cloning is cheap; the
/// driver pools connections internally and is safe to share across tasks.
#[derive(Clone)]
pub struct StoreClient {
    database: Database,
    op_timeout: Duration,
}

impl fmt::Debug for StoreClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreClient")
            .field("database", &self.database.name())
            .field("op_timeout", &self.op_timeout)
            .finish_non_exhaustive()
    }
}

impl StoreClient {
    /// Parse `uri`, connect and verify the server answers a `ping`.
    ///
    /// Fails with [`BookstoreError::Connection`] when the URI is invalid or
    /// the server cannot be reached within `op_timeout`.
    pub async fn connect(
        uri: &str,
        database: &str,
        op_timeout: Duration,
    ) -> Result<Self> {
        let mut options = parse_options(uri, op_timeout).await?;
        if options.app_name.is_none() {
            options.app_name = Some(APP_NAME.to_string());
        }
        options.server_selection_timeout = Some(op_timeout);
        options.connect_timeout = Some(op_timeout);

        let client = Client::with_options(options).map_err(|err| {
            BookstoreError::Connection(format!(
                "failed to build MongoDB client: {err}"
            ))
        })?;

        let store = Self {
            database: client.database(database),
            op_timeout,
        };

        store.ping().await.map_err(|err| match err {
            BookstoreError::Query(msg) => BookstoreError::Connection(msg),
            other => other,
        })?;

        info!(database, "connected to MongoDB");
        Ok(store)
    }

    /// Handle to a collection of raw documents. Never fails.
    pub fn collection(&self, name: &str) -> Collection<Document> {
        debug!(collection = name, "resolving collection handle");
        self.database.collection(name)
    }

    pub fn op_timeout(&self) -> Duration {
        self.op_timeout
    }

    pub async fn ping(&self) -> Result<()> {
        with_deadline("ping", self.op_timeout, async {
            self.database.run_command(doc! { "ping": 1 }).await
        })
        .await
        .map(|_| ())
    }
}

/// Parse `uri` under `deadline`. `mongodb+srv://` URIs resolve SRV and TXT
/// records here, which can stall on a broken resolver.
async fn parse_options(uri: &str, deadline: Duration) -> Result<ClientOptions> {
    match tokio::time::timeout(deadline, ClientOptions::parse(uri)).await {
        Ok(parsed) => parsed.map_err(|err| {
            BookstoreError::Connection(format!("invalid MongoDB URI: {err}"))
        }),
        Err(_) => Err(BookstoreError::Connection(format!(
            "resolving MongoDB URI timed out after {}ms",
            deadline.as_millis()
        ))),
    }
}
