// [rust] Module declarations - organize database-related functionality
pub mod memory; // In-memory gateway used by tests
pub mod models; // Record model and API response bodies
pub mod neo4j; // neo4rs-backed gateway
pub mod queries; // Fixed Cypher statements and their result mapping
pub mod session; // Scoped session acquisition

// [rust] Re-export the common items so callers can import from db::
pub use memory::InMemoryGateway;
pub use models::*;
pub use neo4j::Neo4jGateway;
pub use queries::*;
pub use session::{SessionGuard, SessionTracker};

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::config::Config;

// [rust] Shared handle to whichever gateway backs the service
// Arc<dyn ...> lets handlers stay agnostic of the driver and lets tests inject a fake
pub type Database = Arc<dyn GraphGateway>;

/// One result row: returned column name to JSON value. Nodes become an
/// object holding their properties.
pub type Row = Map<String, Value>;

/// The only failure kind surfaced by the gateway.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("{0}")]
    Connection(String),
    #[error("{0}")]
    Query(String),
    #[error("unexpected result shape: {0}")]
    Mapping(String),
    #[error("query timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

/// A parameterized Cypher statement returning a single column.
#[derive(Debug, Clone, PartialEq)]
pub struct CypherQuery {
    pub text: &'static str,
    pub params: BTreeMap<String, Value>,
    pub column: &'static str,
}

impl CypherQuery {
    pub fn new(text: &'static str, column: &'static str) -> Self {
        Self {
            text,
            params: BTreeMap::new(),
            column,
        }
    }

    pub fn param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }
}

/// Session gateway over the graph database.
///
/// Each `run` acquires its own session and releases it before returning,
/// whether the statement succeeded or not. Implementations do not retry.
#[async_trait]
pub trait GraphGateway: Send + Sync {
    async fn run(&self, query: &CypherQuery) -> Result<Vec<Row>, DatabaseError>;

    /// Tracker of the sessions this gateway has handed out.
    fn sessions(&self) -> &SessionTracker;
}

// [business] Database handle factory - builds the driver pool from configuration
pub async fn connect(config: &Config) -> Result<Database, DatabaseError> {
    let gateway = Neo4jGateway::connect(
        &config.neo4j_uri,
        &config.neo4j_username,
        config.neo4j_password(),
        config.max_connections,
        config.query_timeout(),
    )
    .await?;

    // [rust] Wrap in Arc for cheap cloning into every request
    Ok(Arc::new(gateway))
}
