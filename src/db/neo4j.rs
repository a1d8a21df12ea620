use super::{CypherQuery, DatabaseError, GraphGateway, Row, SessionTracker};
use async_trait::async_trait;
use neo4rs::{query, BoltNull, BoltType, ConfigBuilder, Graph, Node, Query};
use serde_json::{Map, Value};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Gateway backed by the neo4rs Bolt driver.
///
/// The `Graph` owns the connection pool and is created once. Each call to
/// `run` borrows a pooled connection for the lifetime of one result stream,
/// which is what a session means here.
pub struct Neo4jGateway {
    graph: Arc<Graph>,
    sessions: SessionTracker,
    query_timeout: Duration,
}

impl Neo4jGateway {
    pub async fn connect(
        uri: &str,
        user: &str,
        password: &str,
        max_connections: usize,
        query_timeout: Duration,
    ) -> Result<Self, DatabaseError> {
        let config = ConfigBuilder::default()
            .uri(uri)
            .user(user)
            .password(password)
            .max_connections(max_connections)
            .build()
            .map_err(|e| DatabaseError::Connection(e.to_string()))?;

        let graph = Graph::connect(config)
            .await
            .map_err(|e| DatabaseError::Connection(e.to_string()))?;
        info!("Neo4j driver created for {}", uri);

        Ok(Self {
            graph: Arc::new(graph),
            sessions: SessionTracker::new(),
            query_timeout,
        })
    }

    async fn fetch(&self, cypher: &CypherQuery) -> Result<Vec<Row>, DatabaseError> {
        let mut stream = self
            .graph
            .execute(to_driver_query(cypher)?)
            .await
            .map_err(|e| DatabaseError::Query(e.to_string()))?;

        let mut rows = Vec::new();
        while let Some(row) = stream
            .next()
            .await
            .map_err(|e| DatabaseError::Query(e.to_string()))?
        {
            rows.push(column_value(&row, cypher.column)?);
        }

        Ok(rows)
    }
}

#[async_trait]
impl GraphGateway for Neo4jGateway {
    async fn run(&self, cypher: &CypherQuery) -> Result<Vec<Row>, DatabaseError> {
        within_session(
            &self.sessions,
            self.query_timeout,
            cypher.text,
            self.fetch(cypher),
        )
        .await
    }

    fn sessions(&self) -> &SessionTracker {
        &self.sessions
    }
}

/// Run `work` while holding one session, bounded by `limit`.
///
/// On expiry `work` is dropped before the guard, so the pooled connection
/// held by an in-flight stream goes back first, then the session.
async fn within_session<T, F>(
    sessions: &SessionTracker,
    limit: Duration,
    statement: &str,
    work: F,
) -> Result<T, DatabaseError>
where
    F: Future<Output = Result<T, DatabaseError>>,
{
    let session = sessions.acquire();
    debug!(session = session.id(), query = statement, "running statement");

    match tokio::time::timeout(limit, work).await {
        Ok(result) => result,
        Err(_) => {
            warn!(session = session.id(), "statement timed out after {:?}", limit);
            Err(DatabaseError::Timeout(limit))
        }
    }
}

fn to_driver_query(cypher: &CypherQuery) -> Result<Query, DatabaseError> {
    let mut q = query(cypher.text);
    for (key, value) in &cypher.params {
        q = q.param(key, to_bolt(key, value)?);
    }
    Ok(q)
}

// [business] Only the scalar types our statements send are supported
fn to_bolt(key: &str, value: &Value) -> Result<BoltType, DatabaseError> {
    let bolt = match value {
        Value::String(s) => BoltType::from(s.clone()),
        Value::Bool(b) => BoltType::from(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => BoltType::from(i),
            None => match n.as_f64() {
                Some(f) => BoltType::from(f),
                None => {
                    return Err(DatabaseError::Query(format!(
                        "parameter `{}` is out of range",
                        key
                    )))
                }
            },
        },
        Value::Null => BoltType::Null(BoltNull),
        Value::Array(_) | Value::Object(_) => {
            return Err(DatabaseError::Query(format!(
                "parameter `{}` must be a scalar",
                key
            )))
        }
    };
    Ok(bolt)
}

fn column_value(row: &neo4rs::Row, column: &str) -> Result<Row, DatabaseError> {
    let value = match row.get::<Node>(column) {
        Ok(node) => Value::Object(node_properties(&node)?),
        Err(_) => row
            .get::<Value>(column)
            .map_err(|e| DatabaseError::Mapping(format!("column `{}`: {}", column, e)))?,
    };

    let mut out = Map::new();
    out.insert(column.to_string(), value);
    Ok(out)
}

fn node_properties(node: &Node) -> Result<Map<String, Value>, DatabaseError> {
    let mut properties = Map::new();
    for key in node.keys() {
        let value = node
            .get::<Value>(key)
            .map_err(|e| DatabaseError::Mapping(format!("property `{}`: {}", key, e)))?;
        properties.insert(key.to_string(), value);
    }
    Ok(properties)
}
