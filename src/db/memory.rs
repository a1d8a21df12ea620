use super::queries::{CREATE_RECORD, LIST_COUNTRIES, LIST_RECORDS, PING};
use super::{CypherQuery, DatabaseError, GraphGateway, Properties, Row, SessionTracker};
use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Default)]
struct Store {
    records: Vec<Properties>,
    countries: Vec<Properties>,
    unavailable: Option<String>,
}

/// Gateway that keeps nodes in process memory.
///
/// Understands only the fixed statements in [`super::queries`]. Anything else
/// fails as a query error, the way an unknown procedure would on a server.
#[derive(Debug, Default)]
pub struct InMemoryGateway {
    store: RwLock<Store>,
    sessions: SessionTracker,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_countries(countries: Vec<Properties>) -> Self {
        Self {
            store: RwLock::new(Store {
                countries,
                ..Store::default()
            }),
            sessions: SessionTracker::new(),
        }
    }

    pub async fn insert_record(&self, properties: Properties) {
        self.store.write().await.records.push(properties);
    }

    /// Make every subsequent call fail with a connection error carrying `reason`.
    pub async fn set_unavailable(&self, reason: impl Into<String>) {
        self.store.write().await.unavailable = Some(reason.into());
    }

    pub async fn set_available(&self) {
        self.store.write().await.unavailable = None;
    }

    pub async fn records(&self) -> Vec<Properties> {
        self.store.read().await.records.clone()
    }
}

#[async_trait]
impl GraphGateway for InMemoryGateway {
    async fn run(&self, query: &CypherQuery) -> Result<Vec<Row>, DatabaseError> {
        let session = self.sessions.acquire();
        debug!(session = session.id(), query = query.text, "running in-memory statement");

        if let Some(reason) = &self.store.read().await.unavailable {
            return Err(DatabaseError::Connection(reason.clone()));
        }

        let values: Vec<Value> = match query.text {
            LIST_RECORDS => {
                let store = self.store.read().await;
                store.records.iter().cloned().map(Value::Object).collect()
            }
            LIST_COUNTRIES => {
                let store = self.store.read().await;
                store.countries.iter().cloned().map(Value::Object).collect()
            }
            CREATE_RECORD => {
                let properties: Properties = query
                    .params
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect();
                self.store.write().await.records.push(properties.clone());
                vec![Value::Object(properties)]
            }
            PING => vec![Value::from(1)],
            other => {
                return Err(DatabaseError::Query(format!(
                    "unsupported statement: {}",
                    other
                )))
            }
        };

        Ok(values
            .into_iter()
            .map(|value| {
                let mut row = Map::new();
                row.insert(query.column.to_string(), value);
                row
            })
            .collect())
    }

    fn sessions(&self) -> &SessionTracker {
        &self.sessions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_then_list() {
        let gateway = InMemoryGateway::new();
        let create = CypherQuery::new(CREATE_RECORD, "r")
            .param("iso_code", "BR")
            .param("year", 2010);

        let created = gateway.run(&create).await.unwrap();
        assert_eq!(created[0]["r"], json!({"iso_code": "BR", "year": 2010}));

        let listed = gateway
            .run(&CypherQuery::new(LIST_RECORDS, "r"))
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(gateway.sessions().open(), 0);
        assert_eq!(gateway.sessions().acquired(), 2);
    }

    #[tokio::test]
    async fn test_unavailable_fails_and_releases() {
        let gateway = InMemoryGateway::new();
        gateway.set_unavailable("Connection refused").await;

        let err = gateway.run(&CypherQuery::new(PING, "ok")).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Connection(ref m) if m == "Connection refused"));
        assert_eq!(gateway.sessions().open(), 0);

        gateway.set_available().await;
        assert!(gateway.run(&CypherQuery::new(PING, "ok")).await.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_statement_is_query_error() {
        let gateway = InMemoryGateway::new();
        let err = gateway
            .run(&CypherQuery::new("MATCH (n) DETACH DELETE n", "n"))
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Query(_)));
    }
}
