use crate::{
    db::{queries, Database, HealthResponse, WhoAmIResponse},
    instance::InstanceId,
};
use axum::{extract::State, http::StatusCode, response::Json};
use tracing::{error, info};

// [business] Health check for load balancers - includes a database round trip
// Returns 500 with the driver message when the graph is unreachable
pub async fn health_handler(
    State(db): State<Database>,
    State(instance): State<InstanceId>,
) -> (StatusCode, Json<HealthResponse>) {
    match queries::ping(&db).await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok".to_string(),
                instance: instance.to_string(),
                database: "connected".to_string(),
            }),
        ),
        Err(e) => {
            error!("Health check failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthResponse {
                    status: "fail".to_string(),
                    instance: instance.to_string(),
                    database: format!("error: {}", e),
                }),
            )
        }
    }
}

// [business] Instance identity - no database access, never fails
pub async fn whoami_handler(State(instance): State<InstanceId>) -> Json<WhoAmIResponse> {
    info!("whoami answered by {}", instance);
    Json(WhoAmIResponse {
        instance: instance.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{GraphGateway, InMemoryGateway};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_health_ok() {
        let db: Database = Arc::new(InMemoryGateway::new());
        let (status, Json(body)) = health_handler(State(db), State(InstanceId::new("api-1"))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "ok");
        assert_eq!(body.instance, "api-1");
        assert_eq!(body.database, "connected");
    }

    #[tokio::test]
    async fn test_health_fail_carries_message() {
        let gateway = Arc::new(InMemoryGateway::new());
        gateway.set_unavailable("Connection refused").await;
        let db: Database = gateway.clone();

        let (status, Json(body)) = health_handler(State(db), State(InstanceId::new("api-1"))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.status, "fail");
        assert_eq!(body.database, "error: Connection refused");
        assert_eq!(gateway.sessions().open(), 0);
    }

    #[tokio::test]
    async fn test_whoami_is_stable() {
        let instance = InstanceId::new("api-2");
        let Json(first) = whoami_handler(State(instance.clone())).await;
        let Json(second) = whoami_handler(State(instance)).await;
        assert_eq!(first.instance, "api-2");
        assert_eq!(first.instance, second.instance);
    }
}
